use std::collections::HashSet;

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn codes_and_names_are_unique() {
    let codes: HashSet<_> = ErrorCode::ALL.iter().map(ErrorCode::as_str).collect();
    let names: HashSet<_> = ErrorCode::ALL.iter().map(ErrorCode::name).collect();
    assert_eq!(codes.len(), ErrorCode::ALL.len());
    assert_eq!(names.len(), ErrorCode::ALL.len());
}

#[test]
fn display_matches_as_str() {
    for code in ErrorCode::ALL {
        assert_eq!(code.to_string(), code.as_str());
    }
}

#[test]
fn parse_by_code_is_case_insensitive() {
    assert_eq!("E2001".parse::<ErrorCode>(), Ok(ErrorCode::E2001));
    assert_eq!("w2001".parse::<ErrorCode>(), Ok(ErrorCode::W2001));
    assert_eq!("E9999".parse::<ErrorCode>(), Err(()));
}

#[test]
fn parse_by_symbolic_name() {
    assert_eq!(
        "ErrorBinaryTypeDeduction".parse::<ErrorCode>(),
        Ok(ErrorCode::E2001)
    );
    assert_eq!(
        "ErrorScalarTypeConversion".parse::<ErrorCode>(),
        Ok(ErrorCode::E2002)
    );
    assert_eq!(
        "WarningImplicitTruncation".parse::<ErrorCode>(),
        Ok(ErrorCode::W2001)
    );
}

#[test]
fn every_code_round_trips_through_from_str() {
    for code in ErrorCode::ALL {
        assert_eq!(code.as_str().parse::<ErrorCode>(), Ok(*code));
        assert_eq!(code.name().parse::<ErrorCode>(), Ok(*code));
    }
}

#[test]
fn ranges_partition_codes() {
    for code in ErrorCode::ALL {
        let ranges = [code.is_semantic_error(), code.is_warning(), code.is_info()];
        assert_eq!(ranges.iter().filter(|r| **r).count(), 1, "{code}");
    }
    assert!(ErrorCode::W2001.is_warning());
    assert!(ErrorCode::I0001.is_info());
    assert!(ErrorCode::E2011.is_semantic_error());
}
