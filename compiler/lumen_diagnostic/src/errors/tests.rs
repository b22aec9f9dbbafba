use super::*;

#[test]
fn every_code_is_documented() {
    for code in ErrorCode::ALL {
        assert!(ErrorDocs::has_docs(*code), "{code} has no documentation");
    }
    assert_eq!(ErrorDocs::all_codes().count(), ErrorCode::ALL.len());
}

#[test]
fn docs_mention_code_and_symbolic_name() {
    for code in ErrorCode::ALL {
        let doc = ErrorDocs::get(*code).unwrap_or_default();
        assert!(doc.starts_with(&format!("# {}", code.as_str())), "{code}");
        assert!(doc.contains(code.name()), "{code}");
    }
}

#[test]
fn binary_deduction_doc_lists_promotion_order() {
    let doc = ErrorDocs::get(ErrorCode::E2001).unwrap_or_default();
    assert!(doc.contains("bool < int < uint < half < float < double"));
}
