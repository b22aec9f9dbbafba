use pretty_assertions::assert_eq;

use super::*;
use lumen_ir::FileId;

fn span(line: u32, column: u32) -> Span {
    Span::point(FileId::new(0), line, column)
}

#[test]
fn builder_collects_every_part() {
    let diag = Diagnostic::error(ErrorCode::E2001)
        .with_message("cannot deduce type")
        .with_label(span(3, 7), "here")
        .with_secondary_label(span(1, 1), "declared here")
        .with_note("operands have different arity")
        .with_suggestion("add an explicit cast");

    assert!(diag.is_error());
    assert_eq!(diag.labels.len(), 2);
    assert_eq!(diag.primary_span(), Some(span(3, 7)));
    assert_eq!(diag.notes, vec!["operands have different arity".to_string()]);
    assert_eq!(diag.suggestions.len(), 1);
}

#[test]
fn primary_span_skips_secondary_labels() {
    let diag = Diagnostic::warning(ErrorCode::W2001)
        .with_secondary_label(span(1, 1), "context")
        .with_span(span(2, 5));
    assert_eq!(diag.primary_span(), Some(span(2, 5)));
    assert!(diag.is_warning());
}

#[test]
fn info_has_info_severity() {
    let diag = Diagnostic::info(ErrorCode::I0001).with_message("entry point found");
    assert_eq!(diag.severity, Severity::Info);
    assert!(!diag.is_error());
    assert_eq!(diag.primary_span(), None);
}

#[test]
fn display_renders_header_and_labels() {
    let diag = Diagnostic::error(ErrorCode::E2003)
        .with_message("unknown identifier `foo`")
        .with_span(span(4, 2))
        .with_note("declare it before use");
    let text = diag.to_string();
    assert!(text.starts_with("error [E2003]: unknown identifier `foo`"));
    assert!(text.contains("--> FileId(0)@4:2..4:2"));
    assert!(text.contains("= note: declare it before use"));
}

#[test]
fn severity_display() {
    assert_eq!(Severity::Error.to_string(), "error");
    assert_eq!(Severity::Warning.to_string(), "warning");
    assert_eq!(Severity::Info.to_string(), "info");
}
