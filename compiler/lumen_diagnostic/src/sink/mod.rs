//! Append-only diagnostic sink.
//!
//! One sink is owned by one analysis request. Records are kept in emission
//! order and never dropped while the request runs, so a single run surfaces
//! every defect. Limits from [`DiagnosticConfig`] only apply when the sink is
//! rendered through [`DiagnosticSink::reportable`].

use lumen_ir::Span;

use crate::{Diagnostic, ErrorCode, ErrorGuaranteed, Severity};

/// Configuration for diagnostic reporting.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Maximum number of errors rendered (0 = unlimited).
    pub error_limit: usize,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig { error_limit: 10 }
    }
}

impl DiagnosticConfig {
    /// Create a config with no limits (for testing).
    pub fn unlimited() -> Self {
        DiagnosticConfig { error_limit: 0 }
    }
}

/// Collected diagnostics for one request.
///
/// # Example
///
/// ```text
/// let mut sink = DiagnosticSink::new();
/// sink.error(ErrorCode::E2003, span, format!("unknown identifier `{name}`"));
/// sink.into_result()?;
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
    warning_count: usize,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fully built diagnostic.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
            Severity::Info => {}
        }
        self.diagnostics.push(diagnostic);
    }

    /// Record an error diagnostic and get proof it was recorded.
    ///
    /// The diagnostic's severity is forced to [`Severity::Error`].
    pub fn emit_error(&mut self, mut diagnostic: Diagnostic) -> ErrorGuaranteed {
        diagnostic.severity = Severity::Error;
        self.emit(diagnostic);
        ErrorGuaranteed::new()
    }

    /// Record an error at `span`.
    pub fn error(
        &mut self,
        code: ErrorCode,
        span: Span,
        message: impl Into<String>,
    ) -> ErrorGuaranteed {
        self.emit_error(Diagnostic::error(code).with_message(message).with_span(span))
    }

    /// Record a warning at `span`.
    pub fn warning(&mut self, code: ErrorCode, span: Span, message: impl Into<String>) {
        self.emit(
            Diagnostic::warning(code)
                .with_message(message)
                .with_span(span),
        );
    }

    /// Record an informational note at `span`.
    pub fn info(&mut self, code: ErrorCode, span: Span, message: impl Into<String>) {
        self.emit(Diagnostic::info(code).with_message(message).with_span(span));
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Proof of errors, if any were recorded.
    pub fn has_errors(&self) -> Option<ErrorGuaranteed> {
        ErrorGuaranteed::from_error_count(self.error_count)
    }

    /// Records in emission order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Records with the given code, in emission order.
    pub fn with_code(&self, code: ErrorCode) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.code == code)
    }

    /// `Err` iff an error-level record exists.
    pub fn result(&self) -> Result<(), ErrorGuaranteed> {
        match self.has_errors() {
            Some(guarantee) => Err(guarantee),
            None => Ok(()),
        }
    }

    /// Like [`result`](Self::result), consuming the sink.
    pub fn into_result(self) -> Result<(), ErrorGuaranteed> {
        self.result()
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Whether rendering under `config` would hide some errors.
    pub fn limit_reached(&self, config: &DiagnosticConfig) -> bool {
        config.error_limit > 0 && self.error_count > config.error_limit
    }

    /// Records to render under `config`, sorted by source position.
    ///
    /// Errors past the limit are left out; warnings and notes are always
    /// kept. The sort is stable, so records at the same position keep their
    /// emission order.
    pub fn reportable(&self, config: &DiagnosticConfig) -> Vec<&Diagnostic> {
        let mut errors_seen = 0;
        let mut out: Vec<&Diagnostic> = self
            .diagnostics
            .iter()
            .filter(|diag| {
                if !diag.is_error() {
                    return true;
                }
                errors_seen += 1;
                config.error_limit == 0 || errors_seen <= config.error_limit
            })
            .collect();

        let already_sorted = out
            .windows(2)
            .all(|w| position_key(w[0]) <= position_key(w[1]));
        if !already_sorted {
            out.sort_by_key(|d| position_key(d));
        }
        out
    }
}

impl<'a> IntoIterator for &'a DiagnosticSink {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}

fn position_key(diag: &Diagnostic) -> (u32, u32, u32) {
    diag.primary_span().map_or((u32::MAX, 0, 0), |span| {
        (span.file.raw(), span.start.line, span.start.column)
    })
}
