//! Diagnostic Emitters
//!
//! Output formats for diagnostics:
//! - Terminal: human-readable output with optional ANSI color
//! - JSON: machine-readable output for editors and build tooling
//!
//! Both resolve spans to `path:line:col` through a
//! [`SourceMap`](lumen_ir::SourceMap).

mod json;
mod terminal;

pub use json::JsonEmitter;
pub use terminal::{ColorMode, TerminalEmitter};

use std::fmt::Write;

use crate::{Diagnostic, DiagnosticConfig, DiagnosticSink};

/// Returns a trailing comma for JSON list serialization.
pub(crate) fn trailing_comma(index: usize, total: usize) -> &'static str {
    if index + 1 < total {
        ","
    } else {
        ""
    }
}

/// Trait for emitting diagnostics in various formats.
pub trait DiagnosticEmitter {
    /// Emit a single diagnostic.
    fn emit(&mut self, diagnostic: &Diagnostic);

    /// Emit multiple diagnostics.
    fn emit_all<'d>(&mut self, diagnostics: impl IntoIterator<Item = &'d Diagnostic>)
    where
        Self: Sized,
    {
        for diag in diagnostics {
            self.emit(diag);
        }
    }

    /// Flush any buffered output.
    fn flush(&mut self);

    /// Emit a summary of errors/warnings.
    fn emit_summary(&mut self, error_count: usize, warning_count: usize);
}

/// Render a whole sink: the records allowed by `config`, then a summary that
/// counts every recorded error and warning.
pub fn emit_sink<E: DiagnosticEmitter>(
    emitter: &mut E,
    sink: &DiagnosticSink,
    config: &DiagnosticConfig,
) {
    emitter.emit_all(sink.reportable(config));
    emitter.emit_summary(sink.error_count(), sink.warning_count());
    emitter.flush();
}

/// Escape a string for JSON output.
pub(crate) fn escape_json(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(result, "\\u{:04x}", c as u32);
            }
            c => result.push(c),
        }
    }
    result
}
