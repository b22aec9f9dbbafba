//! JSON Emitter
//!
//! Machine-readable diagnostic output in JSON format.

use std::io::Write;

use lumen_ir::SourceMap;

use crate::Diagnostic;

use super::{escape_json, trailing_comma, DiagnosticEmitter};

/// JSON emitter for machine-readable output.
///
/// Diagnostics are written as one array; call [`begin`](Self::begin) before
/// the first and [`end`](Self::end) after the last.
pub struct JsonEmitter<'s, W: Write> {
    writer: W,
    first: bool,
    sources: &'s SourceMap,
}

impl<'s, W: Write> JsonEmitter<'s, W> {
    pub fn new(writer: W, sources: &'s SourceMap) -> Self {
        JsonEmitter {
            writer,
            first: true,
            sources,
        }
    }

    pub fn begin(&mut self) {
        let _ = writeln!(self.writer, "[");
    }

    pub fn end(&mut self) {
        let _ = writeln!(self.writer, "\n]");
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DiagnosticEmitter for JsonEmitter<'_, W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        if !self.first {
            let _ = writeln!(self.writer, ",");
        }
        self.first = false;

        let _ = writeln!(self.writer, "  {{");
        let _ = writeln!(self.writer, "    \"code\": \"{}\",", diagnostic.code.as_str());
        let _ = writeln!(self.writer, "    \"name\": \"{}\",", diagnostic.code.name());
        let _ = writeln!(self.writer, "    \"severity\": \"{}\",", diagnostic.severity);
        let _ = writeln!(
            self.writer,
            "    \"message\": \"{}\",",
            escape_json(&diagnostic.message)
        );

        let _ = writeln!(self.writer, "    \"labels\": [");
        for (i, label) in diagnostic.labels.iter().enumerate() {
            let comma = trailing_comma(i, diagnostic.labels.len());
            let file = self.sources.path(label.span.file).unwrap_or("<unknown>");
            let _ = writeln!(self.writer, "      {{");
            let _ = writeln!(self.writer, "        \"file\": \"{}\",", escape_json(file));
            let _ = writeln!(self.writer, "        \"line\": {},", label.span.start.line);
            let _ = writeln!(self.writer, "        \"column\": {},", label.span.start.column);
            let _ = writeln!(self.writer, "        \"end_line\": {},", label.span.end.line);
            let _ = writeln!(self.writer, "        \"end_column\": {},", label.span.end.column);
            let _ = writeln!(
                self.writer,
                "        \"message\": \"{}\",",
                escape_json(&label.message)
            );
            let _ = writeln!(self.writer, "        \"primary\": {}", label.is_primary);
            let _ = writeln!(self.writer, "      }}{comma}");
        }
        let _ = writeln!(self.writer, "    ],");

        let _ = writeln!(self.writer, "    \"notes\": [");
        for (i, note) in diagnostic.notes.iter().enumerate() {
            let comma = trailing_comma(i, diagnostic.notes.len());
            let _ = writeln!(self.writer, "      \"{}\"{comma}", escape_json(note));
        }
        let _ = writeln!(self.writer, "    ],");

        let _ = writeln!(self.writer, "    \"suggestions\": [");
        for (i, suggestion) in diagnostic.suggestions.iter().enumerate() {
            let comma = trailing_comma(i, diagnostic.suggestions.len());
            let _ = writeln!(self.writer, "      \"{}\"{comma}", escape_json(suggestion));
        }
        let _ = writeln!(self.writer, "    ]");

        let _ = write!(self.writer, "  }}");
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, _error_count: usize, _warning_count: usize) {
        // The array already carries every record.
    }
}
