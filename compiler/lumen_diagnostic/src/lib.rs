//! Diagnostic system for shader analysis.
//!
//! Every diagnostic carries:
//! - A stable error code for searchability (`E2001`) and its symbolic name
//!   (`ErrorBinaryTypeDeduction`)
//! - A severity (error, warning, info)
//! - An interpolated message
//! - A primary span rendered as `path:line:col`
//!
//! Diagnostics are collected in a [`DiagnosticSink`] owned by one analysis
//! request. The sink is append-only: nothing recorded is discarded before the
//! request finishes.
//!
//! # Error Guarantees
//!
//! [`ErrorGuaranteed`] is type-level proof that at least one error was
//! recorded. It can only be obtained from the sink.
//!
//! ```text
//! let guarantee = sink.error(ErrorCode::E2001, span, "cannot deduce type");
//!
//! fn analyze() -> Result<AnalysisResult, ErrorGuaranteed> { ... }
//! ```

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod errors;
mod guarantee;
pub mod sink;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
pub use errors::ErrorDocs;
pub use guarantee::ErrorGuaranteed;
pub use sink::{DiagnosticConfig, DiagnosticSink};
