//! Semantic analysis for Lumen shader units.
//!
//! The analyzer runs over a finished [`ShaderUnit`]:
//!
//! 1. **Collection**: structs, typedefs and function signatures are recorded
//!    in an [`ItemTable`]
//! 2. **Checking**: a single post-order [`Rewriter`](lumen_ir::Rewriter) pass
//!    types every expression through the `lumen_types` conversion rules and
//!    checks declarations, assignments, calls and returns
//!
//! Diagnostics go to a caller-owned [`DiagnosticSink`]. Analysis never stops
//! at the first error.
//!
//! ```text
//! let mut sink = DiagnosticSink::new();
//! let result = analyze(&mut unit, &mut sink, AnalysisConfig::default());
//! for diagnostic in sink.reportable(&DiagnosticConfig::default()) { ... }
//! ```

mod analyzer;
mod collect;
mod config;
mod scope;

pub use analyzer::{AnalysisResult, SemanticAnalyzer};
pub use collect::{FunctionSig, ItemTable, StructInfo};
pub use config::AnalysisConfig;
pub use scope::{Binding, Scope};

use lumen_diagnostic::DiagnosticSink;
use lumen_ir::ShaderUnit;

/// Analyze `unit`, reporting to `sink`.
pub fn analyze(
    unit: &mut ShaderUnit,
    sink: &mut DiagnosticSink,
    config: AnalysisConfig,
) -> AnalysisResult {
    let mut analyzer = SemanticAnalyzer::with_config(unit, sink, config);
    analyzer.run();
    analyzer.into_result()
}
