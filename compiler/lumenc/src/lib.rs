//! Lumen driver.
//!
//! Ties the front-end crates together behind one configuration:
//!
//! - [`check_unit`]: semantic analysis of a parsed shader unit, with
//!   rendering of the collected diagnostics
//! - [`expand_mixin`]: mixin expansion, with `key=value` parameter
//!   overrides parsed by [`parse_overrides`]
//! - [`demo`]: a registry of example effects used by the `lumenc` binary

pub mod config;
pub mod demo;
mod error;

pub use config::LumenConfig;
pub use error::LumenError;

use std::sync::Once;

use lumen_diagnostic::emitter::{emit_sink, ColorMode, JsonEmitter, TerminalEmitter};
use lumen_diagnostic::DiagnosticSink;
use lumen_ir::{ShaderUnit, SourceMap};
use lumen_mixin::{MixinRecipe, MixinRegistry, ParamKeys, Parameters};
use lumen_sema::AnalysisResult;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set; safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
                .with(filter)
                .init();
        }
    });
}

/// Output of [`check_unit`].
#[derive(Debug)]
pub struct CheckOutput {
    pub result: AnalysisResult,
    pub sink: DiagnosticSink,
}

impl CheckOutput {
    /// No error was recorded.
    pub fn succeeded(&self) -> bool {
        self.sink.has_errors().is_none()
    }
}

/// How [`render_diagnostics`] formats its output.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DiagnosticFormat {
    #[default]
    Terminal,
    Json,
}

/// Analyze `unit` with a fresh diagnostic sink.
pub fn check_unit(unit: &mut ShaderUnit, config: &LumenConfig) -> CheckOutput {
    let mut sink = DiagnosticSink::new();
    let result = lumen_sema::analyze(unit, &mut sink, config.analysis);
    tracing::debug!(
        errors = sink.error_count(),
        warnings = sink.warning_count(),
        "analysis finished"
    );
    CheckOutput { result, sink }
}

/// Render `sink` within the configured error limit. Terminal output has no
/// color.
pub fn render_diagnostics(
    sink: &DiagnosticSink,
    sources: &SourceMap,
    config: &LumenConfig,
    format: DiagnosticFormat,
) -> String {
    let bytes = match format {
        DiagnosticFormat::Terminal => {
            let mut emitter =
                TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false, sources);
            emit_sink(&mut emitter, sink, &config.diagnostics);
            emitter.into_inner()
        }
        DiagnosticFormat::Json => {
            let mut emitter = JsonEmitter::new(Vec::new(), sources);
            emitter.begin();
            emit_sink(&mut emitter, sink, &config.diagnostics);
            emitter.end();
            emitter.into_inner()
        }
    };
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Parse `key=value` overrides against the keys declared in `keys`.
pub fn parse_overrides<S: AsRef<str>>(
    keys: &ParamKeys,
    overrides: &[S],
) -> Result<Parameters, LumenError> {
    let mut parameters = Parameters::new();
    for text in overrides {
        let text = text.as_ref();
        let Some((name, value)) = text.split_once('=') else {
            return Err(LumenError::MalformedOverride(text.to_owned()));
        };
        let name = name.trim();
        let Some(key) = keys.lookup(name) else {
            return Err(LumenError::UnknownParameter {
                name: name.to_owned(),
            });
        };
        let Some(parsed) = key.kind().parse_value(value) else {
            return Err(LumenError::InvalidParameter {
                name: name.to_owned(),
                kind: key.kind(),
                value: value.to_owned(),
            });
        };
        parameters.set_value(key, parsed);
    }
    Ok(parameters)
}

/// Expand mixin `name` with the configured depth limit.
pub fn expand_mixin(
    registry: &MixinRegistry,
    name: &str,
    parameters: Parameters,
    config: &LumenConfig,
) -> Result<MixinRecipe, LumenError> {
    Ok(lumen_mixin::compile_mixin(registry, name, parameters, config.mixin)?)
}
