//! Driver configuration: per-crate defaults plus environment overrides.

use lumen_diagnostic::DiagnosticConfig;
use lumen_mixin::MixinConfig;
use lumen_sema::AnalysisConfig;

use crate::LumenError;

/// Maximum number of errors rendered per run (`0` = unlimited).
pub const ERROR_LIMIT_VAR: &str = "LUMEN_ERROR_LIMIT";

/// Nested mixin expansions allowed per compile.
pub const MAX_MIXIN_DEPTH_VAR: &str = "LUMEN_MAX_MIXIN_DEPTH";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LumenConfig {
    pub diagnostics: DiagnosticConfig,
    pub analysis: AnalysisConfig,
    pub mixin: MixinConfig,
}

impl LumenConfig {
    /// Defaults overridden from the process environment.
    pub fn from_env() -> Result<Self, LumenError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Defaults overridden through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, LumenError> {
        let mut config = LumenConfig::default();
        if let Some(limit) = read_count(&lookup, ERROR_LIMIT_VAR)? {
            config.diagnostics.error_limit = limit;
        }
        if let Some(depth) = read_count(&lookup, MAX_MIXIN_DEPTH_VAR)? {
            config.mixin.max_depth = depth;
        }
        tracing::debug!(
            error_limit = config.diagnostics.error_limit,
            max_mixin_depth = config.mixin.max_depth,
            "configuration loaded"
        );
        Ok(config)
    }
}

fn read_count(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<usize>, LumenError> {
    let Some(value) = lookup(var) else {
        return Ok(None);
    };
    match value.trim().parse() {
        Ok(count) => Ok(Some(count)),
        Err(_) => Err(LumenError::InvalidEnv { var, value }),
    }
}
