use lumen_ir::RewriteMode;

/// Options for one analysis run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Node families whose rewrites are applied. Rewrites returned for other
    /// families are computed and then discarded.
    pub rewrite: RewriteMode,
    /// Emit `WarningImplicitTruncation` for narrowing stores.
    pub warn_on_truncation: bool,
}

impl AnalysisConfig {
    /// Analyze without touching the tree.
    pub fn read_only() -> Self {
        AnalysisConfig {
            rewrite: RewriteMode::empty(),
            ..Self::default()
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            rewrite: RewriteMode::all(),
            warn_on_truncation: true,
        }
    }
}
