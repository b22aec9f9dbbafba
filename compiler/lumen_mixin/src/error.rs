//! Structural expansion errors.
//!
//! Unlike semantic diagnostics these abort the compile immediately. Every
//! variant names the mixin involved and the composition-slot path
//! (`root/sub/lights[]`) at which expansion failed.

use thiserror::Error;

use crate::params::ParamKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MixinError {
    /// No generator is registered under the name.
    #[error("unknown mixin `{name}` at {path}")]
    UnknownMixin { name: String, path: String },

    /// A generator returned with a composition slot still open.
    #[error("mixin `{name}` returned with composition `{slot}` still open at {path}")]
    UnbalancedComposition {
        name: String,
        slot: String,
        path: String,
    },

    /// `pop_composition` with no open composition in the current generator.
    #[error("mixin `{name}` popped a composition it never pushed at {path}")]
    PopWithoutPush { name: String, path: String },

    /// A mixin-valued parameter had no value.
    #[error("mixin `{name}` requires parameter `{key}` at {path}")]
    MissingParameter {
        name: String,
        key: String,
        path: String,
    },

    /// A parameter used as a mixin name holds some other kind of value.
    #[error("mixin `{name}` expected a mixin name but found {found} at {path}")]
    NotAMixin {
        name: String,
        found: String,
        path: String,
    },

    /// More positional arguments than the generator declares.
    #[error("mixin `{name}` takes {expected} argument(s) but {found} were given at {path}")]
    TooManyArguments {
        name: String,
        expected: usize,
        found: usize,
        path: String,
    },

    /// A positional argument of the wrong kind.
    #[error("mixin `{name}` argument `{key}` expects {expected}, found {found} at {path}")]
    ArgumentType {
        name: String,
        key: String,
        expected: ParamKind,
        found: ParamKind,
        path: String,
    },

    /// Expansion nested deeper than the configured limit.
    #[error("mixin `{name}` exceeded the expansion depth limit of {limit} at {path}")]
    RecursionLimit {
        name: String,
        limit: usize,
        path: String,
    },
}

impl MixinError {
    /// Name of the mixin the error is about.
    pub fn mixin(&self) -> &str {
        match self {
            MixinError::UnknownMixin { name, .. }
            | MixinError::UnbalancedComposition { name, .. }
            | MixinError::PopWithoutPush { name, .. }
            | MixinError::MissingParameter { name, .. }
            | MixinError::NotAMixin { name, .. }
            | MixinError::TooManyArguments { name, .. }
            | MixinError::ArgumentType { name, .. }
            | MixinError::RecursionLimit { name, .. } => name,
        }
    }

    /// Composition-slot path at the point of failure.
    pub fn path(&self) -> &str {
        match self {
            MixinError::UnknownMixin { path, .. }
            | MixinError::UnbalancedComposition { path, .. }
            | MixinError::PopWithoutPush { path, .. }
            | MixinError::MissingParameter { path, .. }
            | MixinError::NotAMixin { path, .. }
            | MixinError::TooManyArguments { path, .. }
            | MixinError::ArgumentType { path, .. }
            | MixinError::RecursionLimit { path, .. } => path,
        }
    }
}
