//! Driver-level errors.

use lumen_mixin::{MixinError, ParamKeyError, ParamKind, RegistryError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LumenError {
    #[error(transparent)]
    Mixin(#[from] MixinError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    ParamKey(#[from] ParamKeyError),

    /// `key=value` named a key nobody declared.
    #[error("unknown parameter `{name}`")]
    UnknownParameter { name: String },

    /// The value text does not parse as the key's type.
    #[error("parameter `{name}` expects {kind}, got `{value}`")]
    InvalidParameter {
        name: String,
        kind: ParamKind,
        value: String,
    },

    /// An override argument without `=`.
    #[error("expected `key=value`, got `{0}`")]
    MalformedOverride(String),

    /// An environment override that is not a number.
    #[error("{var} must be a non-negative integer, got `{value}`")]
    InvalidEnv { var: &'static str, value: String },
}
