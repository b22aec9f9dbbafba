//! Mixin composition for the Lumen shader front end.
//!
//! A mixin is a named generator that appends shader building blocks to a
//! [`MixinTree`], reading typed parameters and expanding other mixins as it
//! goes. This crate provides:
//!
//! - [`params`]: typed parameter keys, untyped values and parameter scopes
//! - [`MixinTree`]: the ordered class list plus named composition slots
//! - [`MixinRegistry`]: the immutable name-to-generator map
//! - [`MixinContext`]: per-compile state handed to every generator
//! - [`compile_mixin`]: expand one mixin into a [`MixinRecipe`]
//!
//! # Example
//!
//! ```text
//! let registry = MixinRegistry::builder()
//!     .register_fn("Base", |tree, _| { tree.add_class("Base"); Ok(()) })?
//!     .register_fn("C", |tree, ctx| {
//!         tree.add_class("CBase");
//!         ctx.compose(tree, "sub", "Base")
//!     })?
//!     .build();
//! let recipe = compile_mixin(&registry, "C", Parameters::new(), MixinConfig::default())?;
//! ```

mod context;
mod error;
pub mod params;
mod recipe;
mod registry;
mod tree;

pub use context::{MixinConfig, MixinContext, DEFAULT_MAX_DEPTH};
pub use error::MixinError;
pub use params::{
    MixinName, ParamKey, ParamKeyError, ParamKeyId, ParamKeys, ParamKind, ParamType, ParamValue,
    Parameters,
};
pub use recipe::{compile_mixin, MixinRecipe};
pub use registry::{FnGenerator, MixinGenerator, MixinRegistry, RegistryBuilder, RegistryError};
pub use tree::{ClassRef, MixinTree};
