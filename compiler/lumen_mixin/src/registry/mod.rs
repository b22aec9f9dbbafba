//! Mixin generator registry.
//!
//! The registry maps mixin names to generators. It is filled once through a
//! [`RegistryBuilder`] and is immutable afterwards, so compiles on any
//! number of threads can share it without locking. Either pass it around by
//! reference or [`install`](MixinRegistry::install) it as the process-wide
//! instance.

use std::fmt;
use std::sync::OnceLock;

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::context::MixinContext;
use crate::params::ParamKeyId;
use crate::{MixinError, MixinTree};

/// Process-wide registry, set by [`MixinRegistry::install`].
static GLOBAL_REGISTRY: OnceLock<MixinRegistry> = OnceLock::new();

/// Produces the building blocks of one named mixin.
///
/// `generate` appends to `tree` and may expand other mixins through `ctx`.
/// It runs synchronously and must balance every composition it opens.
pub trait MixinGenerator: Send + Sync {
    fn name(&self) -> &str;

    /// Keys bound, in order, to the positional arguments of
    /// [`MixinContext::mixin`].
    fn params(&self) -> &[ParamKeyId] {
        &[]
    }

    fn generate(&self, tree: &mut MixinTree, ctx: &mut MixinContext<'_>) -> Result<(), MixinError>;
}

type GenerateFn =
    dyn Fn(&mut MixinTree, &mut MixinContext<'_>) -> Result<(), MixinError> + Send + Sync;

/// A generator backed by a closure, for table-driven definitions.
pub struct FnGenerator {
    name: String,
    params: Vec<ParamKeyId>,
    generate: Box<GenerateFn>,
}

impl FnGenerator {
    pub fn new<F>(name: impl Into<String>, generate: F) -> Self
    where
        F: Fn(&mut MixinTree, &mut MixinContext<'_>) -> Result<(), MixinError>
            + Send
            + Sync
            + 'static,
    {
        FnGenerator {
            name: name.into(),
            params: Vec::new(),
            generate: Box::new(generate),
        }
    }

    #[must_use]
    pub fn with_params(mut self, params: impl IntoIterator<Item = ParamKeyId>) -> Self {
        self.params = params.into_iter().collect();
        self
    }
}

impl MixinGenerator for FnGenerator {
    fn name(&self) -> &str {
        &self.name
    }

    fn params(&self) -> &[ParamKeyId] {
        &self.params
    }

    fn generate(&self, tree: &mut MixinTree, ctx: &mut MixinContext<'_>) -> Result<(), MixinError> {
        (self.generate)(tree, ctx)
    }
}

impl fmt::Debug for FnGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnGenerator")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A generator with this name is already registered.
    #[error("mixin `{name}` is already registered")]
    DuplicateMixin { name: String },

    /// The process-wide registry was already installed.
    #[error("a mixin registry is already installed")]
    AlreadyInstalled,
}

/// Immutable name-to-generator map.
#[derive(Default)]
pub struct MixinRegistry {
    generators: FxHashMap<String, Box<dyn MixinGenerator>>,
}

impl MixinRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    pub fn get(&self, name: &str) -> Option<&dyn MixinGenerator> {
        self.generators.get(name).map(AsRef::as_ref)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.generators.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.generators.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Make this the process-wide registry. Fails if one is already
    /// installed, leaving the installed registry untouched.
    pub fn install(self) -> Result<&'static MixinRegistry, RegistryError> {
        let mut installed = false;
        let registry = GLOBAL_REGISTRY.get_or_init(|| {
            installed = true;
            self
        });
        if installed {
            tracing::debug!(mixins = registry.len(), "installed process-wide mixin registry");
            Ok(registry)
        } else {
            Err(RegistryError::AlreadyInstalled)
        }
    }

    /// The process-wide registry, if one was installed.
    pub fn global() -> Option<&'static MixinRegistry> {
        GLOBAL_REGISTRY.get()
    }
}

impl fmt::Debug for MixinRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MixinRegistry")
            .field("mixins", &self.names())
            .finish()
    }
}

/// Collects generators before the registry is frozen.
#[derive(Default)]
pub struct RegistryBuilder {
    generators: FxHashMap<String, Box<dyn MixinGenerator>>,
}

impl RegistryBuilder {
    pub fn register(
        mut self,
        generator: impl MixinGenerator + 'static,
    ) -> Result<Self, RegistryError> {
        let name = generator.name().to_owned();
        if self.generators.contains_key(&name) {
            return Err(RegistryError::DuplicateMixin { name });
        }
        tracing::debug!(mixin = %name, params = generator.params().len(), "registered mixin");
        self.generators.insert(name, Box::new(generator));
        Ok(self)
    }

    /// Register a closure as the generator for `name`.
    pub fn register_fn<F>(self, name: &str, generate: F) -> Result<Self, RegistryError>
    where
        F: Fn(&mut MixinTree, &mut MixinContext<'_>) -> Result<(), MixinError>
            + Send
            + Sync
            + 'static,
    {
        self.register(FnGenerator::new(name, generate))
    }

    pub fn build(self) -> MixinRegistry {
        MixinRegistry {
            generators: self.generators,
        }
    }
}

#[cfg(test)]
mod tests;
