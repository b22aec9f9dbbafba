//! Whole-compile entry point.

use std::fmt;

use crate::context::{MixinConfig, MixinContext};
use crate::params::{ParamValue, Parameters};
use crate::registry::MixinRegistry;
use crate::{MixinError, MixinTree};

/// The result of expanding one mixin: the tree plus the parameters it was
/// expanded with, ready for source generation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct MixinRecipe {
    pub name: String,
    pub tree: MixinTree,
    /// Compile parameters, sorted by name.
    pub parameters: Vec<(String, ParamValue)>,
    /// Set when a generator called [`MixinContext::discard`]. The tree is
    /// then empty.
    pub discarded: bool,
}

impl fmt::Display for MixinRecipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mixin {}", self.name)?;
        if self.discarded {
            f.write_str(" (discarded)")?;
        }
        writeln!(f)?;
        for (name, value) in &self.parameters {
            writeln!(f, "  {name} = {value}")?;
        }
        write!(f, "{}", self.tree)
    }
}

/// Expand mixin `name` from scratch with `parameters` as the outermost
/// scope.
///
/// Each call builds its own context, so compiles on separate threads can
/// share `registry`.
#[tracing::instrument(level = "debug", skip_all, fields(mixin = name, params = parameters.len()))]
pub fn compile_mixin(
    registry: &MixinRegistry,
    name: &str,
    parameters: Parameters,
    config: MixinConfig,
) -> Result<MixinRecipe, MixinError> {
    let bound = parameters.to_sorted_vec();
    let mut ctx = MixinContext::with_config(registry, parameters, config);
    let mut tree = MixinTree::new();
    ctx.mixin(&mut tree, name, &[])?;
    ctx.check_balanced()?;

    let discarded = ctx.is_discarded();
    if discarded {
        tree = MixinTree::new();
    }
    tracing::debug!(classes = tree.class_count(), discarded, "mixin compiled");

    Ok(MixinRecipe {
        name: name.to_owned(),
        tree,
        parameters: bound,
        discarded,
    })
}

#[cfg(test)]
mod tests;
