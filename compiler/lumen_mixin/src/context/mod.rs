//! The composition context threaded through one compile.
//!
//! The context owns everything that changes while generators run:
//!
//! - a stack of parameter scopes, innermost wins
//! - a stack of invocation frames, one per generator currently running,
//!   each holding the composition slots that generator has opened
//! - the discard flag
//!
//! Open compositions live in the frame rather than in the caller's tree.
//! While a slot is open, [`MixinContext::mixin`] writes into the slot's
//! child; [`MixinContext::pop_composition`] attaches the finished child to
//! the enclosing target. Generators that want to add classes straight into
//! an open slot go through [`MixinContext::active`].

use std::mem;

use lumen_stack::ensure_sufficient_stack;
use smallvec::SmallVec;

use crate::params::{ParamKey, ParamKeyId, ParamType, ParamValue, Parameters};
use crate::registry::{MixinGenerator, MixinRegistry};
use crate::{MixinError, MixinTree};

/// Default limit on nested mixin expansions.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// The value every unbound key reads as.
static UNSET: ParamValue = ParamValue::Unset;

/// Limits applied during expansion.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MixinConfig {
    /// Nested generator invocations allowed before
    /// [`MixinError::RecursionLimit`].
    pub max_depth: usize,
}

impl Default for MixinConfig {
    fn default() -> Self {
        MixinConfig {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum SlotKind {
    Single,
    Array,
}

#[derive(Debug)]
struct OpenSlot {
    name: String,
    kind: SlotKind,
    child: MixinTree,
}

impl OpenSlot {
    fn label(&self) -> String {
        match self.kind {
            SlotKind::Single => self.name.clone(),
            SlotKind::Array => format!("{}[]", self.name),
        }
    }
}

/// One running generator.
#[derive(Debug)]
struct Frame {
    mixin: String,
    open: Vec<OpenSlot>,
    /// Parameter scopes open when the generator started. It may only pop
    /// scopes above this.
    scope_floor: usize,
}

impl Frame {
    fn new(mixin: impl Into<String>, scope_floor: usize) -> Self {
        Frame {
            mixin: mixin.into(),
            open: Vec::new(),
            scope_floor,
        }
    }
}

/// Per-compile state passed to every generator.
#[derive(Debug)]
pub struct MixinContext<'r> {
    registry: &'r MixinRegistry,
    config: MixinConfig,
    scopes: SmallVec<[Parameters; 4]>,
    /// `frames[0]` is the caller of the first expansion.
    frames: Vec<Frame>,
    discarded: bool,
}

impl<'r> MixinContext<'r> {
    pub fn new(registry: &'r MixinRegistry, parameters: Parameters) -> Self {
        Self::with_config(registry, parameters, MixinConfig::default())
    }

    pub fn with_config(
        registry: &'r MixinRegistry,
        parameters: Parameters,
        config: MixinConfig,
    ) -> Self {
        let mut scopes = SmallVec::new();
        scopes.push(parameters);
        MixinContext {
            registry,
            config,
            scopes,
            frames: vec![Frame::new("root", 1)],
            discarded: false,
        }
    }

    pub fn registry(&self) -> &'r MixinRegistry {
        self.registry
    }

    pub fn config(&self) -> MixinConfig {
        self.config
    }

    // Parameters

    /// Typed read. Unbound keys, and values of another kind, read as
    /// `T::default()`.
    pub fn get_param<T: ParamType>(&self, key: &ParamKey<T>) -> T {
        T::from_value(self.get_param_value(key.id())).unwrap_or_default()
    }

    /// Raw read. Unbound keys read as [`ParamValue::Unset`].
    pub fn get_param_value(&self, key: &ParamKeyId) -> &ParamValue {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get_value(key))
            .unwrap_or(&UNSET)
    }

    /// Bind in the innermost scope.
    pub fn set_param<T: ParamType>(&mut self, key: &ParamKey<T>, value: T) {
        self.set_param_value(key.id().clone(), value.into_value());
    }

    pub fn set_param_value(&mut self, key: ParamKeyId, value: ParamValue) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.set_value(key, value);
        }
    }

    pub fn push_parameters(&mut self, parameters: Parameters) {
        self.scopes.push(parameters);
    }

    /// Close the innermost scope opened by the running generator.
    ///
    /// `None` if it has none open. Scopes belonging to callers, including
    /// the compile's own parameters, are never popped.
    pub fn pop_parameters(&mut self) -> Option<Parameters> {
        let floor = self.frames.last().map_or(1, |frame| frame.scope_floor);
        if self.scopes.len() > floor {
            self.scopes.pop()
        } else {
            None
        }
    }

    /// Open parameter scopes, including the compile's own.
    pub fn parameter_depth(&self) -> usize {
        self.scopes.len()
    }

    // Expansion

    /// Expand mixin `name` into the active target.
    ///
    /// The active target is the innermost composition the calling generator
    /// has open, or `target` if it has none. `args` bind positionally to
    /// the generator's declared keys in a scope that lasts for this call
    /// only. After [`discard`](Self::discard) this does nothing.
    #[tracing::instrument(level = "debug", skip_all, fields(mixin = name, depth = self.depth()))]
    pub fn mixin(
        &mut self,
        target: &mut MixinTree,
        name: &str,
        args: &[ParamValue],
    ) -> Result<(), MixinError> {
        if self.discarded {
            return Ok(());
        }

        let registry = self.registry;
        let Some(generator) = registry.get(name) else {
            return Err(MixinError::UnknownMixin {
                name: name.to_owned(),
                path: self.slot_path(),
            });
        };

        if self.depth() >= self.config.max_depth {
            return Err(MixinError::RecursionLimit {
                name: name.to_owned(),
                limit: self.config.max_depth,
                path: self.slot_path(),
            });
        }

        let overrides = self.bind_arguments(generator, args)?;
        let scope_depth = self.scopes.len();
        if let Some(overrides) = overrides {
            self.scopes.push(overrides);
        }

        let redirect = self.current_slot_mut().map(|slot| mem::take(&mut slot.child));
        let result = match redirect {
            Some(mut child) => {
                let result = self.invoke(generator, &mut child);
                if let Some(slot) = self.current_slot_mut() {
                    slot.child = child;
                }
                result
            }
            None => self.invoke(generator, target),
        };

        // Scopes the generator left open close with it.
        self.scopes.truncate(scope_depth);
        result
    }

    /// Expand the mixin named by `value`.
    ///
    /// Unset values are [`MixinError::MissingParameter`]; values that are
    /// neither a mixin nor a string are [`MixinError::NotAMixin`].
    pub fn mixin_value(
        &mut self,
        target: &mut MixinTree,
        value: &ParamValue,
    ) -> Result<(), MixinError> {
        match value {
            ParamValue::Unset => Err(MixinError::MissingParameter {
                name: self.current_mixin().to_owned(),
                key: "<value>".to_owned(),
                path: self.slot_path(),
            }),
            value => match value.mixin_name() {
                Some(name) => self.mixin(target, name, &[]),
                None => Err(MixinError::NotAMixin {
                    name: self.current_mixin().to_owned(),
                    found: value.to_string(),
                    path: self.slot_path(),
                }),
            },
        }
    }

    /// Expand the mixin named by parameter `key`, reporting the key by name
    /// if it is unbound.
    pub fn mixin_param(
        &mut self,
        target: &mut MixinTree,
        key: &ParamKeyId,
    ) -> Result<(), MixinError> {
        let value = self.get_param_value(key).clone();
        if value.is_unset() {
            return Err(MixinError::MissingParameter {
                name: self.current_mixin().to_owned(),
                key: key.name().to_owned(),
                path: self.slot_path(),
            });
        }
        self.mixin_value(target, &value)
    }

    /// Open single slot `slot` with `child` as its initial content.
    pub fn push_composition(&mut self, slot: &str, child: MixinTree) {
        self.open_slot(slot, SlotKind::Single, child);
    }

    /// Open a new item of array slot `slot`.
    pub fn push_composition_array(&mut self, slot: &str, child: MixinTree) {
        self.open_slot(slot, SlotKind::Array, child);
    }

    /// Close the innermost open composition and attach its child to the
    /// enclosing open composition, or to `target` if none is open.
    pub fn pop_composition(&mut self, target: &mut MixinTree) -> Result<(), MixinError> {
        let popped = self.frames.last_mut().and_then(|frame| frame.open.pop());
        let Some(slot) = popped else {
            return Err(MixinError::PopWithoutPush {
                name: self.current_mixin().to_owned(),
                path: self.slot_path(),
            });
        };

        let parent = match self.current_slot_mut() {
            Some(outer) => &mut outer.child,
            None => target,
        };
        match slot.kind {
            SlotKind::Single => {
                parent.set_slot(slot.name, slot.child);
            }
            SlotKind::Array => parent.push_slot_item(slot.name, slot.child),
        }
        Ok(())
    }

    /// Expand `name` into a fresh child of single slot `slot`.
    pub fn compose(
        &mut self,
        target: &mut MixinTree,
        slot: &str,
        name: &str,
    ) -> Result<(), MixinError> {
        self.push_composition(slot, MixinTree::new());
        let expanded = self.mixin(target, name, &[]);
        // Close the slot even on failure so the frame stays balanced.
        let popped = self.pop_composition(target);
        expanded.and(popped)
    }

    /// Expand `name` into a new item of array slot `slot`.
    pub fn compose_array(
        &mut self,
        target: &mut MixinTree,
        slot: &str,
        name: &str,
    ) -> Result<(), MixinError> {
        self.push_composition_array(slot, MixinTree::new());
        let expanded = self.mixin(target, name, &[]);
        let popped = self.pop_composition(target);
        expanded.and(popped)
    }

    /// The tree that output currently goes to: the innermost open
    /// composition of the running generator, else `target`.
    pub fn active<'t>(&'t mut self, target: &'t mut MixinTree) -> &'t mut MixinTree {
        match self.current_slot_mut() {
            Some(slot) => &mut slot.child,
            None => target,
        }
    }

    /// Drop the whole expansion. Later `mixin` calls are no-ops and the
    /// compile yields an empty tree.
    pub fn discard(&mut self) {
        tracing::debug!(mixin = self.current_mixin(), "expansion discarded");
        self.discarded = true;
    }

    pub fn is_discarded(&self) -> bool {
        self.discarded
    }

    /// Number of generators currently running.
    pub fn depth(&self) -> usize {
        self.frames.len().saturating_sub(1)
    }

    /// Composition slots open along the current expansion, e.g.
    /// `root/sub/lights[]`.
    pub fn slot_path(&self) -> String {
        let mut path = String::from("root");
        for slot in self.frames.iter().flat_map(|frame| &frame.open) {
            path.push('/');
            path.push_str(&slot.label());
        }
        path
    }

    /// Fail if the compile's own frame left a composition open.
    pub fn check_balanced(&self) -> Result<(), MixinError> {
        match self.frames.first().and_then(|frame| frame.open.last()) {
            Some(slot) if !self.discarded => Err(MixinError::UnbalancedComposition {
                name: self.current_mixin().to_owned(),
                slot: slot.label(),
                path: self.slot_path(),
            }),
            _ => Ok(()),
        }
    }

    fn invoke(
        &mut self,
        generator: &dyn MixinGenerator,
        tree: &mut MixinTree,
    ) -> Result<(), MixinError> {
        tracing::trace!(mixin = generator.name(), depth = self.depth(), "expanding");
        self.frames.push(Frame::new(generator.name(), self.scopes.len()));
        let generated = ensure_sufficient_stack(|| generator.generate(tree, self));

        let unbalanced = match self.frames.last().and_then(|frame| frame.open.last()) {
            Some(slot) if generated.is_ok() && !self.discarded => {
                Some(MixinError::UnbalancedComposition {
                    name: generator.name().to_owned(),
                    slot: slot.label(),
                    path: self.slot_path(),
                })
            }
            _ => None,
        };
        self.frames.pop();

        generated?;
        unbalanced.map_or(Ok(()), Err)
    }

    fn bind_arguments(
        &self,
        generator: &dyn MixinGenerator,
        args: &[ParamValue],
    ) -> Result<Option<Parameters>, MixinError> {
        if args.is_empty() {
            return Ok(None);
        }

        let declared = generator.params();
        if args.len() > declared.len() {
            return Err(MixinError::TooManyArguments {
                name: generator.name().to_owned(),
                expected: declared.len(),
                found: args.len(),
                path: self.slot_path(),
            });
        }

        for (key, arg) in declared.iter().zip(args) {
            if let Some(found) = arg.kind() {
                if found != key.kind() {
                    return Err(MixinError::ArgumentType {
                        name: generator.name().to_owned(),
                        key: key.name().to_owned(),
                        expected: key.kind(),
                        found,
                        path: self.slot_path(),
                    });
                }
            }
        }

        Ok(Some(declared.iter().cloned().zip(args.iter().cloned()).collect()))
    }

    fn open_slot(&mut self, name: &str, kind: SlotKind, child: MixinTree) {
        if let Some(frame) = self.frames.last_mut() {
            frame.open.push(OpenSlot {
                name: name.to_owned(),
                kind,
                child,
            });
        }
    }

    fn current_slot_mut(&mut self) -> Option<&mut OpenSlot> {
        self.frames.last_mut().and_then(|frame| frame.open.last_mut())
    }

    fn current_mixin(&self) -> &str {
        self.frames.last().map_or("root", |frame| frame.mixin.as_str())
    }
}
