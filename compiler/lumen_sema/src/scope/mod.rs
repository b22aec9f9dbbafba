//! Lexical scopes for variable bindings.
//!
//! A scope is a map of names plus a parent link. Entering a block creates a
//! child; leaving it returns to the parent. Lookups walk the chain outwards.

use std::rc::Rc;

use lumen_types::Type;
use rustc_hash::FxHashMap;

/// The type a name is bound to.
///
/// `None` marks a declaration whose type failed to resolve. The name still
/// counts as declared, so its uses are not reported a second time.
pub type Binding = Option<Type>;

#[derive(Clone, Debug, Default)]
struct ScopeInner {
    bindings: FxHashMap<String, Binding>,
    parent: Option<Scope>,
}

/// One lexical scope.
///
/// Uses `Rc` so creating a child does not copy the parent chain.
///
/// ```text
/// let mut globals = Scope::new();
/// globals.bind("time", Some(Type::FLOAT));
///
/// let mut body = globals.child();
/// body.bind("uv", Some(Type::vector(ScalarKind::Float, 2)));
/// assert!(body.lookup("time").is_some());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Scope(Rc<ScopeInner>);

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn child(&self) -> Self {
        Scope(Rc::new(ScopeInner {
            bindings: FxHashMap::default(),
            parent: Some(self.clone()),
        }))
    }

    pub fn parent(&self) -> Option<Self> {
        self.0.parent.clone()
    }

    /// Bind `name` in this scope.
    ///
    /// Returns `false`, leaving the first binding in place, if the name is
    /// already bound in this scope. Shadowing an outer scope is allowed.
    pub fn bind(&mut self, name: &str, ty: Binding) -> bool {
        if self.is_bound_locally(name) {
            return false;
        }
        Rc::make_mut(&mut self.0)
            .bindings
            .insert(name.to_owned(), ty);
        true
    }

    /// Look a name up, searching parent scopes.
    pub fn lookup(&self, name: &str) -> Option<&Binding> {
        self.0
            .bindings
            .get(name)
            .or_else(|| self.0.parent.as_ref().and_then(|p| p.lookup(name)))
    }

    pub fn is_bound_locally(&self, name: &str) -> bool {
        self.0.bindings.contains_key(name)
    }

    /// Number of scopes between this one and the root.
    pub fn depth(&self) -> usize {
        self.0.parent.as_ref().map_or(0, |p| p.depth() + 1)
    }
}

#[cfg(test)]
mod tests;
