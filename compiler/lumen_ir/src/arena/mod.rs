//! Arena storage for expressions and statements.
//!
//! Nodes reference their children through `ExprId`/`StmtId` indices into a
//! [`ShaderArena`]. Rewrites replace the node stored at an index in place,
//! so every parent that points at the index observes the replacement.

use std::fmt;

use crate::ast::{Expr, Stmt};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Invalid ID (sentinel value).
            pub const INVALID: $name = $name(u32::MAX);

            #[inline]
            pub const fn new(index: u32) -> Self {
                $name(index)
            }

            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }

            #[inline]
            pub const fn is_valid(self) -> bool {
                self.0 != u32::MAX
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, "{}({})", stringify!($name), self.0)
                } else {
                    write!(f, "{}::INVALID", stringify!($name))
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::INVALID
            }
        }
    };
}

define_id!(
    /// Index into the expression arena.
    ExprId
);
define_id!(
    /// Index into the statement arena.
    StmtId
);

/// Contiguous storage for every expression and statement of one unit.
#[derive(Clone, Default, PartialEq, Eq, Hash, Debug)]
pub struct ShaderArena {
    exprs: Vec<Expr>,
    stmts: Vec<Stmt>,
}

impl ShaderArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an expression and return its id.
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(next_index(self.exprs.len()));
        self.exprs.push(expr);
        id
    }

    /// Allocate a statement and return its id.
    pub fn alloc_stmt(&mut self, stmt: Stmt) -> StmtId {
        let id = StmtId::new(next_index(self.stmts.len()));
        self.stmts.push(stmt);
        id
    }

    /// Get an expression by id.
    ///
    /// # Panics
    /// Panics if `id` was not allocated by this arena.
    #[inline]
    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    /// Get a statement by id.
    ///
    /// # Panics
    /// Panics if `id` was not allocated by this arena.
    #[inline]
    pub fn stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }

    #[inline]
    pub fn try_expr(&self, id: ExprId) -> Option<&Expr> {
        self.exprs.get(id.index())
    }

    #[inline]
    pub fn try_stmt(&self, id: StmtId) -> Option<&Stmt> {
        self.stmts.get(id.index())
    }

    /// Replace the expression stored at `id`, returning the old node.
    pub fn replace_expr(&mut self, id: ExprId, expr: Expr) -> Expr {
        std::mem::replace(&mut self.exprs[id.index()], expr)
    }

    /// Replace the statement stored at `id`, returning the old node.
    pub fn replace_stmt(&mut self, id: StmtId, stmt: Stmt) -> Stmt {
        std::mem::replace(&mut self.stmts[id.index()], stmt)
    }

    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    pub fn stmt_count(&self) -> usize {
        self.stmts.len()
    }
}

fn next_index(len: usize) -> u32 {
    // An arena past u32::MAX - 1 nodes would collide with INVALID.
    u32::try_from(len)
        .ok()
        .filter(|&i| i != u32::MAX)
        .unwrap_or_else(|| panic!("shader arena exceeded {} nodes", u32::MAX - 1))
}
