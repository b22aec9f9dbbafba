//! AST traversal.
//!
//! Two traversals share the same child order (depth-first, left-to-right,
//! `for` loops in source order: init, condition, step, body):
//!
//! - [`Visitor`]: read-only. Default `visit_*` methods call the `walk_*`
//!   functions; override a method to add behavior at that node kind.
//! - [`Rewriter`]: single-pass, in-place rewriting. Children are rewritten
//!   before their parent's hook runs, so a parent hook sees the final form
//!   of its children. A replacement node is stored as-is and never
//!   traversed again; there is no fix-point iteration.
//!
//! Which replacements take effect is controlled by [`RewriteMode`]. Hooks run
//! regardless of the mode, so analysis passes still observe every node; a
//! replacement returned for a disabled node family is dropped.
//!
//! # Example
//!
//! ```text
//! struct StripParens;
//!
//! impl Rewriter for StripParens {
//!     fn rewrite_mode(&self) -> RewriteMode {
//!         RewriteMode::EXPRESSIONS
//!     }
//!
//!     fn rewrite_expr(&mut self, id: ExprId, arena: &ShaderArena) -> Option<Expr> {
//!         match arena.expr(id).kind {
//!             ExprKind::Paren(inner) => Some(arena.expr(inner).clone()),
//!             _ => None,
//!         }
//!     }
//! }
//! ```

use bitflags::bitflags;
use lumen_stack::ensure_sufficient_stack;

use crate::ast::{
    Expr, Function, Item, ShaderUnit, Stmt, StmtKind, StructDef, TypedefDef, VarDecl,
};
use crate::{ExprId, ShaderArena, StmtId};

bitflags! {
    /// Node families whose hook replacements are applied.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct RewriteMode: u8 {
        const EXPRESSIONS = 1 << 0;
        const STATEMENTS = 1 << 1;
    }
}

impl RewriteMode {
    /// Build a mode from the two independent toggles.
    pub fn from_toggles(rewrite_expressions: bool, rewrite_statements: bool) -> Self {
        let mut mode = RewriteMode::empty();
        mode.set(RewriteMode::EXPRESSIONS, rewrite_expressions);
        mode.set(RewriteMode::STATEMENTS, rewrite_statements);
        mode
    }
}

impl Default for RewriteMode {
    fn default() -> Self {
        RewriteMode::all()
    }
}

// Visitor Trait

/// Read-only AST visitor.
pub trait Visitor<'ast> {
    fn visit_unit(&mut self, unit: &'ast ShaderUnit) {
        walk_unit(self, unit);
    }

    fn visit_item(&mut self, item: &'ast Item, arena: &'ast ShaderArena) {
        walk_item(self, item, arena);
    }

    fn visit_function(&mut self, function: &'ast Function, arena: &'ast ShaderArena) {
        self.visit_stmt_id(function.body, arena);
    }

    fn visit_global(&mut self, decl: &'ast VarDecl, arena: &'ast ShaderArena) {
        if let Some(init) = decl.init {
            self.visit_expr_id(init, arena);
        }
    }

    fn visit_struct(&mut self, def: &'ast StructDef) {
        let _ = def;
    }

    fn visit_typedef(&mut self, def: &'ast TypedefDef) {
        let _ = def;
    }

    fn visit_stmt_id(&mut self, id: StmtId, arena: &'ast ShaderArena) {
        self.visit_stmt(arena.stmt(id), arena);
    }

    fn visit_stmt(&mut self, stmt: &'ast Stmt, arena: &'ast ShaderArena) {
        walk_stmt(self, stmt, arena);
    }

    fn visit_expr_id(&mut self, id: ExprId, arena: &'ast ShaderArena) {
        self.visit_expr(arena.expr(id), arena);
    }

    fn visit_expr(&mut self, expr: &'ast Expr, arena: &'ast ShaderArena) {
        walk_expr(self, expr, arena);
    }
}

// Walk Functions

/// Walk every item of a unit in declaration order.
pub fn walk_unit<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, unit: &'ast ShaderUnit) {
    for item in &unit.items {
        visitor.visit_item(item, &unit.arena);
    }
}

pub fn walk_item<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    item: &'ast Item,
    arena: &'ast ShaderArena,
) {
    match item {
        Item::Function(function) => visitor.visit_function(function, arena),
        Item::Global(decl) => visitor.visit_global(decl, arena),
        Item::Struct(def) => visitor.visit_struct(def),
        Item::Typedef(def) => visitor.visit_typedef(def),
    }
}

pub fn walk_stmt<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    stmt: &'ast Stmt,
    arena: &'ast ShaderArena,
) {
    match &stmt.kind {
        StmtKind::Expr(expr) => visitor.visit_expr_id(*expr, arena),
        StmtKind::Decl(decl) => {
            if let Some(init) = decl.init {
                visitor.visit_expr_id(init, arena);
            }
        }
        StmtKind::Block(stmts) => {
            for s in stmts {
                visitor.visit_stmt_id(*s, arena);
            }
        }
        StmtKind::If {
            cond,
            then_branch,
            else_branch,
        } => {
            visitor.visit_expr_id(*cond, arena);
            visitor.visit_stmt_id(*then_branch, arena);
            if let Some(else_branch) = else_branch {
                visitor.visit_stmt_id(*else_branch, arena);
            }
        }
        StmtKind::For {
            init,
            cond,
            step,
            body,
        } => {
            if let Some(init) = init {
                visitor.visit_stmt_id(*init, arena);
            }
            if let Some(cond) = cond {
                visitor.visit_expr_id(*cond, arena);
            }
            if let Some(step) = step {
                visitor.visit_expr_id(*step, arena);
            }
            visitor.visit_stmt_id(*body, arena);
        }
        StmtKind::While { cond, body } => {
            visitor.visit_expr_id(*cond, arena);
            visitor.visit_stmt_id(*body, arena);
        }
        StmtKind::Return(value) => {
            if let Some(value) = value {
                visitor.visit_expr_id(*value, arena);
            }
        }
        StmtKind::Discard | StmtKind::Break | StmtKind::Continue | StmtKind::Empty => {}
    }
}

pub fn walk_expr<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    expr: &'ast Expr,
    arena: &'ast ShaderArena,
) {
    ensure_sufficient_stack(|| {
        for child in expr.kind.children() {
            visitor.visit_expr_id(child, arena);
        }
    });
}

// Rewriter Trait

/// Single-pass, in-place AST rewriter.
///
/// `enter_*` hooks run before children are traversed, `rewrite_*` hooks run
/// after. A `rewrite_*` hook returns `Some(node)` to replace the node stored
/// at `id`; `None` keeps it.
pub trait Rewriter {
    /// Which node families accept replacements.
    fn rewrite_mode(&self) -> RewriteMode;

    fn enter_item(&mut self, item: &Item, arena: &ShaderArena) {
        let _ = (item, arena);
    }

    fn leave_item(&mut self, item: &Item, arena: &ShaderArena) {
        let _ = (item, arena);
    }

    fn enter_stmt(&mut self, id: StmtId, arena: &ShaderArena) {
        let _ = (id, arena);
    }

    fn rewrite_stmt(&mut self, id: StmtId, arena: &ShaderArena) -> Option<Stmt> {
        let _ = (id, arena);
        None
    }

    fn rewrite_expr(&mut self, id: ExprId, arena: &ShaderArena) -> Option<Expr> {
        let _ = (id, arena);
        None
    }
}

/// Rewrite every item of a unit in declaration order.
pub fn rewrite_unit<R: Rewriter + ?Sized>(rewriter: &mut R, unit: &mut ShaderUnit) {
    let ShaderUnit { items, arena, .. } = unit;
    for item in items.iter() {
        rewrite_item(rewriter, item, arena);
    }
}

pub fn rewrite_item<R: Rewriter + ?Sized>(rewriter: &mut R, item: &Item, arena: &mut ShaderArena) {
    rewriter.enter_item(item, arena);
    match item {
        Item::Function(function) => rewrite_stmt(rewriter, function.body, arena),
        Item::Global(decl) => {
            if let Some(init) = decl.init {
                rewrite_expr(rewriter, init, arena);
            }
        }
        Item::Struct(_) | Item::Typedef(_) => {}
    }
    rewriter.leave_item(item, arena);
}

pub fn rewrite_stmt<R: Rewriter + ?Sized>(rewriter: &mut R, id: StmtId, arena: &mut ShaderArena) {
    ensure_sufficient_stack(|| {
        rewriter.enter_stmt(id, arena);

        let kind = arena.stmt(id).kind.clone();
        match kind {
            StmtKind::Expr(expr) => rewrite_expr(rewriter, expr, arena),
            StmtKind::Decl(decl) => {
                if let Some(init) = decl.init {
                    rewrite_expr(rewriter, init, arena);
                }
            }
            StmtKind::Block(stmts) => {
                for s in stmts {
                    rewrite_stmt(rewriter, s, arena);
                }
            }
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                rewrite_expr(rewriter, cond, arena);
                rewrite_stmt(rewriter, then_branch, arena);
                if let Some(else_branch) = else_branch {
                    rewrite_stmt(rewriter, else_branch, arena);
                }
            }
            StmtKind::For {
                init,
                cond,
                step,
                body,
            } => {
                if let Some(init) = init {
                    rewrite_stmt(rewriter, init, arena);
                }
                if let Some(cond) = cond {
                    rewrite_expr(rewriter, cond, arena);
                }
                if let Some(step) = step {
                    rewrite_expr(rewriter, step, arena);
                }
                rewrite_stmt(rewriter, body, arena);
            }
            StmtKind::While { cond, body } => {
                rewrite_expr(rewriter, cond, arena);
                rewrite_stmt(rewriter, body, arena);
            }
            StmtKind::Return(value) => {
                if let Some(value) = value {
                    rewrite_expr(rewriter, value, arena);
                }
            }
            StmtKind::Discard | StmtKind::Break | StmtKind::Continue | StmtKind::Empty => {}
        }

        if let Some(replacement) = rewriter.rewrite_stmt(id, arena) {
            if rewriter.rewrite_mode().contains(RewriteMode::STATEMENTS) {
                arena.replace_stmt(id, replacement);
            }
        }
    });
}

pub fn rewrite_expr<R: Rewriter + ?Sized>(rewriter: &mut R, id: ExprId, arena: &mut ShaderArena) {
    ensure_sufficient_stack(|| {
        let children = arena.expr(id).kind.children();
        for child in children {
            rewrite_expr(rewriter, child, arena);
        }

        if let Some(replacement) = rewriter.rewrite_expr(id, arena) {
            if rewriter.rewrite_mode().contains(RewriteMode::EXPRESSIONS) {
                arena.replace_expr(id, replacement);
            }
        }
    });
}

#[cfg(test)]
mod tests;
