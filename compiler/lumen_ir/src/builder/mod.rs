//! Programmatic construction of shader units.
//!
//! Parsing is an external collaborator; whatever produces the tree uses
//! `UnitBuilder` to allocate nodes. Every node gets the builder's current
//! span, moved with [`UnitBuilder::at`].
//!
//! ```text
//! let mut b = UnitBuilder::new(file);
//! let x = b.at(4, 12).ident("x");
//! let one = b.float(1.0);
//! let sum = b.binary(BinaryOp::Add, x, one);
//! ```

use crate::ast::{
    AssignOp, BinaryOp, Expr, ExprKind, Function, Item, Literal, Param, ParsedType, ShaderUnit,
    Stmt, StmtKind, StructDef, StructField, TypedefDef, UnaryOp, VarDecl,
};
use crate::{ExprId, FileId, Span, StmtId};

/// Builder for a [`ShaderUnit`].
pub struct UnitBuilder {
    unit: ShaderUnit,
    span: Span,
}

impl UnitBuilder {
    pub fn new(file: FileId) -> Self {
        UnitBuilder {
            unit: ShaderUnit::new(file),
            span: Span::point(file, 1, 1),
        }
    }

    /// Move the current position; subsequent nodes use it.
    pub fn at(&mut self, line: u32, column: u32) -> &mut Self {
        self.span = Span::point(self.unit.file, line, column);
        self
    }

    /// Use an explicit span for subsequent nodes.
    pub fn with_span(&mut self, span: Span) -> &mut Self {
        self.span = span;
        self
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn ty(&self, name: &str) -> ParsedType {
        ParsedType::new(name, self.span)
    }

    // Expressions

    pub fn expr(&mut self, kind: ExprKind) -> ExprId {
        let span = self.span;
        self.unit.arena.alloc_expr(Expr::new(kind, span))
    }

    pub fn literal(&mut self, literal: Literal) -> ExprId {
        self.expr(ExprKind::Literal(literal))
    }

    pub fn bool(&mut self, value: bool) -> ExprId {
        self.literal(Literal::Bool(value))
    }

    pub fn int(&mut self, value: i64) -> ExprId {
        self.literal(Literal::Int(value))
    }

    pub fn uint(&mut self, value: u64) -> ExprId {
        self.literal(Literal::UInt(value))
    }

    pub fn float(&mut self, value: f64) -> ExprId {
        self.literal(Literal::float(value))
    }

    pub fn double(&mut self, value: f64) -> ExprId {
        self.literal(Literal::double(value))
    }

    pub fn ident(&mut self, name: &str) -> ExprId {
        self.expr(ExprKind::Ident(name.to_owned()))
    }

    pub fn unary(&mut self, op: UnaryOp, operand: ExprId) -> ExprId {
        self.expr(ExprKind::Unary { op, operand })
    }

    pub fn binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> ExprId {
        self.expr(ExprKind::Binary { op, left, right })
    }

    pub fn conditional(
        &mut self,
        cond: ExprId,
        then_branch: ExprId,
        else_branch: ExprId,
    ) -> ExprId {
        self.expr(ExprKind::Conditional {
            cond,
            then_branch,
            else_branch,
        })
    }

    pub fn call(&mut self, callee: &str, args: Vec<ExprId>) -> ExprId {
        self.expr(ExprKind::Call {
            callee: callee.to_owned(),
            args,
        })
    }

    pub fn member(&mut self, target: ExprId, member: &str) -> ExprId {
        self.expr(ExprKind::Member {
            target,
            member: member.to_owned(),
        })
    }

    pub fn index(&mut self, target: ExprId, index: ExprId) -> ExprId {
        self.expr(ExprKind::Index { target, index })
    }

    pub fn cast(&mut self, ty: &str, operand: ExprId) -> ExprId {
        let ty = self.ty(ty);
        self.expr(ExprKind::Cast { ty, operand })
    }

    pub fn assign(&mut self, target: ExprId, value: ExprId) -> ExprId {
        self.expr(ExprKind::Assign {
            op: AssignOp::Assign,
            target,
            value,
        })
    }

    pub fn compound_assign(&mut self, op: BinaryOp, target: ExprId, value: ExprId) -> ExprId {
        self.expr(ExprKind::Assign {
            op: AssignOp::Compound(op),
            target,
            value,
        })
    }

    pub fn paren(&mut self, inner: ExprId) -> ExprId {
        self.expr(ExprKind::Paren(inner))
    }

    // Statements

    pub fn stmt(&mut self, kind: StmtKind) -> StmtId {
        let span = self.span;
        self.unit.arena.alloc_stmt(Stmt::new(kind, span))
    }

    pub fn expr_stmt(&mut self, expr: ExprId) -> StmtId {
        self.stmt(StmtKind::Expr(expr))
    }

    pub fn var_decl(&mut self, name: &str, ty: &str, init: Option<ExprId>) -> VarDecl {
        VarDecl {
            name: name.to_owned(),
            ty: self.ty(ty),
            init,
            span: self.span,
        }
    }

    pub fn decl(&mut self, name: &str, ty: &str, init: Option<ExprId>) -> StmtId {
        let decl = self.var_decl(name, ty, init);
        self.stmt(StmtKind::Decl(decl))
    }

    pub fn block(&mut self, stmts: Vec<StmtId>) -> StmtId {
        self.stmt(StmtKind::Block(stmts))
    }

    pub fn if_stmt(
        &mut self,
        cond: ExprId,
        then_branch: StmtId,
        else_branch: Option<StmtId>,
    ) -> StmtId {
        self.stmt(StmtKind::If {
            cond,
            then_branch,
            else_branch,
        })
    }

    pub fn for_stmt(
        &mut self,
        init: Option<StmtId>,
        cond: Option<ExprId>,
        step: Option<ExprId>,
        body: StmtId,
    ) -> StmtId {
        self.stmt(StmtKind::For {
            init,
            cond,
            step,
            body,
        })
    }

    pub fn while_stmt(&mut self, cond: ExprId, body: StmtId) -> StmtId {
        self.stmt(StmtKind::While { cond, body })
    }

    pub fn return_stmt(&mut self, value: Option<ExprId>) -> StmtId {
        self.stmt(StmtKind::Return(value))
    }

    // Items

    pub fn param(&self, name: &str, ty: &str) -> Param {
        Param {
            name: name.to_owned(),
            ty: self.ty(ty),
            span: self.span,
        }
    }

    pub fn function(&mut self, name: &str, params: Vec<Param>, return_type: &str, body: StmtId) {
        let function = Function {
            name: name.to_owned(),
            params,
            return_type: self.ty(return_type),
            body,
            span: self.span,
        };
        self.unit.items.push(Item::Function(function));
    }

    pub fn global(&mut self, name: &str, ty: &str, init: Option<ExprId>) {
        let decl = self.var_decl(name, ty, init);
        self.unit.items.push(Item::Global(decl));
    }

    /// Define a struct from `(field, type)` pairs.
    pub fn structure(&mut self, name: &str, fields: &[(&str, &str)]) {
        let fields = fields
            .iter()
            .map(|(field, ty)| StructField {
                name: (*field).to_owned(),
                ty: self.ty(ty),
                span: self.span,
            })
            .collect();
        self.unit.items.push(Item::Struct(StructDef {
            name: name.to_owned(),
            fields,
            span: self.span,
        }));
    }

    pub fn typedef(&mut self, name: &str, target: &str) {
        let typedef = TypedefDef {
            name: name.to_owned(),
            target: self.ty(target),
            span: self.span,
        };
        self.unit.items.push(Item::Typedef(typedef));
    }

    pub fn finish(self) -> ShaderUnit {
        self.unit
    }
}

#[cfg(test)]
mod tests;
