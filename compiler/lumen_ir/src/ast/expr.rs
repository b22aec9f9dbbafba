//! Expression nodes.

use std::fmt;

use super::operators::{AssignOp, BinaryOp, UnaryOp};
use super::ParsedType;
use crate::{ExprId, Span, Spanned};

/// Expression node.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

impl Spanned for Expr {
    fn span(&self) -> Span {
        self.span
    }
}

/// Literal values. Floats are stored as bits for `Eq + Hash`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    UInt(u64),
    /// `1.5h`
    Half(u64),
    /// `1.5` / `1.5f`
    Float(u64),
    /// `1.5l` / `1.5lf`
    Double(u64),
}

impl Literal {
    pub fn float(value: f64) -> Self {
        Literal::Float(value.to_bits())
    }

    pub fn double(value: f64) -> Self {
        Literal::Double(value.to_bits())
    }

    pub fn half(value: f64) -> Self {
        Literal::Half(value.to_bits())
    }
}

/// Expression kinds.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprKind {
    Literal(Literal),

    /// Variable or parameter reference.
    Ident(String),

    Unary {
        op: UnaryOp,
        operand: ExprId,
    },

    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },

    /// `cond ? then_branch : else_branch`
    Conditional {
        cond: ExprId,
        then_branch: ExprId,
        else_branch: ExprId,
    },

    /// Function call or type constructor (`float3(...)`).
    Call {
        callee: String,
        args: Vec<ExprId>,
    },

    /// Field access or swizzle: `light.color`, `v.xyz`.
    Member {
        target: ExprId,
        member: String,
    },

    Index {
        target: ExprId,
        index: ExprId,
    },

    /// `(float3)x`
    Cast {
        ty: ParsedType,
        operand: ExprId,
    },

    Assign {
        op: AssignOp,
        target: ExprId,
        value: ExprId,
    },

    /// `(inner)`
    Paren(ExprId),

    /// Placeholder left by a front end after a syntax error.
    Error,
}

impl ExprKind {
    /// Direct children in evaluation order.
    pub fn children(&self) -> Vec<ExprId> {
        match self {
            ExprKind::Literal(_) | ExprKind::Ident(_) | ExprKind::Error => Vec::new(),
            ExprKind::Unary { operand, .. } | ExprKind::Cast { operand, .. } => vec![*operand],
            ExprKind::Paren(inner) => vec![*inner],
            ExprKind::Member { target, .. } => vec![*target],
            ExprKind::Binary { left, right, .. } => vec![*left, *right],
            ExprKind::Index { target, index } => vec![*target, *index],
            ExprKind::Assign { target, value, .. } => vec![*target, *value],
            ExprKind::Conditional {
                cond,
                then_branch,
                else_branch,
            } => vec![*cond, *then_branch, *else_branch],
            ExprKind::Call { args, .. } => args.clone(),
        }
    }
}
