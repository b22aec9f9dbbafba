//! Statement nodes.

use std::fmt;

use super::ParsedType;
use crate::{ExprId, Span, Spanned, StmtId};

/// Statement node.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

impl fmt::Debug for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

impl Spanned for Stmt {
    fn span(&self) -> Span {
        self.span
    }
}

/// A variable declaration, local or global.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct VarDecl {
    pub name: String,
    pub ty: ParsedType,
    pub init: Option<ExprId>,
    pub span: Span,
}

/// Statement kinds.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum StmtKind {
    Expr(ExprId),
    Decl(VarDecl),
    /// `{ ... }` opens a new scope.
    Block(Vec<StmtId>),
    If {
        cond: ExprId,
        then_branch: StmtId,
        else_branch: Option<StmtId>,
    },
    /// The init statement is scoped to the loop.
    For {
        init: Option<StmtId>,
        cond: Option<ExprId>,
        step: Option<ExprId>,
        body: StmtId,
    },
    While {
        cond: ExprId,
        body: StmtId,
    },
    Return(Option<ExprId>),
    Discard,
    Break,
    Continue,
    Empty,
}

impl StmtKind {
    /// Whether this statement introduces a lexical scope.
    pub fn opens_scope(&self) -> bool {
        matches!(self, StmtKind::Block(_) | StmtKind::For { .. })
    }
}
