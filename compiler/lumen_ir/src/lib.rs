//! Lumen IR - shader syntax tree types
//!
//! This crate contains the data structures every later phase shares:
//! - Spans with file identity and line/column positions
//! - A flat, arena-allocated shader AST (`ExprId`/`StmtId` indices)
//! - A builder used by front ends that have already parsed source text
//! - The `Visitor` (read-only) and `Rewriter` (single-pass, in place) traversals
//!
//! Lexing and parsing are not part of this crate. Producers hand over a
//! finished [`ShaderUnit`].
//!
//! # Design Philosophy
//!
//! - **Flatten Everything**: no `Box<Expr>`, children are `ExprId`/`StmtId`
//! - **Closed node sets**: `ExprKind`/`StmtKind` are matched exhaustively,
//!   so adding a node kind is a compile error in every traversal
//! - Float literals are stored as bits so every node is `Eq + Hash`

mod arena;
pub mod ast;
mod builder;
mod span;
pub mod visitor;

pub use arena::{ExprId, ShaderArena, StmtId};
pub use ast::{
    AssignOp, BinaryOp, Expr, ExprKind, Function, Item, Literal, Param, ParsedType, ShaderUnit,
    Stmt, StmtKind, StructDef, StructField, TypedefDef, UnaryOp, VarDecl,
};
pub use builder::UnitBuilder;
pub use span::{FileId, LineCol, SourceMap, Span, Spanned};
pub use visitor::{RewriteMode, Rewriter, Visitor};
