//! Flat shader AST.
//!
//! # Module Structure
//!
//! - `expr`: expression nodes (`Expr`, `ExprKind`, `Literal`)
//! - `operators`: unary, binary and assignment operators
//! - `stmt`: statement nodes and variable declarations
//! - `items`: top-level functions, globals, structs and typedefs
//!
//! Types written in source are kept as [`ParsedType`] names. Resolving them
//! to concrete type descriptors is the semantic analyzer's job.

mod expr;
mod items;
mod operators;
mod stmt;

pub use expr::{Expr, ExprKind, Literal};
pub use items::{Function, Item, Param, ShaderUnit, StructDef, StructField, TypedefDef};
pub use operators::{AssignOp, BinaryOp, UnaryOp};
pub use stmt::{Stmt, StmtKind, VarDecl};

use crate::Span;

/// A type as written in source: `float3`, `float4x4`, `LightData`, ...
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParsedType {
    pub name: String,
    pub span: Span,
}

impl ParsedType {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        ParsedType {
            name: name.into(),
            span,
        }
    }
}
