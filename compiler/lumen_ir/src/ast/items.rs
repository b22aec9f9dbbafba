//! Top-level items and the unit that owns them.

use super::{ParsedType, VarDecl};
use crate::{FileId, ShaderArena, Span, StmtId};

/// A function parameter.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Param {
    pub name: String,
    pub ty: ParsedType,
    pub span: Span,
}

/// A function definition. `body` is a block statement.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Function {
    pub name: String,
    pub params: Vec<Param>,
    pub return_type: ParsedType,
    pub body: StmtId,
    pub span: Span,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct StructField {
    pub name: String,
    pub ty: ParsedType,
    pub span: Span,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct StructDef {
    pub name: String,
    pub fields: Vec<StructField>,
    pub span: Span,
}

/// `typedef float3 Color;`
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TypedefDef {
    pub name: String,
    pub target: ParsedType,
    pub span: Span,
}

/// Top-level items in declaration order.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Item {
    Function(Function),
    Global(VarDecl),
    Struct(StructDef),
    Typedef(TypedefDef),
}

impl Item {
    pub fn name(&self) -> &str {
        match self {
            Item::Function(f) => &f.name,
            Item::Global(g) => &g.name,
            Item::Struct(s) => &s.name,
            Item::Typedef(t) => &t.name,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Item::Function(f) => f.span,
            Item::Global(g) => g.span,
            Item::Struct(s) => s.span,
            Item::Typedef(t) => t.span,
        }
    }
}

/// One parsed shader file: its items and the arena holding their bodies.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct ShaderUnit {
    pub file: FileId,
    pub items: Vec<Item>,
    pub arena: ShaderArena,
}

impl ShaderUnit {
    pub fn new(file: FileId) -> Self {
        ShaderUnit {
            file,
            items: Vec::new(),
            arena: ShaderArena::new(),
        }
    }
}
