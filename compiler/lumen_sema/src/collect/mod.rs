//! Item collection.
//!
//! Before any body is checked, one read-only pass over the unit records
//! every struct, typedef and function signature. Bodies can then call
//! functions and name types regardless of declaration order among
//! functions. Type names inside items resolve in declaration order, so a
//! struct field or typedef may only name types declared above it.

use lumen_diagnostic::{DiagnosticSink, ErrorCode};
use lumen_ir::visitor::Visitor;
use lumen_ir::{
    Function, ParsedType, ShaderArena, ShaderUnit, Span, StructDef, TypedefDef, VarDecl,
};
use lumen_types::Type;
use rustc_hash::FxHashMap;

/// A struct and its fields in declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructInfo {
    pub name: String,
    /// `None` for fields whose type failed to resolve.
    pub fields: Vec<(String, Option<Type>)>,
    pub span: Span,
}

impl StructInfo {
    /// Field lookup. The outer `Option` is whether the field exists.
    pub fn field(&self, name: &str) -> Option<&Option<Type>> {
        self.fields
            .iter()
            .find_map(|(field, ty)| (field == name).then_some(ty))
    }
}

/// A user function's resolved signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionSig {
    pub name: String,
    pub params: Vec<(String, Option<Type>)>,
    pub return_type: Option<Type>,
    pub span: Span,
}

/// Everything declared at the top level of a unit, except globals.
///
/// Globals are bound in declaration order while bodies are checked.
#[derive(Clone, Debug, Default)]
pub struct ItemTable {
    structs: FxHashMap<String, StructInfo>,
    typedefs: FxHashMap<String, Type>,
    functions: FxHashMap<String, FunctionSig>,
}

impl ItemTable {
    /// Collect the items of `unit`, reporting duplicates and unknown types.
    pub fn collect(unit: &ShaderUnit, sink: &mut DiagnosticSink) -> Self {
        let mut collector = Collector {
            table: ItemTable::default(),
            sink,
        };
        collector.visit_unit(unit);
        tracing::debug!(
            structs = collector.table.structs.len(),
            typedefs = collector.table.typedefs.len(),
            functions = collector.table.functions.len(),
            "collected items"
        );
        collector.table
    }

    pub fn structure(&self, name: &str) -> Option<&StructInfo> {
        self.structs.get(name)
    }

    pub fn function(&self, name: &str) -> Option<&FunctionSig> {
        self.functions.get(name)
    }

    /// Resolve a type name: builtins first, then structs, then typedefs.
    ///
    /// A typedef resolves to [`Type::Alias`] wrapping its target.
    pub fn resolve_type_name(&self, name: &str) -> Option<Type> {
        if let Some(ty) = Type::from_builtin_name(name) {
            return Some(ty);
        }
        if self.structs.contains_key(name) {
            return Some(Type::Struct(name.to_owned()));
        }
        self.typedefs
            .get(name)
            .map(|target| Type::alias(name, target.clone()))
    }

    /// Resolve a written type, reporting `ErrorUnknownType` on failure.
    pub fn resolve_or_report(&self, ty: &ParsedType, sink: &mut DiagnosticSink) -> Option<Type> {
        let resolved = self.resolve_type_name(&ty.name);
        if resolved.is_none() {
            sink.error(
                ErrorCode::E2005,
                ty.span,
                format!("unknown type `{}`", ty.name),
            );
        }
        resolved
    }

    fn is_type_name_taken(&self, name: &str) -> bool {
        Type::from_builtin_name(name).is_some()
            || self.structs.contains_key(name)
            || self.typedefs.contains_key(name)
    }
}

struct Collector<'s> {
    table: ItemTable,
    sink: &'s mut DiagnosticSink,
}

impl Collector<'_> {
    fn duplicate(&mut self, kind: &str, name: &str, span: Span) {
        self.sink.error(
            ErrorCode::E2011,
            span,
            format!("{kind} `{name}` is defined more than once"),
        );
    }
}

impl<'ast> Visitor<'ast> for Collector<'_> {
    fn visit_function(&mut self, function: &'ast Function, _arena: &'ast ShaderArena) {
        if self.table.functions.contains_key(&function.name) {
            self.duplicate("function", &function.name, function.span);
            return;
        }

        let params = function
            .params
            .iter()
            .map(|p| (p.name.clone(), self.table.resolve_or_report(&p.ty, self.sink)))
            .collect();
        let return_type = self
            .table
            .resolve_or_report(&function.return_type, self.sink);

        self.table.functions.insert(
            function.name.clone(),
            FunctionSig {
                name: function.name.clone(),
                params,
                return_type,
                span: function.span,
            },
        );
    }

    // Globals are bound while checking, in declaration order.
    fn visit_global(&mut self, _decl: &'ast VarDecl, _arena: &'ast ShaderArena) {}

    fn visit_struct(&mut self, def: &'ast StructDef) {
        if self.table.is_type_name_taken(&def.name) {
            self.duplicate("type", &def.name, def.span);
            return;
        }

        let mut fields: Vec<(String, Option<Type>)> = Vec::with_capacity(def.fields.len());
        for field in &def.fields {
            if fields.iter().any(|(name, _)| *name == field.name) {
                self.duplicate("field", &field.name, field.span);
                continue;
            }
            let ty = self.table.resolve_or_report(&field.ty, self.sink);
            fields.push((field.name.clone(), ty));
        }

        self.table.structs.insert(
            def.name.clone(),
            StructInfo {
                name: def.name.clone(),
                fields,
                span: def.span,
            },
        );
    }

    fn visit_typedef(&mut self, def: &'ast TypedefDef) {
        if self.table.is_type_name_taken(&def.name) {
            self.duplicate("type", &def.name, def.span);
            return;
        }
        if let Some(target) = self.table.resolve_or_report(&def.target, self.sink) {
            self.table.typedefs.insert(def.name.clone(), target);
        }
    }
}

#[cfg(test)]
mod tests;
