//! The semantic analyzer pass.
//!
//! `SemanticAnalyzer` is a [`Rewriter`]: one post-order traversal types every
//! expression, checks every statement against its scope, and strips redundant
//! parentheses. Failures are reported to the sink and never stop the pass.
//! A failed expression has no entry in the type table, and any expression
//! built on it is skipped silently, so each defect is reported once.

mod expr;
mod intrinsics;

use std::fmt;

use lumen_diagnostic::{Diagnostic, DiagnosticSink, ErrorCode, ErrorGuaranteed};
use lumen_ir::visitor::rewrite_unit;
use lumen_ir::{
    Expr, ExprId, ExprKind, Item, RewriteMode, Rewriter, ShaderArena, ShaderUnit, Span, Stmt,
    StmtId, StmtKind, VarDecl,
};
use lumen_types::{convert, Conversion, ScalarKind, Type};
use rustc_hash::FxHashMap;

use crate::collect::ItemTable;
use crate::scope::{Binding, Scope};
use crate::AnalysisConfig;

/// Resolved types of every successfully typed expression.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnalysisResult {
    types: FxHashMap<ExprId, Type>,
    rewrites: usize,
}

impl AnalysisResult {
    pub fn type_of(&self, id: ExprId) -> Option<&Type> {
        self.types.get(&id)
    }

    /// Number of typed expressions.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Replacements applied to the tree.
    pub fn rewrites(&self) -> usize {
        self.rewrites
    }

    pub fn iter(&self) -> impl Iterator<Item = (ExprId, &Type)> {
        self.types.iter().map(|(id, ty)| (*id, ty))
    }
}

/// The function whose body is being checked.
struct FunctionFrame {
    name: String,
    return_type: Binding,
    /// Scope depth of the body block, whose locals share a namespace with
    /// the parameters.
    body_depth: usize,
}

/// Type checker over one [`ShaderUnit`].
///
/// The unit and the sink are fixed at construction. [`run`](Self::run)
/// analyzes the whole unit; the resolved types are available afterwards via
/// [`type_of`](Self::type_of) or [`into_result`](Self::into_result).
pub struct SemanticAnalyzer<'a> {
    unit: &'a mut ShaderUnit,
    sink: &'a mut DiagnosticSink,
    config: AnalysisConfig,
    items: ItemTable,
    scope: Scope,
    function: Option<FunctionFrame>,
    types: FxHashMap<ExprId, Type>,
    rewrites: usize,
}

impl<'a> SemanticAnalyzer<'a> {
    pub fn new(unit: &'a mut ShaderUnit, sink: &'a mut DiagnosticSink) -> Self {
        Self::with_config(unit, sink, AnalysisConfig::default())
    }

    pub fn with_config(
        unit: &'a mut ShaderUnit,
        sink: &'a mut DiagnosticSink,
        config: AnalysisConfig,
    ) -> Self {
        SemanticAnalyzer {
            unit,
            sink,
            config,
            items: ItemTable::default(),
            scope: Scope::new(),
            function: None,
            types: FxHashMap::default(),
            rewrites: 0,
        }
    }

    /// Analyze the attached unit.
    ///
    /// Items are collected first, then every global and function body is
    /// checked in declaration order. Running again starts from scratch.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(file = ?self.unit.file, items = self.unit.items.len())
    )]
    pub fn run(&mut self) {
        let mut unit = std::mem::take(&mut *self.unit);

        self.items = ItemTable::collect(&unit, self.sink);
        self.scope = Scope::new();
        self.function = None;
        self.types.clear();
        self.rewrites = 0;

        rewrite_unit(self, &mut unit);
        *self.unit = unit;

        tracing::debug!(
            errors = self.sink.error_count(),
            warnings = self.sink.warning_count(),
            typed = self.types.len(),
            rewrites = self.rewrites,
            "analysis finished"
        );
    }

    pub fn type_of(&self, id: ExprId) -> Option<&Type> {
        self.types.get(&id)
    }

    pub fn items(&self) -> &ItemTable {
        &self.items
    }

    pub fn into_result(self) -> AnalysisResult {
        AnalysisResult {
            types: self.types,
            rewrites: self.rewrites,
        }
    }

    // Reporting

    pub fn error(
        &mut self,
        code: ErrorCode,
        span: Span,
        args: fmt::Arguments<'_>,
    ) -> ErrorGuaranteed {
        self.sink.error(code, span, args.to_string())
    }

    pub fn warning(&mut self, code: ErrorCode, span: Span, args: fmt::Arguments<'_>) {
        self.sink.warning(code, span, args.to_string());
    }

    /// Attach a free-form note at `span`.
    pub fn info(&mut self, span: Span, message: impl Into<String>) {
        self.sink.info(ErrorCode::I0001, span, message);
    }

    // Conversions

    /// Combined type of a general binary expression, or `None` after
    /// reporting `ErrorBinaryTypeDeduction`.
    pub fn binary_implicit_conversion(
        &mut self,
        span: Span,
        left: &Type,
        right: &Type,
        is_binary_operator: bool,
    ) -> Option<Type> {
        let result = convert::binary_implicit_conversion(left, right, is_binary_operator);
        if result.is_none() {
            let context = if is_binary_operator {
                "a binary expression"
            } else {
                "an expression"
            };
            self.deduction_failed(span, context, left, right);
        }
        result
    }

    /// Combined type of `left * right`, or `None` after reporting
    /// `ErrorBinaryTypeDeduction`.
    pub fn multiply_implicit_conversion(
        &mut self,
        span: Span,
        left: &Type,
        right: &Type,
    ) -> Option<Type> {
        let result = convert::multiply_implicit_conversion(left, right);
        if result.is_none() {
            self.deduction_failed(span, "a multiplication", left, right);
        }
        result
    }

    /// Combined type of `left / right`, or `None` after reporting
    /// `ErrorBinaryTypeDeduction`.
    pub fn divide_implicit_conversion(
        &mut self,
        span: Span,
        left: &Type,
        right: &Type,
    ) -> Option<Type> {
        let result = convert::divide_implicit_conversion(left, right);
        if result.is_none() {
            self.deduction_failed(span, "a division", left, right);
        }
        result
    }

    /// Promoted kind of two scalars, or `None` after reporting
    /// `ErrorScalarTypeConversion`.
    pub fn binary_implicit_scalar_conversion(
        &mut self,
        span: Span,
        left: &Type,
        right: &Type,
    ) -> Option<ScalarKind> {
        let result = convert::binary_implicit_scalar_conversion(left, right);
        if result.is_none() {
            self.error(
                ErrorCode::E2002,
                span,
                format_args!("no implicit scalar conversion between `{left}` and `{right}`"),
            );
        }
        result
    }

    fn deduction_failed(&mut self, span: Span, context: &str, left: &Type, right: &Type) {
        let mut diagnostic = Diagnostic::error(ErrorCode::E2001)
            .with_message(format!(
                "cannot deduce the type of {context} between `{left}` and `{right}`"
            ))
            .with_span(span);
        if left.is_matrix() != right.is_matrix() && left.is_numeric() && right.is_numeric() {
            diagnostic = diagnostic.with_suggestion("use `mul(a, b)` for matrix products");
        }
        self.sink.emit_error(diagnostic);
    }

    /// Check that `value` can be stored into `target`, warning on truncation.
    fn check_store(&mut self, span: Span, value: &Type, target: &Type) {
        match convert::assignment_conversion(value, target) {
            None => {
                self.error(
                    ErrorCode::E2008,
                    span,
                    format_args!("cannot convert `{value}` to `{target}`"),
                );
            }
            Some(Conversion::Narrow) if self.config.warn_on_truncation => {
                self.warning(
                    ErrorCode::W2001,
                    span,
                    format_args!("implicit truncation from `{value}` to `{target}`"),
                );
            }
            Some(_) => {}
        }
    }

    /// Conditions of `if`, `while` and `for` must be scalars.
    fn check_condition(&mut self, cond: ExprId, arena: &ShaderArena) {
        if let Some(ty) = self.types.get(&cond).cloned() {
            self.binary_implicit_scalar_conversion(arena.expr(cond).span, &ty, &Type::BOOL);
        }
    }

    // Declarations

    fn declare(&mut self, name: &str, ty: Binding, span: Span) {
        let redeclares_param = self
            .function
            .as_ref()
            .is_some_and(|frame| frame.body_depth == self.scope.depth())
            && self
                .scope
                .parent()
                .is_some_and(|params| params.is_bound_locally(name));
        if redeclares_param || !self.scope.bind(name, ty) {
            self.error(
                ErrorCode::E2011,
                span,
                format_args!("`{name}` is already declared in this scope"),
            );
        }
    }

    fn check_var_decl(&mut self, decl: &VarDecl, arena: &ShaderArena) {
        let mut declared = self.items.resolve_or_report(&decl.ty, self.sink);
        if declared.as_ref().is_some_and(Type::is_void) {
            self.error(
                ErrorCode::E2008,
                decl.ty.span,
                format_args!("variable `{}` cannot have type `void`", decl.name),
            );
            declared = None;
        }

        if let (Some(target), Some(init)) = (&declared, decl.init) {
            if let Some(value) = self.types.get(&init).cloned() {
                self.check_store(arena.expr(init).span, &value, target);
            }
        }

        self.declare(&decl.name, declared, decl.span);
    }

    fn check_return(&mut self, value: Option<ExprId>, span: Span, arena: &ShaderArena) {
        let Some(frame) = &self.function else {
            return;
        };
        let Some(expected) = frame.return_type.clone() else {
            return;
        };
        let name = frame.name.clone();

        match value {
            Some(value) if expected.is_void() => {
                self.error(
                    ErrorCode::E2008,
                    arena.expr(value).span,
                    format_args!("`{name}` returns `void` but a value is returned"),
                );
            }
            Some(value) => {
                if let Some(ty) = self.types.get(&value).cloned() {
                    self.check_store(arena.expr(value).span, &ty, &expected);
                }
            }
            None if !expected.is_void() => {
                self.error(
                    ErrorCode::E2008,
                    span,
                    format_args!("`{name}` must return a value of type `{expected}`"),
                );
            }
            None => {}
        }
    }

    // Scopes

    fn enter_scope(&mut self) {
        self.scope = self.scope.child();
    }

    fn leave_scope(&mut self) {
        if let Some(parent) = self.scope.parent() {
            self.scope = parent;
        }
    }
}

impl Rewriter for SemanticAnalyzer<'_> {
    fn rewrite_mode(&self) -> RewriteMode {
        self.config.rewrite
    }

    fn enter_item(&mut self, item: &Item, _arena: &ShaderArena) {
        let Item::Function(function) = item else {
            return;
        };
        tracing::trace!(function = %function.name, "checking function");

        // A duplicate definition was reported during collection; its own
        // types still resolve so the body can be checked.
        let signature = self
            .items
            .function(&function.name)
            .filter(|sig| sig.span == function.span)
            .cloned();
        let (params, return_type) = match signature {
            Some(sig) => (sig.params, sig.return_type),
            None => (
                function
                    .params
                    .iter()
                    .map(|p| (p.name.clone(), self.items.resolve_type_name(&p.ty.name)))
                    .collect(),
                self.items.resolve_type_name(&function.return_type.name),
            ),
        };

        self.enter_scope();
        for ((name, ty), param) in params.into_iter().zip(&function.params) {
            self.declare(&name, ty, param.span);
        }
        self.function = Some(FunctionFrame {
            name: function.name.clone(),
            return_type,
            body_depth: self.scope.depth() + 1,
        });
    }

    fn leave_item(&mut self, item: &Item, arena: &ShaderArena) {
        match item {
            Item::Function(_) => {
                self.function = None;
                self.leave_scope();
            }
            Item::Global(decl) => self.check_var_decl(decl, arena),
            Item::Struct(_) | Item::Typedef(_) => {}
        }
    }

    fn enter_stmt(&mut self, id: StmtId, arena: &ShaderArena) {
        if arena.stmt(id).kind.opens_scope() {
            self.enter_scope();
        }
    }

    fn rewrite_stmt(&mut self, id: StmtId, arena: &ShaderArena) -> Option<Stmt> {
        let stmt = arena.stmt(id);
        match &stmt.kind {
            StmtKind::Decl(decl) => self.check_var_decl(decl, arena),
            StmtKind::Block(_) => self.leave_scope(),
            StmtKind::For { cond, .. } => {
                if let Some(cond) = cond {
                    self.check_condition(*cond, arena);
                }
                self.leave_scope();
            }
            StmtKind::If { cond, .. } | StmtKind::While { cond, .. } => {
                self.check_condition(*cond, arena);
            }
            StmtKind::Return(value) => self.check_return(*value, stmt.span, arena),
            StmtKind::Expr(_)
            | StmtKind::Discard
            | StmtKind::Break
            | StmtKind::Continue
            | StmtKind::Empty => {}
        }
        None
    }

    fn rewrite_expr(&mut self, id: ExprId, arena: &ShaderArena) -> Option<Expr> {
        if let Some(ty) = self.type_expr(id, arena) {
            self.types.insert(id, ty);
        }

        // `(e)` carries nothing once the tree is built.
        let ExprKind::Paren(inner) = arena.expr(id).kind else {
            return None;
        };
        if self.config.rewrite.contains(RewriteMode::EXPRESSIONS) {
            self.rewrites += 1;
        }
        Some(arena.expr(inner).clone())
    }
}
