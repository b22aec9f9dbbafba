//! Expression typing.
//!
//! Called once per expression, after its children. Children that failed
//! have no entry in the type table; an expression that needs one returns
//! `None` without reporting anything further.

use lumen_diagnostic::ErrorCode;
use lumen_ir::{AssignOp, BinaryOp, ExprId, ExprKind, Literal, ShaderArena, Span, UnaryOp};
use lumen_types::{ScalarKind, Type, MAX_DIMENSION};

use super::intrinsics::{self, Intrinsic};
use super::SemanticAnalyzer;

impl SemanticAnalyzer<'_> {
    pub(super) fn type_expr(&mut self, id: ExprId, arena: &ShaderArena) -> Option<Type> {
        let expr = arena.expr(id);
        let span = expr.span;
        match &expr.kind {
            ExprKind::Literal(literal) => Some(literal_type(*literal)),
            ExprKind::Ident(name) => self.identifier(name, span),
            ExprKind::Unary { op, operand } => {
                let ty = self.operand(*operand)?;
                self.unary(*op, &ty, span)
            }
            ExprKind::Binary { op, left, right } => {
                let left = self.operand(*left)?;
                let right = self.operand(*right)?;
                self.binary(*op, &left, &right, span)
            }
            ExprKind::Conditional {
                cond,
                then_branch,
                else_branch,
            } => self.conditional(*cond, *then_branch, *else_branch, span, arena),
            ExprKind::Call { callee, args } => self.call(callee, args, span, arena),
            ExprKind::Member { target, member } => {
                let ty = self.operand(*target)?;
                self.member(&ty, member, span)
            }
            ExprKind::Index { target, index } => {
                let target_ty = self.operand(*target)?;
                let index_ty = self.operand(*index)?;
                self.index(&target_ty, &index_ty, *index, span, arena)
            }
            ExprKind::Cast { ty, operand } => {
                let target = self.items.resolve_or_report(ty, self.sink)?;
                if let Some(value) = self.operand(*operand) {
                    self.cast(&value, &target, span);
                }
                Some(target)
            }
            ExprKind::Assign { op, target, value } => {
                self.assign(*op, *target, *value, span, arena)
            }
            ExprKind::Paren(inner) => self.operand(*inner),
            ExprKind::Error => None,
        }
    }

    /// Branches unify in non-operator context. The condition is a scalar,
    /// or a vector selecting per component from branches of the same arity.
    fn conditional(
        &mut self,
        cond: ExprId,
        then_branch: ExprId,
        else_branch: ExprId,
        span: Span,
        arena: &ShaderArena,
    ) -> Option<Type> {
        let branches = match (self.operand(then_branch), self.operand(else_branch)) {
            (Some(then_ty), Some(else_ty)) => {
                self.binary_implicit_conversion(span, &then_ty, &else_ty, false)
            }
            _ => None,
        };
        let cond_ty = self.operand(cond)?;
        if cond_ty.is_vector() {
            let ty = branches.clone()?;
            if ty.is_vector() && ty.component_count() == cond_ty.component_count() {
                return Some(ty);
            }
        }
        let cond_span = arena.expr(cond).span;
        self.binary_implicit_scalar_conversion(cond_span, &cond_ty, &Type::BOOL)?;
        branches
    }

    fn operand(&self, id: ExprId) -> Option<Type> {
        self.types.get(&id).cloned()
    }

    fn identifier(&mut self, name: &str, span: Span) -> Option<Type> {
        match self.scope.lookup(name) {
            Some(binding) => binding.clone(),
            None => {
                self.error(
                    ErrorCode::E2003,
                    span,
                    format_args!("unknown identifier `{name}`"),
                );
                None
            }
        }
    }

    fn unary(&mut self, op: UnaryOp, ty: &Type, span: Span) -> Option<Type> {
        let symbol = op.as_symbol();
        let Some(element) = ty.element() else {
            self.error(
                ErrorCode::E2009,
                span,
                format_args!("cannot apply unary `{symbol}` to `{ty}`"),
            );
            return None;
        };

        match op {
            UnaryOp::Not => Some(ty.with_element(ScalarKind::Bool)),
            UnaryOp::BitNot if !element.is_integral() => {
                self.error(
                    ErrorCode::E2009,
                    span,
                    format_args!("`~` needs integer operands, found `{ty}`"),
                );
                None
            }
            UnaryOp::Increment | UnaryOp::Decrement if element == ScalarKind::Bool => {
                self.error(
                    ErrorCode::E2009,
                    span,
                    format_args!("cannot apply unary `{symbol}` to `{ty}`"),
                );
                None
            }
            UnaryOp::Neg | UnaryOp::BitNot | UnaryOp::Increment | UnaryOp::Decrement => {
                Some(ty.clone())
            }
        }
    }

    /// Result type of `left op right`. Also used by compound assignment.
    fn binary(&mut self, op: BinaryOp, left: &Type, right: &Type, span: Span) -> Option<Type> {
        match op {
            BinaryOp::Mul => self.multiply_implicit_conversion(span, left, right),
            BinaryOp::Div => self.divide_implicit_conversion(span, left, right),
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mod => {
                self.binary_implicit_conversion(span, left, right, true)
            }
            BinaryOp::Eq
            | BinaryOp::NotEq
            | BinaryOp::Lt
            | BinaryOp::LtEq
            | BinaryOp::Gt
            | BinaryOp::GtEq => self
                .binary_implicit_conversion(span, left, right, true)
                .map(|ty| ty.with_element(ScalarKind::Bool)),
            BinaryOp::And | BinaryOp::Or => {
                if left.is_matrix() || right.is_matrix() {
                    self.invalid_operands(op, left, right, span, "scalar or vector operands");
                    return None;
                }
                self.binary_implicit_conversion(span, left, right, true)
                    .map(|ty| ty.with_element(ScalarKind::Bool))
            }
            BinaryOp::BitAnd
            | BinaryOp::BitOr
            | BinaryOp::BitXor
            | BinaryOp::Shl
            | BinaryOp::Shr => {
                let combined = self.binary_implicit_conversion(span, left, right, true)?;
                let integral = combined
                    .element()
                    .is_some_and(|k| k.is_integral() || k == ScalarKind::Bool);
                if !integral {
                    self.invalid_operands(op, left, right, span, "integer operands");
                    return None;
                }
                Some(combined)
            }
        }
    }

    fn invalid_operands(
        &mut self,
        op: BinaryOp,
        left: &Type,
        right: &Type,
        span: Span,
        needs: &str,
    ) {
        let symbol = op.as_symbol();
        self.error(
            ErrorCode::E2009,
            span,
            format_args!("`{symbol}` needs {needs}, found `{left}` and `{right}`"),
        );
    }

    fn member(&mut self, ty: &Type, member: &str, span: Span) -> Option<Type> {
        match ty.resolve() {
            Type::Struct(name) => {
                let field = self.items.structure(name).and_then(|s| s.field(member));
                match field {
                    Some(field) => field.clone(),
                    None => {
                        self.error(
                            ErrorCode::E2006,
                            span,
                            format_args!("no field `{member}` on type `{ty}`"),
                        );
                        None
                    }
                }
            }
            Type::Scalar(element) => self.swizzle(*element, 1, member, ty, span),
            Type::Vector(element, n) => self.swizzle(*element, *n, member, ty, span),
            _ => {
                self.error(
                    ErrorCode::E2006,
                    span,
                    format_args!("type `{ty}` has no member `{member}`"),
                );
                None
            }
        }
    }

    fn swizzle(
        &mut self,
        element: ScalarKind,
        arity: u8,
        member: &str,
        ty: &Type,
        span: Span,
    ) -> Option<Type> {
        let result = swizzle_type(element, arity, member);
        if result.is_none() {
            self.error(
                ErrorCode::E2006,
                span,
                format_args!("invalid swizzle `{member}` on `{ty}`"),
            );
        }
        result
    }

    fn index(
        &mut self,
        target: &Type,
        index: &Type,
        index_id: ExprId,
        span: Span,
        arena: &ShaderArena,
    ) -> Option<Type> {
        let is_integer = index.is_scalar() && index.element().is_some_and(ScalarKind::is_integral);
        if !is_integer {
            self.error(
                ErrorCode::E2007,
                arena.expr(index_id).span,
                format_args!("index must be an integer scalar, found `{index}`"),
            );
            return None;
        }

        let (result, len) = match target.resolve() {
            Type::Vector(element, n) => (Type::Scalar(*element), *n),
            Type::Matrix(element, rows, cols) => (Type::Vector(*element, *cols), *rows),
            _ => {
                self.error(
                    ErrorCode::E2007,
                    span,
                    format_args!("type `{target}` cannot be indexed"),
                );
                return None;
            }
        };

        if let Some(constant) = constant_index(index_id, arena) {
            if constant < 0 || constant >= i128::from(len) {
                self.error(
                    ErrorCode::E2007,
                    arena.expr(index_id).span,
                    format_args!("index {constant} is out of range for `{target}`"),
                );
                return None;
            }
        }
        Some(result)
    }

    fn cast(&mut self, value: &Type, target: &Type, span: Span) {
        let allowed = match (value.resolve(), target.resolve()) {
            (v, t) if v.is_numeric() && t.is_numeric() => true,
            (Type::Struct(a), Type::Struct(b)) => a == b,
            (v, t) => v == t,
        };
        if !allowed {
            self.error(
                ErrorCode::E2008,
                span,
                format_args!("cannot cast `{value}` to `{target}`"),
            );
        }
    }

    fn assign(
        &mut self,
        op: AssignOp,
        target: ExprId,
        value: ExprId,
        span: Span,
        arena: &ShaderArena,
    ) -> Option<Type> {
        let target_ty = self.operand(target)?;
        let value_ty = self.operand(value)?;

        if !is_assignable(target, arena) {
            self.error(
                ErrorCode::E2009,
                arena.expr(target).span,
                format_args!("left side of assignment is not assignable"),
            );
            return None;
        }

        let stored = match op.binary_op() {
            None => value_ty,
            Some(op) => self.binary(op, &target_ty, &value_ty, span)?,
        };
        self.check_store(arena.expr(value).span, &stored, &target_ty);
        Some(target_ty)
    }

    // Calls

    fn call(
        &mut self,
        callee: &str,
        args: &[ExprId],
        span: Span,
        arena: &ShaderArena,
    ) -> Option<Type> {
        let arg_types: Option<Vec<Type>> = args.iter().map(|a| self.operand(*a)).collect();

        if let Some(target) = self.items.resolve_type_name(callee) {
            if let Some(arg_types) = arg_types {
                self.constructor(&target, &arg_types, args, span, arena);
            }
            return target.is_numeric().then_some(target);
        }

        if let Some(sig) = self.items.function(callee).cloned() {
            if let Some(arg_types) = arg_types {
                if sig.params.len() != arg_types.len() {
                    self.error(
                        ErrorCode::E2010,
                        span,
                        format_args!(
                            "`{callee}` takes {} argument(s) but {} were supplied",
                            sig.params.len(),
                            arg_types.len()
                        ),
                    );
                } else {
                    for ((arg, ty), (_, param)) in args.iter().zip(&arg_types).zip(&sig.params) {
                        if let Some(param) = param {
                            self.check_store(arena.expr(*arg).span, ty, param);
                        }
                    }
                }
            }
            return sig.return_type;
        }

        if let Some((intrinsic, arity)) = intrinsics::lookup(callee) {
            let arg_types = arg_types?;
            if arg_types.len() != arity {
                self.error(
                    ErrorCode::E2010,
                    span,
                    format_args!(
                        "`{callee}` takes {arity} argument(s) but {} were supplied",
                        arg_types.len()
                    ),
                );
                return None;
            }
            return self.intrinsic(intrinsic, callee, &arg_types, span);
        }

        self.error(
            ErrorCode::E2004,
            span,
            format_args!("unknown function `{callee}`"),
        );
        None
    }

    fn constructor(
        &mut self,
        target: &Type,
        arg_types: &[Type],
        args: &[ExprId],
        span: Span,
        arena: &ShaderArena,
    ) {
        if !target.is_numeric() {
            self.error(
                ErrorCode::E2009,
                span,
                format_args!("`{target}` cannot be constructed"),
            );
            return;
        }

        for (arg, ty) in args.iter().zip(arg_types) {
            if !ty.is_numeric() {
                self.error(
                    ErrorCode::E2008,
                    arena.expr(*arg).span,
                    format_args!("cannot use `{ty}` in a `{target}` constructor"),
                );
                return;
            }
        }

        let splat = arg_types.len() == 1 && arg_types[0].is_scalar();
        let supplied: u32 = arg_types.iter().map(|t| u32::from(t.component_count())).sum();
        let expected = u32::from(target.component_count());
        if !splat && supplied != expected {
            self.error(
                ErrorCode::E2010,
                span,
                format_args!(
                    "`{target}` constructor expects {expected} components, found {supplied}"
                ),
            );
        }
    }

    fn intrinsic(
        &mut self,
        intrinsic: Intrinsic,
        name: &str,
        args: &[Type],
        span: Span,
    ) -> Option<Type> {
        for ty in args {
            let acceptable = ty.is_numeric()
                || (intrinsic == Intrinsic::Sample && *ty.resolve() == Type::Sampler);
            if !acceptable {
                self.error(
                    ErrorCode::E2008,
                    span,
                    format_args!("`{name}` cannot take an argument of type `{ty}`"),
                );
                return None;
            }
        }

        match (intrinsic, args) {
            (Intrinsic::Componentwise, [x]) => Some(x.resolve().clone()),
            (Intrinsic::Length, [x]) => x.element().map(Type::Scalar),
            (Intrinsic::Dot, [a, b]) => self
                .binary_implicit_conversion(span, a, b, true)
                .and_then(|ty| ty.element())
                .map(Type::Scalar),
            (Intrinsic::Pairwise, [a, b]) => self.binary_implicit_conversion(span, a, b, true),
            (Intrinsic::Interpolate, [a, b, c]) => {
                let ab = self.binary_implicit_conversion(span, a, b, true)?;
                self.binary_implicit_conversion(span, &ab, c, true)
            }
            (Intrinsic::Multiply, [a, b]) => self.multiply_implicit_conversion(span, a, b),
            (Intrinsic::Cross, [a, b]) => {
                let ty = self.binary_implicit_conversion(span, a, b, true)?;
                if !matches!(ty, Type::Vector(_, 3)) {
                    self.error(
                        ErrorCode::E2008,
                        span,
                        format_args!("`cross` needs 3-component vectors, found `{ty}`"),
                    );
                    return None;
                }
                Some(ty)
            }
            (Intrinsic::Sample, [sampler, coords]) => {
                if *sampler.resolve() != Type::Sampler || !coords.is_vector() {
                    self.error(
                        ErrorCode::E2008,
                        span,
                        format_args!(
                            "`{name}` expects a sampler and coordinates, \
                             found `{sampler}` and `{coords}`"
                        ),
                    );
                    return None;
                }
                Some(Type::Vector(ScalarKind::Float, MAX_DIMENSION))
            }
            // Arity was checked against the table.
            _ => None,
        }
    }
}

fn literal_type(literal: Literal) -> Type {
    match literal {
        Literal::Bool(_) => Type::BOOL,
        Literal::Int(_) => Type::INT,
        Literal::UInt(_) => Type::UINT,
        Literal::Half(_) => Type::HALF,
        Literal::Float(_) => Type::FLOAT,
        Literal::Double(_) => Type::DOUBLE,
    }
}

/// Type of a swizzle like `.xyz` or `.rg` on a value with `arity`
/// components. Component sets may not be mixed.
pub(crate) fn swizzle_type(element: ScalarKind, arity: u8, member: &str) -> Option<Type> {
    const SETS: [&str; 2] = ["xyzw", "rgba"];

    let len = u8::try_from(member.len()).ok()?;
    if !(1..=MAX_DIMENSION).contains(&len) {
        return None;
    }
    let set = SETS
        .iter()
        .find(|set| member.chars().all(|c| set.contains(c)))?;
    let in_range = member
        .chars()
        .filter_map(|c| set.find(c))
        .all(|component| component < usize::from(arity));
    if !in_range {
        return None;
    }

    Some(if len == 1 {
        Type::Scalar(element)
    } else {
        Type::Vector(element, len)
    })
}

fn constant_index(id: ExprId, arena: &ShaderArena) -> Option<i128> {
    match arena.expr(id).kind {
        ExprKind::Literal(Literal::Int(n)) => Some(i128::from(n)),
        ExprKind::Literal(Literal::UInt(n)) => Some(i128::from(n)),
        ExprKind::Paren(inner) => constant_index(inner, arena),
        _ => None,
    }
}

fn is_assignable(id: ExprId, arena: &ShaderArena) -> bool {
    match &arena.expr(id).kind {
        ExprKind::Ident(_) | ExprKind::Member { .. } | ExprKind::Index { .. } => true,
        ExprKind::Paren(inner) => is_assignable(*inner, arena),
        _ => false,
    }
}
