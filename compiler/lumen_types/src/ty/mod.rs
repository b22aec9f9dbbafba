//! Type descriptors.

use std::fmt;

use crate::ScalarKind;

/// Largest vector arity and matrix dimension.
pub const MAX_DIMENSION: u8 = 4;

/// A shader type.
///
/// Vector arity and matrix dimensions are in `1..=MAX_DIMENSION`. `Alias`
/// records a typedef; [`Type::resolve`] follows alias chains to the concrete
/// type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Type {
    Void,
    Scalar(ScalarKind),
    /// `element` x `n`, e.g. `float3`.
    Vector(ScalarKind, u8),
    /// `element` x `rows` x `cols`, e.g. `float4x3`.
    Matrix(ScalarKind, u8, u8),
    Sampler,
    Struct(String),
    Alias(String, Box<Type>),
}

impl Type {
    pub const BOOL: Type = Type::Scalar(ScalarKind::Bool);
    pub const INT: Type = Type::Scalar(ScalarKind::Int);
    pub const UINT: Type = Type::Scalar(ScalarKind::UInt);
    pub const HALF: Type = Type::Scalar(ScalarKind::Half);
    pub const FLOAT: Type = Type::Scalar(ScalarKind::Float);
    pub const DOUBLE: Type = Type::Scalar(ScalarKind::Double);

    pub fn vector(element: ScalarKind, n: u8) -> Type {
        debug_assert!((1..=MAX_DIMENSION).contains(&n), "vector arity {n}");
        Type::Vector(element, n)
    }

    pub fn matrix(element: ScalarKind, rows: u8, cols: u8) -> Type {
        debug_assert!((1..=MAX_DIMENSION).contains(&rows), "matrix rows {rows}");
        debug_assert!((1..=MAX_DIMENSION).contains(&cols), "matrix cols {cols}");
        Type::Matrix(element, rows, cols)
    }

    pub fn alias(name: impl Into<String>, target: Type) -> Type {
        Type::Alias(name.into(), Box::new(target))
    }

    /// Follow alias chains to a concrete type.
    pub fn resolve(&self) -> &Type {
        let mut ty = self;
        while let Type::Alias(_, target) = ty {
            ty = target;
        }
        ty
    }

    /// Parse a builtin type name: `float`, `int3`, `half4x4`, `sampler`,
    /// `void`. Struct and typedef names are not builtins.
    pub fn from_builtin_name(name: &str) -> Option<Type> {
        match name {
            "void" => return Some(Type::Void),
            "sampler" | "sampler2D" | "SamplerState" => return Some(Type::Sampler),
            _ => {}
        }

        let split = name
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(name.len());
        let (base, dims) = name.split_at(split);
        let element = ScalarKind::from_name(base)?;

        let dimension = |s: &str| -> Option<u8> {
            let n: u8 = s.parse().ok()?;
            (1..=MAX_DIMENSION).contains(&n).then_some(n)
        };

        match dims.split_once('x') {
            None if dims.is_empty() => Some(Type::Scalar(element)),
            None => Some(Type::Vector(element, dimension(dims)?)),
            Some((rows, cols)) => Some(Type::Matrix(element, dimension(rows)?, dimension(cols)?)),
        }
    }

    /// Element kind of a scalar, vector or matrix.
    pub fn element(&self) -> Option<ScalarKind> {
        match self.resolve() {
            Type::Scalar(kind) | Type::Vector(kind, _) | Type::Matrix(kind, _, _) => Some(*kind),
            _ => None,
        }
    }

    /// Same shape with a different element kind. Non-numeric types are
    /// returned unchanged.
    #[must_use]
    pub fn with_element(&self, element: ScalarKind) -> Type {
        match self.resolve() {
            Type::Scalar(_) => Type::Scalar(element),
            Type::Vector(_, n) => Type::Vector(element, *n),
            Type::Matrix(_, rows, cols) => Type::Matrix(element, *rows, *cols),
            other => other.clone(),
        }
    }

    /// Number of scalar components (1 for scalars, 0 for non-numeric types).
    pub fn component_count(&self) -> u8 {
        match self.resolve() {
            Type::Scalar(_) => 1,
            Type::Vector(_, n) => *n,
            Type::Matrix(_, rows, cols) => rows * cols,
            _ => 0,
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self.resolve(), Type::Scalar(_))
    }

    pub fn is_vector(&self) -> bool {
        matches!(self.resolve(), Type::Vector(..))
    }

    pub fn is_matrix(&self) -> bool {
        matches!(self.resolve(), Type::Matrix(..))
    }

    /// Scalar, vector or matrix.
    pub fn is_numeric(&self) -> bool {
        self.element().is_some()
    }

    pub fn is_void(&self) -> bool {
        matches!(self.resolve(), Type::Void)
    }
}

impl From<ScalarKind> for Type {
    fn from(kind: ScalarKind) -> Self {
        Type::Scalar(kind)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Void => f.write_str("void"),
            Type::Scalar(kind) => write!(f, "{kind}"),
            Type::Vector(kind, n) => write!(f, "{kind}{n}"),
            Type::Matrix(kind, rows, cols) => write!(f, "{kind}{rows}x{cols}"),
            Type::Sampler => f.write_str("sampler"),
            Type::Struct(name) | Type::Alias(name, _) => f.write_str(name),
        }
    }
}
