//! Implicit conversion rule tables.
//!
//! Pure functions from two operand types to their combined type. `None`
//! means no implicit conversion exists; callers decide how to report it.
//! Every entry point resolves aliases before matching.
//!
//! Scalars promote to the wider kind along
//! `bool < int < uint < half < float < double`. Nothing narrows implicitly.
//!
//! | rule | scalar ⊕ vec/mat | vec(n) ⊕ vec(n) | mat ⊕ vec | mat ⊕ mat | commutative |
//! |---|---|---|---|---|---|
//! | generic | under an operator only | yes | no | equal dims | yes |
//! | multiply | always | yes | inner dims agree | inner dims agree | no |
//! | divide | always (not `s / mat`) | yes | no | equal dims | no |

use crate::{ScalarKind, Type};

/// The combined type of a general binary expression.
///
/// `is_binary_operator` is true when the operands meet under an arithmetic
/// or comparison operator. Scalars broadcast over vectors and matrices only
/// in that context. Structs combine only with the same struct and only
/// outside operators. Samplers never combine.
///
/// The rule is commutative.
pub fn binary_implicit_conversion(
    left: &Type,
    right: &Type,
    is_binary_operator: bool,
) -> Option<Type> {
    let (left, right) = (left.resolve(), right.resolve());
    match (left, right) {
        (Type::Scalar(a), Type::Scalar(b)) => Some(Type::Scalar(a.promote(*b))),

        (Type::Scalar(s), aggregate @ (Type::Vector(..) | Type::Matrix(..)))
        | (aggregate @ (Type::Vector(..) | Type::Matrix(..)), Type::Scalar(s))
            if is_binary_operator =>
        {
            Some(broadcast(*s, aggregate))
        }

        (Type::Vector(a, n), Type::Vector(b, m)) if n == m => {
            Some(Type::Vector(a.promote(*b), *n))
        }

        (Type::Matrix(a, r1, c1), Type::Matrix(b, r2, c2)) if r1 == r2 && c1 == c2 => {
            Some(Type::Matrix(a.promote(*b), *r1, *c1))
        }

        (Type::Struct(a), Type::Struct(b)) if a == b && !is_binary_operator => Some(left.clone()),

        _ => None,
    }
}

/// The combined type of `left * right` under matrix algebra.
///
/// Scalars scale anything. Vectors of equal arity multiply component-wise.
/// `mat(r, c) * vec(c)` is `vec(r)`, `vec(r) * mat(r, c)` is `vec(c)` and
/// `mat(r, k) * mat(k, c)` is `mat(r, c)`.
pub fn multiply_implicit_conversion(left: &Type, right: &Type) -> Option<Type> {
    let (left, right) = (left.resolve(), right.resolve());
    match (left, right) {
        (Type::Scalar(a), Type::Scalar(b)) => Some(Type::Scalar(a.promote(*b))),

        (Type::Scalar(s), aggregate @ (Type::Vector(..) | Type::Matrix(..)))
        | (aggregate @ (Type::Vector(..) | Type::Matrix(..)), Type::Scalar(s)) => {
            Some(broadcast(*s, aggregate))
        }

        (Type::Vector(a, n), Type::Vector(b, m)) if n == m => {
            Some(Type::Vector(a.promote(*b), *n))
        }

        (Type::Matrix(a, rows, cols), Type::Vector(b, n)) if cols == n => {
            Some(Type::Vector(a.promote(*b), *rows))
        }

        (Type::Vector(a, n), Type::Matrix(b, rows, cols)) if n == rows => {
            Some(Type::Vector(a.promote(*b), *cols))
        }

        (Type::Matrix(a, rows, k1), Type::Matrix(b, k2, cols)) if k1 == k2 => {
            Some(Type::Matrix(a.promote(*b), *rows, *cols))
        }

        _ => None,
    }
}

/// The combined type of `left / right`.
///
/// Division is component-wise. A scalar divides or is divided by a vector,
/// a matrix may be divided by a scalar, and equal shapes divide each other.
/// Dividing a scalar by a matrix, or mixing matrices with vectors, has no
/// conversion.
pub fn divide_implicit_conversion(left: &Type, right: &Type) -> Option<Type> {
    let (left, right) = (left.resolve(), right.resolve());
    match (left, right) {
        (Type::Scalar(a), Type::Scalar(b)) => Some(Type::Scalar(a.promote(*b))),

        (aggregate @ Type::Vector(..), Type::Scalar(s))
        | (Type::Scalar(s), aggregate @ Type::Vector(..))
        | (aggregate @ Type::Matrix(..), Type::Scalar(s)) => Some(broadcast(*s, aggregate)),

        (Type::Vector(a, n), Type::Vector(b, m)) if n == m => {
            Some(Type::Vector(a.promote(*b), *n))
        }

        (Type::Matrix(a, r1, c1), Type::Matrix(b, r2, c2)) if r1 == r2 && c1 == c2 => {
            Some(Type::Matrix(a.promote(*b), *r1, *c1))
        }

        _ => None,
    }
}

/// The promoted scalar kind of two scalar operands; `None` if either is not
/// a scalar.
pub fn binary_implicit_scalar_conversion(left: &Type, right: &Type) -> Option<ScalarKind> {
    match (left.resolve(), right.resolve()) {
        (Type::Scalar(a), Type::Scalar(b)) => Some(a.promote(*b)),
        _ => None,
    }
}

/// How a value converts when stored into a declared type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Conversion {
    /// Same type after resolving aliases.
    Identity,
    /// Lossless: wider element kind, or a scalar splatted to every component.
    Widen,
    /// Converts, but loses precision or drops trailing vector components.
    Narrow,
}

/// Conversion applied when storing `value` into a slot of type `target`
/// (assignment, initialization, return).
///
/// Scalars splat into vectors and matrices. A vector may be stored into a
/// shorter vector or a scalar, dropping trailing components, which counts as
/// narrowing.
pub fn assignment_conversion(value: &Type, target: &Type) -> Option<Conversion> {
    let (value, target) = (value.resolve(), target.resolve());
    if value == target {
        return Some(Conversion::Identity);
    }

    let by_element = |from: &ScalarKind, to: &ScalarKind| {
        if from.narrows_to(*to) {
            Conversion::Narrow
        } else {
            Conversion::Widen
        }
    };

    match (value, target) {
        (Type::Scalar(from), Type::Scalar(to))
        | (Type::Scalar(from), Type::Vector(to, _) | Type::Matrix(to, _, _)) => {
            Some(by_element(from, to))
        }
        (Type::Vector(from, n), Type::Vector(to, m)) if n >= m => {
            if n > m {
                Some(Conversion::Narrow)
            } else {
                Some(by_element(from, to))
            }
        }
        (Type::Vector(..), Type::Scalar(_)) => Some(Conversion::Narrow),
        (Type::Matrix(from, r1, c1), Type::Matrix(to, r2, c2)) if r1 == r2 && c1 == c2 => {
            Some(by_element(from, to))
        }
        _ => None,
    }
}

fn broadcast(scalar: ScalarKind, aggregate: &Type) -> Type {
    let element = aggregate.element().map_or(scalar, |e| e.promote(scalar));
    aggregate.with_element(element)
}

#[cfg(test)]
mod tests;
