#![allow(
    clippy::doc_markdown,
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use crate::ScalarKind::{Bool, Double, Float, Half, Int, UInt};

fn vec(kind: ScalarKind, n: u8) -> Type {
    Type::vector(kind, n)
}

fn mat(kind: ScalarKind, rows: u8, cols: u8) -> Type {
    Type::matrix(kind, rows, cols)
}

fn light() -> Type {
    Type::Struct("Light".into())
}

// Generic binary rule

#[test]
fn scalar_pairs_promote() {
    let s = |k| Type::Scalar(k);
    assert_eq!(binary_implicit_conversion(&s(Int), &s(Float), true), Some(Type::FLOAT));
    assert_eq!(binary_implicit_conversion(&s(Float), &s(Float), true), Some(Type::FLOAT));
    assert_eq!(binary_implicit_conversion(&s(Bool), &s(UInt), false), Some(Type::UINT));
    assert_eq!(binary_implicit_conversion(&s(Half), &s(Double), true), Some(Type::DOUBLE));
}

#[test]
fn scalar_broadcast_needs_operator_context() {
    assert_eq!(
        binary_implicit_conversion(&Type::INT, &vec(Float, 3), true),
        Some(vec(Float, 3))
    );
    assert_eq!(
        binary_implicit_conversion(&mat(Half, 2, 2), &Type::FLOAT, true),
        Some(mat(Float, 2, 2))
    );
    assert_eq!(binary_implicit_conversion(&Type::INT, &vec(Float, 3), false), None);
    assert_eq!(binary_implicit_conversion(&mat(Float, 4, 4), &Type::FLOAT, false), None);
}

#[test]
fn vectors_need_equal_arity() {
    assert_eq!(
        binary_implicit_conversion(&vec(Int, 4), &vec(Float, 4), true),
        Some(vec(Float, 4))
    );
    assert_eq!(binary_implicit_conversion(&vec(Float, 3), &vec(Float, 4), true), None);
}

#[test]
fn matrices_need_equal_dimensions() {
    assert_eq!(
        binary_implicit_conversion(&mat(Float, 4, 3), &mat(Float, 4, 3), true),
        Some(mat(Float, 4, 3))
    );
    assert_eq!(binary_implicit_conversion(&mat(Float, 4, 3), &mat(Float, 3, 4), true), None);
}

#[test]
fn vector_with_matrix_has_no_generic_conversion() {
    assert_eq!(binary_implicit_conversion(&mat(Float, 4, 4), &vec(Float, 4), true), None);
    assert_eq!(binary_implicit_conversion(&vec(Float, 4), &mat(Float, 4, 4), true), None);
}

#[test]
fn structs_match_by_name_outside_operators() {
    assert_eq!(binary_implicit_conversion(&light(), &light(), false), Some(light()));
    assert_eq!(binary_implicit_conversion(&light(), &light(), true), None);
    let camera = Type::Struct("Camera".into());
    assert_eq!(binary_implicit_conversion(&light(), &camera, false), None);
}

#[test]
fn structure_with_sampler_never_converts() {
    for op in [true, false] {
        assert_eq!(binary_implicit_conversion(&light(), &Type::Sampler, op), None);
        assert_eq!(binary_implicit_conversion(&Type::Sampler, &light(), op), None);
        assert_eq!(binary_implicit_conversion(&Type::Sampler, &Type::Sampler, op), None);
    }
}

#[test]
fn aliases_resolve_before_matching() {
    let color = Type::alias("Color", vec(Float, 3));
    let intensity = Type::alias("Intensity", Type::alias("Scalar", Type::HALF));
    assert_eq!(
        binary_implicit_conversion(&color, &intensity, true),
        Some(vec(Float, 3))
    );
    assert_eq!(
        binary_implicit_conversion(&color, &vec(Int, 3), true),
        Some(vec(Float, 3))
    );
}

// Multiply

#[test]
fn multiply_matrix_vector_products() {
    assert_eq!(
        multiply_implicit_conversion(&mat(Float, 4, 3), &vec(Float, 3)),
        Some(vec(Float, 4))
    );
    assert_eq!(
        multiply_implicit_conversion(&vec(Float, 4), &mat(Float, 4, 3)),
        Some(vec(Float, 3))
    );
    assert_eq!(multiply_implicit_conversion(&mat(Float, 4, 3), &vec(Float, 4)), None);
}

#[test]
fn multiply_matrix_matrix_needs_inner_dimension() {
    assert_eq!(
        multiply_implicit_conversion(&mat(Float, 2, 3), &mat(Int, 3, 4)),
        Some(mat(Float, 2, 4))
    );
    assert_eq!(multiply_implicit_conversion(&mat(Float, 2, 3), &mat(Float, 2, 3)), None);
}

#[test]
fn multiply_scales_in_any_context() {
    assert_eq!(
        multiply_implicit_conversion(&vec(Half, 2), &Type::FLOAT),
        Some(vec(Float, 2))
    );
    assert_eq!(
        multiply_implicit_conversion(&Type::INT, &mat(Float, 3, 3)),
        Some(mat(Float, 3, 3))
    );
}

#[test]
fn multiply_disagrees_with_generic_rule() {
    // matrix x vector
    let m = mat(Float, 4, 4);
    let v = vec(Float, 4);
    assert_eq!(binary_implicit_conversion(&m, &v, true), None);
    assert_eq!(multiply_implicit_conversion(&m, &v), Some(vec(Float, 4)));

    // vector x scalar outside operator context
    assert_eq!(binary_implicit_conversion(&v, &Type::FLOAT, false), None);
    assert_eq!(multiply_implicit_conversion(&v, &Type::FLOAT), Some(v.clone()));
}

#[test]
fn multiply_rejects_non_numeric() {
    assert_eq!(multiply_implicit_conversion(&light(), &Type::FLOAT), None);
    assert_eq!(multiply_implicit_conversion(&Type::Sampler, &vec(Float, 2)), None);
}

// Divide

#[test]
fn divide_defined_shapes() {
    let cases = [
        (Type::FLOAT, Type::INT, Type::FLOAT),
        (vec(Float, 3), Type::FLOAT, vec(Float, 3)),
        (Type::FLOAT, vec(Half, 3), vec(Float, 3)),
        (vec(Int, 2), vec(Float, 2), vec(Float, 2)),
        (mat(Float, 3, 3), Type::INT, mat(Float, 3, 3)),
        (mat(Float, 2, 3), mat(Double, 2, 3), mat(Double, 2, 3)),
    ];
    for (left, right, expected) in cases {
        assert_eq!(
            divide_implicit_conversion(&left, &right),
            Some(expected),
            "{left} / {right}"
        );
    }
}

#[test]
fn divide_undefined_shapes() {
    let cases = [
        (Type::FLOAT, mat(Float, 3, 3)),
        (mat(Float, 3, 3), vec(Float, 3)),
        (vec(Float, 3), mat(Float, 3, 3)),
        (vec(Float, 3), vec(Float, 4)),
        (mat(Float, 2, 3), mat(Float, 3, 2)),
    ];
    for (left, right) in cases {
        assert_eq!(divide_implicit_conversion(&left, &right), None, "{left} / {right}");
    }
}

// Scalar

#[test]
fn scalar_conversion() {
    assert_eq!(binary_implicit_scalar_conversion(&Type::INT, &Type::FLOAT), Some(Float));
    assert_eq!(binary_implicit_scalar_conversion(&Type::FLOAT, &Type::FLOAT), Some(Float));
    assert_eq!(binary_implicit_scalar_conversion(&vec(Float, 2), &Type::FLOAT), None);
    assert_eq!(binary_implicit_scalar_conversion(&Type::Sampler, &Type::INT), None);
    let alias = Type::alias("Index", Type::UINT);
    assert_eq!(binary_implicit_scalar_conversion(&alias, &Type::INT), Some(UInt));
}

// Assignment

#[test]
fn assignment_conversions() {
    assert_eq!(assignment_conversion(&Type::FLOAT, &Type::FLOAT), Some(Conversion::Identity));
    assert_eq!(assignment_conversion(&Type::INT, &Type::FLOAT), Some(Conversion::Widen));
    assert_eq!(assignment_conversion(&Type::FLOAT, &Type::INT), Some(Conversion::Narrow));
    assert_eq!(assignment_conversion(&Type::FLOAT, &vec(Float, 4)), Some(Conversion::Widen));
    assert_eq!(assignment_conversion(&vec(Float, 4), &vec(Float, 3)), Some(Conversion::Narrow));
    assert_eq!(assignment_conversion(&vec(Float, 4), &Type::FLOAT), Some(Conversion::Narrow));
    assert_eq!(assignment_conversion(&vec(Float, 2), &vec(Float, 3)), None);
    assert_eq!(assignment_conversion(&light(), &Type::FLOAT), None);
    assert_eq!(
        assignment_conversion(&Type::alias("Color", vec(Float, 3)), &vec(Float, 3)),
        Some(Conversion::Identity)
    );
}

// Properties

fn arb_scalar() -> impl Strategy<Value = ScalarKind> {
    prop::sample::select(ScalarKind::ALL.to_vec())
}

fn arb_type() -> impl Strategy<Value = Type> {
    let leaf = prop_oneof![
        arb_scalar().prop_map(Type::Scalar),
        (arb_scalar(), 1u8..=4).prop_map(|(k, n)| Type::Vector(k, n)),
        (arb_scalar(), 1u8..=4, 1u8..=4).prop_map(|(k, r, c)| Type::Matrix(k, r, c)),
        Just(Type::Sampler),
        prop::sample::select(vec!["Light", "Camera"]).prop_map(|n| Type::Struct(n.into())),
    ];
    leaf.prop_recursive(2, 4, 1, |inner| {
        inner.prop_map(|target| Type::alias("Alias", target))
    })
}

proptest! {
    #[test]
    fn generic_rule_is_commutative(a in arb_type(), b in arb_type(), op in any::<bool>()) {
        prop_assert_eq!(
            binary_implicit_conversion(&a, &b, op),
            binary_implicit_conversion(&b, &a, op)
        );
    }

    #[test]
    fn scalar_rule_is_commutative(a in arb_type(), b in arb_type()) {
        prop_assert_eq!(
            binary_implicit_scalar_conversion(&a, &b),
            binary_implicit_scalar_conversion(&b, &a)
        );
    }

    #[test]
    fn results_are_never_aliases(a in arb_type(), b in arb_type(), op in any::<bool>()) {
        for result in [
            binary_implicit_conversion(&a, &b, op),
            multiply_implicit_conversion(&a, &b),
            divide_implicit_conversion(&a, &b),
        ].into_iter().flatten() {
            prop_assert!(!matches!(result, Type::Alias(..)));
        }
    }

    #[test]
    fn promotion_never_narrows(a in arb_type(), b in arb_type()) {
        if let Some(result) = binary_implicit_conversion(&a, &b, true) {
            if let (Some(ea), Some(er)) = (a.element(), result.element()) {
                prop_assert!(ea <= er);
            }
        }
    }

    #[test]
    fn rules_are_deterministic(a in arb_type(), b in arb_type()) {
        prop_assert_eq!(
            multiply_implicit_conversion(&a, &b),
            multiply_implicit_conversion(&a, &b)
        );
        prop_assert_eq!(
            divide_implicit_conversion(&a, &b),
            divide_implicit_conversion(&a, &b)
        );
    }
}

#[test]
fn multiply_is_not_commutative() {
    let m = mat(Float, 2, 3);
    let v = vec(Float, 3);
    assert_eq!(multiply_implicit_conversion(&m, &v), Some(vec(Float, 2)));
    assert_eq!(multiply_implicit_conversion(&v, &m), None);
}
