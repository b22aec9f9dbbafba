use lumen_types::ScalarKind;
use pretty_assertions::assert_eq;

use super::*;

#[test]
fn lookup_walks_outwards() {
    let mut globals = Scope::new();
    assert!(globals.bind("time", Some(Type::FLOAT)));

    let mut body = globals.child();
    assert!(body.bind("uv", Some(Type::vector(ScalarKind::Float, 2))));

    assert_eq!(body.lookup("time"), Some(&Some(Type::FLOAT)));
    assert_eq!(
        body.lookup("uv"),
        Some(&Some(Type::Vector(ScalarKind::Float, 2)))
    );
    assert_eq!(globals.lookup("uv"), None);
}

#[test]
fn inner_scope_shadows_outer() {
    let mut outer = Scope::new();
    outer.bind("x", Some(Type::INT));
    let mut inner = outer.child();
    assert!(inner.bind("x", Some(Type::FLOAT)));
    assert_eq!(inner.lookup("x"), Some(&Some(Type::FLOAT)));
    assert_eq!(outer.lookup("x"), Some(&Some(Type::INT)));
}

#[test]
fn duplicate_in_same_scope_keeps_first() {
    let mut scope = Scope::new();
    assert!(scope.bind("x", Some(Type::INT)));
    assert!(!scope.bind("x", Some(Type::FLOAT)));
    assert_eq!(scope.lookup("x"), Some(&Some(Type::INT)));
}

#[test]
fn failed_declarations_still_resolve() {
    let mut scope = Scope::new();
    scope.bind("broken", None);
    assert_eq!(scope.lookup("broken"), Some(&None));
}

#[test]
fn parent_returns_to_enclosing_scope() {
    let mut root = Scope::new();
    root.bind("a", Some(Type::BOOL));
    let child = root.child().child();
    assert_eq!(child.depth(), 2);

    let back = child.parent().and_then(|s| s.parent());
    assert!(back.as_ref().is_some_and(|s| s.is_bound_locally("a")));
    assert_eq!(back.map(|s| s.depth()), Some(0));
}
