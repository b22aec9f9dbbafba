use pretty_assertions::assert_eq;

use super::*;

#[test]
fn classes_keep_order_and_duplicates() {
    let mut tree = MixinTree::new();
    tree.add_class("A").add_class("B").add_class("A");
    assert_eq!(tree.class_names(), vec!["A", "B", "A"]);
    assert_eq!(tree.class_count(), 3);
}

#[test]
fn class_ref_display() {
    assert_eq!(ClassRef::new("Base").to_string(), "Base");
    assert_eq!(
        ClassRef::with_args("AmbientOcclusionBlurShader", ["9", "true"]).to_string(),
        "AmbientOcclusionBlurShader<9, true>"
    );
}

#[test]
fn empty_tree() {
    let mut tree = MixinTree::new();
    assert!(tree.is_empty());
    tree.set_slot("sub", MixinTree::new());
    assert!(!tree.is_empty());
    assert!(tree.slot("sub").is_some_and(MixinTree::is_empty));
}

#[test]
fn set_slot_replaces() {
    let mut first = MixinTree::new();
    first.add_class("First");
    let mut second = MixinTree::new();
    second.add_class("Second");

    let mut tree = MixinTree::new();
    assert_eq!(tree.set_slot("sub", first.clone()), None);
    assert_eq!(tree.set_slot("sub", second), Some(first));
    assert_eq!(tree.slot("sub").map(MixinTree::class_names), Some(vec!["Second"]));
}

#[test]
fn array_slots_append() {
    let mut tree = MixinTree::new();
    for light in ["PointLight", "SpotLight"] {
        let mut child = MixinTree::new();
        child.add_class(light);
        tree.push_slot_item("lights", child);
    }
    let names: Vec<Vec<&str>> = tree
        .slot_array("lights")
        .unwrap_or_default()
        .iter()
        .map(MixinTree::class_names)
        .collect();
    assert_eq!(names, vec![vec!["PointLight"], vec!["SpotLight"]]);
    assert_eq!(tree.slot_array("shadows"), None);
    assert_eq!(tree.class_count(), 2);
}

#[test]
fn structural_equality() {
    let build = |order: &[&str]| {
        let mut tree = MixinTree::new();
        for name in order {
            tree.add_class(*name);
        }
        tree
    };
    assert_eq!(build(&["A", "B"]), build(&["A", "B"]));
    assert_ne!(build(&["A", "B"]), build(&["B", "A"]));
}

#[test]
fn display_nests_slots() {
    let mut base = MixinTree::new();
    base.add_class("Base");
    let mut light = MixinTree::new();
    light.add_class_with_args("PointLight", ["4"]);

    let mut tree = MixinTree::new();
    tree.add_class("CBase").add_macro("SAMPLES", "4");
    tree.set_slot("sub", base);
    tree.set_slot("empty", MixinTree::new());
    tree.push_slot_item("lights", light);

    assert_eq!(
        tree.to_string(),
        "CBase\n\
         #define SAMPLES 4\n\
         empty {}\n\
         sub {\n  Base\n}\n\
         lights[0] {\n  PointLight<4>\n}\n"
    );
}
