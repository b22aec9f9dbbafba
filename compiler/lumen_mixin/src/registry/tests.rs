use pretty_assertions::assert_eq;

use super::*;
use crate::params::{ParamKeys, ParamKind};

fn base(tree: &mut MixinTree, _: &mut MixinContext<'_>) -> Result<(), MixinError> {
    tree.add_class("Base");
    Ok(())
}

#[test]
fn lookup_by_name() {
    let Ok(builder) = MixinRegistry::builder().register_fn("A", base) else {
        panic!("registration failed");
    };
    let registry = builder.build();
    assert!(registry.contains("A"));
    assert_eq!(registry.get("A").map(MixinGenerator::name), Some("A"));
    assert!(registry.get("Missing").is_none());
    assert_eq!(registry.len(), 1);
    assert!(!registry.is_empty());
}

#[test]
fn duplicate_registration_is_an_error() {
    let result = MixinRegistry::builder()
        .register_fn("A", base)
        .and_then(|b| b.register_fn("A", base));
    assert_eq!(
        result.err(),
        Some(RegistryError::DuplicateMixin { name: "A".into() })
    );
}

#[test]
fn names_are_sorted() {
    let result = ["Sky", "Base", "ToneMap"]
        .into_iter()
        .try_fold(MixinRegistry::builder(), |b, name| b.register_fn(name, base));
    let Ok(builder) = result else {
        panic!("registration failed");
    };
    assert_eq!(builder.build().names(), vec!["Base", "Sky", "ToneMap"]);
}

#[test]
fn generator_params_are_exposed() {
    let keys = ParamKeys::new();
    let Ok(samples) = keys.declare_kind("Samples", ParamKind::Int) else {
        panic!("declare failed");
    };
    let generator = FnGenerator::new("Blur", base).with_params([samples.clone()]);
    assert_eq!(generator.params(), &[samples]);

    let Ok(builder) = MixinRegistry::builder().register(generator) else {
        panic!("registration failed");
    };
    let registry = builder.build();
    assert_eq!(registry.get("Blur").map(|g| g.params().len()), Some(1));
}

#[test]
fn empty_registry() {
    let registry = MixinRegistry::builder().build();
    assert!(registry.is_empty());
    assert!(registry.names().is_empty());
    assert_eq!(format!("{registry:?}"), "MixinRegistry { mixins: [] }");
}

// The only test in this crate that touches the process-wide registry.
#[test]
fn install_once() {
    let Ok(builder) = MixinRegistry::builder().register_fn("Installed", base) else {
        panic!("registration failed");
    };
    let installed = builder.build().install();
    assert!(installed.is_ok_and(|r| r.contains("Installed")));
    assert!(MixinRegistry::global().is_some_and(|r| r.contains("Installed")));

    let again = MixinRegistry::builder().build().install();
    assert_eq!(again.err(), Some(RegistryError::AlreadyInstalled));
}
