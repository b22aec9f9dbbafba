use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use crate::params::{MixinName, ParamKey, ParamKeys};

struct Keys {
    use_feature: ParamKey<bool>,
    tone_map: ParamKey<MixinName>,
    samples: ParamKey<i64>,
}

fn declare(keys: &ParamKeys) -> Keys {
    let (Ok(use_feature), Ok(tone_map), Ok(samples)) = (
        keys.declare::<bool>("UseFeature"),
        keys.declare::<MixinName>("ToneMapOperator"),
        keys.declare::<i64>("BlurCount"),
    ) else {
        panic!("conflicting declarations");
    };
    Keys {
        use_feature,
        tone_map,
        samples,
    }
}

fn shaders(keys: &Keys) -> MixinRegistry {
    let feature = keys.use_feature.clone();
    let operator = keys.tone_map.id().clone();
    let samples = keys.samples.clone();

    let built = MixinRegistry::builder()
        .register_fn("A", |tree, _| {
            tree.add_class("Base");
            Ok(())
        })
        .and_then(|b| {
            b.register_fn("B", move |tree, ctx| {
                if ctx.get_param(&feature) {
                    tree.add_class("FeatureOn");
                } else {
                    tree.add_class("FeatureOff");
                }
                Ok(())
            })
        })
        .and_then(|b| {
            b.register_fn("C", |tree, ctx| {
                tree.add_class("CBase");
                ctx.push_composition("sub", MixinTree::new());
                ctx.mixin(tree, "A", &[])?;
                ctx.pop_composition(tree)
            })
        })
        .and_then(|b| {
            b.register_fn("Reinhard", |tree, _| {
                tree.add_class("ToneMapReinhardOperatorShader");
                Ok(())
            })
        })
        .and_then(|b| {
            b.register_fn("ToneMap", move |tree, ctx| {
                tree.add_class("ToneMapShader");
                ctx.push_composition("ToneMapOperator", MixinTree::new());
                ctx.mixin_param(tree, &operator)?;
                ctx.pop_composition(tree)
            })
        })
        .and_then(|b| {
            b.register_fn("Blur", move |tree, ctx| {
                let count = ctx.get_param(&samples);
                if count <= 0 {
                    ctx.discard();
                    return Ok(());
                }
                tree.add_class_with_args("AmbientOcclusionBlurShader", [count.to_string()]);
                Ok(())
            })
        });

    match built {
        Ok(builder) => builder.build(),
        Err(err) => panic!("{err}"),
    }
}

fn compile(
    registry: &MixinRegistry,
    name: &str,
    parameters: Parameters,
) -> Result<MixinRecipe, MixinError> {
    compile_mixin(registry, name, parameters, MixinConfig::default())
}

#[test]
fn plain_mixin_expands_to_its_class() {
    let keys = ParamKeys::new();
    let registry = shaders(&declare(&keys));
    let recipe = compile(&registry, "A", Parameters::new());
    assert_eq!(recipe.map(|r| r.tree.class_names().join(",")), Ok("Base".to_owned()));
}

#[test]
fn parameters_select_the_feature_branch() {
    let keys = ParamKeys::new();
    let declared = declare(&keys);
    let registry = shaders(&declared);

    let on = compile(&registry, "B", Parameters::new().with(&declared.use_feature, true));
    let off = compile(&registry, "B", Parameters::new().with(&declared.use_feature, false));
    let unset = compile(&registry, "B", Parameters::new());

    let names = |r: Result<MixinRecipe, MixinError>| r.map(|r| r.tree.class_names().join(","));
    assert_eq!(names(on), Ok("FeatureOn".to_owned()));
    assert_eq!(names(off), Ok("FeatureOff".to_owned()));
    assert_eq!(names(unset), Ok("FeatureOff".to_owned()));
}

#[test]
fn composition_fills_the_named_slot() {
    let keys = ParamKeys::new();
    let registry = shaders(&declare(&keys));
    let Ok(recipe) = compile(&registry, "C", Parameters::new()) else {
        panic!("compile failed");
    };

    let mut base = MixinTree::new();
    base.add_class("Base");
    let mut expected = MixinTree::new();
    expected.add_class("CBase");
    expected.set_slot("sub", base);

    assert_eq!(recipe.tree, expected);
    assert!(!recipe.discarded);
}

#[test]
fn unknown_mixin_aborts_the_compile() {
    let keys = ParamKeys::new();
    let registry = shaders(&declare(&keys));
    assert_eq!(
        compile(&registry, "Missing", Parameters::new()),
        Err(MixinError::UnknownMixin {
            name: "Missing".into(),
            path: "root".into(),
        })
    );
}

#[test]
fn slot_filled_from_a_parameter() {
    let keys = ParamKeys::new();
    let declared = declare(&keys);
    let registry = shaders(&declared);

    let params = Parameters::new().with(&declared.tone_map, MixinName::from("Reinhard"));
    let Ok(recipe) = compile(&registry, "ToneMap", params) else {
        panic!("compile failed");
    };
    assert_eq!(
        recipe.tree.to_string(),
        "ToneMapShader\nToneMapOperator {\n  ToneMapReinhardOperatorShader\n}\n"
    );
    assert_eq!(
        recipe.parameters,
        vec![("ToneMapOperator".to_owned(), ParamValue::Mixin("Reinhard".into()))]
    );

    let missing = compile(&registry, "ToneMap", Parameters::new());
    assert_eq!(
        missing,
        Err(MixinError::MissingParameter {
            name: "ToneMap".into(),
            key: "ToneMapOperator".into(),
            path: "root/ToneMapOperator".into(),
        })
    );
}

#[test]
fn discarded_compile_yields_an_empty_recipe() {
    let keys = ParamKeys::new();
    let declared = declare(&keys);
    let registry = shaders(&declared);

    let Ok(kept) = compile(&registry, "Blur", Parameters::new().with(&declared.samples, 9)) else {
        panic!("compile failed");
    };
    assert_eq!(kept.tree.classes()[0].to_string(), "AmbientOcclusionBlurShader<9>");

    let Ok(dropped) = compile(&registry, "Blur", Parameters::new()) else {
        panic!("compile failed");
    };
    assert!(dropped.discarded);
    assert!(dropped.tree.is_empty());
    assert_eq!(dropped.to_string(), "mixin Blur (discarded)\n");
}

#[test]
fn recipe_display_lists_parameters() {
    let keys = ParamKeys::new();
    let declared = declare(&keys);
    let registry = shaders(&declared);
    let params = Parameters::new()
        .with(&declared.use_feature, true)
        .with(&declared.samples, 2);
    let Ok(recipe) = compile(&registry, "B", params) else {
        panic!("compile failed");
    };
    assert_eq!(
        recipe.to_string(),
        "mixin B\n  BlurCount = 2\n  UseFeature = true\nFeatureOn\n"
    );
}

#[test]
fn compiles_share_a_registry_across_threads() {
    let keys = ParamKeys::new();
    let declared = declare(&keys);
    let registry = shaders(&declared);

    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = [true, false]
            .into_iter()
            .map(|flag| {
                let params = Parameters::new().with(&declared.use_feature, flag);
                let registry = &registry;
                scope.spawn(move || compile(registry, "B", params).map(|r| r.tree))
            })
            .collect();
        handles.into_iter().map(|h| h.join().ok()).collect()
    });

    let names: Vec<Option<String>> = results
        .into_iter()
        .map(|r| r.and_then(Result::ok).map(|t| t.class_names().join(",")))
        .collect();
    assert_eq!(
        names,
        vec![Some("FeatureOn".to_owned()), Some("FeatureOff".to_owned())]
    );
}

proptest! {
    #[test]
    fn expansion_is_deterministic(
        name in prop::sample::select(vec!["A", "B", "C", "Blur", "ToneMap"]),
        feature in any::<bool>(),
        count in -2i64..4,
    ) {
        let keys = ParamKeys::new();
        let declared = declare(&keys);
        let registry = shaders(&declared);
        let params = || {
            Parameters::new()
                .with(&declared.use_feature, feature)
                .with(&declared.samples, count)
                .with(&declared.tone_map, MixinName::from("Reinhard"))
        };
        prop_assert_eq!(
            compile(&registry, name, params()),
            compile(&registry, name, params())
        );
    }
}

#[cfg(feature = "cache")]
#[test]
fn composed_recipe_survives_a_cache_round_trip() {
    let keys = ParamKeys::new();
    let declared = declare(&keys);
    let registry = shaders(&declared);
    let params = Parameters::new()
        .with(&declared.tone_map, MixinName::from("Reinhard"))
        .with(&declared.samples, -3)
        .with(&declared.use_feature, true);
    let Ok(mut recipe) = compile(&registry, "ToneMap", params) else {
        panic!("compile failed");
    };

    let mut light = MixinTree::new();
    light.add_class_with_args("DirectLight", ["4"]);
    recipe.tree.add_macro("MAX_LIGHTS", "4");
    recipe.tree.push_slot_item("lights", light);
    recipe.parameters.push(("Exposure".to_owned(), ParamValue::Float(0.25)));
    recipe.parameters.push(("Unbound".to_owned(), ParamValue::Unset));

    let json = match serde_json::to_string(&recipe) {
        Ok(json) => json,
        Err(err) => panic!("{err}"),
    };
    let restored: MixinRecipe = match serde_json::from_str(&json) {
        Ok(restored) => restored,
        Err(err) => panic!("{err}"),
    };
    assert_eq!(restored, recipe);
    assert_eq!(restored.to_string(), recipe.to_string());
}
