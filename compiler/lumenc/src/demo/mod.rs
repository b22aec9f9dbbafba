//! Built-in demo effects.
//!
//! A small post-processing and material library written against the mixin
//! API. Leaf shaders are registered as generators that emit one class whose
//! generic arguments come from their declared parameters, so effects pass
//! values to them positionally:
//!
//! ```text
//! ctx.mixin(tree, "AmbientOcclusionBlurShader", &[count, vertical])?;
//! ```

use lumen_mixin::{
    FnGenerator, MixinContext, MixinName, MixinRegistry, MixinTree, ParamKey, ParamKeyError,
    ParamKeyId, ParamKeys, ParamType, ParamValue, RegistryBuilder,
};

use crate::LumenError;

/// Parameter keys the demo effects read.
#[derive(Clone, Debug)]
pub struct DemoKeys {
    pub tone_map_auto_key: ParamKey<bool>,
    pub tone_map_auto_exposure: ParamKey<bool>,
    pub color_transform_shader: ParamKey<MixinName>,
    pub skybox_shader: ParamKey<MixinName>,
    pub use_normal_back_face: ParamKey<bool>,
    pub blur_count: ParamKey<i64>,
    pub blur_vertical: ParamKey<bool>,
}

impl DemoKeys {
    pub fn declare(keys: &ParamKeys) -> Result<Self, ParamKeyError> {
        Ok(DemoKeys {
            tone_map_auto_key: keys.declare("ToneMap.AutoKey")?,
            tone_map_auto_exposure: keys.declare("ToneMap.AutoExposure")?,
            color_transform_shader: keys.declare("ColorTransform.Shader")?,
            skybox_shader: keys.declare("Skybox.Shader")?,
            use_normal_back_face: keys.declare("MaterialFrontBackBlend.UseNormalBackFace")?,
            blur_count: keys.declare("AmbientOcclusionBlur.Count")?,
            blur_vertical: keys.declare("AmbientOcclusionBlur.VerticalBlur")?,
        })
    }
}

/// A leaf shader: one class, generic arguments read from `params` in order.
fn shader_class(name: &'static str, params: Vec<ParamKeyId>) -> FnGenerator {
    let read = params.clone();
    FnGenerator::new(name, move |tree, ctx| {
        let args: Vec<String> = read
            .iter()
            .map(|key| ctx.get_param_value(key).to_string())
            .collect();
        tree.add_class_with_args(name, args);
        Ok(())
    })
    .with_params(params)
}

fn classes(name: &'static str, names: &'static [&'static str]) -> FnGenerator {
    FnGenerator::new(name, move |tree, _| {
        for class in names {
            tree.add_class(*class);
        }
        Ok(())
    })
}

/// Typed read passed on as a positional argument.
fn arg<T: ParamType>(ctx: &MixinContext<'_>, key: &ParamKey<T>) -> ParamValue {
    ctx.get_param(key).into_value()
}

fn tone_map_effect(keys: &DemoKeys) -> FnGenerator {
    let auto_key = keys.tone_map_auto_key.clone();
    let auto_exposure = keys.tone_map_auto_exposure.clone();
    let operator = keys.color_transform_shader.id().clone();
    FnGenerator::new("ToneMapEffect", move |tree, ctx| {
        let args = [arg(ctx, &auto_key), arg(ctx, &auto_exposure)];
        ctx.mixin(tree, "ToneMapShader", &args)?;
        ctx.push_composition("ToneMapOperator", MixinTree::new());
        ctx.mixin_param(tree, &operator)?;
        ctx.pop_composition(tree)
    })
}

fn skybox_effect(keys: &DemoKeys) -> FnGenerator {
    let shader = keys.skybox_shader.id().clone();
    FnGenerator::new("SkyboxEffect", move |tree, ctx| {
        ctx.mixin(tree, "SkyboxShader", &[])?;
        let color = ctx.get_param_value(&shader).clone();
        if color.is_unset() {
            return Ok(());
        }
        ctx.push_composition("skyboxColor", MixinTree::new());
        ctx.mixin_value(tree, &color)?;
        ctx.pop_composition(tree)
    })
}

fn wireframe_effect(keys: &DemoKeys) -> FnGenerator {
    let back_face = keys.use_normal_back_face.clone();
    FnGenerator::new("WireFrameShadingEffect", move |tree, ctx| {
        ctx.mixin(tree, "EffectBase", &[])?;
        let args = [arg(ctx, &back_face)];
        ctx.mixin(tree, "MaterialFrontBackBlendShader", &args)
    })
}

fn blur_effect(keys: &DemoKeys) -> FnGenerator {
    let (count, vertical) = (keys.blur_count.clone(), keys.blur_vertical.clone());
    FnGenerator::new("AmbientOcclusionBlurEffect", move |tree, ctx| {
        if ctx.get_param(&count) <= 0 {
            ctx.discard();
            return Ok(());
        }
        let args = [arg(ctx, &count), arg(ctx, &vertical)];
        ctx.mixin(tree, "AmbientOcclusionBlurShader", &args)
    })
}

fn register_all(
    builder: RegistryBuilder,
    keys: &DemoKeys,
) -> Result<RegistryBuilder, LumenError> {
    let builder = builder
        // Shader classes
        .register(classes(
            "EffectBase",
            &["ShaderBase", "TransformationWAndVP", "ShadingBase"],
        ))?
        .register(classes("SkyboxShader", &["SkyboxShader"]))?
        .register(classes("SkyboxShaderCubemap", &["SkyboxShaderCubemap"]))?
        .register(classes("ToneMapReinhard", &["ToneMapReinhardOperatorShader"]))?
        .register(classes("ToneMapHejl2", &["ToneMapHejl2OperatorShader"]))?
        .register(classes("ToneMapAces", &["ToneMapACESOperatorShader"]))?
        .register(shader_class(
            "ToneMapShader",
            vec![
                keys.tone_map_auto_key.id().clone(),
                keys.tone_map_auto_exposure.id().clone(),
            ],
        ))?
        .register(shader_class(
            "MaterialFrontBackBlendShader",
            vec![keys.use_normal_back_face.id().clone()],
        ))?
        .register(shader_class(
            "AmbientOcclusionBlurShader",
            vec![keys.blur_count.id().clone(), keys.blur_vertical.id().clone()],
        ))?
        // Effects
        .register(tone_map_effect(keys))?
        .register(skybox_effect(keys))?
        .register(wireframe_effect(keys))?
        .register(blur_effect(keys))?;
    Ok(builder)
}

/// Declare the demo keys in `keys` and build a registry of the demo
/// effects.
pub fn demo_registry(keys: &ParamKeys) -> Result<(MixinRegistry, DemoKeys), LumenError> {
    let declared = DemoKeys::declare(keys)?;
    let registry = register_all(MixinRegistry::builder(), &declared)?.build();
    tracing::debug!(mixins = registry.len(), "demo registry built");
    Ok((registry, declared))
}
