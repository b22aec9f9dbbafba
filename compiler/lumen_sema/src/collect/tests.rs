use lumen_diagnostic::ErrorCode;
use lumen_ir::{FileId, UnitBuilder};
use lumen_types::ScalarKind;
use pretty_assertions::assert_eq;

use super::*;

fn codes(sink: &DiagnosticSink) -> Vec<ErrorCode> {
    sink.iter().map(|d| d.code).collect()
}

#[test]
fn collects_structs_typedefs_and_functions() {
    let mut b = UnitBuilder::new(FileId::new(0));
    b.structure("Light", &[("color", "float3"), ("intensity", "float")]);
    b.typedef("Color", "float3");
    let body = b.block(vec![]);
    b.function("shade", vec![b.param("light", "Light")], "Color", body);
    let unit = b.finish();

    let mut sink = DiagnosticSink::new();
    let table = ItemTable::collect(&unit, &mut sink);
    assert!(sink.is_empty());

    let light = table.structure("Light");
    assert_eq!(
        light.and_then(|s| s.field("color")),
        Some(&Some(Type::Vector(ScalarKind::Float, 3)))
    );
    assert_eq!(light.and_then(|s| s.field("missing")), None);

    let shade = table.function("shade");
    assert_eq!(
        shade.map(|f| f.params.clone()),
        Some(vec![("light".to_owned(), Some(Type::Struct("Light".into())))])
    );
    assert_eq!(
        shade.and_then(|f| f.return_type.clone()),
        Some(Type::alias("Color", Type::vector(ScalarKind::Float, 3)))
    );
}

#[test]
fn typedef_chains_resolve_in_order() {
    let mut b = UnitBuilder::new(FileId::new(0));
    b.typedef("Scalar", "half");
    b.typedef("Intensity", "Scalar");
    let unit = b.finish();

    let mut sink = DiagnosticSink::new();
    let table = ItemTable::collect(&unit, &mut sink);
    let intensity = table.resolve_type_name("Intensity");
    assert_eq!(
        intensity,
        Some(Type::alias("Intensity", Type::alias("Scalar", Type::HALF)))
    );
    assert_eq!(intensity.map(|t| t.resolve().clone()), Some(Type::HALF));
}

#[test]
fn forward_type_reference_is_unknown() {
    let mut b = UnitBuilder::new(FileId::new(0));
    b.typedef("Tint", "Color");
    b.typedef("Color", "float3");
    let unit = b.finish();

    let mut sink = DiagnosticSink::new();
    let table = ItemTable::collect(&unit, &mut sink);
    assert_eq!(codes(&sink), vec![ErrorCode::E2005]);
    assert_eq!(table.resolve_type_name("Tint"), None);
}

#[test]
fn duplicates_are_reported_once_each() {
    let mut b = UnitBuilder::new(FileId::new(0));
    b.structure("Light", &[("color", "float3"), ("color", "float4")]);
    b.at(5, 1).typedef("Light", "float");
    b.typedef("float3", "float4");
    let body = b.block(vec![]);
    b.function("main", vec![], "void", body);
    let body = b.block(vec![]);
    b.at(9, 1).function("main", vec![], "float", body);
    let unit = b.finish();

    let mut sink = DiagnosticSink::new();
    let table = ItemTable::collect(&unit, &mut sink);
    assert_eq!(codes(&sink), vec![ErrorCode::E2011; 4]);

    // first definitions win
    assert_eq!(
        table.resolve_type_name("Light"),
        Some(Type::Struct("Light".into()))
    );
    assert_eq!(
        table.function("main").and_then(|f| f.return_type.clone()),
        Some(Type::Void)
    );
    assert_eq!(table.structure("Light").map(|s| s.fields.len()), Some(1));
}

#[test]
fn unknown_parameter_type_keeps_the_signature() {
    let mut b = UnitBuilder::new(FileId::new(0));
    let body = b.block(vec![]);
    b.function("f", vec![b.param("x", "float9")], "void", body);
    let unit = b.finish();

    let mut sink = DiagnosticSink::new();
    let table = ItemTable::collect(&unit, &mut sink);
    assert_eq!(codes(&sink), vec![ErrorCode::E2005]);
    assert_eq!(
        table.function("f").map(|f| f.params.clone()),
        Some(vec![("x".to_owned(), None)])
    );
}
