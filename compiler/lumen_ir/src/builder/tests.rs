use pretty_assertions::assert_eq;

use super::*;
use crate::LineCol;

#[test]
fn nodes_take_the_current_position() {
    let file = FileId::new(3);
    let mut b = UnitBuilder::new(file);
    let x = b.at(4, 12).ident("x");
    let one = b.at(4, 16).float(1.0);
    let sum = b.binary(BinaryOp::Add, x, one);
    let unit = b.finish();

    assert_eq!(unit.file, file);
    assert_eq!(unit.arena.expr(x).span.start, LineCol::new(4, 12));
    assert_eq!(unit.arena.expr(sum).span.start, LineCol::new(4, 16));
    assert_eq!(
        unit.arena.expr(sum).kind,
        ExprKind::Binary {
            op: BinaryOp::Add,
            left: x,
            right: one
        }
    );
}

#[test]
fn items_are_kept_in_declaration_order() {
    let mut b = UnitBuilder::new(FileId::new(0));
    b.typedef("Color", "float3");
    b.structure("Light", &[("color", "Color"), ("intensity", "float")]);
    let body = b.block(Vec::new());
    b.function("main", Vec::new(), "void", body);
    let unit = b.finish();

    let names: Vec<&str> = unit.items.iter().map(Item::name).collect();
    assert_eq!(names, vec!["Color", "Light", "main"]);
    let Item::Struct(light) = &unit.items[1] else {
        panic!("expected struct item");
    };
    assert_eq!(light.fields[0].ty.name, "Color");
}
