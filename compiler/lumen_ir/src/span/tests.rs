use super::*;

fn span(file: u32, start: (u32, u32), end: (u32, u32)) -> Span {
    Span::new(
        FileId::new(file),
        LineCol::new(start.0, start.1),
        LineCol::new(end.0, end.1),
    )
}

#[test]
fn merge_covers_both_spans() {
    let a = span(0, (2, 5), (2, 9));
    let b = span(0, (1, 3), (2, 7));
    let merged = a.merge(b);
    assert_eq!(merged.start, LineCol::new(1, 3));
    assert_eq!(merged.end, LineCol::new(2, 9));
    assert!(merged.contains_span(a));
    assert!(merged.contains_span(b));
}

#[test]
fn merge_across_files_keeps_self() {
    let a = span(0, (2, 5), (2, 9));
    let b = span(1, (1, 1), (1, 2));
    assert_eq!(a.merge(b), a);
    assert!(!a.contains_span(b));
}

#[test]
fn line_col_orders_by_line_then_column() {
    assert!(LineCol::new(1, 40) < LineCol::new(2, 1));
    assert!(LineCol::new(3, 2) < LineCol::new(3, 10));
}

#[test]
fn source_map_renders_locations() {
    let mut map = SourceMap::new();
    let file = map.add_file("shaders/Lighting.xksl");
    assert_eq!(map.path(file), Some("shaders/Lighting.xksl"));
    assert_eq!(
        map.location(Span::point(file, 12, 8)),
        "shaders/Lighting.xksl:12:8"
    );
    assert_eq!(map.location(Span::DUMMY), "<unknown>:0:0");
}

#[test]
fn dummy_span_is_detected() {
    assert!(Span::DUMMY.is_dummy());
    assert!(!Span::point(FileId::new(0), 1, 1).is_dummy());
}
