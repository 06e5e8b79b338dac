use crate::position::{LineMap, Position};

#[test]
fn test_line_map_simple() {
    let source = "line1\nline2\nline3";
    let map = LineMap::build(source);

    assert_eq!(map.line_count(), 3);
    assert_eq!(map.offset_to_position(0, source), Position::new(0, 0));
    assert_eq!(map.offset_to_position(4, source), Position::new(0, 4));
    assert_eq!(map.offset_to_position(6, source), Position::new(1, 0));
    assert_eq!(map.offset_to_position(12, source), Position::new(2, 0));
}

#[test]
fn test_line_map_windows_line_endings() {
    let source = "line1\r\nline2\r\nline3";
    let map = LineMap::build(source);

    assert_eq!(map.line_count(), 3);
    assert_eq!(map.offset_to_position(7, source), Position::new(1, 0));
    assert_eq!(map.line_start(2), Some(14));
}

#[test]
fn test_position_to_offset_roundtrip_over_jsdoc() {
    let source = "/**\n * @typedef {Object} Foo\n * @property {Number} bar\n */";
    let map = LineMap::build(source);

    for offset in 0..source.len() as u32 {
        let pos = map.offset_to_position(offset, source);
        let back = map.position_to_offset(pos, source);
        assert_eq!(back, Some(offset), "roundtrip failed for offset {offset}");
    }
}

#[test]
fn test_position_past_last_line_is_none() {
    let source = "a\nb";
    let map = LineMap::build(source);
    assert_eq!(map.position_to_offset(Position::new(5, 0), source), None);
}
