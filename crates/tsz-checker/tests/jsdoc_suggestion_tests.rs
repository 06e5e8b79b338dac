//! Tests for JSDoc typedef suggestion diagnostics (TS80009).

use tsz_checker::TypeChecker;
use tsz_common::DiagnosticCategory;
use tsz_parser::parser::ParserState;

fn suggestions(source: &str) -> Vec<(u32, u32, u32)> {
    let mut parser = ParserState::new("test.js".to_string(), source.to_string());
    let root = parser.parse_source_file();
    let arena = parser.get_arena();
    let checker = TypeChecker::new(arena, root, "test.js");
    checker
        .get_suggestion_diagnostics(arena, root)
        .into_iter()
        .map(|d| {
            assert_eq!(d.category, DiagnosticCategory::Suggestion);
            assert_eq!(d.file, "test.js");
            (d.code, d.start, d.length)
        })
        .collect()
}

#[test]
fn test_one_suggestion_per_typedef() {
    let source = "/** @typedef {string} A */\n/** @typedef {number} B */\nlet x = 1;";
    let found = suggestions(source);
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|&(code, _, _)| code == 80009));
    assert_eq!(found[0].1, source.find("@typedef").expect("first tag") as u32);
    assert!(found[0].1 < found[1].1);
}

#[test]
fn test_suggestion_spans_tag() {
    let source = "/**\n * @typedef {Object} Foo\n * @property {Number} bar\n */";
    let found = suggestions(source);
    assert_eq!(found, vec![(80009, 7, 47)]);
}

#[test]
fn test_no_typedefs_no_suggestions() {
    assert!(suggestions("/** @type {string} */\nlet x;\n// @typedef not jsdoc").is_empty());
}
