//! Tests for resolving type nodes through `TypeResolver`.

use tsz_checker::{TypeChecker, TypeResolver};
use tsz_parser::parser::ParserState;
use tsz_parser::syntax::{TypeContainer, find_enclosing_type_container};
use tsz_parser::{NodeArena, NodeIndex};
use tsz_solver::{TypeData, TypeId};

fn parse(source: &str) -> (NodeArena, NodeIndex) {
    let mut parser = ParserState::new("test.ts".to_string(), source.to_string());
    let root = parser.parse_source_file();
    (parser.into_arena(), root)
}

/// Display form of the type in the annotation slot of the container at
/// `needle`.
fn type_at(source: &str, needle: &str) -> String {
    let (arena, root) = parse(source);
    let checker = TypeChecker::new(&arena, root, "test.ts");
    let position = source.find(needle).expect("needle in source") as u32;
    let container = find_enclosing_type_container(&arena, root, position).expect("container");
    let slot = container.type_node(&arena).expect("type slot");
    let type_id = checker.get_type_from_type_node(&arena, slot);
    checker.type_to_string(type_id)
}

#[test]
fn test_keyword_annotations() {
    assert_eq!(type_at("let x: string;", "x"), "string");
    assert_eq!(type_at("let x: number | undefined;", "x"), "number | undefined");
    assert_eq!(type_at("let x: boolean[];", "x"), "boolean[]");
}

#[test]
fn test_typedef_object_literal() {
    let source = "/**\n * @typedef {Object} Foo\n * @property {Number} bar\n */";
    assert_eq!(type_at(source, "@typedef"), "{ bar: number; }");
}

#[test]
fn test_typedef_optional_and_untyped_properties() {
    let source = "/**\n * @typedef {object} Opts\n * @property {string=} a\n * @property [b]\n * @property c\n */";
    assert_eq!(
        type_at(source, "@typedef"),
        "{ a?: string; b?: any; c: any; }"
    );
}

#[test]
fn test_typedef_array_of_objects() {
    let source = "/**\n * @typedef {Object[]} Rows\n * @property {string} id\n */";
    assert_eq!(type_at(source, "@typedef"), "{ id: string; }[]");
}

#[test]
fn test_jsdoc_type_spellings() {
    let source = "/**\n * @typedef {Array.<?String>} Names\n */\nlet x;";
    assert_eq!(type_at(source, "@typedef"), "(string | null)[]");

    let source = "/**\n * @typedef {*} Anything\n */\nlet x;";
    assert_eq!(type_at(source, "@typedef"), "any");
}

#[test]
fn test_reference_resolves_through_alias() {
    let source = "type Id = string | number;\nlet x: Id;";
    assert_eq!(type_at(source, "x:"), "string | number");
}

#[test]
fn test_reference_resolves_through_typedef() {
    let source = "/**\n * @typedef {Object} Point\n * @property {number} x\n */\nlet p: Point;";
    assert_eq!(type_at(source, "p:"), "{ x: number; }");
}

#[test]
fn test_unresolved_reference_is_unknown() {
    assert_eq!(type_at("let x: Missing;", "x"), "unknown");
}

#[test]
fn test_circular_aliases_resolve_to_unknown() {
    let source = "type A = B;\ntype B = A;\nlet x: A;";
    assert_eq!(type_at(source, "x:"), "unknown");
}

#[test]
fn test_type_literal_members() {
    let source = "let x: { readonly a: string; b?: number; m(n: number): void };";
    let (arena, root) = parse(source);
    let checker = TypeChecker::new(&arena, root, "test.ts");
    let container = find_enclosing_type_container(&arena, root, 4).expect("container");
    assert!(matches!(container, TypeContainer::Variable(_)));

    let slot = container.type_node(&arena).expect("type slot");
    let type_id = checker.get_type_from_type_node(&arena, slot);
    let Some(TypeData::Object(props)) = checker.types().lookup(type_id) else {
        panic!("expected object type");
    };
    assert_eq!(props.len(), 3);
    assert!(props[0].readonly);
    assert!(props[1].optional);
    assert!(matches!(
        checker.types().lookup(props[2].type_id),
        Some(TypeData::Function(_))
    ));
}

#[test]
fn test_missing_node_is_unknown() {
    let (arena, root) = parse("let x;");
    let checker = TypeChecker::new(&arena, root, "test.ts");
    assert_eq!(
        checker.get_type_from_type_node(&arena, NodeIndex::NONE),
        TypeId::UNKNOWN
    );
}

#[test]
fn test_resolution_is_cached() {
    let source = "let x: { a: string };";
    let (arena, root) = parse(source);
    let checker = TypeChecker::new(&arena, root, "test.ts");
    let slot = find_enclosing_type_container(&arena, root, 4)
        .and_then(|container| container.type_node(&arena))
        .expect("type slot");

    let first = checker.get_type_from_type_node(&arena, slot);
    let count = checker.types().len();
    let second = checker.get_type_from_type_node(&arena, slot);
    assert_eq!(first, second);
    assert_eq!(checker.types().len(), count);
}

#[test]
fn test_alias_lookup() {
    let source = "/**\n * @typedef {string} ns.Name\n */\ntype Local = number;";
    let (arena, root) = parse(source);
    let checker = TypeChecker::new(&arena, root, "test.ts");
    assert!(checker.alias_type_node("ns.Name").is_some());
    assert!(checker.alias_type_node("Local").is_some());
    assert!(checker.alias_type_node("Name").is_none());
}
