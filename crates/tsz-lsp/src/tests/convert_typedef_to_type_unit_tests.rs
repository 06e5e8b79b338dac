use super::*;
use tsz_checker::TypeChecker;
use tsz_parser::{NodeIndex, ParserState};
use tsz_parser::syntax::jsdoc_tags::collect_typedef_tags;
use tsz_scanner::SyntaxKind;

fn parse(source: &str) -> (ParserState, NodeIndex) {
    let mut parser = ParserState::new("test.ts".to_string(), source.to_string());
    let root = parser.parse_source_file();
    (parser, root)
}

fn first_typedef(arena: &NodeArena) -> TypedefTag {
    let tag = collect_typedef_tags(arena)[0];
    TypedefTag::from_node(arena, tag).expect("typedef tag")
}

#[test]
fn test_derive_type_parameters_from_property_tags() {
    let source = "/**\n * @typedef {Object} Foo\n * @property {Number} bar\n * @property {string} baz\n */";
    let (parser, _root) = parse(source);
    let arena = parser.get_arena();
    let tag = first_typedef(arena);
    assert_eq!(derive_type_parameters(arena, &tag), vec!["bar", "baz"]);
}

#[test]
fn test_derive_type_parameters_without_type_literal() {
    let source = "/** @typedef {string} Name */\nlet a;";
    let (parser, _root) = parse(source);
    let arena = parser.get_arena();
    let tag = first_typedef(arena);
    assert!(derive_type_parameters(arena, &tag).is_empty());
}

#[test]
fn test_synthesize_drops_derived_type_parameters() {
    let source = "/**\n * @typedef {Object} Foo\n * @property {Number} bar\n */";
    let (parser, _root) = parse(source);
    let arena = parser.get_arena();
    let tag = first_typedef(arena);
    let type_node = tag.type_expression.and_then(|expr| lower_type_node(arena, expr));

    let declaration = synthesize(arena, &tag, type_node).expect("declaration");
    assert_eq!(declaration.name, "Foo");
    assert!(declaration.type_parameters.is_empty());
    assert!(matches!(declaration.type_node, TypeNode::Object(ref members) if members.len() == 1));
}

#[test]
fn test_synthesize_uses_full_dotted_name() {
    let source = "/** @typedef {number} ns.inner.Id */\nlet a;";
    let (parser, _root) = parse(source);
    let arena = parser.get_arena();
    let tag = first_typedef(arena);
    let declaration = synthesize(
        arena,
        &tag,
        Some(TypeNode::keyword(SyntaxKind::NumberKeyword)),
    )
    .expect("declaration");
    assert_eq!(declaration.name, "ns.inner.Id");
}

#[test]
fn test_synthesize_requires_name_and_type() {
    let (parser, _root) = parse("/** @typedef {string} */\nlet a;");
    let arena = parser.get_arena();
    let unnamed = first_typedef(arena);
    let string = TypeNode::keyword(SyntaxKind::StringKeyword);
    assert!(synthesize(arena, &unnamed, Some(string.clone())).is_none());

    let (parser, _root) = parse("/** @typedef {string} Name */\nlet a;");
    let arena = parser.get_arena();
    let named = first_typedef(arena);
    assert!(synthesize(arena, &named, None).is_none());
    assert!(synthesize(arena, &named, Some(string)).is_some());
}

#[test]
fn test_resolve_annotation_of_typedef() {
    let source = "/**\n * @typedef {Object} Foo\n * @property {Number} bar\n */";
    let (parser, root) = parse(source);
    let arena = parser.get_arena();
    let checker = TypeChecker::new(arena, root, "test.ts");
    let container = find_enclosing_type_container(arena, root, 7).expect("container");
    assert!(matches!(container, TypeContainer::TypeAlias(_)));

    let (type_node, type_id) =
        resolve_annotation(arena, source, container, &checker).expect("annotation");
    assert!(matches!(type_node, TypeNode::Object(_)));
    assert_eq!(checker.type_to_string(type_id), "{ bar: number; }");
}

#[test]
fn test_resolve_annotation_with_empty_slot() {
    let source = "let x = 1;";
    let (parser, root) = parse(source);
    let arena = parser.get_arena();
    let checker = TypeChecker::new(arena, root, "test.ts");
    let container = find_enclosing_type_container(arena, root, 4).expect("container");
    assert!(matches!(container, TypeContainer::Variable(_)));
    assert!(resolve_annotation(arena, source, container, &checker).is_none());
}

#[test]
fn test_resolve_annotation_of_variable() {
    let source = "let x: string | null;";
    let (parser, root) = parse(source);
    let arena = parser.get_arena();
    let checker = TypeChecker::new(arena, root, "test.ts");
    let container = find_enclosing_type_container(arena, root, 4).expect("container");

    let (type_node, type_id) =
        resolve_annotation(arena, source, container, &checker).expect("annotation");
    assert!(matches!(type_node, TypeNode::Union(ref members) if members.len() == 2));
    assert_eq!(checker.type_to_string(type_id), "string | null");
}

#[test]
fn test_resolve_annotation_keeps_unmodelled_text() {
    let source = "/** @typedef {function(string): number} F */";
    let (parser, root) = parse(source);
    let arena = parser.get_arena();
    let checker = TypeChecker::new(arena, root, "test.ts");
    let container = find_enclosing_type_container(arena, root, 4).expect("container");

    let (type_node, _) =
        resolve_annotation(arena, source, container, &checker).expect("annotation");
    assert_eq!(type_node, TypeNode::Raw("function(string): number".to_string()));
}
