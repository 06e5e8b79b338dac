//! Tests for navigation, type containers, typedef views and type lowering.

use crate::parser::factory::{PropertySignature, TypeNode};
use crate::parser::node_access::NodeAccess;
use crate::parser::syntax_kind_ext as ext;
use crate::parser::{NodeArena, NodeIndex, ParserState};
use crate::syntax::jsdoc_tags::{
    any_typedef_tag_on, collect_typedef_tags, find_attached_typedef_tag, has_attached_typedef_tag,
};
use crate::syntax::{
    TypeContainer, find_ancestor, find_enclosing_type_container, get_token_at_position,
    lower_type_node, type_node_from_source,
};
use tsz_scanner::SyntaxKind;

const FOO_TYPEDEF: &str = "/**\n * @typedef {Object} Foo\n * @property {Number} bar\n */";

fn parse(source: &str) -> (NodeArena, NodeIndex) {
    let mut parser = ParserState::new("test.ts".to_string(), source.to_string());
    let root = parser.parse_source_file();
    (parser.into_arena(), root)
}

fn offset_of(source: &str, needle: &str) -> u32 {
    source.find(needle).expect("needle in source") as u32
}

fn keyword(kind: SyntaxKind) -> TypeNode {
    TypeNode::keyword(kind)
}

fn property(name: &str, optional: bool, type_node: TypeNode) -> PropertySignature {
    PropertySignature {
        name: name.to_string(),
        optional,
        type_node,
    }
}

// =========================================================================
// Navigation
// =========================================================================

#[test]
fn test_token_at_tag_start_is_the_tag() {
    let (arena, root) = parse(FOO_TYPEDEF);
    let token = get_token_at_position(&arena, root, offset_of(FOO_TYPEDEF, "@typedef"));
    assert_eq!(arena.kind(token), Some(ext::JSDOC_TYPEDEF_TAG));

    let name = get_token_at_position(&arena, root, offset_of(FOO_TYPEDEF, "Foo"));
    assert_eq!(arena.get_identifier_text(name), Some("Foo"));
    assert_eq!(arena.parent_of(name), token);
}

#[test]
fn test_token_at_position_outside_children_is_root() {
    let source = "type A = string;   ";
    let (arena, root) = parse(source);
    assert_eq!(get_token_at_position(&arena, root, source.len() as u32 - 1), root);
}

#[test]
fn test_find_ancestor_includes_start() {
    let source = "type A = string | number;";
    let (arena, root) = parse(source);
    let token = get_token_at_position(&arena, root, offset_of(source, "number"));
    assert_eq!(arena.kind(token), Some(SyntaxKind::NumberKeyword as u16));

    assert_eq!(find_ancestor(&arena, token, |_| true), Some(token));
    let union = find_ancestor(&arena, token, |n| arena.kind(n) == Some(ext::UNION_TYPE));
    assert_eq!(arena.parent_of(token), union.expect("union"));
    assert_eq!(find_ancestor(&arena, token, |_| false), None);
}

// =========================================================================
// Type containers
// =========================================================================

#[test]
fn test_typedef_is_a_type_alias_container() {
    let (arena, root) = parse(FOO_TYPEDEF);
    let container = find_enclosing_type_container(&arena, root, offset_of(FOO_TYPEDEF, "@typedef"))
        .expect("container");
    let TypeContainer::TypeAlias(tag) = container else {
        panic!("expected a type alias container, got {container:?}");
    };
    assert_eq!(arena.kind(tag), Some(ext::JSDOC_TYPEDEF_TAG));
    let slot = container.type_node(&arena).expect("slot");
    assert_eq!(arena.kind(slot), Some(ext::JSDOC_TYPE_LITERAL));

    // From a property name inside the typedef, the walk reaches the same tag.
    let from_property = find_enclosing_type_container(&arena, root, offset_of(FOO_TYPEDEF, "bar"));
    assert_eq!(from_property, Some(container));
}

#[test]
fn test_nearest_container_wins() {
    let source = "let x: number = y as string;";
    let (arena, root) = parse(source);

    let cast = find_enclosing_type_container(&arena, root, offset_of(source, "string"))
        .expect("cast");
    assert!(matches!(cast, TypeContainer::TypeAssertion(_)));
    assert_eq!(
        cast.type_node(&arena).and_then(|n| arena.kind(n)),
        Some(SyntaxKind::StringKeyword as u16)
    );

    let variable = find_enclosing_type_container(&arena, root, offset_of(source, "number"))
        .expect("variable");
    assert!(matches!(variable, TypeContainer::Variable(_)));
}

#[test]
fn test_signature_members() {
    let source = "interface I {\n  m(a: string): void;\n  [k: string]: number;\n  p?: boolean;\n}";
    let (arena, root) = parse(source);

    let parameter = find_enclosing_type_container(&arena, root, offset_of(source, "string)"));
    assert!(matches!(parameter, Some(TypeContainer::Parameter(_))));

    let method = find_enclosing_type_container(&arena, root, offset_of(source, "void"));
    assert!(matches!(method, Some(TypeContainer::Method(_))));

    let index = find_enclosing_type_container(&arena, root, offset_of(source, "number"));
    assert!(matches!(index, Some(TypeContainer::Signature(_))));

    let prop = find_enclosing_type_container(&arena, root, offset_of(source, "boolean"));
    assert!(matches!(prop, Some(TypeContainer::Property(_))));
}

#[test]
fn test_class_members_and_functions() {
    let source = "class C {\n  get v(): number { return 1; }\n  x: string;\n}\nfunction f(): boolean { return true; }";
    let (arena, root) = parse(source);

    let accessor = find_enclosing_type_container(&arena, root, offset_of(source, "number"));
    assert!(matches!(accessor, Some(TypeContainer::Accessor(_))));
    let property = find_enclosing_type_container(&arena, root, offset_of(source, "string"));
    assert!(matches!(property, Some(TypeContainer::Property(_))));
    let function = find_enclosing_type_container(&arena, root, offset_of(source, "boolean"));
    assert!(matches!(function, Some(TypeContainer::Function(_))));
}

#[test]
fn test_no_container_outside_the_set() {
    let source = "foo(1);";
    let (arena, root) = parse(source);
    assert_eq!(find_enclosing_type_container(&arena, root, 0), None);

    let source = "/** just text */\nlet a;";
    let (arena, root) = parse(source);
    assert_eq!(
        find_enclosing_type_container(&arena, root, offset_of(source, "just")),
        None
    );
}

#[test]
fn test_empty_slot() {
    let source = "let a = 1;";
    let (arena, root) = parse(source);
    let container = find_enclosing_type_container(&arena, root, offset_of(source, "a"))
        .expect("variable");
    assert_eq!(container.type_node(&arena), None);
}

// =========================================================================
// Typedef views
// =========================================================================

#[test]
fn test_find_attached_typedef_tag() {
    let (arena, root) = parse(FOO_TYPEDEF);
    let tag = get_token_at_position(&arena, root, offset_of(FOO_TYPEDEF, "@typedef"));
    let typedef = find_attached_typedef_tag(&arena, tag).expect("typedef");
    assert_eq!(typedef.node, tag);
    assert_eq!(typedef.full_name_text(&arena).as_deref(), Some("Foo"));
    assert_eq!(typedef.name, typedef.full_name);
    assert!(typedef.has_type_literal(&arena));
    assert_eq!(typedef.property_tags.len(), 1);
    assert_eq!(
        typedef.property_tags[0].name_text(&arena).as_deref(),
        Some("bar")
    );

    let name = get_token_at_position(&arena, root, offset_of(FOO_TYPEDEF, "Foo"));
    assert!(!has_attached_typedef_tag(&arena, name));
    assert!(has_attached_typedef_tag(&arena, tag));
}

#[test]
fn test_any_typedef_tag_on_declaration() {
    let source = "/** @see x */\n/**\n * @param {string} a\n * @typedef {number} First\n * @typedef {string} Second\n */\nfunction f(a) {}";
    let (arena, root) = parse(source);
    let node = arena.get(root).expect("root");
    let stmt = arena.get_source_file(node).expect("file").statements.nodes[0];

    let typedef = any_typedef_tag_on(&arena, stmt).expect("typedef");
    assert_eq!(typedef.full_name_text(&arena).as_deref(), Some("First"));
    assert!(!typedef.has_type_literal(&arena));
    assert!(typedef.property_tags.is_empty());

    assert_eq!(collect_typedef_tags(&arena).len(), 2);
    assert!(any_typedef_tag_on(&arena, root).is_none());
}

// =========================================================================
// Lowering
// =========================================================================

fn lower_first_typedef(source: &str) -> Option<TypeNode> {
    let (arena, _) = parse(source);
    let tag = collect_typedef_tags(&arena)[0];
    let data = arena.get_jsdoc_tag(arena.get(tag)?)?;
    lower_type_node(&arena, data.type_expression)
}

#[test]
fn test_lower_jsdoc_type_literal() {
    assert_eq!(
        lower_first_typedef(FOO_TYPEDEF),
        Some(TypeNode::Object(vec![property(
            "bar",
            false,
            keyword(SyntaxKind::NumberKeyword)
        )]))
    );
}

#[test]
fn test_lower_nested_and_optional_properties() {
    let source = "/**\n * @typedef {Object} Opts\n * @property {Object} inner\n * @property {string} inner.name\n * @property {boolean=} flag\n * @property {String} [label]\n * @property {number} missing.child\n */";
    assert_eq!(
        lower_first_typedef(source),
        Some(TypeNode::Object(vec![
            property(
                "inner",
                false,
                TypeNode::Object(vec![property(
                    "name",
                    false,
                    keyword(SyntaxKind::StringKeyword)
                )])
            ),
            property("flag", true, keyword(SyntaxKind::BooleanKeyword)),
            property("label", true, keyword(SyntaxKind::StringKeyword)),
        ]))
    );
}

#[test]
fn test_lower_jsdoc_spellings() {
    let cases = [
        ("{*}", keyword(SyntaxKind::AnyKeyword)),
        ("{?}", keyword(SyntaxKind::UnknownKeyword)),
        (
            "{?string}",
            TypeNode::Union(vec![
                keyword(SyntaxKind::StringKeyword),
                keyword(SyntaxKind::NullKeyword),
            ]),
        ),
        (
            "{Array.<Number>}",
            TypeNode::array(keyword(SyntaxKind::NumberKeyword)),
        ),
        ("{Array}", TypeNode::array(keyword(SyntaxKind::AnyKeyword))),
        (
            "{Array<string>}",
            TypeNode::Reference {
                name: "Array".to_string(),
                type_arguments: vec![keyword(SyntaxKind::StringKeyword)],
            },
        ),
        (
            "{Promise<Boolean>}",
            TypeNode::Reference {
                name: "Promise".to_string(),
                type_arguments: vec![keyword(SyntaxKind::BooleanKeyword)],
            },
        ),
        ("{ns.Thing}", TypeNode::reference("ns.Thing")),
        ("{'a'}", TypeNode::Literal("\"a\"".to_string())),
        ("{-1}", TypeNode::Literal("-1".to_string())),
    ];
    for (type_text, expected) in cases {
        let source = format!("/** @typedef {type_text} T */");
        assert_eq!(
            lower_first_typedef(&source),
            Some(expected),
            "lowering {type_text}"
        );
    }
}

#[test]
fn test_unmodelled_types_keep_their_text() {
    let cases = [
        (
            "/** @typedef {function(string): number} F */",
            "function(string): number",
        ),
        ("/** @typedef {import('./x').Y} I */", "import('./x').Y"),
        (
            "/**\n * @typedef {function(\n *   string): void} G\n */",
            "function( string): void",
        ),
    ];
    for (source, expected) in cases {
        let (arena, _) = parse(source);
        let tag = collect_typedef_tags(&arena)[0];
        let slot = arena
            .get(tag)
            .and_then(|node| arena.get_jsdoc_tag(node))
            .expect("typedef data")
            .type_expression;
        assert_eq!(lower_type_node(&arena, slot), None, "lowering {source}");
        assert_eq!(
            type_node_from_source(&arena, slot, source),
            Some(TypeNode::Raw(expected.to_string())),
            "text of {source}"
        );
    }
}

#[test]
fn test_lower_native_type_literal() {
    let source = "type T = { a: string; m(x: number): void } | null;";
    let (arena, root) = parse(source);
    let node = arena.get(root).expect("root");
    let stmt = arena.get_source_file(node).expect("file").statements.nodes[0];
    let alias = arena.get_type_alias(arena.get(stmt).expect("alias")).expect("data");

    let lowered = lower_type_node(&arena, alias.type_node).expect("lowered");
    let TypeNode::Union(members) = lowered else {
        panic!("expected a union, got {lowered:?}");
    };
    assert_eq!(members[1], keyword(SyntaxKind::NullKeyword));
    let TypeNode::Object(props) = &members[0] else {
        panic!("expected an object, got {:?}", members[0]);
    };
    assert_eq!(props.len(), 2);
    assert!(matches!(props[1].type_node, TypeNode::Function { .. }));
}

#[test]
fn test_lower_mapped_type_is_none() {
    let source = "type M = { [K in Keys]: V };";
    let (arena, root) = parse(source);
    let node = arena.get(root).expect("root");
    let stmt = arena.get_source_file(node).expect("file").statements.nodes[0];
    let alias = arena.get_type_alias(arena.get(stmt).expect("alias")).expect("data");
    assert_eq!(lower_type_node(&arena, alias.type_node), None);
}
