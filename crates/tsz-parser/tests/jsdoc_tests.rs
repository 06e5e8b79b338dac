//! Tests for `JSDoc` comment parsing and attachment.

use crate::parser::node_access::NodeAccess;
use crate::parser::syntax_kind_ext as ext;
use crate::parser::{NodeArena, NodeIndex, ParserState, node_flags};

fn parse(source: &str) -> (ParserState, NodeIndex) {
    let mut parser = ParserState::new("test.ts".to_string(), source.to_string());
    let root = parser.parse_source_file();
    (parser, root)
}

fn first_statement(arena: &NodeArena, root: NodeIndex) -> NodeIndex {
    let node = arena.get(root).expect("root");
    arena.get_source_file(node).expect("source file").statements.nodes[0]
}

fn end_of_file_token(arena: &NodeArena, root: NodeIndex) -> NodeIndex {
    let node = arena.get(root).expect("root");
    arena
        .get_source_file(node)
        .expect("source file")
        .end_of_file_token
}

fn tags_of(arena: &NodeArena, jsdoc: NodeIndex) -> Vec<NodeIndex> {
    let node = arena.get(jsdoc).expect("jsdoc");
    arena.get_jsdoc_comment(node).expect("jsdoc data").tags.nodes.clone()
}

#[test]
fn test_typedef_with_property_tags_builds_type_literal() {
    let source = "/**\n * @typedef {Object} Foo\n * @property {Number} bar\n */";
    let (parser, root) = parse(source);
    let arena = parser.get_arena();

    // No declaration follows: the block attaches to the end-of-file token.
    let eof = end_of_file_token(arena, root);
    let docs = arena.get_jsdoc(eof);
    assert_eq!(docs.len(), 1);
    assert_eq!(arena.parent_of(docs[0]), eof);
    assert_eq!(arena.pos_end(docs[0]), Some((0, source.len() as u32)));

    let tags = tags_of(arena, docs[0]);
    assert_eq!(tags.len(), 1);
    let typedef = tags[0];
    assert_eq!(arena.kind(typedef), Some(ext::JSDOC_TYPEDEF_TAG));
    assert_eq!(arena.pos_end(typedef), Some((7, 54)));
    assert_eq!(&source[7..8], "@");

    let data = arena
        .get_jsdoc_tag(arena.get(typedef).expect("tag"))
        .expect("tag data");
    assert_eq!(arena.get_identifier_text(data.tag_name), Some("typedef"));
    assert_eq!(arena.get_identifier_text(data.name), Some("Foo"));
    assert_eq!(data.name, data.full_name);
    assert_eq!(arena.kind(data.type_expression), Some(ext::JSDOC_TYPE_LITERAL));

    let literal = arena
        .get_jsdoc_type_literal(arena.get(data.type_expression).expect("literal"))
        .expect("literal data");
    assert!(!literal.is_array_type);
    assert_eq!(literal.property_tags.len(), 1);

    let property = literal.property_tags.nodes[0];
    assert_eq!(arena.kind(property), Some(ext::JSDOC_PROPERTY_TAG));
    assert_eq!(arena.parent_of(property), data.type_expression);
    let property_data = arena
        .get_jsdoc_tag(arena.get(property).expect("property"))
        .expect("property data");
    assert_eq!(arena.get_identifier_text(property_data.name), Some("bar"));
    assert_eq!(
        arena.kind(property_data.type_expression),
        Some(ext::JSDOC_TYPE_EXPRESSION)
    );
    assert_eq!(arena.get_node_text(property_data.type_expression, source), "{Number}");

    assert!(arena.get(typedef).expect("tag").has_flag(node_flags::JSDOC));
    assert!(parser.get_diagnostics().is_empty());
}

#[test]
fn test_jsdoc_attaches_to_next_declaration() {
    let source = "/** @typedef {string} A */\nconst x = 1;";
    let (parser, root) = parse(source);
    let arena = parser.get_arena();
    let stmt = first_statement(arena, root);

    let docs = arena.get_jsdoc(stmt);
    assert_eq!(docs.len(), 1);
    assert_eq!(arena.parent_of(docs[0]), stmt);
    assert!(arena.get_jsdoc(end_of_file_token(arena, root)).is_empty());
    assert_eq!(arena.get_start_with_jsdoc(stmt), Some(0));

    let tags = tags_of(arena, docs[0]);
    let data = arena
        .get_jsdoc_tag(arena.get(tags[0]).expect("tag"))
        .expect("tag data");
    assert_eq!(
        arena.kind(data.type_expression),
        Some(ext::JSDOC_TYPE_EXPRESSION)
    );
    assert_eq!(arena.get_node_text(tags[0], source), "@typedef {string} A");
}

#[test]
fn test_only_the_nearest_blocks_attach() {
    let source = "/** one */\ntype A = string;\n/** two */\n/** three */\ntype B = number;";
    let (parser, root) = parse(source);
    let arena = parser.get_arena();
    let node = arena.get(root).expect("root");
    let stmts = &arena.get_source_file(node).expect("file").statements.nodes;
    assert_eq!(arena.get_jsdoc(stmts[0]).len(), 1);
    assert_eq!(arena.get_jsdoc(stmts[1]).len(), 2);

    let comment = |doc: NodeIndex| {
        arena
            .get_jsdoc_comment(arena.get(doc).expect("doc"))
            .expect("data")
            .comment
            .clone()
    };
    assert_eq!(comment(arena.get_jsdoc(stmts[1])[0]), "two");
    assert_eq!(comment(arena.get_jsdoc(stmts[1])[1]), "three");
}

#[test]
fn test_dotted_typedef_name() {
    let source = "/** @typedef {number} ns.inner.Id */\nlet a;";
    let (parser, root) = parse(source);
    let arena = parser.get_arena();
    let stmt = first_statement(arena, root);
    let tags = tags_of(arena, arena.get_jsdoc(stmt)[0]);
    let data = arena
        .get_jsdoc_tag(arena.get(tags[0]).expect("tag"))
        .expect("tag data");

    assert_ne!(data.name, data.full_name);
    assert_eq!(arena.kind(data.full_name), Some(ext::QUALIFIED_NAME));
    assert_eq!(
        arena.get_entity_name_text(data.full_name).as_deref(),
        Some("ns.inner.Id")
    );
    assert_eq!(arena.get_identifier_text(data.name), Some("Id"));
    assert_eq!(arena.parent_of(data.full_name), tags[0]);
}

#[test]
fn test_typedef_without_type_collects_properties() {
    let source = "/**\n * @typedef Point\n * @property {number} x\n * @prop {number} [y] optional\n */\nlet p;";
    let (parser, root) = parse(source);
    let arena = parser.get_arena();
    let stmt = first_statement(arena, root);
    let tags = tags_of(arena, arena.get_jsdoc(stmt)[0]);
    assert_eq!(tags.len(), 1);

    let data = arena
        .get_jsdoc_tag(arena.get(tags[0]).expect("tag"))
        .expect("tag data");
    let literal = arena
        .get_jsdoc_type_literal(arena.get(data.type_expression).expect("literal"))
        .expect("literal data");
    assert_eq!(literal.property_tags.len(), 2);

    let y = arena
        .get_jsdoc_tag(arena.get(literal.property_tags.nodes[1]).expect("y"))
        .expect("y data");
    assert!(y.is_bracketed);
    assert_eq!(arena.get_identifier_text(y.name), Some("y"));
    assert_eq!(y.comment, "optional");
}

#[test]
fn test_non_object_typedef_leaves_properties_as_siblings() {
    let source = "/**\n * @typedef {string} S\n * @property {number} x\n */\nlet s;";
    let (parser, root) = parse(source);
    let arena = parser.get_arena();
    let stmt = first_statement(arena, root);
    let tags = tags_of(arena, arena.get_jsdoc(stmt)[0]);
    let kinds: Vec<u16> = tags.iter().filter_map(|&t| arena.kind(t)).collect();
    assert_eq!(kinds, vec![ext::JSDOC_TYPEDEF_TAG, ext::JSDOC_PROPERTY_TAG]);
}

#[test]
fn test_typedef_missing_name() {
    let source = "/** @typedef {string} */\nlet a;";
    let (parser, root) = parse(source);
    let arena = parser.get_arena();
    let stmt = first_statement(arena, root);
    let tags = tags_of(arena, arena.get_jsdoc(stmt)[0]);
    let data = arena
        .get_jsdoc_tag(arena.get(tags[0]).expect("tag"))
        .expect("tag data");
    assert!(data.name.is_none());
    assert!(data.full_name.is_none());
    assert!(data.type_expression.is_some());
}

#[test]
fn test_other_tag_kinds() {
    let source = "/**\n * Adds numbers.\n * @param {number} a first\n * @returns {number}\n * @template T, U\n * @see other\n */\nfunction add(a) {}";
    let (parser, root) = parse(source);
    let arena = parser.get_arena();
    let stmt = first_statement(arena, root);
    let doc = arena.get_jsdoc(stmt)[0];
    let jsdoc = arena
        .get_jsdoc_comment(arena.get(doc).expect("doc"))
        .expect("doc data");
    assert_eq!(jsdoc.comment, "Adds numbers.");

    let tags = tags_of(arena, doc);
    let kinds: Vec<u16> = tags.iter().filter_map(|&t| arena.kind(t)).collect();
    assert_eq!(
        kinds,
        vec![
            ext::JSDOC_PARAMETER_TAG,
            ext::JSDOC_RETURN_TAG,
            ext::JSDOC_TEMPLATE_TAG,
            ext::JSDOC_TAG,
        ]
    );

    let param = arena
        .get_jsdoc_tag(arena.get(tags[0]).expect("param"))
        .expect("param data");
    assert_eq!(param.comment, "first");
    let template = arena
        .get_jsdoc_tag(arena.get(tags[2]).expect("template"))
        .expect("template data");
    assert_eq!(template.type_parameters.as_ref().map(|l| l.len()), Some(2));
}

#[test]
fn test_name_first_param() {
    let source = "/** @param a {string} */\nfunction f(a) {}";
    let (parser, root) = parse(source);
    let arena = parser.get_arena();
    let stmt = first_statement(arena, root);
    let tags = tags_of(arena, arena.get_jsdoc(stmt)[0]);
    let param = arena
        .get_jsdoc_tag(arena.get(tags[0]).expect("param"))
        .expect("param data");
    assert!(param.is_name_first);
    assert!(param.type_expression.is_some());
}

#[test]
fn test_at_sign_inside_text_is_not_a_tag() {
    let source = "/** mail me@example.com */\nlet a;";
    let (parser, root) = parse(source);
    let arena = parser.get_arena();
    let stmt = first_statement(arena, root);
    assert!(tags_of(arena, arena.get_jsdoc(stmt)[0]).is_empty());
}

#[test]
fn test_jsdoc_type_forms() {
    let source = "/**\n * @type {*}\n * @type {?}\n * @type {?number}\n * @type {number=}\n * @type {Array.<string>}\n * @type {...number}\n */\nlet a;";
    let (parser, root) = parse(source);
    let arena = parser.get_arena();
    let stmt = first_statement(arena, root);
    let tags = tags_of(arena, arena.get_jsdoc(stmt)[0]);
    let inner_kinds: Vec<u16> = tags
        .iter()
        .filter_map(|&tag| {
            let data = arena.get_jsdoc_tag(arena.get(tag)?)?;
            let expression = arena.get_wrapped_type(arena.get(data.type_expression)?)?;
            arena.kind(expression.type_node)
        })
        .collect();
    assert_eq!(
        inner_kinds,
        vec![
            ext::JSDOC_ALL_TYPE,
            ext::JSDOC_UNKNOWN_TYPE,
            ext::JSDOC_NULLABLE_TYPE,
            ext::JSDOC_OPTIONAL_TYPE,
            ext::TYPE_REFERENCE,
            ext::JSDOC_VARIADIC_TYPE,
        ]
    );
    assert!(parser.get_diagnostics().is_empty());
}

#[test]
fn test_malformed_jsdoc_types_report_diagnostics() {
    let (parser, _) = parse("/** @type {} */\nlet a;");
    let codes: Vec<u32> = parser.get_diagnostics().iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![1110]);

    let (parser, _) = parse("/** @type {string */\nlet a;");
    let codes: Vec<u32> = parser.get_diagnostics().iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![1005]);
}

#[test]
fn test_unterminated_comment_still_parses_tags() {
    let source = "/** @typedef {string} A";
    let (parser, root) = parse(source);
    let arena = parser.get_arena();
    let eof = end_of_file_token(arena, root);
    let docs = arena.get_jsdoc(eof);
    assert_eq!(docs.len(), 1);
    let tags = tags_of(arena, docs[0]);
    assert_eq!(arena.kind(tags[0]), Some(ext::JSDOC_TYPEDEF_TAG));
}

#[test]
fn test_plain_block_comments_are_ignored() {
    let source = "/* not jsdoc */\n// line\ntype A = string;";
    let (parser, root) = parse(source);
    let arena = parser.get_arena();
    let stmt = first_statement(arena, root);
    assert!(arena.get_jsdoc(stmt).is_empty());
}
