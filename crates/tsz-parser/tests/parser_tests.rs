//! Tests for the declaration parser.

use crate::parser::node_access::NodeAccess;
use crate::parser::syntax_kind_ext as ext;
use crate::parser::{NodeIndex, ParserState, node_flags};
use tsz_scanner::SyntaxKind;

fn parse(source: &str) -> (ParserState, NodeIndex) {
    let mut parser = ParserState::new("test.ts".to_string(), source.to_string());
    let root = parser.parse_source_file();
    (parser, root)
}

fn statements(parser: &ParserState, root: NodeIndex) -> Vec<NodeIndex> {
    let arena = parser.get_arena();
    let node = arena.get(root).expect("root");
    arena
        .get_source_file(node)
        .expect("source file")
        .statements
        .nodes
        .clone()
}

#[test]
fn test_type_alias_declaration() {
    let (parser, root) = parse("type Pair<T> = { first: T; second?: T };");
    let arena = parser.get_arena();
    let stmts = statements(&parser, root);
    assert_eq!(stmts.len(), 1);

    let alias_node = arena.get(stmts[0]).expect("alias");
    assert_eq!(alias_node.kind, ext::TYPE_ALIAS_DECLARATION);
    let alias = arena.get_type_alias(alias_node).expect("alias data");
    assert_eq!(arena.get_identifier_text(alias.name), Some("Pair"));
    assert_eq!(alias.type_parameters.as_ref().map(|l| l.len()), Some(1));
    assert_eq!(arena.kind(alias.type_node), Some(ext::TYPE_LITERAL));

    let literal = arena
        .get_type_literal(arena.get(alias.type_node).expect("literal"))
        .expect("literal data");
    assert_eq!(literal.members.len(), 2);
    let second = arena
        .get_signature(arena.get(literal.members.nodes[1]).expect("member"))
        .expect("signature");
    assert!(second.question_token);
    assert!(parser.get_diagnostics().is_empty());
}

#[test]
fn test_variable_statement_flags_and_annotation() {
    let (parser, root) = parse("const a: string[] = [], b = 1;\nlet c;");
    let arena = parser.get_arena();
    let stmts = statements(&parser, root);
    assert_eq!(stmts.len(), 2);

    let first = arena.get(stmts[0]).expect("first");
    assert!(first.has_flag(node_flags::CONST));
    let data = arena.get_variable(first).expect("variable");
    assert_eq!(data.declarations.len(), 2);

    let decl = arena
        .get_variable_declaration(arena.get(data.declarations.nodes[0]).expect("decl"))
        .expect("decl data");
    assert_eq!(arena.kind(decl.type_annotation), Some(ext::ARRAY_TYPE));
    assert_eq!(
        arena.kind(decl.initializer),
        Some(ext::ARRAY_LITERAL_EXPRESSION)
    );

    let second = arena.get(stmts[1]).expect("second");
    assert!(second.has_flag(node_flags::LET));
}

#[test]
fn test_function_declaration_with_parameters() {
    let (parser, root) = parse("function f(a: number, b?: string, ...rest: any[]): void { return; }");
    let arena = parser.get_arena();
    let stmts = statements(&parser, root);
    let func = arena
        .get_function(arena.get(stmts[0]).expect("function"))
        .expect("function data");
    assert_eq!(arena.get_identifier_text(func.name), Some("f"));
    assert_eq!(func.parameters.len(), 3);
    assert_eq!(
        arena.kind(func.type_annotation),
        Some(SyntaxKind::VoidKeyword as u16)
    );

    let rest = arena
        .get_parameter(arena.get(func.parameters.nodes[2]).expect("rest"))
        .expect("parameter");
    assert!(rest.dot_dot_dot_token);
    let optional = arena
        .get_parameter(arena.get(func.parameters.nodes[1]).expect("optional"))
        .expect("parameter");
    assert!(optional.question_token);
    assert!(parser.get_diagnostics().is_empty());
}

#[test]
fn test_interface_members() {
    let source = "interface I {\n  p: string;\n  m(x: number): void;\n  (): I;\n  new (s: string): I;\n  [key: string]: any;\n  readonly r?: number\n}";
    let (parser, root) = parse(source);
    let arena = parser.get_arena();
    let stmts = statements(&parser, root);
    let iface = arena
        .get_interface(arena.get(stmts[0]).expect("interface"))
        .expect("interface data");
    let kinds: Vec<u16> = iface
        .members
        .iter()
        .filter_map(|m| arena.kind(m))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ext::PROPERTY_SIGNATURE,
            ext::METHOD_SIGNATURE,
            ext::CALL_SIGNATURE,
            ext::CONSTRUCT_SIGNATURE,
            ext::INDEX_SIGNATURE,
            ext::PROPERTY_SIGNATURE,
        ]
    );
    assert!(parser.get_diagnostics().is_empty());
}

#[test]
fn test_class_members() {
    let source = "class C extends Base {\n  x: number = 1;\n  m(): string { return \"\"; }\n  get v(): number { return 1; }\n  set v(value: number) {}\n}";
    let (parser, root) = parse(source);
    let arena = parser.get_arena();
    let stmts = statements(&parser, root);
    let class = arena
        .get_class(arena.get(stmts[0]).expect("class"))
        .expect("class data");
    assert_eq!(class.heritage_clauses.as_ref().map(|h| h.len()), Some(1));
    let kinds: Vec<u16> = class.members.iter().filter_map(|m| arena.kind(m)).collect();
    assert_eq!(
        kinds,
        vec![
            ext::PROPERTY_DECLARATION,
            ext::METHOD_DECLARATION,
            ext::GET_ACCESSOR,
            ext::SET_ACCESSOR,
        ]
    );
    assert!(parser.get_diagnostics().is_empty());
}

#[test]
fn test_as_expression_and_type_assertion() {
    let (parser, root) = parse("const a = x as string;\nconst b = <number>y;");
    let arena = parser.get_arena();
    let stmts = statements(&parser, root);
    let initializer_kind = |stmt: NodeIndex| {
        let var = arena.get_variable(arena.get(stmt)?)?;
        let decl = arena.get_variable_declaration(arena.get(var.declarations.nodes[0])?)?;
        arena.kind(decl.initializer)
    };
    assert_eq!(initializer_kind(stmts[0]), Some(ext::AS_EXPRESSION));
    assert_eq!(
        initializer_kind(stmts[1]),
        Some(ext::TYPE_ASSERTION_EXPRESSION)
    );
}

#[test]
fn test_mapped_type() {
    let (parser, root) = parse("type M = { readonly [K in Keys]?: V };");
    let arena = parser.get_arena();
    let stmts = statements(&parser, root);
    let alias = arena
        .get_type_alias(arena.get(stmts[0]).expect("alias"))
        .expect("alias data");
    let mapped = arena
        .get_mapped_type(arena.get(alias.type_node).expect("mapped"))
        .expect("mapped data");
    assert!(mapped.readonly_token);
    assert!(mapped.question_token);
    assert_eq!(
        arena.kind(mapped.type_node),
        Some(ext::TYPE_REFERENCE)
    );
}

#[test]
fn test_unknown_statement_reports_and_recovers() {
    let (parser, root) = parse("@@@;\ntype T = string;");
    let arena = parser.get_arena();
    let diagnostics = parser.get_diagnostics();
    assert!(diagnostics.iter().any(|d| d.code == 1128));

    let stmts = statements(&parser, root);
    let last = *stmts.last().expect("statements");
    assert_eq!(arena.kind(last), Some(ext::TYPE_ALIAS_DECLARATION));
}

#[test]
fn test_missing_type_reports_type_expected() {
    let (parser, _) = parse("let x: = 1;");
    let codes: Vec<u32> = parser.get_diagnostics().iter().map(|d| d.code).collect();
    assert!(codes.contains(&1110), "got {codes:?}");
}

#[test]
fn test_parent_links() {
    let (parser, root) = parse("type A = B | C[];");
    let arena = parser.get_arena();
    let stmts = statements(&parser, root);
    assert_eq!(arena.parent_of(stmts[0]), root);

    let alias = arena
        .get_type_alias(arena.get(stmts[0]).expect("alias"))
        .expect("alias data");
    assert_eq!(arena.parent_of(alias.type_node), stmts[0]);
    for child in arena.get_children(alias.type_node) {
        assert_eq!(arena.parent_of(child), alias.type_node);
    }
}

#[test]
fn test_node_spans_exclude_trivia() {
    let source = "  type   A = string ;  ";
    let (parser, root) = parse(source);
    let arena = parser.get_arena();
    let stmts = statements(&parser, root);
    assert_eq!(arena.get_node_text(stmts[0], source), "type   A = string ;");
}
