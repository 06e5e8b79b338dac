//! Tests for printing synthesized type aliases and type nodes.

use tsz_common::NewLineKind;
use tsz_emitter::{PrinterOptions, TypePrinter};
use tsz_parser::parser::factory::{ParameterNode, PropertySignature, TypeAliasDeclaration, TypeNode};
use tsz_scanner::SyntaxKind;

fn prop(name: &str, type_node: TypeNode) -> PropertySignature {
    PropertySignature {
        name: name.to_string(),
        optional: false,
        type_node,
    }
}

fn print(type_node: &TypeNode) -> String {
    TypePrinter::new(PrinterOptions::default()).print_type(type_node)
}

#[test]
fn test_alias_with_object_members() {
    let declaration = TypeAliasDeclaration::new(
        "Foo",
        Vec::new(),
        TypeNode::Object(vec![prop("bar", TypeNode::keyword(SyntaxKind::NumberKeyword))]),
    );
    let text = TypePrinter::new(PrinterOptions::default()).print_type_alias(&declaration);
    assert_eq!(text, "type Foo = {\n  bar: number\n};");
}

#[test]
fn test_members_separated_without_trailing_separator() {
    let object = TypeNode::Object(vec![
        prop("a", TypeNode::keyword(SyntaxKind::StringKeyword)),
        PropertySignature {
            name: "b".to_string(),
            optional: true,
            type_node: TypeNode::keyword(SyntaxKind::BooleanKeyword),
        },
    ]);
    assert_eq!(print(&object), "{\n  a: string;\n  b?: boolean\n}");
}

#[test]
fn test_nested_object_indentation() {
    let object = TypeNode::Object(vec![prop(
        "outer",
        TypeNode::Object(vec![prop("inner", TypeNode::keyword(SyntaxKind::AnyKeyword))]),
    )]);
    assert_eq!(print(&object), "{\n  outer: {\n    inner: any\n  }\n}");
}

#[test]
fn test_empty_object() {
    assert_eq!(print(&TypeNode::Object(Vec::new())), "{}");
}

#[test]
fn test_indent_size_and_crlf() {
    let options = PrinterOptions {
        indent_size: 4,
        use_tabs: false,
        new_line: NewLineKind::CarriageReturnLineFeed,
    };
    let object = TypeNode::Object(vec![prop("x", TypeNode::keyword(SyntaxKind::NumberKeyword))]);
    let text = TypePrinter::new(options).print_type(&object);
    assert_eq!(text, "{\r\n    x: number\r\n}");
}

#[test]
fn test_tab_indentation() {
    let options = PrinterOptions {
        use_tabs: true,
        ..PrinterOptions::default()
    };
    let object = TypeNode::Object(vec![prop("x", TypeNode::keyword(SyntaxKind::NumberKeyword))]);
    assert_eq!(TypePrinter::new(options).print_type(&object), "{\n\tx: number\n}");
}

#[test]
fn test_generic_alias_header() {
    let declaration =
        TypeAliasDeclaration::new("Pair", vec!["T".to_string(), "U".to_string()], TypeNode::reference("T"));
    let text = TypePrinter::new(PrinterOptions::default()).print_type_alias(&declaration);
    assert_eq!(text, "type Pair<T, U> = T;");
}

#[test]
fn test_unions_and_arrays() {
    let union = TypeNode::Union(vec![
        TypeNode::keyword(SyntaxKind::StringKeyword),
        TypeNode::keyword(SyntaxKind::NullKeyword),
    ]);
    assert_eq!(print(&union), "string | null");
    assert_eq!(print(&TypeNode::array(union)), "(string | null)[]");
    assert_eq!(
        print(&TypeNode::array(TypeNode::keyword(SyntaxKind::NumberKeyword))),
        "number[]"
    );
}

#[test]
fn test_references_with_arguments() {
    let map = TypeNode::Reference {
        name: "Map".to_string(),
        type_arguments: vec![
            TypeNode::keyword(SyntaxKind::StringKeyword),
            TypeNode::reference("ns.Item"),
        ],
    };
    assert_eq!(print(&map), "Map<string, ns.Item>");
}

#[test]
fn test_function_types() {
    let function = TypeNode::Function {
        parameters: vec![
            ParameterNode {
                name: "a".to_string(),
                optional: true,
                rest: false,
                type_node: Some(TypeNode::keyword(SyntaxKind::NumberKeyword)),
            },
            ParameterNode {
                name: "rest".to_string(),
                optional: false,
                rest: true,
                type_node: None,
            },
        ],
        return_type: Box::new(TypeNode::keyword(SyntaxKind::VoidKeyword)),
    };
    assert_eq!(print(&function), "(a?: number, ...rest) => void");

    let union = TypeNode::Union(vec![function, TypeNode::keyword(SyntaxKind::UndefinedKeyword)]);
    assert_eq!(print(&union), "((a?: number, ...rest) => void) | undefined");
}

#[test]
fn test_literals_and_operators() {
    let keys = TypeNode::Operator {
        operator: SyntaxKind::KeyOfKeyword,
        type_node: Box::new(TypeNode::reference("Foo")),
    };
    assert_eq!(print(&keys), "keyof Foo");

    let literals = TypeNode::Union(vec![
        TypeNode::Literal("\"a\"".to_string()),
        TypeNode::Literal("1".to_string()),
    ]);
    assert_eq!(print(&literals), "\"a\" | 1");
    assert_eq!(
        print(&TypeNode::Parenthesized(Box::new(TypeNode::reference("T")))),
        "(T)"
    );
}

#[test]
fn test_raw_text_is_printed_verbatim() {
    let declaration = TypeAliasDeclaration::new(
        "F",
        Vec::new(),
        TypeNode::Raw("function(string): number".to_string()),
    );
    let text = TypePrinter::new(PrinterOptions::default()).print_type_alias(&declaration);
    assert_eq!(text, "type F = function(string): number;");
}

#[test]
fn test_printer_reuse_starts_fresh() {
    let mut printer = TypePrinter::new(PrinterOptions::default());
    let first = printer.print_type(&TypeNode::reference("A"));
    let second = printer.print_type(&TypeNode::reference("B"));
    assert_eq!(first, "A");
    assert_eq!(second, "B");
}
