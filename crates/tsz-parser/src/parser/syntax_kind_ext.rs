//! Node kinds created by the parser.
//!
//! Token kinds come from `tsz_scanner::SyntaxKind`; these constants continue
//! the numbering above `SyntaxKind::LAST_TOKEN`. Keyword type nodes reuse the
//! keyword's token kind (`SyntaxKind::StringKeyword` etc.).

use tsz_scanner::SyntaxKind;

const BASE: u16 = SyntaxKind::LAST_TOKEN as u16 + 1;

// Names
pub const QUALIFIED_NAME: u16 = BASE;

// Signature elements
pub const TYPE_PARAMETER: u16 = BASE + 1;
pub const PARAMETER: u16 = BASE + 2;

// Type members
pub const PROPERTY_SIGNATURE: u16 = BASE + 3;
pub const PROPERTY_DECLARATION: u16 = BASE + 4;
pub const METHOD_SIGNATURE: u16 = BASE + 5;
pub const METHOD_DECLARATION: u16 = BASE + 6;
pub const GET_ACCESSOR: u16 = BASE + 7;
pub const SET_ACCESSOR: u16 = BASE + 8;
pub const CALL_SIGNATURE: u16 = BASE + 9;
pub const CONSTRUCT_SIGNATURE: u16 = BASE + 10;
pub const INDEX_SIGNATURE: u16 = BASE + 11;

// Types
pub const TYPE_REFERENCE: u16 = BASE + 12;
pub const FUNCTION_TYPE: u16 = BASE + 13;
pub const TYPE_LITERAL: u16 = BASE + 14;
pub const ARRAY_TYPE: u16 = BASE + 15;
pub const UNION_TYPE: u16 = BASE + 16;
pub const INTERSECTION_TYPE: u16 = BASE + 17;
pub const PARENTHESIZED_TYPE: u16 = BASE + 18;
pub const TYPE_OPERATOR: u16 = BASE + 19;
pub const MAPPED_TYPE: u16 = BASE + 20;
pub const LITERAL_TYPE: u16 = BASE + 21;

// Expressions
pub const PARENTHESIZED_EXPRESSION: u16 = BASE + 22;
pub const OBJECT_LITERAL_EXPRESSION: u16 = BASE + 23;
pub const ARRAY_LITERAL_EXPRESSION: u16 = BASE + 24;
pub const PROPERTY_ACCESS_EXPRESSION: u16 = BASE + 25;
pub const CALL_EXPRESSION: u16 = BASE + 26;
pub const BINARY_EXPRESSION: u16 = BASE + 27;
pub const PREFIX_UNARY_EXPRESSION: u16 = BASE + 28;
pub const AS_EXPRESSION: u16 = BASE + 29;
pub const TYPE_ASSERTION_EXPRESSION: u16 = BASE + 30;
pub const ELEMENT_ACCESS_EXPRESSION: u16 = BASE + 59;

// Statements and declarations
pub const BLOCK: u16 = BASE + 31;
pub const VARIABLE_STATEMENT: u16 = BASE + 32;
pub const EXPRESSION_STATEMENT: u16 = BASE + 33;
pub const RETURN_STATEMENT: u16 = BASE + 34;
pub const EMPTY_STATEMENT: u16 = BASE + 35;
pub const VARIABLE_DECLARATION: u16 = BASE + 36;
pub const FUNCTION_DECLARATION: u16 = BASE + 37;
pub const CLASS_DECLARATION: u16 = BASE + 38;
pub const INTERFACE_DECLARATION: u16 = BASE + 39;
pub const TYPE_ALIAS_DECLARATION: u16 = BASE + 40;
pub const HERITAGE_CLAUSE: u16 = BASE + 41;

pub const SOURCE_FILE: u16 = BASE + 42;

// JSDoc
pub const JSDOC_TYPE_EXPRESSION: u16 = BASE + 43;
pub const JSDOC_ALL_TYPE: u16 = BASE + 44;
pub const JSDOC_UNKNOWN_TYPE: u16 = BASE + 45;
pub const JSDOC_NULLABLE_TYPE: u16 = BASE + 46;
pub const JSDOC_NON_NULLABLE_TYPE: u16 = BASE + 47;
pub const JSDOC_OPTIONAL_TYPE: u16 = BASE + 48;
pub const JSDOC_VARIADIC_TYPE: u16 = BASE + 49;
pub const JSDOC: u16 = BASE + 50;
pub const JSDOC_TYPE_LITERAL: u16 = BASE + 51;
pub const JSDOC_TAG: u16 = BASE + 52;
pub const JSDOC_TYPEDEF_TAG: u16 = BASE + 53;
pub const JSDOC_PROPERTY_TAG: u16 = BASE + 54;
pub const JSDOC_PARAMETER_TAG: u16 = BASE + 55;
pub const JSDOC_RETURN_TAG: u16 = BASE + 56;
pub const JSDOC_TYPE_TAG: u16 = BASE + 57;
pub const JSDOC_TEMPLATE_TAG: u16 = BASE + 58;

pub const FIRST_JSDOC_NODE: u16 = JSDOC_TYPE_EXPRESSION;
pub const LAST_JSDOC_NODE: u16 = JSDOC_TEMPLATE_TAG;
pub const FIRST_JSDOC_TAG: u16 = JSDOC_TAG;

/// Human-readable kind name for logs and test failures.
#[must_use]
pub fn kind_name(kind: u16) -> String {
    let name = match kind {
        QUALIFIED_NAME => "QualifiedName",
        TYPE_PARAMETER => "TypeParameter",
        PARAMETER => "Parameter",
        PROPERTY_SIGNATURE => "PropertySignature",
        PROPERTY_DECLARATION => "PropertyDeclaration",
        METHOD_SIGNATURE => "MethodSignature",
        METHOD_DECLARATION => "MethodDeclaration",
        GET_ACCESSOR => "GetAccessor",
        SET_ACCESSOR => "SetAccessor",
        CALL_SIGNATURE => "CallSignature",
        CONSTRUCT_SIGNATURE => "ConstructSignature",
        INDEX_SIGNATURE => "IndexSignature",
        TYPE_REFERENCE => "TypeReference",
        FUNCTION_TYPE => "FunctionType",
        TYPE_LITERAL => "TypeLiteral",
        ARRAY_TYPE => "ArrayType",
        UNION_TYPE => "UnionType",
        INTERSECTION_TYPE => "IntersectionType",
        PARENTHESIZED_TYPE => "ParenthesizedType",
        TYPE_OPERATOR => "TypeOperator",
        MAPPED_TYPE => "MappedType",
        LITERAL_TYPE => "LiteralType",
        PARENTHESIZED_EXPRESSION => "ParenthesizedExpression",
        OBJECT_LITERAL_EXPRESSION => "ObjectLiteralExpression",
        ARRAY_LITERAL_EXPRESSION => "ArrayLiteralExpression",
        PROPERTY_ACCESS_EXPRESSION => "PropertyAccessExpression",
        ELEMENT_ACCESS_EXPRESSION => "ElementAccessExpression",
        CALL_EXPRESSION => "CallExpression",
        BINARY_EXPRESSION => "BinaryExpression",
        PREFIX_UNARY_EXPRESSION => "PrefixUnaryExpression",
        AS_EXPRESSION => "AsExpression",
        TYPE_ASSERTION_EXPRESSION => "TypeAssertionExpression",
        BLOCK => "Block",
        VARIABLE_STATEMENT => "VariableStatement",
        EXPRESSION_STATEMENT => "ExpressionStatement",
        RETURN_STATEMENT => "ReturnStatement",
        EMPTY_STATEMENT => "EmptyStatement",
        VARIABLE_DECLARATION => "VariableDeclaration",
        FUNCTION_DECLARATION => "FunctionDeclaration",
        CLASS_DECLARATION => "ClassDeclaration",
        INTERFACE_DECLARATION => "InterfaceDeclaration",
        TYPE_ALIAS_DECLARATION => "TypeAliasDeclaration",
        HERITAGE_CLAUSE => "HeritageClause",
        SOURCE_FILE => "SourceFile",
        JSDOC_TYPE_EXPRESSION => "JSDocTypeExpression",
        JSDOC_ALL_TYPE => "JSDocAllType",
        JSDOC_UNKNOWN_TYPE => "JSDocUnknownType",
        JSDOC_NULLABLE_TYPE => "JSDocNullableType",
        JSDOC_NON_NULLABLE_TYPE => "JSDocNonNullableType",
        JSDOC_OPTIONAL_TYPE => "JSDocOptionalType",
        JSDOC_VARIADIC_TYPE => "JSDocVariadicType",
        JSDOC => "JSDoc",
        JSDOC_TYPE_LITERAL => "JSDocTypeLiteral",
        JSDOC_TAG => "JSDocTag",
        JSDOC_TYPEDEF_TAG => "JSDocTypedefTag",
        JSDOC_PROPERTY_TAG => "JSDocPropertyTag",
        JSDOC_PARAMETER_TAG => "JSDocParameterTag",
        JSDOC_RETURN_TAG => "JSDocReturnTag",
        JSDOC_TYPE_TAG => "JSDocTypeTag",
        JSDOC_TEMPLATE_TAG => "JSDocTemplateTag",
        other => {
            return SyntaxKind::try_from_u16(other)
                .map_or_else(|| format!("Unknown({other})"), |k| format!("{k:?}"));
        }
    };
    name.to_string()
}
