//! Synthesized nodes.
//!
//! Code fixes build new declarations that do not exist in any arena. These
//! are plain owned trees: a fix lowers arena type nodes into `TypeNode`s,
//! moves them into a declaration, and hands the result to the printer.

use serde::{Deserialize, Serialize};
use tsz_scanner::SyntaxKind;

/// An owned type node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeNode {
    /// `string`, `number`, `any`, `null`, ...
    Keyword(SyntaxKind),
    /// `Foo`, `ns.Foo`, `Map<K, V>`
    Reference {
        name: String,
        type_arguments: Vec<TypeNode>,
    },
    /// `"a"`, `1`, `-1`, `true`
    Literal(String),
    /// `T[]`
    Array(Box<TypeNode>),
    /// `A | B`
    Union(Vec<TypeNode>),
    /// `A & B`
    Intersection(Vec<TypeNode>),
    /// `(a: A, b?: B) => R`
    Function {
        parameters: Vec<ParameterNode>,
        return_type: Box<TypeNode>,
    },
    /// `{ a: A; b?: B }`
    Object(Vec<PropertySignature>),
    /// `(T)`
    Parenthesized(Box<TypeNode>),
    /// `keyof T`, `readonly T[]`
    Operator {
        operator: SyntaxKind,
        type_node: Box<TypeNode>,
    },
    /// Type text printed as written, e.g. `function(string): number`
    Raw(String),
}

impl TypeNode {
    #[must_use]
    pub const fn keyword(kind: SyntaxKind) -> Self {
        Self::Keyword(kind)
    }

    #[must_use]
    pub fn reference(name: impl Into<String>) -> Self {
        Self::Reference {
            name: name.into(),
            type_arguments: Vec::new(),
        }
    }

    #[must_use]
    pub fn array(element: Self) -> Self {
        Self::Array(Box::new(element))
    }
}

/// A property of an object type node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySignature {
    pub name: String,
    pub optional: bool,
    pub type_node: TypeNode,
}

/// A parameter of a function type node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterNode {
    pub name: String,
    pub optional: bool,
    pub rest: bool,
    pub type_node: Option<TypeNode>,
}

/// `type Name<T, U> = Type;`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeAliasDeclaration {
    pub name: String,
    pub type_parameters: Vec<String>,
    pub type_node: TypeNode,
}

impl TypeAliasDeclaration {
    #[must_use]
    pub fn new(name: impl Into<String>, type_parameters: Vec<String>, type_node: TypeNode) -> Self {
        Self {
            name: name.into(),
            type_parameters,
            type_node,
        }
    }
}
