//! Thin node architecture for the arena AST.
//!
//! Every node is a 16-byte `Node` header; the `data_index` points into the
//! typed pool selected by `kind`. Parent links live in `ExtendedNodeInfo`.
//! `JSDoc` blocks are kept in a side table keyed by the declaration they are
//! attached to, so walking children never visits comments by accident.

use super::base::{NodeIndex, NodeList};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A thin 16-byte node header.
#[repr(C)]
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Node {
    /// `SyntaxKind` value or a `syntax_kind_ext` constant
    pub kind: u16,
    /// Packed `node_flags`
    pub flags: u16,
    /// Start of the node's first token, excluding leading trivia
    pub pos: u32,
    /// End of the node's last token
    pub end: u32,
    /// Index into the type-specific storage pool (`u32::MAX` = no data)
    pub data_index: u32,
}

impl Node {
    pub const NO_DATA: u32 = u32::MAX;

    #[inline]
    #[must_use]
    pub const fn new(kind: u16, pos: u32, end: u32) -> Self {
        Self {
            kind,
            flags: 0,
            pos,
            end,
            data_index: Self::NO_DATA,
        }
    }

    #[inline]
    #[must_use]
    pub const fn with_data(kind: u16, pos: u32, end: u32, data_index: u32) -> Self {
        Self {
            kind,
            flags: 0,
            pos,
            end,
            data_index,
        }
    }

    #[inline]
    #[must_use]
    pub const fn has_data(&self) -> bool {
        self.data_index != Self::NO_DATA
    }

    #[inline]
    #[must_use]
    pub const fn has_flag(&self, flag: u16) -> bool {
        self.flags & flag != 0
    }
}

/// Flags packed into `Node::flags`.
pub mod node_flags {
    pub const NONE: u16 = 0;
    /// `let` variable statement
    pub const LET: u16 = 1 << 0;
    /// `const` variable statement
    pub const CONST: u16 = 1 << 1;
    /// Node was parsed from a `JSDoc` comment
    pub const JSDOC: u16 = 1 << 2;
    /// Parser reported an error inside this node
    pub const THIS_NODE_HAS_ERROR: u16 = 1 << 3;
}

// =============================================================================
// Node data
// =============================================================================

/// Data for identifiers
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IdentifierData {
    pub escaped_text: String,
}

/// Data for string, numeric and template literals
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LiteralData {
    pub text: String,
}

/// Data for qualified names (A.B)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QualifiedNameData {
    pub left: NodeIndex,
    pub right: NodeIndex,
}

/// Data for type references (`Foo<T>`, `Array.<T>`)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TypeRefData {
    pub type_name: NodeIndex,
    pub type_arguments: Option<NodeList>,
    /// Arguments were written `JSDoc`-style, as in `Array.<T>`
    pub is_jsdoc_dot_syntax: bool,
}

/// Data for union/intersection types
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CompositeTypeData {
    pub types: NodeList,
}

/// Data for array types (`T[]`)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArrayTypeData {
    pub element_type: NodeIndex,
}

/// Data for types wrapping a single inner type: parenthesized types,
/// `JSDoc` type expressions and the `JSDoc` `?T`, `!T`, `T=`, `...T` forms.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WrappedTypeData {
    pub type_node: NodeIndex,
}

/// Data for type operators (`keyof T`, `readonly T[]`, `unique symbol`)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TypeOperatorData {
    pub operator: u16,
    pub type_node: NodeIndex,
}

/// Data for function types (`(a: T) => R`)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FunctionTypeData {
    pub type_parameters: Option<NodeList>,
    pub parameters: NodeList,
    pub type_annotation: NodeIndex,
}

/// Data for object type literals and interface bodies
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TypeLiteralData {
    pub members: NodeList,
}

/// Data for mapped types (`{ [K in T]?: U }`)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MappedTypeData {
    pub readonly_token: bool,
    pub type_parameter: NodeIndex,
    pub question_token: bool,
    pub type_node: NodeIndex,
}

/// Data for literal types (`"a"`, `1`, `true`, `null`)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LiteralTypeData {
    pub literal: NodeIndex,
}

/// Data for property/method signatures and call/construct signatures
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SignatureData {
    pub modifiers: Option<NodeList>,
    pub name: NodeIndex,
    pub question_token: bool,
    pub type_parameters: Option<NodeList>,
    pub parameters: Option<NodeList>,
    pub type_annotation: NodeIndex,
}

/// Data for index signatures
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IndexSignatureData {
    pub modifiers: Option<NodeList>,
    pub parameters: NodeList,
    pub type_annotation: NodeIndex,
}

/// Data for class property declarations
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PropertyDeclData {
    pub modifiers: Option<NodeList>,
    pub name: NodeIndex,
    pub question_token: bool,
    pub type_annotation: NodeIndex,
    pub initializer: NodeIndex,
}

/// Data for class method declarations
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MethodDeclData {
    pub modifiers: Option<NodeList>,
    pub name: NodeIndex,
    pub question_token: bool,
    pub type_parameters: Option<NodeList>,
    pub parameters: NodeList,
    pub type_annotation: NodeIndex,
    pub body: NodeIndex,
}

/// Data for get/set accessors
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccessorData {
    pub modifiers: Option<NodeList>,
    pub name: NodeIndex,
    pub parameters: NodeList,
    pub type_annotation: NodeIndex,
    pub body: NodeIndex,
}

/// Data for parameter declarations
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParameterData {
    pub dot_dot_dot_token: bool,
    pub name: NodeIndex,
    pub question_token: bool,
    pub type_annotation: NodeIndex,
    pub initializer: NodeIndex,
}

/// Data for type parameter declarations
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TypeParameterData {
    pub name: NodeIndex,
    pub constraint: NodeIndex,
    pub default: NodeIndex,
}

/// Data for function declarations
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FunctionData {
    pub modifiers: Option<NodeList>,
    pub name: NodeIndex,
    pub type_parameters: Option<NodeList>,
    pub parameters: NodeList,
    pub type_annotation: NodeIndex,
    pub body: NodeIndex,
}

/// Data for class declarations
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClassData {
    pub modifiers: Option<NodeList>,
    pub name: NodeIndex,
    pub type_parameters: Option<NodeList>,
    pub heritage_clauses: Option<NodeList>,
    pub members: NodeList,
}

/// Data for interface declarations
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InterfaceData {
    pub modifiers: Option<NodeList>,
    pub name: NodeIndex,
    pub type_parameters: Option<NodeList>,
    pub heritage_clauses: Option<NodeList>,
    pub members: NodeList,
}

/// Data for type alias declarations
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TypeAliasData {
    pub modifiers: Option<NodeList>,
    pub name: NodeIndex,
    pub type_parameters: Option<NodeList>,
    pub type_node: NodeIndex,
}

/// Data for `extends` / `implements` clauses
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HeritageData {
    pub token: u16,
    pub types: NodeList,
}

/// Data for variable statements
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VariableData {
    pub modifiers: Option<NodeList>,
    pub declarations: NodeList,
}

/// Data for variable declarations
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VariableDeclarationData {
    pub name: NodeIndex,
    pub exclamation_token: bool,
    pub type_annotation: NodeIndex,
    pub initializer: NodeIndex,
}

/// Data for blocks
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BlockData {
    pub statements: NodeList,
}

/// Data for `x as T` and `<T>x`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TypeAssertionData {
    pub expression: NodeIndex,
    pub type_node: NodeIndex,
}

/// Data for binary expressions
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BinaryExprData {
    pub left: NodeIndex,
    pub operator_token: u16,
    pub right: NodeIndex,
}

/// Data for prefix unary expressions
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UnaryExprData {
    pub operator: u16,
    pub operand: NodeIndex,
}

/// Data for property access (`a.b`) and element access (`a[0]`) expressions
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccessExprData {
    pub expression: NodeIndex,
    pub name_or_argument: NodeIndex,
}

/// Data for call and `new` expressions
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CallExprData {
    pub expression: NodeIndex,
    pub type_arguments: Option<NodeList>,
    pub arguments: NodeList,
}

/// Data for parenthesized expressions
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParenthesizedData {
    pub expression: NodeIndex,
}

/// Data for array and object literals
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LiteralExprData {
    pub elements: NodeList,
}

/// Data for expression statements
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExprStatementData {
    pub expression: NodeIndex,
}

/// Data for return statements
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReturnData {
    pub expression: NodeIndex,
}

/// Data for source files
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SourceFileData {
    pub statements: NodeList,
    pub end_of_file_token: NodeIndex,
    pub file_name: String,
    pub text: Arc<str>,
}

/// Data for a whole `/** ... */` block
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JSDocData {
    /// Leading free text before the first tag
    pub comment: String,
    pub tags: NodeList,
}

/// Data shared by every `JSDoc` tag kind.
///
/// Unused slots are `NodeIndex::NONE`. For `@typedef`, `name` is the last
/// segment of `full_name`; for `@property` and `@param`, `name` is the
/// (possibly dotted) property name and `full_name` is unset.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JSDocTagData {
    pub tag_name: NodeIndex,
    pub type_expression: NodeIndex,
    pub name: NodeIndex,
    pub full_name: NodeIndex,
    pub is_bracketed: bool,
    pub is_name_first: bool,
    pub type_parameters: Option<NodeList>,
    pub comment: String,
}

/// Data for the object shape built from `@property` tags under a `@typedef`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JSDocTypeLiteralData {
    pub property_tags: NodeList,
    pub is_array_type: bool,
}

/// Per-node information kept outside the 16-byte header.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ExtendedNodeInfo {
    pub parent: NodeIndex,
}

impl Default for ExtendedNodeInfo {
    fn default() -> Self {
        Self {
            parent: NodeIndex::NONE,
        }
    }
}

/// Arena that owns every node of one parsed file.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NodeArena {
    pub nodes: Vec<Node>,

    // Names and literals
    pub identifiers: Vec<IdentifierData>,
    pub literals: Vec<LiteralData>,
    pub qualified_names: Vec<QualifiedNameData>,

    // Types
    pub type_refs: Vec<TypeRefData>,
    pub composite_types: Vec<CompositeTypeData>,
    pub array_types: Vec<ArrayTypeData>,
    pub wrapped_types: Vec<WrappedTypeData>,
    pub type_operators: Vec<TypeOperatorData>,
    pub function_types: Vec<FunctionTypeData>,
    pub type_literals: Vec<TypeLiteralData>,
    pub mapped_types: Vec<MappedTypeData>,
    pub literal_types: Vec<LiteralTypeData>,

    // Members and signatures
    pub signatures: Vec<SignatureData>,
    pub index_signatures: Vec<IndexSignatureData>,
    pub property_decls: Vec<PropertyDeclData>,
    pub method_decls: Vec<MethodDeclData>,
    pub accessors: Vec<AccessorData>,
    pub parameters: Vec<ParameterData>,
    pub type_parameters: Vec<TypeParameterData>,

    // Declarations
    pub functions: Vec<FunctionData>,
    pub classes: Vec<ClassData>,
    pub interfaces: Vec<InterfaceData>,
    pub type_aliases: Vec<TypeAliasData>,
    pub heritage_clauses: Vec<HeritageData>,
    pub variables: Vec<VariableData>,
    pub variable_declarations: Vec<VariableDeclarationData>,

    // Statements and expressions
    pub blocks: Vec<BlockData>,
    pub type_assertions: Vec<TypeAssertionData>,
    pub binary_exprs: Vec<BinaryExprData>,
    pub unary_exprs: Vec<UnaryExprData>,
    pub access_exprs: Vec<AccessExprData>,
    pub call_exprs: Vec<CallExprData>,
    pub parenthesized: Vec<ParenthesizedData>,
    pub literal_exprs: Vec<LiteralExprData>,
    pub expr_statements: Vec<ExprStatementData>,
    pub return_statements: Vec<ReturnData>,
    pub source_files: Vec<SourceFileData>,

    // JSDoc
    pub jsdocs: Vec<JSDocData>,
    pub jsdoc_tags: Vec<JSDocTagData>,
    pub jsdoc_type_literals: Vec<JSDocTypeLiteralData>,

    /// Parent links and other per-node extras, indexed like `nodes`
    pub extended_info: Vec<ExtendedNodeInfo>,

    /// `JSDoc` blocks attached to each host node, in source order
    pub jsdoc: FxHashMap<NodeIndex, Vec<NodeIndex>>,
}

impl NodeArena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            extended_info: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// A borrowed node together with its arena.
#[derive(Clone, Copy)]
pub struct NodeView<'a> {
    pub node: &'a Node,
    pub arena: &'a NodeArena,
    pub index: NodeIndex,
}

impl<'a> NodeView<'a> {
    #[must_use]
    pub fn new(arena: &'a NodeArena, index: NodeIndex) -> Option<Self> {
        arena.get(index).map(|node| Self { node, arena, index })
    }

    #[inline]
    #[must_use]
    pub const fn kind(&self) -> u16 {
        self.node.kind
    }

    #[inline]
    #[must_use]
    pub const fn pos(&self) -> u32 {
        self.node.pos
    }

    #[inline]
    #[must_use]
    pub const fn end(&self) -> u32 {
        self.node.end
    }

    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        Self::new(self.arena, self.arena.parent_of(self.index))
    }

    #[must_use]
    pub fn child(&self, index: NodeIndex) -> Option<Self> {
        Self::new(self.arena, index)
    }
}
