//! `NodeArena` access methods and the `NodeAccess` trait.
//!
//! Typed getters check the node kind before indexing a pool, so a getter
//! called on the wrong kind returns `None` instead of unrelated data.

use super::base::NodeIndex;
use super::node::{
    AccessExprData, AccessorData, ArrayTypeData, BinaryExprData, BlockData, CallExprData,
    ClassData, CompositeTypeData, ExprStatementData, ExtendedNodeInfo, FunctionData,
    FunctionTypeData, HeritageData, IdentifierData, IndexSignatureData, InterfaceData, JSDocData,
    JSDocTagData, JSDocTypeLiteralData, LiteralData, LiteralExprData, LiteralTypeData,
    MappedTypeData, MethodDeclData, Node, NodeArena, ParameterData, ParenthesizedData,
    PropertyDeclData, QualifiedNameData, ReturnData, SignatureData, SourceFileData,
    TypeAliasData, TypeAssertionData, TypeLiteralData, TypeOperatorData, TypeParameterData,
    TypeRefData, UnaryExprData, VariableData, VariableDeclarationData, WrappedTypeData,
};
use super::syntax_kind_ext as ext;
use tsz_scanner::SyntaxKind;

impl NodeArena {
    #[inline]
    #[must_use]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    #[inline]
    #[must_use]
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get_mut(index.0 as usize)
        }
    }

    #[inline]
    #[must_use]
    pub fn get_extended(&self, index: NodeIndex) -> Option<&ExtendedNodeInfo> {
        if index.is_none() {
            None
        } else {
            self.extended_info.get(index.0 as usize)
        }
    }

    /// Parent of `index`, or `NodeIndex::NONE` for the root and unknown nodes.
    #[inline]
    #[must_use]
    pub fn parent_of(&self, index: NodeIndex) -> NodeIndex {
        self.get_extended(index)
            .map_or(NodeIndex::NONE, |info| info.parent)
    }

    /// `JSDoc` blocks attached to `host`, in source order.
    #[must_use]
    pub fn get_jsdoc(&self, host: NodeIndex) -> &[NodeIndex] {
        self.jsdoc.get(&host).map_or(&[], Vec::as_slice)
    }

    /// Start of `index`, moved back to its first attached `JSDoc` block.
    #[must_use]
    pub fn get_start_with_jsdoc(&self, index: NodeIndex) -> Option<u32> {
        let node = self.get(index)?;
        let jsdoc_start = self
            .get_jsdoc(index)
            .iter()
            .filter_map(|&doc| self.get(doc).map(|n| n.pos))
            .min();
        Some(jsdoc_start.map_or(node.pos, |start| start.min(node.pos)))
    }

    /// Source text of `index` (empty for unknown nodes or a missing root).
    #[must_use]
    pub fn get_node_text<'a>(&self, index: NodeIndex, source: &'a str) -> &'a str {
        self.get(index)
            .and_then(|n| source.get(n.pos as usize..n.end as usize))
            .unwrap_or("")
    }

    // =========================================================================
    // Typed getters
    // =========================================================================

    #[inline]
    #[must_use]
    pub fn get_identifier(&self, node: &Node) -> Option<&IdentifierData> {
        if node.has_data() && node.kind == SyntaxKind::Identifier as u16 {
            self.identifiers.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn get_literal(&self, node: &Node) -> Option<&LiteralData> {
        let is_literal = node.kind == SyntaxKind::StringLiteral as u16
            || node.kind == SyntaxKind::NumericLiteral as u16
            || node.kind == SyntaxKind::BigIntLiteral as u16
            || node.kind == SyntaxKind::NoSubstitutionTemplateLiteral as u16;
        if node.has_data() && is_literal {
            self.literals.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn get_qualified_name(&self, node: &Node) -> Option<&QualifiedNameData> {
        if node.has_data() && node.kind == ext::QUALIFIED_NAME {
            self.qualified_names.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn get_type_ref(&self, node: &Node) -> Option<&TypeRefData> {
        if node.has_data() && node.kind == ext::TYPE_REFERENCE {
            self.type_refs.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn get_composite_type(&self, node: &Node) -> Option<&CompositeTypeData> {
        if node.has_data() && matches!(node.kind, ext::UNION_TYPE | ext::INTERSECTION_TYPE) {
            self.composite_types.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn get_array_type(&self, node: &Node) -> Option<&ArrayTypeData> {
        if node.has_data() && node.kind == ext::ARRAY_TYPE {
            self.array_types.get(node.data_index as usize)
        } else {
            None
        }
    }

    /// Inner type of a parenthesized type, a `JSDoc` type expression or one
    /// of the `JSDoc` nullable/non-nullable/optional/variadic wrappers.
    #[inline]
    #[must_use]
    pub fn get_wrapped_type(&self, node: &Node) -> Option<&WrappedTypeData> {
        let is_wrapped = matches!(
            node.kind,
            ext::PARENTHESIZED_TYPE
                | ext::JSDOC_TYPE_EXPRESSION
                | ext::JSDOC_NULLABLE_TYPE
                | ext::JSDOC_NON_NULLABLE_TYPE
                | ext::JSDOC_OPTIONAL_TYPE
                | ext::JSDOC_VARIADIC_TYPE
        );
        if node.has_data() && is_wrapped {
            self.wrapped_types.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn get_type_operator(&self, node: &Node) -> Option<&TypeOperatorData> {
        if node.has_data() && node.kind == ext::TYPE_OPERATOR {
            self.type_operators.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn get_function_type(&self, node: &Node) -> Option<&FunctionTypeData> {
        if node.has_data() && node.kind == ext::FUNCTION_TYPE {
            self.function_types.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn get_type_literal(&self, node: &Node) -> Option<&TypeLiteralData> {
        if node.has_data() && node.kind == ext::TYPE_LITERAL {
            self.type_literals.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn get_mapped_type(&self, node: &Node) -> Option<&MappedTypeData> {
        if node.has_data() && node.kind == ext::MAPPED_TYPE {
            self.mapped_types.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn get_literal_type(&self, node: &Node) -> Option<&LiteralTypeData> {
        if node.has_data() && node.kind == ext::LITERAL_TYPE {
            self.literal_types.get(node.data_index as usize)
        } else {
            None
        }
    }

    /// Property/method signatures and call/construct signatures.
    #[inline]
    #[must_use]
    pub fn get_signature(&self, node: &Node) -> Option<&SignatureData> {
        let is_signature = matches!(
            node.kind,
            ext::PROPERTY_SIGNATURE
                | ext::METHOD_SIGNATURE
                | ext::CALL_SIGNATURE
                | ext::CONSTRUCT_SIGNATURE
        );
        if node.has_data() && is_signature {
            self.signatures.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn get_index_signature(&self, node: &Node) -> Option<&IndexSignatureData> {
        if node.has_data() && node.kind == ext::INDEX_SIGNATURE {
            self.index_signatures.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn get_property_decl(&self, node: &Node) -> Option<&PropertyDeclData> {
        if node.has_data() && node.kind == ext::PROPERTY_DECLARATION {
            self.property_decls.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn get_method_decl(&self, node: &Node) -> Option<&MethodDeclData> {
        if node.has_data() && node.kind == ext::METHOD_DECLARATION {
            self.method_decls.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn get_accessor(&self, node: &Node) -> Option<&AccessorData> {
        if node.has_data() && matches!(node.kind, ext::GET_ACCESSOR | ext::SET_ACCESSOR) {
            self.accessors.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn get_parameter(&self, node: &Node) -> Option<&ParameterData> {
        if node.has_data() && node.kind == ext::PARAMETER {
            self.parameters.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn get_type_parameter(&self, node: &Node) -> Option<&TypeParameterData> {
        if node.has_data() && node.kind == ext::TYPE_PARAMETER {
            self.type_parameters.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn get_function(&self, node: &Node) -> Option<&FunctionData> {
        if node.has_data() && node.kind == ext::FUNCTION_DECLARATION {
            self.functions.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn get_class(&self, node: &Node) -> Option<&ClassData> {
        if node.has_data() && node.kind == ext::CLASS_DECLARATION {
            self.classes.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn get_interface(&self, node: &Node) -> Option<&InterfaceData> {
        if node.has_data() && node.kind == ext::INTERFACE_DECLARATION {
            self.interfaces.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn get_type_alias(&self, node: &Node) -> Option<&TypeAliasData> {
        if node.has_data() && node.kind == ext::TYPE_ALIAS_DECLARATION {
            self.type_aliases.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn get_heritage(&self, node: &Node) -> Option<&HeritageData> {
        if node.has_data() && node.kind == ext::HERITAGE_CLAUSE {
            self.heritage_clauses.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn get_variable(&self, node: &Node) -> Option<&VariableData> {
        if node.has_data() && node.kind == ext::VARIABLE_STATEMENT {
            self.variables.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn get_variable_declaration(&self, node: &Node) -> Option<&VariableDeclarationData> {
        if node.has_data() && node.kind == ext::VARIABLE_DECLARATION {
            self.variable_declarations.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn get_block(&self, node: &Node) -> Option<&BlockData> {
        if node.has_data() && node.kind == ext::BLOCK {
            self.blocks.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn get_type_assertion(&self, node: &Node) -> Option<&TypeAssertionData> {
        if node.has_data()
            && matches!(node.kind, ext::AS_EXPRESSION | ext::TYPE_ASSERTION_EXPRESSION)
        {
            self.type_assertions.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn get_binary_expr(&self, node: &Node) -> Option<&BinaryExprData> {
        if node.has_data() && node.kind == ext::BINARY_EXPRESSION {
            self.binary_exprs.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn get_unary_expr(&self, node: &Node) -> Option<&UnaryExprData> {
        if node.has_data() && node.kind == ext::PREFIX_UNARY_EXPRESSION {
            self.unary_exprs.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn get_access_expr(&self, node: &Node) -> Option<&AccessExprData> {
        if node.has_data()
            && matches!(
                node.kind,
                ext::PROPERTY_ACCESS_EXPRESSION | ext::ELEMENT_ACCESS_EXPRESSION
            )
        {
            self.access_exprs.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn get_call_expr(&self, node: &Node) -> Option<&CallExprData> {
        if node.has_data() && node.kind == ext::CALL_EXPRESSION {
            self.call_exprs.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn get_parenthesized(&self, node: &Node) -> Option<&ParenthesizedData> {
        if node.has_data() && node.kind == ext::PARENTHESIZED_EXPRESSION {
            self.parenthesized.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn get_literal_expr(&self, node: &Node) -> Option<&LiteralExprData> {
        if node.has_data()
            && matches!(
                node.kind,
                ext::ARRAY_LITERAL_EXPRESSION | ext::OBJECT_LITERAL_EXPRESSION
            )
        {
            self.literal_exprs.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn get_expr_statement(&self, node: &Node) -> Option<&ExprStatementData> {
        if node.has_data() && node.kind == ext::EXPRESSION_STATEMENT {
            self.expr_statements.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn get_return_statement(&self, node: &Node) -> Option<&ReturnData> {
        if node.has_data() && node.kind == ext::RETURN_STATEMENT {
            self.return_statements.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn get_source_file(&self, node: &Node) -> Option<&SourceFileData> {
        if node.has_data() && node.kind == ext::SOURCE_FILE {
            self.source_files.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn get_jsdoc_comment(&self, node: &Node) -> Option<&JSDocData> {
        if node.has_data() && node.kind == ext::JSDOC {
            self.jsdocs.get(node.data_index as usize)
        } else {
            None
        }
    }

    /// Data of any `JSDoc` tag kind.
    #[inline]
    #[must_use]
    pub fn get_jsdoc_tag(&self, node: &Node) -> Option<&JSDocTagData> {
        if node.has_data() && is_jsdoc_tag_kind(node.kind) {
            self.jsdoc_tags.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn get_jsdoc_type_literal(&self, node: &Node) -> Option<&JSDocTypeLiteralData> {
        if node.has_data() && node.kind == ext::JSDOC_TYPE_LITERAL {
            self.jsdoc_type_literals.get(node.data_index as usize)
        } else {
            None
        }
    }

    /// Text of an identifier or the dotted text of a qualified name.
    #[must_use]
    pub fn get_entity_name_text(&self, index: NodeIndex) -> Option<String> {
        let node = self.get(index)?;
        if let Some(ident) = self.get_identifier(node) {
            return Some(ident.escaped_text.clone());
        }
        let qualified = self.get_qualified_name(node)?;
        let left = self.get_entity_name_text(qualified.left)?;
        let right = self.get_entity_name_text(qualified.right)?;
        Some(format!("{left}.{right}"))
    }
}

/// Check whether `kind` is one of the `JSDoc` tag kinds.
#[inline]
#[must_use]
pub const fn is_jsdoc_tag_kind(kind: u16) -> bool {
    kind >= ext::FIRST_JSDOC_TAG && kind <= ext::LAST_JSDOC_NODE
}

/// Check whether `kind` is any node created while parsing a `JSDoc` comment.
#[inline]
#[must_use]
pub const fn is_jsdoc_kind(kind: u16) -> bool {
    kind >= ext::FIRST_JSDOC_NODE && kind <= ext::LAST_JSDOC_NODE
}

// =============================================================================
// NodeAccess trait
// =============================================================================

/// Basic information about a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeInfo {
    pub kind: u16,
    pub flags: u16,
    pub pos: u32,
    pub end: u32,
    pub parent: NodeIndex,
}

/// Read-only tree access shared by every consumer of the arena.
pub trait NodeAccess {
    /// Get basic node information by index
    fn node_info(&self, index: NodeIndex) -> Option<NodeInfo>;

    /// Get the syntax kind of a node
    fn kind(&self, index: NodeIndex) -> Option<u16>;

    /// Get the source position range
    fn pos_end(&self, index: NodeIndex) -> Option<(u32, u32)>;

    /// Check if a node exists
    fn exists(&self, index: NodeIndex) -> bool {
        index.is_some() && self.kind(index).is_some()
    }

    /// Get identifier text (if this is an identifier node)
    fn get_identifier_text(&self, index: NodeIndex) -> Option<&str>;

    /// Get literal value text (if this is a literal node)
    fn get_literal_text(&self, index: NodeIndex) -> Option<&str>;

    /// Syntactic children in source order. Attached `JSDoc` blocks are not
    /// children of their host; use `NodeArena::get_jsdoc` for those.
    fn get_children(&self, index: NodeIndex) -> Vec<NodeIndex>;
}

impl NodeAccess for NodeArena {
    fn node_info(&self, index: NodeIndex) -> Option<NodeInfo> {
        let node = self.get(index)?;
        let ext = self.get_extended(index)?;
        Some(NodeInfo {
            kind: node.kind,
            flags: node.flags,
            pos: node.pos,
            end: node.end,
            parent: ext.parent,
        })
    }

    fn kind(&self, index: NodeIndex) -> Option<u16> {
        self.get(index).map(|n| n.kind)
    }

    fn pos_end(&self, index: NodeIndex) -> Option<(u32, u32)> {
        self.get(index).map(|n| (n.pos, n.end))
    }

    fn get_identifier_text(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        self.get_identifier(node).map(|d| d.escaped_text.as_str())
    }

    fn get_literal_text(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        self.get_literal(node).map(|d| d.text.as_str())
    }

    fn get_children(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let Some(node) = self.get(index) else {
            return Vec::new();
        };
        let mut children = Vec::new();
        collect_children(self, node, &mut children);
        children.retain(|c| c.is_some());
        children.sort_by_key(|&c| self.get(c).map_or(0, |n| n.pos));
        children.dedup();
        children
    }
}

fn push_opt_list(out: &mut Vec<NodeIndex>, list: Option<&super::base::NodeList>) {
    if let Some(list) = list {
        out.extend(list.iter());
    }
}

fn collect_children(arena: &NodeArena, node: &Node, out: &mut Vec<NodeIndex>) {
    match node.kind {
        ext::QUALIFIED_NAME => {
            if let Some(d) = arena.get_qualified_name(node) {
                out.extend([d.left, d.right]);
            }
        }
        ext::TYPE_PARAMETER => {
            if let Some(d) = arena.get_type_parameter(node) {
                out.extend([d.name, d.constraint, d.default]);
            }
        }
        ext::PARAMETER => {
            if let Some(d) = arena.get_parameter(node) {
                out.extend([d.name, d.type_annotation, d.initializer]);
            }
        }
        ext::PROPERTY_SIGNATURE
        | ext::METHOD_SIGNATURE
        | ext::CALL_SIGNATURE
        | ext::CONSTRUCT_SIGNATURE => {
            if let Some(d) = arena.get_signature(node) {
                push_opt_list(out, d.modifiers.as_ref());
                out.push(d.name);
                push_opt_list(out, d.type_parameters.as_ref());
                push_opt_list(out, d.parameters.as_ref());
                out.push(d.type_annotation);
            }
        }
        ext::INDEX_SIGNATURE => {
            if let Some(d) = arena.get_index_signature(node) {
                push_opt_list(out, d.modifiers.as_ref());
                out.extend(d.parameters.iter());
                out.push(d.type_annotation);
            }
        }
        ext::PROPERTY_DECLARATION => {
            if let Some(d) = arena.get_property_decl(node) {
                push_opt_list(out, d.modifiers.as_ref());
                out.extend([d.name, d.type_annotation, d.initializer]);
            }
        }
        ext::METHOD_DECLARATION => {
            if let Some(d) = arena.get_method_decl(node) {
                push_opt_list(out, d.modifiers.as_ref());
                out.push(d.name);
                push_opt_list(out, d.type_parameters.as_ref());
                out.extend(d.parameters.iter());
                out.extend([d.type_annotation, d.body]);
            }
        }
        ext::GET_ACCESSOR | ext::SET_ACCESSOR => {
            if let Some(d) = arena.get_accessor(node) {
                push_opt_list(out, d.modifiers.as_ref());
                out.push(d.name);
                out.extend(d.parameters.iter());
                out.extend([d.type_annotation, d.body]);
            }
        }
        ext::TYPE_REFERENCE => {
            if let Some(d) = arena.get_type_ref(node) {
                out.push(d.type_name);
                push_opt_list(out, d.type_arguments.as_ref());
            }
        }
        ext::FUNCTION_TYPE => {
            if let Some(d) = arena.get_function_type(node) {
                push_opt_list(out, d.type_parameters.as_ref());
                out.extend(d.parameters.iter());
                out.push(d.type_annotation);
            }
        }
        ext::TYPE_LITERAL => {
            if let Some(d) = arena.get_type_literal(node) {
                out.extend(d.members.iter());
            }
        }
        ext::ARRAY_TYPE => {
            if let Some(d) = arena.get_array_type(node) {
                out.push(d.element_type);
            }
        }
        ext::UNION_TYPE | ext::INTERSECTION_TYPE => {
            if let Some(d) = arena.get_composite_type(node) {
                out.extend(d.types.iter());
            }
        }
        ext::PARENTHESIZED_TYPE
        | ext::JSDOC_TYPE_EXPRESSION
        | ext::JSDOC_NULLABLE_TYPE
        | ext::JSDOC_NON_NULLABLE_TYPE
        | ext::JSDOC_OPTIONAL_TYPE
        | ext::JSDOC_VARIADIC_TYPE => {
            if let Some(d) = arena.get_wrapped_type(node) {
                out.push(d.type_node);
            }
        }
        ext::TYPE_OPERATOR => {
            if let Some(d) = arena.get_type_operator(node) {
                out.push(d.type_node);
            }
        }
        ext::MAPPED_TYPE => {
            if let Some(d) = arena.get_mapped_type(node) {
                out.extend([d.type_parameter, d.type_node]);
            }
        }
        ext::LITERAL_TYPE => {
            if let Some(d) = arena.get_literal_type(node) {
                out.push(d.literal);
            }
        }
        ext::PARENTHESIZED_EXPRESSION => {
            if let Some(d) = arena.get_parenthesized(node) {
                out.push(d.expression);
            }
        }
        ext::OBJECT_LITERAL_EXPRESSION | ext::ARRAY_LITERAL_EXPRESSION => {
            if let Some(d) = arena.get_literal_expr(node) {
                out.extend(d.elements.iter());
            }
        }
        ext::PROPERTY_ACCESS_EXPRESSION | ext::ELEMENT_ACCESS_EXPRESSION => {
            if let Some(d) = arena.get_access_expr(node) {
                out.extend([d.expression, d.name_or_argument]);
            }
        }
        ext::CALL_EXPRESSION => {
            if let Some(d) = arena.get_call_expr(node) {
                out.push(d.expression);
                push_opt_list(out, d.type_arguments.as_ref());
                out.extend(d.arguments.iter());
            }
        }
        ext::BINARY_EXPRESSION => {
            if let Some(d) = arena.get_binary_expr(node) {
                out.extend([d.left, d.right]);
            }
        }
        ext::PREFIX_UNARY_EXPRESSION => {
            if let Some(d) = arena.get_unary_expr(node) {
                out.push(d.operand);
            }
        }
        ext::AS_EXPRESSION | ext::TYPE_ASSERTION_EXPRESSION => {
            if let Some(d) = arena.get_type_assertion(node) {
                out.extend([d.expression, d.type_node]);
            }
        }
        ext::BLOCK => {
            if let Some(d) = arena.get_block(node) {
                out.extend(d.statements.iter());
            }
        }
        ext::VARIABLE_STATEMENT => {
            if let Some(d) = arena.get_variable(node) {
                push_opt_list(out, d.modifiers.as_ref());
                out.extend(d.declarations.iter());
            }
        }
        ext::EXPRESSION_STATEMENT => {
            if let Some(d) = arena.get_expr_statement(node) {
                out.push(d.expression);
            }
        }
        ext::RETURN_STATEMENT => {
            if let Some(d) = arena.get_return_statement(node) {
                out.push(d.expression);
            }
        }
        ext::VARIABLE_DECLARATION => {
            if let Some(d) = arena.get_variable_declaration(node) {
                out.extend([d.name, d.type_annotation, d.initializer]);
            }
        }
        ext::FUNCTION_DECLARATION => {
            if let Some(d) = arena.get_function(node) {
                push_opt_list(out, d.modifiers.as_ref());
                out.push(d.name);
                push_opt_list(out, d.type_parameters.as_ref());
                out.extend(d.parameters.iter());
                out.extend([d.type_annotation, d.body]);
            }
        }
        ext::CLASS_DECLARATION => {
            if let Some(d) = arena.get_class(node) {
                push_opt_list(out, d.modifiers.as_ref());
                out.push(d.name);
                push_opt_list(out, d.type_parameters.as_ref());
                push_opt_list(out, d.heritage_clauses.as_ref());
                out.extend(d.members.iter());
            }
        }
        ext::INTERFACE_DECLARATION => {
            if let Some(d) = arena.get_interface(node) {
                push_opt_list(out, d.modifiers.as_ref());
                out.push(d.name);
                push_opt_list(out, d.type_parameters.as_ref());
                push_opt_list(out, d.heritage_clauses.as_ref());
                out.extend(d.members.iter());
            }
        }
        ext::TYPE_ALIAS_DECLARATION => {
            if let Some(d) = arena.get_type_alias(node) {
                push_opt_list(out, d.modifiers.as_ref());
                out.push(d.name);
                push_opt_list(out, d.type_parameters.as_ref());
                out.push(d.type_node);
            }
        }
        ext::HERITAGE_CLAUSE => {
            if let Some(d) = arena.get_heritage(node) {
                out.extend(d.types.iter());
            }
        }
        ext::SOURCE_FILE => {
            if let Some(d) = arena.get_source_file(node) {
                out.extend(d.statements.iter());
                out.push(d.end_of_file_token);
            }
        }
        ext::JSDOC => {
            if let Some(d) = arena.get_jsdoc_comment(node) {
                out.extend(d.tags.iter());
            }
        }
        ext::JSDOC_TYPE_LITERAL => {
            if let Some(d) = arena.get_jsdoc_type_literal(node) {
                out.extend(d.property_tags.iter());
            }
        }
        kind if is_jsdoc_tag_kind(kind) => {
            if let Some(d) = arena.get_jsdoc_tag(node) {
                out.push(d.tag_name);
                out.push(d.type_expression);
                push_opt_list(out, d.type_parameters.as_ref());
                if d.full_name.is_some() {
                    out.push(d.full_name);
                } else {
                    out.push(d.name);
                }
            }
        }
        _ => {}
    }
}
