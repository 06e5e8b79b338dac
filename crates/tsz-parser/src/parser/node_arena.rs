//! Node creation for `NodeArena`.
//!
//! Nodes are built bottom-up: every `add_*` method pushes the data into its
//! pool, pushes the header, and then points the children's parent links at
//! the new node.

use super::base::{NodeIndex, NodeList};
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

impl NodeArena {
    #[inline]
    fn push_node(&mut self, kind: u16, pos: u32, end: u32, data_index: u32) -> NodeIndex {
        let index = self.nodes.len() as u32;
        self.nodes.push(Node::with_data(kind, pos, end, data_index));
        self.extended_info.push(ExtendedNodeInfo::default());
        NodeIndex(index)
    }

    #[inline]
    fn set_parent(&mut self, child: NodeIndex, parent: NodeIndex) {
        if child.is_some() {
            if let Some(info) = self.extended_info.get_mut(child.0 as usize) {
                info.parent = parent;
            }
        }
    }

    #[inline]
    fn set_parent_list(&mut self, list: &NodeList, parent: NodeIndex) {
        for &child in &list.nodes {
            self.set_parent(child, parent);
        }
    }

    #[inline]
    fn set_parent_opt_list(&mut self, list: Option<&NodeList>, parent: NodeIndex) {
        if let Some(l) = list {
            self.set_parent_list(l, parent);
        }
    }

    /// Add a node with no data: tokens, keyword types, `JSDoc` `*` and `?`.
    pub fn add_token(&mut self, kind: u16, pos: u32, end: u32) -> NodeIndex {
        self.push_node(kind, pos, end, Node::NO_DATA)
    }

    /// Set flags on an existing node.
    pub fn add_flags(&mut self, index: NodeIndex, flags: u16) {
        if let Some(node) = self.get_mut(index) {
            node.flags |= flags;
        }
    }

    /// Attach a `JSDoc` block to `host` and link its parent.
    pub fn attach_jsdoc(&mut self, host: NodeIndex, jsdoc: NodeIndex) {
        self.set_parent(jsdoc, host);
        self.jsdoc.entry(host).or_default().push(jsdoc);
    }

    pub fn add_identifier(&mut self, kind: u16, pos: u32, end: u32, data: IdentifierData) -> NodeIndex {
        let data_index = self.identifiers.len() as u32;
        self.identifiers.push(data);
        self.push_node(kind, pos, end, data_index)
    }

    pub fn add_literal(&mut self, kind: u16, pos: u32, end: u32, data: LiteralData) -> NodeIndex {
        let data_index = self.literals.len() as u32;
        self.literals.push(data);
        self.push_node(kind, pos, end, data_index)
    }

    pub fn add_qualified_name(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: QualifiedNameData,
    ) -> NodeIndex {
        let (left, right) = (data.left, data.right);
        let data_index = self.qualified_names.len() as u32;
        self.qualified_names.push(data);
        let parent = self.push_node(kind, pos, end, data_index);
        self.set_parent(left, parent);
        self.set_parent(right, parent);
        parent
    }

    // =========================================================================
    // Types
    // =========================================================================

    pub fn add_type_ref(&mut self, kind: u16, pos: u32, end: u32, data: TypeRefData) -> NodeIndex {
        let type_name = data.type_name;
        let type_arguments = data.type_arguments.clone();
        let data_index = self.type_refs.len() as u32;
        self.type_refs.push(data);
        let parent = self.push_node(kind, pos, end, data_index);
        self.set_parent(type_name, parent);
        self.set_parent_opt_list(type_arguments.as_ref(), parent);
        parent
    }

    pub fn add_composite_type(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: CompositeTypeData,
    ) -> NodeIndex {
        let types = data.types.clone();
        let data_index = self.composite_types.len() as u32;
        self.composite_types.push(data);
        let parent = self.push_node(kind, pos, end, data_index);
        self.set_parent_list(&types, parent);
        parent
    }

    pub fn add_array_type(&mut self, kind: u16, pos: u32, end: u32, data: ArrayTypeData) -> NodeIndex {
        let element_type = data.element_type;
        let data_index = self.array_types.len() as u32;
        self.array_types.push(data);
        let parent = self.push_node(kind, pos, end, data_index);
        self.set_parent(element_type, parent);
        parent
    }

    pub fn add_wrapped_type(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: WrappedTypeData,
    ) -> NodeIndex {
        let type_node = data.type_node;
        let data_index = self.wrapped_types.len() as u32;
        self.wrapped_types.push(data);
        let parent = self.push_node(kind, pos, end, data_index);
        self.set_parent(type_node, parent);
        parent
    }

    pub fn add_type_operator(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: TypeOperatorData,
    ) -> NodeIndex {
        let type_node = data.type_node;
        let data_index = self.type_operators.len() as u32;
        self.type_operators.push(data);
        let parent = self.push_node(kind, pos, end, data_index);
        self.set_parent(type_node, parent);
        parent
    }

    pub fn add_function_type(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: FunctionTypeData,
    ) -> NodeIndex {
        let type_parameters = data.type_parameters.clone();
        let parameters = data.parameters.clone();
        let type_annotation = data.type_annotation;
        let data_index = self.function_types.len() as u32;
        self.function_types.push(data);
        let parent = self.push_node(kind, pos, end, data_index);
        self.set_parent_opt_list(type_parameters.as_ref(), parent);
        self.set_parent_list(&parameters, parent);
        self.set_parent(type_annotation, parent);
        parent
    }

    pub fn add_type_literal(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: TypeLiteralData,
    ) -> NodeIndex {
        let members = data.members.clone();
        let data_index = self.type_literals.len() as u32;
        self.type_literals.push(data);
        let parent = self.push_node(kind, pos, end, data_index);
        self.set_parent_list(&members, parent);
        parent
    }

    pub fn add_mapped_type(&mut self, kind: u16, pos: u32, end: u32, data: MappedTypeData) -> NodeIndex {
        let (type_parameter, type_node) = (data.type_parameter, data.type_node);
        let data_index = self.mapped_types.len() as u32;
        self.mapped_types.push(data);
        let parent = self.push_node(kind, pos, end, data_index);
        self.set_parent(type_parameter, parent);
        self.set_parent(type_node, parent);
        parent
    }

    pub fn add_literal_type(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: LiteralTypeData,
    ) -> NodeIndex {
        let literal = data.literal;
        let data_index = self.literal_types.len() as u32;
        self.literal_types.push(data);
        let parent = self.push_node(kind, pos, end, data_index);
        self.set_parent(literal, parent);
        parent
    }

    // =========================================================================
    // Members and signatures
    // =========================================================================

    pub fn add_signature(&mut self, kind: u16, pos: u32, end: u32, data: SignatureData) -> NodeIndex {
        let modifiers = data.modifiers.clone();
        let name = data.name;
        let type_parameters = data.type_parameters.clone();
        let parameters = data.parameters.clone();
        let type_annotation = data.type_annotation;
        let data_index = self.signatures.len() as u32;
        self.signatures.push(data);
        let parent = self.push_node(kind, pos, end, data_index);
        self.set_parent_opt_list(modifiers.as_ref(), parent);
        self.set_parent(name, parent);
        self.set_parent_opt_list(type_parameters.as_ref(), parent);
        self.set_parent_opt_list(parameters.as_ref(), parent);
        self.set_parent(type_annotation, parent);
        parent
    }

    pub fn add_index_signature(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: IndexSignatureData,
    ) -> NodeIndex {
        let modifiers = data.modifiers.clone();
        let parameters = data.parameters.clone();
        let type_annotation = data.type_annotation;
        let data_index = self.index_signatures.len() as u32;
        self.index_signatures.push(data);
        let parent = self.push_node(kind, pos, end, data_index);
        self.set_parent_opt_list(modifiers.as_ref(), parent);
        self.set_parent_list(&parameters, parent);
        self.set_parent(type_annotation, parent);
        parent
    }

    pub fn add_property_decl(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: PropertyDeclData,
    ) -> NodeIndex {
        let modifiers = data.modifiers.clone();
        let (name, type_annotation, initializer) =
            (data.name, data.type_annotation, data.initializer);
        let data_index = self.property_decls.len() as u32;
        self.property_decls.push(data);
        let parent = self.push_node(kind, pos, end, data_index);
        self.set_parent_opt_list(modifiers.as_ref(), parent);
        self.set_parent(name, parent);
        self.set_parent(type_annotation, parent);
        self.set_parent(initializer, parent);
        parent
    }

    pub fn add_method_decl(&mut self, kind: u16, pos: u32, end: u32, data: MethodDeclData) -> NodeIndex {
        let modifiers = data.modifiers.clone();
        let type_parameters = data.type_parameters.clone();
        let parameters = data.parameters.clone();
        let (name, type_annotation, body) = (data.name, data.type_annotation, data.body);
        let data_index = self.method_decls.len() as u32;
        self.method_decls.push(data);
        let parent = self.push_node(kind, pos, end, data_index);
        self.set_parent_opt_list(modifiers.as_ref(), parent);
        self.set_parent(name, parent);
        self.set_parent_opt_list(type_parameters.as_ref(), parent);
        self.set_parent_list(&parameters, parent);
        self.set_parent(type_annotation, parent);
        self.set_parent(body, parent);
        parent
    }

    pub fn add_accessor(&mut self, kind: u16, pos: u32, end: u32, data: AccessorData) -> NodeIndex {
        let modifiers = data.modifiers.clone();
        let parameters = data.parameters.clone();
        let (name, type_annotation, body) = (data.name, data.type_annotation, data.body);
        let data_index = self.accessors.len() as u32;
        self.accessors.push(data);
        let parent = self.push_node(kind, pos, end, data_index);
        self.set_parent_opt_list(modifiers.as_ref(), parent);
        self.set_parent(name, parent);
        self.set_parent_list(&parameters, parent);
        self.set_parent(type_annotation, parent);
        self.set_parent(body, parent);
        parent
    }

    pub fn add_parameter(&mut self, kind: u16, pos: u32, end: u32, data: ParameterData) -> NodeIndex {
        let (name, type_annotation, initializer) =
            (data.name, data.type_annotation, data.initializer);
        let data_index = self.parameters.len() as u32;
        self.parameters.push(data);
        let parent = self.push_node(kind, pos, end, data_index);
        self.set_parent(name, parent);
        self.set_parent(type_annotation, parent);
        self.set_parent(initializer, parent);
        parent
    }

    pub fn add_type_parameter(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: TypeParameterData,
    ) -> NodeIndex {
        let (name, constraint, default) = (data.name, data.constraint, data.default);
        let data_index = self.type_parameters.len() as u32;
        self.type_parameters.push(data);
        let parent = self.push_node(kind, pos, end, data_index);
        self.set_parent(name, parent);
        self.set_parent(constraint, parent);
        self.set_parent(default, parent);
        parent
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    pub fn add_function(&mut self, kind: u16, pos: u32, end: u32, data: FunctionData) -> NodeIndex {
        let modifiers = data.modifiers.clone();
        let type_parameters = data.type_parameters.clone();
        let parameters = data.parameters.clone();
        let (name, type_annotation, body) = (data.name, data.type_annotation, data.body);
        let data_index = self.functions.len() as u32;
        self.functions.push(data);
        let parent = self.push_node(kind, pos, end, data_index);
        self.set_parent_opt_list(modifiers.as_ref(), parent);
        self.set_parent(name, parent);
        self.set_parent_opt_list(type_parameters.as_ref(), parent);
        self.set_parent_list(&parameters, parent);
        self.set_parent(type_annotation, parent);
        self.set_parent(body, parent);
        parent
    }

    pub fn add_class(&mut self, kind: u16, pos: u32, end: u32, data: ClassData) -> NodeIndex {
        let modifiers = data.modifiers.clone();
        let type_parameters = data.type_parameters.clone();
        let heritage_clauses = data.heritage_clauses.clone();
        let members = data.members.clone();
        let name = data.name;
        let data_index = self.classes.len() as u32;
        self.classes.push(data);
        let parent = self.push_node(kind, pos, end, data_index);
        self.set_parent_opt_list(modifiers.as_ref(), parent);
        self.set_parent(name, parent);
        self.set_parent_opt_list(type_parameters.as_ref(), parent);
        self.set_parent_opt_list(heritage_clauses.as_ref(), parent);
        self.set_parent_list(&members, parent);
        parent
    }

    pub fn add_interface(&mut self, kind: u16, pos: u32, end: u32, data: InterfaceData) -> NodeIndex {
        let modifiers = data.modifiers.clone();
        let type_parameters = data.type_parameters.clone();
        let heritage_clauses = data.heritage_clauses.clone();
        let members = data.members.clone();
        let name = data.name;
        let data_index = self.interfaces.len() as u32;
        self.interfaces.push(data);
        let parent = self.push_node(kind, pos, end, data_index);
        self.set_parent_opt_list(modifiers.as_ref(), parent);
        self.set_parent(name, parent);
        self.set_parent_opt_list(type_parameters.as_ref(), parent);
        self.set_parent_opt_list(heritage_clauses.as_ref(), parent);
        self.set_parent_list(&members, parent);
        parent
    }

    pub fn add_type_alias(&mut self, kind: u16, pos: u32, end: u32, data: TypeAliasData) -> NodeIndex {
        let modifiers = data.modifiers.clone();
        let type_parameters = data.type_parameters.clone();
        let (name, type_node) = (data.name, data.type_node);
        let data_index = self.type_aliases.len() as u32;
        self.type_aliases.push(data);
        let parent = self.push_node(kind, pos, end, data_index);
        self.set_parent_opt_list(modifiers.as_ref(), parent);
        self.set_parent(name, parent);
        self.set_parent_opt_list(type_parameters.as_ref(), parent);
        self.set_parent(type_node, parent);
        parent
    }

    pub fn add_heritage(&mut self, kind: u16, pos: u32, end: u32, data: HeritageData) -> NodeIndex {
        let types = data.types.clone();
        let data_index = self.heritage_clauses.len() as u32;
        self.heritage_clauses.push(data);
        let parent = self.push_node(kind, pos, end, data_index);
        self.set_parent_list(&types, parent);
        parent
    }

    pub fn add_variable(&mut self, kind: u16, pos: u32, end: u32, data: VariableData) -> NodeIndex {
        let modifiers = data.modifiers.clone();
        let declarations = data.declarations.clone();
        let data_index = self.variables.len() as u32;
        self.variables.push(data);
        let parent = self.push_node(kind, pos, end, data_index);
        self.set_parent_opt_list(modifiers.as_ref(), parent);
        self.set_parent_list(&declarations, parent);
        parent
    }

    pub fn add_variable_declaration(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: VariableDeclarationData,
    ) -> NodeIndex {
        let (name, type_annotation, initializer) =
            (data.name, data.type_annotation, data.initializer);
        let data_index = self.variable_declarations.len() as u32;
        self.variable_declarations.push(data);
        let parent = self.push_node(kind, pos, end, data_index);
        self.set_parent(name, parent);
        self.set_parent(type_annotation, parent);
        self.set_parent(initializer, parent);
        parent
    }

    // =========================================================================
    // Statements and expressions
    // =========================================================================

    pub fn add_block(&mut self, kind: u16, pos: u32, end: u32, data: BlockData) -> NodeIndex {
        let statements = data.statements.clone();
        let data_index = self.blocks.len() as u32;
        self.blocks.push(data);
        let parent = self.push_node(kind, pos, end, data_index);
        self.set_parent_list(&statements, parent);
        parent
    }

    pub fn add_type_assertion(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: TypeAssertionData,
    ) -> NodeIndex {
        let (expression, type_node) = (data.expression, data.type_node);
        let data_index = self.type_assertions.len() as u32;
        self.type_assertions.push(data);
        let parent = self.push_node(kind, pos, end, data_index);
        self.set_parent(expression, parent);
        self.set_parent(type_node, parent);
        parent
    }

    pub fn add_binary_expr(&mut self, kind: u16, pos: u32, end: u32, data: BinaryExprData) -> NodeIndex {
        let (left, right) = (data.left, data.right);
        let data_index = self.binary_exprs.len() as u32;
        self.binary_exprs.push(data);
        let parent = self.push_node(kind, pos, end, data_index);
        self.set_parent(left, parent);
        self.set_parent(right, parent);
        parent
    }

    pub fn add_unary_expr(&mut self, kind: u16, pos: u32, end: u32, data: UnaryExprData) -> NodeIndex {
        let operand = data.operand;
        let data_index = self.unary_exprs.len() as u32;
        self.unary_exprs.push(data);
        let parent = self.push_node(kind, pos, end, data_index);
        self.set_parent(operand, parent);
        parent
    }

    pub fn add_access_expr(&mut self, kind: u16, pos: u32, end: u32, data: AccessExprData) -> NodeIndex {
        let (expression, name_or_argument) = (data.expression, data.name_or_argument);
        let data_index = self.access_exprs.len() as u32;
        self.access_exprs.push(data);
        let parent = self.push_node(kind, pos, end, data_index);
        self.set_parent(expression, parent);
        self.set_parent(name_or_argument, parent);
        parent
    }

    pub fn add_call_expr(&mut self, kind: u16, pos: u32, end: u32, data: CallExprData) -> NodeIndex {
        let expression = data.expression;
        let type_arguments = data.type_arguments.clone();
        let arguments = data.arguments.clone();
        let data_index = self.call_exprs.len() as u32;
        self.call_exprs.push(data);
        let parent = self.push_node(kind, pos, end, data_index);
        self.set_parent(expression, parent);
        self.set_parent_opt_list(type_arguments.as_ref(), parent);
        self.set_parent_list(&arguments, parent);
        parent
    }

    pub fn add_parenthesized(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: ParenthesizedData,
    ) -> NodeIndex {
        let expression = data.expression;
        let data_index = self.parenthesized.len() as u32;
        self.parenthesized.push(data);
        let parent = self.push_node(kind, pos, end, data_index);
        self.set_parent(expression, parent);
        parent
    }

    pub fn add_literal_expr(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: LiteralExprData,
    ) -> NodeIndex {
        let elements = data.elements.clone();
        let data_index = self.literal_exprs.len() as u32;
        self.literal_exprs.push(data);
        let parent = self.push_node(kind, pos, end, data_index);
        self.set_parent_list(&elements, parent);
        parent
    }

    pub fn add_expr_statement(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: ExprStatementData,
    ) -> NodeIndex {
        let expression = data.expression;
        let data_index = self.expr_statements.len() as u32;
        self.expr_statements.push(data);
        let parent = self.push_node(kind, pos, end, data_index);
        self.set_parent(expression, parent);
        parent
    }

    pub fn add_return(&mut self, kind: u16, pos: u32, end: u32, data: ReturnData) -> NodeIndex {
        let expression = data.expression;
        let data_index = self.return_statements.len() as u32;
        self.return_statements.push(data);
        let parent = self.push_node(kind, pos, end, data_index);
        self.set_parent(expression, parent);
        parent
    }

    pub fn add_source_file(&mut self, pos: u32, end: u32, data: SourceFileData) -> NodeIndex {
        let statements = data.statements.clone();
        let end_of_file_token = data.end_of_file_token;
        let data_index = self.source_files.len() as u32;
        self.source_files.push(data);
        let parent = self.push_node(super::syntax_kind_ext::SOURCE_FILE, pos, end, data_index);
        self.set_parent_list(&statements, parent);
        self.set_parent(end_of_file_token, parent);
        parent
    }

    // =========================================================================
    // JSDoc
    // =========================================================================

    pub fn add_jsdoc(&mut self, kind: u16, pos: u32, end: u32, data: JSDocData) -> NodeIndex {
        let tags = data.tags.clone();
        let data_index = self.jsdocs.len() as u32;
        self.jsdocs.push(data);
        let parent = self.push_node(kind, pos, end, data_index);
        self.set_parent_list(&tags, parent);
        parent
    }

    pub fn add_jsdoc_tag(&mut self, kind: u16, pos: u32, end: u32, data: JSDocTagData) -> NodeIndex {
        let (tag_name, type_expression, name, full_name) =
            (data.tag_name, data.type_expression, data.name, data.full_name);
        let type_parameters = data.type_parameters.clone();
        let data_index = self.jsdoc_tags.len() as u32;
        self.jsdoc_tags.push(data);
        let parent = self.push_node(kind, pos, end, data_index);
        self.set_parent(tag_name, parent);
        self.set_parent(type_expression, parent);
        self.set_parent_opt_list(type_parameters.as_ref(), parent);
        // For a dotted typedef name, `name` is the right-hand side of
        // `full_name` and keeps that parent.
        if full_name.is_some() {
            self.set_parent(full_name, parent);
        } else {
            self.set_parent(name, parent);
        }
        parent
    }

    pub fn add_jsdoc_type_literal(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: JSDocTypeLiteralData,
    ) -> NodeIndex {
        let property_tags = data.property_tags.clone();
        let data_index = self.jsdoc_type_literals.len() as u32;
        self.jsdoc_type_literals.push(data);
        let parent = self.push_node(kind, pos, end, data_index);
        self.set_parent_list(&property_tags, parent);
        parent
    }
}
