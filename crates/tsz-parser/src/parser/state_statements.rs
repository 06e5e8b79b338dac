//! Parser state - statements and declarations.

use super::state::ParserState;
use crate::parser::node::{
    AccessorData, BlockData, ClassData, ExprStatementData, FunctionData, HeritageData,
    InterfaceData, MethodDeclData, PropertyDeclData, ReturnData, TypeAliasData, VariableData,
    VariableDeclarationData, node_flags,
};
use crate::parser::{NodeIndex, NodeList, syntax_kind_ext};
use tsz_common::diagnostics::{diagnostic_codes, diagnostic_messages};
use tsz_scanner::SyntaxKind;

impl ParserState {
    // =========================================================================
    // Statements
    // =========================================================================

    pub(crate) fn parse_statement(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        match self.token() {
            SyntaxKind::SemicolonToken => {
                self.next_token();
                self.arena
                    .add_token(syntax_kind_ext::EMPTY_STATEMENT, start_pos, self.node_end())
            }
            SyntaxKind::OpenBraceToken => self.parse_block(),
            SyntaxKind::ReturnKeyword => self.parse_return_statement(),
            SyntaxKind::ExportKeyword
            | SyntaxKind::DeclareKeyword
            | SyntaxKind::DefaultKeyword
            | SyntaxKind::AbstractKeyword
            | SyntaxKind::AsyncKeyword
                if self.is_modifier_before_declaration() =>
            {
                let modifiers = self.parse_modifiers();
                self.parse_declaration(start_pos, Some(modifiers))
            }
            _ if self.is_start_of_declaration() => self.parse_declaration(start_pos, None),
            _ if self.is_start_of_expression() => self.parse_expression_statement(),
            _ => {
                self.parse_error_at_current_token(
                    diagnostic_messages::DECLARATION_OR_STATEMENT_EXPECTED,
                    diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED,
                );
                self.skip_to_statement_boundary();
                let node = self.arena.add_token(
                    syntax_kind_ext::EMPTY_STATEMENT,
                    start_pos,
                    self.node_end().max(start_pos),
                );
                self.mark_error(node);
                node
            }
        }
    }

    fn is_start_of_declaration(&mut self) -> bool {
        match self.token() {
            SyntaxKind::VarKeyword
            | SyntaxKind::ConstKeyword
            | SyntaxKind::FunctionKeyword
            | SyntaxKind::ClassKeyword => true,
            SyntaxKind::LetKeyword | SyntaxKind::InterfaceKeyword => {
                let next = self.look_ahead_next_token();
                next == SyntaxKind::Identifier || tsz_scanner::token_is_keyword(next)
            }
            SyntaxKind::TypeKeyword => self.is_type_alias_start(),
            _ => false,
        }
    }

    fn is_modifier_before_declaration(&mut self) -> bool {
        let snapshot = self.scanner.save_state();
        let current = self.current_token;
        let prev_end = self.prev_token_end;
        while matches!(
            self.token(),
            SyntaxKind::ExportKeyword
                | SyntaxKind::DeclareKeyword
                | SyntaxKind::DefaultKeyword
                | SyntaxKind::AbstractKeyword
                | SyntaxKind::AsyncKeyword
        ) {
            self.next_token();
        }
        let result = self.is_start_of_declaration();
        self.scanner.restore_state(snapshot);
        self.current_token = current;
        self.prev_token_end = prev_end;
        result
    }

    fn parse_modifiers(&mut self) -> NodeList {
        let mut modifiers = Vec::new();
        while matches!(
            self.token(),
            SyntaxKind::ExportKeyword
                | SyntaxKind::DeclareKeyword
                | SyntaxKind::DefaultKeyword
                | SyntaxKind::AbstractKeyword
                | SyntaxKind::AsyncKeyword
        ) {
            let pos = self.token_pos();
            let kind = self.token() as u16;
            self.next_token();
            modifiers.push(self.arena.add_token(kind, pos, self.node_end()));
        }
        self.make_node_list(modifiers)
    }

    fn parse_declaration(&mut self, start_pos: u32, modifiers: Option<NodeList>) -> NodeIndex {
        match self.token() {
            SyntaxKind::VarKeyword | SyntaxKind::LetKeyword | SyntaxKind::ConstKeyword => {
                self.parse_variable_statement(start_pos, modifiers)
            }
            SyntaxKind::FunctionKeyword => self.parse_function_declaration(start_pos, modifiers),
            SyntaxKind::ClassKeyword => self.parse_class_declaration(start_pos, modifiers),
            SyntaxKind::InterfaceKeyword => {
                self.parse_interface_declaration(start_pos, modifiers)
            }
            _ => self.parse_type_alias_declaration(start_pos, modifiers),
        }
    }

    /// Consume a statement terminator: `;`, or nothing before `}`, EOF or a
    /// line break.
    pub(crate) fn parse_semicolon(&mut self) -> bool {
        if self.parse_optional(SyntaxKind::SemicolonToken) {
            return true;
        }
        if self.is_token(SyntaxKind::CloseBraceToken)
            || self.is_token(SyntaxKind::EndOfFileToken)
            || self.scanner.has_preceding_line_break()
        {
            return true;
        }
        self.parse_expected(SyntaxKind::SemicolonToken)
    }

    /// Skip to the next `;`, the `}` closing the current block, or a
    /// declaration keyword on a new line.
    pub(crate) fn skip_to_statement_boundary(&mut self) {
        let mut depth = 0u32;
        loop {
            match self.token() {
                SyntaxKind::EndOfFileToken => break,
                SyntaxKind::OpenBraceToken => depth += 1,
                SyntaxKind::CloseBraceToken => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                    if depth == 0 {
                        self.next_token();
                        break;
                    }
                }
                SyntaxKind::SemicolonToken if depth == 0 => {
                    self.next_token();
                    break;
                }
                _ => {}
            }
            self.next_token();
            if depth == 0 && self.scanner.has_preceding_line_break() && self.is_declaration_keyword()
            {
                break;
            }
        }
    }

    fn is_declaration_keyword(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::VarKeyword
                | SyntaxKind::LetKeyword
                | SyntaxKind::ConstKeyword
                | SyntaxKind::FunctionKeyword
                | SyntaxKind::ClassKeyword
                | SyntaxKind::InterfaceKeyword
                | SyntaxKind::TypeKeyword
                | SyntaxKind::ExportKeyword
        )
    }

    pub(crate) fn parse_block(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let statements = self.parse_statement_list(true);
        self.parse_expected(SyntaxKind::CloseBraceToken);
        let end_pos = self.node_end();
        let statements = self.make_node_list(statements);
        self.arena.add_block(
            syntax_kind_ext::BLOCK,
            start_pos,
            end_pos,
            BlockData { statements },
        )
    }

    fn parse_return_statement(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.parse_expected(SyntaxKind::ReturnKeyword);
        let expression = if self.is_token(SyntaxKind::SemicolonToken)
            || self.is_token(SyntaxKind::CloseBraceToken)
            || self.is_token(SyntaxKind::EndOfFileToken)
            || self.scanner.has_preceding_line_break()
        {
            NodeIndex::NONE
        } else {
            self.parse_expression()
        };
        self.parse_semicolon();
        let end_pos = self.node_end();
        self.arena.add_return(
            syntax_kind_ext::RETURN_STATEMENT,
            start_pos,
            end_pos,
            ReturnData { expression },
        )
    }

    fn parse_expression_statement(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let expression = self.parse_expression();
        self.parse_semicolon();
        let end_pos = self.node_end();
        self.arena.add_expr_statement(
            syntax_kind_ext::EXPRESSION_STATEMENT,
            start_pos,
            end_pos,
            ExprStatementData { expression },
        )
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    /// Parse `type Name<T> = T;`
    fn parse_type_alias_declaration(
        &mut self,
        start_pos: u32,
        modifiers: Option<NodeList>,
    ) -> NodeIndex {
        self.parse_expected(SyntaxKind::TypeKeyword);
        let name = self.parse_identifier();
        let type_parameters = self.parse_type_parameters();
        self.parse_expected(SyntaxKind::EqualsToken);
        let type_node = self.parse_type();
        self.parse_semicolon();
        let end_pos = self.node_end();
        self.arena.add_type_alias(
            syntax_kind_ext::TYPE_ALIAS_DECLARATION,
            start_pos,
            end_pos,
            TypeAliasData {
                modifiers,
                name,
                type_parameters,
                type_node,
            },
        )
    }

    /// Parse `let a: T = x, b;`
    fn parse_variable_statement(&mut self, start_pos: u32, modifiers: Option<NodeList>) -> NodeIndex {
        let flags = match self.token() {
            SyntaxKind::LetKeyword => node_flags::LET,
            SyntaxKind::ConstKeyword => node_flags::CONST,
            _ => node_flags::NONE,
        };
        self.next_token();

        let mut declarations = Vec::new();
        loop {
            let decl_start = self.token_pos();
            let name = self.parse_identifier();
            let exclamation_token = self.parse_optional(SyntaxKind::ExclamationToken);
            let type_annotation = self.parse_type_annotation();
            let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
                self.parse_assignment_expression()
            } else {
                NodeIndex::NONE
            };
            let decl_end = self.node_end();
            declarations.push(self.arena.add_variable_declaration(
                syntax_kind_ext::VARIABLE_DECLARATION,
                decl_start,
                decl_end,
                VariableDeclarationData {
                    name,
                    exclamation_token,
                    type_annotation,
                    initializer,
                },
            ));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_semicolon();

        let end_pos = self.node_end();
        let declarations = self.make_node_list(declarations);
        let statement = self.arena.add_variable(
            syntax_kind_ext::VARIABLE_STATEMENT,
            start_pos,
            end_pos,
            VariableData {
                modifiers,
                declarations,
            },
        );
        self.arena.add_flags(statement, flags);
        statement
    }

    /// Parse `function f<T>(a: A): R { ... }`; the body is optional.
    fn parse_function_declaration(
        &mut self,
        start_pos: u32,
        modifiers: Option<NodeList>,
    ) -> NodeIndex {
        self.parse_expected(SyntaxKind::FunctionKeyword);
        self.parse_optional(SyntaxKind::AsteriskToken);
        let name = if self.is_identifier() {
            self.parse_identifier()
        } else {
            NodeIndex::NONE
        };
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameter_list();
        let type_annotation = self.parse_type_annotation();
        let body = self.parse_function_body();
        let end_pos = self.node_end();
        self.arena.add_function(
            syntax_kind_ext::FUNCTION_DECLARATION,
            start_pos,
            end_pos,
            FunctionData {
                modifiers,
                name,
                type_parameters,
                parameters,
                type_annotation,
                body,
            },
        )
    }

    fn parse_function_body(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::OpenBraceToken) {
            self.parse_block()
        } else {
            self.parse_semicolon();
            NodeIndex::NONE
        }
    }

    /// Parse `interface I<T> extends A, B { ... }`
    fn parse_interface_declaration(
        &mut self,
        start_pos: u32,
        modifiers: Option<NodeList>,
    ) -> NodeIndex {
        self.parse_expected(SyntaxKind::InterfaceKeyword);
        let name = self.parse_identifier();
        let type_parameters = self.parse_type_parameters();
        let heritage_clauses = self.parse_heritage_clauses();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let members = self.parse_type_members();
        self.parse_expected(SyntaxKind::CloseBraceToken);
        let end_pos = self.node_end();
        self.arena.add_interface(
            syntax_kind_ext::INTERFACE_DECLARATION,
            start_pos,
            end_pos,
            InterfaceData {
                modifiers,
                name,
                type_parameters,
                heritage_clauses,
                members,
            },
        )
    }

    /// Parse `class C<T> extends B implements I { ... }`
    fn parse_class_declaration(&mut self, start_pos: u32, modifiers: Option<NodeList>) -> NodeIndex {
        self.parse_expected(SyntaxKind::ClassKeyword);
        let name = if self.is_identifier() && !self.is_token(SyntaxKind::ImplementsKeyword) {
            self.parse_identifier()
        } else {
            NodeIndex::NONE
        };
        let type_parameters = self.parse_type_parameters();
        let heritage_clauses = self.parse_heritage_clauses();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let members = self.parse_class_members();
        self.parse_expected(SyntaxKind::CloseBraceToken);
        let end_pos = self.node_end();
        self.arena.add_class(
            syntax_kind_ext::CLASS_DECLARATION,
            start_pos,
            end_pos,
            ClassData {
                modifiers,
                name,
                type_parameters,
                heritage_clauses,
                members,
            },
        )
    }

    fn parse_heritage_clauses(&mut self) -> Option<NodeList> {
        let mut clauses = Vec::new();
        while self.is_token(SyntaxKind::ExtendsKeyword)
            || self.is_token(SyntaxKind::ImplementsKeyword)
        {
            let start_pos = self.token_pos();
            let token = self.token() as u16;
            self.next_token();
            let mut types = Vec::new();
            loop {
                types.push(self.parse_heritage_type());
                if !self.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
            let end_pos = self.node_end();
            let types = self.make_node_list(types);
            clauses.push(self.arena.add_heritage(
                syntax_kind_ext::HERITAGE_CLAUSE,
                start_pos,
                end_pos,
                HeritageData { token, types },
            ));
        }
        if clauses.is_empty() {
            None
        } else {
            Some(self.make_node_list(clauses))
        }
    }

    /// A heritage entry is a plain (possibly dotted, possibly generic) reference.
    fn parse_heritage_type(&mut self) -> NodeIndex {
        if self.is_identifier_or_keyword() {
            self.parse_primary_type()
        } else {
            self.parse_error_identifier_expected();
            self.create_missing_identifier()
        }
    }

    // =========================================================================
    // Class members
    // =========================================================================

    fn parse_class_members(&mut self) -> NodeList {
        let mut members = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            if self.parse_optional(SyntaxKind::SemicolonToken) {
                continue;
            }
            let start = self.token_pos();
            members.push(self.parse_with_jsdoc(Self::parse_class_member));
            if self.token_pos() == start {
                self.next_token();
            }
        }
        self.make_node_list(members)
    }

    fn is_class_member_modifier(&mut self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::PublicKeyword
                | SyntaxKind::PrivateKeyword
                | SyntaxKind::ProtectedKeyword
                | SyntaxKind::StaticKeyword
                | SyntaxKind::ReadonlyKeyword
                | SyntaxKind::AbstractKeyword
                | SyntaxKind::DeclareKeyword
                | SyntaxKind::AsyncKeyword
        ) && !self.next_token_ends_member_name()
    }

    /// Whether the token after the current one means the current token is
    /// itself a member name (`static(): void`, `readonly?: T`).
    fn next_token_ends_member_name(&mut self) -> bool {
        let next = self.look_ahead_next_token();
        matches!(
            next,
            SyntaxKind::OpenParenToken
                | SyntaxKind::QuestionToken
                | SyntaxKind::ExclamationToken
                | SyntaxKind::ColonToken
                | SyntaxKind::EqualsToken
                | SyntaxKind::SemicolonToken
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::LessThanToken
        )
    }

    fn parse_class_member(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();

        let mut modifier_nodes = Vec::new();
        while self.is_class_member_modifier() {
            let pos = self.token_pos();
            let kind = self.token() as u16;
            self.next_token();
            modifier_nodes.push(self.arena.add_token(kind, pos, self.node_end()));
        }
        let modifiers = if modifier_nodes.is_empty() {
            None
        } else {
            Some(self.make_node_list(modifier_nodes))
        };

        if (self.is_token(SyntaxKind::GetKeyword) || self.is_token(SyntaxKind::SetKeyword))
            && !self.next_token_ends_member_name()
        {
            return self.parse_accessor(start_pos, modifiers);
        }

        if self.is_index_signature_start() {
            let node = self.parse_index_signature(start_pos, modifiers);
            self.parse_optional(SyntaxKind::SemicolonToken);
            return node;
        }

        let name = self.parse_property_name();
        let question_token = self.parse_optional(SyntaxKind::QuestionToken);
        if !question_token {
            self.parse_optional(SyntaxKind::ExclamationToken);
        }

        if self.is_token(SyntaxKind::OpenParenToken) || self.is_token(SyntaxKind::LessThanToken)
        {
            let type_parameters = self.parse_type_parameters();
            let parameters = self.parse_parameter_list();
            let type_annotation = self.parse_type_annotation();
            let body = self.parse_function_body();
            let end_pos = self.node_end();
            return self.arena.add_method_decl(
                syntax_kind_ext::METHOD_DECLARATION,
                start_pos,
                end_pos,
                MethodDeclData {
                    modifiers,
                    name,
                    question_token,
                    type_parameters,
                    parameters,
                    type_annotation,
                    body,
                },
            );
        }

        let type_annotation = self.parse_type_annotation();
        let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
            self.parse_assignment_expression()
        } else {
            NodeIndex::NONE
        };
        self.parse_semicolon();
        let end_pos = self.node_end();
        self.arena.add_property_decl(
            syntax_kind_ext::PROPERTY_DECLARATION,
            start_pos,
            end_pos,
            PropertyDeclData {
                modifiers,
                name,
                question_token,
                type_annotation,
                initializer,
            },
        )
    }

    /// Parse `get x(): T { ... }` / `set x(v: T) { ... }`
    fn parse_accessor(&mut self, start_pos: u32, modifiers: Option<NodeList>) -> NodeIndex {
        let kind = if self.is_token(SyntaxKind::GetKeyword) {
            syntax_kind_ext::GET_ACCESSOR
        } else {
            syntax_kind_ext::SET_ACCESSOR
        };
        self.next_token();
        let name = self.parse_property_name();
        let parameters = self.parse_parameter_list();
        let type_annotation = self.parse_type_annotation();
        let body = self.parse_function_body();
        let end_pos = self.node_end();
        self.arena.add_accessor(
            kind,
            start_pos,
            end_pos,
            AccessorData {
                modifiers,
                name,
                parameters,
                type_annotation,
                body,
            },
        )
    }
}
