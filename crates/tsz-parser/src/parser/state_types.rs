//! Parser state - type parsing.
//!
//! `in_jsdoc` enables the `JSDoc` type forms: `*`, `?`, `?T`, `!T`, `T?`,
//! `T!`, `T=`, `...T` and `Array.<T>`.

use super::state::ParserState;
use crate::parser::node::{
    ArrayTypeData, CompositeTypeData, FunctionTypeData, IdentifierData, IndexSignatureData,
    LiteralData, LiteralTypeData, MappedTypeData, ParameterData, QualifiedNameData,
    SignatureData, TypeLiteralData, TypeOperatorData, TypeParameterData, TypeRefData,
    UnaryExprData, WrappedTypeData, node_flags,
};
use crate::parser::{NodeIndex, NodeList, syntax_kind_ext};
use tsz_scanner::SyntaxKind;

impl ParserState {
    // =========================================================================
    // Parse Methods - Types
    // =========================================================================

    /// Parse a type: function types, unions, intersections and everything below.
    pub(crate) fn parse_type(&mut self) -> NodeIndex {
        if !self.enter_type() {
            self.parse_error_type_expected();
            return self.create_missing_node(SyntaxKind::Unknown);
        }
        let result = if self.is_start_of_function_type() {
            self.parse_function_type()
        } else {
            self.parse_union_type()
        };
        self.exit_type();
        result
    }

    /// `: T` if present, otherwise `NodeIndex::NONE`.
    pub(crate) fn parse_type_annotation(&mut self) -> NodeIndex {
        if self.parse_optional(SyntaxKind::ColonToken) {
            self.parse_type()
        } else {
            NodeIndex::NONE
        }
    }

    fn is_start_of_function_type(&mut self) -> bool {
        if self.is_token(SyntaxKind::LessThanToken) {
            return true;
        }
        if !self.is_token(SyntaxKind::OpenParenToken) {
            return false;
        }
        let snapshot = self.scanner.save_state();
        let current = self.current_token;
        let prev_end = self.prev_token_end;

        let mut depth = 0u32;
        loop {
            match self.token() {
                SyntaxKind::OpenParenToken => depth += 1,
                SyntaxKind::CloseParenToken => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.next_token();
                        break;
                    }
                }
                SyntaxKind::EndOfFileToken => break,
                _ => {}
            }
            self.next_token();
        }
        let is_arrow = self.is_token(SyntaxKind::EqualsGreaterThanToken);

        self.scanner.restore_state(snapshot);
        self.current_token = current;
        self.prev_token_end = prev_end;
        is_arrow
    }

    /// Parse `<T>(a: A) => R`
    fn parse_function_type(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameter_list();
        self.parse_expected(SyntaxKind::EqualsGreaterThanToken);
        let type_annotation = self.parse_type();
        let end_pos = self.node_end();
        self.arena.add_function_type(
            syntax_kind_ext::FUNCTION_TYPE,
            start_pos,
            end_pos,
            FunctionTypeData {
                type_parameters,
                parameters,
                type_annotation,
            },
        )
    }

    /// Parse union type: A | B | C
    pub(crate) fn parse_union_type(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();

        // Optional leading | (type T = | A | B)
        let has_leading_bar = self.parse_optional(SyntaxKind::BarToken);
        let first = self.parse_intersection_type();
        if !has_leading_bar && !self.is_token(SyntaxKind::BarToken) {
            return first;
        }

        let mut types = vec![first];
        while self.parse_optional(SyntaxKind::BarToken) {
            types.push(self.parse_intersection_type());
        }

        let end_pos = self.node_end();
        let types = self.make_node_list(types);
        self.arena.add_composite_type(
            syntax_kind_ext::UNION_TYPE,
            start_pos,
            end_pos,
            CompositeTypeData { types },
        )
    }

    /// Parse intersection type: A & B & C
    pub(crate) fn parse_intersection_type(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();

        let has_leading_amp = self.parse_optional(SyntaxKind::AmpersandToken);
        let first = self.parse_type_operator();
        if !has_leading_amp && !self.is_token(SyntaxKind::AmpersandToken) {
            return first;
        }

        let mut types = vec![first];
        while self.parse_optional(SyntaxKind::AmpersandToken) {
            types.push(self.parse_type_operator());
        }

        let end_pos = self.node_end();
        let types = self.make_node_list(types);
        self.arena.add_composite_type(
            syntax_kind_ext::INTERSECTION_TYPE,
            start_pos,
            end_pos,
            CompositeTypeData { types },
        )
    }

    /// Parse `keyof T`, `readonly T[]`, `unique symbol`
    fn parse_type_operator(&mut self) -> NodeIndex {
        let operator = self.token();
        if !matches!(
            operator,
            SyntaxKind::KeyOfKeyword | SyntaxKind::ReadonlyKeyword | SyntaxKind::UniqueKeyword
        ) {
            return self.parse_postfix_type();
        }
        let start_pos = self.token_pos();
        self.next_token();
        let type_node = self.parse_type_operator();
        let end_pos = self.node_end();
        self.arena.add_type_operator(
            syntax_kind_ext::TYPE_OPERATOR,
            start_pos,
            end_pos,
            TypeOperatorData {
                operator: operator as u16,
                type_node,
            },
        )
    }

    /// Parse `T[]` and the `JSDoc` postfix forms `T=`, `T?`, `T!`.
    fn parse_postfix_type(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let mut type_node = self.parse_primary_type();
        loop {
            let kind = match self.token() {
                SyntaxKind::OpenBracketToken
                    if !self.scanner.has_preceding_line_break()
                        && self.look_ahead_next_token() == SyntaxKind::CloseBracketToken =>
                {
                    self.next_token();
                    self.next_token();
                    let end_pos = self.node_end();
                    type_node = self.arena.add_array_type(
                        syntax_kind_ext::ARRAY_TYPE,
                        start_pos,
                        end_pos,
                        ArrayTypeData {
                            element_type: type_node,
                        },
                    );
                    continue;
                }
                SyntaxKind::EqualsToken if self.in_jsdoc => syntax_kind_ext::JSDOC_OPTIONAL_TYPE,
                SyntaxKind::QuestionToken if self.in_jsdoc => syntax_kind_ext::JSDOC_NULLABLE_TYPE,
                SyntaxKind::ExclamationToken if self.in_jsdoc => {
                    syntax_kind_ext::JSDOC_NON_NULLABLE_TYPE
                }
                _ => break,
            };
            self.next_token();
            let end_pos = self.node_end();
            type_node = self
                .arena
                .add_wrapped_type(kind, start_pos, end_pos, WrappedTypeData { type_node });
        }
        type_node
    }

    /// Parse a primary type, including the `JSDoc` prefix forms.
    pub(crate) fn parse_primary_type(&mut self) -> NodeIndex {
        if !self.in_jsdoc {
            return self.parse_primary_type_base();
        }
        let start_pos = self.token_pos();
        let kind = match self.token() {
            SyntaxKind::AsteriskToken => {
                self.next_token();
                return self.arena.add_token(
                    syntax_kind_ext::JSDOC_ALL_TYPE,
                    start_pos,
                    self.node_end(),
                );
            }
            SyntaxKind::QuestionToken => {
                self.next_token();
                if self.is_jsdoc_unknown_type_terminator() {
                    return self.arena.add_token(
                        syntax_kind_ext::JSDOC_UNKNOWN_TYPE,
                        start_pos,
                        self.node_end(),
                    );
                }
                syntax_kind_ext::JSDOC_NULLABLE_TYPE
            }
            SyntaxKind::ExclamationToken => {
                self.next_token();
                syntax_kind_ext::JSDOC_NON_NULLABLE_TYPE
            }
            SyntaxKind::DotDotDotToken => {
                self.next_token();
                syntax_kind_ext::JSDOC_VARIADIC_TYPE
            }
            _ => return self.parse_primary_type_base(),
        };
        let type_node = self.parse_type_operator();
        let end_pos = self.node_end();
        self.arena
            .add_wrapped_type(kind, start_pos, end_pos, WrappedTypeData { type_node })
    }

    fn is_jsdoc_unknown_type_terminator(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::CloseBraceToken
                | SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken
                | SyntaxKind::CommaToken
                | SyntaxKind::GreaterThanToken
                | SyntaxKind::EqualsToken
                | SyntaxKind::BarToken
                | SyntaxKind::EndOfFileToken
        )
    }

    fn parse_primary_type_base(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        match self.token() {
            SyntaxKind::AnyKeyword
            | SyntaxKind::UnknownKeyword
            | SyntaxKind::StringKeyword
            | SyntaxKind::NumberKeyword
            | SyntaxKind::BooleanKeyword
            | SyntaxKind::BigIntKeyword
            | SyntaxKind::SymbolKeyword
            | SyntaxKind::ObjectKeyword
            | SyntaxKind::NeverKeyword
            | SyntaxKind::UndefinedKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::ThisKeyword
                if self.look_ahead_next_token() != SyntaxKind::DotToken =>
            {
                let kind = self.token() as u16;
                self.next_token();
                self.arena.add_token(kind, start_pos, self.node_end())
            }
            SyntaxKind::StringLiteral
            | SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::NoSubstitutionTemplateLiteral
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::MinusToken => self.parse_literal_type(),
            SyntaxKind::OpenBraceToken => {
                if self.look_ahead_is_mapped_type_start() {
                    self.parse_mapped_type()
                } else {
                    self.parse_type_literal()
                }
            }
            SyntaxKind::OpenParenToken => {
                self.next_token();
                let type_node = self.parse_type();
                self.parse_expected(SyntaxKind::CloseParenToken);
                let end_pos = self.node_end();
                self.arena.add_wrapped_type(
                    syntax_kind_ext::PARENTHESIZED_TYPE,
                    start_pos,
                    end_pos,
                    WrappedTypeData { type_node },
                )
            }
            _ if self.is_identifier_or_keyword() && !self.is_reserved_in_type_position() => {
                self.parse_type_reference()
            }
            _ => {
                self.parse_error_type_expected();
                self.create_missing_node(SyntaxKind::Unknown)
            }
        }
    }

    fn is_reserved_in_type_position(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::ClassKeyword
                | SyntaxKind::FunctionKeyword
                | SyntaxKind::InterfaceKeyword
                | SyntaxKind::ReturnKeyword
                | SyntaxKind::VarKeyword
                | SyntaxKind::ConstKeyword
                | SyntaxKind::LetKeyword
                | SyntaxKind::ExportKeyword
                | SyntaxKind::ImportKeyword
                | SyntaxKind::IfKeyword
        )
    }

    /// Parse `"a"`, `1`, `-1`, `true`, `false` in a type position.
    fn parse_literal_type(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let literal = if self.is_token(SyntaxKind::MinusToken) {
            self.next_token();
            let operand = self.parse_literal_token();
            let end_pos = self.node_end();
            self.arena.add_unary_expr(
                syntax_kind_ext::PREFIX_UNARY_EXPRESSION,
                start_pos,
                end_pos,
                UnaryExprData {
                    operator: SyntaxKind::MinusToken as u16,
                    operand,
                },
            )
        } else {
            self.parse_literal_token()
        };
        let end_pos = self.node_end();
        self.arena.add_literal_type(
            syntax_kind_ext::LITERAL_TYPE,
            start_pos,
            end_pos,
            LiteralTypeData { literal },
        )
    }

    /// Parse a literal token (string, number, template, `true`, `false`).
    pub(crate) fn parse_literal_token(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let kind = self.token();
        match kind {
            SyntaxKind::StringLiteral
            | SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::NoSubstitutionTemplateLiteral => {
                let text = self.scanner.get_token_value();
                self.next_token();
                self.arena.add_literal(
                    kind as u16,
                    start_pos,
                    self.node_end(),
                    LiteralData { text },
                )
            }
            SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword | SyntaxKind::NullKeyword => {
                self.next_token();
                self.arena.add_token(kind as u16, start_pos, self.node_end())
            }
            _ => {
                self.parse_error_type_expected();
                self.create_missing_node(SyntaxKind::Unknown)
            }
        }
    }

    /// Parse `A.B<T>`; in `JSDoc` also `Array.<T>`.
    fn parse_type_reference(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let mut type_name = self.parse_identifier_name();
        let mut jsdoc_dot_type_arguments = false;
        while self.is_token(SyntaxKind::DotToken) {
            if self.look_ahead_next_token() == SyntaxKind::LessThanToken {
                if self.in_jsdoc {
                    self.next_token();
                    jsdoc_dot_type_arguments = true;
                }
                break;
            }
            self.next_token();
            let right = self.parse_identifier_name();
            let end_pos = self.node_end();
            type_name = self.arena.add_qualified_name(
                syntax_kind_ext::QUALIFIED_NAME,
                start_pos,
                end_pos,
                QualifiedNameData {
                    left: type_name,
                    right,
                },
            );
        }

        let type_arguments = if self.is_token(SyntaxKind::LessThanToken)
            && (jsdoc_dot_type_arguments || !self.scanner.has_preceding_line_break())
        {
            Some(self.parse_type_arguments())
        } else {
            None
        };

        let end_pos = self.node_end();
        self.arena.add_type_ref(
            syntax_kind_ext::TYPE_REFERENCE,
            start_pos,
            end_pos,
            TypeRefData {
                type_name,
                type_arguments,
                is_jsdoc_dot_syntax: jsdoc_dot_type_arguments,
            },
        )
    }

    /// Parse `<A, B>`
    pub(crate) fn parse_type_arguments(&mut self) -> NodeList {
        self.parse_expected(SyntaxKind::LessThanToken);
        let mut args = Vec::new();
        while !self.is_token(SyntaxKind::GreaterThanToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            args.push(self.parse_type());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::GreaterThanToken);
        self.make_node_list(args)
    }

    /// Identifier node from any identifier or keyword token.
    pub(crate) fn parse_identifier_name(&mut self) -> NodeIndex {
        if !self.is_identifier_or_keyword() {
            self.parse_error_identifier_expected();
            return self.create_missing_identifier();
        }
        self.consume_identifier()
    }

    /// Identifier node for a binding name; reserved words are rejected.
    pub(crate) fn parse_identifier(&mut self) -> NodeIndex {
        if !self.is_identifier() {
            self.parse_error_identifier_expected();
            return self.create_missing_identifier();
        }
        self.consume_identifier()
    }

    fn consume_identifier(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let escaped_text = self.scanner.get_token_text().to_string();
        self.next_token();
        self.arena.add_identifier(
            SyntaxKind::Identifier as u16,
            start_pos,
            self.node_end(),
            IdentifierData { escaped_text },
        )
    }

    pub(crate) fn create_missing_identifier(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let index = self.arena.add_identifier(
            SyntaxKind::Identifier as u16,
            pos,
            pos,
            IdentifierData {
                escaped_text: String::new(),
            },
        );
        self.arena.add_flags(index, node_flags::THIS_NODE_HAS_ERROR);
        index
    }

    // =========================================================================
    // Object types
    // =========================================================================

    /// Parse `{ a: T; b(): U }`
    pub(crate) fn parse_type_literal(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let members = self.parse_type_members();
        self.parse_expected(SyntaxKind::CloseBraceToken);
        let end_pos = self.node_end();
        self.arena.add_type_literal(
            syntax_kind_ext::TYPE_LITERAL,
            start_pos,
            end_pos,
            TypeLiteralData { members },
        )
    }

    /// Parse members up to (not including) the closing `}`.
    pub(crate) fn parse_type_members(&mut self) -> NodeList {
        let mut members = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let start = self.token_pos();
            members.push(self.parse_with_jsdoc(Self::parse_type_member));
            if !self.parse_optional(SyntaxKind::SemicolonToken) {
                self.parse_optional(SyntaxKind::CommaToken);
            }
            if self.token_pos() == start {
                self.next_token();
            }
        }
        self.make_node_list(members)
    }

    fn parse_type_member(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        if self.is_token(SyntaxKind::OpenParenToken) || self.is_token(SyntaxKind::LessThanToken)
        {
            return self.parse_signature_member(
                syntax_kind_ext::CALL_SIGNATURE,
                start_pos,
                None,
                NodeIndex::NONE,
                false,
            );
        }
        if self.is_token(SyntaxKind::NewKeyword)
            && matches!(
                self.look_ahead_next_token(),
                SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
            )
        {
            self.next_token();
            return self.parse_signature_member(
                syntax_kind_ext::CONSTRUCT_SIGNATURE,
                start_pos,
                None,
                NodeIndex::NONE,
                false,
            );
        }

        let modifiers = if self.is_token(SyntaxKind::ReadonlyKeyword)
            && !matches!(
                self.look_ahead_next_token(),
                SyntaxKind::OpenParenToken
                    | SyntaxKind::QuestionToken
                    | SyntaxKind::ColonToken
                    | SyntaxKind::SemicolonToken
                    | SyntaxKind::CommaToken
                    | SyntaxKind::CloseBraceToken
            ) {
            let pos = self.token_pos();
            self.next_token();
            let modifier =
                self.arena
                    .add_token(SyntaxKind::ReadonlyKeyword as u16, pos, self.node_end());
            Some(self.make_node_list(vec![modifier]))
        } else {
            None
        };

        if self.is_index_signature_start() {
            return self.parse_index_signature(start_pos, modifiers);
        }

        let name = self.parse_property_name();
        let question_token = self.parse_optional(SyntaxKind::QuestionToken);
        if self.is_token(SyntaxKind::OpenParenToken) || self.is_token(SyntaxKind::LessThanToken)
        {
            return self.parse_signature_member(
                syntax_kind_ext::METHOD_SIGNATURE,
                start_pos,
                modifiers,
                name,
                question_token,
            );
        }

        let type_annotation = self.parse_type_annotation();
        let end_pos = self.node_end();
        self.arena.add_signature(
            syntax_kind_ext::PROPERTY_SIGNATURE,
            start_pos,
            end_pos,
            SignatureData {
                modifiers,
                name,
                question_token,
                type_parameters: None,
                parameters: None,
                type_annotation,
            },
        )
    }

    fn parse_signature_member(
        &mut self,
        kind: u16,
        start_pos: u32,
        modifiers: Option<NodeList>,
        name: NodeIndex,
        question_token: bool,
    ) -> NodeIndex {
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameter_list();
        let type_annotation = self.parse_type_annotation();
        let end_pos = self.node_end();
        self.arena.add_signature(
            kind,
            start_pos,
            end_pos,
            SignatureData {
                modifiers,
                name,
                question_token,
                type_parameters,
                parameters: Some(parameters),
                type_annotation,
            },
        )
    }

    /// Property name: identifier, keyword, string or numeric literal.
    pub(crate) fn parse_property_name(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral => self.parse_literal_token(),
            _ => self.parse_identifier_name(),
        }
    }

    /// `[` followed by `name :`
    pub(crate) fn is_index_signature_start(&mut self) -> bool {
        if !self.is_token(SyntaxKind::OpenBracketToken) {
            return false;
        }
        let snapshot = self.scanner.save_state();
        let current = self.current_token;
        let prev_end = self.prev_token_end;
        self.next_token();
        let result = self.is_identifier() && {
            self.next_token();
            self.is_token(SyntaxKind::ColonToken)
        };
        self.scanner.restore_state(snapshot);
        self.current_token = current;
        self.prev_token_end = prev_end;
        result
    }

    /// Parse `[key: K]: T`
    pub(crate) fn parse_index_signature(
        &mut self,
        start_pos: u32,
        modifiers: Option<NodeList>,
    ) -> NodeIndex {
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let param_start = self.token_pos();
        let name = self.parse_identifier();
        let type_annotation = self.parse_type_annotation();
        let param_end = self.node_end();
        let parameter = self.arena.add_parameter(
            syntax_kind_ext::PARAMETER,
            param_start,
            param_end,
            ParameterData {
                dot_dot_dot_token: false,
                name,
                question_token: false,
                type_annotation,
                initializer: NodeIndex::NONE,
            },
        );
        self.parse_expected(SyntaxKind::CloseBracketToken);
        let type_annotation = self.parse_type_annotation();
        let end_pos = self.node_end();
        let parameters = self.make_node_list(vec![parameter]);
        self.arena.add_index_signature(
            syntax_kind_ext::INDEX_SIGNATURE,
            start_pos,
            end_pos,
            IndexSignatureData {
                modifiers,
                parameters,
                type_annotation,
            },
        )
    }

    /// `{` [`+`|`-`] [`readonly`] `[` name `in`
    pub(crate) fn look_ahead_is_mapped_type_start(&mut self) -> bool {
        let snapshot = self.scanner.save_state();
        let current = self.current_token;
        let prev_end = self.prev_token_end;

        self.next_token();
        if self.is_token(SyntaxKind::PlusToken) || self.is_token(SyntaxKind::MinusToken) {
            self.next_token();
        }
        self.parse_optional(SyntaxKind::ReadonlyKeyword);
        let result = self.is_token(SyntaxKind::OpenBracketToken) && {
            self.next_token();
            self.is_identifier() && {
                self.next_token();
                self.is_token(SyntaxKind::InKeyword)
            }
        };

        self.scanner.restore_state(snapshot);
        self.current_token = current;
        self.prev_token_end = prev_end;
        result
    }

    /// Parse `{ readonly [K in T]?: U }`
    fn parse_mapped_type(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);

        let readonly_token = if self.parse_optional(SyntaxKind::PlusToken)
            || self.parse_optional(SyntaxKind::MinusToken)
        {
            self.parse_expected(SyntaxKind::ReadonlyKeyword)
        } else {
            self.parse_optional(SyntaxKind::ReadonlyKeyword)
        };

        self.parse_expected(SyntaxKind::OpenBracketToken);
        let param_start = self.token_pos();
        let name = self.parse_identifier();
        self.parse_expected(SyntaxKind::InKeyword);
        let constraint = self.parse_type();
        let param_end = self.node_end();
        let type_parameter = self.arena.add_type_parameter(
            syntax_kind_ext::TYPE_PARAMETER,
            param_start,
            param_end,
            TypeParameterData {
                name,
                constraint,
                default: NodeIndex::NONE,
            },
        );
        self.parse_expected(SyntaxKind::CloseBracketToken);

        let question_token = if self.parse_optional(SyntaxKind::PlusToken)
            || self.parse_optional(SyntaxKind::MinusToken)
        {
            self.parse_expected(SyntaxKind::QuestionToken)
        } else {
            self.parse_optional(SyntaxKind::QuestionToken)
        };
        let type_node = self.parse_type_annotation();
        self.parse_optional(SyntaxKind::SemicolonToken);
        self.parse_expected(SyntaxKind::CloseBraceToken);

        let end_pos = self.node_end();
        self.arena.add_mapped_type(
            syntax_kind_ext::MAPPED_TYPE,
            start_pos,
            end_pos,
            MappedTypeData {
                readonly_token,
                type_parameter,
                question_token,
                type_node,
            },
        )
    }

    // =========================================================================
    // Signature parts
    // =========================================================================

    /// `<T extends C = D, ...>` if present.
    pub(crate) fn parse_type_parameters(&mut self) -> Option<NodeList> {
        if !self.parse_optional(SyntaxKind::LessThanToken) {
            return None;
        }
        let mut params = Vec::new();
        while !self.is_token(SyntaxKind::GreaterThanToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let start_pos = self.token_pos();
            let name = self.parse_identifier();
            let constraint = if self.parse_optional(SyntaxKind::ExtendsKeyword) {
                self.parse_type()
            } else {
                NodeIndex::NONE
            };
            let default = if self.parse_optional(SyntaxKind::EqualsToken) {
                self.parse_type()
            } else {
                NodeIndex::NONE
            };
            let end_pos = self.node_end();
            params.push(self.arena.add_type_parameter(
                syntax_kind_ext::TYPE_PARAMETER,
                start_pos,
                end_pos,
                TypeParameterData {
                    name,
                    constraint,
                    default,
                },
            ));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::GreaterThanToken);
        Some(self.make_node_list(params))
    }

    /// `(a: A, b?: B, ...rest: R[])`
    pub(crate) fn parse_parameter_list(&mut self) -> NodeList {
        self.parse_expected(SyntaxKind::OpenParenToken);
        let mut params = Vec::new();
        while !self.is_token(SyntaxKind::CloseParenToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            params.push(self.parse_parameter());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseParenToken);
        self.make_node_list(params)
    }

    fn parse_parameter(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        // Parameter properties: accessibility and readonly are accepted and dropped.
        while matches!(
            self.token(),
            SyntaxKind::PublicKeyword
                | SyntaxKind::PrivateKeyword
                | SyntaxKind::ProtectedKeyword
                | SyntaxKind::ReadonlyKeyword
        ) && self.look_ahead_next_token() != SyntaxKind::ColonToken
        {
            self.next_token();
        }
        let dot_dot_dot_token = self.parse_optional(SyntaxKind::DotDotDotToken);
        let name = if self.is_token(SyntaxKind::ThisKeyword) {
            self.parse_identifier_name()
        } else {
            self.parse_identifier()
        };
        let question_token = self.parse_optional(SyntaxKind::QuestionToken);
        let type_annotation = self.parse_type_annotation();
        let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
            self.parse_assignment_expression()
        } else {
            NodeIndex::NONE
        };
        let end_pos = self.node_end();
        self.arena.add_parameter(
            syntax_kind_ext::PARAMETER,
            start_pos,
            end_pos,
            ParameterData {
                dot_dot_dot_token,
                name,
                question_token,
                type_annotation,
                initializer,
            },
        )
    }
}
