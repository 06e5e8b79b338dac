//! Parser state - expressions.
//!
//! Expressions only need to be good enough to find the type assertions and
//! annotations inside initializers; object literals are kept as opaque
//! spans.

use super::state::ParserState;
use crate::parser::node::{
    AccessExprData, BinaryExprData, CallExprData, IdentifierData, LiteralExprData,
    ParenthesizedData, TypeAssertionData, UnaryExprData,
};
use crate::parser::{NodeIndex, syntax_kind_ext};
use tsz_common::diagnostics::{diagnostic_codes, diagnostic_messages};
use tsz_scanner::SyntaxKind;

/// Binary operator precedence; higher binds tighter.
fn binary_precedence(kind: SyntaxKind) -> Option<u8> {
    let precedence = match kind {
        SyntaxKind::EqualsToken => 1,
        SyntaxKind::QuestionQuestionToken | SyntaxKind::BarBarToken => 2,
        SyntaxKind::AmpersandAmpersandToken => 3,
        SyntaxKind::BarToken => 4,
        SyntaxKind::CaretToken => 5,
        SyntaxKind::AmpersandToken => 6,
        SyntaxKind::EqualsEqualsToken
        | SyntaxKind::ExclamationEqualsToken
        | SyntaxKind::EqualsEqualsEqualsToken
        | SyntaxKind::ExclamationEqualsEqualsToken => 7,
        SyntaxKind::LessThanToken
        | SyntaxKind::GreaterThanToken
        | SyntaxKind::LessThanEqualsToken
        | SyntaxKind::GreaterThanEqualsToken
        | SyntaxKind::InKeyword
        | SyntaxKind::AsKeyword => 8,
        SyntaxKind::PlusToken | SyntaxKind::MinusToken => 9,
        SyntaxKind::AsteriskToken | SyntaxKind::SlashToken | SyntaxKind::PercentToken => 10,
        _ => return None,
    };
    Some(precedence)
}

impl ParserState {
    pub(crate) fn parse_expression(&mut self) -> NodeIndex {
        self.parse_assignment_expression()
    }

    pub(crate) fn parse_assignment_expression(&mut self) -> NodeIndex {
        self.parse_binary_expression(0)
    }

    pub(crate) fn is_start_of_expression(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::Identifier
                | SyntaxKind::StringLiteral
                | SyntaxKind::NumericLiteral
                | SyntaxKind::BigIntLiteral
                | SyntaxKind::NoSubstitutionTemplateLiteral
                | SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::OpenBraceToken
                | SyntaxKind::LessThanToken
                | SyntaxKind::ExclamationToken
                | SyntaxKind::MinusToken
                | SyntaxKind::PlusToken
                | SyntaxKind::TildeToken
                | SyntaxKind::PlusPlusToken
                | SyntaxKind::MinusMinusToken
                | SyntaxKind::ThisKeyword
                | SyntaxKind::TrueKeyword
                | SyntaxKind::FalseKeyword
                | SyntaxKind::NullKeyword
                | SyntaxKind::NewKeyword
                | SyntaxKind::TypeOfKeyword
                | SyntaxKind::VoidKeyword
        ) || self.is_identifier()
    }

    fn parse_binary_expression(&mut self, min_precedence: u8) -> NodeIndex {
        let start_pos = self.token_pos();
        let mut left = self.parse_unary_expression();
        loop {
            let operator = self.token();
            let Some(precedence) = binary_precedence(operator) else {
                break;
            };
            if precedence <= min_precedence {
                break;
            }
            if operator == SyntaxKind::AsKeyword && self.scanner.has_preceding_line_break() {
                break;
            }
            self.next_token();

            if operator == SyntaxKind::AsKeyword {
                let type_node = self.parse_type();
                let end_pos = self.node_end();
                left = self.arena.add_type_assertion(
                    syntax_kind_ext::AS_EXPRESSION,
                    start_pos,
                    end_pos,
                    TypeAssertionData {
                        expression: left,
                        type_node,
                    },
                );
                continue;
            }

            // Assignment is right-associative.
            let next_min = if operator == SyntaxKind::EqualsToken {
                precedence - 1
            } else {
                precedence
            };
            let right = self.parse_binary_expression(next_min);
            let end_pos = self.node_end();
            left = self.arena.add_binary_expr(
                syntax_kind_ext::BINARY_EXPRESSION,
                start_pos,
                end_pos,
                BinaryExprData {
                    left,
                    operator_token: operator as u16,
                    right,
                },
            );
        }
        left
    }

    fn parse_unary_expression(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        match self.token() {
            SyntaxKind::ExclamationToken
            | SyntaxKind::MinusToken
            | SyntaxKind::PlusToken
            | SyntaxKind::TildeToken
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::VoidKeyword => {
                let operator = self.token() as u16;
                self.next_token();
                let operand = self.parse_unary_expression();
                let end_pos = self.node_end();
                self.arena.add_unary_expr(
                    syntax_kind_ext::PREFIX_UNARY_EXPRESSION,
                    start_pos,
                    end_pos,
                    UnaryExprData { operator, operand },
                )
            }
            SyntaxKind::LessThanToken => {
                // <T>expr
                self.next_token();
                let type_node = self.parse_type();
                self.parse_expected(SyntaxKind::GreaterThanToken);
                let expression = self.parse_unary_expression();
                let end_pos = self.node_end();
                self.arena.add_type_assertion(
                    syntax_kind_ext::TYPE_ASSERTION_EXPRESSION,
                    start_pos,
                    end_pos,
                    TypeAssertionData {
                        expression,
                        type_node,
                    },
                )
            }
            _ => self.parse_left_hand_side_expression(),
        }
    }

    fn parse_left_hand_side_expression(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let is_new = self.parse_optional(SyntaxKind::NewKeyword);
        let mut expression = self.parse_primary_expression();
        loop {
            match self.token() {
                SyntaxKind::DotToken | SyntaxKind::QuestionDotToken => {
                    self.next_token();
                    let name = self.parse_identifier_name();
                    let end_pos = self.node_end();
                    expression = self.arena.add_access_expr(
                        syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION,
                        start_pos,
                        end_pos,
                        AccessExprData {
                            expression,
                            name_or_argument: name,
                        },
                    );
                }
                SyntaxKind::OpenBracketToken => {
                    self.next_token();
                    let argument = self.parse_expression();
                    self.parse_expected(SyntaxKind::CloseBracketToken);
                    let end_pos = self.node_end();
                    expression = self.arena.add_access_expr(
                        syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION,
                        start_pos,
                        end_pos,
                        AccessExprData {
                            expression,
                            name_or_argument: argument,
                        },
                    );
                }
                SyntaxKind::OpenParenToken => {
                    let arguments = self.parse_arguments();
                    let end_pos = self.node_end();
                    expression = self.arena.add_call_expr(
                        syntax_kind_ext::CALL_EXPRESSION,
                        start_pos,
                        end_pos,
                        CallExprData {
                            expression,
                            type_arguments: None,
                            arguments,
                        },
                    );
                }
                // Non-null assertion carries no type information here.
                SyntaxKind::ExclamationToken if !self.scanner.has_preceding_line_break() => {
                    self.next_token();
                }
                _ => break,
            }
        }
        let is_call = self
            .arena
            .get(expression)
            .is_some_and(|n| n.kind == syntax_kind_ext::CALL_EXPRESSION);
        if is_new && !is_call {
            let end_pos = self.node_end();
            expression = self.arena.add_call_expr(
                syntax_kind_ext::CALL_EXPRESSION,
                start_pos,
                end_pos,
                CallExprData {
                    expression,
                    type_arguments: None,
                    arguments: self.make_node_list(Vec::new()),
                },
            );
        }
        expression
    }

    fn parse_arguments(&mut self) -> crate::parser::NodeList {
        self.parse_expected(SyntaxKind::OpenParenToken);
        let mut arguments = Vec::new();
        while !self.is_token(SyntaxKind::CloseParenToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            self.parse_optional(SyntaxKind::DotDotDotToken);
            arguments.push(self.parse_assignment_expression());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseParenToken);
        self.make_node_list(arguments)
    }

    fn parse_primary_expression(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        match self.token() {
            SyntaxKind::StringLiteral
            | SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::NoSubstitutionTemplateLiteral => self.parse_literal_token(),
            SyntaxKind::ThisKeyword
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::NullKeyword => {
                let kind = self.token() as u16;
                self.next_token();
                self.arena.add_token(kind, start_pos, self.node_end())
            }
            SyntaxKind::OpenParenToken => {
                self.next_token();
                let expression = self.parse_expression();
                self.parse_expected(SyntaxKind::CloseParenToken);
                let end_pos = self.node_end();
                self.arena.add_parenthesized(
                    syntax_kind_ext::PARENTHESIZED_EXPRESSION,
                    start_pos,
                    end_pos,
                    ParenthesizedData { expression },
                )
            }
            SyntaxKind::OpenBracketToken => self.parse_array_literal(),
            SyntaxKind::OpenBraceToken => self.parse_object_literal(),
            _ if self.is_identifier() => {
                let escaped_text = self.scanner.get_token_text().to_string();
                self.next_token();
                self.arena.add_identifier(
                    SyntaxKind::Identifier as u16,
                    start_pos,
                    self.node_end(),
                    IdentifierData { escaped_text },
                )
            }
            _ => {
                self.parse_error_at_current_token(
                    diagnostic_messages::EXPRESSION_EXPECTED,
                    diagnostic_codes::EXPRESSION_EXPECTED,
                );
                self.create_missing_identifier()
            }
        }
    }

    fn parse_array_literal(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let mut elements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBracketToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            if self.is_token(SyntaxKind::CommaToken) {
                self.next_token();
                continue;
            }
            self.parse_optional(SyntaxKind::DotDotDotToken);
            elements.push(self.parse_assignment_expression());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBracketToken);
        let end_pos = self.node_end();
        let elements = self.make_node_list(elements);
        self.arena.add_literal_expr(
            syntax_kind_ext::ARRAY_LITERAL_EXPRESSION,
            start_pos,
            end_pos,
            LiteralExprData { elements },
        )
    }

    /// Object literals are skipped as a balanced `{ ... }` span.
    fn parse_object_literal(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let mut depth = 0u32;
        loop {
            match self.token() {
                SyntaxKind::OpenBraceToken => depth += 1,
                SyntaxKind::CloseBraceToken => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.next_token();
                        break;
                    }
                }
                SyntaxKind::EndOfFileToken => {
                    self.parse_expected(SyntaxKind::CloseBraceToken);
                    break;
                }
                _ => {}
            }
            self.next_token();
        }
        let end_pos = self.node_end();
        let elements = self.make_node_list(Vec::new());
        self.arena.add_literal_expr(
            syntax_kind_ext::OBJECT_LITERAL_EXPRESSION,
            start_pos,
            end_pos,
            LiteralExprData { elements },
        )
    }
}
