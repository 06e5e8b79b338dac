//! Parser state - `JSDoc` comments.
//!
//! `/** ... */` blocks are parsed out of the trivia that precedes a
//! statement or member. The comment body is tokenized with the scanner's
//! `JSDoc` mode; `{...}` type expressions are re-scanned in TypeScript mode
//! and parsed with `parse_type` under `in_jsdoc`.
//!
//! `@property` tags that follow an object-shaped `@typedef` are gathered
//! into a `JSDOC_TYPE_LITERAL` that replaces the typedef's type expression.

use super::state::ParserState;
use crate::parser::node::{
    IdentifierData, JSDocData, JSDocTagData, JSDocTypeLiteralData, QualifiedNameData,
    TypeParameterData, WrappedTypeData, node_flags,
};
use crate::parser::{NodeIndex, syntax_kind_ext};
use tsz_common::comments::{CommentRange, is_jsdoc_comment, scan_trivia_comments};
use tsz_common::diagnostics::{diagnostic_codes, diagnostic_messages, format_message};
use tsz_scanner::{ScannerSnapshot, SyntaxKind, token_is_keyword};

/// Scanner position plus the `JSDoc` line state, for look-ahead.
struct JsDocCursor {
    snapshot: ScannerSnapshot,
    token: SyntaxKind,
    prev_token_end: u32,
    line_start: bool,
    margin_allowed: bool,
    after_space: bool,
}

const fn empty_tag(tag_name: NodeIndex) -> JSDocTagData {
    JSDocTagData {
        tag_name,
        type_expression: NodeIndex::NONE,
        name: NodeIndex::NONE,
        full_name: NodeIndex::NONE,
        is_bracketed: false,
        is_name_first: false,
        type_parameters: None,
        comment: String::new(),
    }
}

impl ParserState {
    /// Parse the `JSDoc` blocks in the trivia before the current token.
    pub(crate) fn parse_leading_jsdoc(&mut self) -> Vec<NodeIndex> {
        if !self.scanner.has_preceding_jsdoc_comment() {
            return Vec::new();
        }
        let text = self.scanner.source_text_arc();
        let (comments, _) = scan_trivia_comments(&text, self.scanner.get_token_full_start());
        comments
            .iter()
            .filter(|range| is_jsdoc_comment(range, &text))
            .map(|range| self.parse_jsdoc_comment(range))
            .collect()
    }

    /// Parse one `/** ... */` comment into a `JSDOC` node.
    ///
    /// The main token stream is left where it was.
    pub(crate) fn parse_jsdoc_comment(&mut self, range: &CommentRange) -> NodeIndex {
        let first_node = self.arena.len();
        let saved = self.save_jsdoc_cursor();

        let text = self.scanner.source_text_arc();
        let end = range.end as usize;
        let content_start = (range.pos as usize + 3).min(end);
        let terminated = text
            .get(content_start..end)
            .is_some_and(|body| body.ends_with("*/"));
        let content_end = if terminated { end - 2 } else { end };

        self.scanner.reset_to_range(content_start, content_end);
        self.current_token = SyntaxKind::WhitespaceTrivia;
        self.jsdoc_line_start = true;
        self.jsdoc_margin_allowed = false;
        self.jsdoc_after_space = true;
        self.next_jsdoc_token();

        let mut comment = String::new();
        let mut tags = Vec::new();
        while !self.is_token(SyntaxKind::EndOfFileToken) {
            if self.is_jsdoc_tag_start() {
                tags.push(self.parse_jsdoc_tag());
                continue;
            }
            self.append_jsdoc_comment_text(&mut comment);
            self.next_jsdoc_token();
        }

        let tags = self.make_node_list(tags);
        let jsdoc = self.arena.add_jsdoc(
            syntax_kind_ext::JSDOC,
            range.pos,
            range.end,
            JSDocData {
                comment: comment.trim().to_string(),
                tags,
            },
        );
        for index in first_node..self.arena.len() {
            self.arena.add_flags(NodeIndex(index as u32), node_flags::JSDOC);
        }

        self.restore_jsdoc_cursor(saved);
        jsdoc
    }

    // =========================================================================
    // JSDoc token cursor
    // =========================================================================

    /// Advance in `JSDoc` mode. One leading `*` per line is margin and is
    /// skipped.
    fn next_jsdoc_token(&mut self) -> SyntaxKind {
        match self.current_token {
            SyntaxKind::NewLineTrivia => {
                self.jsdoc_line_start = true;
                self.jsdoc_margin_allowed = true;
                self.jsdoc_after_space = true;
            }
            SyntaxKind::WhitespaceTrivia => self.jsdoc_after_space = true,
            _ => {
                self.jsdoc_line_start = false;
                self.jsdoc_margin_allowed = false;
                self.jsdoc_after_space = false;
            }
        }
        loop {
            self.prev_token_end = self.scanner.get_token_end() as u32;
            self.current_token = self.scanner.scan_jsdoc_token();
            if self.current_token == SyntaxKind::AsteriskToken && self.jsdoc_margin_allowed {
                self.jsdoc_margin_allowed = false;
                self.jsdoc_after_space = true;
                continue;
            }
            return self.current_token;
        }
    }

    fn save_jsdoc_cursor(&self) -> JsDocCursor {
        JsDocCursor {
            snapshot: self.scanner.save_state(),
            token: self.current_token,
            prev_token_end: self.prev_token_end,
            line_start: self.jsdoc_line_start,
            margin_allowed: self.jsdoc_margin_allowed,
            after_space: self.jsdoc_after_space,
        }
    }

    fn restore_jsdoc_cursor(&mut self, cursor: JsDocCursor) {
        self.scanner.restore_state(cursor.snapshot);
        self.current_token = cursor.token;
        self.prev_token_end = cursor.prev_token_end;
        self.jsdoc_line_start = cursor.line_start;
        self.jsdoc_margin_allowed = cursor.margin_allowed;
        self.jsdoc_after_space = cursor.after_space;
    }

    fn skip_jsdoc_whitespace(&mut self) {
        while matches!(
            self.current_token,
            SyntaxKind::WhitespaceTrivia | SyntaxKind::NewLineTrivia
        ) {
            self.next_jsdoc_token();
        }
    }

    /// `@` starts a tag only at the start of a line or after whitespace.
    fn is_jsdoc_tag_start(&self) -> bool {
        self.is_token(SyntaxKind::AtToken) && (self.jsdoc_line_start || self.jsdoc_after_space)
    }

    fn is_jsdoc_identifier(&self) -> bool {
        self.is_token(SyntaxKind::Identifier) || token_is_keyword(self.current_token)
    }

    fn parse_jsdoc_identifier(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let end = self.token_end();
        let escaped_text = self.scanner.get_token_text().to_string();
        self.next_jsdoc_token();
        self.arena.add_identifier(
            SyntaxKind::Identifier as u16,
            pos,
            end,
            IdentifierData { escaped_text },
        )
    }

    fn append_jsdoc_comment_text(&self, comment: &mut String) {
        match self.current_token {
            SyntaxKind::NewLineTrivia => comment.push('\n'),
            SyntaxKind::WhitespaceTrivia => {
                if !comment.is_empty() && !comment.ends_with(char::is_whitespace) {
                    comment.push(' ');
                }
            }
            _ => comment.push_str(self.scanner.get_token_text()),
        }
    }

    /// Free text up to the next tag.
    fn parse_jsdoc_tag_comment(&mut self) -> String {
        let mut comment = String::new();
        while !self.is_token(SyntaxKind::EndOfFileToken) && !self.is_jsdoc_tag_start() {
            self.append_jsdoc_comment_text(&mut comment);
            self.next_jsdoc_token();
        }
        comment.trim().to_string()
    }

    /// End of a tag: the current token's start, minus trailing blanks and
    /// margin asterisks.
    fn jsdoc_tag_end(&self, start_pos: u32) -> u32 {
        let bytes = self.scanner.source_text().as_bytes();
        let mut end = self.token_pos() as usize;
        while end > start_pos as usize {
            match bytes.get(end - 1) {
                Some(b' ' | b'\t' | b'\r' | b'\n' | b'*') => end -= 1,
                _ => break,
            }
        }
        end as u32
    }

    /// Name of the tag that starts at the current `@`, without consuming it.
    fn look_ahead_jsdoc_tag_name(&mut self) -> Option<String> {
        let cursor = self.save_jsdoc_cursor();
        self.next_jsdoc_token();
        let name = self
            .is_jsdoc_identifier()
            .then(|| self.scanner.get_token_text().to_string());
        self.restore_jsdoc_cursor(cursor);
        name
    }

    // =========================================================================
    // Tags
    // =========================================================================

    fn parse_jsdoc_tag(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.next_jsdoc_token();

        if !self.is_jsdoc_identifier() {
            let comment = self.parse_jsdoc_tag_comment();
            let end_pos = self.jsdoc_tag_end(start_pos);
            return self.arena.add_jsdoc_tag(
                syntax_kind_ext::JSDOC_TAG,
                start_pos,
                end_pos,
                JSDocTagData {
                    comment,
                    ..empty_tag(NodeIndex::NONE)
                },
            );
        }

        let tag_text = self.scanner.get_token_text().to_string();
        let tag_name = self.parse_jsdoc_identifier();
        match tag_text.as_str() {
            "typedef" => self.parse_jsdoc_typedef_tag(start_pos, tag_name),
            "property" | "prop" => self.parse_jsdoc_parameter_like_tag(
                syntax_kind_ext::JSDOC_PROPERTY_TAG,
                start_pos,
                tag_name,
            ),
            "param" | "arg" | "argument" => self.parse_jsdoc_parameter_like_tag(
                syntax_kind_ext::JSDOC_PARAMETER_TAG,
                start_pos,
                tag_name,
            ),
            "returns" | "return" => {
                self.parse_jsdoc_type_tag(syntax_kind_ext::JSDOC_RETURN_TAG, start_pos, tag_name)
            }
            "type" => {
                self.parse_jsdoc_type_tag(syntax_kind_ext::JSDOC_TYPE_TAG, start_pos, tag_name)
            }
            "template" => self.parse_jsdoc_template_tag(start_pos, tag_name),
            _ => {
                let comment = self.parse_jsdoc_tag_comment();
                let end_pos = self.jsdoc_tag_end(start_pos);
                self.arena.add_jsdoc_tag(
                    syntax_kind_ext::JSDOC_TAG,
                    start_pos,
                    end_pos,
                    JSDocTagData {
                        comment,
                        ..empty_tag(tag_name)
                    },
                )
            }
        }
    }

    /// `@typedef {Type} Name`, `@typedef Name`, or `@typedef {Object} Name`
    /// followed by `@property` tags.
    fn parse_jsdoc_typedef_tag(&mut self, start_pos: u32, tag_name: NodeIndex) -> NodeIndex {
        self.skip_jsdoc_whitespace();
        let mut type_expression = self.parse_jsdoc_type_expression_opt();
        self.skip_jsdoc_whitespace();
        let (full_name, name) = self.parse_jsdoc_entity_name();
        let comment = self.parse_jsdoc_tag_comment();
        let mut end_pos = self.jsdoc_tag_end(start_pos);

        let object_shape = if type_expression.is_none() {
            Some(false)
        } else {
            self.jsdoc_object_type_shape(type_expression)
        };
        if let Some(is_array_type) = object_shape {
            let mut property_tags = Vec::new();
            while self.is_jsdoc_tag_start()
                && matches!(
                    self.look_ahead_jsdoc_tag_name().as_deref(),
                    Some("property" | "prop")
                )
            {
                property_tags.push(self.parse_jsdoc_tag());
            }
            if !property_tags.is_empty() {
                let property_tags = self.make_node_list(property_tags);
                let (pos, end) = (property_tags.pos, property_tags.end);
                type_expression = self.arena.add_jsdoc_type_literal(
                    syntax_kind_ext::JSDOC_TYPE_LITERAL,
                    pos,
                    end,
                    JSDocTypeLiteralData {
                        property_tags,
                        is_array_type,
                    },
                );
                end_pos = end;
            }
        }

        self.arena.add_jsdoc_tag(
            syntax_kind_ext::JSDOC_TYPEDEF_TAG,
            start_pos,
            end_pos,
            JSDocTagData {
                type_expression,
                name,
                full_name,
                comment,
                ..empty_tag(tag_name)
            },
        )
    }

    /// `Some(is_array)` when the type expression is `Object`, `object`, or
    /// an array of either.
    fn jsdoc_object_type_shape(&self, type_expression: NodeIndex) -> Option<bool> {
        let expression = self.arena.get(type_expression)?;
        let inner = self.arena.get_wrapped_type(expression)?.type_node;
        let inner_node = self.arena.get(inner)?;
        let (target, is_array) = if inner_node.kind == syntax_kind_ext::ARRAY_TYPE {
            (self.arena.get_array_type(inner_node)?.element_type, true)
        } else {
            (inner, false)
        };
        let target_node = self.arena.get(target)?;
        let is_object = target_node.kind == SyntaxKind::ObjectKeyword as u16
            || self.arena.get_type_ref(target_node).is_some_and(|reference| {
                reference.type_arguments.is_none()
                    && self
                        .arena
                        .get(reference.type_name)
                        .and_then(|name| self.arena.get_identifier(name))
                        .is_some_and(|ident| ident.escaped_text == "Object")
            });
        is_object.then_some(is_array)
    }

    /// `@property {Type} name`, `@param {Type} [name=default]`, or the
    /// name-first form `@param name {Type}`.
    fn parse_jsdoc_parameter_like_tag(
        &mut self,
        kind: u16,
        start_pos: u32,
        tag_name: NodeIndex,
    ) -> NodeIndex {
        self.skip_jsdoc_whitespace();
        let mut type_expression = self.parse_jsdoc_type_expression_opt();
        self.skip_jsdoc_whitespace();
        let (name, is_bracketed) = self.parse_jsdoc_bracketed_name();
        let mut is_name_first = false;
        if type_expression.is_none() && name.is_some() {
            self.skip_jsdoc_whitespace();
            type_expression = self.parse_jsdoc_type_expression_opt();
            is_name_first = type_expression.is_some();
        }
        let comment = self.parse_jsdoc_tag_comment();
        let end_pos = self.jsdoc_tag_end(start_pos);
        self.arena.add_jsdoc_tag(
            kind,
            start_pos,
            end_pos,
            JSDocTagData {
                type_expression,
                name,
                is_bracketed,
                is_name_first,
                comment,
                ..empty_tag(tag_name)
            },
        )
    }

    /// `@returns {Type}` and `@type {Type}`.
    fn parse_jsdoc_type_tag(&mut self, kind: u16, start_pos: u32, tag_name: NodeIndex) -> NodeIndex {
        self.skip_jsdoc_whitespace();
        let type_expression = self.parse_jsdoc_type_expression_opt();
        let comment = self.parse_jsdoc_tag_comment();
        let end_pos = self.jsdoc_tag_end(start_pos);
        self.arena.add_jsdoc_tag(
            kind,
            start_pos,
            end_pos,
            JSDocTagData {
                type_expression,
                comment,
                ..empty_tag(tag_name)
            },
        )
    }

    /// `@template {Constraint} T, U`
    fn parse_jsdoc_template_tag(&mut self, start_pos: u32, tag_name: NodeIndex) -> NodeIndex {
        self.skip_jsdoc_whitespace();
        let constraint = self.parse_jsdoc_type_expression_opt();
        self.skip_jsdoc_whitespace();

        let mut parameters = Vec::new();
        while self.is_jsdoc_identifier() {
            let name = self.parse_jsdoc_identifier();
            let (pos, end) = self.arena.get(name).map_or((0, 0), |n| (n.pos, n.end));
            parameters.push(self.arena.add_type_parameter(
                syntax_kind_ext::TYPE_PARAMETER,
                pos,
                end,
                TypeParameterData {
                    name,
                    constraint: NodeIndex::NONE,
                    default: NodeIndex::NONE,
                },
            ));
            while self.is_token(SyntaxKind::WhitespaceTrivia) {
                self.next_jsdoc_token();
            }
            if !self.is_token(SyntaxKind::CommaToken) {
                break;
            }
            self.next_jsdoc_token();
            self.skip_jsdoc_whitespace();
        }

        let type_parameters = Some(self.make_node_list(parameters));
        let comment = self.parse_jsdoc_tag_comment();
        let end_pos = self.jsdoc_tag_end(start_pos);
        self.arena.add_jsdoc_tag(
            syntax_kind_ext::JSDOC_TEMPLATE_TAG,
            start_pos,
            end_pos,
            JSDocTagData {
                type_expression: constraint,
                type_parameters,
                comment,
                ..empty_tag(tag_name)
            },
        )
    }

    // =========================================================================
    // Names
    // =========================================================================

    /// `a.b.c` as (`full_name`, last segment). Both are the same node for an
    /// undotted name; both are NONE when no name is present.
    fn parse_jsdoc_entity_name(&mut self) -> (NodeIndex, NodeIndex) {
        if !self.is_jsdoc_identifier() {
            return (NodeIndex::NONE, NodeIndex::NONE);
        }
        let start_pos = self.token_pos();
        let mut full_name = self.parse_jsdoc_identifier();
        let mut last = full_name;
        while self.is_token(SyntaxKind::DotToken) {
            let cursor = self.save_jsdoc_cursor();
            self.next_jsdoc_token();
            if !self.is_jsdoc_identifier() {
                self.restore_jsdoc_cursor(cursor);
                break;
            }
            last = self.parse_jsdoc_identifier();
            let end = self.arena.get(last).map_or(start_pos, |n| n.end);
            full_name = self.arena.add_qualified_name(
                syntax_kind_ext::QUALIFIED_NAME,
                start_pos,
                end,
                QualifiedNameData {
                    left: full_name,
                    right: last,
                },
            );
        }
        (full_name, last)
    }

    /// `name` or `[name]` / `[name=default]`.
    fn parse_jsdoc_bracketed_name(&mut self) -> (NodeIndex, bool) {
        if !self.is_token(SyntaxKind::OpenBracketToken) {
            let (full_name, _) = self.parse_jsdoc_entity_name();
            return (full_name, false);
        }
        self.next_jsdoc_token();
        self.skip_jsdoc_whitespace();
        let (full_name, _) = self.parse_jsdoc_entity_name();
        self.skip_jsdoc_whitespace();

        if self.is_token(SyntaxKind::EqualsToken) {
            let mut depth = 0u32;
            while !self.is_token(SyntaxKind::EndOfFileToken) {
                match self.current_token {
                    SyntaxKind::OpenBracketToken => depth += 1,
                    SyntaxKind::CloseBracketToken if depth == 0 => break,
                    SyntaxKind::CloseBracketToken => depth -= 1,
                    _ => {}
                }
                self.next_jsdoc_token();
            }
        }

        if self.is_token(SyntaxKind::CloseBracketToken) {
            self.next_jsdoc_token();
        } else {
            self.parse_error_at_current_token(
                &format_message(diagnostic_messages::EXPECTED, &["]"]),
                diagnostic_codes::EXPECTED,
            );
        }
        (full_name, true)
    }

    // =========================================================================
    // Type expressions
    // =========================================================================

    fn parse_jsdoc_type_expression_opt(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::OpenBraceToken) {
            self.parse_jsdoc_type_expression()
        } else {
            NodeIndex::NONE
        }
    }

    /// `{ Type }` as a `JSDOC_TYPE_EXPRESSION` spanning both braces.
    ///
    /// The matching `}` is found first; the text between the braces is then
    /// parsed as a TypeScript type with the `JSDoc` forms enabled.
    fn parse_jsdoc_type_expression(&mut self) -> NodeIndex {
        let open = self.token_pos();
        let mut depth = 0u32;
        let mut close = None;
        while !self.is_token(SyntaxKind::EndOfFileToken) {
            match self.current_token {
                SyntaxKind::OpenBraceToken => depth += 1,
                SyntaxKind::CloseBraceToken => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        close = Some(self.token_pos());
                        self.next_jsdoc_token();
                        break;
                    }
                }
                _ => {}
            }
            self.next_jsdoc_token();
        }

        let content_end = close.unwrap_or_else(|| self.token_pos());
        let end_pos = close.map_or(content_end, |c| c + 1);
        if close.is_none() {
            self.parse_error_at(
                open,
                1,
                &format_message(diagnostic_messages::EXPECTED, &["}"]),
                diagnostic_codes::EXPECTED,
            );
        }

        let cursor = self.save_jsdoc_cursor();
        let was_in_jsdoc = self.in_jsdoc;
        self.scanner
            .reset_to_range(open as usize + 1, content_end as usize);
        self.in_jsdoc = true;
        self.next_token();
        let type_node = if self.is_token(SyntaxKind::EndOfFileToken) {
            self.parse_error_type_expected();
            self.create_missing_node(SyntaxKind::Unknown)
        } else {
            self.parse_type()
        };
        if close.is_some() && !self.is_token(SyntaxKind::EndOfFileToken) {
            self.parse_error_at_current_token(
                &format_message(diagnostic_messages::EXPECTED, &["}"]),
                diagnostic_codes::EXPECTED,
            );
        }
        self.in_jsdoc = was_in_jsdoc;
        self.restore_jsdoc_cursor(cursor);

        self.arena.add_wrapped_type(
            syntax_kind_ext::JSDOC_TYPE_EXPRESSION,
            open,
            end_pos,
            WrappedTypeData { type_node },
        )
    }
}
