//! Parser state: token cursor, diagnostics and the source-file entry point.

use super::base::{NodeIndex, NodeList};
use super::node::{NodeArena, SourceFileData, node_flags};
use tsz_common::diagnostics::{Diagnostic, diagnostic_codes, diagnostic_messages, format_message};
use tsz_common::limits;
use tsz_scanner::{ScannerState, SyntaxKind, token_is_keyword};
use tracing::{debug, trace};

/// A syntax error collected while parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseDiagnostic {
    pub start: u32,
    pub length: u32,
    pub message: String,
    pub code: u32,
}

/// Recursive-descent parser over one source file.
///
/// Errors never abort the parse: they are recorded as `ParseDiagnostic`s and
/// the parser produces a best-effort tree.
pub struct ParserState {
    pub(crate) scanner: ScannerState,
    pub(crate) current_token: SyntaxKind,
    pub arena: NodeArena,
    pub(crate) file_name: String,
    pub(crate) parse_diagnostics: Vec<ParseDiagnostic>,
    pub(crate) last_error_pos: u32,
    /// End of the most recently consumed token
    pub(crate) prev_token_end: u32,
    pub(crate) type_depth: u32,
    /// Accept `JSDoc`-only type syntax (`*`, `?T`, `T=`, `Array.<T>`)
    pub(crate) in_jsdoc: bool,
    pub(crate) jsdoc_line_start: bool,
    pub(crate) jsdoc_margin_allowed: bool,
    pub(crate) jsdoc_after_space: bool,
}

impl ParserState {
    #[must_use]
    pub fn new(file_name: String, source_text: String) -> Self {
        let capacity = source_text.len() / 4;
        Self {
            scanner: ScannerState::new(source_text, true),
            current_token: SyntaxKind::Unknown,
            arena: NodeArena::with_capacity(capacity),
            file_name,
            parse_diagnostics: Vec::new(),
            last_error_pos: u32::MAX,
            prev_token_end: 0,
            type_depth: 0,
            in_jsdoc: false,
            jsdoc_line_start: false,
            jsdoc_margin_allowed: false,
            jsdoc_after_space: false,
        }
    }

    // =========================================================================
    // Results
    // =========================================================================

    #[must_use]
    pub const fn get_arena(&self) -> &NodeArena {
        &self.arena
    }

    #[must_use]
    pub fn into_arena(self) -> NodeArena {
        self.arena
    }

    #[must_use]
    pub fn get_source_text(&self) -> &str {
        self.scanner.source_text()
    }

    #[must_use]
    pub fn get_file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub fn get_parse_diagnostics(&self) -> &[ParseDiagnostic] {
        &self.parse_diagnostics
    }

    /// Syntax errors as file diagnostics.
    #[must_use]
    pub fn get_diagnostics(&self) -> Vec<Diagnostic> {
        self.parse_diagnostics
            .iter()
            .map(|d| {
                Diagnostic::error(
                    self.file_name.clone(),
                    d.start,
                    d.length,
                    d.message.clone(),
                    d.code,
                )
            })
            .collect()
    }

    // =========================================================================
    // Token cursor
    // =========================================================================

    #[inline]
    pub(crate) fn next_token(&mut self) -> SyntaxKind {
        self.prev_token_end = self.scanner.get_token_end() as u32;
        self.current_token = self.scanner.scan();
        self.current_token
    }

    #[inline]
    pub(crate) const fn token(&self) -> SyntaxKind {
        self.current_token
    }

    #[inline]
    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.current_token == kind
    }

    /// Start of the current token, excluding trivia.
    #[inline]
    pub(crate) const fn token_pos(&self) -> u32 {
        self.scanner.get_token_start() as u32
    }

    /// End of the current token.
    #[inline]
    pub(crate) const fn token_end(&self) -> u32 {
        self.scanner.get_token_end() as u32
    }

    /// End of the last consumed token; the end of a node being finished.
    #[inline]
    pub(crate) const fn node_end(&self) -> u32 {
        self.prev_token_end
    }

    pub(crate) fn is_identifier_or_keyword(&self) -> bool {
        self.is_token(SyntaxKind::Identifier) || token_is_keyword(self.current_token)
    }

    /// Identifiers plus contextual keywords usable as names (`type`, `get`, `string`).
    pub(crate) fn is_identifier(&self) -> bool {
        self.is_token(SyntaxKind::Identifier)
            || (self.current_token >= SyntaxKind::FIRST_CONTEXTUAL_KEYWORD
                && self.current_token <= SyntaxKind::LAST_KEYWORD)
            || matches!(
                self.current_token,
                SyntaxKind::ImplementsKeyword
                    | SyntaxKind::InterfaceKeyword
                    | SyntaxKind::LetKeyword
                    | SyntaxKind::PrivateKeyword
                    | SyntaxKind::ProtectedKeyword
                    | SyntaxKind::PublicKeyword
                    | SyntaxKind::StaticKeyword
            )
    }

    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    /// Consume `kind` or report "'x' expected." at the current token.
    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind) -> bool {
        if self.parse_optional(kind) {
            return true;
        }
        let text = tsz_scanner::token_to_text(kind).unwrap_or("token");
        self.parse_error_at_current_token(
            &format_message(diagnostic_messages::EXPECTED, &[text]),
            diagnostic_codes::EXPECTED,
        );
        false
    }

    /// Peek at the token after the current one.
    pub(crate) fn look_ahead_next_token(&mut self) -> SyntaxKind {
        let snapshot = self.scanner.save_state();
        let current = self.current_token;
        let prev_end = self.prev_token_end;
        let next = self.next_token();
        self.scanner.restore_state(snapshot);
        self.current_token = current;
        self.prev_token_end = prev_end;
        next
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    pub(crate) fn parse_error_at(&mut self, start: u32, length: u32, message: &str, code: u32) {
        // One error per position keeps cascades out of the list.
        if start == self.last_error_pos {
            return;
        }
        self.last_error_pos = start;
        trace!(start, code, message, "parse error");
        self.parse_diagnostics.push(ParseDiagnostic {
            start,
            length,
            message: message.to_string(),
            code,
        });
    }

    pub(crate) fn parse_error_at_current_token(&mut self, message: &str, code: u32) {
        let start = self.token_pos();
        let length = self.token_end().saturating_sub(start);
        self.parse_error_at(start, length, message, code);
    }

    pub(crate) fn parse_error_type_expected(&mut self) {
        self.parse_error_at_current_token(
            diagnostic_messages::TYPE_EXPECTED,
            diagnostic_codes::TYPE_EXPECTED,
        );
    }

    pub(crate) fn parse_error_identifier_expected(&mut self) {
        self.parse_error_at_current_token(
            diagnostic_messages::IDENTIFIER_EXPECTED,
            diagnostic_codes::IDENTIFIER_EXPECTED,
        );
    }

    /// Placeholder for a node the source is missing.
    pub(crate) fn create_missing_node(&mut self, kind: SyntaxKind) -> NodeIndex {
        let pos = self.token_pos();
        let index = self.arena.add_token(kind as u16, pos, pos);
        self.arena.add_flags(index, node_flags::THIS_NODE_HAS_ERROR);
        index
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    pub(crate) fn make_node_list(&self, nodes: Vec<NodeIndex>) -> NodeList {
        let pos = nodes
            .first()
            .and_then(|&n| self.arena.get(n))
            .map_or(self.token_pos(), |n| n.pos);
        let end = nodes
            .last()
            .and_then(|&n| self.arena.get(n))
            .map_or(pos, |n| n.end);
        NodeList { nodes, pos, end }
    }

    pub(crate) fn enter_type(&mut self) -> bool {
        if self.type_depth >= limits::MAX_TYPE_NESTING_DEPTH {
            return false;
        }
        self.type_depth += 1;
        true
    }

    pub(crate) fn exit_type(&mut self) {
        self.type_depth = self.type_depth.saturating_sub(1);
    }

    // =========================================================================
    // Source file
    // =========================================================================

    /// Parse the whole file and return the `SOURCE_FILE` node.
    pub fn parse_source_file(&mut self) -> NodeIndex {
        self.next_token();
        let statements = self.parse_statement_list(false);

        let jsdoc = self.parse_leading_jsdoc();
        let eof_pos = self.token_pos();
        let end_of_file_token =
            self.arena
                .add_token(SyntaxKind::EndOfFileToken as u16, eof_pos, eof_pos);
        for doc in jsdoc {
            self.arena.attach_jsdoc(end_of_file_token, doc);
        }

        let text = self.scanner.source_text_arc();
        let end = text.len() as u32;
        let statements = self.make_node_list(statements);
        let root = self.arena.add_source_file(
            0,
            end,
            SourceFileData {
                statements,
                end_of_file_token,
                file_name: self.file_name.clone(),
                text,
            },
        );
        debug!(
            file = %self.file_name,
            nodes = self.arena.len(),
            errors = self.parse_diagnostics.len(),
            "parsed source file"
        );
        root
    }

    /// Parse statements until EOF, or until `}` when `in_block` is set.
    /// Leading `JSDoc` blocks attach to each statement.
    pub(crate) fn parse_statement_list(&mut self, in_block: bool) -> Vec<NodeIndex> {
        let mut statements = Vec::new();
        loop {
            if self.is_token(SyntaxKind::EndOfFileToken)
                || (in_block && self.is_token(SyntaxKind::CloseBraceToken))
            {
                break;
            }
            let start = self.token_pos();
            let statement = self.parse_with_jsdoc(Self::parse_statement);
            statements.push(statement);
            if self.token_pos() == start && !self.is_token(SyntaxKind::EndOfFileToken) {
                // No progress: drop the offending token.
                self.next_token();
            }
        }
        statements
    }

    /// Run `parse` and attach the `JSDoc` blocks preceding the current token
    /// to the node it returns.
    pub(crate) fn parse_with_jsdoc(&mut self, parse: fn(&mut Self) -> NodeIndex) -> NodeIndex {
        let jsdoc = self.parse_leading_jsdoc();
        let node = parse(self);
        for doc in jsdoc {
            self.arena.attach_jsdoc(node, doc);
        }
        node
    }

    /// Mark an existing node as erroneous.
    pub(crate) fn mark_error(&mut self, node: NodeIndex) {
        self.arena.add_flags(node, node_flags::THIS_NODE_HAS_ERROR);
    }

    pub(crate) fn is_type_alias_start(&mut self) -> bool {
        self.is_token(SyntaxKind::TypeKeyword) && {
            let next = self.look_ahead_next_token();
            next == SyntaxKind::Identifier || token_is_keyword(next)
        }
    }
}
