//! Scanner state machine.
//!
//! Offsets are byte offsets into the source text. The scanner has two modes:
//! `scan` for TypeScript source and type expressions, and `scan_jsdoc_token`
//! for the body of a `/** ... */` comment.

use std::sync::Arc;

use memchr::memmem;

use crate::SyntaxKind;
use crate::char_codes::{
    is_identifier_part, is_identifier_start, is_line_break, is_white_space_single_line,
};
use crate::syntax_kind::text_to_keyword;

/// Flags describing the trivia and shape of the current token.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenFlags {
    None = 0,
    PrecedingLineBreak = 1 << 0,
    PrecedingJSDocComment = 1 << 1,
    Unterminated = 1 << 2,
    Scientific = 1 << 3,
    HexSpecifier = 1 << 4,
}

/// A saved scanner position for look-ahead and range scanning.
#[derive(Clone, Debug)]
pub struct ScannerSnapshot {
    pos: usize,
    end: usize,
    full_start: usize,
    token_start: usize,
    token: SyntaxKind,
    token_flags: u32,
    token_value: String,
}

#[derive(Clone, Debug)]
pub struct ScannerState {
    text: Arc<str>,
    /// Current position (end of the current token)
    pos: usize,
    /// Scanning stops here
    end: usize,
    /// Start of the current token including leading trivia
    full_start: usize,
    /// Start of the current token excluding trivia
    token_start: usize,
    token: SyntaxKind,
    token_flags: u32,
    token_value: String,
    skip_trivia: bool,
}

impl ScannerState {
    #[must_use]
    pub fn new(text: String, skip_trivia: bool) -> Self {
        let end = text.len();
        Self {
            text: Arc::from(text),
            pos: 0,
            end,
            full_start: 0,
            token_start: 0,
            token: SyntaxKind::Unknown,
            token_flags: 0,
            token_value: String::new(),
            skip_trivia,
        }
    }

    /// Replace the text and reset to `start` (or the beginning).
    pub fn set_text(&mut self, text: String, start: Option<usize>, length: Option<usize>) {
        let len = text.len();
        self.text = Arc::from(text);
        let start = start.unwrap_or(0).min(len);
        let end = length.map_or(len, |l| (start + l).min(len));
        self.reset_to_range(start, end);
    }

    /// Restrict scanning to `[start, end)` of the current text.
    ///
    /// Save the state first if the previous range must be resumed.
    pub fn reset_to_range(&mut self, start: usize, end: usize) {
        let end = end.min(self.text.len());
        self.pos = start.min(end);
        self.end = end;
        self.full_start = self.pos;
        self.token_start = self.pos;
        self.token = SyntaxKind::Unknown;
        self.token_flags = 0;
        self.token_value.clear();
    }

    #[must_use]
    pub fn save_state(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            pos: self.pos,
            end: self.end,
            full_start: self.full_start,
            token_start: self.token_start,
            token: self.token,
            token_flags: self.token_flags,
            token_value: self.token_value.clone(),
        }
    }

    pub fn restore_state(&mut self, snapshot: ScannerSnapshot) {
        self.pos = snapshot.pos;
        self.end = snapshot.end;
        self.full_start = snapshot.full_start;
        self.token_start = snapshot.token_start;
        self.token = snapshot.token;
        self.token_flags = snapshot.token_flags;
        self.token_value = snapshot.token_value;
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub fn source_text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn source_text_arc(&self) -> Arc<str> {
        Arc::clone(&self.text)
    }

    #[must_use]
    pub const fn get_token(&self) -> SyntaxKind {
        self.token
    }

    #[must_use]
    pub const fn get_token_full_start(&self) -> usize {
        self.full_start
    }

    #[must_use]
    pub const fn get_token_start(&self) -> usize {
        self.token_start
    }

    #[must_use]
    pub const fn get_token_end(&self) -> usize {
        self.pos
    }

    /// End of the scanning range.
    #[must_use]
    pub const fn get_end(&self) -> usize {
        self.end
    }

    #[must_use]
    pub fn get_token_value(&self) -> String {
        self.token_value.clone()
    }

    #[must_use]
    pub fn get_token_value_ref(&self) -> &str {
        &self.token_value
    }

    /// Raw source text of the current token.
    #[must_use]
    pub fn get_token_text(&self) -> &str {
        self.text.get(self.token_start..self.pos).unwrap_or("")
    }

    #[must_use]
    pub const fn get_token_flags(&self) -> u32 {
        self.token_flags
    }

    #[must_use]
    pub const fn has_preceding_line_break(&self) -> bool {
        self.token_flags & TokenFlags::PrecedingLineBreak as u32 != 0
    }

    #[must_use]
    pub const fn has_preceding_jsdoc_comment(&self) -> bool {
        self.token_flags & TokenFlags::PrecedingJSDocComment as u32 != 0
    }

    #[must_use]
    pub const fn is_unterminated(&self) -> bool {
        self.token_flags & TokenFlags::Unterminated as u32 != 0
    }

    #[inline]
    fn char_at(&self, pos: usize) -> Option<char> {
        if pos >= self.end {
            return None;
        }
        self.text.get(pos..self.end)?.chars().next()
    }

    #[inline]
    fn byte_at(&self, pos: usize) -> Option<u8> {
        if pos >= self.end {
            None
        } else {
            self.text.as_bytes().get(pos).copied()
        }
    }

    #[inline]
    const fn set_flag(&mut self, flag: TokenFlags) {
        self.token_flags |= flag as u32;
    }

    // =========================================================================
    // TypeScript mode
    // =========================================================================

    /// Scan the next token.
    ///
    /// `>` is always scanned as a single `GreaterThanToken` so that closing
    /// type argument lists never need re-scanning.
    pub fn scan(&mut self) -> SyntaxKind {
        self.full_start = self.pos;
        self.token_flags = 0;
        self.token_value.clear();

        loop {
            self.token_start = self.pos;
            let Some(ch) = self.char_at(self.pos) else {
                self.token = SyntaxKind::EndOfFileToken;
                return self.token;
            };

            if is_line_break(ch) {
                self.set_flag(TokenFlags::PrecedingLineBreak);
                self.pos += ch.len_utf8();
                if ch == '\r' && self.byte_at(self.pos) == Some(b'\n') {
                    self.pos += 1;
                }
                if self.skip_trivia {
                    continue;
                }
                self.token = SyntaxKind::NewLineTrivia;
                return self.token;
            }

            if is_white_space_single_line(ch) {
                while let Some(c) = self.char_at(self.pos) {
                    if !is_white_space_single_line(c) {
                        break;
                    }
                    self.pos += c.len_utf8();
                }
                if self.skip_trivia {
                    continue;
                }
                self.token = SyntaxKind::WhitespaceTrivia;
                return self.token;
            }

            if ch == '/' {
                match self.byte_at(self.pos + 1) {
                    Some(b'/') => {
                        self.pos += 2;
                        while let Some(c) = self.char_at(self.pos) {
                            if is_line_break(c) {
                                break;
                            }
                            self.pos += c.len_utf8();
                        }
                        if self.skip_trivia {
                            continue;
                        }
                        self.token = SyntaxKind::SingleLineCommentTrivia;
                        return self.token;
                    }
                    Some(b'*') => {
                        self.scan_multi_line_comment();
                        if self.skip_trivia {
                            continue;
                        }
                        self.token = SyntaxKind::MultiLineCommentTrivia;
                        return self.token;
                    }
                    _ => {}
                }
            }

            self.token = self.scan_token(ch);
            return self.token;
        }
    }

    fn scan_multi_line_comment(&mut self) {
        let start = self.pos;
        let bytes = &self.text.as_bytes()[start + 2..self.end];
        let close = memmem::find(bytes, b"*/");
        let comment_end = match close {
            Some(rel) => start + 2 + rel + 2,
            None => {
                self.set_flag(TokenFlags::Unterminated);
                self.end
            }
        };
        let text = &self.text[start..comment_end];
        let is_jsdoc = text.starts_with("/**") && !text.starts_with("/***") && text != "/**/";
        let has_line_break = text.contains(['\n', '\r', '\u{2028}', '\u{2029}']);
        if is_jsdoc {
            self.set_flag(TokenFlags::PrecedingJSDocComment);
        }
        if has_line_break {
            self.set_flag(TokenFlags::PrecedingLineBreak);
        }
        self.pos = comment_end;
    }

    fn scan_token(&mut self, ch: char) -> SyntaxKind {
        let next = self.byte_at(self.pos + 1);
        let next2 = self.byte_at(self.pos + 2);

        macro_rules! tok {
            ($len:expr, $kind:expr) => {{
                self.pos += $len;
                $kind
            }};
        }

        match ch {
            '"' | '\'' => self.scan_string(ch),
            '`' => self.scan_template(),
            '0'..='9' => self.scan_number(),
            '.' => match (next, next2) {
                (Some(b'0'..=b'9'), _) => self.scan_number(),
                (Some(b'.'), Some(b'.')) => tok!(3, SyntaxKind::DotDotDotToken),
                _ => tok!(1, SyntaxKind::DotToken),
            },
            '{' => tok!(1, SyntaxKind::OpenBraceToken),
            '}' => tok!(1, SyntaxKind::CloseBraceToken),
            '(' => tok!(1, SyntaxKind::OpenParenToken),
            ')' => tok!(1, SyntaxKind::CloseParenToken),
            '[' => tok!(1, SyntaxKind::OpenBracketToken),
            ']' => tok!(1, SyntaxKind::CloseBracketToken),
            ';' => tok!(1, SyntaxKind::SemicolonToken),
            ',' => tok!(1, SyntaxKind::CommaToken),
            ':' => tok!(1, SyntaxKind::ColonToken),
            '@' => tok!(1, SyntaxKind::AtToken),
            '#' => tok!(1, SyntaxKind::HashToken),
            '~' => tok!(1, SyntaxKind::TildeToken),
            '^' => tok!(1, SyntaxKind::CaretToken),
            '%' => tok!(1, SyntaxKind::PercentToken),
            '/' => tok!(1, SyntaxKind::SlashToken),
            '*' => tok!(1, SyntaxKind::AsteriskToken),
            '>' => tok!(1, SyntaxKind::GreaterThanToken),
            '<' => match next {
                Some(b'=') => tok!(2, SyntaxKind::LessThanEqualsToken),
                _ => tok!(1, SyntaxKind::LessThanToken),
            },
            '=' => match (next, next2) {
                (Some(b'='), Some(b'=')) => tok!(3, SyntaxKind::EqualsEqualsEqualsToken),
                (Some(b'='), _) => tok!(2, SyntaxKind::EqualsEqualsToken),
                (Some(b'>'), _) => tok!(2, SyntaxKind::EqualsGreaterThanToken),
                _ => tok!(1, SyntaxKind::EqualsToken),
            },
            '!' => match (next, next2) {
                (Some(b'='), Some(b'=')) => tok!(3, SyntaxKind::ExclamationEqualsEqualsToken),
                (Some(b'='), _) => tok!(2, SyntaxKind::ExclamationEqualsToken),
                _ => tok!(1, SyntaxKind::ExclamationToken),
            },
            '+' => match next {
                Some(b'+') => tok!(2, SyntaxKind::PlusPlusToken),
                _ => tok!(1, SyntaxKind::PlusToken),
            },
            '-' => match next {
                Some(b'-') => tok!(2, SyntaxKind::MinusMinusToken),
                _ => tok!(1, SyntaxKind::MinusToken),
            },
            '&' => match next {
                Some(b'&') => tok!(2, SyntaxKind::AmpersandAmpersandToken),
                _ => tok!(1, SyntaxKind::AmpersandToken),
            },
            '|' => match next {
                Some(b'|') => tok!(2, SyntaxKind::BarBarToken),
                _ => tok!(1, SyntaxKind::BarToken),
            },
            '?' => match next {
                Some(b'?') => tok!(2, SyntaxKind::QuestionQuestionToken),
                Some(b'.') if !matches!(next2, Some(b'0'..=b'9')) => {
                    tok!(2, SyntaxKind::QuestionDotToken)
                }
                _ => tok!(1, SyntaxKind::QuestionToken),
            },
            c if is_identifier_start(c) => self.scan_identifier(false),
            c => tok!(c.len_utf8(), SyntaxKind::Unknown),
        }
    }

    fn scan_identifier(&mut self, allow_minus: bool) -> SyntaxKind {
        let start = self.pos;
        while let Some(c) = self.char_at(self.pos) {
            if !(is_identifier_part(c) || (allow_minus && c == '-')) {
                break;
            }
            self.pos += c.len_utf8();
        }
        self.token_value.push_str(&self.text[start..self.pos]);
        text_to_keyword(&self.token_value).unwrap_or(SyntaxKind::Identifier)
    }

    fn scan_string(&mut self, quote: char) -> SyntaxKind {
        self.pos += 1;
        let mut value = String::new();
        loop {
            let Some(c) = self.char_at(self.pos) else {
                self.set_flag(TokenFlags::Unterminated);
                break;
            };
            if c == quote {
                self.pos += 1;
                break;
            }
            if is_line_break(c) {
                self.set_flag(TokenFlags::Unterminated);
                break;
            }
            if c == '\\' {
                self.pos += 1;
                self.scan_escape(&mut value);
                continue;
            }
            value.push(c);
            self.pos += c.len_utf8();
        }
        self.token_value = value;
        SyntaxKind::StringLiteral
    }

    fn scan_template(&mut self) -> SyntaxKind {
        self.pos += 1;
        let mut value = String::new();
        loop {
            let Some(c) = self.char_at(self.pos) else {
                self.set_flag(TokenFlags::Unterminated);
                break;
            };
            if c == '`' {
                self.pos += 1;
                break;
            }
            if c == '\\' {
                self.pos += 1;
                self.scan_escape(&mut value);
                continue;
            }
            value.push(c);
            self.pos += c.len_utf8();
        }
        self.token_value = value;
        SyntaxKind::NoSubstitutionTemplateLiteral
    }

    fn scan_escape(&mut self, out: &mut String) {
        let Some(c) = self.char_at(self.pos) else {
            return;
        };
        self.pos += c.len_utf8();
        match c {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{0008}'),
            'f' => out.push('\u{000C}'),
            'v' => out.push('\u{000B}'),
            '0' => out.push('\0'),
            'x' => {
                let code = self.scan_hex_digits(2, 2);
                out.extend(code.and_then(char::from_u32));
            }
            'u' => {
                let code = if self.byte_at(self.pos) == Some(b'{') {
                    self.pos += 1;
                    let code = self.scan_hex_digits(1, 6);
                    if self.byte_at(self.pos) == Some(b'}') {
                        self.pos += 1;
                    }
                    code
                } else {
                    self.scan_hex_digits(4, 4)
                };
                out.extend(code.and_then(char::from_u32));
            }
            '\r' => {
                // Line continuation
                if self.byte_at(self.pos) == Some(b'\n') {
                    self.pos += 1;
                }
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            other => out.push(other),
        }
    }

    fn scan_hex_digits(&mut self, min: usize, max: usize) -> Option<u32> {
        let start = self.pos;
        while self.pos - start < max {
            match self.byte_at(self.pos) {
                Some(b) if b.is_ascii_hexdigit() => self.pos += 1,
                _ => break,
            }
        }
        if self.pos - start < min {
            return None;
        }
        u32::from_str_radix(&self.text[start..self.pos], 16).ok()
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let start = self.pos;
        let is_digit_or_sep = |b: u8, radix: u32| b == b'_' || (b as char).is_digit(radix);

        if self.byte_at(start) == Some(b'0') {
            let radix = match self.byte_at(start + 1) {
                Some(b'x' | b'X') => Some(16),
                Some(b'b' | b'B') => Some(2),
                Some(b'o' | b'O') => Some(8),
                _ => None,
            };
            if let Some(radix) = radix {
                self.pos += 2;
                if radix == 16 {
                    self.set_flag(TokenFlags::HexSpecifier);
                }
                while self.byte_at(self.pos).is_some_and(|b| is_digit_or_sep(b, radix)) {
                    self.pos += 1;
                }
                return self.finish_number(start);
            }
        }

        while self.byte_at(self.pos).is_some_and(|b| is_digit_or_sep(b, 10)) {
            self.pos += 1;
        }
        if self.byte_at(self.pos) == Some(b'.') {
            self.pos += 1;
            while self.byte_at(self.pos).is_some_and(|b| is_digit_or_sep(b, 10)) {
                self.pos += 1;
            }
        }
        if matches!(self.byte_at(self.pos), Some(b'e' | b'E')) {
            let mut p = self.pos + 1;
            if matches!(self.byte_at(p), Some(b'+' | b'-')) {
                p += 1;
            }
            if self.byte_at(p).is_some_and(|b| b.is_ascii_digit()) {
                self.set_flag(TokenFlags::Scientific);
                self.pos = p;
                while self.byte_at(self.pos).is_some_and(|b| is_digit_or_sep(b, 10)) {
                    self.pos += 1;
                }
            }
        }
        self.finish_number(start)
    }

    fn finish_number(&mut self, start: usize) -> SyntaxKind {
        let kind = if self.byte_at(self.pos) == Some(b'n') {
            self.pos += 1;
            SyntaxKind::BigIntLiteral
        } else {
            SyntaxKind::NumericLiteral
        };
        self.token_value = self.text[start..self.pos].replace('_', "");
        kind
    }

    // =========================================================================
    // JSDoc mode
    // =========================================================================

    /// Scan the next token of a `JSDoc` comment body.
    ///
    /// Whitespace and line breaks are returned as trivia tokens; identifiers
    /// may contain `-`.
    pub fn scan_jsdoc_token(&mut self) -> SyntaxKind {
        self.full_start = self.pos;
        self.token_flags = 0;
        self.token_value.clear();
        self.token_start = self.pos;

        let Some(ch) = self.char_at(self.pos) else {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        };
        self.pos += ch.len_utf8();

        self.token = match ch {
            '\r' | '\n' | '\u{2028}' | '\u{2029}' => {
                if ch == '\r' && self.byte_at(self.pos) == Some(b'\n') {
                    self.pos += 1;
                }
                self.set_flag(TokenFlags::PrecedingLineBreak);
                SyntaxKind::NewLineTrivia
            }
            c if is_white_space_single_line(c) => {
                while let Some(c) = self.char_at(self.pos) {
                    if !is_white_space_single_line(c) {
                        break;
                    }
                    self.pos += c.len_utf8();
                }
                SyntaxKind::WhitespaceTrivia
            }
            '@' => SyntaxKind::AtToken,
            '*' => SyntaxKind::AsteriskToken,
            '{' => SyntaxKind::OpenBraceToken,
            '}' => SyntaxKind::CloseBraceToken,
            '[' => SyntaxKind::OpenBracketToken,
            ']' => SyntaxKind::CloseBracketToken,
            '<' => SyntaxKind::LessThanToken,
            '>' => SyntaxKind::GreaterThanToken,
            '=' => SyntaxKind::EqualsToken,
            ',' => SyntaxKind::CommaToken,
            '.' => SyntaxKind::DotToken,
            '`' => SyntaxKind::BacktickToken,
            '#' => SyntaxKind::HashToken,
            c if is_identifier_start(c) => {
                self.pos -= c.len_utf8();
                self.scan_identifier(true)
            }
            _ => SyntaxKind::Unknown,
        };
        self.token
    }
}
