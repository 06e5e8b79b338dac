//! Comment scanning and `JSDoc` helpers.
//!
//! Comments are not part of the tree, so they are extracted from the source
//! text separately. The parser uses these ranges to find `/** ... */` blocks
//! and attach them to the declaration that follows.

use memchr::memmem;
use serde::{Deserialize, Serialize};

/// A range representing a comment in the source text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRange {
    /// Start position (byte offset)
    pub pos: u32,
    /// End position (byte offset)
    pub end: u32,
    /// Whether this is a multi-line comment
    pub is_multi_line: bool,
    /// Whether this comment has a trailing newline
    pub has_trailing_new_line: bool,
}

impl CommentRange {
    #[must_use]
    pub const fn new(pos: u32, end: u32, is_multi_line: bool, has_trailing_new_line: bool) -> Self {
        Self {
            pos,
            end,
            is_multi_line,
            has_trailing_new_line,
        }
    }

    /// Get the comment text from source.
    #[must_use]
    pub fn get_text<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.pos as usize..self.end as usize).unwrap_or("")
    }
}

/// Scan a run of trivia starting at `start` and collect its comments.
///
/// Stops at the first byte that is neither whitespace nor part of a comment.
/// Returns the collected comments and the offset where scanning stopped.
#[must_use]
pub fn scan_trivia_comments(source: &str, start: usize) -> (Vec<CommentRange>, usize) {
    let bytes = source.as_bytes();
    let len = bytes.len();
    let mut comments = Vec::new();
    let mut pos = start;

    while pos < len {
        match bytes[pos] {
            b' ' | b'\t' | b'\r' | b'\n' | 0x0B | 0x0C => pos += 1,
            b'/' if bytes.get(pos + 1) == Some(&b'/') => {
                let comment_start = pos as u32;
                pos += 2;
                while pos < len && bytes[pos] != b'\n' && bytes[pos] != b'\r' {
                    pos += 1;
                }
                comments.push(CommentRange::new(comment_start, pos as u32, false, pos < len));
            }
            b'/' if bytes.get(pos + 1) == Some(&b'*') => {
                let comment_start = pos as u32;
                pos = match memmem::find(&bytes[pos + 2..], b"*/") {
                    Some(rel) => pos + 2 + rel + 2,
                    // Unterminated comment runs to the end of the file
                    None => len,
                };
                let has_trailing_new_line = matches!(bytes.get(pos), Some(b'\n' | b'\r'));
                comments.push(CommentRange::new(
                    comment_start,
                    pos as u32,
                    true,
                    has_trailing_new_line,
                ));
            }
            _ => break,
        }
    }

    (comments, pos)
}

/// Extract the comment ranges of the trivia run at the start of `source`.
///
/// This is the leading trivia of the first token; use
/// [`scan_trivia_comments`] for trivia elsewhere in the file.
#[must_use]
pub fn get_comment_ranges(source: &str) -> Vec<CommentRange> {
    scan_trivia_comments(source, 0).0
}

/// Check if a comment is a `JSDoc` comment.
///
/// `/**/` and `/*** ... */` are not `JSDoc`.
#[must_use]
pub fn is_jsdoc_comment(comment: &CommentRange, source: &str) -> bool {
    let text = comment.get_text(source);
    text.starts_with("/**") && !text.starts_with("/***") && text != "/**/"
}

/// Extract the content of a `JSDoc` comment (without the delimiters).
#[must_use]
pub fn get_jsdoc_content(comment: &CommentRange, source: &str) -> String {
    let text = comment.get_text(source);
    let Some(inner) = text.strip_prefix("/**") else {
        return text.to_string();
    };
    let inner = inner.strip_suffix("*/").unwrap_or(inner);
    inner
        .lines()
        .map(|line| {
            let trimmed = line.trim_start();
            trimmed
                .strip_prefix('*')
                .map_or(trimmed, str::trim_start)
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
