//! Position and location utilities.
//!
//! The tree uses byte offsets, while editors and tsserver speak in lines and
//! columns. This module provides the conversion.

use serde::{Deserialize, Serialize};

/// A position in a source file (0-indexed line and column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// 0-indexed line number
    pub line: u32,
    /// 0-indexed column (UTF-16 code units for LSP compatibility)
    pub character: u32,
}

impl Position {
    #[must_use]
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// A range in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

/// Line map for efficient offset <-> position conversion.
/// Stores the starting offset of each line.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Starting offset of each line (`line_starts[0]` is always 0)
    line_starts: Vec<u32>,
}

impl LineMap {
    /// Build a line map from source text.
    #[must_use]
    pub fn build(source: &str) -> Self {
        let mut line_starts = vec![0u32];
        let bytes = source.as_bytes();

        for (i, &byte) in bytes.iter().enumerate() {
            if byte == b'\n' {
                line_starts.push((i + 1) as u32);
            } else if byte == b'\r' && bytes.get(i + 1) != Some(&b'\n') {
                // A lone \r ends a line; \r\n is handled by the \n
                line_starts.push((i + 1) as u32);
            }
        }

        Self { line_starts }
    }

    /// Convert a byte offset to a Position (line, character).
    /// Character is counted in UTF-16 code units for LSP compatibility.
    #[must_use]
    pub fn offset_to_position(&self, offset: u32, source: &str) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert_point) => insert_point.saturating_sub(1),
        };

        let line_start = self.line_starts.get(line).copied().unwrap_or(0);
        let clamped_end = (offset as usize).min(source.len());
        let start = (line_start as usize).min(clamped_end);
        let slice = source.get(start..clamped_end).unwrap_or("");
        let character = slice.chars().map(|ch| ch.len_utf16() as u32).sum();

        Position {
            line: line as u32,
            character,
        }
    }

    /// Convert a Position (line, character) to a byte offset.
    #[must_use]
    pub fn position_to_offset(&self, position: Position, source: &str) -> Option<u32> {
        let line_idx = position.line as usize;
        let line_start = *self.line_starts.get(line_idx)?;
        let line_limit = self
            .line_starts
            .get(line_idx + 1)
            .copied()
            .unwrap_or(source.len() as u32);
        let slice = source
            .get(line_start as usize..line_limit as usize)
            .unwrap_or("");

        let mut utf16_count = 0u32;
        let mut byte_count = 0u32;
        for ch in slice.chars() {
            if ch == '\n' || ch == '\r' {
                break;
            }
            let ch_utf16 = ch.len_utf16() as u32;
            if utf16_count + ch_utf16 > position.character {
                break;
            }
            utf16_count += ch_utf16;
            byte_count += ch.len_utf8() as u32;
            if utf16_count == position.character {
                break;
            }
        }

        Some(line_start + byte_count)
    }

    /// Get the number of lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Get the starting offset of a line.
    #[must_use]
    pub fn line_start(&self, line: usize) -> Option<u32> {
        self.line_starts.get(line).copied()
    }
}
