//! Byte-offset spans.
//!
//! All offsets are byte offsets into the UTF-8 source text. The end of a span
//! is exclusive.

use serde::{Deserialize, Serialize};

/// A span of source text in tsserver shape (`start` + `length`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextSpan {
    pub start: u32,
    pub length: u32,
}

impl TextSpan {
    #[must_use]
    pub const fn new(start: u32, length: u32) -> Self {
        Self { start, length }
    }

    /// Create a span from a start and an exclusive end offset.
    /// An end before the start yields an empty span at `start`.
    #[must_use]
    pub const fn from_bounds(start: u32, end: u32) -> Self {
        let length = if end > start { end - start } else { 0 };
        Self { start, length }
    }

    /// Exclusive end offset.
    #[must_use]
    pub const fn end(&self) -> u32 {
        self.start + self.length
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Check whether `pos` lies inside the span (`start <= pos < end`).
    #[must_use]
    pub const fn contains(&self, pos: u32) -> bool {
        self.start <= pos && pos < self.end()
    }

    /// Check whether two spans share at least one offset.
    /// Empty spans overlap a span that strictly contains their start.
    #[must_use]
    pub const fn overlaps(&self, other: &TextSpan) -> bool {
        if self.is_empty() {
            return other.start < self.start && self.start < other.end();
        }
        if other.is_empty() {
            return self.start < other.start && other.start < self.end();
        }
        self.start < other.end() && other.start < self.end()
    }
}
