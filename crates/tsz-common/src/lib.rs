//! Common types and utilities for the tsz code-fix crates.
//!
//! This crate provides foundational types used across all tsz crates:
//! - Common enums (`NewLineKind`)
//! - Source spans (`TextSpan`)
//! - Position/Range types and the `LineMap` for line/column conversion
//! - Comment scanning and `JSDoc` helpers
//! - Diagnostic types and the message catalog
//! - Parser and checker limits

// Common types - Shared constants to break circular dependencies
pub mod common;
pub use common::NewLineKind;

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::TextSpan;

// Centralized limits and thresholds
pub mod limits;

// Position/Range types for line/column source locations
pub mod position;
pub use position::{LineMap, Position, Range};

// Comment parsing utilities
pub mod comments;

// Diagnostics and the message catalog
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticMessage};

#[cfg(test)]
#[path = "tests/comments_tests.rs"]
mod comments_tests;

#[cfg(test)]
#[path = "tests/position_tests.rs"]
mod position_tests;
