//! Centralized limits for the parser and the checker.
//!
//! Both walk user-controlled nesting (type expressions inside `JSDoc`,
//! aliases that refer to aliases), so every recursive walk is bounded by one
//! of these constants.

/// Maximum nesting depth for type expressions in the parser.
///
/// Deeper nesting reports a "Type expected." diagnostic and produces an
/// error node instead of recursing further.
pub const MAX_TYPE_NESTING_DEPTH: u32 = 128;

/// Maximum depth of alias-to-alias resolution in the checker.
///
/// Reaching the limit resolves to the unknown type.
pub const MAX_TYPE_RESOLUTION_DEPTH: u32 = 64;

/// Maximum number of nodes walked when collecting `JSDoc` suggestions.
pub const MAX_SUGGESTION_NODES: usize = 1_000_000;
