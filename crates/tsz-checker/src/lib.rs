//! Semantic model for the tsz code-fix crates.
//!
//! - `TypeChecker` resolves type nodes to interned `TypeId`s through the
//!   [`TypeResolver`] trait, following same-file type aliases and `@typedef`
//!   declarations
//! - `get_suggestion_diagnostics` reports `JSDoc` typedefs that can become
//!   TypeScript type aliases

pub mod checker;
pub mod context;
mod jsdoc_suggestions;
pub mod type_node;
pub mod type_resolver;

pub use checker::TypeChecker;
pub use type_resolver::TypeResolver;
