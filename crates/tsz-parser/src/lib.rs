//! TypeScript and `JSDoc` parser for the tsz code-fix crates.
//!
//! - [`parser`]: scanner-driven recursive descent into a [`parser::NodeArena`]
//! - [`syntax`]: tree queries shared by the checker and language service
//!   (token lookup, `JSDoc` tag views, type lowering)

pub mod parser;
pub mod syntax;

pub use parser::{NodeArena, NodeIndex, ParserState};

#[cfg(test)]
#[path = "../tests/parser_tests.rs"]
mod parser_tests;

#[cfg(test)]
#[path = "../tests/jsdoc_tests.rs"]
mod jsdoc_tests;

#[cfg(test)]
#[path = "../tests/syntax_tests.rs"]
mod syntax_tests;
