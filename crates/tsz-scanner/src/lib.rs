//! TypeScript scanner/tokenizer for the tsz code-fix crates.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token types
//! - `ScannerState` - Tokenizer state machine, including the `JSDoc` comment mode
//! - `char_codes` - Character classification utilities

pub mod char_codes;

mod syntax_kind;
pub use syntax_kind::{SyntaxKind, text_to_keyword, token_is_keyword, token_to_text};

mod scanner_impl;
pub use scanner_impl::{ScannerSnapshot, ScannerState, TokenFlags};

#[cfg(test)]
#[path = "tests/scanner_tests.rs"]
mod scanner_tests;
