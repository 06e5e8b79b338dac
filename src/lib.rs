//! Convert JSDoc `@typedef` comments into TypeScript type aliases.
//!
//! The work is split across the workspace crates:
//!
//! - `tsz-common`: spans, line maps, diagnostics and limits
//! - `tsz-scanner`: tokens and keyword text
//! - `tsz-parser`: TypeScript/JSDoc parser and tree queries
//! - `tsz-solver`: type interning and display
//! - `tsz-checker`: the semantic model behind `TypeResolver`
//! - `tsz-emitter`: printing of synthesized declarations
//! - `tsz-lsp`: code fix registry, change tracking and the typedef fix
//!
//! This crate adds tracing setup and the fourslash fixture harness.

pub mod fourslash;
pub mod tracing_config;

pub use tsz_checker as checker;
pub use tsz_common as common;
pub use tsz_emitter as emitter;
pub use tsz_lsp as lsp;
pub use tsz_parser as parser;
pub use tsz_scanner as scanner;
pub use tsz_solver as solver;

pub use fourslash::FourslashTest;
pub use tracing_config::init_tracing;
