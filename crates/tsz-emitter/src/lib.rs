//! Printing of synthesized TypeScript declarations.
//!
//! Code fixes build owned `TypeNode` trees and type-alias declarations with
//! `tsz_parser::parser::factory`; [`TypePrinter`] turns them into source
//! text using the caller's indentation and new line settings.

pub mod type_printer;

pub use type_printer::{PrinterOptions, TypePrinter};
