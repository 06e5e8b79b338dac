//! Interned structural types.
//!
//! The checker resolves annotations into `TypeId`s held by a
//! `TypeInterner`; `TypeFormatter` renders them for logs and tests.

pub mod format;
pub mod intern;
pub mod types;

pub use format::TypeFormatter;
pub use intern::TypeInterner;
pub use types::{
    Atom, FunctionShape, IntrinsicKind, LiteralValue, ParamInfo, PropertyInfo, TypeData, TypeId,
    TypeList,
};

#[cfg(test)]
#[path = "tests/intern_tests.rs"]
mod intern_tests;

#[cfg(test)]
#[path = "tests/format_tests.rs"]
mod format_tests;
