//! Syntax utilities.
//!
//! Tree queries shared by the checker and the language service: token
//! lookup by offset, type-annotation containers, `JSDoc` typedef views, and
//! lowering of arena type nodes into owned `factory::TypeNode`s.

pub mod jsdoc_tags;
pub mod navigation;
pub mod type_container;
pub mod type_lowering;

pub use jsdoc_tags::{PropertyTag, TypedefTag};
pub use navigation::{find_ancestor, get_token_at_position};
pub use type_container::{TypeContainer, find_enclosing_type_container};
pub use type_lowering::{lower_type_node, type_node_from_source};
