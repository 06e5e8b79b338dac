//! Parser - arena AST for TypeScript declarations and `JSDoc` comments.
//!
//! `ParserState` produces a `NodeArena`; nodes are 16-byte headers
//! pointing into typed data pools. `NodeAccess` is the read side shared
//! by the checker, emitter, and language service.

pub mod base;
pub mod factory;
pub mod node;
pub mod node_access;
mod node_arena;
pub mod state;
mod state_expressions;
mod state_jsdoc;
mod state_statements;
mod state_types;
pub mod syntax_kind_ext;

pub use base::{NodeIndex, NodeList};
pub use node::{Node, NodeArena, NodeView, node_flags};
pub use node_access::{NodeAccess, NodeInfo};
pub use state::{ParseDiagnostic, ParserState};
