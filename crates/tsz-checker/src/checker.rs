//! `TypeChecker`: the semantic model for one parsed file.

use crate::context::CheckerContext;
use crate::type_node::TypeNodeChecker;
use crate::type_resolver::TypeResolver;
use tsz_parser::{NodeArena, NodeIndex};
use tsz_solver::{TypeFormatter, TypeId, TypeInterner};
use tracing::debug;

pub struct TypeChecker {
    pub(crate) ctx: CheckerContext,
}

impl TypeChecker {
    /// Create a checker for the file rooted at `root`. Type aliases declared
    /// in the file are collected up front.
    #[must_use]
    pub fn new(arena: &NodeArena, root: NodeIndex, file_name: impl Into<String>) -> Self {
        let ctx = CheckerContext::new(arena, root, file_name);
        debug!(file = %ctx.file_name, aliases = ctx.aliases.len(), "created type checker");
        Self { ctx }
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.ctx.file_name
    }

    #[must_use]
    pub const fn types(&self) -> &TypeInterner {
        &self.ctx.types
    }

    /// Display form of `type_id`.
    #[must_use]
    pub fn type_to_string(&self, type_id: TypeId) -> String {
        TypeFormatter::new(&self.ctx.types).format(type_id)
    }

    /// The aliased type node declared under `name`, if any.
    #[must_use]
    pub fn alias_type_node(&self, name: &str) -> Option<NodeIndex> {
        self.ctx.aliases.get(name).copied()
    }
}

impl TypeResolver for TypeChecker {
    fn get_type_from_type_node(&self, arena: &NodeArena, node: NodeIndex) -> TypeId {
        TypeNodeChecker::new(&self.ctx, arena).check(node)
    }
}
