//! The semantic-model query used by code fixes.

use tsz_parser::{NodeArena, NodeIndex};
use tsz_solver::TypeId;

/// Maps a syntactic type node to its resolved type.
///
/// Resolution never fails: nodes that cannot be resolved yield
/// `TypeId::UNKNOWN`.
pub trait TypeResolver {
    fn get_type_from_type_node(&self, arena: &NodeArena, node: NodeIndex) -> TypeId;
}
