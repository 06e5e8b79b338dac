//! Nodes that carry a single type-annotation slot.

use crate::parser::syntax_kind_ext as ext;
use crate::parser::{NodeArena, NodeIndex};
use crate::syntax::navigation::get_token_at_position;
use tracing::trace;

/// A node from the closed set of kinds with one optional type slot.
///
/// Each variant groups the kinds whose slot lives in the same data field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeContainer {
    /// `x as T`, `<T>x`
    TypeAssertion(NodeIndex),
    /// Call, construct and index signatures
    Signature(NodeIndex),
    Function(NodeIndex),
    /// `get` / `set` accessors
    Accessor(NodeIndex),
    MappedType(NodeIndex),
    /// Method declarations and method signatures
    Method(NodeIndex),
    Parameter(NodeIndex),
    /// Property declarations and property signatures
    Property(NodeIndex),
    /// `type X = ...` and the `JSDoc` form `@typedef {...} X`
    TypeAlias(NodeIndex),
    Variable(NodeIndex),
}

impl TypeContainer {
    /// Classify `index`; `None` for kinds outside the set.
    #[must_use]
    pub fn from_node(arena: &NodeArena, index: NodeIndex) -> Option<Self> {
        let node = arena.get(index)?;
        let container = match node.kind {
            ext::AS_EXPRESSION | ext::TYPE_ASSERTION_EXPRESSION => Self::TypeAssertion(index),
            ext::CALL_SIGNATURE | ext::CONSTRUCT_SIGNATURE | ext::INDEX_SIGNATURE => {
                Self::Signature(index)
            }
            ext::FUNCTION_DECLARATION => Self::Function(index),
            ext::GET_ACCESSOR | ext::SET_ACCESSOR => Self::Accessor(index),
            ext::MAPPED_TYPE => Self::MappedType(index),
            ext::METHOD_DECLARATION | ext::METHOD_SIGNATURE => Self::Method(index),
            ext::PARAMETER => Self::Parameter(index),
            ext::PROPERTY_DECLARATION | ext::PROPERTY_SIGNATURE => Self::Property(index),
            ext::TYPE_ALIAS_DECLARATION | ext::JSDOC_TYPEDEF_TAG => Self::TypeAlias(index),
            ext::VARIABLE_DECLARATION => Self::Variable(index),
            _ => return None,
        };
        Some(container)
    }

    #[must_use]
    pub const fn node(self) -> NodeIndex {
        match self {
            Self::TypeAssertion(index)
            | Self::Signature(index)
            | Self::Function(index)
            | Self::Accessor(index)
            | Self::MappedType(index)
            | Self::Method(index)
            | Self::Parameter(index)
            | Self::Property(index)
            | Self::TypeAlias(index)
            | Self::Variable(index) => index,
        }
    }

    /// The type slot, or `None` when it is empty.
    #[must_use]
    pub fn type_node(self, arena: &NodeArena) -> Option<NodeIndex> {
        let node = arena.get(self.node())?;
        let slot = match self {
            Self::TypeAssertion(_) => arena.get_type_assertion(node)?.type_node,
            Self::Signature(_) => match node.kind {
                ext::INDEX_SIGNATURE => arena.get_index_signature(node)?.type_annotation,
                _ => arena.get_signature(node)?.type_annotation,
            },
            Self::Function(_) => arena.get_function(node)?.type_annotation,
            Self::Accessor(_) => arena.get_accessor(node)?.type_annotation,
            Self::MappedType(_) => arena.get_mapped_type(node)?.type_node,
            Self::Method(_) => match node.kind {
                ext::METHOD_SIGNATURE => arena.get_signature(node)?.type_annotation,
                _ => arena.get_method_decl(node)?.type_annotation,
            },
            Self::Parameter(_) => arena.get_parameter(node)?.type_annotation,
            Self::Property(_) => match node.kind {
                ext::PROPERTY_SIGNATURE => arena.get_signature(node)?.type_annotation,
                _ => arena.get_property_decl(node)?.type_annotation,
            },
            Self::TypeAlias(_) => match node.kind {
                ext::JSDOC_TYPEDEF_TAG => arena.get_jsdoc_tag(node)?.type_expression,
                _ => arena.get_type_alias(node)?.type_node,
            },
            Self::Variable(_) => arena.get_variable_declaration(node)?.type_annotation,
        };
        slot.into_option()
    }
}

/// Nearest type container enclosing `position`, starting at the node that
/// covers it.
#[must_use]
pub fn find_enclosing_type_container(
    arena: &NodeArena,
    root: NodeIndex,
    position: u32,
) -> Option<TypeContainer> {
    let mut current = get_token_at_position(arena, root, position);
    while current.is_some() {
        if let Some(container) = TypeContainer::from_node(arena, current) {
            trace!(position, node = current.0, ?container, "found type container");
            return Some(container);
        }
        current = arena.parent_of(current);
    }
    None
}
