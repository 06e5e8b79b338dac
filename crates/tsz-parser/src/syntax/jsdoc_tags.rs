//! Views of `@typedef` tags and their attachment to declarations.
//!
//! A `TypedefTag` is rebuilt from the arena on every query; nothing here is
//! cached.

use crate::parser::node_access::NodeAccess;
use crate::parser::syntax_kind_ext as ext;
use crate::parser::{NodeArena, NodeIndex};
use smallvec::SmallVec;

/// A `@property` tag nested under a typedef.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropertyTag {
    pub node: NodeIndex,
    /// Identifier, or a qualified name for `a.b`
    pub name: NodeIndex,
    pub type_expression: Option<NodeIndex>,
    pub is_bracketed: bool,
}

/// A `@typedef` tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypedefTag {
    pub node: NodeIndex,
    /// Last segment of the declared name
    pub name: Option<NodeIndex>,
    /// The whole, possibly dotted, declared name
    pub full_name: Option<NodeIndex>,
    /// `{...}` expression, or the type literal built from `@property` tags
    pub type_expression: Option<NodeIndex>,
    pub property_tags: SmallVec<[PropertyTag; 4]>,
}

impl TypedefTag {
    #[must_use]
    pub fn from_node(arena: &NodeArena, index: NodeIndex) -> Option<Self> {
        let node = arena.get(index)?;
        if node.kind != ext::JSDOC_TYPEDEF_TAG {
            return None;
        }
        let data = arena.get_jsdoc_tag(node)?;
        let type_expression = data.type_expression.into_option();
        let property_tags = type_expression
            .and_then(|expr| arena.get(expr))
            .and_then(|expr| arena.get_jsdoc_type_literal(expr))
            .map(|literal| {
                literal
                    .property_tags
                    .iter()
                    .filter_map(|tag| PropertyTag::from_node(arena, tag))
                    .collect()
            })
            .unwrap_or_default();
        Some(Self {
            node: index,
            name: data.name.into_option(),
            full_name: data.full_name.into_option(),
            type_expression,
            property_tags,
        })
    }

    /// Dotted text of the full name.
    #[must_use]
    pub fn full_name_text(&self, arena: &NodeArena) -> Option<String> {
        self.full_name
            .and_then(|name| arena.get_entity_name_text(name))
    }

    /// True when the type expression is a `JSDoc` type literal.
    #[must_use]
    pub fn has_type_literal(&self, arena: &NodeArena) -> bool {
        self.type_expression
            .is_some_and(|expr| arena.kind(expr) == Some(ext::JSDOC_TYPE_LITERAL))
    }
}

impl PropertyTag {
    #[must_use]
    pub fn from_node(arena: &NodeArena, index: NodeIndex) -> Option<Self> {
        let node = arena.get(index)?;
        if node.kind != ext::JSDOC_PROPERTY_TAG {
            return None;
        }
        let data = arena.get_jsdoc_tag(node)?;
        Some(Self {
            node: index,
            name: data.name,
            type_expression: data.type_expression.into_option(),
            is_bracketed: data.is_bracketed,
        })
    }

    #[must_use]
    pub fn name_text(&self, arena: &NodeArena) -> Option<String> {
        arena.get_entity_name_text(self.name)
    }
}

/// The typedef tag `node` if it belongs to a `JSDoc` block attached to its
/// owning declaration.
///
/// Only `node` itself is considered; subtrees are not searched.
#[must_use]
pub fn find_attached_typedef_tag(arena: &NodeArena, node: NodeIndex) -> Option<TypedefTag> {
    if arena.kind(node)? != ext::JSDOC_TYPEDEF_TAG {
        return None;
    }
    let jsdoc = arena.parent_of(node);
    let host = arena.parent_of(jsdoc);
    let attached = arena.get_jsdoc(host).iter().any(|&doc| {
        doc == jsdoc
            && arena
                .get(doc)
                .and_then(|d| arena.get_jsdoc_comment(d))
                .is_some_and(|comment| comment.tags.iter().any(|tag| tag == node))
    });
    if attached {
        TypedefTag::from_node(arena, node)
    } else {
        None
    }
}

#[must_use]
pub fn has_attached_typedef_tag(arena: &NodeArena, node: NodeIndex) -> bool {
    find_attached_typedef_tag(arena, node).is_some()
}

/// First typedef tag across every `JSDoc` block attached to `declaration`,
/// in source order.
#[must_use]
pub fn any_typedef_tag_on(arena: &NodeArena, declaration: NodeIndex) -> Option<TypedefTag> {
    arena
        .get_jsdoc(declaration)
        .iter()
        .filter_map(|&doc| arena.get(doc).and_then(|d| arena.get_jsdoc_comment(d)))
        .flat_map(|comment| comment.tags.iter())
        .find(|&tag| arena.kind(tag) == Some(ext::JSDOC_TYPEDEF_TAG))
        .and_then(|tag| TypedefTag::from_node(arena, tag))
}

/// All typedef tags in the file, in source order.
#[must_use]
pub fn collect_typedef_tags(arena: &NodeArena) -> Vec<NodeIndex> {
    let mut tags: Vec<NodeIndex> = arena
        .jsdoc
        .values()
        .flatten()
        .filter_map(|&doc| arena.get(doc).and_then(|d| arena.get_jsdoc_comment(d)))
        .flat_map(|comment| comment.tags.iter())
        .filter(|&tag| arena.kind(tag) == Some(ext::JSDOC_TYPEDEF_TAG))
        .collect();
    tags.sort_by_key(|&tag| arena.get(tag).map_or(0, |n| n.pos));
    tags
}
