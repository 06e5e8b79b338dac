//! Position-based navigation over the arena.

use crate::parser::{NodeAccess, NodeArena, NodeIndex};

/// Deepest node whose span contains `position` (`pos <= position < end`).
///
/// `JSDoc` blocks attached to a node are searched along with its children,
/// so an offset inside a comment resolves to the tag or name under it.
/// Returns `root` when no child contains the position.
#[must_use]
pub fn get_token_at_position(arena: &NodeArena, root: NodeIndex, position: u32) -> NodeIndex {
    let mut current = root;
    'descend: loop {
        for candidate in candidates(arena, current) {
            let contains = arena
                .get(candidate)
                .is_some_and(|node| node.pos <= position && position < node.end);
            if contains {
                current = candidate;
                continue 'descend;
            }
        }
        return current;
    }
}

/// Children of `index` with each child's attached `JSDoc` ahead of it.
fn candidates(arena: &NodeArena, index: NodeIndex) -> Vec<NodeIndex> {
    let children = arena.get_children(index);
    let mut out = Vec::with_capacity(children.len());
    for child in children {
        out.extend_from_slice(arena.get_jsdoc(child));
        out.push(child);
    }
    out
}

/// First node on the parent chain, starting with `start` itself, that
/// satisfies `predicate`.
pub fn find_ancestor(
    arena: &NodeArena,
    start: NodeIndex,
    mut predicate: impl FnMut(NodeIndex) -> bool,
) -> Option<NodeIndex> {
    let mut current = start;
    while current.is_some() {
        if predicate(current) {
            return Some(current);
        }
        current = arena.parent_of(current);
    }
    None
}
