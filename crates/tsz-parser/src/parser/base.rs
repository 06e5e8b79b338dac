//! Node handles shared by every arena consumer.

use serde::{Deserialize, Serialize};

/// Index of a node in a `NodeArena`. `NodeIndex::NONE` marks an absent slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    pub const NONE: Self = Self(u32::MAX);

    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline]
    #[must_use]
    pub const fn is_some(self) -> bool {
        self.0 != u32::MAX
    }

    /// Convert to `Option`, mapping `NONE` to `None`.
    #[inline]
    #[must_use]
    pub const fn into_option(self) -> Option<Self> {
        if self.is_none() { None } else { Some(self) }
    }
}

/// An ordered list of child nodes with the span of the list itself.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeList {
    pub nodes: Vec<NodeIndex>,
    pub pos: u32,
    pub end: u32,
}

impl NodeList {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            pos: 0,
            end: 0,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.nodes.iter().copied()
    }
}
