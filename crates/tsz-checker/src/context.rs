//! Per-file checker state.

use rustc_hash::{FxHashMap, FxHashSet};
use std::cell::{Cell, RefCell};
use tsz_parser::parser::syntax_kind_ext as ext;
use tsz_parser::syntax::TypedefTag;
use tsz_parser::syntax::jsdoc_tags::collect_typedef_tags;
use tsz_parser::{NodeArena, NodeIndex};
use tsz_solver::{TypeId, TypeInterner};
use tracing::trace;

/// State shared by every resolution in one checker.
///
/// Interior mutability lets queries run through `&self`; a context is
/// confined to one thread and one request.
pub struct CheckerContext {
    pub file_name: String,
    pub types: TypeInterner,
    /// Resolved types keyed by node index
    pub node_types: RefCell<FxHashMap<u32, TypeId>>,
    /// Alias name to its aliased type node. Native aliases and `@typedef`
    /// tags share the namespace; the first declaration wins.
    pub aliases: FxHashMap<String, NodeIndex>,
    /// Alias type nodes currently being resolved
    pub resolving: RefCell<FxHashSet<u32>>,
    pub depth: Cell<u32>,
}

impl CheckerContext {
    #[must_use]
    pub fn new(arena: &NodeArena, root: NodeIndex, file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            types: TypeInterner::new(),
            node_types: RefCell::new(FxHashMap::default()),
            aliases: collect_aliases(arena, root),
            resolving: RefCell::new(FxHashSet::default()),
            depth: Cell::new(0),
        }
    }
}

fn collect_aliases(arena: &NodeArena, root: NodeIndex) -> FxHashMap<String, NodeIndex> {
    let mut aliases = FxHashMap::default();

    let statements = arena
        .get(root)
        .and_then(|node| arena.get_source_file(node))
        .map(|file| file.statements.iter().collect::<Vec<_>>())
        .unwrap_or_default();
    for statement in statements {
        let Some(node) = arena.get(statement) else {
            continue;
        };
        if node.kind != ext::TYPE_ALIAS_DECLARATION {
            continue;
        }
        let Some(alias) = arena.get_type_alias(node) else {
            continue;
        };
        if let (Some(name), Some(type_node)) = (
            arena.get_entity_name_text(alias.name),
            alias.type_node.into_option(),
        ) {
            aliases.entry(name).or_insert(type_node);
        }
    }

    for tag in collect_typedef_tags(arena) {
        let Some(typedef) = TypedefTag::from_node(arena, tag) else {
            continue;
        };
        if let (Some(name), Some(type_node)) =
            (typedef.full_name_text(arena), typedef.type_expression)
        {
            aliases.entry(name).or_insert(type_node);
        }
    }

    trace!(count = aliases.len(), "collected type aliases");
    aliases
}
