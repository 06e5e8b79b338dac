//! Suggestion diagnostics for `JSDoc` constructs with a TypeScript
//! equivalent.

use crate::checker::TypeChecker;
use tsz_common::Diagnostic;
use tsz_common::diagnostics::{diagnostic_codes, get_diagnostic_message};
use tsz_common::limits::MAX_SUGGESTION_NODES;
use tsz_parser::parser::node_access::NodeAccess;
use tsz_parser::parser::syntax_kind_ext as ext;
use tsz_parser::syntax::jsdoc_tags::collect_typedef_tags;
use tsz_parser::{NodeArena, NodeIndex};
use tracing::debug;

impl TypeChecker {
    /// One suggestion per `@typedef` tag in the file, spanning the tag.
    #[must_use]
    pub fn get_suggestion_diagnostics(&self, arena: &NodeArena, root: NodeIndex) -> Vec<Diagnostic> {
        let Some(message) = get_diagnostic_message(
            diagnostic_codes::JSDOC_TYPEDEF_MAY_BE_CONVERTED_TO_TYPESCRIPT_TYPE,
        ) else {
            return Vec::new();
        };
        if arena.kind(root) != Some(ext::SOURCE_FILE) {
            return Vec::new();
        }

        let diagnostics: Vec<Diagnostic> = collect_typedef_tags(arena)
            .into_iter()
            .take(MAX_SUGGESTION_NODES)
            .filter_map(|tag| arena.get(tag))
            .map(|node| {
                Diagnostic::from_message(
                    self.file_name(),
                    node.pos,
                    node.end - node.pos,
                    message,
                    &[],
                )
            })
            .collect();
        debug!(count = diagnostics.len(), "typedef suggestions");
        diagnostics
    }
}
