//! Edit collection for a single code fix.
//!
//! A `ChangeTracker` lives for one fix-construction call: edits are staged,
//! then committed as one `FileTextChanges` in ascending start order.

use crate::code_actions::code_action_fixes::{FileTextChanges, TextChange};
use tsz_common::TextSpan;
use tsz_emitter::{PrinterOptions, TypePrinter};
use tsz_parser::parser::factory::TypeAliasDeclaration;
use tsz_parser::{NodeArena, NodeIndex};
use tracing::trace;

pub struct ChangeTracker {
    file_name: String,
    printer: TypePrinter,
    edits: Vec<TextChange>,
}

impl ChangeTracker {
    #[must_use]
    pub fn new(file_name: impl Into<String>, options: PrinterOptions) -> Self {
        Self {
            file_name: file_name.into(),
            printer: TypePrinter::new(options),
            edits: Vec::new(),
        }
    }

    /// Run `f` against a fresh tracker and return its committed changes.
    /// Yields an empty list when `f` stages nothing.
    pub fn with(
        file_name: &str,
        options: PrinterOptions,
        f: impl FnOnce(&mut Self),
    ) -> Vec<FileTextChanges> {
        let mut tracker = Self::new(file_name, options);
        f(&mut tracker);
        tracker.into_file_changes()
    }

    /// Replace the full span of `node` with the printed `declaration`.
    pub fn replace_node_with_type_alias(
        &mut self,
        arena: &NodeArena,
        node: NodeIndex,
        declaration: &TypeAliasDeclaration,
    ) {
        let Some(target) = arena.get(node) else {
            return;
        };
        let span = TextSpan::from_bounds(target.pos, target.end);
        let text = self.printer.print_type_alias(declaration);
        self.replace_span(span, text);
    }

    /// Stage one replacement. Staged spans must not overlap.
    pub fn replace_span(&mut self, span: TextSpan, new_text: String) {
        debug_assert!(
            !self
                .edits
                .iter()
                .any(|edit| edit.span == span || edit.span.overlaps(&span)),
            "overlapping edit at {}..{}",
            span.start,
            span.end()
        );
        trace!(start = span.start, end = span.end(), "staged edit");
        self.edits.push(TextChange { span, new_text });
    }

    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.edits.is_empty()
    }

    /// Staged edits sorted by ascending start offset.
    #[must_use]
    pub fn commit(mut self) -> Vec<TextChange> {
        self.edits.sort_by_key(|edit| edit.span.start);
        self.edits
    }

    fn into_file_changes(self) -> Vec<FileTextChanges> {
        let file_name = self.file_name.clone();
        let text_changes = self.commit();
        if text_changes.is_empty() {
            return Vec::new();
        }
        vec![FileTextChanges {
            file_name,
            text_changes,
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsz_parser::ParserState;
    use tsz_parser::parser::factory::TypeNode;

    #[test]
    fn test_commit_orders_by_start() {
        let mut tracker = ChangeTracker::new("a.ts", PrinterOptions::default());
        tracker.replace_span(TextSpan::new(10, 2), "b".to_string());
        tracker.replace_span(TextSpan::new(0, 3), "a".to_string());
        let edits = tracker.commit();
        assert_eq!(edits.len(), 2);
        assert_eq!(edits[0].span.start, 0);
        assert_eq!(edits[1].span.start, 10);
    }

    #[test]
    fn test_with_empty_session_has_no_changes() {
        let changes = ChangeTracker::with("a.ts", PrinterOptions::default(), |_| {});
        assert!(changes.is_empty());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "overlapping edit")]
    fn test_overlapping_edits_rejected() {
        let mut tracker = ChangeTracker::new("a.ts", PrinterOptions::default());
        tracker.replace_span(TextSpan::new(0, 5), String::new());
        tracker.replace_span(TextSpan::new(3, 5), String::new());
    }

    #[test]
    fn test_replace_node_uses_node_span() {
        let source = "let x = 1;\nlet y = 2;";
        let mut parser = ParserState::new("a.ts".to_string(), source.to_string());
        let root = parser.parse_source_file();
        let arena = parser.get_arena();
        let statement = arena
            .get_source_file(arena.get(root).expect("root"))
            .and_then(|file| file.statements.iter().nth(1))
            .expect("second statement");
        let node = arena.get(statement).expect("statement node");
        let (pos, end) = (node.pos, node.end);

        let declaration = TypeAliasDeclaration::new("Y", Vec::new(), TypeNode::reference("T"));
        let changes = ChangeTracker::with("a.ts", PrinterOptions::default(), |tracker| {
            tracker.replace_node_with_type_alias(arena, statement, &declaration);
        });

        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].file_name, "a.ts");
        let edit = &changes[0].text_changes[0];
        assert_eq!(edit.span, TextSpan::from_bounds(pos, end));
        assert_eq!(edit.new_text, "type Y = T;");
    }
}
