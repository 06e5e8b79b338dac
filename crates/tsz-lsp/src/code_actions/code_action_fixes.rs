//! Code fix protocol types, in tsserver shape.

use serde::Serialize;
use tsz_common::{LineMap, TextSpan};

/// One code fix offered at a position.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeFixAction {
    /// The internal name of the code fix (e.g., "convertTypedefToType").
    pub fix_name: String,
    /// Human-readable description of the fix.
    pub description: String,
    /// The file changes to apply.
    pub changes: Vec<FileTextChanges>,
    /// Optional commands to run after applying the fix.
    pub commands: Vec<serde_json::Value>,
    /// An identifier for fix-all support.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix_id: Option<String>,
    /// Human-readable description of the fix-all action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix_all_description: Option<String>,
}

impl CodeFixAction {
    #[must_use]
    pub fn new(
        fix_name: &str,
        changes: Vec<FileTextChanges>,
        description: &str,
        fix_id: &str,
        fix_all_description: &str,
    ) -> Self {
        Self {
            fix_name: fix_name.to_string(),
            description: description.to_string(),
            changes,
            commands: Vec::new(),
            fix_id: Some(fix_id.to_string()),
            fix_all_description: Some(fix_all_description.to_string()),
        }
    }
}

/// Result of a fix-all request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CombinedCodeActions {
    pub changes: Vec<FileTextChanges>,
    pub commands: Vec<serde_json::Value>,
}

/// Edits for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileTextChanges {
    pub file_name: String,
    pub text_changes: Vec<TextChange>,
}

/// Replace `span` with `new_text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextChange {
    pub span: TextSpan,
    pub new_text: String,
}

impl TextChange {
    /// Convert to tsserver 1-based line/offset form.
    #[must_use]
    pub fn to_protocol(&self, line_map: &LineMap, source: &str) -> CodeFixTextChange {
        let position = |offset: u32| {
            let pos = line_map.offset_to_position(offset, source);
            CodeFixPosition {
                line: pos.line + 1,
                offset: pos.character + 1,
            }
        };
        CodeFixTextChange {
            start: position(self.span.start),
            end: position(self.span.end()),
            new_text: self.new_text.clone(),
        }
    }
}

/// A text change within a file, in line/offset form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeFixTextChange {
    pub start: CodeFixPosition,
    pub end: CodeFixPosition,
    pub new_text: String,
}

/// A position in the tsserver protocol (1-based line/offset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CodeFixPosition {
    pub line: u32,
    pub offset: u32,
}

/// Apply non-overlapping `changes` to `source`. Changes are applied from the
/// highest start offset down so earlier offsets stay valid.
#[must_use]
pub fn apply_text_changes(source: &str, changes: &[TextChange]) -> String {
    let mut ordered: Vec<&TextChange> = changes.iter().collect();
    ordered.sort_by_key(|change| std::cmp::Reverse(change.span.start));

    let mut result = source.to_string();
    for change in ordered {
        let start = (change.span.start as usize).min(result.len());
        let end = (change.span.end() as usize).clamp(start, result.len());
        result.replace_range(start..end, &change.new_text);
    }
    result
}
