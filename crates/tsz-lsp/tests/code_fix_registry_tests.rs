//! Tests for code fix registration and dispatch.

use tsz_checker::TypeChecker;
use tsz_common::diagnostics::diagnostic_codes;
use tsz_common::{LineMap, TextSpan};
use tsz_lsp::code_actions::CodeFixPosition;
use tsz_lsp::code_actions::convert_typedef_to_type::{ConvertTypedefToType, FIX_ID};
use tsz_lsp::{
    CodeFixAction, CodeFixContext, CodeFixProvider, CodeFixRegistry, CombinedCodeActions,
    FileTextChanges, FormatCodeSettings, TextChange, apply_text_changes, get_combined_code_fix,
    get_fixes_for_error_code, get_supported_error_codes,
};
use tsz_parser::ParserState;

const FOO: &str = "/**\n * @typedef {Object} Foo\n * @property {Number} bar\n */";

fn with_context<R>(
    source: &str,
    error_code: u32,
    start: u32,
    f: impl FnOnce(&CodeFixContext<'_>) -> R,
) -> R {
    let mut parser = ParserState::new("test.ts".to_string(), source.to_string());
    let root = parser.parse_source_file();
    let arena = parser.get_arena();
    let checker = TypeChecker::new(arena, root, "test.ts");
    let settings = FormatCodeSettings::default();
    let context = CodeFixContext {
        file_name: "test.ts",
        source_text: source,
        arena,
        root,
        checker: &checker,
        error_code,
        span: TextSpan::new(start, 0),
        format_settings: &settings,
    };
    f(&context)
}

struct InsertMarker;

impl CodeFixProvider for InsertMarker {
    fn fix_ids(&self) -> &'static [&'static str] {
        &["insertMarker"]
    }

    fn error_codes(&self) -> &'static [u32] {
        &[9999]
    }

    fn get_code_actions(&self, context: &CodeFixContext<'_>) -> Vec<CodeFixAction> {
        let changes = vec![FileTextChanges {
            file_name: context.file_name.to_string(),
            text_changes: vec![TextChange {
                span: TextSpan::new(context.span.start, 0),
                new_text: "/*here*/".to_string(),
            }],
        }];
        vec![CodeFixAction::new(
            "insertMarker",
            changes,
            "Insert marker",
            "insertMarker",
            "Insert all markers",
        )]
    }

    fn get_all_code_actions(&self, _context: &CodeFixContext<'_>) -> CombinedCodeActions {
        CombinedCodeActions::default()
    }
}

#[test]
fn test_supported_error_codes() {
    assert_eq!(
        get_supported_error_codes(),
        vec![
            diagnostic_codes::JSDOC_TYPEDEF_MAY_BE_CONVERTED_TO_TYPESCRIPT_TYPE,
            diagnostic_codes::CONVERT_TYPEDEF_TO_TYPE,
        ]
    );
}

#[test]
fn test_suggestion_code_dispatches_to_typedef_fix() {
    let code = diagnostic_codes::JSDOC_TYPEDEF_MAY_BE_CONVERTED_TO_TYPESCRIPT_TYPE;
    let actions = with_context(FOO, code, 7, get_fixes_for_error_code);
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].fix_name, FIX_ID);
}

#[test]
fn test_unknown_code_yields_nothing() {
    let actions = with_context(FOO, 2304, 7, get_fixes_for_error_code);
    assert!(actions.is_empty());
    assert!(with_context(FOO, 2304, 7, |ctx| get_combined_code_fix("fixSpelling", ctx)).is_none());
}

#[test]
fn test_local_registry_lookup() {
    let mut registry = CodeFixRegistry::new();
    registry.register(Box::new(ConvertTypedefToType));
    registry.register(Box::new(InsertMarker));

    assert_eq!(registry.supported_error_codes(), vec![9999, 80009, 95176]);
    assert!(registry.provider_for_fix_id("insertMarker").is_some());
    assert!(registry.provider_for_fix_id(FIX_ID).is_some());
    assert!(registry.provider_for_fix_id("missing").is_none());
    assert_eq!(registry.providers_for_error_code(9999).count(), 1);
    assert_eq!(registry.providers_for_error_code(1).count(), 0);

    let source = "let x;";
    let actions = with_context(source, 9999, 4, |ctx| registry.get_fixes_for_error_code(ctx));
    assert_eq!(actions.len(), 1);
    let edited = apply_text_changes(source, &actions[0].changes[0].text_changes);
    assert_eq!(edited, "let /*here*/x;");
}

#[test]
fn test_protocol_positions_are_one_based() {
    let source = "let a;\n/** @typedef {string} S */\nlet b;";
    let start = source.find("@typedef").expect("tag") as u32;
    let actions = with_context(
        source,
        diagnostic_codes::CONVERT_TYPEDEF_TO_TYPE,
        start,
        get_fixes_for_error_code,
    );
    let change = &actions[0].changes[0].text_changes[0];
    let line_map = LineMap::build(source);
    let protocol = change.to_protocol(&line_map, source);
    assert_eq!(protocol.start, CodeFixPosition { line: 2, offset: 1 });
    assert_eq!(protocol.end, CodeFixPosition { line: 2, offset: 27 });
    assert_eq!(protocol.new_text, "type S = string;");
}

#[test]
fn test_apply_text_changes_in_reverse_order() {
    let changes = vec![
        TextChange {
            span: TextSpan::new(0, 1),
            new_text: "A".to_string(),
        },
        TextChange {
            span: TextSpan::new(4, 1),
            new_text: "EEE".to_string(),
        },
    ];
    assert_eq!(apply_text_changes("abcde", &changes), "AbcdEEE");
}
