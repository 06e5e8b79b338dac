//! Tests for the typedef-to-type-alias code fix.

use tsz_checker::TypeChecker;
use tsz_common::TextSpan;
use tsz_common::diagnostics::diagnostic_codes;
use tsz_lsp::code_actions::convert_typedef_to_type::FIX_ID;
use tsz_lsp::{
    CodeFixAction, CodeFixContext, FormatCodeSettings, apply_text_changes, get_combined_code_fix,
    get_fixes_for_error_code,
};
use tsz_parser::ParserState;

fn fixes_at(source: &str, start: u32, settings: &FormatCodeSettings) -> Vec<CodeFixAction> {
    let mut parser = ParserState::new("test.ts".to_string(), source.to_string());
    let root = parser.parse_source_file();
    let arena = parser.get_arena();
    let checker = TypeChecker::new(arena, root, "test.ts");
    let context = CodeFixContext {
        file_name: "test.ts",
        source_text: source,
        arena,
        root,
        checker: &checker,
        error_code: diagnostic_codes::CONVERT_TYPEDEF_TO_TYPE,
        span: TextSpan::new(start, 0),
        format_settings: settings,
    };
    get_fixes_for_error_code(&context)
}

fn apply_single_fix(source: &str, start: u32) -> Option<String> {
    let actions = fixes_at(source, start, &FormatCodeSettings::default());
    let action = actions.into_iter().next()?;
    assert_eq!(action.changes.len(), 1);
    Some(apply_text_changes(source, &action.changes[0].text_changes))
}

const FOO: &str = "/**\n * @typedef {Object} Foo\n * @property {Number} bar\n */";

#[test]
fn test_object_typedef_becomes_type_alias() {
    let actions = fixes_at(FOO, 7, &FormatCodeSettings::default());
    assert_eq!(actions.len(), 1);

    let action = &actions[0];
    assert_eq!(action.fix_name, FIX_ID);
    assert_eq!(action.description, "Convert typedef to type");
    assert_eq!(action.fix_id.as_deref(), Some(FIX_ID));
    assert_eq!(
        action.fix_all_description.as_deref(),
        Some("Convert all typedefs to types")
    );
    assert!(action.commands.is_empty());

    let file = &action.changes[0];
    assert_eq!(file.file_name, "test.ts");
    assert_eq!(file.text_changes.len(), 1);
    let edit = &file.text_changes[0];
    assert_eq!(edit.span, TextSpan::new(0, FOO.len() as u32));
    assert_eq!(edit.new_text, "type Foo = {\n  bar: number\n};");
}

#[test]
fn test_only_the_comment_is_replaced() {
    let source = "/** @typedef {string | number} Id */\nlet id;";
    assert_eq!(
        apply_single_fix(source, 4).as_deref(),
        Some("type Id = string | number;\nlet id;")
    );
}

#[test]
fn test_typedef_without_braces() {
    let source = "/**\n * @typedef Point\n * @property {number} x\n * @property {number} [y]\n */\nlet p;";
    assert_eq!(
        apply_single_fix(source, 7).as_deref(),
        Some("type Point = {\n  x: number;\n  y?: number\n};\nlet p;")
    );
}

#[test]
fn test_jsdoc_spellings_are_normalized() {
    let source = "/** @typedef {Array.<?String>} Names */";
    assert_eq!(
        apply_single_fix(source, 4).as_deref(),
        Some("type Names = (string | null)[];")
    );
}

#[test]
fn test_native_array_reference_is_kept() {
    let source = "/** @typedef {Array<string>} Names */";
    assert_eq!(
        apply_single_fix(source, 4).as_deref(),
        Some("type Names = Array<string>;")
    );
}

#[test]
fn test_unresolved_reference_still_converts() {
    let source = "/** @typedef {Missing} X */\nlet x;";
    assert_eq!(
        apply_single_fix(source, 4).as_deref(),
        Some("type X = Missing;\nlet x;")
    );
}

#[test]
fn test_jsdoc_function_type_keeps_its_text() {
    let source = "/** @typedef {function(string): number} F */\nlet f;";
    assert_eq!(
        apply_single_fix(source, 4).as_deref(),
        Some("type F = function(string): number;\nlet f;")
    );
}

#[test]
fn test_import_type_keeps_its_text() {
    let source = "/** @typedef {import('./x').Y} I */";
    assert_eq!(
        apply_single_fix(source, 4).as_deref(),
        Some("type I = import('./x').Y;")
    );
}

#[test]
fn test_dotted_name_keeps_full_text() {
    let source = "/** @typedef {number} ns.Id */\nlet a;";
    assert_eq!(
        apply_single_fix(source, 4).as_deref(),
        Some("type ns.Id = number;\nlet a;")
    );
}

#[test]
fn test_settings_shape_output() {
    let settings = FormatCodeSettings {
        indent_size: 4,
        new_line_character: "\r\n".to_string(),
        convert_tabs_to_spaces: true,
    };
    let actions = fixes_at(FOO, 7, &settings);
    assert_eq!(
        actions[0].changes[0].text_changes[0].new_text,
        "type Foo = {\r\n    bar: number\r\n};"
    );
}

#[test]
fn test_missing_name_has_no_fix() {
    let source = "/** @typedef {string} */\nlet a;";
    assert!(fixes_at(source, 4, &FormatCodeSettings::default()).is_empty());
}

#[test]
fn test_missing_type_has_no_fix() {
    let source = "/** @typedef Lonely */\nlet a;";
    assert!(fixes_at(source, 4, &FormatCodeSettings::default()).is_empty());
}

#[test]
fn test_position_outside_typedef_has_no_fix() {
    let source = "/** @typedef {string} Name */\nlet a: number;";
    let start = source.find("number").expect("annotation") as u32;
    assert!(fixes_at(source, start, &FormatCodeSettings::default()).is_empty());
    assert!(fixes_at("let x = 1;", 4, &FormatCodeSettings::default()).is_empty());
}

#[test]
fn test_fix_all_is_empty() {
    let mut parser = ParserState::new("test.ts".to_string(), FOO.to_string());
    let root = parser.parse_source_file();
    let arena = parser.get_arena();
    let checker = TypeChecker::new(arena, root, "test.ts");
    let settings = FormatCodeSettings::default();
    let context = CodeFixContext {
        file_name: "test.ts",
        source_text: FOO,
        arena,
        root,
        checker: &checker,
        error_code: diagnostic_codes::CONVERT_ALL_TYPEDEFS_TO_TYPES,
        span: TextSpan::new(0, FOO.len() as u32),
        format_settings: &settings,
    };
    let combined = get_combined_code_fix(FIX_ID, &context).expect("registered fix id");
    assert!(combined.changes.is_empty());
    assert!(combined.commands.is_empty());
}

#[test]
fn test_action_serializes_in_protocol_shape() {
    let actions = fixes_at(FOO, 7, &FormatCodeSettings::default());
    let json = serde_json::to_value(&actions[0]).expect("json");
    assert_eq!(json["fixName"], FIX_ID);
    assert_eq!(json["fixId"], FIX_ID);
    let change = &json["changes"][0];
    assert_eq!(change["fileName"], "test.ts");
    assert_eq!(change["textChanges"][0]["span"]["start"], 0);
    assert_eq!(change["textChanges"][0]["newText"], "type Foo = {\n  bar: number\n};");
}
