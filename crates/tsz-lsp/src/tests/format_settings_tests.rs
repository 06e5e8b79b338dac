use crate::format_settings::FormatCodeSettings;
use tsz_common::NewLineKind;

#[test]
fn test_defaults() {
    let settings = FormatCodeSettings::default();
    assert_eq!(settings.indent_size, 2);
    assert_eq!(settings.new_line_character, "\n");
    assert!(settings.convert_tabs_to_spaces);

    let options = settings.printer_options();
    assert_eq!(options.indent_size, 2);
    assert!(!options.use_tabs);
    assert_eq!(options.new_line, NewLineKind::LineFeed);
}

#[test]
fn test_from_json_fills_missing_fields() {
    let settings = FormatCodeSettings::from_json(r#"{"indentSize": 4}"#).expect("settings");
    assert_eq!(settings.indent_size, 4);
    assert_eq!(settings.new_line_character, "\n");
}

#[test]
fn test_from_json5() {
    let text = "{\n  // editor settings\n  newLineCharacter: '\\r\\n',\n  convertTabsToSpaces: false,\n}";
    let settings = FormatCodeSettings::from_json5(text).expect("settings");
    assert_eq!(settings.new_line_character, "\r\n");

    let options = settings.printer_options();
    assert!(options.use_tabs);
    assert_eq!(options.new_line, NewLineKind::CarriageReturnLineFeed);
}

#[test]
fn test_invalid_json_is_an_error() {
    assert!(FormatCodeSettings::from_json("{ indentSize: }").is_err());
    assert!(FormatCodeSettings::from_json(r#"{"indentSize": "four"}"#).is_err());
}
