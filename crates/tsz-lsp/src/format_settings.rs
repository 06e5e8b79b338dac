//! Editor formatting settings that shape inserted code.

use serde::{Deserialize, Serialize};
use tsz_common::NewLineKind;
use tsz_emitter::PrinterOptions;

/// The subset of tsserver `FormatCodeSettings` used when printing fixes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormatCodeSettings {
    pub indent_size: u32,
    pub new_line_character: String,
    pub convert_tabs_to_spaces: bool,
}

impl Default for FormatCodeSettings {
    fn default() -> Self {
        Self {
            indent_size: 2,
            new_line_character: "\n".to_string(),
            convert_tabs_to_spaces: true,
        }
    }
}

impl FormatCodeSettings {
    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Parse settings from JSON5, as found in hand-edited config files.
    pub fn from_json5(text: &str) -> Result<Self, json5::Error> {
        json5::from_str(text)
    }

    #[must_use]
    pub fn printer_options(&self) -> PrinterOptions {
        PrinterOptions {
            indent_size: self.indent_size,
            use_tabs: !self.convert_tabs_to_spaces,
            new_line: NewLineKind::from_new_line_character(&self.new_line_character),
        }
    }
}
