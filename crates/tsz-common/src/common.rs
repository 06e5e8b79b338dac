//! Common enums shared by the emitter and the language service.

use serde::{Deserialize, Serialize};

/// New line style used when printing synthesized code.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NewLineKind {
    #[default]
    LineFeed,
    CarriageReturnLineFeed,
}

impl NewLineKind {
    /// The literal new line sequence.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LineFeed => "\n",
            Self::CarriageReturnLineFeed => "\r\n",
        }
    }

    /// Map a tsserver `newLineCharacter` setting to a kind.
    /// Anything other than `"\r\n"` is treated as a line feed.
    #[must_use]
    pub fn from_new_line_character(text: &str) -> Self {
        if text == "\r\n" {
            Self::CarriageReturnLineFeed
        } else {
            Self::LineFeed
        }
    }
}
