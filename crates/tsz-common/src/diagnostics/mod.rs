//! Diagnostic types and message lookup.
//!
//! The message table lives in `data.rs`.

use serde::Serialize;

mod data;
pub use data::{DIAGNOSTIC_MESSAGES, diagnostic_codes, diagnostic_messages};

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Suggestion = 2,
    Message = 3,
}

/// A diagnostic reported against a span of a source file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    #[must_use]
    pub fn error(
        file: impl Into<String>,
        start: u32,
        length: u32,
        message: impl Into<String>,
        code: u32,
    ) -> Self {
        Self {
            file: file.into(),
            start,
            length,
            message_text: message.into(),
            category: DiagnosticCategory::Error,
            code,
        }
    }

    /// Create a diagnostic from a catalog entry, filling its placeholders.
    #[must_use]
    pub fn from_message(
        file: impl Into<String>,
        start: u32,
        length: u32,
        message: &DiagnosticMessage,
        args: &[&str],
    ) -> Self {
        Self {
            file: file.into(),
            start,
            length,
            message_text: format_message(message.message, args),
            category: message.category,
            code: message.code,
        }
    }

    /// End offset of the reported span.
    #[must_use]
    pub const fn end(&self) -> u32 {
        self.start + self.length
    }
}

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

/// A diagnostic message definition with code, category, and message template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

/// Look up a diagnostic message definition by code.
#[must_use]
pub fn get_diagnostic_message(code: u32) -> Option<&'static DiagnosticMessage> {
    DIAGNOSTIC_MESSAGES.iter().find(|m| m.code == code)
}

/// Get the message template for a diagnostic code.
#[must_use]
pub fn get_message_template(code: u32) -> Option<&'static str> {
    get_diagnostic_message(code).map(|m| m.message)
}
