//! Code fixes for the tsz code-fix crates.
//!
//! - [`code_actions`]: fix registry, change tracking and the built-in fixes
//! - [`format_settings`]: editor settings that shape printed code

pub mod code_actions;
pub mod format_settings;

pub use code_actions::{
    ChangeTracker, CodeFixAction, CodeFixContext, CodeFixProvider, CodeFixRegistry,
    CombinedCodeActions, FileTextChanges, TextChange, apply_text_changes, get_combined_code_fix,
    get_fixes_for_error_code, get_supported_error_codes,
};
pub use format_settings::FormatCodeSettings;

#[cfg(test)]
#[path = "tests/format_settings_tests.rs"]
mod format_settings_tests;
