//! Code actions: quick fixes offered for diagnostics.

pub mod change_tracker;
pub mod code_action_fixes;
pub mod convert_typedef_to_type;
pub mod registry;

pub use change_tracker::ChangeTracker;
pub use code_action_fixes::{
    CodeFixAction, CodeFixPosition, CodeFixTextChange, CombinedCodeActions, FileTextChanges,
    TextChange, apply_text_changes,
};
pub use registry::{
    CodeFixContext, CodeFixProvider, CodeFixRegistry, get_combined_code_fix,
    get_fixes_for_error_code, get_supported_error_codes,
};
