//! Code fix registration and dispatch.
//!
//! Providers register once, keyed by the diagnostic codes they handle and
//! the fix ids they expose. The process-wide registry is built on first use
//! and never modified afterwards.

use crate::code_actions::code_action_fixes::{CodeFixAction, CombinedCodeActions};
use crate::code_actions::convert_typedef_to_type::ConvertTypedefToType;
use crate::format_settings::FormatCodeSettings;
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use tsz_checker::TypeResolver;
use tsz_common::TextSpan;
use tsz_parser::{NodeArena, NodeIndex};
use tracing::debug;

/// Everything a provider sees for one request.
pub struct CodeFixContext<'a> {
    pub file_name: &'a str,
    pub source_text: &'a str,
    pub arena: &'a NodeArena,
    pub root: NodeIndex,
    pub checker: &'a dyn TypeResolver,
    /// The diagnostic code the fix is requested for
    pub error_code: u32,
    /// Span of the triggering diagnostic or selection
    pub span: TextSpan,
    pub format_settings: &'a FormatCodeSettings,
}

pub trait CodeFixProvider: Send + Sync {
    fn fix_ids(&self) -> &'static [&'static str];

    fn error_codes(&self) -> &'static [u32];

    /// Fixes for the context's span. Empty when nothing applies.
    fn get_code_actions(&self, context: &CodeFixContext<'_>) -> Vec<CodeFixAction>;

    /// Fix-all over the context's file.
    fn get_all_code_actions(&self, context: &CodeFixContext<'_>) -> CombinedCodeActions;
}

#[derive(Default)]
pub struct CodeFixRegistry {
    providers: Vec<Box<dyn CodeFixProvider>>,
    by_error_code: FxHashMap<u32, Vec<usize>>,
    by_fix_id: FxHashMap<&'static str, usize>,
}

impl CodeFixRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry with every built-in provider.
    #[must_use]
    pub fn with_builtin_fixes() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(ConvertTypedefToType));
        registry
    }

    pub fn register(&mut self, provider: Box<dyn CodeFixProvider>) {
        let index = self.providers.len();
        for &code in provider.error_codes() {
            self.by_error_code.entry(code).or_default().push(index);
        }
        for &fix_id in provider.fix_ids() {
            debug_assert!(
                !self.by_fix_id.contains_key(fix_id),
                "fix id {fix_id} registered twice"
            );
            self.by_fix_id.insert(fix_id, index);
        }
        self.providers.push(provider);
    }

    pub fn providers_for_error_code(
        &self,
        error_code: u32,
    ) -> impl Iterator<Item = &dyn CodeFixProvider> + '_ {
        self.by_error_code
            .get(&error_code)
            .into_iter()
            .flatten()
            .map(|&index| self.providers[index].as_ref())
    }

    #[must_use]
    pub fn provider_for_fix_id(&self, fix_id: &str) -> Option<&dyn CodeFixProvider> {
        self.by_fix_id
            .get(fix_id)
            .map(|&index| self.providers[index].as_ref())
    }

    /// Registered error codes, ascending.
    #[must_use]
    pub fn supported_error_codes(&self) -> Vec<u32> {
        let mut codes: Vec<u32> = self.by_error_code.keys().copied().collect();
        codes.sort_unstable();
        codes
    }

    #[must_use]
    pub fn get_fixes_for_error_code(&self, context: &CodeFixContext<'_>) -> Vec<CodeFixAction> {
        let actions: Vec<CodeFixAction> = self
            .providers_for_error_code(context.error_code)
            .flat_map(|provider| provider.get_code_actions(context))
            .collect();
        debug!(
            code = context.error_code,
            start = context.span.start,
            count = actions.len(),
            "code fixes"
        );
        actions
    }

    #[must_use]
    pub fn get_combined_code_fix(
        &self,
        fix_id: &str,
        context: &CodeFixContext<'_>,
    ) -> Option<CombinedCodeActions> {
        let provider = self.provider_for_fix_id(fix_id)?;
        Some(provider.get_all_code_actions(context))
    }
}

static REGISTRY: Lazy<CodeFixRegistry> = Lazy::new(CodeFixRegistry::with_builtin_fixes);

/// Fixes from every registered provider that handles `context.error_code`.
#[must_use]
pub fn get_fixes_for_error_code(context: &CodeFixContext<'_>) -> Vec<CodeFixAction> {
    REGISTRY.get_fixes_for_error_code(context)
}

/// Fix-all for `fix_id`; `None` when no provider exposes it.
#[must_use]
pub fn get_combined_code_fix(
    fix_id: &str,
    context: &CodeFixContext<'_>,
) -> Option<CombinedCodeActions> {
    REGISTRY.get_combined_code_fix(fix_id, context)
}

#[must_use]
pub fn get_supported_error_codes() -> Vec<u32> {
    REGISTRY.supported_error_codes()
}
