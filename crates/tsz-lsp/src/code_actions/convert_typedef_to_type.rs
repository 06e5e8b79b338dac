//! Convert a `JSDoc` `@typedef` comment into a TypeScript type alias.
//!
//! ```text
//! /**
//!  * @typedef {Object} Foo
//!  * @property {Number} bar
//!  */
//! ```
//!
//! becomes
//!
//! ```text
//! type Foo = {
//!   bar: number
//! };
//! ```
//!
//! The whole comment block owning the tag is replaced. Fix-all is
//! registered but produces no changes.

use crate::code_actions::change_tracker::ChangeTracker;
use crate::code_actions::code_action_fixes::{CodeFixAction, CombinedCodeActions};
use crate::code_actions::registry::{CodeFixContext, CodeFixProvider};
use tsz_checker::TypeResolver;
use tsz_common::diagnostics::{diagnostic_codes, diagnostic_messages};
use tsz_parser::parser::factory::{TypeAliasDeclaration, TypeNode};
use tsz_parser::syntax::jsdoc_tags::find_attached_typedef_tag;
use tsz_parser::syntax::{
    TypeContainer, TypedefTag, find_enclosing_type_container, get_token_at_position,
    lower_type_node, type_node_from_source,
};
use tsz_parser::NodeArena;
use tsz_solver::TypeId;
use tracing::debug;

pub const FIX_ID: &str = "convertTypedefToType";

const FIX_IDS: &[&str] = &[FIX_ID];

const ERROR_CODES: &[u32] = &[
    diagnostic_codes::CONVERT_TYPEDEF_TO_TYPE,
    diagnostic_codes::JSDOC_TYPEDEF_MAY_BE_CONVERTED_TO_TYPESCRIPT_TYPE,
];

pub struct ConvertTypedefToType;

impl CodeFixProvider for ConvertTypedefToType {
    fn fix_ids(&self) -> &'static [&'static str] {
        FIX_IDS
    }

    fn error_codes(&self) -> &'static [u32] {
        ERROR_CODES
    }

    fn get_code_actions(&self, context: &CodeFixContext<'_>) -> Vec<CodeFixAction> {
        let start = context.span.start;
        let type_node = get_info(context, start).map(|(type_node, _)| type_node);

        let options = context.format_settings.printer_options();
        let changes = ChangeTracker::with(context.file_name, options, |tracker| {
            let token = get_token_at_position(context.arena, context.root, start);
            match find_attached_typedef_tag(context.arena, token) {
                Some(tag) => fix_single_typedef(tracker, context.arena, &tag, type_node),
                None => debug!(start, token = token.0, "no attached typedef tag at position"),
            }
        });

        if changes.is_empty() {
            return Vec::new();
        }
        vec![CodeFixAction::new(
            FIX_ID,
            changes,
            diagnostic_messages::CONVERT_TYPEDEF_TO_TYPE,
            FIX_ID,
            diagnostic_messages::CONVERT_ALL_TYPEDEFS_TO_TYPES,
        )]
    }

    fn get_all_code_actions(&self, _context: &CodeFixContext<'_>) -> CombinedCodeActions {
        CombinedCodeActions::default()
    }
}

/// The annotation of the nearest type container around `position`.
fn get_info(context: &CodeFixContext<'_>, position: u32) -> Option<(TypeNode, TypeId)> {
    let Some(container) = find_enclosing_type_container(context.arena, context.root, position)
    else {
        debug!(position, "no type container at position");
        return None;
    };
    resolve_annotation(context.arena, context.source_text, container, context.checker)
}

/// Lower the container's type slot and resolve its type. A slot the
/// lowering cannot model keeps its source text. `None` when the slot is
/// empty.
pub fn resolve_annotation(
    arena: &NodeArena,
    source_text: &str,
    container: TypeContainer,
    checker: &dyn TypeResolver,
) -> Option<(TypeNode, TypeId)> {
    let Some(slot) = container.type_node(arena) else {
        debug!(?container, "type container has no annotation");
        return None;
    };
    let type_id = checker.get_type_from_type_node(arena, slot);
    debug!(?container, slot = slot.0, ?type_id, "resolved annotation");
    let Some(type_node) = lower_type_node(arena, slot).or_else(|| {
        debug!(slot = slot.0, "annotation cannot be lowered, keeping its text");
        type_node_from_source(arena, slot, source_text)
    }) else {
        debug!(slot = slot.0, "annotation has no text");
        return None;
    };
    Some((type_node, type_id))
}

/// Build the type alias for `tag`. The aliased type is moved in.
#[must_use]
pub fn synthesize(
    arena: &NodeArena,
    tag: &TypedefTag,
    type_node: Option<TypeNode>,
) -> Option<TypeAliasDeclaration> {
    if tag.name.is_none() {
        debug!(tag = tag.node.0, "typedef has no name");
        return None;
    }
    let Some(name) = tag.full_name_text(arena) else {
        debug!(tag = tag.node.0, "typedef has no full name");
        return None;
    };
    let Some(type_node) = type_node else {
        debug!(tag = tag.node.0, "typedef has no type expression");
        return None;
    };

    // The alias is emitted without type parameters.
    let _type_parameters = derive_type_parameters(arena, tag);

    Some(TypeAliasDeclaration::new(name.trim(), Vec::new(), type_node))
}

/// One type-parameter name per `@property` tag of a typedef whose type is a
/// `JSDoc` type literal, in declared order.
#[must_use]
pub fn derive_type_parameters(arena: &NodeArena, tag: &TypedefTag) -> Vec<String> {
    if !tag.has_type_literal(arena) {
        return Vec::new();
    }
    tag.property_tags
        .iter()
        .filter_map(|property| property.name_text(arena))
        .collect()
}

fn fix_single_typedef(
    tracker: &mut ChangeTracker,
    arena: &NodeArena,
    tag: &TypedefTag,
    type_node: Option<TypeNode>,
) {
    let Some(declaration) = synthesize(arena, tag, type_node) else {
        return;
    };
    let comment = arena.parent_of(tag.node);
    tracker.replace_node_with_type_alias(arena, comment, &declaration);
}

#[cfg(test)]
#[path = "../tests/convert_typedef_to_type_unit_tests.rs"]
mod tests;
