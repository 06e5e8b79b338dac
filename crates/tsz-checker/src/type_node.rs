//! Resolution of type nodes to interned types.
//!
//! `JSDoc` spellings resolve the way TypeScript reads them in JavaScript
//! files: `Number` is `number`, `*` is `any`, `Array.<T>` is `T[]`, and a
//! `@property` list is an object type.

use crate::context::CheckerContext;
use tsz_common::limits::MAX_TYPE_RESOLUTION_DEPTH;
use tsz_parser::parser::node_access::NodeAccess;
use tsz_parser::parser::syntax_kind_ext as ext;
use tsz_parser::syntax::PropertyTag;
use tsz_parser::syntax::type_lowering::jsdoc_primitive_keyword;
use tsz_parser::{NodeArena, NodeIndex};
use tsz_scanner::SyntaxKind;
use tsz_solver::{ParamInfo, PropertyInfo, TypeId};
use tracing::trace;

pub struct TypeNodeChecker<'a> {
    ctx: &'a CheckerContext,
    arena: &'a NodeArena,
}

impl<'a> TypeNodeChecker<'a> {
    #[must_use]
    pub const fn new(ctx: &'a CheckerContext, arena: &'a NodeArena) -> Self {
        Self { ctx, arena }
    }

    /// Resolve `idx`, consulting and filling the node-type cache.
    pub fn check(&self, idx: NodeIndex) -> TypeId {
        if idx.is_none() {
            return TypeId::UNKNOWN;
        }
        if let Some(&cached) = self.ctx.node_types.borrow().get(&idx.0) {
            return cached;
        }
        let depth = self.ctx.depth.get();
        if depth >= MAX_TYPE_RESOLUTION_DEPTH {
            trace!(node = idx.0, "type resolution depth exceeded");
            return TypeId::UNKNOWN;
        }
        self.ctx.depth.set(depth + 1);
        let result = self.compute(idx);
        self.ctx.depth.set(depth);
        self.ctx.node_types.borrow_mut().insert(idx.0, result);
        result
    }

    fn compute(&self, idx: NodeIndex) -> TypeId {
        let arena = self.arena;
        let types = &self.ctx.types;
        let Some(node) = arena.get(idx) else {
            return TypeId::UNKNOWN;
        };
        let inner = || {
            arena
                .get_wrapped_type(node)
                .map_or(TypeId::UNKNOWN, |data| self.check(data.type_node))
        };

        match node.kind {
            ext::JSDOC_TYPE_EXPRESSION | ext::PARENTHESIZED_TYPE | ext::JSDOC_NON_NULLABLE_TYPE => {
                inner()
            }
            ext::JSDOC_ALL_TYPE => TypeId::ANY,
            ext::JSDOC_UNKNOWN_TYPE => TypeId::UNKNOWN,
            ext::JSDOC_NULLABLE_TYPE => types.union(vec![inner(), TypeId::NULL]),
            ext::JSDOC_OPTIONAL_TYPE => types.union(vec![inner(), TypeId::UNDEFINED]),
            ext::JSDOC_VARIADIC_TYPE => types.array(inner()),
            ext::TYPE_REFERENCE => self.get_type_from_type_reference(idx),
            ext::ARRAY_TYPE => arena
                .get_array_type(node)
                .map_or(TypeId::UNKNOWN, |data| types.array(self.check(data.element_type))),
            ext::UNION_TYPE | ext::INTERSECTION_TYPE => {
                let Some(data) = arena.get_composite_type(node) else {
                    return TypeId::UNKNOWN;
                };
                let members: Vec<TypeId> = data.types.iter().map(|m| self.check(m)).collect();
                if node.kind == ext::UNION_TYPE {
                    types.union(members)
                } else {
                    types.intersection(members)
                }
            }
            ext::TYPE_OPERATOR => {
                let Some(data) = arena.get_type_operator(node) else {
                    return TypeId::UNKNOWN;
                };
                let operand = self.check(data.type_node);
                if data.operator == SyntaxKind::KeyOfKeyword as u16 {
                    types.keyof(operand)
                } else {
                    operand
                }
            }
            ext::FUNCTION_TYPE => {
                let Some(data) = arena.get_function_type(node) else {
                    return TypeId::UNKNOWN;
                };
                let params = data.parameters.iter().map(|p| self.param_info(p)).collect();
                let return_type = if data.type_annotation.is_none() {
                    TypeId::ANY
                } else {
                    self.check(data.type_annotation)
                };
                types.function(params, return_type)
            }
            ext::TYPE_LITERAL => self.get_type_from_type_literal(idx),
            ext::JSDOC_TYPE_LITERAL => self.get_type_from_jsdoc_type_literal(idx),
            ext::LITERAL_TYPE => arena
                .get_literal_type(node)
                .map_or(TypeId::UNKNOWN, |data| self.literal_type(data.literal)),
            kind => keyword_type(kind).unwrap_or(TypeId::UNKNOWN),
        }
    }

    /// Wrapper names map to primitives, `Array` to arrays, and other names
    /// through same-file aliases.
    fn get_type_from_type_reference(&self, idx: NodeIndex) -> TypeId {
        let arena = self.arena;
        let types = &self.ctx.types;
        let Some(data) = arena.get(idx).and_then(|node| arena.get_type_ref(node)) else {
            return TypeId::UNKNOWN;
        };
        let Some(name) = arena.get_entity_name_text(data.type_name) else {
            return TypeId::UNKNOWN;
        };
        let arguments: Vec<NodeIndex> = data
            .type_arguments
            .as_ref()
            .map(|list| list.iter().collect())
            .unwrap_or_default();

        if name == "Array" {
            return match arguments.as_slice() {
                [] => types.array(TypeId::ANY),
                [element] => types.array(self.check(*element)),
                _ => TypeId::UNKNOWN,
            };
        }
        if arguments.is_empty() {
            if let Some(keyword) = jsdoc_primitive_keyword(&name) {
                return keyword_type(keyword as u16).unwrap_or(TypeId::UNKNOWN);
            }
        }

        let Some(&target) = self.ctx.aliases.get(&name) else {
            trace!(name = %name, "unresolved type reference");
            return TypeId::UNKNOWN;
        };
        if !self.ctx.resolving.borrow_mut().insert(target.0) {
            trace!(name = %name, "circular type alias");
            return TypeId::UNKNOWN;
        }
        let result = self.check(target);
        self.ctx.resolving.borrow_mut().remove(&target.0);
        result
    }

    fn get_type_from_type_literal(&self, idx: NodeIndex) -> TypeId {
        let arena = self.arena;
        let types = &self.ctx.types;
        let Some(data) = arena.get(idx).and_then(|node| arena.get_type_literal(node)) else {
            return TypeId::UNKNOWN;
        };

        let mut properties = Vec::new();
        for member in data.members.iter() {
            let Some(node) = arena.get(member) else {
                continue;
            };
            let Some(signature) = arena.get_signature(node) else {
                continue;
            };
            let Some(name) = member_name(arena, signature.name) else {
                continue;
            };
            let type_id = match node.kind {
                ext::PROPERTY_SIGNATURE if signature.type_annotation.is_none() => TypeId::ANY,
                ext::PROPERTY_SIGNATURE => self.check(signature.type_annotation),
                ext::METHOD_SIGNATURE => {
                    let params = signature
                        .parameters
                        .as_ref()
                        .map(|list| list.iter().map(|p| self.param_info(p)).collect())
                        .unwrap_or_default();
                    let return_type = if signature.type_annotation.is_none() {
                        TypeId::ANY
                    } else {
                        self.check(signature.type_annotation)
                    };
                    types.function(params, return_type)
                }
                _ => continue,
            };
            let readonly = signature.modifiers.as_ref().is_some_and(|list| {
                list.iter()
                    .any(|m| arena.kind(m) == Some(SyntaxKind::ReadonlyKeyword as u16))
            });
            properties.push(PropertyInfo {
                name: types.intern_string(&name),
                type_id,
                optional: signature.question_token,
                readonly,
            });
        }
        types.object(properties)
    }

    /// Object type from `@property` tags. Dotted names describe members of
    /// nested objects and do not add top-level properties.
    fn get_type_from_jsdoc_type_literal(&self, idx: NodeIndex) -> TypeId {
        let arena = self.arena;
        let types = &self.ctx.types;
        let Some(data) = arena
            .get(idx)
            .and_then(|node| arena.get_jsdoc_type_literal(node))
        else {
            return TypeId::UNKNOWN;
        };

        let mut properties = Vec::new();
        for tag in data
            .property_tags
            .iter()
            .filter_map(|tag| PropertyTag::from_node(arena, tag))
        {
            let Some(name) = tag.name_text(arena) else {
                continue;
            };
            if name.contains('.') {
                continue;
            }
            let (type_id, optional_type) = match tag.type_expression {
                Some(expr) => self.property_tag_type(expr),
                None => (TypeId::ANY, false),
            };
            properties.push(PropertyInfo {
                name: types.intern_string(&name),
                type_id,
                optional: tag.is_bracketed || optional_type,
                readonly: false,
            });
        }

        let object = types.object(properties);
        if data.is_array_type {
            types.array(object)
        } else {
            object
        }
    }

    /// Type of a `@property` tag; `{T=}` marks the property optional and
    /// resolves to `T`.
    fn property_tag_type(&self, expr: NodeIndex) -> (TypeId, bool) {
        let arena = self.arena;
        let inner = arena
            .get(expr)
            .and_then(|node| arena.get_wrapped_type(node))
            .map(|data| data.type_node);
        if let Some(node) = inner.and_then(|i| arena.get(i)) {
            if node.kind == ext::JSDOC_OPTIONAL_TYPE {
                let target = arena
                    .get_wrapped_type(node)
                    .map_or(TypeId::ANY, |data| self.check(data.type_node));
                return (target, true);
            }
        }
        (self.check(expr), false)
    }

    fn param_info(&self, param: NodeIndex) -> ParamInfo {
        let arena = self.arena;
        let types = &self.ctx.types;
        let Some(data) = arena.get(param).and_then(|node| arena.get_parameter(node)) else {
            return ParamInfo {
                name: None,
                type_id: TypeId::ANY,
                optional: false,
                rest: false,
            };
        };
        ParamInfo {
            name: arena
                .get_identifier_text(data.name)
                .map(|text| types.intern_string(text)),
            type_id: if data.type_annotation.is_none() {
                TypeId::ANY
            } else {
                self.check(data.type_annotation)
            },
            optional: data.question_token,
            rest: data.dot_dot_dot_token,
        }
    }

    fn literal_type(&self, literal: NodeIndex) -> TypeId {
        let arena = self.arena;
        let types = &self.ctx.types;
        let Some(node) = arena.get(literal) else {
            return TypeId::UNKNOWN;
        };
        match node.kind {
            k if k == SyntaxKind::StringLiteral as u16
                || k == SyntaxKind::NoSubstitutionTemplateLiteral as u16 =>
            {
                arena
                    .get_literal(node)
                    .map_or(TypeId::UNKNOWN, |data| types.literal_string(&data.text))
            }
            k if k == SyntaxKind::NumericLiteral as u16 => arena
                .get_literal(node)
                .map_or(TypeId::UNKNOWN, |data| types.literal_number(&data.text)),
            k if k == SyntaxKind::BigIntLiteral as u16 => arena
                .get_literal(node)
                .map_or(TypeId::UNKNOWN, |data| {
                    types.literal_bigint(data.text.trim_end_matches('n'))
                }),
            k if k == SyntaxKind::TrueKeyword as u16 => types.literal_boolean(true),
            k if k == SyntaxKind::FalseKeyword as u16 => types.literal_boolean(false),
            k if k == SyntaxKind::NullKeyword as u16 => TypeId::NULL,
            ext::PREFIX_UNARY_EXPRESSION => {
                let operand = arena.get_unary_expr(node).map(|data| data.operand);
                match operand.and_then(|o| arena.get(o)).and_then(|o| arena.get_literal(o)) {
                    Some(data) => types.literal_number(&format!("-{}", data.text)),
                    None => TypeId::UNKNOWN,
                }
            }
            _ => TypeId::UNKNOWN,
        }
    }
}

fn keyword_type(kind: u16) -> Option<TypeId> {
    const KEYWORDS: [(SyntaxKind, TypeId); 12] = [
        (SyntaxKind::AnyKeyword, TypeId::ANY),
        (SyntaxKind::UnknownKeyword, TypeId::UNKNOWN),
        (SyntaxKind::NeverKeyword, TypeId::NEVER),
        (SyntaxKind::VoidKeyword, TypeId::VOID),
        (SyntaxKind::UndefinedKeyword, TypeId::UNDEFINED),
        (SyntaxKind::NullKeyword, TypeId::NULL),
        (SyntaxKind::BooleanKeyword, TypeId::BOOLEAN),
        (SyntaxKind::NumberKeyword, TypeId::NUMBER),
        (SyntaxKind::StringKeyword, TypeId::STRING),
        (SyntaxKind::BigIntKeyword, TypeId::BIGINT),
        (SyntaxKind::SymbolKeyword, TypeId::SYMBOL),
        (SyntaxKind::ObjectKeyword, TypeId::OBJECT),
    ];
    KEYWORDS
        .iter()
        .find(|(keyword, _)| *keyword as u16 == kind)
        .map(|&(_, type_id)| type_id)
}

fn member_name(arena: &NodeArena, name: NodeIndex) -> Option<String> {
    if let Some(text) = arena.get_identifier_text(name) {
        return Some(text.to_string());
    }
    arena.get_literal_text(name).map(ToString::to_string)
}
