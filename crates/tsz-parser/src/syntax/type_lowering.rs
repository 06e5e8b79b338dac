//! Lowering of arena type nodes into owned `TypeNode`s.
//!
//! `JSDoc` spellings become their TypeScript equivalents on the way:
//! `Number` becomes `number`, `*` becomes `any`, `Array.<T>` becomes `T[]`, `?T` becomes
//! `T | null`, and a `@property` list becomes an object type. Kinds with no
//! owned form (mapped types, missing nodes) lower to `None`; for those,
//! `type_node_from_source` keeps the written text instead.

use crate::parser::factory::{ParameterNode, PropertySignature, TypeNode};
use crate::parser::node_access::NodeAccess;
use crate::parser::syntax_kind_ext as ext;
use crate::parser::{NodeArena, NodeIndex};
use crate::syntax::jsdoc_tags::PropertyTag;
use tsz_common::limits::MAX_TYPE_RESOLUTION_DEPTH;
use tsz_scanner::SyntaxKind;

/// Lower the type at `index`. `JSDOC_TYPE_EXPRESSION` wrappers are looked
/// through.
#[must_use]
pub fn lower_type_node(arena: &NodeArena, index: NodeIndex) -> Option<TypeNode> {
    Lowering { arena, depth: 0 }.lower(index)
}

/// The source text of the type at `index` as a `TypeNode::Raw`. A
/// `JSDOC_TYPE_EXPRESSION` contributes the text between its braces, with
/// continuation-line `*` leaders folded away. `None` when the text is blank.
#[must_use]
pub fn type_node_from_source(
    arena: &NodeArena,
    index: NodeIndex,
    source: &str,
) -> Option<TypeNode> {
    let node = arena.get(index)?;
    let (mut start, mut end) = (node.pos as usize, node.end as usize);
    if node.kind == ext::JSDOC_TYPE_EXPRESSION {
        start += 1;
        if source.get(end.checked_sub(1)?..end) == Some("}") {
            end -= 1;
        }
    }
    let text = source.get(start..end.max(start))?;
    let mut lines = text.lines().map(str::trim);
    let mut folded = lines.next().unwrap_or_default().to_string();
    for line in lines {
        let line = line.strip_prefix('*').unwrap_or(line).trim();
        if line.is_empty() {
            continue;
        }
        if !folded.is_empty() {
            folded.push(' ');
        }
        folded.push_str(line);
    }
    let folded = folded.trim();
    if folded.is_empty() {
        return None;
    }
    Some(TypeNode::Raw(folded.to_string()))
}

/// Primitive keyword for a `JSDoc` wrapper-object name.
#[must_use]
pub fn jsdoc_primitive_keyword(name: &str) -> Option<SyntaxKind> {
    let kind = match name {
        "String" => SyntaxKind::StringKeyword,
        "Number" => SyntaxKind::NumberKeyword,
        "Boolean" => SyntaxKind::BooleanKeyword,
        "Object" => SyntaxKind::ObjectKeyword,
        "Symbol" => SyntaxKind::SymbolKeyword,
        "BigInt" => SyntaxKind::BigIntKeyword,
        _ => return None,
    };
    Some(kind)
}

struct Lowering<'a> {
    arena: &'a NodeArena,
    depth: u32,
}

impl Lowering<'_> {
    fn lower(&mut self, index: NodeIndex) -> Option<TypeNode> {
        if self.depth >= MAX_TYPE_RESOLUTION_DEPTH {
            return None;
        }
        self.depth += 1;
        let result = self.lower_inner(index);
        self.depth -= 1;
        result
    }

    fn lower_inner(&mut self, index: NodeIndex) -> Option<TypeNode> {
        let arena = self.arena;
        let node = arena.get(index)?;
        match node.kind {
            ext::JSDOC_TYPE_EXPRESSION | ext::JSDOC_NON_NULLABLE_TYPE => {
                self.lower(arena.get_wrapped_type(node)?.type_node)
            }
            ext::PARENTHESIZED_TYPE => {
                let inner = self.lower(arena.get_wrapped_type(node)?.type_node)?;
                Some(TypeNode::Parenthesized(Box::new(inner)))
            }
            ext::JSDOC_ALL_TYPE => Some(TypeNode::keyword(SyntaxKind::AnyKeyword)),
            ext::JSDOC_UNKNOWN_TYPE => Some(TypeNode::keyword(SyntaxKind::UnknownKeyword)),
            ext::JSDOC_NULLABLE_TYPE => {
                let inner = self.lower(arena.get_wrapped_type(node)?.type_node)?;
                Some(union_with(inner, SyntaxKind::NullKeyword))
            }
            ext::JSDOC_OPTIONAL_TYPE => {
                let inner = self.lower(arena.get_wrapped_type(node)?.type_node)?;
                Some(union_with(inner, SyntaxKind::UndefinedKeyword))
            }
            ext::JSDOC_VARIADIC_TYPE => {
                let inner = self.lower(arena.get_wrapped_type(node)?.type_node)?;
                Some(TypeNode::array(inner))
            }
            ext::TYPE_REFERENCE => self.lower_type_reference(index),
            ext::ARRAY_TYPE => {
                let element = self.lower(arena.get_array_type(node)?.element_type)?;
                Some(TypeNode::array(element))
            }
            ext::UNION_TYPE | ext::INTERSECTION_TYPE => {
                let types = arena
                    .get_composite_type(node)?
                    .types
                    .iter()
                    .map(|member| self.lower(member))
                    .collect::<Option<Vec<_>>>()?;
                Some(if node.kind == ext::UNION_TYPE {
                    TypeNode::Union(types)
                } else {
                    TypeNode::Intersection(types)
                })
            }
            ext::TYPE_OPERATOR => {
                let data = arena.get_type_operator(node)?;
                let operator = operator_kind(data.operator)?;
                let type_node = self.lower(data.type_node)?;
                Some(TypeNode::Operator {
                    operator,
                    type_node: Box::new(type_node),
                })
            }
            ext::FUNCTION_TYPE => {
                let data = arena.get_function_type(node)?;
                let parameters = data
                    .parameters
                    .iter()
                    .map(|parameter| self.lower_parameter(parameter))
                    .collect::<Option<Vec<_>>>()?;
                let return_type = self
                    .lower(data.type_annotation)
                    .unwrap_or(TypeNode::keyword(SyntaxKind::AnyKeyword));
                Some(TypeNode::Function {
                    parameters,
                    return_type: Box::new(return_type),
                })
            }
            ext::TYPE_LITERAL => {
                let members = arena
                    .get_type_literal(node)?
                    .members
                    .iter()
                    .filter_map(|member| self.lower_type_member(member))
                    .collect();
                Some(TypeNode::Object(members))
            }
            ext::JSDOC_TYPE_LITERAL => {
                let data = arena.get_jsdoc_type_literal(node)?;
                let tags: Vec<PropertyTag> = data
                    .property_tags
                    .iter()
                    .filter_map(|tag| PropertyTag::from_node(arena, tag))
                    .collect();
                let object = TypeNode::Object(self.lower_property_tags(&tags));
                Some(if data.is_array_type {
                    TypeNode::array(object)
                } else {
                    object
                })
            }
            ext::LITERAL_TYPE => self.lower_literal(arena.get_literal_type(node)?.literal),
            kind if is_keyword_type(kind) => Some(TypeNode::Keyword(keyword_from_u16(kind)?)),
            _ => None,
        }
    }

    fn lower_type_reference(&mut self, index: NodeIndex) -> Option<TypeNode> {
        let arena = self.arena;
        let data = arena.get_type_ref(arena.get(index)?)?;
        let name = arena.get_entity_name_text(data.type_name)?;
        let type_arguments = match &data.type_arguments {
            Some(list) => list
                .iter()
                .map(|argument| self.lower(argument))
                .collect::<Option<Vec<_>>>()?,
            None => Vec::new(),
        };

        // Native `Array<T>` is kept as written.
        if name == "Array" && (data.is_jsdoc_dot_syntax || data.type_arguments.is_none()) {
            let mut type_arguments = type_arguments;
            return match type_arguments.len() {
                0 => Some(TypeNode::array(TypeNode::keyword(SyntaxKind::AnyKeyword))),
                1 => type_arguments.pop().map(TypeNode::array),
                _ => Some(TypeNode::Reference {
                    name,
                    type_arguments,
                }),
            };
        }
        if type_arguments.is_empty() {
            if let Some(keyword) = jsdoc_primitive_keyword(&name) {
                return Some(TypeNode::keyword(keyword));
            }
        }
        Some(TypeNode::Reference {
            name,
            type_arguments,
        })
    }

    fn lower_parameter(&mut self, index: NodeIndex) -> Option<ParameterNode> {
        let arena = self.arena;
        let data = arena.get_parameter(arena.get(index)?)?;
        let name = arena
            .get_entity_name_text(data.name)
            .unwrap_or_else(|| "arg".to_string());
        let type_node = match data.type_annotation.into_option() {
            Some(annotation) => Some(self.lower(annotation)?),
            None => None,
        };
        Some(ParameterNode {
            name,
            optional: data.question_token,
            rest: data.dot_dot_dot_token,
            type_node,
        })
    }

    /// Property signatures keep their type; method signatures become
    /// function-typed properties. Other members have no owned form.
    fn lower_type_member(&mut self, index: NodeIndex) -> Option<PropertySignature> {
        let arena = self.arena;
        let node = arena.get(index)?;
        let data = arena.get_signature(node)?;
        let name = property_name_text(arena, data.name)?;
        let type_node = match node.kind {
            ext::PROPERTY_SIGNATURE => self
                .lower(data.type_annotation)
                .unwrap_or(TypeNode::keyword(SyntaxKind::AnyKeyword)),
            ext::METHOD_SIGNATURE => {
                let parameters = data
                    .parameters
                    .as_ref()
                    .map(|list| {
                        list.iter()
                            .map(|parameter| self.lower_parameter(parameter))
                            .collect::<Option<Vec<_>>>()
                    })
                    .unwrap_or_else(|| Some(Vec::new()))?;
                let return_type = self
                    .lower(data.type_annotation)
                    .unwrap_or(TypeNode::keyword(SyntaxKind::AnyKeyword));
                TypeNode::Function {
                    parameters,
                    return_type: Box::new(return_type),
                }
            }
            _ => return None,
        };
        Some(PropertySignature {
            name,
            optional: data.question_token,
            type_node,
        })
    }

    /// Build object members from `@property` tags. `a.b` nests under an
    /// earlier `a` declared as an object; other dotted names are dropped.
    fn lower_property_tags(&mut self, tags: &[PropertyTag]) -> Vec<PropertySignature> {
        let mut members: Vec<PropertySignature> = Vec::new();
        for tag in tags {
            let Some(path) = tag.name_text(self.arena) else {
                continue;
            };
            let (type_node, optional) = self.lower_property_tag_type(tag);
            let segments: Vec<&str> = path.split('.').collect();
            insert_member(
                &mut members,
                &segments,
                PropertySignature {
                    name: segments.last().map_or_else(String::new, |s| (*s).to_string()),
                    optional,
                    type_node,
                },
            );
        }
        members
    }

    /// Type and optionality of one `@property` tag. `[name]` and `{T=}` are
    /// optional; a missing type is `any`.
    fn lower_property_tag_type(&mut self, tag: &PropertyTag) -> (TypeNode, bool) {
        let arena = self.arena;
        let mut optional = tag.is_bracketed;
        let mut inner = tag
            .type_expression
            .and_then(|expr| arena.get(expr))
            .and_then(|expr| arena.get_wrapped_type(expr))
            .map(|wrapped| wrapped.type_node);
        if let Some(node) = inner.and_then(|i| arena.get(i)) {
            if node.kind == ext::JSDOC_OPTIONAL_TYPE {
                optional = true;
                inner = arena.get_wrapped_type(node).map(|wrapped| wrapped.type_node);
            }
        }
        let type_node = inner
            .and_then(|i| self.lower(i))
            .unwrap_or(TypeNode::keyword(SyntaxKind::AnyKeyword));
        (type_node, optional)
    }

    fn lower_literal(&mut self, literal: NodeIndex) -> Option<TypeNode> {
        let arena = self.arena;
        let node = arena.get(literal)?;
        let text = match node.kind {
            k if k == SyntaxKind::StringLiteral as u16
                || k == SyntaxKind::NoSubstitutionTemplateLiteral as u16 =>
            {
                quote_string(arena.get_literal(node)?.text.as_str())
            }
            k if k == SyntaxKind::NumericLiteral as u16 || k == SyntaxKind::BigIntLiteral as u16 => {
                arena.get_literal(node)?.text.clone()
            }
            k if k == SyntaxKind::TrueKeyword as u16 => "true".to_string(),
            k if k == SyntaxKind::FalseKeyword as u16 => "false".to_string(),
            k if k == SyntaxKind::NullKeyword as u16 => "null".to_string(),
            ext::PREFIX_UNARY_EXPRESSION => {
                let operand = arena.get_unary_expr(node)?.operand;
                match self.lower_literal(operand)? {
                    TypeNode::Literal(text) => format!("-{text}"),
                    _ => return None,
                }
            }
            _ => return None,
        };
        Some(TypeNode::Literal(text))
    }
}

/// Insert `member` at the path `segments`, creating nothing: every parent
/// segment must name an existing object-typed member.
fn insert_member(members: &mut Vec<PropertySignature>, segments: &[&str], member: PropertySignature) {
    match segments {
        [] => {}
        [_] => members.push(member),
        [head, rest @ ..] => {
            let Some(parent) = members.iter_mut().find(|m| m.name == *head) else {
                return;
            };
            if parent.type_node == TypeNode::keyword(SyntaxKind::ObjectKeyword) {
                parent.type_node = TypeNode::Object(Vec::new());
            }
            if let TypeNode::Object(children) = &mut parent.type_node {
                insert_member(children, rest, member);
            }
        }
    }
}

fn union_with(inner: TypeNode, keyword: SyntaxKind) -> TypeNode {
    let mut types = match inner {
        TypeNode::Union(types) => types,
        other => vec![other],
    };
    types.push(TypeNode::keyword(keyword));
    TypeNode::Union(types)
}

fn quote_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

fn property_name_text(arena: &NodeArena, name: NodeIndex) -> Option<String> {
    if let Some(text) = arena.get_identifier_text(name) {
        return Some(text.to_string());
    }
    let node = arena.get(name)?;
    let text = &arena.get_literal(node)?.text;
    if node.kind == SyntaxKind::StringLiteral as u16 {
        Some(quote_string(text))
    } else {
        Some(text.clone())
    }
}

const KEYWORD_TYPES: [SyntaxKind; 13] = [
    SyntaxKind::AnyKeyword,
    SyntaxKind::UnknownKeyword,
    SyntaxKind::StringKeyword,
    SyntaxKind::NumberKeyword,
    SyntaxKind::BooleanKeyword,
    SyntaxKind::BigIntKeyword,
    SyntaxKind::SymbolKeyword,
    SyntaxKind::ObjectKeyword,
    SyntaxKind::NeverKeyword,
    SyntaxKind::UndefinedKeyword,
    SyntaxKind::VoidKeyword,
    SyntaxKind::NullKeyword,
    SyntaxKind::ThisKeyword,
];

fn is_keyword_type(kind: u16) -> bool {
    KEYWORD_TYPES.iter().any(|&k| k as u16 == kind)
}

fn keyword_from_u16(kind: u16) -> Option<SyntaxKind> {
    KEYWORD_TYPES.iter().copied().find(|&k| k as u16 == kind)
}

fn operator_kind(operator: u16) -> Option<SyntaxKind> {
    [
        SyntaxKind::KeyOfKeyword,
        SyntaxKind::ReadonlyKeyword,
        SyntaxKind::UniqueKeyword,
    ]
    .into_iter()
    .find(|&k| k as u16 == operator)
}
