//! Single-line display of interned types, for logs and test assertions.

use crate::intern::TypeInterner;
use crate::types::{FunctionShape, LiteralValue, PropertyInfo, TypeData, TypeId};

pub struct TypeFormatter<'a> {
    interner: &'a TypeInterner,
}

impl<'a> TypeFormatter<'a> {
    #[must_use]
    pub const fn new(interner: &'a TypeInterner) -> Self {
        Self { interner }
    }

    #[must_use]
    pub fn format(&self, type_id: TypeId) -> String {
        let Some(data) = self.interner.lookup(type_id) else {
            return "any".to_string();
        };
        match data {
            TypeData::Intrinsic(kind) => kind.name().to_string(),
            TypeData::Literal(literal) => self.format_literal(&literal),
            TypeData::Object(properties) => self.format_object(&properties),
            TypeData::Array(element) => {
                let text = self.format(element);
                if self.needs_parens_in_array(element) {
                    format!("({text})[]")
                } else {
                    format!("{text}[]")
                }
            }
            TypeData::Union(members) => self.join(&members, " | "),
            TypeData::Intersection(members) => self.join(&members, " & "),
            TypeData::Function(shape) => self.format_function(&shape),
            TypeData::KeyOf(operand) => format!("keyof {}", self.format(operand)),
        }
    }

    fn format_literal(&self, literal: &LiteralValue) -> String {
        match literal {
            LiteralValue::String(atom) => {
                let text = self.interner.resolve_atom(*atom);
                format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
            }
            LiteralValue::Number(atom) => self.interner.resolve_atom(*atom),
            LiteralValue::BigInt(atom) => format!("{}n", self.interner.resolve_atom(*atom)),
            LiteralValue::Boolean(value) => value.to_string(),
        }
    }

    fn format_object(&self, properties: &[PropertyInfo]) -> String {
        if properties.is_empty() {
            return "{}".to_string();
        }
        let mut out = String::from("{ ");
        for property in properties {
            if property.readonly {
                out.push_str("readonly ");
            }
            out.push_str(&self.interner.resolve_atom(property.name));
            if property.optional {
                out.push('?');
            }
            out.push_str(": ");
            out.push_str(&self.format(property.type_id));
            out.push_str("; ");
        }
        out.push('}');
        out
    }

    fn format_function(&self, shape: &FunctionShape) -> String {
        let params: Vec<String> = shape
            .params
            .iter()
            .enumerate()
            .map(|(i, param)| {
                let name = param
                    .name
                    .map_or_else(|| format!("arg{i}"), |atom| self.interner.resolve_atom(atom));
                let rest = if param.rest { "..." } else { "" };
                let optional = if param.optional { "?" } else { "" };
                format!("{rest}{name}{optional}: {}", self.format(param.type_id))
            })
            .collect();
        format!(
            "({}) => {}",
            params.join(", "),
            self.format(shape.return_type)
        )
    }

    fn join(&self, members: &[TypeId], separator: &str) -> String {
        members
            .iter()
            .map(|&member| self.format(member))
            .collect::<Vec<_>>()
            .join(separator)
    }

    fn needs_parens_in_array(&self, element: TypeId) -> bool {
        matches!(
            self.interner.lookup(element),
            Some(TypeData::Union(_) | TypeData::Intersection(_) | TypeData::Function(_) | TypeData::KeyOf(_))
        )
    }
}
