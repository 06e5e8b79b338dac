//! Type Printer - synthesized declarations to TypeScript source text.
//!
//! Object types print one member per line, members separated by `;`, with
//! no separator after the last member:
//!
//! ```text
//! type Foo = {
//!   bar: number
//! };
//! ```

use tsz_common::NewLineKind;
use tsz_parser::parser::factory::{ParameterNode, PropertySignature, TypeAliasDeclaration, TypeNode};
use tsz_scanner::{SyntaxKind, token_to_text};

/// Layout settings for printed code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PrinterOptions {
    /// Spaces per indentation level
    pub indent_size: u32,
    /// Indent with one tab per level instead of spaces
    pub use_tabs: bool,
    pub new_line: NewLineKind,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        Self {
            indent_size: 2,
            use_tabs: false,
            new_line: NewLineKind::LineFeed,
        }
    }
}

/// Prints synthesized nodes. Each call to a `print_*` entry point starts
/// from an empty buffer at indentation level zero.
pub struct TypePrinter {
    options: PrinterOptions,
    indent_str: String,
    output: String,
    indent_level: u32,
}

impl TypePrinter {
    #[must_use]
    pub fn new(options: PrinterOptions) -> Self {
        Self {
            options,
            indent_str: if options.use_tabs {
                "\t".to_string()
            } else {
                " ".repeat(options.indent_size as usize)
            },
            output: String::new(),
            indent_level: 0,
        }
    }

    #[must_use]
    pub const fn options(&self) -> PrinterOptions {
        self.options
    }

    /// `type Name<T, U> = <type>;`
    pub fn print_type_alias(&mut self, declaration: &TypeAliasDeclaration) -> String {
        self.reset();
        self.write("type ");
        self.write(&declaration.name);
        if !declaration.type_parameters.is_empty() {
            self.write("<");
            self.write(&declaration.type_parameters.join(", "));
            self.write(">");
        }
        self.write(" = ");
        self.emit_type(&declaration.type_node);
        self.write(";");
        std::mem::take(&mut self.output)
    }

    pub fn print_type(&mut self, type_node: &TypeNode) -> String {
        self.reset();
        self.emit_type(type_node);
        std::mem::take(&mut self.output)
    }

    fn reset(&mut self) {
        self.output.clear();
        self.indent_level = 0;
    }

    // =========================================================================
    // Types
    // =========================================================================

    fn emit_type(&mut self, type_node: &TypeNode) {
        match type_node {
            TypeNode::Keyword(kind) => self.emit_keyword(*kind),
            TypeNode::Reference {
                name,
                type_arguments,
            } => {
                self.write(name);
                if !type_arguments.is_empty() {
                    self.write("<");
                    self.emit_separated(type_arguments, ", ", Self::emit_type);
                    self.write(">");
                }
            }
            TypeNode::Literal(text) | TypeNode::Raw(text) => self.write(text),
            TypeNode::Array(element) => {
                self.emit_wrapped_if(element, needs_parens_as_array_element(element));
                self.write("[]");
            }
            TypeNode::Union(types) => {
                self.emit_separated(types, " | ", |printer, member| {
                    printer.emit_wrapped_if(member, matches!(member, TypeNode::Function { .. }));
                });
            }
            TypeNode::Intersection(types) => {
                self.emit_separated(types, " & ", |printer, member| {
                    printer.emit_wrapped_if(
                        member,
                        matches!(member, TypeNode::Function { .. } | TypeNode::Union(_)),
                    );
                });
            }
            TypeNode::Function {
                parameters,
                return_type,
            } => {
                self.write("(");
                self.emit_separated(parameters, ", ", Self::emit_parameter);
                self.write(") => ");
                self.emit_type(return_type);
            }
            TypeNode::Object(members) => self.emit_object(members),
            TypeNode::Parenthesized(inner) => self.emit_wrapped_if(inner, true),
            TypeNode::Operator {
                operator,
                type_node,
            } => {
                self.emit_keyword(*operator);
                self.write(" ");
                self.emit_wrapped_if(
                    type_node,
                    matches!(
                        **type_node,
                        TypeNode::Union(_) | TypeNode::Intersection(_) | TypeNode::Function { .. }
                    ),
                );
            }
        }
    }

    fn emit_object(&mut self, members: &[PropertySignature]) {
        if members.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{");
        self.increase_indent();
        for (i, member) in members.iter().enumerate() {
            if i > 0 {
                self.write(";");
            }
            self.write_line();
            self.write_indent();
            self.write(&member.name);
            if member.optional {
                self.write("?");
            }
            self.write(": ");
            self.emit_type(&member.type_node);
        }
        self.decrease_indent();
        self.write_line();
        self.write_indent();
        self.write("}");
    }

    fn emit_parameter(&mut self, parameter: &ParameterNode) {
        if parameter.rest {
            self.write("...");
        }
        self.write(&parameter.name);
        if parameter.optional {
            self.write("?");
        }
        if let Some(type_node) = &parameter.type_node {
            self.write(": ");
            self.emit_type(type_node);
        }
    }

    fn emit_keyword(&mut self, kind: SyntaxKind) {
        self.write(token_to_text(kind).unwrap_or("any"));
    }

    fn emit_wrapped_if(&mut self, type_node: &TypeNode, parens: bool) {
        if parens {
            self.write("(");
            self.emit_type(type_node);
            self.write(")");
        } else {
            self.emit_type(type_node);
        }
    }

    fn emit_separated<T>(&mut self, items: &[T], separator: &str, mut emit: impl FnMut(&mut Self, &T)) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.write(separator);
            }
            emit(self, item);
        }
    }

    // =========================================================================
    // Writer
    // =========================================================================

    fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn write_line(&mut self) {
        self.output.push_str(self.options.new_line.as_str());
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(&self.indent_str);
        }
    }

    const fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    const fn decrease_indent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }
}

fn needs_parens_as_array_element(element: &TypeNode) -> bool {
    matches!(
        element,
        TypeNode::Union(_)
            | TypeNode::Intersection(_)
            | TypeNode::Function { .. }
            | TypeNode::Operator { .. }
    )
}
