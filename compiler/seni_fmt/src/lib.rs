//! Seni Fmt - the unparser.
//!
//! Writes a front AST back out as source text, replacing every bracketed
//! value with the next value of a genotype. Genes are consumed in the order
//! the compiler assigned them (depth-first, pre-order), so
//! `unparse(ast, genotype_from_initial_values(build_traits(ast)))` gives the
//! script back.
//!
//! # Spacing
//!
//! A tree parsed with trivia carries its own whitespace and comments and is
//! reproduced exactly. Without trivia, one space separates adjacent items
//! and a newline separates top-level forms.

mod emitter;
mod number;

use seni_eval::Value;
use seni_ir::{Literal, Node, NodeKind};
use seni_lexer::escape_string;
use seni_stack::ensure_sufficient_stack;
use std::fmt;

pub use emitter::{Emitter, StringEmitter};
pub use number::{format_number, format_plain};

#[derive(Clone, Debug, PartialEq)]
pub enum UnparseError {
    /// The genotype ran out before the last bracketed value.
    MissingGene { index: usize },
    /// Values were left over after the last bracketed value.
    UnusedGenes { used: usize, len: usize },
    /// The gene holds a value that has no source syntax.
    Unrepresentable { index: usize, type_name: &'static str },
}

impl fmt::Display for UnparseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnparseError::MissingGene { index } => {
                write!(f, "genotype has no value for gene {index}")
            }
            UnparseError::UnusedGenes { used, len } => {
                write!(f, "genotype has {len} values but the script uses {used}")
            }
            UnparseError::Unrepresentable { index, type_name } => {
                write!(f, "gene {index} holds a {type_name}, which cannot be written as source")
            }
        }
    }
}

impl std::error::Error for UnparseError {}

/// Unparse `front_ast` with the values of `genotype`.
#[tracing::instrument(level = "debug", skip_all, fields(genes = genotype.len()))]
pub fn unparse(front_ast: &[Node], genotype: &[Value]) -> Result<String, UnparseError> {
    let mut emitter = StringEmitter::new();
    unparse_to(front_ast, genotype, &mut emitter)?;
    Ok(emitter.output())
}

/// Unparse into any emitter.
pub fn unparse_to<E: Emitter>(
    front_ast: &[Node],
    genotype: &[Value],
    emitter: &mut E,
) -> Result<(), UnparseError> {
    let mut unparser = Unparser {
        genotype,
        cursor: 0,
        generator_depth: 0,
        emitter,
    };
    unparser.sequence(front_ast, '\n', false)?;
    if unparser.cursor != genotype.len() {
        return Err(UnparseError::UnusedGenes {
            used: unparser.cursor,
            len: genotype.len(),
        });
    }
    Ok(())
}

struct Unparser<'g, 'e, E> {
    genotype: &'g [Value],
    /// Index of the next gene to consume.
    cursor: usize,
    /// Nesting depth inside bracket generators.
    generator_depth: usize,
    emitter: &'e mut E,
}

impl<E: Emitter> Unparser<'_, '_, E> {
    /// Emit `nodes`, putting `separator` between adjacent non-trivia items.
    /// `after_item` says whether an item was emitted just before.
    fn sequence(
        &mut self,
        nodes: &[Node],
        separator: char,
        mut after_item: bool,
    ) -> Result<(), UnparseError> {
        for node in nodes {
            let is_item = !node.is_trivia();
            if is_item && after_item {
                self.emitter.emit_char(separator);
            }
            self.node(node)?;
            after_item = is_item;
        }
        Ok(())
    }

    fn node(&mut self, node: &Node) -> Result<(), UnparseError> {
        ensure_sufficient_stack(|| {
            if node.alterable {
                self.alterable(node)
            } else {
                self.bare(node)
            }
        })
    }

    /// `node` as written, ignoring any brackets around it.
    fn bare(&mut self, node: &Node) -> Result<(), UnparseError> {
        match node.kind {
            NodeKind::List if node.abbreviated => {
                self.emitter.emit_char('\'');
                match node.semantic_children().nth(1) {
                    Some(quoted) => self.node(quoted),
                    None => Ok(()),
                }
            }
            NodeKind::List => {
                self.emitter.emit_char('(');
                self.sequence(&node.children, ' ', false)?;
                self.emitter.emit_char(')');
                Ok(())
            }
            _ => {
                self.literal(node);
                Ok(())
            }
        }
    }

    /// Source text of a non-list node, as written.
    fn literal(&mut self, node: &Node) {
        match (&node.value, node.kind) {
            (Some(Literal::Int(value)), _) => self.emitter.emit(&value.to_string()),
            (Some(Literal::Float { value, decimals }), _) => {
                self.emitter.emit(&format!("{value:.*}", *decimals));
                if *decimals == 0 {
                    // `2.` must not read back as an integer
                    self.emitter.emit_char('.');
                }
            }
            (Some(Literal::Bool(value)), _) => {
                self.emitter.emit(if *value { "true" } else { "false" });
            }
            (Some(Literal::Text(text)), NodeKind::String) => self.string(text),
            (Some(Literal::Text(text)), NodeKind::Label) => {
                self.emitter.emit(text);
                self.emitter.emit_char(':');
            }
            (Some(Literal::Text(text)), NodeKind::Comment) => {
                self.emitter.emit_char(';');
                self.emitter.emit(text);
            }
            (Some(Literal::Text(text)), _) => self.emitter.emit(text),
            (None, _) => {}
        }
    }

    fn string(&mut self, text: &str) {
        self.emitter.emit_char('"');
        self.emitter.emit(&escape_string(text));
        self.emitter.emit_char('"');
    }

    /// `[prefix value generator...]` with the value taken from the genotype.
    ///
    /// Brackets inside a generator are constants, not genes: they are
    /// written with their authored value and consume nothing.
    fn alterable(&mut self, node: &Node) -> Result<(), UnparseError> {
        self.emitter.emit_char('[');
        self.sequence(&node.parameter_prefix, ' ', false)?;
        if self.generator_depth > 0 {
            self.bare(node)?;
        } else if node.is_multi_gene() {
            self.multi_gene(node)?;
        } else {
            self.gene(node)?;
        }
        self.generator_depth += 1;
        let generator = self.sequence(&node.parameter_ast, ' ', true);
        self.generator_depth -= 1;
        generator?;
        self.emitter.emit_char(']');
        Ok(())
    }

    /// A literal list whose elements each take one gene.
    fn multi_gene(&mut self, node: &Node) -> Result<(), UnparseError> {
        self.emitter.emit_char('(');
        let mut after_item = false;
        let mut first_item = true;
        for child in &node.children {
            let is_item = !child.is_trivia();
            if is_item && after_item {
                self.emitter.emit_space();
            }
            if !is_item || (first_item && child.is_name("list")) {
                self.node(child)?;
            } else {
                self.gene(child)?;
            }
            first_item &= !is_item;
            after_item = is_item;
        }
        self.emitter.emit_char(')');
        Ok(())
    }

    /// Emit the next gene's value in place of `node`.
    fn gene(&mut self, node: &Node) -> Result<(), UnparseError> {
        let index = self.cursor;
        let value = self
            .genotype
            .get(index)
            .ok_or(UnparseError::MissingGene { index })?;
        self.cursor += 1;
        self.value(node, value, index)
    }

    fn value(&mut self, node: &Node, value: &Value, index: usize) -> Result<(), UnparseError> {
        match value {
            Value::Number(n) if !n.is_finite() => {
                return Err(UnparseError::Unrepresentable {
                    index,
                    type_name: "non-finite number",
                })
            }
            Value::Number(n) => self.emitter.emit(&format_number(node, *n)),
            Value::Boolean(b) => self.emitter.emit(if b.is_true() { "true" } else { "false" }),
            Value::Str(text) => self.string(text),
            Value::Name(name) => self.emitter.emit(name.as_str()),
            Value::List(items) => {
                self.emitter.emit("(list");
                for item in items {
                    self.emitter.emit_space();
                    self.value(node, item, index)?;
                }
                self.emitter.emit_char(')');
            }
            other => {
                return Err(UnparseError::Unrepresentable {
                    index,
                    type_name: other.type_name(),
                })
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
