//! Front AST → forms lowering.

use seni_ir::{ArgMap, Atom, Form, Gene, GeneId, Literal, Name, Node, NodeKind, SpecialForm};
use seni_stack::ensure_sufficient_stack;

use crate::{CompileWarning, CompileWarningKind, CompiledProgram};

/// Whether bracketed literals become genes.
///
/// Generators themselves are compiled with `Constant`: a bracket nested in a
/// generator is just its literal value.
#[derive(Copy, Clone, Eq, PartialEq)]
enum Brackets {
    Extract,
    Constant,
}

/// State for one compilation. Never reused.
pub(crate) struct Lowerer {
    genes: Vec<Gene>,
    warnings: Vec<CompileWarning>,
}

impl Lowerer {
    pub(crate) fn new() -> Self {
        Lowerer {
            genes: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub(crate) fn lower_program(&mut self, ast: &[Node]) -> Vec<Form> {
        self.lower_nodes(ast.iter(), Brackets::Extract)
    }

    pub(crate) fn finish(self, forms: Vec<Form>) -> CompiledProgram {
        CompiledProgram {
            forms,
            genes: self.genes,
            warnings: self.warnings,
        }
    }

    fn lower_nodes<'n>(
        &mut self,
        nodes: impl Iterator<Item = &'n Node>,
        brackets: Brackets,
    ) -> Vec<Form> {
        nodes
            .filter_map(|node| self.lower_node(node, brackets))
            .collect()
    }

    /// Lower one node; trivia yields `None`.
    fn lower_node(&mut self, node: &Node, brackets: Brackets) -> Option<Form> {
        ensure_sufficient_stack(|| {
            if node.alterable && brackets == Brackets::Extract {
                return Some(self.lower_alterable(node));
            }
            let form = match node.kind {
                NodeKind::List => self.lower_list(node, brackets),
                NodeKind::Int | NodeKind::Float => {
                    Form::Number(node.value.as_ref().and_then(Literal::as_f64).unwrap_or(0.0))
                }
                NodeKind::Boolean => Form::Boolean(matches!(node.value, Some(Literal::Bool(true)))),
                NodeKind::String => Form::Str(node.text().unwrap_or_default().to_owned()),
                NodeKind::Name => Form::Name(Name::new(node.text().unwrap_or_default())),
                NodeKind::Label => {
                    let label = node.text().unwrap_or_default();
                    self.warn(CompileWarningKind::StrayLabel(label.to_owned()), node);
                    Form::Name(Name::new(label))
                }
                NodeKind::Comment | NodeKind::Whitespace => return None,
            };
            Some(form)
        })
    }

    fn lower_list(&mut self, node: &Node, brackets: Brackets) -> Form {
        let children: Vec<&Node> = node.semantic_children().collect();

        match children.as_slice() {
            [] => Form::List(Vec::new()),
            [first, ..] if first.kind == NodeKind::Label => {
                Form::Args(self.fold_arguments(&children, brackets))
            }
            [head, second, ..] if second.kind == NodeKind::Label => {
                let head = self
                    .lower_node(head, brackets)
                    .unwrap_or(Form::List(Vec::new()));
                let args = self.fold_arguments(&children[1..], brackets);
                resolve_special(vec![head, Form::Args(args)])
            }
            _ => resolve_special(self.lower_nodes(children.iter().copied(), brackets)),
        }
    }

    /// Fold `label value label value ...` into an argument map.
    ///
    /// Skipped nodes are still lowered so any genes inside them keep their
    /// place in the gene table.
    fn fold_arguments(&mut self, items: &[&Node], brackets: Brackets) -> ArgMap {
        let mut args = ArgMap::with_capacity(items.len() / 2);
        for pair in items.chunks_exact(2) {
            let (label, value) = (pair[0], pair[1]);
            if label.kind != NodeKind::Label {
                self.warn(CompileWarningKind::ExpectedLabel(label.kind), label);
                self.lower_node(label, brackets);
                self.lower_node(value, brackets);
                continue;
            }
            if let Some(value) = self.lower_node(value, brackets) {
                args.push((Name::new(label.text().unwrap_or_default()), value));
            }
        }

        if items.len() % 2 != 0 {
            if let Some(last) = items.last() {
                self.warn(CompileWarningKind::OddArgumentCount, last);
                self.lower_node(last, brackets);
            }
        }
        args
    }

    fn lower_alterable(&mut self, node: &Node) -> Form {
        if node.kind == NodeKind::List {
            return self.lower_multi_gene(node);
        }

        let has_generator = node.parameter_ast.iter().any(|item| !item.is_trivia());
        let compiled_ast = if has_generator {
            self.lower_nodes(node.parameter_ast.iter(), Brackets::Constant)
        } else {
            vec![identity(node)]
        };
        self.push_gene(node, compiled_ast)
    }

    /// `[(list a b c) map gen]`: one gene per element, each drawn by `gen`.
    fn lower_multi_gene(&mut self, node: &Node) -> Form {
        let generator = self.lower_nodes(
            node.parameter_ast.iter().filter(|item| !item.is_name("map")),
            Brackets::Constant,
        );

        let mut items = Vec::new();
        for (i, child) in node.semantic_children().enumerate() {
            if i == 0 && child.is_name("list") {
                items.push(Form::Name(Name::new("list")));
            } else {
                items.push(self.push_gene(child, generator.clone()));
            }
        }
        Form::List(items)
    }

    fn push_gene(&mut self, node: &Node, compiled_ast: Vec<Form>) -> Form {
        let id = GeneId::new(self.genes.len());
        let initial_value = atom(node);
        tracing::trace!(gene = id.index(), %initial_value, "gene");
        self.genes.push(Gene {
            initial_value,
            compiled_ast,
        });
        Form::Gene(id)
    }

    fn warn(&mut self, kind: CompileWarningKind, node: &Node) {
        let warning = CompileWarning {
            kind,
            span: node.span,
        };
        tracing::warn!(span = %warning.span, "{warning}");
        self.warnings.push(warning);
    }
}

/// Turn `(name operands...)` into a special form when `name` is one.
fn resolve_special(items: Vec<Form>) -> Form {
    let special = items
        .first()
        .and_then(Form::as_name)
        .and_then(|name| SpecialForm::from_name(name.as_str()));
    match special {
        Some(special) => Form::Special(special, items.into_iter().skip(1).collect()),
        None => Form::List(items),
    }
}

fn atom(node: &Node) -> Atom {
    match &node.value {
        Some(Literal::Bool(value)) => Atom::Boolean(*value),
        Some(literal @ (Literal::Int(_) | Literal::Float { .. })) => {
            Atom::Number(literal.as_f64().unwrap_or(0.0))
        }
        Some(Literal::Text(text)) if node.kind == NodeKind::String => Atom::Str(text.clone()),
        Some(Literal::Text(text)) => Atom::Symbol(Name::new(text)),
        None => Atom::Symbol(Name::new("")),
    }
}

/// Generator for a bracket written without one: `(identity value: literal)`.
fn identity(node: &Node) -> Form {
    let value = match atom(node) {
        Atom::Number(value) => Form::Number(value),
        Atom::Boolean(value) => Form::Boolean(value),
        Atom::Str(text) => Form::Str(text),
        Atom::Symbol(name) => Form::Special(SpecialForm::Quote, vec![Form::Name(name)]),
    };
    Form::List(vec![
        Form::Name(Name::new("identity")),
        Form::Args(vec![(Name::new("value"), value)]),
    ])
}
