//! Front AST.
//!
//! The parser builds one `Node` tree per script. Besides the program itself
//! it records everything needed to write the script back out: which literals
//! were bracketed (alterable), the generator written after each of them, and
//! optionally the whitespace and comments between items.

use super::{Literal, Span};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum NodeKind {
    List,
    Int,
    Float,
    Name,
    Label,
    String,
    Boolean,
    /// Kept only by trivia-preserving parses.
    Comment,
    /// Kept only by trivia-preserving parses.
    Whitespace,
}

impl NodeKind {
    /// Kinds that may appear as the value of a bracketed form.
    #[inline]
    pub fn is_scalar(self) -> bool {
        matches!(
            self,
            NodeKind::Int | NodeKind::Float | NodeKind::Name | NodeKind::String | NodeKind::Boolean
        )
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct Node {
    pub kind: NodeKind,
    /// `None` for lists.
    pub value: Option<Literal>,
    pub children: Vec<Node>,
    /// Written inside `[...]`.
    pub alterable: bool,
    /// Generator items following the value inside the brackets.
    pub parameter_ast: Vec<Node>,
    /// Whitespace and comments between `[` and the value.
    pub parameter_prefix: Vec<Node>,
    /// A `(quote x)` list written as `'x`.
    pub abbreviated: bool,
    pub span: Span,
}

impl Node {
    pub fn leaf(kind: NodeKind, value: Literal, span: Span) -> Self {
        Node {
            kind,
            value: Some(value),
            children: Vec::new(),
            alterable: false,
            parameter_ast: Vec::new(),
            parameter_prefix: Vec::new(),
            abbreviated: false,
            span,
        }
    }

    pub fn list(children: Vec<Node>, span: Span) -> Self {
        Node {
            kind: NodeKind::List,
            value: None,
            children,
            alterable: false,
            parameter_ast: Vec::new(),
            parameter_prefix: Vec::new(),
            abbreviated: false,
            span,
        }
    }

    pub fn name(text: &str, span: Span) -> Self {
        Node::leaf(NodeKind::Name, Literal::Text(text.to_owned()), span)
    }

    #[inline]
    pub fn is_trivia(&self) -> bool {
        matches!(self.kind, NodeKind::Comment | NodeKind::Whitespace)
    }

    /// Text of names, labels, strings and trivia.
    pub fn text(&self) -> Option<&str> {
        match &self.value {
            Some(Literal::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// True for a `Name` node spelled `name`.
    pub fn is_name(&self, name: &str) -> bool {
        self.kind == NodeKind::Name && self.text() == Some(name)
    }

    /// Children with whitespace and comments filtered out.
    pub fn semantic_children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().filter(|child| !child.is_trivia())
    }

    /// A bracketed literal list whose generator maps over its elements.
    pub fn is_multi_gene(&self) -> bool {
        self.alterable && self.kind == NodeKind::List && is_map_generator(&self.parameter_ast)
    }

    /// The elements of a multi-gene list that each carry one gene: every
    /// semantic child except a leading `list` name.
    pub fn gene_elements(&self) -> impl Iterator<Item = &Node> {
        let mut semantic = self.semantic_children().peekable();
        if semantic.peek().is_some_and(|first| first.is_name("list")) {
            semantic.next();
        }
        semantic
    }

    /// Number of genes this node and its descendants contribute.
    ///
    /// Items inside a `parameter_ast` never contribute.
    pub fn gene_count(&self) -> usize {
        if self.alterable {
            if self.kind == NodeKind::List {
                self.gene_elements().count()
            } else {
                1
            }
        } else {
            self.children.iter().map(Node::gene_count).sum()
        }
    }
}

/// Whether a bracket's generator items contain a top-level `map` name.
pub fn is_map_generator(parameter_ast: &[Node]) -> bool {
    parameter_ast.iter().any(|node| node.is_name("map"))
}

/// Total gene slots of a script, in the order the compiler assigns them.
pub fn gene_count(nodes: &[Node]) -> usize {
    nodes.iter().map(Node::gene_count).sum()
}

#[cfg(test)]
mod tests;
