use super::*;

fn int(value: i64) -> Node {
    Node::leaf(NodeKind::Int, Literal::Int(value), Span::DUMMY)
}

fn space() -> Node {
    Node::leaf(NodeKind::Whitespace, Literal::Text(" ".into()), Span::DUMMY)
}

fn bracketed(mut node: Node, parameter_ast: Vec<Node>) -> Node {
    node.alterable = true;
    node.parameter_ast = parameter_ast;
    node
}

#[test]
fn gene_count_walks_children() {
    let ast = vec![Node::list(
        vec![
            Node::name("+", Span::DUMMY),
            bracketed(int(3), vec![]),
            Node::list(vec![bracketed(int(4), vec![])], Span::DUMMY),
        ],
        Span::DUMMY,
    )];
    assert_eq!(gene_count(&ast), 2);
}

#[test]
fn parameter_ast_is_not_counted() {
    let nested = bracketed(int(1), vec![]);
    let outer = bracketed(int(3), vec![Node::list(vec![nested], Span::DUMMY)]);
    assert_eq!(outer.gene_count(), 1);
}

#[test]
fn multi_gene_counts_elements() {
    let list = Node::list(
        vec![Node::name("list", Span::DUMMY), space(), int(1), space(), int(2)],
        Span::DUMMY,
    );
    let node = bracketed(list, vec![Node::name("map", Span::DUMMY)]);
    assert!(node.is_multi_gene());
    assert_eq!(node.gene_elements().count(), 2);
    assert_eq!(node.gene_count(), 2);
}

#[test]
fn semantic_children_skip_trivia() {
    let list = Node::list(vec![int(1), space(), int(2)], Span::DUMMY);
    assert_eq!(list.semantic_children().count(), 2);
    assert!(NodeKind::Boolean.is_scalar());
    assert!(!NodeKind::List.is_scalar());
}
