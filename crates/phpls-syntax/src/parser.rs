//! PHP document parsing and basic tree traversal helpers.

use tree_sitter::{Node, Parser, Tree};

/// Parse PHP source text into a concrete syntax tree.
///
/// Returns `None` when the parser fails outright (e.g. it was cancelled or
/// the language could not be loaded). tree-sitter still produces a tree for
/// malformed source, so `None` is rare; callers treat it as "no symbols".
pub fn parse(text: &str) -> Option<Tree> {
    let mut parser = Parser::new();
    if let Err(e) = parser.set_language(&tree_sitter_php::LANGUAGE_PHP.into()) {
        tracing::error!("failed to load PHP grammar: {e}");
        return None;
    }
    parser.parse(text, None)
}

/// The source text covered by a node.
pub fn node_text<'a>(text: &'a str, node: Node<'_>) -> &'a str {
    text.get(node.start_byte()..node.end_byte()).unwrap_or("")
}

/// Depth-first search for the first descendant (including `node` itself)
/// with the given kind.
pub fn first_descendant_of_kind<'tree>(node: Node<'tree>, kind: &str) -> Option<Node<'tree>> {
    if node.kind() == kind {
        return Some(node);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = first_descendant_of_kind(child, kind) {
            return Some(found);
        }
    }
    None
}

/// Collect every descendant (including `node` itself) with the given kind,
/// in depth-first source order.
pub fn find_nodes_by_kind<'tree>(node: Node<'tree>, kind: &str) -> Vec<Node<'tree>> {
    let mut nodes = Vec::new();
    collect_nodes_by_kind(node, kind, &mut nodes);
    nodes
}

fn collect_nodes_by_kind<'tree>(node: Node<'tree>, kind: &str, out: &mut Vec<Node<'tree>>) {
    if node.kind() == kind {
        out.push(node);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_nodes_by_kind(child, kind, out);
    }
}

#[cfg(test)]
mod parser_tests {
    use super::*;

    #[test]
    fn test_parse_produces_program_root() {
        let tree = parse("<?php $foo = 'bar';").unwrap();
        assert_eq!(tree.root_node().kind(), "program");
    }

    #[test]
    fn test_node_text_slices_by_byte_range() {
        let source = "<?php $foo = 'bar';";
        let tree = parse(source).unwrap();
        let vars = find_nodes_by_kind(tree.root_node(), "variable_name");
        assert_eq!(vars.len(), 1);
        assert_eq!(node_text(source, vars[0]), "$foo");
    }

    #[test]
    fn test_first_descendant_of_kind() {
        let source = "<?php class Foo {}";
        let tree = parse(source).unwrap();
        let class = first_descendant_of_kind(tree.root_node(), "class_declaration").unwrap();
        let name = first_descendant_of_kind(class, "name").unwrap();
        assert_eq!(node_text(source, name), "Foo");
    }

    #[test]
    fn test_find_nodes_by_kind_source_order() {
        let source = "<?php $a = 1; $b = 2; $c = 3;";
        let tree = parse(source).unwrap();
        let names: Vec<_> = find_nodes_by_kind(tree.root_node(), "variable_name")
            .into_iter()
            .map(|n| node_text(source, n))
            .collect();
        assert_eq!(names, vec!["$a", "$b", "$c"]);
    }
}
