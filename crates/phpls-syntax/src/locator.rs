//! Position-to-node resolution.
//!
//! Maps a cursor position to the most specific syntax node covering it.
//! Callers re-parse the exact text the position refers to, so the resolved
//! node is always consistent with that string.

use phpls_common::Position;
use tree_sitter::Node;

/// Find the deepest node containing `pos`, or `None` when the root itself
/// does not contain it (empty text, position past the end).
pub fn node_at_position<'tree>(root: Node<'tree>, pos: Position) -> Option<Node<'tree>> {
    let found = locate(root, pos.line as usize, pos.character as usize);
    if let Some(node) = found {
        tracing::debug!(
            "node of kind {} at line {} char {}",
            node.kind(),
            pos.line,
            pos.character
        );
    }
    found
}

fn locate(node: Node<'_>, row: usize, column: usize) -> Option<Node<'_>> {
    if !contains(node, row, column) {
        return None;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = locate(child, row, column) {
            return Some(found);
        }
    }

    // No child covers the position; this node is the deepest match.
    Some(node)
}

/// Range containment with an exclusive end column: a position exactly at a
/// token's end belongs to the following sibling, not the token.
fn contains(node: Node<'_>, row: usize, column: usize) -> bool {
    let start = node.start_position();
    let end = node.end_position();

    if row < start.row || row > end.row {
        return false;
    }
    if row == start.row && column < start.column {
        return false;
    }
    if row == end.row && column >= end.column {
        return false;
    }
    true
}

#[cfg(test)]
mod locator_tests {
    use super::*;
    use crate::parser::{node_text, parse};

    fn resolve(content: &str, line: u32, character: u32) -> (String, String) {
        let tree = parse(content).unwrap();
        let node = node_at_position(tree.root_node(), Position::new(line, character)).unwrap();
        (node.kind().to_string(), node_text(content, node).to_string())
    }

    #[test]
    fn test_resolves_partial_variable_token() {
        let content = "<?php\n$name = \"Alice\";\n$ag\n";
        let (kind, text) = resolve(content, 2, 2);
        assert_eq!(kind, "name");
        assert_eq!(text, "ag");
    }

    #[test]
    fn test_resolves_variable_inside_function_body() {
        let content = "<?php\n\t\t\t\tfunction hello() {\n\t\t\t\t\techo $a\n\t\t\t\t}\n\t\t\t\t";
        let (kind, text) = resolve(content, 2, 11);
        assert_eq!(kind, "name");
        assert_eq!(text, "a");
    }

    #[test]
    fn test_resolves_member_name_after_arrow() {
        let content = "<?php\n\t\t\t\t$obj = new stdClass();\n\t\t\t\t$obj->a\n\t\t\t";
        let (kind, text) = resolve(content, 2, 10);
        assert_eq!(kind, "name");
        assert_eq!(text, "a");
    }

    #[test]
    fn test_none_outside_document() {
        let content = "<?php\n$a = 1;\n";
        let tree = parse(content).unwrap();
        assert!(node_at_position(tree.root_node(), Position::new(50, 0)).is_none());
    }

    #[test]
    fn test_end_column_is_exclusive() {
        // Position exactly at the end of `$a` must not resolve back into it.
        let content = "<?php $a = 1;";
        let tree = parse(content).unwrap();
        let node = node_at_position(tree.root_node(), Position::new(0, 8)).unwrap();
        assert_ne!(node_text(content, node), "a");
    }
}
