//! Member completion on `$obj->` where `$obj` is not `$this`.
//!
//! Type inference is a single-assignment heuristic: the document is
//! re-parsed and scanned for `$obj = new SomeClass(...)`; the members of
//! the top-level `SomeClass` symbol are then suggested. Any step that fails
//! yields an empty match list, never an error.

use phpls_syntax::{find_nodes_by_kind, node_text, parse};
use tree_sitter::Node;

use crate::completions::{
    CompletionDocument, CompletionItemKind, CompletionProvider, Match, nearest_ancestor,
};
use crate::document_symbols::SymbolKind;

pub struct InstanceAccessProvider;

impl CompletionProvider for InstanceAccessProvider {
    fn can_complete(&self, doc: &CompletionDocument<'_>, node: Node<'_>) -> bool {
        let Some(parent) = node.parent() else {
            return false;
        };
        let Some(object) = parent.named_child(0) else {
            return false;
        };

        node.kind() == "name"
            && parent.kind() == "member_access_expression"
            && node_text(doc.text, object) != "$this"
    }

    fn complete(&self, doc: &CompletionDocument<'_>, node: Node<'_>) -> Vec<Match> {
        let Some(object_name) = find_object_name(doc.text, node) else {
            tracing::debug!("instance access: no member access ancestor");
            return Vec::new();
        };
        let Some(class_name) = find_class_name(doc.text, &object_name) else {
            tracing::debug!("instance access: no instantiation found for {object_name}");
            return Vec::new();
        };

        let Some(class) = doc
            .symbols
            .iter()
            .find(|s| s.kind == SymbolKind::Class && s.name == class_name)
        else {
            tracing::debug!("instance access: class {class_name} not declared in document");
            return Vec::new();
        };

        // Members are visible unfiltered by line: the class body, not the
        // cursor, bounds them.
        let mut matches = Vec::new();
        for member in &class.children {
            match member.kind {
                SymbolKind::Property => matches.push(Match {
                    text: member.name.clone(),
                    kind: CompletionItemKind::Property,
                }),
                SymbolKind::Method => matches.push(Match {
                    text: member.name.clone(),
                    kind: CompletionItemKind::Method,
                }),
                _ => {}
            }
        }
        matches
    }
}

/// The object expression text of the member access under completion.
fn find_object_name(text: &str, node: Node<'_>) -> Option<String> {
    let access = nearest_ancestor(node, &["member_access_expression"])?;
    let object = access.named_child(0)?;
    Some(node_text(text, object).to_string())
}

/// Scan every assignment in the document for `<object_name> = new <Class>(...)`
/// and return the instantiated class name.
fn find_class_name(text: &str, object_name: &str) -> Option<String> {
    let tree = parse(text)?;

    for assignment in find_nodes_by_kind(tree.root_node(), "assignment_expression") {
        let Some(left) = assignment.child_by_field_name("left") else {
            continue;
        };
        let Some(right) = assignment.child_by_field_name("right") else {
            continue;
        };

        if node_text(text, left) != object_name || right.kind() != "object_creation_expression" {
            continue;
        }

        if let Some(class_name) = right.named_child(0) {
            return Some(node_text(text, class_name).to_string());
        }
    }

    None
}
