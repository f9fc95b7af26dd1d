//! Member completion on `$this->`: suggests properties and methods of the
//! enclosing class.

use phpls_syntax::node_text;
use tree_sitter::Node;

use crate::completions::{
    CompletionDocument, CompletionItemKind, CompletionProvider, Match, nearest_ancestor,
};
use crate::document_symbols::{DocumentSymbol, SymbolKind};

pub struct ObjectAccessProvider;

impl CompletionProvider for ObjectAccessProvider {
    fn can_complete(&self, doc: &CompletionDocument<'_>, node: Node<'_>) -> bool {
        let Some(parent) = node.parent() else {
            return false;
        };
        let Some(object) = parent.named_child(0) else {
            return false;
        };

        node.kind() == "name"
            && parent.kind() == "member_access_expression"
            && node_text(doc.text, object) == "$this"
    }

    fn complete(&self, doc: &CompletionDocument<'_>, node: Node<'_>) -> Vec<Match> {
        let Some(class) = nearest_ancestor(node, &["class_declaration"]) else {
            return Vec::new();
        };

        let mut matches = Vec::new();
        collect(class, doc.symbols, &mut matches);
        matches
    }
}

/// Scan the symbol tree for members declared within the class's line span.
/// Class members are not order-sensitive, so no cursor-line bound applies:
/// a member declared below the access site is still visible.
fn collect(class: Node<'_>, symbols: &[DocumentSymbol], out: &mut Vec<Match>) {
    let class_start = class.start_position().row as u32;
    let class_end = class.end_position().row as u32;

    for symbol in symbols {
        collect(class, &symbol.children, out);

        if symbol.range.start.line < class_start || symbol.range.end.line > class_end {
            continue;
        }

        match symbol.kind {
            SymbolKind::Property => out.push(Match {
                text: symbol.name.clone(),
                kind: CompletionItemKind::Property,
            }),
            SymbolKind::Method => out.push(Match {
                text: symbol.name.clone(),
                kind: CompletionItemKind::Method,
            }),
            _ => {}
        }
    }
}
