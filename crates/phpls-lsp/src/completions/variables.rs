//! Variable completion: `$na|` suggests in-scope variables declared at or
//! before the cursor line.

use tree_sitter::Node;

use crate::completions::{
    CompletionDocument, CompletionItemKind, CompletionProvider, Match, nearest_ancestor,
};
use crate::document_symbols::{DocumentSymbol, SymbolKind};

/// Constructs whose extent bounds variable visibility. `compound_statement`
/// covers function and method bodies; `program` is the file root.
const SCOPE_KINDS: &[&str] = &[
    "function_definition",
    "method_declaration",
    "class_declaration",
    "interface_declaration",
    "trait_declaration",
    "compound_statement",
    "program",
];

pub struct VariablesProvider;

impl CompletionProvider for VariablesProvider {
    fn can_complete(&self, _doc: &CompletionDocument<'_>, node: Node<'_>) -> bool {
        if node.kind() == "variable_name" {
            return true;
        }
        node.kind() == "name"
            && node
                .parent()
                .is_some_and(|p| p.kind() == "variable_name")
    }

    fn complete(&self, doc: &CompletionDocument<'_>, node: Node<'_>) -> Vec<Match> {
        let Some(scope) = nearest_ancestor(node, SCOPE_KINDS) else {
            return Vec::new();
        };

        let mut matches = Vec::new();
        collect(node, scope, doc.symbols, &mut matches);
        matches
    }
}

/// Scan the symbol tree for variables visible from `node`'s position:
/// declared within the scope's line span, at or before the cursor line, and
/// not the token being completed itself. Emitted in symbol-tree order,
/// which is declaration order.
fn collect(node: Node<'_>, scope: Node<'_>, symbols: &[DocumentSymbol], out: &mut Vec<Match>) {
    let scope_start = scope.start_position().row as u32;
    let scope_end = scope.end_position().row as u32;
    let cursor_row = node.end_position().row as u32;

    for symbol in symbols {
        collect(node, scope, &symbol.children, out);

        if symbol.range.start.line < scope_start
            || symbol.range.end.line > scope_end
            || cursor_row < symbol.range.start.line
        {
            continue;
        }

        // The token under the cursor is not a candidate for itself.
        if symbol.range.start.line == node.start_position().row as u32
            && symbol.range.start.character == node.start_position().column as u32
        {
            continue;
        }

        if symbol.kind == SymbolKind::Variable {
            out.push(Match {
                text: format!("${}", symbol.name),
                kind: CompletionItemKind::Variable,
            });
        }
    }
}
