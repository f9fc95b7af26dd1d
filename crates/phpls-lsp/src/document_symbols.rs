//! Document Symbols implementation.
//!
//! Walks a PHP syntax tree and produces a nested outline of the programming
//! constructs it declares: classes, interfaces, traits, functions, methods,
//! properties, constants and variables. Scope-introducing declarations
//! (class/interface/trait/function) collect the symbols found in their
//! subtree as children; everything else flattens into the enclosing list.

use phpls_common::{Position, Range};
use phpls_syntax::{first_descendant_of_kind, node_text, parse};
use tree_sitter::Node;

/// A symbol kind (matches LSP SymbolKind values).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SymbolKind {
    File = 1,
    Module = 2,
    Namespace = 3,
    Package = 4,
    Class = 5,
    Method = 6,
    Property = 7,
    Field = 8,
    Constructor = 9,
    Enum = 10,
    Interface = 11,
    Function = 12,
    Variable = 13,
    Constant = 14,
    String = 15,
    Number = 16,
    Boolean = 17,
    Array = 18,
    Object = 19,
    Key = 20,
    Null = 21,
    EnumMember = 22,
    Struct = 23,
    Event = 24,
    Operator = 25,
    TypeParameter = 26,
}

impl SymbolKind {
    pub fn from_u8(value: u8) -> Option<Self> {
        Some(match value {
            1 => Self::File,
            2 => Self::Module,
            3 => Self::Namespace,
            4 => Self::Package,
            5 => Self::Class,
            6 => Self::Method,
            7 => Self::Property,
            8 => Self::Field,
            9 => Self::Constructor,
            10 => Self::Enum,
            11 => Self::Interface,
            12 => Self::Function,
            13 => Self::Variable,
            14 => Self::Constant,
            15 => Self::String,
            16 => Self::Number,
            17 => Self::Boolean,
            18 => Self::Array,
            19 => Self::Object,
            20 => Self::Key,
            21 => Self::Null,
            22 => Self::EnumMember,
            23 => Self::Struct,
            24 => Self::Event,
            25 => Self::Operator,
            26 => Self::TypeParameter,
            _ => return None,
        })
    }
}

// LSP transmits SymbolKind as a bare integer.
impl serde::Serialize for SymbolKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

impl<'de> serde::Deserialize<'de> for SymbolKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = u8::deserialize(deserializer)?;
        Self::from_u8(value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid SymbolKind: {value}")))
    }
}

/// Represents programming constructs like variables, classes, interfaces, etc.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DocumentSymbol {
    /// The name of this symbol.
    pub name: String,
    /// The kind of this symbol.
    pub kind: SymbolKind,
    /// The range enclosing this symbol.
    pub range: Range,
    /// The range that should be selected when this symbol is picked.
    /// Identical to `range`; no separate focus span is tracked.
    #[serde(rename = "selectionRange")]
    pub selection_range: Range,
    /// Children of this symbol, e.g. members of a class, in source order.
    pub children: Vec<Self>,
}

impl DocumentSymbol {
    pub fn new(name: String, kind: SymbolKind, range: Range) -> Self {
        Self {
            name,
            kind,
            range,
            selection_range: range,
            children: Vec::new(),
        }
    }
}

/// Extract the symbol tree from PHP source text.
///
/// Deterministic and total: a document the parser rejects outright yields
/// an empty list.
pub fn extract(text: &str) -> Vec<DocumentSymbol> {
    let Some(tree) = parse(text) else {
        return Vec::new();
    };

    let mut symbols = Vec::new();
    walk(text, tree.root_node(), &mut symbols);
    symbols
}

fn walk(text: &str, node: Node<'_>, out: &mut Vec<DocumentSymbol>) {
    match node.kind() {
        "variable_name" => {
            // `$` token, then the bare name.
            if let Some(name) = node.child(1) {
                push_leaf(text, SymbolKind::Variable, name, out);
            }
        }
        "function_definition" => {
            push_container(text, SymbolKind::Function, node, out);
        }
        "class_declaration" | "trait_declaration" => {
            push_container(text, SymbolKind::Class, node, out);
        }
        "interface_declaration" => {
            push_container(text, SymbolKind::Interface, node, out);
        }
        "base_clause" => {
            // `extends` entries: interface parents are interfaces, class
            // parents are classes.
            let kind = match node.parent() {
                Some(p) if p.kind() == "interface_declaration" => SymbolKind::Interface,
                _ => SymbolKind::Class,
            };
            push_named_children(text, kind, node, out);
        }
        "class_interface_clause" => {
            // `implements` entries.
            push_named_children(text, SymbolKind::Interface, node, out);
        }
        "use_declaration" => {
            // trait `use` entries.
            push_named_children(text, SymbolKind::Class, node, out);
        }
        "method_declaration" => {
            if let Some(name) = first_descendant_of_kind(node, "name") {
                push_leaf(text, SymbolKind::Method, name, out);
            }
            // Methods are not scope boundaries: body locals nest under the
            // enclosing class.
            walk_children(text, node, out);
        }
        "property_declaration" => {
            if let Some(name) = first_descendant_of_kind(node, "name") {
                push_leaf(text, SymbolKind::Property, name, out);
            }
        }
        "const_declaration" => {
            if let Some(name) = first_descendant_of_kind(node, "name") {
                push_leaf(text, SymbolKind::Constant, name, out);
            }
        }
        "function_call_expression" => {
            // `define('NAME', ...)` declares a constant. The string argument
            // is kept verbatim, quotes included.
            if let Some(callee) = node.child(0) {
                if node_text(text, callee) == "define" {
                    if let Some(name) = node
                        .child(1)
                        .and_then(|args| first_descendant_of_kind(args, "string"))
                    {
                        push_leaf(text, SymbolKind::Constant, name, out);
                    }
                }
            }
            walk_children(text, node, out);
        }
        _ => {
            walk_children(text, node, out);
        }
    }
}

fn walk_children(text: &str, node: Node<'_>, out: &mut Vec<DocumentSymbol>) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk(text, child, out);
    }
}

/// Emit a leaf symbol named and positioned by its name node. A trigger whose
/// name node is missing (partial code) is skipped entirely.
fn push_leaf(text: &str, kind: SymbolKind, name_node: Node<'_>, out: &mut Vec<DocumentSymbol>) {
    let name = node_text(text, name_node);
    if name.is_empty() {
        return;
    }
    out.push(DocumentSymbol::new(
        name.to_string(),
        kind,
        node_range(name_node),
    ));
}

/// Emit a scope-boundary symbol spanning its whole declaration, collecting
/// every symbol discovered in the subtree as children.
fn push_container(text: &str, kind: SymbolKind, node: Node<'_>, out: &mut Vec<DocumentSymbol>) {
    let Some(name_node) = first_descendant_of_kind(node, "name") else {
        // Malformed declaration; still surface anything declared inside it.
        walk_children(text, node, out);
        return;
    };

    let mut children = Vec::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk(text, child, &mut children);
    }

    let mut symbol = DocumentSymbol::new(
        node_text(text, name_node).to_string(),
        kind,
        node_range(node),
    );
    symbol.children = children;
    out.push(symbol);
}

fn push_named_children(text: &str, kind: SymbolKind, node: Node<'_>, out: &mut Vec<DocumentSymbol>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        push_leaf(text, kind, child, out);
    }
}

fn node_range(node: Node<'_>) -> Range {
    let start = node.start_position();
    let end = node.end_position();
    Range::new(
        Position::new(start.row as u32, start.column as u32),
        Position::new(end.row as u32, end.column as u32),
    )
}

#[cfg(test)]
#[path = "../tests/document_symbols_tests.rs"]
mod document_symbols_tests;
