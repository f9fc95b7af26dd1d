//! Completions implementation.
//!
//! Given a position in a document, re-parses the text, resolves the syntax
//! node under the cursor and runs a fixed, ordered pipeline of completion
//! providers against it. Each provider recognizes one cursor context and
//! proposes candidate identifiers from the document's symbol tree; results
//! are concatenated in registration order, not globally ranked.

use phpls_common::Position;
use phpls_syntax::{node_at_position, parse};
use tree_sitter::Node;

use crate::document_symbols::DocumentSymbol;

mod instance_access;
mod object_access;
mod variables;

pub use instance_access::InstanceAccessProvider;
pub use object_access::ObjectAccessProvider;
pub use variables::VariablesProvider;

/// The kind of completion item (matches LSP CompletionItemKind values).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CompletionItemKind {
    Text = 1,
    Method = 2,
    Function = 3,
    Constructor = 4,
    Field = 5,
    Variable = 6,
    Class = 7,
    Interface = 8,
    Module = 9,
    Property = 10,
    Unit = 11,
    Value = 12,
    Enum = 13,
    Keyword = 14,
    Snippet = 15,
    Color = 16,
    File = 17,
    Reference = 18,
    Folder = 19,
    EnumMember = 20,
    Constant = 21,
    Struct = 22,
    Event = 23,
    Operator = 24,
    TypeParameter = 25,
}

impl CompletionItemKind {
    pub fn from_u8(value: u8) -> Option<Self> {
        Some(match value {
            1 => Self::Text,
            2 => Self::Method,
            3 => Self::Function,
            4 => Self::Constructor,
            5 => Self::Field,
            6 => Self::Variable,
            7 => Self::Class,
            8 => Self::Interface,
            9 => Self::Module,
            10 => Self::Property,
            11 => Self::Unit,
            12 => Self::Value,
            13 => Self::Enum,
            14 => Self::Keyword,
            15 => Self::Snippet,
            16 => Self::Color,
            17 => Self::File,
            18 => Self::Reference,
            19 => Self::Folder,
            20 => Self::EnumMember,
            21 => Self::Constant,
            22 => Self::Struct,
            23 => Self::Event,
            24 => Self::Operator,
            25 => Self::TypeParameter,
            _ => return None,
        })
    }
}

// LSP transmits CompletionItemKind as a bare integer.
impl serde::Serialize for CompletionItemKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

impl<'de> serde::Deserialize<'de> for CompletionItemKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = u8::deserialize(deserializer)?;
        Self::from_u8(value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid CompletionItemKind: {value}")))
    }
}

/// A candidate identifier produced by a completion provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// The text to suggest (e.g. `$name`, `bar`).
    pub text: String,
    /// The completion-item kind the editor should display.
    pub kind: CompletionItemKind,
}

/// A borrowed view of a stored document: the exact text to resolve against
/// and its derived symbol tree.
#[derive(Debug, Clone, Copy)]
pub struct CompletionDocument<'a> {
    pub text: &'a str,
    pub symbols: &'a [DocumentSymbol],
}

/// A completion strategy: recognizes one cursor context and proposes
/// candidates for it.
pub trait CompletionProvider {
    /// Whether this provider applies to the node under the cursor.
    fn can_complete(&self, doc: &CompletionDocument<'_>, node: Node<'_>) -> bool;
    /// Candidate matches for the node, in the provider's internal order.
    fn complete(&self, doc: &CompletionDocument<'_>, node: Node<'_>) -> Vec<Match>;
}

/// The completion pipeline. Provider order is fixed at construction and is
/// semantic: results are concatenated, not merged.
pub struct CompletionEngine {
    providers: Vec<Box<dyn CompletionProvider>>,
}

impl CompletionEngine {
    pub fn new() -> Self {
        Self {
            providers: vec![
                Box::new(VariablesProvider),
                Box::new(ObjectAccessProvider),
                Box::new(InstanceAccessProvider),
            ],
        }
    }

    /// Resolve the node at `pos` and run every applicable provider.
    ///
    /// Returns `None` when no node covers the position (empty or
    /// unparseable text); the caller decides how to report that.
    pub fn complete(&self, doc: &CompletionDocument<'_>, pos: Position) -> Option<Vec<Match>> {
        let tree = parse(doc.text)?;
        let node = node_at_position(tree.root_node(), pos)?;

        let mut matches = Vec::new();
        for provider in &self.providers {
            if provider.can_complete(doc, node) {
                matches.extend(provider.complete(doc, node));
            }
        }
        Some(matches)
    }
}

/// Climb the ancestor chain until a node of one of `kinds` is found.
fn nearest_ancestor<'tree>(node: Node<'tree>, kinds: &[&str]) -> Option<Node<'tree>> {
    let mut current = Some(node);
    while let Some(n) = current {
        if kinds.contains(&n.kind()) {
            return Some(n);
        }
        current = n.parent();
    }
    None
}

#[cfg(test)]
#[path = "../tests/completions_tests.rs"]
mod completions_tests;
