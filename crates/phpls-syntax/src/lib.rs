//! tree-sitter PHP parsing for the phpls language server.
//!
//! The syntax tree is externally owned: callers hold the [`tree_sitter::Tree`]
//! and all traversal works on borrowed [`tree_sitter::Node`] handles.

pub mod locator;
pub mod parser;

pub use locator::node_at_position;
pub use parser::{find_nodes_by_kind, first_descendant_of_kind, node_text, parse};
