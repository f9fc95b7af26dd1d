//! Language-intelligence features for the phpls language server:
//! - Document symbols (nested outline of a PHP file)
//! - Completions (variables, `$this->` members, `$obj->` members)
//! - Workspace-wide fuzzy symbol search

pub mod completions;
pub mod document_symbols;
pub mod fuzzy;
pub mod workspace_symbols;
