//! Workspace-wide symbol search over indexed documents.

use serde::{Deserialize, Serialize};

use phpls_common::Location;

use crate::document_symbols::{DocumentSymbol, SymbolKind};
use crate::fuzzy;

/// Flat symbol entry returned by `workspace/symbol`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolInformation {
    pub name: String,
    pub kind: SymbolKind,
    pub location: Location,
}

impl SymbolInformation {
    fn new(uri: &str, symbol: &DocumentSymbol) -> Self {
        Self {
            name: symbol.name.clone(),
            kind: symbol.kind,
            location: Location {
                uri: uri.to_string(),
                range: symbol.selection_range,
            },
        }
    }
}

/// Fuzzy-search the top-level symbols of every document. Results come back
/// best score first. An empty query returns nothing.
pub fn search<'a, I>(documents: I, query: &str) -> Vec<SymbolInformation>
where
    I: IntoIterator<Item = (&'a str, &'a [DocumentSymbol])>,
{
    if query.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(i64, SymbolInformation)> = Vec::new();
    for (uri, symbols) in documents {
        for symbol in symbols {
            if let Some(score) = fuzzy::score(query, &symbol.name) {
                scored.push((score, SymbolInformation::new(uri, symbol)));
            }
        }
    }
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, info)| info).collect()
}

#[cfg(test)]
#[path = "../tests/workspace_symbols_tests.rs"]
mod workspace_symbols_tests;
