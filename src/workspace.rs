//! In-memory document store and workspace index.
//!
//! Documents are synced whole: every `put`/`update` replaces the stored
//! text and recomputes the syntax tree and symbol outline from scratch.
//! Nothing is patched incrementally.

use std::path::PathBuf;

use rustc_hash::FxHashMap;
use tree_sitter::Tree;

use phpls_common::Position;
use phpls_lsp::completions::{CompletionDocument, CompletionEngine, Match};
use phpls_lsp::document_symbols::{self, DocumentSymbol};
use phpls_lsp::workspace_symbols::{self, SymbolInformation};

use crate::scanner::Scanner;

/// A stored document and everything derived from its text.
pub struct Document {
    pub uri: String,
    pub text: String,
    pub version: i64,
    pub tree: Option<Tree>,
    pub symbols: Vec<DocumentSymbol>,
}

impl Document {
    fn new(uri: String, text: String, version: i64) -> Self {
        let tree = phpls_syntax::parse(&text);
        let symbols = document_symbols::extract(&text);
        Self {
            uri,
            text,
            version,
            tree,
            symbols,
        }
    }
}

/// The document store plus the workspace root it was indexed from.
pub struct Workspace {
    documents: FxHashMap<String, Document>,
    root_path: Option<PathBuf>,
    completion_engine: CompletionEngine,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            documents: FxHashMap::default(),
            root_path: None,
            completion_engine: CompletionEngine::new(),
        }
    }

    pub fn set_root(&mut self, root: impl Into<PathBuf>) {
        self.root_path = Some(root.into());
    }

    pub fn document(&self, uri: &str) -> Option<&Document> {
        self.documents.get(uri)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Store a document, replacing any previous entry wholesale.
    pub fn put(&mut self, uri: &str, text: String) {
        self.documents
            .insert(uri.to_string(), Document::new(uri.to_string(), text, 0));
    }

    /// Replace a document's text with a new full-sync snapshot.
    pub fn update(&mut self, uri: &str, text: String) {
        let version = self.documents.get(uri).map_or(0, |d| d.version + 1);
        self.documents
            .insert(uri.to_string(), Document::new(uri.to_string(), text, version));
    }

    pub fn document_symbols(&self, uri: &str) -> Option<&[DocumentSymbol]> {
        self.documents.get(uri).map(|d| d.symbols.as_slice())
    }

    /// Fuzzy search over the top-level symbols of every stored document.
    pub fn workspace_symbols(&self, query: &str) -> Vec<SymbolInformation> {
        workspace_symbols::search(
            self.documents
                .iter()
                .map(|(uri, doc)| (uri.as_str(), doc.symbols.as_slice())),
            query,
        )
    }

    /// Completion candidates at a cursor position. The cursor sits after the
    /// character just typed, so resolution targets the column before it.
    ///
    /// `None` when the document is unknown or no node covers the position.
    pub fn completion(&self, uri: &str, position: Position) -> Option<Vec<Match>> {
        let document = self.documents.get(uri)?;
        let target = Position::new(position.line, position.character.saturating_sub(1));
        let doc = CompletionDocument {
            text: &document.text,
            symbols: &document.symbols,
        };
        self.completion_engine.complete(&doc, target)
    }

    /// Index every `.php` file under the workspace root. URIs already in the
    /// store are left untouched, so re-entry is idempotent. `progress` is
    /// called with `(relative_path, percent)` after each file and `done`
    /// exactly once at the end, also when there is nothing to scan.
    pub fn index(&mut self, mut progress: impl FnMut(&str, u32), done: impl FnOnce()) {
        let Some(root) = self.root_path.clone() else {
            tracing::warn!("no workspace root set, skipping indexing");
            done();
            return;
        };

        let scanner = Scanner::new(&root);
        let files = scanner.scan(&["php"]);
        let total = files.len();

        for (i, relative) in files.iter().enumerate() {
            let uri = format!("file://{}", root.join(relative).display());
            if !self.documents.contains_key(&uri) {
                let text = scanner.file_content(relative);
                self.put(&uri, text);
            }
            let percent = ((i + 1) * 100 / total) as u32;
            progress(relative, percent);
        }

        tracing::info!("indexed {total} files under {}", root.display());
        done();
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}
