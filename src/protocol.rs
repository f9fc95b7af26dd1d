//! JSON-RPC 2.0 envelopes and LSP payload types for the methods the server
//! speaks: `initialize`, `textDocument/didOpen`, `textDocument/didChange`,
//! `textDocument/documentSymbol`, `workspace/symbol`,
//! `textDocument/completion` and the `$/progress` notification family.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use phpls_common::Position;

pub const JSONRPC_VERSION: &str = "2.0";

/// Method params could not be deserialized.
pub const INVALID_PARAMS: i64 = -32602;
/// The handler failed while producing a result.
pub const INTERNAL_ERROR: i64 = -32603;

/// An inbound message. Requests carry an `id`; notifications do not.
#[derive(Debug, Deserialize)]
pub struct Request {
    pub id: Option<i64>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

/// A successful response to a request.
#[derive(Debug, Serialize)]
pub struct Response<T> {
    pub jsonrpc: &'static str,
    pub id: i64,
    pub result: T,
}

impl<T: Serialize> Response<T> {
    pub fn new(id: i64, result: T) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ResponseError {
    pub code: i64,
    pub message: String,
}

/// An error response to a request.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub jsonrpc: &'static str,
    pub id: i64,
    pub error: ResponseError,
}

impl ErrorResponse {
    pub fn new(id: i64, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            error: ResponseError {
                code,
                message: message.into(),
            },
        }
    }
}

/// A server-initiated notification.
#[derive(Debug, Serialize)]
pub struct Notification<T> {
    pub jsonrpc: &'static str,
    pub method: &'static str,
    pub params: T,
}

impl<T: Serialize> Notification<T> {
    pub fn new(method: &'static str, params: T) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            method,
            params,
        }
    }
}

// ---------------------------------------------------------------------------
// initialize

#[derive(Debug, Default, Deserialize)]
pub struct InitializeParams {
    #[serde(rename = "rootPath")]
    pub root_path: Option<String>,
    #[serde(rename = "rootUri")]
    pub root_uri: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InitializeResult {
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    /// 1 = full document sync.
    #[serde(rename = "textDocumentSync")]
    pub text_document_sync: u8,
    #[serde(rename = "documentSymbolProvider")]
    pub document_symbol_provider: bool,
    #[serde(rename = "workspaceSymbolProvider")]
    pub workspace_symbol_provider: bool,
    #[serde(rename = "completionProvider")]
    pub completion_provider: CompletionOptions,
}

#[derive(Debug, Serialize)]
pub struct CompletionOptions {}

#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: &'static str,
    pub version: &'static str,
}

impl InitializeResult {
    pub fn new() -> Self {
        Self {
            capabilities: ServerCapabilities {
                text_document_sync: 1,
                document_symbol_provider: true,
                workspace_symbol_provider: true,
                completion_provider: CompletionOptions {},
            },
            server_info: ServerInfo {
                name: "phpls",
                version: env!("CARGO_PKG_VERSION"),
            },
        }
    }
}

impl Default for InitializeResult {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// textDocument notifications

#[derive(Debug, Deserialize)]
pub struct TextDocumentItem {
    pub uri: String,
    #[serde(default)]
    pub version: i64,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct TextDocumentIdentifier {
    pub uri: String,
}

#[derive(Debug, Deserialize)]
pub struct DidOpenParams {
    #[serde(rename = "textDocument")]
    pub text_document: TextDocumentItem,
}

#[derive(Debug, Deserialize)]
pub struct TextDocumentContentChangeEvent {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct DidChangeParams {
    #[serde(rename = "textDocument")]
    pub text_document: TextDocumentItem,
    #[serde(rename = "contentChanges")]
    pub content_changes: Vec<TextDocumentContentChangeEvent>,
}

// ---------------------------------------------------------------------------
// requests

#[derive(Debug, Deserialize)]
pub struct DocumentSymbolParams {
    #[serde(rename = "textDocument")]
    pub text_document: TextDocumentIdentifier,
}

#[derive(Debug, Deserialize)]
pub struct WorkspaceSymbolParams {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct TextDocumentPositionParams {
    #[serde(rename = "textDocument")]
    pub text_document: TextDocumentIdentifier,
    pub position: Position,
}

#[derive(Debug, Serialize)]
pub struct CompletionItem {
    pub label: String,
    pub kind: phpls_lsp::completions::CompletionItemKind,
}

// ---------------------------------------------------------------------------
// $/progress

pub const PROGRESS_METHOD: &str = "$/progress";

#[derive(Debug, Serialize)]
pub struct ProgressParams {
    pub token: &'static str,
    pub value: ProgressValue,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ProgressValue {
    Begin {
        title: String,
        cancellable: bool,
    },
    Report {
        message: String,
        percentage: u32,
    },
    End {
        message: String,
    },
}
