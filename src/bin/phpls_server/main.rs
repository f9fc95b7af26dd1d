//! phpls-server: PHP language server over stdio.
//!
//! Speaks Content-Length framed JSON-RPC on stdin/stdout. Logs go to a file
//! so stdout stays clean for the protocol. Dispatch is single-threaded and
//! synchronous: each message is fully handled, including any writes back to
//! the client, before the next one is read.

use std::io::{BufRead, BufReader, Write};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use serde::de::DeserializeOwned;

use phpls::protocol::{
    self, DidChangeParams, DidOpenParams, DocumentSymbolParams, ErrorResponse, InitializeParams,
    InitializeResult, Notification, ProgressParams, ProgressValue, Request, Response,
    TextDocumentPositionParams, WorkspaceSymbolParams,
};
use phpls::rpc;
use phpls::workspace::Workspace;

const INDEXING_TOKEN: &str = "indexing";

/// phpls-server: PHP language server
#[derive(Parser, Debug)]
#[command(name = "phpls-server", version, about = "PHP language server")]
struct ServerArgs {
    /// Where to write the server log.
    #[arg(long = "log-file", default_value = "/tmp/phpls-server.log")]
    log_file: PathBuf,

    /// Log filter directive (e.g. "debug", "phpls=trace").
    #[arg(long = "log-level", default_value = "debug")]
    log_level: String,

    /// Workspace root override; defaults to the root the client sends in
    /// `initialize`.
    #[arg(long = "root")]
    root: Option<PathBuf>,
}

struct Server<W: Write> {
    workspace: Workspace,
    out: W,
    root_override: Option<PathBuf>,
}

impl<W: Write> Server<W> {
    fn new(out: W, root_override: Option<PathBuf>) -> Self {
        Self {
            workspace: Workspace::new(),
            out,
            root_override,
        }
    }

    fn dispatch(&mut self, request: Request) -> Result<()> {
        match request.method.as_str() {
            "initialize" => self.handle_initialize(request),
            "textDocument/didOpen" => self.handle_did_open(request),
            "textDocument/didChange" => self.handle_did_change(request),
            "textDocument/documentSymbol" => self.handle_document_symbol(request),
            "workspace/symbol" => self.handle_workspace_symbol(request),
            "textDocument/completion" => self.handle_completion(request),
            other => {
                tracing::debug!("ignoring unhandled method: {other}");
                Ok(())
            }
        }
    }

    fn handle_initialize(&mut self, request: Request) -> Result<()> {
        let Some(params) = self.parse_params::<InitializeParams>(&request)? else {
            return Ok(());
        };

        let root = self.root_override.clone().or_else(|| {
            params
                .root_path
                .clone()
                .or_else(|| {
                    params
                        .root_uri
                        .as_deref()
                        .and_then(|uri| uri.strip_prefix("file://"))
                        .map(str::to_string)
                })
                .map(PathBuf::from)
        });

        if let Some(id) = request.id {
            self.send(&Response::new(id, InitializeResult::new()))?;
        }

        let Some(root) = root else {
            tracing::warn!("initialize carried no workspace root, skipping indexing");
            return Ok(());
        };
        tracing::info!("indexing workspace root {}", root.display());
        self.workspace.set_root(root);

        self.send_progress(ProgressValue::Begin {
            title: "Indexing PHP workspace".to_string(),
            cancellable: false,
        })?;

        let Server { workspace, out, .. } = self;
        let mut finished = false;
        workspace.index(
            |path, percent| {
                let note = Notification::new(
                    protocol::PROGRESS_METHOD,
                    ProgressParams {
                        token: INDEXING_TOKEN,
                        value: ProgressValue::Report {
                            message: path.to_string(),
                            percentage: percent,
                        },
                    },
                );
                if let Err(e) = send_to(out, &note) {
                    tracing::warn!("failed to send progress report: {e:#}");
                }
            },
            || finished = true,
        );

        if finished {
            self.send_progress(ProgressValue::End {
                message: "Indexing complete".to_string(),
            })?;
        }
        Ok(())
    }

    fn handle_did_open(&mut self, request: Request) -> Result<()> {
        let Some(params) = self.parse_params::<DidOpenParams>(&request)? else {
            return Ok(());
        };
        let doc = params.text_document;
        tracing::debug!("opened {} (version {})", doc.uri, doc.version);
        self.workspace.put(&doc.uri, doc.text);
        Ok(())
    }

    fn handle_did_change(&mut self, request: Request) -> Result<()> {
        let Some(mut params) = self.parse_params::<DidChangeParams>(&request)? else {
            return Ok(());
        };
        if params.content_changes.is_empty() {
            tracing::warn!("didChange with no content changes for {}", params.text_document.uri);
            return Ok(());
        }
        // Full sync: the first entry is the whole new text.
        if params.content_changes.len() > 1 {
            tracing::warn!(
                "didChange carried {} content changes, using the first",
                params.content_changes.len()
            );
        }
        let change = params.content_changes.swap_remove(0);
        self.workspace.update(&params.text_document.uri, change.text);
        Ok(())
    }

    fn handle_document_symbol(&mut self, request: Request) -> Result<()> {
        let Some(params) = self.parse_params::<DocumentSymbolParams>(&request)? else {
            return Ok(());
        };
        let Some(id) = request.id else {
            return Ok(());
        };
        let symbols = self
            .workspace
            .document_symbols(&params.text_document.uri)
            .unwrap_or(&[])
            .to_vec();
        self.send(&Response::new(id, symbols))
    }

    fn handle_workspace_symbol(&mut self, request: Request) -> Result<()> {
        let Some(params) = self.parse_params::<WorkspaceSymbolParams>(&request)? else {
            return Ok(());
        };
        let Some(id) = request.id else {
            return Ok(());
        };
        let results = self.workspace.workspace_symbols(&params.query);
        self.send(&Response::new(id, results))
    }

    fn handle_completion(&mut self, request: Request) -> Result<()> {
        let Some(params) = self.parse_params::<TextDocumentPositionParams>(&request)? else {
            return Ok(());
        };
        let Some(id) = request.id else {
            return Ok(());
        };

        match self
            .workspace
            .completion(&params.text_document.uri, params.position)
        {
            Some(matches) => {
                let items: Vec<protocol::CompletionItem> = matches
                    .into_iter()
                    .map(|m| protocol::CompletionItem {
                        label: m.text,
                        kind: m.kind,
                    })
                    .collect();
                self.send(&Response::new(id, items))
            }
            None => self.send(&ErrorResponse::new(
                id,
                protocol::INTERNAL_ERROR,
                "no completable token at position",
            )),
        }
    }

    /// Deserialize request params. Malformed params on a request produce an
    /// InvalidParams error response; on a notification they are logged and
    /// dropped. `Ok(None)` means the caller should stop handling.
    fn parse_params<T: DeserializeOwned>(&mut self, request: &Request) -> Result<Option<T>> {
        match serde_json::from_value(request.params.clone()) {
            Ok(params) => Ok(Some(params)),
            Err(e) => {
                tracing::warn!("invalid params for {}: {e}", request.method);
                if let Some(id) = request.id {
                    self.send(&ErrorResponse::new(
                        id,
                        protocol::INVALID_PARAMS,
                        format!("invalid params: {e}"),
                    ))?;
                }
                Ok(None)
            }
        }
    }

    fn send<T: Serialize>(&mut self, message: &T) -> Result<()> {
        send_to(&mut self.out, message)
    }

    fn send_progress(&mut self, value: ProgressValue) -> Result<()> {
        self.send(&Notification::new(
            protocol::PROGRESS_METHOD,
            ProgressParams {
                token: INDEXING_TOKEN,
                value,
            },
        ))
    }
}

fn send_to<T: Serialize>(out: &mut impl Write, message: &T) -> Result<()> {
    let framed = rpc::encode_message(message)?;
    out.write_all(framed.as_bytes())
        .context("failed to write message")?;
    out.flush().context("failed to flush message")?;
    Ok(())
}

fn run<W: Write>(server: &mut Server<W>, input: &mut impl BufRead) -> Result<()> {
    loop {
        let body = match rpc::read_message(input) {
            Ok(Some(body)) => body,
            Ok(None) => break,
            Err(e) => {
                tracing::error!("failed to read message: {e:#}");
                continue;
            }
        };

        let request: Request = match serde_json::from_slice(&body) {
            Ok(request) => request,
            Err(e) => {
                tracing::error!("failed to parse message: {e}");
                continue;
            }
        };

        let method = request.method.clone();
        // One bad message must not take the server down; the store survives
        // and the loop moves on.
        match catch_unwind(AssertUnwindSafe(|| server.dispatch(request))) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!("error handling {method}: {e:#}"),
            Err(_) => tracing::error!("panic while handling {method}"),
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = ServerArgs::parse();

    let log_file = std::fs::File::create(&args.log_file)
        .with_context(|| format!("failed to open log file {}", args.log_file.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_new(&args.log_level)
                .with_context(|| format!("invalid log level {:?}", args.log_level))?,
        )
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    tracing::info!("phpls-server {} starting", env!("CARGO_PKG_VERSION"));

    let mut server = Server::new(std::io::stdout(), args.root);
    let mut stdin = BufReader::new(std::io::stdin());
    run(&mut server, &mut stdin)
}
