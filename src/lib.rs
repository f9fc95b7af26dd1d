//! phpls: PHP language server glue.
//!
//! The analysis itself lives in the `phpls-*` workspace crates; this crate
//! adds what a running server needs around it: Content-Length framing over
//! stdio, the JSON-RPC wire types, the in-memory document store, and the
//! workspace file scanner. The `phpls-server` binary wires these into a
//! synchronous dispatch loop.

pub mod protocol;
pub mod rpc;
pub mod scanner;
pub mod workspace;
