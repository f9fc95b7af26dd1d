//! Common types for the phpls language server.
//!
//! This crate provides the foundational types shared by all phpls crates:
//! Position/Range/Location for line/column source locations.

pub mod position;
pub use position::{Location, Position, Range};
