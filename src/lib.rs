//! Live in-memory mirror of a directory tree.
//!
//! The mirror is built by a recursive scan, kept current by rescanning only
//! the directories that change, and pushed whole as JSON to a single
//! websocket observer after every change.
//!
//! ```text
//! notify ─► actor::fs ─► actor::mirror (tree::scan + tree::splice) ─► actor::sink ─► observer
//! ```

pub mod actor;
pub mod cli;
pub mod config;
pub mod core;
pub mod logger;
pub mod serve;
pub mod tree;
pub mod utils;
