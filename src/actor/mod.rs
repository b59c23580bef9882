//! Actor System for the Live Mirror
//!
//! Message-passing concurrency for watch mode:
//!
//! ```text
//! FsActor --> MirrorActor --> SinkActor --> observer
//! (watch)     (scan+splice)   (push)
//! ```
//!
//! # Module Structure
//!
//! - `messages` - Message types for inter-actor communication
//! - `fs` - File system watcher with coalescing
//! - `mirror` - Change event loop, sole writer of the mirror
//! - `sink` - Observer registration and snapshot push
//! - `coordinator` - Wires up and runs actors

pub mod coordinator;
pub mod fs;
pub mod messages;
pub mod mirror;
pub mod sink;

pub use coordinator::{Coordinator, Exit};
