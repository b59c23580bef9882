//! Snapshot server.
//!
//! Accepts observer connections and hands them to the SinkActor.

pub mod server;

pub use server::start_server;
