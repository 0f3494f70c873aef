//! Line-based TCP chat server.
//!
//! Clients connect over a persistent text connection, are assigned a numeric
//! id, register a display name, and then exchange chat lines that are relayed
//! to every participant and appended to a durable transcript.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
