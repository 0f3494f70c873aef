//! Shared building blocks for the Irori chat server and client.
//!
//! - `protocol`: the line-oriented wire format spoken over TCP
//! - `time`: clock abstraction and chat timestamp formatting
//! - `logger`: tracing subscriber setup for the binaries

pub mod logger;
pub mod protocol;
pub mod time;
