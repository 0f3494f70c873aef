//! Connection, protocol and HTTP handlers.

pub mod codec;
pub mod command;
pub mod connection;
pub mod http;
