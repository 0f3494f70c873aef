//! Thin terminal client for the Irori line-based chat server.
//!
//! Prints every line the server sends and translates typed input into the
//! wire protocol: the first line registers the name, `/`-commands get the
//! participant id appended, and anything else becomes a timestamped chat line.

pub mod error;
pub mod input;
pub mod session;
mod ui;

pub use error::ClientError;
pub use session::run_client;
