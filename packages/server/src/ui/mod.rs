//! TCP chat server and read-only status API.

mod handler;
mod server;
mod signal;
pub mod state;

pub use handler::command::handle_line;
pub use server::{Server, ServerError};
pub use signal::shutdown_signal;
