//! Error types for the chat client.

use thiserror::Error;
use tokio_util::codec::LinesCodecError;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server could not be reached
    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading or writing a line on the connection failed
    #[error("connection error: {0}")]
    Connection(#[from] LinesCodecError),
}
