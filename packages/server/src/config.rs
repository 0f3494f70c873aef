//! Server configuration.

use std::path::PathBuf;

use irori_shared::protocol::ParticipantId;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5432;
pub const DEFAULT_TRANSCRIPT_PATH: &str = "ChatRecord.txt";
/// First id handed out to a connecting client
pub const DEFAULT_BASE_ID: u32 = 10000;

/// Runtime configuration of the chat server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host address the chat listener (and status API) bind to
    pub host: String,
    /// Port of the line-based chat listener
    pub port: u16,
    /// Port of the read-only status API; disabled when `None`
    pub http_port: Option<u16>,
    /// Location of the append-only chat transcript
    pub transcript_path: PathBuf,
    /// Smallest id assigned to participants
    pub base_id: ParticipantId,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            http_port: None,
            transcript_path: PathBuf::from(DEFAULT_TRANSCRIPT_PATH),
            base_id: ParticipantId::new(DEFAULT_BASE_ID),
        }
    }
}

impl ServerConfig {
    pub fn chat_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn http_addr(&self) -> Option<String> {
        self.http_port.map(|port| format!("{}:{}", self.host, port))
    }
}
