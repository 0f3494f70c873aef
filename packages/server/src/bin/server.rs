//! Line-based TCP chat server.
//!
//! Assigns every connection a numeric id, relays chat lines to all named
//! participants and appends them to a transcript file.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin irori-server
//! cargo run --bin irori-server -- --host 0.0.0.0 --port 5432 --http-port 8080
//! ```

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use irori_server::{
    config::{DEFAULT_BASE_ID, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_TRANSCRIPT_PATH, ServerConfig},
    domain::ParticipantId,
    infrastructure::{registry::InMemoryParticipantRegistry, transcript::FileTranscriptStore},
    ui::{Server, state::AppState},
};
use irori_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "irori-server")]
#[command(about = "Line-based TCP chat server with a persistent transcript", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = DEFAULT_HOST)]
    host: String,

    /// Port number of the chat listener
    #[arg(short = 'p', long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Port number of the read-only status API (disabled if omitted)
    #[arg(long)]
    http_port: Option<u16>,

    /// Path of the chat transcript file
    #[arg(short = 't', long, default_value = DEFAULT_TRANSCRIPT_PATH)]
    transcript: PathBuf,

    /// First participant id to assign
    #[arg(long, default_value_t = DEFAULT_BASE_ID)]
    base_id: u32,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            http_port: args.http_port,
            transcript_path: args.transcript,
            base_id: ParticipantId::new(args.base_id),
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let config = ServerConfig::from(Args::parse());

    // Initialize dependencies in order:
    // 1. Registry / Transcript
    // 2. AppState (UseCases)
    // 3. Server
    let registry = Arc::new(InMemoryParticipantRegistry::new(config.base_id));
    let transcript = Arc::new(FileTranscriptStore::new(config.transcript_path.clone()));
    tracing::info!("Chat transcript at {}", config.transcript_path.display());

    let state = Arc::new(AppState::new(registry, transcript));

    let server = match Server::bind(&config, state).await {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Server error: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
