//! Terminal chat client.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin irori-client
//! cargo run --bin irori-client -- --host 192.168.0.10 --port 5432
//! ```

use clap::Parser;
use irori_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "irori-client")]
#[command(about = "Terminal client for the Irori line-based chat server", long_about = None)]
struct Args {
    /// Server host to connect to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Server port to connect to
    #[arg(short = 'p', long, default_value_t = 5432)]
    port: u16,
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "warn");

    let args = Args::parse();

    if let Err(e) = irori_client::run_client(&args.host, args.port).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
