//! GoChat client: connects to a GoChat server and relays terminal input.
//!
//! Every line typed is sent to the server as-is; server messages are printed
//! as they arrive. Type `exit` to leave.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin gochat-client
//! cargo run --bin gochat-client -- --host chat.example.com --port 3000
//! ```

use std::time::Duration;

use clap::Parser;

use gochat_client::{ClientConfig, run_client};
use gochat_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "gochat-client")]
#[command(about = "Line-based TCP chat client", long_about = None)]
struct Args {
    /// Server host
    #[arg(short = 'H', long, env = "GOCHAT_HOST", default_value = "localhost")]
    host: String,

    /// Server port
    #[arg(short = 'p', long, env = "GOCHAT_PORT", default_value_t = 8080)]
    port: u16,

    /// Time to keep printing server output after `exit` (milliseconds)
    #[arg(long, default_value_t = 1000)]
    exit_grace_ms: u64,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    let config = ClientConfig {
        host: args.host,
        port: args.port,
        exit_grace: Duration::from_millis(args.exit_grace_ms),
    };

    if let Err(e) = run_client(config).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
