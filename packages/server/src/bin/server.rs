//! GoChat server: a line-based TCP chat server.
//!
//! Clients log in with `NICK <name>`; every other line they send is relayed to
//! all other logged-in clients. `exit` closes the connection.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin gochat-server
//! cargo run --bin gochat-server -- --host 127.0.0.1 --port 3000
//! ```

use std::time::Duration;

use clap::Parser;

use gochat_server::{
    config::{
        DEFAULT_HOST, DEFAULT_MAX_LINE_LENGTH, DEFAULT_OUTBOUND_QUEUE_CAPACITY, DEFAULT_PORT,
        ServerConfig,
    },
    ui::{Server, state::AppState},
};
use gochat_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "gochat-server")]
#[command(about = "Line-based TCP chat server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "GOCHAT_HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "GOCHAT_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Longest accepted input line in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_LINE_LENGTH)]
    max_line_length: usize,

    /// Lines queued for a slow client before further lines to it are dropped
    #[arg(long, default_value_t = DEFAULT_OUTBOUND_QUEUE_CAPACITY)]
    outbound_queue_capacity: usize,

    /// Time a closing session may take to flush queued output (milliseconds)
    #[arg(long, default_value_t = 1000)]
    flush_timeout_ms: u64,

    /// Time shutdown waits for live sessions to close (milliseconds)
    #[arg(long, default_value_t = 5000)]
    drain_timeout_ms: u64,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            max_line_length: args.max_line_length,
            outbound_queue_capacity: args.outbound_queue_capacity,
            flush_timeout: Duration::from_millis(args.flush_timeout_ms),
            drain_timeout: Duration::from_millis(args.drain_timeout_ms),
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();
    let config = ServerConfig::from(args);

    tracing::info!("Welcome to GoChat Server 1.0");

    let server = Server::new(AppState::new(config));
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
