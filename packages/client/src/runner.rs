//! Client execution logic.

use std::time::Duration;

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::{net::TcpStream, sync::mpsc};

use super::{
    error::ClientError,
    formatter::MessageFormatter,
    session::{SessionEnd, run_client_session},
    ui::PROMPT,
};

/// Connection settings for [`run_client`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    /// How long to keep printing server output after `exit`
    pub exit_grace: Duration,
}

impl ClientConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Connect to the server and run an interactive session on the terminal.
///
/// # Errors
///
/// Returns [`ClientError::Connection`] if the server cannot be reached and
/// [`ClientError::ConnectionLost`] if it goes away before the user exits.
pub async fn run_client(config: ClientConfig) -> Result<(), ClientError> {
    println!("{}", MessageFormatter::format_hello());

    let addr = config.addr();
    let stream = TcpStream::connect(&addr)
        .await
        .map_err(|source| ClientError::Connection {
            addr: addr.clone(),
            source,
        })?;
    tracing::info!("Connected to chat server at {}", addr);

    let input = spawn_readline();

    match run_client_session(stream, input, config.exit_grace).await? {
        SessionEnd::Exited => tracing::info!("Client session ended normally"),
        SessionEnd::InputClosed => tracing::info!("Input closed, session ended"),
    }

    Ok(())
}

/// Spawn a blocking thread for rustyline (synchronous readline) and return
/// the channel its lines arrive on.
///
/// The channel closes on Ctrl+C, Ctrl+D or a terminal error.
fn spawn_readline() -> mpsc::UnboundedReceiver<String> {
    let (input_tx, input_rx) = mpsc::unbounded_channel::<String>();

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(PROMPT) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        rl.add_history_entry(line.as_str()).ok();
                    }
                    if input_tx.send(line).is_err() {
                        // Session ended, exit thread
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    input_rx
}
