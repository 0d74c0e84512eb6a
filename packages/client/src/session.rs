//! TCP client session management.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::{
    net::{TcpStream, tcp::OwnedReadHalf},
    sync::mpsc,
};
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec};

use crate::{
    domain::{EXIT_COMMAND, is_exit_command, normalize_input},
    error::ClientError,
};

use super::{formatter::MessageFormatter, ui::redisplay_prompt};

/// How a session that did not fail came to an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user typed `exit`
    Exited,
    /// The input source closed (Ctrl+D / Ctrl+C); `exit` was sent on the user's behalf
    InputClosed,
}

/// Run the client session over an established connection.
///
/// Lines from `input` are forwarded as typed. After `exit` is sent the
/// session keeps printing server output for `exit_grace`, then half-closes
/// the connection.
///
/// # Errors
///
/// Returns [`ClientError::ConnectionLost`] if the server closes the
/// connection or a write fails before the user exits.
pub async fn run_client_session(
    stream: TcpStream,
    mut input: mpsc::UnboundedReceiver<String>,
    exit_grace: Duration,
) -> Result<SessionEnd, ClientError> {
    let (read_half, write_half) = stream.into_split();
    let mut writer = FramedWrite::new(write_half, LinesCodec::new());

    // Spawn a task to print messages from the server as they come
    let mut read_task = tokio::spawn(read_loop(read_half));

    loop {
        tokio::select! {
            reason = &mut read_task => {
                let reason = reason.unwrap_or_else(|e| e.to_string());
                return Err(ClientError::ConnectionLost(reason));
            }
            line = input.recv() => {
                let (line, end) = match line {
                    Some(line) => (normalize_input(&line).to_string(), SessionEnd::Exited),
                    None => (EXIT_COMMAND.to_string(), SessionEnd::InputClosed),
                };

                writer
                    .send(line.as_str())
                    .await
                    .map_err(|e| ClientError::ConnectionLost(e.to_string()))?;

                if is_exit_command(&line) {
                    println!("{}", MessageFormatter::format_exiting());

                    // Let the final server output (e.g. "Bye!") arrive
                    tokio::time::sleep(exit_grace).await;

                    if let Err(e) = SinkExt::<&str>::close(&mut writer).await {
                        tracing::debug!("Failed to close connection: {}", e);
                    }
                    read_task.abort();

                    println!("{}", MessageFormatter::format_goodbye());
                    return Ok(end);
                }
            }
        }
    }
}

/// Print every line from the server until it closes the connection.
///
/// Returns the reason the connection ended.
async fn read_loop(read_half: OwnedReadHalf) -> String {
    let mut lines = FramedRead::new(read_half, LinesCodec::new());

    let reason = loop {
        match lines.next().await {
            Some(Ok(line)) => {
                println!("{}", MessageFormatter::format_incoming(&line));
                redisplay_prompt();
            }
            Some(Err(e)) => {
                tracing::warn!("Read error: {}", e);
                break e.to_string();
            }
            None => break "EOF".to_string(),
        }
    };

    println!("{}", MessageFormatter::format_server_down(&reason));
    reason
}
