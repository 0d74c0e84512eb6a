//! Per-connection handler.
//!
//! Each accepted connection gets one reader loop (this function) and one
//! writer task. The writer owns the socket's write half and drains the
//! session's outbound channel; everything else only ever queues lines.

use std::{net::SocketAddr, sync::Arc};

use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::net::{TcpStream, tcp::OwnedWriteHalf};
use tokio_util::{
    codec::{FramedRead, FramedWrite},
    sync::CancellationToken,
    task::AbortOnDropHandle,
};

use crate::{
    domain::{MessagePusher, Session, SessionId},
    infrastructure::{
        codec::{ChatLineCodec, InboundLine},
        message_pusher::{ChannelMessagePusher, OutboundReceiver},
    },
    ui::state::AppState,
    usecase::Flow,
};

/// Why the reader loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CloseReason {
    Exit,
    Eof,
    ReadError,
    WriteError,
    Shutdown,
}

/// Run one session from greeting to teardown.
pub async fn handle_connection(
    stream: TcpStream,
    peer: SocketAddr,
    session_id: SessionId,
    state: Arc<AppState>,
    shutdown: CancellationToken,
) {
    let max_line_length = state.config.max_line_length;
    let (read_half, write_half) = stream.into_split();
    let mut lines = FramedRead::new(read_half, ChatLineCodec::new(max_line_length));
    let sink = FramedWrite::new(write_half, ChatLineCodec::new(max_line_length));

    let (pusher, rx) = ChannelMessagePusher::channel(state.config.outbound_queue_capacity);
    let mut writer = pusher_loop(rx, sink, session_id);
    let mut writer_done = false;

    let pusher: Arc<dyn MessagePusher> = Arc::new(pusher);
    let mut session = Session::new(session_id, pusher);
    let engine = state.engine.clone();

    engine.greet(&session).await;

    let reason = loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                engine.notify_shutdown(&session).await;
                break CloseReason::Shutdown;
            }
            _ = &mut writer, if !writer_done => {
                writer_done = true;
                break CloseReason::WriteError;
            }
            frame = lines.next() => match frame {
                Some(Ok(InboundLine::Line(line))) => {
                    if engine.handle_line(&mut session, &line).await == Flow::Close {
                        break CloseReason::Exit;
                    }
                }
                Some(Ok(InboundLine::TooLong)) => {
                    engine.reject_oversized(&session, max_line_length).await;
                }
                Some(Ok(InboundLine::InvalidUtf8)) => {
                    engine.reject_invalid_utf8(&session).await;
                }
                Some(Err(e)) => {
                    tracing::debug!("Read error on session {} ({}): {}", session_id, peer, e);
                    break CloseReason::ReadError;
                }
                None => break CloseReason::Eof,
            }
        }
    };

    tracing::info!(
        "Session {} ({}) closing: {:?}",
        session_id,
        peer,
        reason
    );
    engine.teardown(&mut session).await;

    // Dropping the last sender lets the writer flush what is queued
    // (e.g. "Bye!") and shut the socket down.
    drop(session);
    if !writer_done
        && tokio::time::timeout(state.config.flush_timeout, &mut writer)
            .await
            .is_err()
    {
        tracing::warn!(
            "Session {} did not flush within {:?}, closing anyway",
            session_id,
            state.config.flush_timeout
        );
        writer.abort();
    }
}

/// Spawns a task that receives lines from the session's outbound channel and
/// writes them to the socket.
///
/// The task ends when every sender is gone or a write fails. On a clean end
/// the write half is shut down, so the peer sees EOF. Dropping the returned
/// handle aborts the task, so it never outlives its connection.
fn pusher_loop(
    mut rx: OutboundReceiver,
    mut sink: FramedWrite<OwnedWriteHalf, ChatLineCodec>,
    session_id: SessionId,
) -> AbortOnDropHandle<()> {
    AbortOnDropHandle::new(tokio::spawn(async move {
        while let Some(line) = rx.recv().await {
            if let Err(e) = sink.send(line).await {
                tracing::warn!("Error writing to session {}: {}", session_id, e);
                return;
            }
        }
        if let Err(e) = SinkExt::<String>::close(&mut sink).await {
            tracing::debug!("Error closing session {}: {}", session_id, e);
        }
    }))
}
