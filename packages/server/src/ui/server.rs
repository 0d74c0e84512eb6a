//! Server execution logic.

use std::{net::SocketAddr, sync::Arc};

use tokio::{
    net::{TcpListener, TcpStream},
    task::JoinSet,
};
use tokio_util::{sync::CancellationToken, task::AbortOnDropHandle};

use crate::domain::SessionId;

use super::{
    error::ServerError, handler::handle_connection, signal::shutdown_signal, state::AppState,
};

/// Line-based TCP chat server
///
/// This struct owns the shared application state and provides methods to run
/// the accept loop.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(AppState::new(ServerConfig::default()));
/// server.run().await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Bind the configured address and serve until Ctrl+C / SIGTERM.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Bind`] if the listening socket cannot be bound.
    pub async fn run(self) -> Result<(), ServerError> {
        let addr = self.state.config.bind_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.clone(),
                source,
            })?;

        tracing::info!("GoChat server listening on {}", listener.local_addr()?);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        let shutdown = CancellationToken::new();
        let trigger = shutdown.clone();
        tokio::spawn(async move {
            shutdown_signal().await;
            trigger.cancel();
        });

        self.serve(listener, shutdown).await
    }

    /// Accept connections on `listener` until `shutdown` is cancelled, then
    /// drain live sessions.
    ///
    /// A failed `accept` is logged and skipped; it never stops the server.
    pub async fn serve(
        self,
        listener: TcpListener,
        shutdown: CancellationToken,
    ) -> Result<(), ServerError> {
        let mut sessions = JoinSet::new();

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        self.spawn_session(&mut sessions, stream, peer, shutdown.child_token());
                    }
                    Err(e) => tracing::warn!("Failed to accept connection: {}", e),
                },
                Some(_) = sessions.join_next(), if !sessions.is_empty() => {}
            }
        }

        drop(listener);
        tracing::info!("Stopped accepting connections");
        self.drain(sessions).await;
        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// Spawn one supervised session task.
    ///
    /// The connection runs in its own task so a panic stays contained. If it
    /// panics, the supervisor removes the session from the roster on its
    /// behalf and the other sessions see it leave. Aborting the supervisor
    /// aborts the connection task with it.
    fn spawn_session(
        &self,
        sessions: &mut JoinSet<()>,
        stream: TcpStream,
        peer: SocketAddr,
        shutdown: CancellationToken,
    ) {
        let session_id = SessionId::generate();
        let state = self.state.clone();
        tracing::info!("Accepted connection from {} (session {})", peer, session_id);

        sessions.spawn(async move {
            let task = AbortOnDropHandle::new(tokio::spawn(handle_connection(
                stream,
                peer,
                session_id,
                state.clone(),
                shutdown,
            )));

            if let Err(e) = task.await
                && e.is_panic()
            {
                tracing::error!("Session {} ({}) panicked, cleaning up", session_id, peer);
                state
                    .disconnect_participant_usecase
                    .execute(session_id)
                    .await;
            }
        });
    }

    async fn drain(&self, mut sessions: JoinSet<()>) {
        if sessions.is_empty() {
            return;
        }

        tracing::info!("Waiting for {} sessions to close", sessions.len());
        let drain_timeout = self.state.config.drain_timeout;
        let drained = tokio::time::timeout(drain_timeout, async {
            while sessions.join_next().await.is_some() {}
        })
        .await;

        if drained.is_err() {
            tracing::warn!(
                "{} sessions still open after {:?}, aborting them ({} nicknames registered)",
                sessions.len(),
                drain_timeout,
                self.state.roster.count().await
            );
            sessions.shutdown().await;
        }
    }
}
