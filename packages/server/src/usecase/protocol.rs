//! Protocol engine.
//!
//! Drives one session's state machine, one parsed line at a time, and
//! dispatches to the login, chat and disconnect use cases.
//!
//! ```text
//! Unauthenticated --NICK ok--> Authenticated
//!        |                          |
//!        +----exit / EOF / error----+--> Closed
//! ```

use std::sync::Arc;

use crate::domain::{Command, Nickname, Reply, Session, SessionState};

use super::{
    broadcaster::Broadcaster, disconnect_participant::DisconnectParticipantUseCase,
    error::LoginError, login::LoginUseCase, send_message::SendMessageUseCase,
};

/// What the connection loop should do after a line has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Close,
}

/// Per-line protocol handling shared by all connections.
pub struct ProtocolEngine {
    login: Arc<LoginUseCase>,
    send_message: Arc<SendMessageUseCase>,
    disconnect: Arc<DisconnectParticipantUseCase>,
    broadcaster: Arc<Broadcaster>,
}

impl ProtocolEngine {
    pub fn new(
        login: Arc<LoginUseCase>,
        send_message: Arc<SendMessageUseCase>,
        disconnect: Arc<DisconnectParticipantUseCase>,
        broadcaster: Arc<Broadcaster>,
    ) -> Self {
        Self {
            login,
            send_message,
            disconnect,
            broadcaster,
        }
    }

    /// Send the connect banner.
    pub async fn greet(&self, session: &Session) {
        self.reply(session, &Reply::Greeting.to_string()).await;
    }

    /// Handle one input line.
    pub async fn handle_line(&self, session: &mut Session, line: &str) -> Flow {
        if session.is_closed() {
            return Flow::Close;
        }

        tracing::debug!("Message received from session {}: {}", session.id(), line);

        match Command::parse(line) {
            Command::Empty => Flow::Continue,
            Command::Exit => {
                self.reply(session, &Reply::Bye.to_string()).await;
                Flow::Close
            }
            Command::Nick(name) => {
                self.handle_nick(session, &name).await;
                Flow::Continue
            }
            Command::Chat(text) => {
                match session.nickname() {
                    Some(nickname) => {
                        self.send_message.execute(nickname, &text).await;
                    }
                    None => self.reply(session, &Reply::MustLogin.to_string()).await,
                }
                Flow::Continue
            }
        }
    }

    /// Report a line that exceeded the configured maximum length.
    pub async fn reject_oversized(&self, session: &Session, max_line_length: usize) {
        tracing::warn!(
            "Session {} sent a line longer than {} bytes",
            session.id(),
            max_line_length
        );
        self.reply(session, &Reply::LineTooLong(max_line_length).to_string())
            .await;
    }

    /// Report a line that could not be decoded as UTF-8.
    pub async fn reject_invalid_utf8(&self, session: &Session) {
        tracing::warn!("Session {} sent a line that is not valid UTF-8", session.id());
        self.reply(session, &Reply::InvalidUtf8.to_string()).await;
    }

    /// Tell the session the server is going away.
    pub async fn notify_shutdown(&self, session: &Session) {
        self.reply(session, &Reply::ShuttingDown.to_string()).await;
    }

    /// Close the session: remove it from the roster and announce the departure.
    ///
    /// Runs at most once per session; later calls return `None` and have no
    /// observable effect.
    pub async fn teardown(&self, session: &mut Session) -> Option<Nickname> {
        let previous = session.close()?;
        if previous == SessionState::Unauthenticated {
            tracing::info!("Connection closed: session {} (not logged in)", session.id());
        } else {
            tracing::info!("Connection closed: session {}", session.id());
        }

        // Remove by session id even when the state says unauthenticated, so
        // a registration that raced with the state change cannot linger.
        self.disconnect.execute(session.id()).await
    }

    async fn handle_nick(&self, session: &mut Session, name: &str) {
        if let Some(nickname) = session.nickname() {
            let err = LoginError::AlreadyLoggedIn(nickname.as_str().to_string());
            self.reply(session, &err.to_string()).await;
            return;
        }

        match self
            .login
            .execute(session.id(), session.pusher().clone(), name)
            .await
        {
            Ok(nickname) => {
                if let Err(e) = session.authenticate(nickname) {
                    tracing::error!("Session {} could not be authenticated: {}", session.id(), e);
                }
            }
            Err(e) => {
                tracing::debug!("Login rejected for session {}: {}", session.id(), e);
                self.reply(session, &e.to_string()).await;
            }
        }
    }

    async fn reply(&self, session: &Session, message: &str) {
        self.broadcaster
            .send_to(session.id(), session.pusher().as_ref(), message)
            .await;
    }
}
