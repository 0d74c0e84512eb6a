//! Shared application state.

use std::sync::Arc;

use gochat_shared::time::{Clock, SystemClock};

use crate::{
    config::ServerConfig,
    domain::RosterRepository,
    infrastructure::repository::InMemoryRoster,
    usecase::{
        Broadcaster, DisconnectParticipantUseCase, LoginUseCase, ProtocolEngine,
        SendMessageUseCase,
    },
};

/// Shared application state
pub struct AppState {
    /// Protocol engine used by every connection
    pub engine: Arc<ProtocolEngine>,
    /// Cleanup path for sessions whose task died without tearing down
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// Roster（データアクセス層の抽象化）
    pub roster: Arc<dyn RosterRepository>,
    pub config: ServerConfig,
}

impl AppState {
    /// Wire up the in-memory roster and all use cases.
    ///
    /// Dependencies are created in order:
    /// 1. Roster
    /// 2. Broadcaster
    /// 3. UseCases
    /// 4. ProtocolEngine
    pub fn new(config: ServerConfig) -> Self {
        Self::with_parts(config, Arc::new(InMemoryRoster::new()), Arc::new(SystemClock))
    }

    pub fn with_parts(
        config: ServerConfig,
        roster: Arc<dyn RosterRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let broadcaster = Arc::new(Broadcaster::new(roster.clone()));

        let login_usecase = Arc::new(LoginUseCase::new(
            roster.clone(),
            broadcaster.clone(),
            clock.clone(),
        ));
        let send_message_usecase = Arc::new(SendMessageUseCase::new(broadcaster.clone()));
        let disconnect_participant_usecase = Arc::new(DisconnectParticipantUseCase::new(
            roster.clone(),
            broadcaster.clone(),
            clock,
        ));

        let engine = Arc::new(ProtocolEngine::new(
            login_usecase,
            send_message_usecase,
            disconnect_participant_usecase.clone(),
            broadcaster,
        ));

        Self {
            engine,
            disconnect_participant_usecase,
            roster,
            config,
        }
    }
}
