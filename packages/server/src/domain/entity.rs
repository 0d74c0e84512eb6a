//! Roster entry entity.

use std::{fmt, sync::Arc};

use super::{
    message_pusher::MessagePusher,
    value_object::{Nickname, SessionId, Timestamp},
};

/// One authenticated session as indexed by the roster.
///
/// The entry holds a shared handle to the session's outbound channel, not the
/// transport itself; the session stays the only owner of the socket.
#[derive(Clone)]
pub struct RosterEntry {
    pub session_id: SessionId,
    pub nickname: Nickname,
    pub joined_at: Timestamp,
    pub pusher: Arc<dyn MessagePusher>,
}

impl RosterEntry {
    pub fn new(
        session_id: SessionId,
        nickname: Nickname,
        joined_at: Timestamp,
        pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            session_id,
            nickname,
            joined_at,
            pusher,
        }
    }
}

impl fmt::Debug for RosterEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RosterEntry")
            .field("session_id", &self.session_id)
            .field("nickname", &self.nickname)
            .field("joined_at", &self.joined_at)
            .finish_non_exhaustive()
    }
}
