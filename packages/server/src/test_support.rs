//! Test helpers shared by the unit tests of this crate.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::{
    MessagePushError, MessagePusher, Nickname, RosterEntry, RosterRepository, SessionId, Timestamp,
};

/// MessagePusher that records every line it is given.
#[derive(Default)]
pub struct RecordingPusher {
    lines: Mutex<Vec<String>>,
}

impl RecordingPusher {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessagePusher for RecordingPusher {
    async fn push(&self, line: &str) -> Result<(), MessagePushError> {
        self.lines.lock().unwrap().push(line.to_string());
        Ok(())
    }
}

pub fn nick(name: &str) -> Nickname {
    Nickname::try_from(name).unwrap()
}

/// Register `name` directly in the roster and return its session id.
pub async fn register(
    roster: &dyn RosterRepository,
    name: &str,
    pusher: Arc<dyn MessagePusher>,
) -> SessionId {
    let session_id = SessionId::generate();
    let entry = RosterEntry::new(session_id, nick(name), Timestamp::new(0), pusher);
    assert!(roster.try_register(entry).await);
    session_id
}
