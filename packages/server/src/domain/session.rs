//! Per-connection session state machine.

use std::{fmt, sync::Arc};

use super::{
    error::SessionError,
    message_pusher::MessagePusher,
    value_object::{Nickname, SessionId},
};

/// Authentication state of a session.
///
/// An authenticated session always carries its nickname, so "logged in
/// without a name" cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated { nickname: Nickname },
    Closed,
}

/// Server-side state for one connected client.
pub struct Session {
    id: SessionId,
    state: SessionState,
    pusher: Arc<dyn MessagePusher>,
}

impl Session {
    pub fn new(id: SessionId, pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            id,
            state: SessionState::Unauthenticated,
            pusher,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Outbound handle for direct replies to this session.
    pub fn pusher(&self) -> &Arc<dyn MessagePusher> {
        &self.pusher
    }

    pub fn nickname(&self) -> Option<&Nickname> {
        match &self.state {
            SessionState::Authenticated { nickname } => Some(nickname),
            _ => None,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.state, SessionState::Closed)
    }

    /// `Unauthenticated -> Authenticated`. The nickname is fixed afterwards.
    pub fn authenticate(&mut self, nickname: Nickname) -> Result<(), SessionError> {
        match &self.state {
            SessionState::Unauthenticated => {
                self.state = SessionState::Authenticated { nickname };
                Ok(())
            }
            SessionState::Authenticated { nickname } => Err(
                SessionError::AlreadyAuthenticated(nickname.as_str().to_string()),
            ),
            SessionState::Closed => Err(SessionError::Closed),
        }
    }

    /// Move to `Closed`, returning the previous state.
    ///
    /// Returns `None` when the session was already closed, so callers can run
    /// their teardown exactly once.
    pub fn close(&mut self) -> Option<SessionState> {
        if self.is_closed() {
            return None;
        }
        Some(std::mem::replace(&mut self.state, SessionState::Closed))
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MockMessagePusher;

    fn create_test_session() -> Session {
        Session::new(SessionId::generate(), Arc::new(MockMessagePusher::new()))
    }

    fn nick(name: &str) -> Nickname {
        Nickname::try_from(name).unwrap()
    }

    #[test]
    fn test_new_session_is_unauthenticated() {
        // テスト項目: 新規セッションは未認証状態から始まる
        let session = create_test_session();

        assert_eq!(session.state(), &SessionState::Unauthenticated);
        assert!(session.nickname().is_none());
        assert!(!session.is_closed());
    }

    #[test]
    fn test_authenticate_sets_nickname() {
        // テスト項目: 認証するとニックネームが設定される
        // given (前提条件):
        let mut session = create_test_session();

        // when (操作):
        let result = session.authenticate(nick("alice"));

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(session.nickname(), Some(&nick("alice")));
    }

    #[test]
    fn test_authenticate_twice_keeps_first_nickname() {
        // テスト項目: 認証済みセッションのニックネームは変更できない
        // given (前提条件):
        let mut session = create_test_session();
        session.authenticate(nick("alice")).unwrap();

        // when (操作):
        let result = session.authenticate(nick("bob"));

        // then (期待する結果):
        assert_eq!(
            result,
            Err(SessionError::AlreadyAuthenticated("alice".to_string()))
        );
        assert_eq!(session.nickname(), Some(&nick("alice")));
    }

    #[test]
    fn test_close_is_idempotent() {
        // テスト項目: close は 1 回目だけ直前の状態を返し、2 回目以降は None
        // given (前提条件):
        let mut session = create_test_session();
        session.authenticate(nick("alice")).unwrap();

        // when (操作):
        let first = session.close();
        let second = session.close();

        // then (期待する結果):
        assert_eq!(
            first,
            Some(SessionState::Authenticated {
                nickname: nick("alice")
            })
        );
        assert_eq!(second, None);
        assert!(session.is_closed());
    }

    #[test]
    fn test_closed_session_cannot_authenticate() {
        // テスト項目: 切断済みセッションは認証できない
        let mut session = create_test_session();
        session.close();

        assert_eq!(session.authenticate(nick("alice")), Err(SessionError::Closed));
    }
}
