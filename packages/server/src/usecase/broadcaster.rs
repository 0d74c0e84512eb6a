//! 配信（Broadcaster）
//!
//! Roster のスナップショットに対して 1 宛先ずつ送信します。
//! ロックは `snapshot` の間しか保持しないため、遅いピアへの配信が
//! 登録・削除をブロックすることはありません。
//!
//! ## 配信の保証
//!
//! - 送信順はスナップショットの順（Roster の登録順）
//! - ACK もリトライもない at-most-once / best-effort
//! - 1 宛先の送信失敗はログに残すだけで、他の宛先には影響しない

use std::sync::Arc;

use crate::domain::{MessagePusher, Nickname, RosterEntry, RosterRepository, SessionId};

/// 配信サービス
pub struct Broadcaster {
    /// Roster（データアクセス層の抽象化）
    roster: Arc<dyn RosterRepository>,
}

impl Broadcaster {
    /// 新しい Broadcaster を作成
    pub fn new(roster: Arc<dyn RosterRepository>) -> Self {
        Self { roster }
    }

    /// 1 セッションへ送信
    ///
    /// # Returns
    ///
    /// 送信キューに積めた場合は `true`。失敗はログに残して `false` を返す。
    pub async fn send_to(
        &self,
        session_id: SessionId,
        pusher: &dyn MessagePusher,
        message: &str,
    ) -> bool {
        match pusher.push(message).await {
            Ok(()) => {
                tracing::debug!("Sending '{}' >> session {}", message, session_id);
                true
            }
            Err(e) => {
                tracing::warn!("Failed to push message to session {}: {}", session_id, e);
                false
            }
        }
    }

    /// 全ての認証済みセッションへ送信
    ///
    /// # Returns
    ///
    /// 送信に成功した宛先の数
    pub async fn broadcast_all(&self, message: &str) -> usize {
        let targets = self.roster.snapshot(None).await;
        self.deliver(&targets, message).await
    }

    /// 指定したニックネーム以外の認証済みセッションへ送信
    ///
    /// # Returns
    ///
    /// 送信に成功した宛先の数
    pub async fn broadcast_except(&self, message: &str, nickname: &Nickname) -> usize {
        let targets = self.roster.snapshot(Some(nickname)).await;
        self.deliver(&targets, message).await
    }

    async fn deliver(&self, targets: &[RosterEntry], message: &str) -> usize {
        let mut delivered = 0;
        for target in targets {
            if self
                .send_to(target.session_id, target.pusher.as_ref(), message)
                .await
            {
                delivered += 1;
            }
        }
        delivered
    }
}
