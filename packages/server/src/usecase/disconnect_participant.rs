//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - Roster からの削除と退出通知
//!
//! ### なぜこのテストが必要か
//! - 切断後は同じニックネームが再利用できること
//! - 2 回呼ばれても退出通知は 1 回だけであること
//!
//! ### どのような状況を想定しているか
//! - 正常系：認証済みセッションの切断と通知
//! - エッジケース：未認証セッションの切断、2 回目の切断

use std::sync::Arc;

use gochat_shared::time::{Clock, format_elapsed};

use crate::domain::{Nickname, Reply, RosterRepository, SessionId};

use super::broadcaster::Broadcaster;

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    /// Roster（データアクセス層の抽象化）
    roster: Arc<dyn RosterRepository>,
    /// 配信サービス
    broadcaster: Arc<Broadcaster>,
    /// 在室時間の計算用
    clock: Arc<dyn Clock>,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
    pub fn new(
        roster: Arc<dyn RosterRepository>,
        broadcaster: Arc<Broadcaster>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            roster,
            broadcaster,
            clock,
        }
    }

    /// 参加者切断を実行
    ///
    /// セッションが Roster に登録されていれば削除し、残りの全員に
    /// `<nickname> left the chat` をブロードキャストする。
    ///
    /// # Returns
    ///
    /// * `Some(Nickname)` - 削除したエントリのニックネーム
    /// * `None` - 登録されていなかった（未認証、または削除済み）
    pub async fn execute(&self, session_id: SessionId) -> Option<Nickname> {
        let entry = self.roster.remove_session(session_id).await?;

        tracing::info!(
            "Left: {} (session {}, online for {})",
            entry.nickname,
            session_id,
            format_elapsed(entry.joined_at.value(), self.clock.now_millis())
        );

        self.broadcaster
            .broadcast_all(&Reply::Left(&entry.nickname).to_string())
            .await;

        Some(entry.nickname)
    }
}
