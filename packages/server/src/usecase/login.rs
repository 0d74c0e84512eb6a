//! UseCase: ログイン（NICK）処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LoginUseCase::execute() メソッド
//! - ニックネームの検証、Roster への登録、Welcome と参加通知
//!
//! ### なぜこのテストが必要か
//! - ニックネームの一意性は Roster の try_register 1 回で保証されること
//! - 失敗時に Roster もブロードキャストも変化しないこと
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規ニックネームでのログイン
//! - 異常系：空のニックネーム、使用中のニックネーム

use std::sync::Arc;

use gochat_shared::time::{Clock, timestamp_to_rfc3339};

use crate::domain::{
    MessagePusher, Nickname, Reply, RosterEntry, RosterRepository, SessionId, Timestamp,
};

use super::{broadcaster::Broadcaster, error::LoginError};

/// ログインのユースケース
pub struct LoginUseCase {
    /// Roster（データアクセス層の抽象化）
    roster: Arc<dyn RosterRepository>,
    /// 配信サービス
    broadcaster: Arc<Broadcaster>,
    /// 参加時刻の取得元
    clock: Arc<dyn Clock>,
}

impl LoginUseCase {
    /// 新しい LoginUseCase を作成
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

    /// ログインを実行
    ///
    /// 成功すると本人に `Welcome <name>` を送り、他の認証済みセッションに
    /// `<name> joined the chat` をブロードキャストする。
    ///
    /// # Arguments
    ///
    /// * `session_id` - ログインするセッションの ID
    /// * `pusher` - そのセッションの送信口
    /// * `name` - NICK コマンドで指定された名前（未検証）
    ///
    /// # Returns
    ///
    /// * `Ok(Nickname)` - 登録されたニックネーム
    /// * `Err(LoginError)` - 検証失敗または使用中（Roster は変化しない）
    pub async fn execute(
        &self,
        session_id: SessionId,
        pusher: Arc<dyn MessagePusher>,
        name: &str,
    ) -> Result<Nickname, LoginError> {
        // 1. ニックネームの検証
        let nickname = Nickname::try_from(name)?;

        // 2. 重複チェックと登録（アトミック）
        let joined_at = Timestamp::new(self.clock.now_millis());
        let entry = RosterEntry::new(session_id, nickname.clone(), joined_at, pusher.clone());
        if !self.roster.try_register(entry).await {
            return Err(LoginError::NicknameTaken);
        }
        tracing::info!(
            "Joined: {} (session {}) at {}",
            nickname,
            session_id,
            timestamp_to_rfc3339(joined_at.value())
        );

        // 3. 本人への Welcome と他の参加者への通知
        self.broadcaster
            .send_to(
                session_id,
                pusher.as_ref(),
                &Reply::Welcome(&nickname).to_string(),
            )
            .await;
        self.broadcaster
            .broadcast_except(&Reply::Joined(&nickname).to_string(), &nickname)
            .await;

        Ok(nickname)
    }
}
