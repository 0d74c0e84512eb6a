//! UseCase: チャットメッセージ送信処理
//!
//! 認証済みセッションのチャット本文を `<nickname>: <text>` として
//! 送信者以外の全員にブロードキャストします。

use std::sync::Arc;

use crate::domain::{Nickname, Reply};

use super::broadcaster::Broadcaster;

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// 配信サービス
    broadcaster: Arc<Broadcaster>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(broadcaster: Arc<Broadcaster>) -> Self {
        Self { broadcaster }
    }

    /// メッセージ送信を実行
    ///
    /// # Returns
    ///
    /// 配信できた宛先の数
    pub async fn execute(&self, from: &Nickname, text: &str) -> usize {
        let line = Reply::Chat { from, text }.to_string();
        let delivered = self.broadcaster.broadcast_except(&line, from).await;
        tracing::debug!("Relayed message from '{}' to {} sessions", from, delivered);
        delivered
    }
}
