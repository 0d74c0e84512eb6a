//! mpsc チャンネルを使った MessagePusher 実装
//!
//! ## 責務
//!
//! - セッションの writer タスクへの送信キュー（容量つき `Sender`）を保持
//! - `push` は行をキューに積むだけで、ソケットへの書き込みは待たない
//!
//! ## 設計ノート
//!
//! ソケットの書き込み側は UI 層（`ui/handler/connection.rs`）の writer タスクが
//! 所有します。遅いピアへの書き込みが他のセッションへの配信を止めないよう、
//! 配信側はキューに積んだ時点で次の宛先へ進みます。
//!
//! - キューが満杯（読まないピア）の場合は `MessagePushError::QueueFull` で、その行は捨てられる
//! - writer タスクが終了している場合は `MessagePushError::ChannelClosed`

use async_trait::async_trait;
use tokio::sync::mpsc::{self, error::TrySendError};

use crate::domain::{MessagePushError, MessagePusher};

/// writer タスク側の受信口
pub type OutboundReceiver = mpsc::Receiver<String>;

/// mpsc チャンネルを使った MessagePusher 実装
#[derive(Debug, Clone)]
pub struct ChannelMessagePusher {
    sender: mpsc::Sender<String>,
}

impl ChannelMessagePusher {
    /// 送信口と、writer タスクに渡す受信口のペアを作成
    ///
    /// `capacity` は未送信のまま溜めておける行数の上限（1 以上）。
    pub fn channel(capacity: usize) -> (Self, OutboundReceiver) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl MessagePusher for ChannelMessagePusher {
    async fn push(&self, line: &str) -> Result<(), MessagePushError> {
        self.sender
            .try_send(line.to_string())
            .map_err(|e| match e {
                TrySendError::Full(_) => MessagePushError::QueueFull,
                TrySendError::Closed(_) => MessagePushError::ChannelClosed,
            })
    }
}
