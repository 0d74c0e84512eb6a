//! ドメイン層のエラー型

use thiserror::Error;

/// ニックネームのバリデーションエラー
///
/// `Display` の文字列はそのままクライアントへのエラー行として送信される。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NicknameError {
    #[error("invalid nick name: {0}")]
    Invalid(String),
}

/// セッション状態遷移のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("session is already authenticated as '{0}'")]
    AlreadyAuthenticated(String),

    #[error("session is closed")]
    Closed,
}

/// メッセージ送信（通知）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// 送信先の writer タスクが既に終了している
    #[error("outbound channel is closed")]
    ChannelClosed,

    /// 送信先が読み取らず、送信キューが満杯
    #[error("outbound queue is full")]
    QueueFull,
}
