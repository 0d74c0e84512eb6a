//! MessagePusher trait 定義
//!
//! セッションのトランスポートへ 1 行を書き込むためのインターフェース。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::error::MessagePushError;

/// 1 セッション分の送信口
///
/// 実装は改行を付けずに 1 行を受け取り、トランスポートへの書き込みを担当する。
/// Roster はこの trait object を共有参照として保持するだけで、
/// トランスポートの所有者はあくまでセッション側。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 1 行を送信キューに積む
    async fn push(&self, line: &str) -> Result<(), MessagePushError>;
}
