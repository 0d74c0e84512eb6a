//! メッセージ送信（通知）の実装
//!
//! ## 実装
//!
//! - `channel`: セッションごとの writer タスクへ mpsc で行を渡す実装

pub mod channel;

pub use channel::{ChannelMessagePusher, OutboundReceiver};
