//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::NicknameError;

/// ログイン（NICK）失敗
///
/// `Display` の文字列はそのまま送信元セッションへのエラー行になる。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error(transparent)]
    InvalidNickname(#[from] NicknameError),

    #[error("nickname already taken")]
    NicknameTaken,

    #[error("already logged in as {0}")]
    AlreadyLoggedIn(String),
}
