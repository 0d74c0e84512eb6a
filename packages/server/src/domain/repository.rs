//! Repository trait 定義
//!
//! 認証済みセッションの名簿（Roster）へのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{
    entity::RosterEntry,
    value_object::{Nickname, SessionId},
};

/// Roster Repository trait
///
/// 全ての操作はそれ単体でアトミックであり、呼び出し側が内部のコンテナを
/// 直接触ることはない。
///
/// ## 不変条件
///
/// - 同じニックネームのエントリが 2 つ存在することはない
/// - エントリは登録順（挿入順）に並ぶ
#[async_trait]
pub trait RosterRepository: Send + Sync {
    /// 重複チェックと登録を 1 ステップで行う
    ///
    /// ニックネームが既に使われている場合は何も変更せず `false` を返す。
    async fn try_register(&self, entry: RosterEntry) -> bool;

    /// ニックネームでエントリを削除（存在しなければ何もしない）
    async fn remove(&self, nickname: &Nickname) -> Option<RosterEntry>;

    /// 指定セッションが所有するエントリだけを削除
    ///
    /// 同じニックネームを後から別セッションが取得していても、そちらは消さない。
    async fn remove_session(&self, session_id: SessionId) -> Option<RosterEntry>;

    /// ある時点の名簿のコピーを登録順で返す（`exclude` のニックネームは除く）
    async fn snapshot(&self, exclude: Option<&Nickname>) -> Vec<RosterEntry>;

    /// ニックネームが登録済みかどうか
    async fn contains(&self, nickname: &Nickname) -> bool;

    /// 登録済みセッション数
    async fn count(&self) -> usize;
}
