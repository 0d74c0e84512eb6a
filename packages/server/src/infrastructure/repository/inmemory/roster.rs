//! InMemory Roster 実装
//!
//! ドメイン層が定義する RosterRepository trait の具体的な実装。
//! 登録順を保つために Vec をインメモリ DB として使用します。
//!
//! ## 排他制御
//!
//! 全ての操作は 1 つの `Mutex` の中で完結します。特に `try_register` は
//! 重複チェックと挿入を同じロック区間で行うため、同じニックネームでの
//! 同時ログインは必ず 1 つだけが成功します。
//! ロックを保持したままネットワーク書き込みをすることはありません
//! （配信は `snapshot` のコピーに対して行う）。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Nickname, RosterEntry, RosterRepository, SessionId};

/// インメモリ Roster 実装
#[derive(Default)]
pub struct InMemoryRoster {
    /// 登録順に並んだ認証済みセッション
    entries: Mutex<Vec<RosterEntry>>,
}

impl InMemoryRoster {
    /// 空の InMemoryRoster を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RosterRepository for InMemoryRoster {
    async fn try_register(&self, entry: RosterEntry) -> bool {
        let mut entries = self.entries.lock().await;
        if entries.iter().any(|e| e.nickname == entry.nickname) {
            return false;
        }
        tracing::debug!(
            "Registered '{}' (session {}), {} online",
            entry.nickname,
            entry.session_id,
            entries.len() + 1
        );
        entries.push(entry);
        true
    }

    async fn remove(&self, nickname: &Nickname) -> Option<RosterEntry> {
        let mut entries = self.entries.lock().await;
        let index = entries.iter().position(|e| &e.nickname == nickname)?;
        Some(entries.remove(index))
    }

    async fn remove_session(&self, session_id: SessionId) -> Option<RosterEntry> {
        let mut entries = self.entries.lock().await;
        let index = entries.iter().position(|e| e.session_id == session_id)?;
        Some(entries.remove(index))
    }

    async fn snapshot(&self, exclude: Option<&Nickname>) -> Vec<RosterEntry> {
        let entries = self.entries.lock().await;
        entries
            .iter()
            .filter(|e| Some(&e.nickname) != exclude)
            .cloned()
            .collect()
    }

    async fn contains(&self, nickname: &Nickname) -> bool {
        let entries = self.entries.lock().await;
        entries.iter().any(|e| &e.nickname == nickname)
    }

    async fn count(&self) -> usize {
        self.entries.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::{MockMessagePusher, Timestamp};

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - InMemoryRoster の登録・削除・スナップショット
    // - try_register の重複拒否（同時実行時も含む）
    //
    // 【なぜこのテストが必要か】
    // - Roster はサーバー内で唯一の共有可変状態
    // - ニックネームの一意性と、切断時の確実な削除を保証する必要がある
    //
    // 【どのようなシナリオをテストするか】
    // 1. 登録の成功と重複拒否
    // 2. 存在しないエントリの削除（冪等性）
    // 3. セッション ID による削除が他セッションを消さないこと
    // 4. スナップショットの順序と除外
    // 5. 同じニックネームでの同時登録
    // ========================================

    fn entry(name: &str) -> RosterEntry {
        entry_for(SessionId::generate(), name)
    }

    fn entry_for(session_id: SessionId, name: &str) -> RosterEntry {
        RosterEntry::new(
            session_id,
            Nickname::try_from(name).unwrap(),
            Timestamp::new(0),
            Arc::new(MockMessagePusher::new()),
        )
    }

    fn nick(name: &str) -> Nickname {
        Nickname::try_from(name).unwrap()
    }

    #[tokio::test]
    async fn test_try_register_success() {
        // テスト項目: 未使用のニックネームは登録できる
        // given (前提条件):
        let roster = InMemoryRoster::new();

        // when (操作):
        let registered = roster.try_register(entry("alice")).await;

        // then (期待する結果):
        assert!(registered);
        assert_eq!(roster.count().await, 1);
        assert!(roster.contains(&nick("alice")).await);
    }

    #[tokio::test]
    async fn test_try_register_duplicate_is_rejected() {
        // テスト項目: 使用中のニックネームは登録できず、名簿も変化しない
        // given (前提条件):
        let roster = InMemoryRoster::new();
        let first = entry("alice");
        let first_session = first.session_id;
        roster.try_register(first).await;

        // when (操作):
        let registered = roster.try_register(entry("alice")).await;

        // then (期待する結果):
        assert!(!registered);
        let snapshot = roster.snapshot(None).await;
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].session_id, first_session);
    }

    #[tokio::test]
    async fn test_remove_nonexistent_is_noop() {
        // テスト項目: 存在しないニックネームの削除は何もしない（冪等性）
        // given (前提条件):
        let roster = InMemoryRoster::new();
        roster.try_register(entry("alice")).await;

        // when (操作):
        let removed = roster.remove(&nick("bob")).await;

        // then (期待する結果):
        assert!(removed.is_none());
        assert_eq!(roster.count().await, 1);
    }

    #[tokio::test]
    async fn test_remove_twice() {
        // テスト項目: 同じニックネームを 2 回削除しても 2 回目は何もしない
        // given (前提条件):
        let roster = InMemoryRoster::new();
        roster.try_register(entry("alice")).await;

        // when (操作):
        let first = roster.remove(&nick("alice")).await;
        let second = roster.remove(&nick("alice")).await;

        // then (期待する結果):
        assert!(first.is_some());
        assert!(second.is_none());
        assert_eq!(roster.count().await, 0);
    }

    #[tokio::test]
    async fn test_remove_session_keeps_newer_owner() {
        // テスト項目: 古いセッションの削除が、同じ名前を再取得した新セッションを消さない
        // given (前提条件):
        let roster = InMemoryRoster::new();
        let old_session = SessionId::generate();
        let new_session = SessionId::generate();
        roster.try_register(entry_for(old_session, "alice")).await;
        roster.remove(&nick("alice")).await;
        roster.try_register(entry_for(new_session, "alice")).await;

        // when (操作):
        let removed = roster.remove_session(old_session).await;

        // then (期待する結果):
        assert!(removed.is_none());
        assert!(roster.contains(&nick("alice")).await);
        assert_eq!(roster.snapshot(None).await[0].session_id, new_session);
    }

    #[tokio::test]
    async fn test_snapshot_preserves_insertion_order_and_excludes() {
        // テスト項目: スナップショットは登録順で、指定したニックネームを除外する
        // given (前提条件):
        let roster = InMemoryRoster::new();
        for name in ["charlie", "alice", "bob"] {
            roster.try_register(entry(name)).await;
        }

        // when (操作):
        let all = roster.snapshot(None).await;
        let except_alice = roster.snapshot(Some(&nick("alice"))).await;

        // then (期待する結果):
        let names: Vec<&str> = all.iter().map(|e| e.nickname.as_str()).collect();
        assert_eq!(names, vec!["charlie", "alice", "bob"]);
        let names: Vec<&str> = except_alice.iter().map(|e| e.nickname.as_str()).collect();
        assert_eq!(names, vec!["charlie", "bob"]);
    }

    #[tokio::test]
    async fn test_snapshot_is_a_copy() {
        // テスト項目: スナップショット取得後の変更はスナップショットに影響しない
        // given (前提条件):
        let roster = InMemoryRoster::new();
        roster.try_register(entry("alice")).await;
        let snapshot = roster.snapshot(None).await;

        // when (操作):
        roster.remove(&nick("alice")).await;

        // then (期待する結果):
        assert_eq!(snapshot.len(), 1);
        assert_eq!(roster.count().await, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_register_same_nickname() {
        // テスト項目: 同じニックネームで同時に登録しても成功するのは 1 つだけ
        // given (前提条件):
        let roster = Arc::new(InMemoryRoster::new());

        // when (操作):
        let mut handles = Vec::new();
        for _ in 0..64 {
            let roster = roster.clone();
            handles.push(tokio::spawn(async move {
                roster.try_register(entry("alice")).await
            }));
        }
        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap() {
                successes += 1;
            }
        }

        // then (期待する結果):
        assert_eq!(successes, 1);
        assert_eq!(roster.count().await, 1);
    }
}
