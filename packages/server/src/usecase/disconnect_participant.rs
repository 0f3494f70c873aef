//! UseCase: 参加者退出処理（`/exit` または切断）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 参加者の削除、退室アナウンス、送信チャンネルのクローズ
//!
//! ### なぜこのテストが必要か
//! - `/exit` と切断が競合しても、退室アナウンスがちょうど 1 回になることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：登録済み参加者の退出
//! - エッジケース：2 回目の退出、名前未設定の参加者の切断、存在しない ID

use std::sync::Arc;

use irori_shared::protocol::server_line;

use crate::domain::{Participant, ParticipantId, ParticipantRegistry};

/// 参加者退出のユースケース
pub struct DisconnectParticipantUseCase {
    registry: Arc<dyn ParticipantRegistry>,
}

impl DisconnectParticipantUseCase {
    pub fn new(registry: Arc<dyn ParticipantRegistry>) -> Self {
        Self { registry }
    }

    /// 参加者退出を実行
    ///
    /// # Returns
    ///
    /// * `Some(Participant)` - この呼び出しで削除された参加者
    /// * `None` - 既に削除済み、または存在しない（何もしない）
    pub async fn execute(&self, id: ParticipantId) -> Option<Participant> {
        let departed = self.registry.remove(id).await?;

        // 入室を告知した参加者のみ、退室も告知する
        if let Some(name) = departed.participant.display_name() {
            let left = server_line::left(id, name);
            self.registry.broadcast(&left).await;
            if departed.channel.send(left).is_err() {
                tracing::debug!("Participant {} is already gone", id);
            }
        }

        tracing::info!("Participant {} left", id);
        // departed.channel はここで drop され、送信タスクが終了する
        Some(departed.participant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::test_support::{create_test_registry, drain, join};

    #[tokio::test]
    async fn test_exit_announces_and_closes_channel() {
        // テスト項目: 退出すると全員（本人を含む）に退室アナウンスが届き、本人のチャンネルが閉じる
        // given (前提条件):
        let registry = create_test_registry();
        let (alice, mut rx_alice) = join(&registry, Some("Alice")).await;
        let (_bob, mut rx_bob) = join(&registry, Some("Bob")).await;
        let usecase = DisconnectParticipantUseCase::new(registry.clone());

        // when (操作):
        let removed = usecase.execute(alice).await;

        // then (期待する結果):
        assert_eq!(removed.map(|p| p.id), Some(alice));
        assert_eq!(
            drain(&mut rx_bob),
            vec!["[10000]Alice has left the chatroom!"]
        );
        assert_eq!(
            rx_alice.recv().await,
            Some("[10000]Alice has left the chatroom!".to_string())
        );
        assert_eq!(rx_alice.recv().await, None);
        assert!(registry.find(alice).await.is_none());
    }

    #[tokio::test]
    async fn test_second_exit_is_noop() {
        // テスト項目: 同じ ID の 2 回目の退出は何もしない
        // given (前提条件):
        let registry = create_test_registry();
        let (alice, _rx_alice) = join(&registry, Some("Alice")).await;
        let (_bob, mut rx_bob) = join(&registry, Some("Bob")).await;
        let usecase = DisconnectParticipantUseCase::new(registry.clone());
        usecase.execute(alice).await;
        drain(&mut rx_bob);

        // when (操作):
        let removed = usecase.execute(alice).await;

        // then (期待する結果):
        assert!(removed.is_none());
        assert!(drain(&mut rx_bob).is_empty());
    }

    #[tokio::test]
    async fn test_unregistered_participant_leaves_silently() {
        // テスト項目: 名前未設定の参加者の切断はアナウンスされない
        // given (前提条件):
        let registry = create_test_registry();
        let (_alice, mut rx_alice) = join(&registry, Some("Alice")).await;
        let (pending, _rx_pending) = join(&registry, None).await;
        let usecase = DisconnectParticipantUseCase::new(registry.clone());

        // when (操作):
        let removed = usecase.execute(pending).await;

        // then (期待する結果):
        assert!(removed.is_some());
        assert!(drain(&mut rx_alice).is_empty());
    }

    #[tokio::test]
    async fn test_exit_unknown_id() {
        // テスト項目: 存在しない ID の退出は何もしない
        // given (前提条件):
        let registry = create_test_registry();
        let (_alice, mut rx_alice) = join(&registry, Some("Alice")).await;
        let usecase = DisconnectParticipantUseCase::new(registry.clone());

        // when (操作):
        let removed = usecase.execute(ParticipantId::new(99999)).await;

        // then (期待する結果):
        assert!(removed.is_none());
        assert!(drain(&mut rx_alice).is_empty());
    }
}
