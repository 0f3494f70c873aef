//! UseCase: 参加者登録処理（`@<id>@<name>`）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RegisterParticipantUseCase::execute() メソッド
//! - 履歴の再生 → 名前設定 → 入室アナウンス → ヘルプ表示 の順序
//!
//! ### なぜこのテストが必要か
//! - 後から参加した人が、それまでのチャット行を元の順番で、新しい発言より先に受け取ることを保証
//! - 履歴ファイルの障害で登録自体が失敗しないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：履歴なし / 履歴あり
//! - 異常系：存在しない ID、空の名前、履歴の読み込み失敗
//! - 並行処理：履歴の読み込み中に他の参加者が退出した場合

use std::sync::Arc;

use irori_shared::protocol::server_line;

use crate::domain::{
    DisplayName, ParticipantId, ParticipantRegistry, RegistryError, TranscriptStore,
};

use super::error::RegisterError;

/// 参加者登録のユースケース
pub struct RegisterParticipantUseCase {
    registry: Arc<dyn ParticipantRegistry>,
    transcript: Arc<dyn TranscriptStore>,
}

impl RegisterParticipantUseCase {
    pub fn new(registry: Arc<dyn ParticipantRegistry>, transcript: Arc<dyn TranscriptStore>) -> Self {
        Self {
            registry,
            transcript,
        }
    }

    /// 参加者登録を実行
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 再生した履歴の行数
    /// * `Err(RegisterError)` - 名前が不正、または参加者が存在しない（何も送信しない）
    pub async fn execute(&self, id: ParticipantId, name: String) -> Result<usize, RegisterError> {
        let name = DisplayName::new(name)?;
        if self.registry.find(id).await.is_none() {
            return Err(RegistryError::ParticipantNotFound(id).into());
        }

        // 1. 履歴の再生（ファイルが無ければヘッダ付きで作成され、再生は無し）
        //    名前の設定前に送るので、ブロードキャストが再生より先に届くことはない
        let history = match self.transcript.open_history().await {
            Ok(history) => history,
            Err(e) => {
                tracing::error!("Failed to load transcript for participant {}: {}", id, e);
                Vec::new()
            }
        };
        let replayed = history.len();
        self.registry.push_lines(id, history).await?;

        // 2. 名前を設定し、ここからブロードキャストの対象になる
        self.registry.set_name(id, name.clone()).await?;

        // 3. 入室アナウンス（本人を含む全員）
        self.registry
            .broadcast(&server_line::joined(id, name.as_str()))
            .await;

        // 4. ヘルプ表示（本人のみ）
        self.registry
            .push_lines(
                id,
                server_line::HELP_TEXT.iter().map(|line| line.to_string()).collect(),
            )
            .await?;

        tracing::info!(
            "Participant {} registered as '{}' ({} lines replayed)",
            id,
            name.as_str(),
            replayed
        );
        Ok(replayed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MockTranscriptStore, TranscriptError, ValidationError},
        usecase::{
            DisconnectParticipantUseCase,
            test_support::{create_test_registry, drain, join},
        },
    };
    use async_trait::async_trait;

    fn help_lines() -> Vec<String> {
        server_line::HELP_TEXT.iter().map(|line| line.to_string()).collect()
    }

    fn transcript_with(history: Vec<String>) -> Arc<MockTranscriptStore> {
        let mut transcript = MockTranscriptStore::new();
        transcript
            .expect_open_history()
            .times(1)
            .returning(move || Ok(history.clone()));
        Arc::new(transcript)
    }

    #[tokio::test]
    async fn test_register_without_history() {
        // テスト項目: 履歴が空の場合、入室アナウンスとヘルプのみが届く
        // given (前提条件):
        let registry = create_test_registry();
        let (alice, mut rx) = join(&registry, None).await;
        let usecase = RegisterParticipantUseCase::new(registry.clone(), transcript_with(vec![]));

        // when (操作):
        let result = usecase.execute(alice, "Alice".to_string()).await;

        // then (期待する結果):
        assert_eq!(result, Ok(0));
        let mut expected = vec!["[10000]Alice has entered the chatroom!".to_string()];
        expected.extend(help_lines());
        assert_eq!(drain(&mut rx), expected);
        assert_eq!(
            registry.find(alice).await.unwrap().display_name(),
            Some("Alice")
        );
    }

    #[tokio::test]
    async fn test_register_replays_history_before_announcement() {
        // テスト項目: 履歴が元の順番で、入室アナウンスより先に本人にだけ届く
        // given (前提条件):
        let registry = create_test_registry();
        let (_alice, mut rx_alice) = join(&registry, Some("Alice")).await;
        let (bob, mut rx_bob) = join(&registry, None).await;
        let history = vec![
            "2024-05-06 12:00:00 [10000]Alice : hi".to_string(),
            "2024-05-06 12:00:05 [10000]Alice : anyone?".to_string(),
        ];
        let usecase =
            RegisterParticipantUseCase::new(registry.clone(), transcript_with(history.clone()));

        // when (操作):
        let result = usecase.execute(bob, "Bob".to_string()).await;

        // then (期待する結果):
        assert_eq!(result, Ok(2));
        let mut expected = history;
        expected.push("[10001]Bob has entered the chatroom!".to_string());
        expected.extend(help_lines());
        assert_eq!(drain(&mut rx_bob), expected);
        // 既存の参加者にはアナウンスのみ届く
        assert_eq!(
            drain(&mut rx_alice),
            vec!["[10001]Bob has entered the chatroom!"]
        );
    }

    /// 履歴を読み込んでいる間に、別の参加者を退出させる TranscriptStore
    struct DepartingDuringReplay {
        history: Vec<String>,
        disconnect: DisconnectParticipantUseCase,
        leaver: ParticipantId,
    }

    #[async_trait]
    impl TranscriptStore for DepartingDuringReplay {
        async fn open_history(&self) -> Result<Vec<String>, TranscriptError> {
            self.disconnect.execute(self.leaver).await;
            Ok(self.history.clone())
        }

        async fn append(&self, _line: &str) -> Result<(), TranscriptError> {
            Ok(())
        }

        async fn search(&self, _pattern: &str) -> Result<Vec<String>, TranscriptError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_leave_during_replay_never_precedes_history() {
        // テスト項目: 履歴の読み込み中に他の参加者が退出しても、再生より先に退室アナウンスが届かない
        // given (前提条件):
        let registry = create_test_registry();
        let (alice, _rx_alice) = join(&registry, Some("Alice")).await;
        let (bob, mut rx_bob) = join(&registry, None).await;
        let history = vec!["2024-05-06 12:00:00 [10000]Alice : hi".to_string()];
        let transcript = Arc::new(DepartingDuringReplay {
            history: history.clone(),
            disconnect: DisconnectParticipantUseCase::new(registry.clone()),
            leaver: alice,
        });
        let usecase = RegisterParticipantUseCase::new(registry.clone(), transcript);

        // when (操作):
        let result = usecase.execute(bob, "Bob".to_string()).await;

        // then (期待する結果): 最初に届くのは履歴で、名前設定前の退室アナウンスは届かない
        assert_eq!(result, Ok(1));
        let mut expected = history;
        expected.push("[10001]Bob has entered the chatroom!".to_string());
        expected.extend(help_lines());
        assert_eq!(drain(&mut rx_bob), expected);
        assert!(registry.find(alice).await.is_none());
    }

    #[tokio::test]
    async fn test_register_unknown_participant() {
        // テスト項目: 存在しない ID での登録は何も送信せずにエラーになる
        // given (前提条件):
        let registry = create_test_registry();
        let (_alice, mut rx_alice) = join(&registry, Some("Alice")).await;
        let usecase = RegisterParticipantUseCase::new(
            registry.clone(),
            Arc::new(MockTranscriptStore::new()),
        );

        // when (操作):
        let result = usecase
            .execute(ParticipantId::new(99999), "Ghost".to_string())
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RegisterError::Registry(RegistryError::ParticipantNotFound(
                ParticipantId::new(99999)
            )))
        );
        assert!(drain(&mut rx_alice).is_empty());
    }

    #[tokio::test]
    async fn test_register_with_empty_name() {
        // テスト項目: 空の名前での登録はエラーになる
        // given (前提条件):
        let registry = create_test_registry();
        let (alice, _rx) = join(&registry, None).await;
        let usecase = RegisterParticipantUseCase::new(
            registry.clone(),
            Arc::new(MockTranscriptStore::new()),
        );

        // when (操作):
        let result = usecase.execute(alice, String::new()).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RegisterError::InvalidName(ValidationError::EmptyName))
        );
        assert!(!registry.find(alice).await.unwrap().is_registered());
    }

    #[tokio::test]
    async fn test_register_when_transcript_unavailable() {
        // テスト項目: 履歴の読み込みに失敗しても、再生なしで登録は完了する
        // given (前提条件):
        let registry = create_test_registry();
        let (alice, mut rx) = join(&registry, None).await;
        let mut transcript = MockTranscriptStore::new();
        transcript.expect_open_history().times(1).returning(|| {
            Err(TranscriptError::Io {
                path: "ChatRecord.txt".into(),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            })
        });
        let usecase = RegisterParticipantUseCase::new(registry.clone(), Arc::new(transcript));

        // when (操作):
        let result = usecase.execute(alice, "Alice".to_string()).await;

        // then (期待する結果):
        assert_eq!(result, Ok(0));
        let lines = drain(&mut rx);
        assert_eq!(lines[0], "[10000]Alice has entered the chatroom!");
        assert_eq!(lines.len(), 1 + server_line::HELP_TEXT.len());
    }
}
