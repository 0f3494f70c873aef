//! UseCase: 参加者接続処理（join シーケンス）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - 歓迎メッセージ・現在の参加者一覧・割り当て ID・名前入力の案内が順番通りに届くこと
//!
//! ### どのような状況を想定しているか
//! - 正常系：最初の参加者、既存の参加者がいる状態での接続
//! - エッジケース：削除済み ID の再利用

use std::sync::Arc;

use irori_shared::protocol::server_line;

use crate::domain::{ParticipantId, ParticipantRegistry, PusherChannel};

use super::error::ConnectError;

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    registry: Arc<dyn ParticipantRegistry>,
}

impl ConnectParticipantUseCase {
    pub fn new(registry: Arc<dyn ParticipantRegistry>) -> Self {
        Self { registry }
    }

    /// join シーケンスを実行
    ///
    /// 1. 歓迎メッセージを送る
    /// 2. 現在の参加者一覧を送る
    /// 3. ID を割り当てて名前未設定の参加者として登録する（チャンネルは Registry に移る）
    /// 4. 割り当てた ID と名前入力の案内を送る
    pub async fn execute(&self, channel: PusherChannel) -> Result<ParticipantId, ConnectError> {
        let participants = self.registry.snapshot().await;
        let current_users = server_line::current_users(
            participants
                .iter()
                .map(|p| (p.id, p.display_name())),
        );

        for line in [server_line::WELCOME.to_string(), current_users] {
            channel
                .send(line)
                .map_err(|_| ConnectError::ChannelClosed)?;
        }

        let id = self.registry.register_new(channel).await?;
        self.registry
            .push_lines(
                id,
                vec![
                    server_line::assigned_id(id),
                    server_line::NAME_PROMPT.to_string(),
                ],
            )
            .await?;

        Ok(id)
    }
}
