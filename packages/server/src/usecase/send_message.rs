//! UseCase: 発言処理（チャット行）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 送信者本人を含む全員へのブロードキャスト、受信者一覧の更新、履歴への追記
//!
//! ### どのような状況を想定しているか
//! - 正常系：複数人が参加している状態での発言
//! - エッジケース：登録されていない送信者 ID（受信者一覧は更新されない）
//! - 異常系：履歴への追記失敗（配信は行われる）

use std::sync::Arc;

use irori_shared::protocol::ChatLine;

use crate::domain::{ParticipantRegistry, TranscriptStore};

use super::error::SendMessageError;

/// 発言のユースケース
pub struct SendMessageUseCase {
    registry: Arc<dyn ParticipantRegistry>,
    transcript: Arc<dyn TranscriptStore>,
}

impl SendMessageUseCase {
    pub fn new(registry: Arc<dyn ParticipantRegistry>, transcript: Arc<dyn TranscriptStore>) -> Self {
        Self {
            registry,
            transcript,
        }
    }

    /// 発言を実行
    ///
    /// # Arguments
    ///
    /// * `raw` - クライアントから届いた行（そのまま配信・保存する）
    /// * `chat` - `raw` を解析した結果（送信者の特定に使う）
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 配信した人数
    /// * `Err(SendMessageError)` - 配信は済んだが履歴に残せなかった
    pub async fn execute(&self, raw: &str, chat: &ChatLine) -> Result<usize, SendMessageError> {
        // 1. 全員に配信（送信者本人を含む）
        let delivered = self.registry.broadcast(raw).await;

        // 2. 送信者の受信者一覧を、送信時点の参加者で更新
        if let Err(e) = self.registry.record_receivers(chat.sender).await {
            tracing::debug!("Receivers not recorded: {}", e);
        }

        // 3. 履歴に追記
        self.transcript.append(raw).await?;

        Ok(delivered)
    }
}
