//! UseCase: 履歴検索（`/search(<pattern>)<id>`）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - 部分一致（大文字小文字を区別）した行がファイル順に本人へ届くこと
//! - 一致が無い場合は "No records found!" の 1 行のみ届くこと
//! - 履歴を読めない場合も一致なしとして扱うこと

use std::sync::Arc;

use irori_shared::protocol::server_line;

use crate::domain::{ParticipantId, ParticipantRegistry, RegistryError, TranscriptStore};

use super::error::QueryError;

pub struct SearchTranscriptUseCase {
    registry: Arc<dyn ParticipantRegistry>,
    transcript: Arc<dyn TranscriptStore>,
}

impl SearchTranscriptUseCase {
    pub fn new(registry: Arc<dyn ParticipantRegistry>, transcript: Arc<dyn TranscriptStore>) -> Self {
        Self {
            registry,
            transcript,
        }
    }

    /// 検索を実行し、一致した行数を返す
    pub async fn execute(&self, id: ParticipantId, pattern: &str) -> Result<usize, QueryError> {
        if self.registry.find(id).await.is_none() {
            return Err(RegistryError::ParticipantNotFound(id).into());
        }

        let matches = match self.transcript.search(pattern).await {
            Ok(matches) => matches,
            Err(e) => {
                tracing::error!("Failed to search transcript for participant {}: {}", id, e);
                Vec::new()
            }
        };

        let found = matches.len();
        if matches.is_empty() {
            self.registry
                .push_to(id, server_line::NO_RECORDS_FOUND)
                .await?;
        } else {
            self.registry.push_lines(id, matches).await?;
        }
        Ok(found)
    }
}
