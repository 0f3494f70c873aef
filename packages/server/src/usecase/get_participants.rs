//! UseCase: 参加者一覧の取得（状態確認 API 用）

use std::sync::Arc;

use crate::domain::{Participant, ParticipantRegistry};

pub struct GetParticipantsUseCase {
    registry: Arc<dyn ParticipantRegistry>,
}

impl GetParticipantsUseCase {
    pub fn new(registry: Arc<dyn ParticipantRegistry>) -> Self {
        Self { registry }
    }

    /// 接続順の参加者一覧
    pub async fn execute(&self) -> Vec<Participant> {
        self.registry.snapshot().await
    }
}
