//! UseCase: 直近の受信者一覧の表示（`/printReceiver<id>`）
//!
//! 一覧は「直近の発言を実際に受け取った人」ではなく「発言時点で登録されていた全員」。
//! その後に参加者が入れ替わっても、発言時点の一覧のまま表示される。

use std::sync::Arc;

use crate::domain::{ParticipantId, ParticipantRegistry, RegistryError};

use super::error::QueryError;

pub struct PrintReceiverUseCase {
    registry: Arc<dyn ParticipantRegistry>,
}

impl PrintReceiverUseCase {
    pub fn new(registry: Arc<dyn ParticipantRegistry>) -> Self {
        Self { registry }
    }

    /// 本人の受信者一覧を本人に送り、その内容を返す
    pub async fn execute(&self, id: ParticipantId) -> Result<String, QueryError> {
        let participant = self
            .registry
            .find(id)
            .await
            .ok_or(RegistryError::ParticipantNotFound(id))?;
        self.registry
            .push_to(id, &participant.last_receivers)
            .await?;
        Ok(participant.last_receivers)
    }
}
