//! UseCase: ヘルプ表示（`/help<id>`）

use std::sync::Arc;

use irori_shared::protocol::server_line;

use crate::domain::{ParticipantId, ParticipantRegistry};

use super::error::QueryError;

pub struct ShowHelpUseCase {
    registry: Arc<dyn ParticipantRegistry>,
}

impl ShowHelpUseCase {
    pub fn new(registry: Arc<dyn ParticipantRegistry>) -> Self {
        Self { registry }
    }

    /// コマンド一覧を本人にだけ送る
    pub async fn execute(&self, id: ParticipantId) -> Result<(), QueryError> {
        self.registry
            .push_lines(
                id,
                server_line::HELP_TEXT.iter().map(|line| line.to_string()).collect(),
            )
            .await?;
        Ok(())
    }
}
