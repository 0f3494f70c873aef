//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::Participant;

/// Participant as shown by `GET /api/participants`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantDto {
    pub id: u32,
    pub name: Option<String>,
    pub last_receivers: String,
}

impl From<Participant> for ParticipantDto {
    fn from(model: Participant) -> Self {
        Self {
            id: model.id.value(),
            name: model.display_name().map(str::to_string),
            last_receivers: model.last_receivers,
        }
    }
}
