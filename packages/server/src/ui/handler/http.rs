//! HTTP API endpoint handlers (read-only status API).

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{infrastructure::dto::http::ParticipantDto, ui::state::AppState};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get connected participants in connection order
pub async fn get_participants(State(state): State<Arc<AppState>>) -> Json<Vec<ParticipantDto>> {
    let participants = state.get_participants_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(participants.into_iter().map(ParticipantDto::from).collect())
}
