//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};

use crate::{infrastructure::dto::http::PresenceDto, ui::state::AppState};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Current display names and open connection count
pub async fn get_presence(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PresenceDto>, StatusCode> {
    match state.relay.snapshot().await {
        Ok(snapshot) => Ok(Json(snapshot.into())),
        Err(e) => {
            tracing::error!("Failed to get presence: {}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}
