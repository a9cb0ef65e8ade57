use axum::{routing::get, Json, Router};
use chrono::Utc;

use crate::services::session;
use crate::types::SessionStatus;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/status", get(get_status))
}

/// GET /api/market/status
async fn get_status() -> Json<SessionStatus> {
    Json(session::status_at(&Utc::now()))
}
