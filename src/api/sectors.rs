use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::types::SectorPerformance;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct SectorsResponse {
    pub sectors: Vec<SectorPerformance>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_sectors))
}

/// GET /api/sectors
async fn get_sectors(State(state): State<AppState>) -> Json<SectorsResponse> {
    Json(SectorsResponse {
        sectors: state.sector_service.get_performance().await,
    })
}
