pub mod analyze;
pub mod health;
pub mod market;
pub mod sectors;

use crate::AppState;
use axum::Router;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/api/analyze", analyze::router())
        .nest("/api/sectors", sectors::router())
        .nest("/api/market", market::router())
}
