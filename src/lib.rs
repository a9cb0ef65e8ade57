//! MarketProb - rule-based market bias analyzer

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod sources;
pub mod types;

use axum::Router;
use config::Config;
use services::{Analyzer, SectorService};
use sources::YahooFinanceClient;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub yahoo: Arc<YahooFinanceClient>,
    pub analyzer: Arc<Analyzer>,
    pub sector_service: Arc<SectorService>,
}

impl AppState {
    /// Build the shared services from configuration.
    pub fn new(config: Config) -> Self {
        let yahoo = Arc::new(YahooFinanceClient::new(config.provider_timeout()));
        Self::with_client(config, yahoo)
    }

    /// Build the shared services around an existing provider client.
    pub fn with_client(config: Config, yahoo: Arc<YahooFinanceClient>) -> Self {
        let sector_service = SectorService::new(
            yahoo.clone(),
            config.sectors.clone(),
            config.sector_cache_ttl(),
        );

        Self {
            config: Arc::new(config),
            yahoo,
            analyzer: Arc::new(Analyzer::new()),
            sector_service,
        }
    }
}

/// Full HTTP application: API routes plus CORS and request tracing.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// Re-export commonly used types
pub use types::*;
