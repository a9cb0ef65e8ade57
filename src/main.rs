use marketprob::config::Config;
use marketprob::AppState;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marketprob=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();
    info!("Starting MarketProb server on {}:{}", config.host, config.port);
    info!(
        "History from {}, minimum {} bars, {} sectors tracked",
        config.history_start,
        config.min_history_days,
        config.sectors.len()
    );

    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::new(config);
    if state.config.min_history_days < state.analyzer.min_history() {
        warn!(
            "MIN_HISTORY_DAYS={} is below the {} bars the indicators need",
            state.config.min_history_days,
            state.analyzer.min_history()
        );
    }
    let app = marketprob::app(state);

    // Start the server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("MarketProb server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
