//! Single-instrument bias analysis endpoint.

use axum::{extract::rejection::JsonRejection, extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{AppError, Result};
use crate::sources::yahoo::{format_bar_time, normalize_ticker};
use crate::types::Analysis;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub ticker: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub ticker: String,
    #[serde(flatten)]
    pub analysis: Analysis,
}

/// Create the analyze router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(analyze))
}

/// POST /api/analyze
async fn analyze(
    State(state): State<AppState>,
    body: std::result::Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>> {
    let Json(request) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let ticker = request
        .ticker
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::BadRequest("Ticker symbol is required".to_string()))?;

    let symbol = normalize_ticker(ticker, &state.config.default_exchange_suffix);

    let (quote, history) = tokio::try_join!(
        state.yahoo.get_quote(&symbol),
        state
            .yahoo
            .get_daily_history(&symbol, state.config.history_start),
    )?;

    if history.len() < state.config.min_history_days {
        debug!(
            "{} has {} bars, need {}",
            symbol,
            history.len(),
            state.config.min_history_days
        );
        return Err(AppError::BadRequest(
            "Insufficient historical data for analysis".to_string(),
        ));
    }

    if let (Some(first), Some(last)) = (history.bars().first(), history.latest()) {
        debug!(
            "{} history {} .. {}",
            symbol,
            format_bar_time(first.time),
            format_bar_time(last.time)
        );
    }

    let analysis = state.analyzer.analyze(&history, &quote)?;

    info!(
        "Analyzed {}: score {} (bull {} / bear {} / side {})",
        symbol,
        analysis.probabilities.raw_score,
        analysis.probabilities.bullish,
        analysis.probabilities.bearish,
        analysis.probabilities.sideways
    );

    Ok(Json(AnalyzeResponse {
        ticker: symbol,
        analysis,
    }))
}
