//! Yahoo Finance chart API client.
//!
//! Supplies the daily price/volume history and the current quote for an
//! instrument. Raw responses are validated into [`PriceVolumeSeries`] and
//! [`QuoteSnapshot`] here, before anything reaches the analysis core.

use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::types::{DailyBar, PriceVolumeSeries, QuoteSnapshot};

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Yahoo Finance chart response.
#[derive(Debug, Deserialize)]
pub struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct YahooResult {
    meta: YahooMeta,
    timestamp: Option<Vec<i64>>,
    indicators: Option<YahooIndicators>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YahooMeta {
    regular_market_price: Option<f64>,
    regular_market_volume: Option<f64>,
    previous_close: Option<f64>,
    chart_previous_close: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    quote: Vec<YahooQuote>,
}

#[derive(Debug, Deserialize)]
struct YahooQuote {
    close: Option<Vec<Option<f64>>>,
    volume: Option<Vec<Option<f64>>>,
}

/// Normalize a user-supplied ticker for Yahoo.
///
/// Bare tickers get `default_suffix` (e.g. `RELIANCE` -> `RELIANCE.NS`).
/// Tickers that already carry an exchange suffix, and indices (`^NSEI`),
/// are only upper-cased.
pub fn normalize_ticker(ticker: &str, default_suffix: &str) -> String {
    let ticker = ticker.trim().to_uppercase();
    if ticker.contains('.') || ticker.starts_with('^') || default_suffix.is_empty() {
        ticker
    } else {
        format!("{}{}", ticker, default_suffix.to_uppercase())
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn first_result(response: YahooChartResponse) -> Result<YahooResult> {
    if let Some(error) = response.chart.error {
        return Err(AppError::ExternalApi(format!(
            "Yahoo API error: {} - {}",
            error.code, error.description
        )));
    }

    response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| AppError::ExternalApi("No results in response".to_string()))
}

/// Validate a chart response into a daily series in provider order.
///
/// Rows with a missing, non-finite or non-positive close are dropped. A
/// missing or invalid volume becomes 0.
pub fn parse_history(response: YahooChartResponse) -> Result<PriceVolumeSeries> {
    let result = first_result(response)?;

    let timestamps = result
        .timestamp
        .ok_or_else(|| AppError::ExternalApi("No timestamps in response".to_string()))?;

    let quote = result
        .indicators
        .and_then(|indicators| indicators.quote.into_iter().next())
        .ok_or_else(|| AppError::ExternalApi("No quote data in response".to_string()))?;

    let closes = quote.close.unwrap_or_default();
    let volumes = quote.volume.unwrap_or_default();

    let bars = timestamps
        .iter()
        .enumerate()
        .filter_map(|(i, &timestamp)| {
            let close = finite(closes.get(i).copied().flatten()).filter(|c| *c > 0.0)?;
            let volume = finite(volumes.get(i).copied().flatten())
                .filter(|v| *v >= 0.0)
                .unwrap_or(0.0);

            Some(DailyBar {
                time: timestamp * 1000,
                close,
                volume,
            })
        })
        .collect::<Vec<_>>();

    Ok(PriceVolumeSeries::new(bars))
}

/// Validate the chart `meta` block into a quote snapshot.
///
/// Percent change is derived from the previous session close when present.
pub fn parse_quote(response: YahooChartResponse) -> Result<QuoteSnapshot> {
    let meta = first_result(response)?.meta;

    let price = finite(meta.regular_market_price);
    let volume = finite(meta.regular_market_volume).filter(|v| *v >= 0.0);
    let previous_close = finite(meta.previous_close)
        .or_else(|| finite(meta.chart_previous_close))
        .filter(|c| *c != 0.0);

    let change_percent = match (price, previous_close) {
        (Some(price), Some(previous)) => Some((price - previous) / previous * 100.0),
        _ => None,
    };

    Ok(QuoteSnapshot {
        price,
        volume,
        change_percent,
    })
}

/// Yahoo Finance API client.
pub struct YahooFinanceClient {
    client: Client,
    base_url: String,
}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client.
    pub fn new(timeout: Duration) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, timeout)
    }

    /// Create a client against a different host (used by tests and proxies).
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn fetch_chart(&self, symbol: &str, query: &str) -> Result<YahooChartResponse> {
        let url = format!(
            "{}/v8/finance/chart/{}?{}&includePrePost=false",
            self.base_url, symbol, query
        );

        debug!("Fetching Yahoo Finance data: {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "Yahoo API error for {}: {}",
                symbol,
                response.status()
            )));
        }

        Ok(response.json().await?)
    }

    /// Fetch daily bars from `start` (UTC midnight) until now.
    pub async fn get_daily_history(
        &self,
        symbol: &str,
        start: NaiveDate,
    ) -> Result<PriceVolumeSeries> {
        let period1 = start
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp())
            .unwrap_or_default();
        let period2 = Utc::now().timestamp();

        let query = format!("period1={}&period2={}&interval=1d", period1, period2);
        let series = parse_history(self.fetch_chart(symbol, &query).await?)?;

        debug!(
            "Yahoo history for {}: {} bars since {}",
            symbol,
            series.len(),
            start
        );
        Ok(series)
    }

    /// Fetch the current quote snapshot.
    pub async fn get_quote(&self, symbol: &str) -> Result<QuoteSnapshot> {
        parse_quote(self.fetch_chart(symbol, "range=1d&interval=1d").await?)
    }
}

/// Render a millisecond timestamp as a `YYYY-MM-DD` date for log lines.
pub fn format_bar_time(time_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(time_ms)
        .map(|dt| dt.date_naive().to_string())
        .unwrap_or_else(|| time_ms.to_string())
}
