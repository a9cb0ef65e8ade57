//! Indicator pipeline for a single instrument.

use crate::services::signals::indicators::{rsi, Rsi, Sma};
use crate::services::signals::probability::{score, volume_ratio, ScoreInputs};
use crate::services::signals::{AnalysisError, Indicator, Result};
use crate::types::{Analysis, IndicatorSet, PriceVolumeSeries, QuoteSnapshot};
use tracing::debug;

/// Runs the fixed indicator set over a series and scores the result.
pub struct Analyzer {
    short_trend: Sma,
    long_trend: Sma,
    momentum: Rsi,
    avg_volume: Sma,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self {
            short_trend: Sma::new(20),
            long_trend: Sma::new(50),
            momentum: Rsi::new(rsi::DEFAULT_PERIOD),
            avg_volume: Sma::new(10),
        }
    }
}

impl Analyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute indicators and bias probabilities.
    ///
    /// Missing quote price/volume fall back to the last record of the series,
    /// a missing change to 0. The series must not be empty.
    pub fn analyze(
        &self,
        series: &PriceVolumeSeries,
        quote: &QuoteSnapshot,
    ) -> Result<Analysis> {
        let latest = series.latest().ok_or_else(|| {
            AnalysisError::InvalidInput("price/volume series is empty".to_string())
        })?;

        let price = quote.price.unwrap_or(latest.close);
        let volume = quote.volume.unwrap_or(latest.volume);
        let change = quote.change_percent.unwrap_or(0.0);

        let closes = series.closes();
        let volumes = series.volumes();

        let sma20 = measure(&self.short_trend, &closes)?;
        let sma50 = measure(&self.long_trend, &closes)?;
        let rsi = measure(&self.momentum, &closes)?;
        let avg_volume = measure(&self.avg_volume, &volumes)?;

        let probabilities = score(&ScoreInputs {
            current_price: price,
            sma20,
            sma50,
            rsi,
            volume,
            avg_volume,
        })?;

        Ok(Analysis {
            price,
            change,
            indicators: IndicatorSet {
                rsi,
                sma20,
                sma50,
                vol_ratio: volume_ratio(volume, avg_volume),
            },
            probabilities,
        })
    }

    /// Shortest series for which every indicator gives a real reading.
    pub fn min_history(&self) -> usize {
        [
            self.short_trend.min_periods(),
            self.long_trend.min_periods(),
            self.momentum.min_periods(),
            self.avg_volume.min_periods(),
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }
}

fn measure(indicator: &dyn Indicator, values: &[f64]) -> Result<f64> {
    let value = indicator.calculate(values)?;
    if values.len() < indicator.min_periods() {
        debug!(
            "{} needs {} values, got {}; using sentinel",
            indicator.name(),
            indicator.min_periods(),
            values.len()
        );
    }
    debug!("{} = {:.4}", indicator.id(), value);
    Ok(value)
}
