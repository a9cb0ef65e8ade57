//! Relative Strength Index (RSI) indicator.

use crate::services::signals::{ensure_finite, ensure_window, Indicator, Result};

/// Default look-back period.
pub const DEFAULT_PERIOD: usize = 14;

/// Value returned when the sequence is too short.
pub const NEUTRAL: f64 = 50.0;

/// Simple (unsmoothed) RSI over the last `period` day-over-day changes.
///
/// Unlike [`super::sma`], the window ends at the final element. Values range
/// from 0-100:
/// - Below 30: Oversold
/// - Above 70: Overbought
///
/// Returns [`NEUTRAL`] when fewer than `period + 1` values are supplied and
/// 100 when the window has no losses.
pub fn rsi(values: &[f64], period: usize) -> Result<f64> {
    ensure_window(period, "RSI period")?;
    ensure_finite(values)?;

    if values.len() <= period {
        return Ok(NEUTRAL);
    }

    let start = values.len() - period - 1;
    let (gains, losses) = values[start..]
        .windows(2)
        .map(|w| w[1] - w[0])
        .fold((0.0_f64, 0.0_f64), |(gains, losses), change| {
            if change > 0.0 {
                (gains + change, losses)
            } else if change < 0.0 {
                (gains, losses - change)
            } else {
                (gains, losses)
            }
        });

    let avg_gain = gains / period as f64;
    let avg_loss = losses / period as f64;

    if avg_loss == 0.0 {
        return Ok(100.0);
    }

    let rs = avg_gain / avg_loss;
    Ok(100.0 - (100.0 / (1.0 + rs)))
}

/// RSI (Relative Strength Index) indicator.
pub struct Rsi {
    name: String,
    period: usize,
}

impl Default for Rsi {
    fn default() -> Self {
        Self::new(DEFAULT_PERIOD)
    }
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("RSI ({})", period),
            period,
        }
    }
}

impl Indicator for Rsi {
    fn id(&self) -> &str {
        "rsi"
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn min_periods(&self) -> usize {
        self.period + 1
    }

    fn calculate(&self, values: &[f64]) -> Result<f64> {
        rsi(values, self.period)
    }
}
