//! Simple Moving Average (SMA) indicator.

use crate::services::signals::{ensure_finite, ensure_window, Indicator, Result};

/// Mean of the first `window` values of the sequence as given.
///
/// The window is anchored at the front of the sequence, so with oldest-first
/// input this averages the oldest days. Returns 0 when the sequence is shorter
/// than the window; callers treat 0 as "unavailable".
pub fn sma(values: &[f64], window: usize) -> Result<f64> {
    ensure_window(window, "SMA window")?;
    ensure_finite(values)?;

    if values.len() < window {
        return Ok(0.0);
    }

    Ok(values[..window].iter().sum::<f64>() / window as f64)
}

/// SMA (Simple Moving Average) indicator.
pub struct Sma {
    id: String,
    name: String,
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        Self {
            id: format!("sma{}", period),
            name: format!("SMA ({})", period),
            period,
        }
    }
}

impl Indicator for Sma {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn calculate(&self, values: &[f64]) -> Result<f64> {
        sma(values, self.period)
    }
}
