//! Bias analysis service module.
//!
//! Provides the moving-average and RSI indicators, the additive probability
//! scorer, and the pipeline that ties them to a price/volume series.

pub mod analyzer;
pub mod indicators;
pub mod probability;

pub use analyzer::Analyzer;
pub use probability::{score, ScoreInputs};

use thiserror::Error;

/// Errors raised by the analysis core.
///
/// Short series and zero average volume are not errors; they map to sentinel
/// values. Only malformed input is rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Trait for indicators that reduce a numeric sequence to a single value.
pub trait Indicator: Send + Sync {
    /// Unique identifier for this indicator.
    fn id(&self) -> &str;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// Minimum sequence length for a real reading (shorter input yields the sentinel).
    fn min_periods(&self) -> usize;

    /// Calculate the indicator over the sequence as given.
    fn calculate(&self, values: &[f64]) -> Result<f64>;
}

/// Reject a zero-length window.
pub(crate) fn ensure_window(window: usize, what: &str) -> Result<()> {
    if window == 0 {
        return Err(AnalysisError::InvalidInput(format!(
            "{} must be a positive integer",
            what
        )));
    }
    Ok(())
}

/// Reject sequences containing NaN or infinite values.
pub(crate) fn ensure_finite(values: &[f64]) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(AnalysisError::InvalidInput(format!(
            "non-finite value {} at index {}",
            values[index], index
        ))),
        None => Ok(()),
    }
}

/// Reject a single non-finite number.
pub(crate) fn ensure_finite_value(value: f64, field: &str) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AnalysisError::InvalidInput(format!(
            "{} must be finite, got {}",
            field, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_window_rejects_zero() {
        assert!(ensure_window(0, "window").is_err());
        assert!(ensure_window(1, "window").is_ok());
    }

    #[test]
    fn test_ensure_finite_reports_index() {
        let err = ensure_finite(&[1.0, f64::NAN, 3.0]).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::InvalidInput("non-finite value NaN at index 1".to_string())
        );
        assert!(ensure_finite(&[]).is_ok());
    }

    #[test]
    fn test_ensure_finite_value() {
        assert!(ensure_finite_value(1.5, "price").is_ok());
        assert!(ensure_finite_value(f64::INFINITY, "price").is_err());
    }
}
