//! Additive bias scorer and three-way probability mapping.
//!
//! This is a heuristic mapping, not a statistical prediction.

use crate::services::signals::{ensure_finite_value, AnalysisError, Result};
use crate::types::ProbabilityDistribution;

/// Neutral starting score.
const BASE_SCORE: i32 = 50;

/// Volume ratio above which the trend is considered volume-confirmed.
pub const VOLUME_CONFIRMATION_RATIO: f64 = 1.2;

/// Inputs to the bias scorer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreInputs {
    pub current_price: f64,
    pub sma20: f64,
    pub sma50: f64,
    pub rsi: f64,
    pub volume: f64,
    /// May be 0, in which case volume confirmation is skipped.
    pub avg_volume: f64,
}

impl ScoreInputs {
    fn validate(&self) -> Result<()> {
        ensure_finite_value(self.current_price, "current price")?;
        ensure_finite_value(self.sma20, "sma20")?;
        ensure_finite_value(self.sma50, "sma50")?;
        ensure_finite_value(self.rsi, "rsi")?;
        ensure_finite_value(self.volume, "volume")?;
        ensure_finite_value(self.avg_volume, "average volume")?;

        if self.volume < 0.0 || self.avg_volume < 0.0 {
            return Err(AnalysisError::InvalidInput(
                "volume must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Current volume over its average, or 1 when the average is 0.
pub fn volume_ratio(volume: f64, avg_volume: f64) -> f64 {
    if avg_volume > 0.0 {
        volume / avg_volume
    } else {
        1.0
    }
}

/// Accumulate the rule contributions and clamp once into [0, 100].
pub fn raw_score(inputs: &ScoreInputs) -> Result<u32> {
    inputs.validate()?;

    let ScoreInputs {
        current_price,
        sma20,
        sma50,
        rsi,
        volume,
        avg_volume,
    } = *inputs;

    let mut score = BASE_SCORE;

    // Trend
    score += if current_price > sma20 { 10 } else { -10 };
    score += if current_price > sma50 { 10 } else { -10 };

    // Momentum
    if rsi > 50.0 && rsi < 70.0 {
        score += 10;
    }
    if rsi > 30.0 && rsi < 50.0 {
        score -= 10;
    }

    // Mean reversion
    if rsi >= 70.0 {
        score -= 5;
    }
    if rsi <= 30.0 {
        score += 5;
    }

    // Volume confirmation
    if avg_volume > 0.0 && volume_ratio(volume, avg_volume) > VOLUME_CONFIRMATION_RATIO {
        score += if current_price > sma20 { 10 } else { -10 };
    }

    Ok(score.clamp(0, 100) as u32)
}

/// Map a clamped score to bullish/bearish/sideways percentages.
///
/// Sideways is half the uncertainty `100 - |bullish - bearish|`, largest at a
/// score of 50. Shares are rounded independently and may not sum to 100.
pub fn distribute(raw_score: u32) -> ProbabilityDistribution {
    let raw_score = raw_score.min(100);
    let bullish = raw_score as f64;
    let bearish = 100.0 - bullish;
    let uncertainty = 100.0 - (bullish - bearish).abs();
    let sideways = uncertainty * 0.5;
    let total = bullish + bearish + sideways;

    let pct = |part: f64| ((part / total) * 100.0).round() as u32;

    ProbabilityDistribution {
        bullish: pct(bullish),
        bearish: pct(bearish),
        sideways: pct(sideways),
        raw_score,
    }
}

/// Score the inputs and return the probability distribution.
pub fn score(inputs: &ScoreInputs) -> Result<ProbabilityDistribution> {
    raw_score(inputs).map(distribute)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(current_price: f64, sma20: f64, sma50: f64, rsi: f64) -> ScoreInputs {
        ScoreInputs {
            current_price,
            sma20,
            sma50,
            rsi,
            volume: 1000.0,
            avg_volume: 1000.0,
        }
    }

    // =========================================================================
    // raw_score Tests
    // =========================================================================

    #[test]
    fn test_bullish_trend_with_volume() {
        let dist = score(&ScoreInputs {
            current_price: 105.0,
            sma20: 100.0,
            sma50: 95.0,
            rsi: 60.0,
            volume: 1200.0,
            avg_volume: 1000.0,
        })
        .unwrap();

        // 1200/1000 is exactly 1.2, which does not confirm.
        assert_eq!(dist.raw_score, 80);
        assert_eq!(dist.bullish, 67);
        assert_eq!(dist.bearish, 17);
        assert_eq!(dist.sideways, 17);
        assert!((99..=101).contains(&dist.total()));
    }

    #[test]
    fn test_volume_confirmation_follows_sma20() {
        let mut up = inputs(105.0, 100.0, 95.0, 60.0);
        up.volume = 1300.0;
        assert_eq!(raw_score(&up).unwrap(), 90);

        let mut down = inputs(90.0, 100.0, 95.0, 40.0);
        down.volume = 1300.0;
        // 50 - 10 - 10 - 10 - 10
        assert_eq!(raw_score(&down).unwrap(), 10);
    }

    #[test]
    fn test_zero_avg_volume_skips_confirmation() {
        let mut case = inputs(105.0, 100.0, 95.0, 60.0);
        case.volume = 5000.0;
        case.avg_volume = 0.0;
        assert_eq!(raw_score(&case).unwrap(), 80);
    }

    #[test]
    fn test_rsi_bands() {
        // Price above both averages contributes +20.
        assert_eq!(raw_score(&inputs(105.0, 100.0, 95.0, 50.0)).unwrap(), 70);
        assert_eq!(raw_score(&inputs(105.0, 100.0, 95.0, 70.0)).unwrap(), 65);
        assert_eq!(raw_score(&inputs(105.0, 100.0, 95.0, 85.0)).unwrap(), 65);
        assert_eq!(raw_score(&inputs(105.0, 100.0, 95.0, 30.0)).unwrap(), 75);
        assert_eq!(raw_score(&inputs(105.0, 100.0, 95.0, 45.0)).unwrap(), 60);
    }

    #[test]
    fn test_price_equal_to_average_counts_as_below() {
        assert_eq!(raw_score(&inputs(100.0, 100.0, 100.0, 50.0)).unwrap(), 30);
    }

    #[test]
    fn test_score_stays_in_range() {
        for price in [0.0, 50.0, 100.0, 150.0] {
            for rsi in [0.0, 25.0, 30.0, 45.0, 50.0, 60.0, 70.0, 95.0, 100.0] {
                for volume in [0.0, 1000.0, 5000.0] {
                    let case = ScoreInputs {
                        current_price: price,
                        sma20: 100.0,
                        sma50: 90.0,
                        rsi,
                        volume,
                        avg_volume: 1000.0,
                    };
                    let dist = score(&case).unwrap();
                    assert!(dist.raw_score <= 100);
                }
            }
        }
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(raw_score(&inputs(f64::NAN, 100.0, 95.0, 60.0)).is_err());
        assert!(raw_score(&inputs(105.0, 100.0, 95.0, f64::INFINITY)).is_err());

        let mut negative = inputs(105.0, 100.0, 95.0, 60.0);
        negative.volume = -1.0;
        assert!(raw_score(&negative).is_err());
    }

    // =========================================================================
    // distribute Tests
    // =========================================================================

    #[test]
    fn test_distribute_neutral() {
        let dist = distribute(50);
        // total = 150
        assert_eq!(dist.bullish, 33);
        assert_eq!(dist.bearish, 33);
        assert_eq!(dist.sideways, 33);
        assert_eq!(dist.total(), 99);
    }

    #[test]
    fn test_distribute_extremes() {
        let top = distribute(100);
        assert_eq!((top.bullish, top.bearish, top.sideways), (100, 0, 0));

        let bottom = distribute(0);
        assert_eq!((bottom.bullish, bottom.bearish, bottom.sideways), (0, 100, 0));
    }

    #[test]
    fn test_distribute_sum_within_one() {
        for raw in 0..=100 {
            let dist = distribute(raw);
            assert!((99..=101).contains(&dist.total()), "raw {} -> {:?}", raw, dist);
            assert_eq!(dist.raw_score, raw);
        }
    }

    #[test]
    fn test_score_is_deterministic() {
        let case = inputs(101.0, 100.0, 102.0, 55.0);
        assert_eq!(score(&case).unwrap(), score(&case).unwrap());
    }

    #[test]
    fn test_volume_ratio_fallback() {
        assert_eq!(volume_ratio(1500.0, 1000.0), 1.5);
        assert_eq!(volume_ratio(1500.0, 0.0), 1.0);
    }
}
