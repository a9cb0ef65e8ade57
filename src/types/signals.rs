use serde::{Serialize, Serializer};

/// Format a float with exactly two decimal places.
///
/// A value lying exactly halfway between two cents rounds away from zero;
/// everything else rounds to the nearest cent. A double can only sit exactly
/// on such a tie when it is an odd multiple of 1/8.
pub fn to_fixed_2(value: f64) -> String {
    let eighths = value * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        let cents = (value.abs() * 100.0).ceil() / 100.0;
        return format!("{:.2}", cents.copysign(value));
    }
    format!("{:.2}", value)
}

fn two_decimals<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&to_fixed_2(*value))
}

/// Derived indicators for one analysis run.
///
/// Values carry full precision internally and are rendered with two decimal
/// places only when serialized. `sma20`/`sma50` of 0 mean "not enough data",
/// `rsi` of 50 is the insufficient-data neutral value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSet {
    #[serde(serialize_with = "two_decimals")]
    pub rsi: f64,
    #[serde(serialize_with = "two_decimals")]
    pub sma20: f64,
    #[serde(serialize_with = "two_decimals")]
    pub sma50: f64,
    #[serde(serialize_with = "two_decimals")]
    pub vol_ratio: f64,
}

/// Three-way bias distribution in whole percentages.
///
/// Each share is rounded on its own, so the three may sum to 99, 100 or 101.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbabilityDistribution {
    pub bullish: u32,
    pub bearish: u32,
    pub sideways: u32,
    /// Clamped bias score in [0, 100] before the distribution mapping.
    pub raw_score: u32,
}

impl ProbabilityDistribution {
    /// Sum of the three rounded shares.
    pub fn total(&self) -> u32 {
        self.bullish + self.bearish + self.sideways
    }
}

/// Indicator set and bias distribution for one instrument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Analysis {
    pub price: f64,
    pub change: f64,
    pub indicators: IndicatorSet,
    pub probabilities: ProbabilityDistribution,
}

/// Whether the trading session is open at a given instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    pub is_open: bool,
    pub message: String,
}
