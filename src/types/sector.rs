use serde::{Deserialize, Serialize};

/// Direction a sector is leaning on the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectorBias {
    Bullish,
    Bearish,
    Neutral,
}

impl SectorBias {
    /// Average change above this (percent) is bullish, below its negation bearish.
    pub const THRESHOLD_PCT: f64 = 0.5;

    /// Classify an average percent change.
    pub fn from_change(avg_change: f64) -> Self {
        if avg_change > Self::THRESHOLD_PCT {
            SectorBias::Bullish
        } else if avg_change < -Self::THRESHOLD_PCT {
            SectorBias::Bearish
        } else {
            SectorBias::Neutral
        }
    }
}

/// Aggregated day performance for a sector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorPerformance {
    pub name: String,
    /// Mean percent change of the sector's symbols, rounded to two decimals.
    pub change: f64,
    pub bias: SectorBias,
}

/// A tracked sector and its member symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectorDefinition {
    pub name: String,
    pub symbols: Vec<String>,
}

impl SectorDefinition {
    pub fn new(name: impl Into<String>, symbols: &[&str]) -> Self {
        Self {
            name: name.into(),
            symbols: symbols.iter().map(|s| s.to_string()).collect(),
        }
    }
}
