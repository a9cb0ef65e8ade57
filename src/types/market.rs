use serde::{Deserialize, Serialize};

/// One daily record from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    /// Unix timestamp in milliseconds.
    pub time: i64,
    pub close: f64,
    pub volume: f64,
}

/// Daily price/volume history in provider order.
///
/// The series is never re-sorted: windowed indicators sample whatever order
/// the provider handed in. Yahoo returns oldest-first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceVolumeSeries {
    bars: Vec<DailyBar>,
}

impl PriceVolumeSeries {
    pub fn new(bars: Vec<DailyBar>) -> Self {
        Self { bars }
    }

    pub fn bars(&self) -> &[DailyBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Close prices in series order.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Volumes in series order.
    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.volume).collect()
    }

    /// The final record in series order.
    pub fn latest(&self) -> Option<&DailyBar> {
        self.bars.last()
    }
}

impl From<Vec<DailyBar>> for PriceVolumeSeries {
    fn from(bars: Vec<DailyBar>) -> Self {
        Self::new(bars)
    }
}

/// Current quote for an instrument. Any field may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSnapshot {
    pub price: Option<f64>,
    pub volume: Option<f64>,
    pub change_percent: Option<f64>,
}
