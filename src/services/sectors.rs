//! Sector heatmap aggregation.

use futures_util::future::join_all;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::services::cache::TtlCache;
use crate::sources::YahooFinanceClient;
use crate::types::{SectorBias, SectorDefinition, SectorPerformance};

const CACHE_KEY: &str = "sectors";

/// Average the day change of each sector and classify its bias.
///
/// `changes` maps symbol to percent change; symbols missing from it are
/// treated as failed fetches and left out of the average. Sectors with no
/// fetched symbols are omitted. The result is sorted by change, highest first.
pub fn aggregate(
    sectors: &[SectorDefinition],
    changes: &HashMap<String, f64>,
) -> Vec<SectorPerformance> {
    let mut results: Vec<SectorPerformance> = sectors
        .iter()
        .filter_map(|sector| {
            let fetched: Vec<f64> = sector
                .symbols
                .iter()
                .filter_map(|symbol| changes.get(symbol).copied())
                .collect();

            if fetched.is_empty() {
                return None;
            }

            let avg_change = fetched.iter().sum::<f64>() / fetched.len() as f64;

            Some(SectorPerformance {
                name: sector.name.clone(),
                change: (avg_change * 100.0).round() / 100.0,
                bias: SectorBias::from_change(avg_change),
            })
        })
        .collect();

    results.sort_by(|a, b| b.change.total_cmp(&a.change));
    results
}

/// Fetches quotes for every tracked symbol and aggregates them per sector.
pub struct SectorService {
    client: Arc<YahooFinanceClient>,
    sectors: Vec<SectorDefinition>,
    cache: TtlCache<Vec<SectorPerformance>>,
}

impl SectorService {
    pub fn new(
        client: Arc<YahooFinanceClient>,
        sectors: Vec<SectorDefinition>,
        cache_ttl: Duration,
    ) -> Arc<Self> {
        Arc::new(Self {
            client,
            sectors,
            cache: TtlCache::new(cache_ttl),
        })
    }

    /// Current sector performance, served from cache while fresh.
    pub async fn get_performance(&self) -> Vec<SectorPerformance> {
        if let Some(cached) = self.cache.get(CACHE_KEY) {
            debug!("Serving {} sectors from cache", cached.len());
            return cached;
        }

        let changes = self.fetch_changes().await;
        let results = aggregate(&self.sectors, &changes);

        if !results.is_empty() {
            self.cache.insert(CACHE_KEY, results.clone());
        }
        results
    }

    /// Fetch all quotes concurrently. Failed symbols are logged and skipped.
    async fn fetch_changes(&self) -> HashMap<String, f64> {
        let symbols: BTreeSet<&str> = self
            .sectors
            .iter()
            .flat_map(|sector| sector.symbols.iter().map(String::as_str))
            .collect();

        let quotes = join_all(symbols.iter().map(|&symbol| async move {
            (symbol, self.client.get_quote(symbol).await)
        }))
        .await;

        let total = quotes.len();
        let changes: HashMap<String, f64> = quotes
            .into_iter()
            .filter_map(|(symbol, quote)| match quote {
                Ok(quote) => Some((symbol.to_string(), quote.change_percent.unwrap_or(0.0))),
                Err(e) => {
                    warn!("Failed to fetch {}: {}", symbol, e);
                    None
                }
            })
            .collect();

        debug!("Fetched {}/{} sector quotes", changes.len(), total);
        changes
    }
}
