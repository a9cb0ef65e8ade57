use chrono::NaiveDate;
use std::env;
use std::time::Duration;

use crate::types::SectorDefinition;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// First day of daily history requested from the provider.
    pub history_start: NaiveDate,
    /// Minimum number of daily bars required before analysis.
    pub min_history_days: usize,
    /// Exchange suffix appended to bare tickers (e.g. ".NS").
    pub default_exchange_suffix: String,
    /// How long sector results are reused (seconds, 0 = no caching).
    pub sector_cache_ttl_secs: u64,
    /// Provider request timeout (seconds).
    pub provider_timeout_secs: u64,
    /// Sectors shown on the heatmap.
    pub sectors: Vec<SectorDefinition>,
}

/// Parse a sector list.
///
/// Format: "Banking:HDFCBANK.NS|ICICIBANK.NS;IT:TCS.NS|INFY.NS". Entries
/// without a name or without symbols are skipped.
pub fn parse_sectors(raw: &str) -> Vec<SectorDefinition> {
    raw.split(';')
        .filter_map(|entry| {
            let (name, symbols) = entry.split_once(':')?;
            let name = name.trim();
            let symbols: Vec<String> = symbols
                .split('|')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();

            if name.is_empty() || symbols.is_empty() {
                None
            } else {
                Some(SectorDefinition {
                    name: name.to_string(),
                    symbols,
                })
            }
        })
        .collect()
}

/// Built-in NSE sector list.
pub fn default_sectors() -> Vec<SectorDefinition> {
    vec![
        SectorDefinition::new(
            "Banking",
            &[
                "HDFCBANK.NS",
                "ICICIBANK.NS",
                "SBIN.NS",
                "KOTAKBANK.NS",
                "AXISBANK.NS",
            ],
        ),
        SectorDefinition::new(
            "IT",
            &["TCS.NS", "INFY.NS", "HCLTECH.NS", "WIPRO.NS", "TECHM.NS"],
        ),
        SectorDefinition::new(
            "Auto",
            &["MARUTI.NS", "TATAMOTORS.NS", "M&M.NS", "BAJAJ-AUTO.NS"],
        ),
        SectorDefinition::new(
            "Pharma",
            &["SUNPHARMA.NS", "DRREDDY.NS", "CIPLA.NS", "DIVISLAB.NS"],
        ),
        SectorDefinition::new(
            "FMCG",
            &["HINDUNILVR.NS", "ITC.NS", "NESTLEIND.NS", "BRITANNIA.NS"],
        ),
        SectorDefinition::new(
            "Energy",
            &["RELIANCE.NS", "ONGC.NS", "NTPC.NS", "POWERGRID.NS"],
        ),
        SectorDefinition::new("Metals", &["TATASTEEL.NS", "JSWSTEEL.NS", "HINDALCO.NS"]),
    ]
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let sectors = env::var("SECTORS")
            .ok()
            .map(|s| parse_sectors(&s))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(default_sectors);

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3001),
            history_start: env::var("HISTORY_START")
                .ok()
                .and_then(|v| NaiveDate::parse_from_str(&v, "%Y-%m-%d").ok())
                .unwrap_or_else(default_history_start),
            min_history_days: env::var("MIN_HISTORY_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(50),
            default_exchange_suffix: env::var("DEFAULT_EXCHANGE_SUFFIX")
                .unwrap_or_else(|_| ".NS".to_string()),
            sector_cache_ttl_secs: env::var("SECTOR_CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            provider_timeout_secs: env::var("PROVIDER_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            sectors,
        }
    }

    pub fn sector_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.sector_cache_ttl_secs)
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs)
    }
}

fn default_history_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or(NaiveDate::MIN)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            history_start: default_history_start(),
            min_history_days: 50,
            default_exchange_suffix: ".NS".to_string(),
            sector_cache_ttl_secs: 60,
            provider_timeout_secs: 30,
            sectors: default_sectors(),
        }
    }
}
