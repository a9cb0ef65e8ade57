//! Integration tests for the indicator and scoring core

use marketprob::services::signals::indicators::{rsi, sma};
use marketprob::services::signals::probability::{distribute, raw_score};
use marketprob::services::signals::{score, AnalysisError, Analyzer, ScoreInputs};
use marketprob::types::{DailyBar, PriceVolumeSeries, QuoteSnapshot};

fn daily_series(closes: &[f64], volumes: &[f64]) -> PriceVolumeSeries {
    closes
        .iter()
        .zip(volumes)
        .enumerate()
        .map(|(i, (&close, &volume))| DailyBar {
            time: 1_704_067_200_000 + i as i64 * 86_400_000,
            close,
            volume,
        })
        .collect::<Vec<_>>()
        .into()
}

// =============================================================================
// Moving average
// =============================================================================

#[test]
fn test_sma_of_full_series() {
    assert_eq!(sma(&[10.0, 20.0, 30.0, 40.0, 50.0], 5).unwrap(), 30.0);
}

#[test]
fn test_sma_window_larger_than_series_is_zero() {
    assert_eq!(sma(&[1.0, 2.0, 3.0], 5).unwrap(), 0.0);
}

#[test]
fn test_sma_rejects_zero_window() {
    assert_eq!(
        sma(&[1.0], 0),
        Err(AnalysisError::InvalidInput(
            "SMA window must be a positive integer".to_string()
        ))
    );
}

// =============================================================================
// RSI
// =============================================================================

#[test]
fn test_rsi_reference_series() {
    let value = rsi(&[10.0, 12.0, 11.0, 13.0, 12.0, 14.0], 3).unwrap();
    assert!((value - 80.0).abs() < 1e-9, "got {}", value);
}

#[test]
fn test_rsi_short_series_is_neutral() {
    assert_eq!(rsi(&[1.0, 2.0], 14).unwrap(), 50.0);
}

#[test]
fn test_rsi_without_losses_is_100() {
    assert_eq!(rsi(&[1.0, 1.0, 2.0, 3.0, 3.0], 4).unwrap(), 100.0);
}

// =============================================================================
// Probability scorer
// =============================================================================

#[test]
fn test_score_reference_case() {
    let dist = score(&ScoreInputs {
        current_price: 105.0,
        sma20: 100.0,
        sma50: 95.0,
        rsi: 60.0,
        volume: 1200.0,
        avg_volume: 1000.0,
    })
    .unwrap();

    assert_eq!(dist.raw_score, 80);
    assert_eq!((dist.bullish, dist.bearish, dist.sideways), (67, 17, 17));
    assert!((99..=101).contains(&dist.total()));
}

#[test]
fn test_score_is_clamped_for_any_rule_outcome() {
    let prices = [0.0, 99.0, 100.0, 101.0, 1000.0];
    let rsis = [0.0, 30.0, 30.5, 49.9, 50.0, 50.1, 69.9, 70.0, 100.0];
    let volumes = [0.0, 1000.0, 1201.0, 10_000.0];

    for &price in &prices {
        for &rsi in &rsis {
            for &volume in &volumes {
                for &avg_volume in &[0.0, 1000.0] {
                    let raw = raw_score(&ScoreInputs {
                        current_price: price,
                        sma20: 100.0,
                        sma50: 100.0,
                        rsi,
                        volume,
                        avg_volume,
                    })
                    .unwrap();
                    assert!(raw <= 100);
                }
            }
        }
    }
}

#[test]
fn test_distribution_shares() {
    for raw in 0..=100 {
        let dist = distribute(raw);
        assert!((99..=101).contains(&dist.total()));
        assert!(dist.bullish >= dist.bearish || raw < 50);
    }
}

// =============================================================================
// Analyzer pipeline
// =============================================================================

#[test]
fn test_analyzer_matches_individual_indicators() {
    let closes: Vec<f64> = (0..80).map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0).collect();
    let volumes: Vec<f64> = (0..80).map(|i| 1000.0 + i as f64 * 10.0).collect();
    let series = daily_series(&closes, &volumes);

    let analysis = Analyzer::new()
        .analyze(&series, &QuoteSnapshot::default())
        .unwrap();

    assert_eq!(analysis.indicators.sma20, sma(&closes, 20).unwrap());
    assert_eq!(analysis.indicators.sma50, sma(&closes, 50).unwrap());
    assert_eq!(analysis.indicators.rsi, rsi(&closes, 14).unwrap());

    let avg_volume = sma(&volumes, 10).unwrap();
    assert_eq!(analysis.indicators.vol_ratio, volumes[79] / avg_volume);
    assert_eq!(analysis.price, closes[79]);
}

#[test]
fn test_analyzer_is_pure() {
    let closes: Vec<f64> = (0..60).map(|i| 50.0 + i as f64 % 7.0).collect();
    let volumes = vec![500.0; 60];
    let series = daily_series(&closes, &volumes);
    let quote = QuoteSnapshot {
        price: Some(53.0),
        volume: Some(900.0),
        change_percent: Some(0.8),
    };

    let analyzer = Analyzer::new();
    let first = analyzer.analyze(&series, &quote).unwrap();
    let second = analyzer.analyze(&series, &quote).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_analyzer_serializes_for_presentation() {
    let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
    let volumes = vec![1000.0; 60];
    let analysis = Analyzer::new()
        .analyze(&daily_series(&closes, &volumes), &QuoteSnapshot::default())
        .unwrap();

    let json = serde_json::to_value(analysis).unwrap();
    assert_eq!(json["indicators"]["sma20"], "109.50");
    assert_eq!(json["indicators"]["sma50"], "124.50");
    assert_eq!(json["indicators"]["rsi"], "100.00");
    assert_eq!(json["indicators"]["volRatio"], "1.00");
    assert_eq!(json["probabilities"]["rawScore"], 65);
}

#[test]
fn test_analyzer_serializes_tie_averages_upward() {
    let mut closes = vec![100.0; 60];
    closes[0] = 102.5;
    let volumes = vec![1000.0; 60];
    let analysis = Analyzer::new()
        .analyze(&daily_series(&closes, &volumes), &QuoteSnapshot::default())
        .unwrap();

    assert_eq!(analysis.indicators.sma20, 100.125);
    let json = serde_json::to_value(analysis).unwrap();
    assert_eq!(json["indicators"]["sma20"], "100.13");
    assert_eq!(json["indicators"]["sma50"], "100.05");
}
