//! Integration tests for the trading session clock

use chrono::{FixedOffset, TimeZone, Utc};
use marketprob::services::session::{is_open_at, status_at, CLOSED_MESSAGE, LIVE_MESSAGE};

#[test]
fn test_tuesday_ten_am_ist_is_live() {
    // 04:30 UTC is 10:00 IST; 2024-03-05 is a Tuesday.
    let instant = Utc.with_ymd_and_hms(2024, 3, 5, 4, 30, 0).single().unwrap();
    let status = status_at(&instant);
    assert!(status.is_open);
    assert_eq!(status.message, "Market is LIVE");
}

#[test]
fn test_saturday_is_closed() {
    let instant = Utc.with_ymd_and_hms(2024, 3, 9, 6, 0, 0).single().unwrap();
    let status = status_at(&instant);
    assert!(!status.is_open);
    assert_eq!(status.message, "Market Closed • Opens 09:15 AM");
}

#[test]
fn test_closing_minute_boundary() {
    // 10:00 UTC = 15:30 IST, 10:01 UTC = 15:31 IST.
    let at_close = Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).single().unwrap();
    let after_close = Utc.with_ymd_and_hms(2024, 3, 5, 10, 1, 0).single().unwrap();
    assert!(is_open_at(&at_close));
    assert!(!is_open_at(&after_close));
}

#[test]
fn test_other_timezones_are_normalized() {
    // 23:45 on Monday in New York (UTC-5) is 10:15 Tuesday IST.
    let new_york = FixedOffset::west_opt(5 * 3600).unwrap();
    let instant = new_york
        .with_ymd_and_hms(2024, 3, 4, 23, 45, 0)
        .single()
        .unwrap();
    assert_eq!(status_at(&instant).message, LIVE_MESSAGE);
}

#[test]
fn test_status_is_deterministic() {
    let instant = Utc.with_ymd_and_hms(2024, 3, 8, 12, 0, 0).single().unwrap();
    assert_eq!(status_at(&instant), status_at(&instant));
    assert_eq!(status_at(&instant).message, CLOSED_MESSAGE);
}
