//! Trading session window for a fixed-hours exchange (NSE, UTC+05:30).

use chrono::{DateTime, Datelike, FixedOffset, TimeZone, Timelike, Weekday};

use crate::types::SessionStatus;

/// Exchange offset from UTC in seconds (+05:30).
pub const EXCHANGE_UTC_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// Session opens at 09:15, minutes since midnight.
pub const OPEN_MINUTE: u32 = 9 * 60 + 15;

/// Session closes at 15:30 inclusive, minutes since midnight.
pub const CLOSE_MINUTE: u32 = 15 * 60 + 30;

pub const LIVE_MESSAGE: &str = "Market is LIVE";

/// Shown whenever the session is closed, regardless of the next open date.
pub const CLOSED_MESSAGE: &str = "Market Closed • Opens 09:15 AM";

/// `instant` on the exchange wall clock.
fn exchange_time<Tz: TimeZone>(instant: &DateTime<Tz>) -> Option<DateTime<FixedOffset>> {
    FixedOffset::east_opt(EXCHANGE_UTC_OFFSET_SECS).map(|offset| instant.with_timezone(&offset))
}

/// Whether the session is open at `instant`, in any timezone.
pub fn is_open_at<Tz: TimeZone>(instant: &DateTime<Tz>) -> bool {
    exchange_time(instant).is_some_and(|local| {
        let is_weekday = !matches!(local.weekday(), Weekday::Sat | Weekday::Sun);
        let minute_of_day = local.hour() * 60 + local.minute();

        is_weekday && (OPEN_MINUTE..=CLOSE_MINUTE).contains(&minute_of_day)
    })
}

/// Session status and display message at `instant`.
pub fn status_at<Tz: TimeZone>(instant: &DateTime<Tz>) -> SessionStatus {
    let is_open = is_open_at(instant);
    SessionStatus {
        is_open,
        message: if is_open { LIVE_MESSAGE } else { CLOSED_MESSAGE }.to_string(),
    }
}
