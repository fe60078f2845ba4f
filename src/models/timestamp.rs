//! Timestamps are stored as fixed-width RFC 3339 UTC strings with
//! microsecond precision, so lexical order matches chronological order.

use chrono::{DateTime, Duration, SecondsFormat, Utc};

#[must_use]
pub fn format(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[must_use]
pub fn now() -> String {
    format(Utc::now())
}

/// Returns a timestamp strictly later than `previous`, normally the current
/// time. Unparseable input falls back to the current time.
#[must_use]
pub fn advance(previous: &str) -> String {
    let current = Utc::now();

    match DateTime::parse_from_rfc3339(previous) {
        Ok(prev) => {
            let floor = prev.with_timezone(&Utc) + Duration::microseconds(1);
            format(current.max(floor))
        }
        Err(_) => format(current),
    }
}
