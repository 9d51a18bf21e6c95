//! Shared helpers for Philippine local time.
//!
//! "Local" throughout the service means Philippine Standard Time, a fixed
//! UTC+8 offset with no daylight saving. It is independent of the server's
//! own time zone.
//!
//! - `local_hour`: hour of day (0–23) of an instant in PH time
//! - `at_local_hour`: same PH calendar day, pinned to an exact hour
//! - `unix_seconds` / `iso_millis`: the two timestamp encodings of the wire schema

use chrono::{DateTime, FixedOffset, Offset, SecondsFormat, Timelike, Utc};

/// Philippine Standard Time offset from UTC, in seconds.
pub(crate) const PH_UTC_OFFSET_SECS: i32 = 8 * 3600;

fn local_offset() -> FixedOffset {
    FixedOffset::east_opt(PH_UTC_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Hour of day (0–23) of `instant` in PH time.
pub(crate) fn local_hour(instant: DateTime<Utc>) -> u32 {
    instant.with_timezone(&local_offset()).hour()
}

/// The instant at `hour`:00:00.000 PH time on the PH calendar day of `instant`.
///
/// Returns `instant` unchanged for an out-of-range hour.
pub(crate) fn at_local_hour(instant: DateTime<Utc>, hour: u32) -> DateTime<Utc> {
    let offset = local_offset();
    instant
        .with_timezone(&offset)
        .date_naive()
        .and_hms_opt(hour, 0, 0)
        .and_then(|naive| naive.and_local_timezone(offset).single())
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or(instant)
}

/// Seconds since the epoch with millisecond precision.
pub(crate) fn unix_seconds(instant: DateTime<Utc>) -> f64 {
    instant.timestamp_millis() as f64 / 1000.0
}

/// ISO 8601 in UTC with milliseconds, e.g. `2026-03-01T04:00:00.000Z`.
pub(crate) fn iso_millis(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}
