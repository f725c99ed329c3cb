//! Axis and tooltip labels for epoch-millisecond timestamps.

use crate::shared::Granularity;
use chrono::{DateTime, TimeZone, Utc};
use std::fmt::Display;

/// Label a timestamp in UTC: `14:05` for hour/day windows, `Mar 5` otherwise.
///
/// Timestamps outside chrono's representable range yield an empty label.
pub fn format_timestamp(timestamp_ms: i64, granularity: Granularity) -> String {
    format_timestamp_in(timestamp_ms, granularity, &Utc)
}

/// Same as [`format_timestamp`], rendered in the given time zone
/// (e.g. `chrono::Local` for a desktop renderer).
pub fn format_timestamp_in<Tz>(timestamp_ms: i64, granularity: Granularity, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let Some(utc) = DateTime::<Utc>::from_timestamp_millis(timestamp_ms) else {
        return String::new();
    };
    let local = utc.with_timezone(tz);

    if granularity.shows_time_of_day() {
        local.format("%H:%M").to_string()
    } else {
        local.format("%b %-d").to_string()
    }
}
