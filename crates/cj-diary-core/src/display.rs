//! Text helpers for the entry list and the header.

use chrono::{TimeZone, Utc};
use cj_api_types::DiaryEntry;
use std::fmt::Display;

/// Keep the first `head` and last `tail` characters around `...`.
/// Strings that are already short come back unchanged.
pub fn shorten(value: &str, head: usize, tail: usize) -> String {
    let count = value.chars().count();
    if count <= head + tail {
        return value.to_owned();
    }
    let start: String = value.chars().take(head).collect();
    let end: String = value.chars().skip(count - tail).collect();
    format!("{start}...{end}")
}

pub fn short_address(address: &str) -> String {
    shorten(address, 6, 4)
}

pub fn short_hash(hash: &str) -> String {
    shorten(hash, 8, 8)
}

pub fn welcome(address: &str) -> String {
    format!("Welcome, {}", short_address(address))
}

pub fn entry_title(entry: &DiaryEntry) -> String {
    format!("Entry #{}", entry.id)
}

pub fn transaction_label(hash: &str) -> String {
    format!("TX: {}", short_hash(hash))
}

/// `March 5, 2024 at 9:07 AM` in the given zone. `None` when the
/// timestamp is out of range.
pub fn format_entry_date<Tz>(timestamp_ms: i64, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let instant = Utc.timestamp_millis_opt(timestamp_ms).single()?;
    Some(
        instant
            .with_timezone(tz)
            .format("%B %-d, %Y at %-I:%M %p")
            .to_string(),
    )
}
