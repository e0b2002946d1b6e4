//! Date and time formatting for event cards and lists (US English, UTC).

use chrono::{DateTime, Utc};

/// Full date, e.g. `"Saturday, March 15, 2025"`.
pub fn format_event_date(date: &DateTime<Utc>) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Short card date, e.g. `"Sat, Mar 15"`.
pub fn format_card_date(date: &DateTime<Utc>) -> String {
    date.format("%a, %b %-d").to_string()
}

/// Twelve-hour clock time, e.g. `"7:30 PM"`.
pub fn format_event_time(date: &DateTime<Utc>) -> String {
    date.format("%-I:%M %p").to_string()
}
