//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output. Row builders return plain
//! strings so they can be tested; the `print_*` helpers add color.

use owo_colors::OwoColorize;
use spoon_core::Error;
use spoon_feed::{format_card_date, format_event_time, EventWithDistance, MalformedRecord};
use spoon_geo::{format_distance, DistanceUnit};

/// Status message helpers
pub struct Status;

impl Status {
    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// One list line: position, name, venue, when and how far.
///
/// Events without a distance show `-` in the distance column.
pub fn event_row(position: usize, event: &EventWithDistance, unit: DistanceUnit) -> String {
    let distance = event
        .distance
        .map(|miles| format_distance(miles, unit))
        .unwrap_or_else(|| "-".to_string());

    format!(
        "{:>3}. {} @ {} | {} {} | {}",
        position,
        event.event.name,
        event.event.venue,
        format_card_date(&event.event.date),
        format_event_time(&event.event.date),
        distance
    )
}

/// Print a numbered event list under a header
pub fn print_event_list(title: &str, events: &[EventWithDistance], unit: DistanceUnit) {
    Status::header(&format!("{} ({})", title, format_count(events.len(), "event", "events")));
    for (index, event) in events.iter().enumerate() {
        let row = event_row(index + 1, event, unit);
        match &event.saved_event_id {
            Some(handle) => println!("{} {}", row, format!("[{}]", handle).dimmed()),
            None => println!("{}", row),
        }
    }
}

/// Warn about documents the schema check dropped
pub fn print_skipped(skipped: &[MalformedRecord]) {
    if skipped.is_empty() {
        return;
    }
    Status::warning(&format!(
        "Skipped {}",
        format_count(skipped.len(), "malformed record", "malformed records")
    ));
    for record in skipped {
        eprintln!("    {}", record.to_string().dimmed());
    }
}

/// Print an error with its code and recovery suggestion
pub fn print_error(err: &Error) {
    Status::error(&format!("{} {}", err.code.to_string().bold(), err.message));
    if let Some(context) = &err.context {
        eprintln!("  {} {}", "context:".dimmed(), context);
    }
    if let Some(suggestion) = &err.suggestion {
        eprintln!("  {} {}", "hint:".cyan(), suggestion);
    }
}
