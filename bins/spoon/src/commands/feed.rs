//! Feed command - build the discovery feed from an events file

use super::read_json;
use anyhow::Result;
use chrono::{DateTime, Utc};
use spoon_cli::output::{print_event_list, print_skipped};
use spoon_feed::{build_discovery_feed, manual_location, FeedConfig, RawEvent};
use std::collections::HashSet;
use std::path::Path;

/// Run feed command
pub fn run(
    events: &Path,
    lat: f64,
    lon: f64,
    seen: Vec<String>,
    now: Option<DateTime<Utc>>,
    json: bool,
    config: &FeedConfig,
) -> Result<()> {
    let user = manual_location(lat, lon).map_err(spoon_core::Error::from)?;
    let raw: Vec<RawEvent> = read_json(events)?;
    let seen: HashSet<String> = seen.into_iter().collect();
    let now = now.unwrap_or_else(Utc::now);

    let feed = build_discovery_feed(&raw, &user, &seen, now).map_err(spoon_core::Error::from)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&feed)?);
        return Ok(());
    }

    print_event_list("Discover", &feed.events, config.display.unit);
    print_skipped(&feed.skipped);
    Ok(())
}
