//! Saved command - show a user's saved list

use super::read_json;
use anyhow::Result;
use spoon_cli::output::print_event_list;
use spoon_feed::{
    DiscoveryService, FeedConfig, InMemoryStore, MissingDistance, RawEvent, SavedRecord, SortKey,
};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Presentation options for the saved list
pub struct Options {
    /// Sort key
    pub sort: SortKey,
    /// Placement of events without a distance
    pub missing_distance: MissingDistance,
    /// Output as JSON
    pub json: bool,
}

/// Run saved command
pub async fn run(
    events: &Path,
    saved: &Path,
    user: &str,
    options: Options,
    config: &FeedConfig,
) -> Result<()> {
    let raw: Vec<RawEvent> = read_json(events)?;
    let records: Vec<SavedRecord> = read_json(saved)?;
    debug!(events = raw.len(), saved = records.len(), "Loaded saved-list inputs");

    let store = Arc::new(InMemoryStore::with_events(raw));
    for record in records {
        store.insert_saved_record(record).await;
    }

    let service = DiscoveryService::new(store).with_missing_distance(options.missing_distance);
    let list = service
        .saved_events(user, options.sort)
        .await
        .map_err(spoon_core::Error::from)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&list)?);
        return Ok(());
    }

    print_event_list(
        &format!("Saved events by {}", options.sort),
        &list,
        config.display.unit,
    );
    Ok(())
}
