//! First-wins deduplication by event id.

use crate::model::{Event, EventWithDistance, InteractionRecord, SavedEntry, SavedRecord};
use std::collections::HashSet;

/// Anything that refers to an event.
pub trait EventRef {
    /// The referenced event id.
    fn event_id(&self) -> &str;
}

impl EventRef for Event {
    fn event_id(&self) -> &str {
        &self.id
    }
}

impl EventRef for EventWithDistance {
    fn event_id(&self) -> &str {
        &self.event.id
    }
}

impl EventRef for SavedRecord {
    fn event_id(&self) -> &str {
        &self.event_id
    }
}

impl EventRef for SavedEntry {
    fn event_id(&self) -> &str {
        &self.event_id
    }
}

impl EventRef for InteractionRecord {
    fn event_id(&self) -> &str {
        &self.event_id
    }
}

impl<T: EventRef + ?Sized> EventRef for &T {
    fn event_id(&self) -> &str {
        (**self).event_id()
    }
}

/// Keeps the first record for each event id, preserving survivor order.
pub fn dedupe_by_event_id<T: EventRef>(records: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|record| seen.insert(record.event_id().to_string()))
        .collect()
}
