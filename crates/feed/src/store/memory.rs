//! In-process store backing tests and the command-line tool.

use super::{EventStore, InteractionLog, SavedEvents, StoreError, StoreResult};
use crate::model::{InteractionAction, InteractionRecord, SavedEntry, SavedRecord};
use crate::record::{parse_timestamp, RawEvent};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Implements every store trait over in-memory collections.
///
/// Reads return records in insertion order. Writes can be made to fail with
/// [`InMemoryStore::set_fail_writes`] to exercise error paths.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    events: RwLock<Vec<RawEvent>>,
    interactions: RwLock<Vec<InteractionRecord>>,
    saved: RwLock<Vec<SavedRecord>>,
    fail_writes: AtomicBool,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given event documents.
    pub fn with_events(events: Vec<RawEvent>) -> Self {
        Self {
            events: RwLock::new(events),
            ..Self::default()
        }
    }

    /// Adds an event document.
    pub async fn insert_event(&self, event: RawEvent) {
        self.events.write().await.push(event);
    }

    /// Adds a saved record as-is, duplicates included.
    pub async fn insert_saved_record(&self, record: SavedRecord) {
        self.saved.write().await.push(record);
    }

    /// Snapshot of the interaction log.
    pub async fn interactions(&self) -> Vec<InteractionRecord> {
        self.interactions.read().await.clone()
    }

    /// Snapshot of every saved record.
    pub async fn saved_records(&self) -> Vec<SavedRecord> {
        self.saved.read().await.clone()
    }

    /// Makes every subsequent write fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_write(&self, what: &str) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(StoreError::Write(format!("{what} rejected by store")))
        } else {
            Ok(())
        }
    }
}

/// Documents whose date cannot be read pass through so the schema check can
/// report them.
fn is_active_future(raw: &RawEvent, now: DateTime<Utc>) -> bool {
    let active = raw.fields.get("isActive").and_then(Value::as_bool) == Some(true);
    let past = raw
        .fields
        .get("date")
        .and_then(parse_timestamp)
        .is_some_and(|date| date <= now);
    active && !past
}

#[async_trait]
impl EventStore for InMemoryStore {
    async fn fetch_active_future_events(&self, now: DateTime<Utc>) -> StoreResult<Vec<RawEvent>> {
        let events = self.events.read().await;
        Ok(events
            .iter()
            .filter(|raw| is_active_future(raw, now))
            .cloned()
            .collect())
    }

    async fn get_events(&self, ids: &[String]) -> StoreResult<Vec<RawEvent>> {
        let events = self.events.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| events.iter().find(|raw| &raw.id == id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl InteractionLog for InMemoryStore {
    async fn record_interaction(
        &self,
        user_id: &str,
        event_id: &str,
        action: InteractionAction,
    ) -> StoreResult<()> {
        self.check_write("interaction")?;
        self.interactions.write().await.push(InteractionRecord {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            event_id: event_id.to_string(),
            action,
            timestamp: Utc::now(),
        });
        Ok(())
    }

    async fn interacted_event_ids(&self, user_id: &str) -> StoreResult<HashSet<String>> {
        let log = self.interactions.read().await;
        Ok(log
            .iter()
            .filter(|record| record.user_id == user_id)
            .map(|record| record.event_id.clone())
            .collect())
    }

    async fn has_interacted(&self, user_id: &str, event_id: &str) -> StoreResult<bool> {
        let log = self.interactions.read().await;
        Ok(log
            .iter()
            .any(|record| record.user_id == user_id && record.event_id == event_id))
    }

    async fn remove_interactions(&self, user_id: &str, event_id: &str) -> StoreResult<usize> {
        self.check_write("interaction removal")?;
        let mut log = self.interactions.write().await;
        let before = log.len();
        log.retain(|record| !(record.user_id == user_id && record.event_id == event_id));
        Ok(before - log.len())
    }

    async fn remove_interactions_with_action(
        &self,
        user_id: &str,
        action: InteractionAction,
    ) -> StoreResult<usize> {
        self.check_write("interaction removal")?;
        let mut log = self.interactions.write().await;
        let before = log.len();
        log.retain(|record| !(record.user_id == user_id && record.action == action));
        Ok(before - log.len())
    }
}

#[async_trait]
impl SavedEvents for InMemoryStore {
    async fn save_event(
        &self,
        user_id: &str,
        event_id: &str,
        distance_at_save: Option<f64>,
    ) -> StoreResult<String> {
        self.check_write("saved event")?;
        let id = Uuid::new_v4().to_string();
        self.saved.write().await.push(SavedRecord {
            id: id.clone(),
            user_id: user_id.to_string(),
            event_id: event_id.to_string(),
            saved_at: Utc::now(),
            distance_at_save,
        });
        Ok(id)
    }

    async fn list_saved_events(&self, user_id: &str) -> StoreResult<Vec<SavedEntry>> {
        let saved = self.saved.read().await;
        Ok(saved
            .iter()
            .filter(|record| record.user_id == user_id)
            .map(SavedEntry::from)
            .collect())
    }

    async fn remove_saved_event(&self, saved_event_id: &str) -> StoreResult<()> {
        self.check_write("saved event removal")?;
        let mut saved = self.saved.write().await;
        let index = saved
            .iter()
            .position(|record| record.id == saved_event_id)
            .ok_or_else(|| StoreError::NotFound {
                kind: "Saved event",
                id: saved_event_id.to_string(),
            })?;
        saved.remove(index);
        Ok(())
    }
}
