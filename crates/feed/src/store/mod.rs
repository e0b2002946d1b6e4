//! Collaborator interfaces for event, interaction and saved-event storage.
//!
//! The pipeline never talks to a database directly. Services take these
//! traits as `Arc<dyn ...>` so hosted backends and [`InMemoryStore`] are
//! interchangeable.

mod memory;

pub use memory::InMemoryStore;

use crate::model::{InteractionAction, SavedEntry};
use crate::record::RawEvent;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use thiserror::Error;

/// Store failure. Writes are attempted once and never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A read failed
    #[error("Store read failed: {0}")]
    Read(String),

    /// A write failed
    #[error("Store write failed: {0}")]
    Write(String),

    /// The addressed record does not exist
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Record kind
        kind: &'static str,
        /// Record id
        id: String,
    },
}

/// Result type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Source of curated events.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Documents flagged active with a date after `now`.
    ///
    /// The schema check is the caller's job; documents come back as stored.
    async fn fetch_active_future_events(&self, now: DateTime<Utc>) -> StoreResult<Vec<RawEvent>>;

    /// Batch detail lookup. Unknown ids are omitted from the result.
    async fn get_events(&self, ids: &[String]) -> StoreResult<Vec<RawEvent>>;
}

/// Append-only swipe log.
#[async_trait]
pub trait InteractionLog: Send + Sync {
    /// Appends one interaction.
    async fn record_interaction(
        &self,
        user_id: &str,
        event_id: &str,
        action: InteractionAction,
    ) -> StoreResult<()>;

    /// Every event id the user has swiped on, either way.
    async fn interacted_event_ids(&self, user_id: &str) -> StoreResult<HashSet<String>>;

    /// Whether the user has swiped on the event.
    async fn has_interacted(&self, user_id: &str, event_id: &str) -> StoreResult<bool>;

    /// Deletes every interaction for the pair; returns how many were removed.
    async fn remove_interactions(&self, user_id: &str, event_id: &str) -> StoreResult<usize>;

    /// Deletes the user's interactions with the given action.
    async fn remove_interactions_with_action(
        &self,
        user_id: &str,
        action: InteractionAction,
    ) -> StoreResult<usize>;
}

/// A user's saved list.
#[async_trait]
pub trait SavedEvents: Send + Sync {
    /// Persists a saved event and returns the new record id.
    async fn save_event(
        &self,
        user_id: &str,
        event_id: &str,
        distance_at_save: Option<f64>,
    ) -> StoreResult<String>;

    /// Saved entries in insertion order. Duplicates are possible.
    async fn list_saved_events(&self, user_id: &str) -> StoreResult<Vec<SavedEntry>>;

    /// Deletes one saved record.
    async fn remove_saved_event(&self, saved_event_id: &str) -> StoreResult<()>;
}
