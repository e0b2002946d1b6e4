//! Swipe workflow over the store collaborators.
//!
//! The user id and location are passed to every call; the service holds no
//! per-user state. Store failures propagate unchanged and nothing is retried.

use crate::dedupe::dedupe_by_event_id;
use crate::error::Result;
use crate::model::{EventWithDistance, InteractionAction};
use crate::pipeline::{build_discovery_feed, DiscoveryFeed};
use crate::record::parse_events;
use crate::sort::{sort_saved_events_with, MissingDistance, SortKey};
use crate::store::{EventStore, InteractionLog, SavedEvents};
use chrono::{DateTime, Utc};
use spoon_geo::Coordinate;
use spoon_telemetry::{metrics, Timer};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Discovery and saved-list operations for one backend.
#[derive(Clone)]
pub struct DiscoveryService {
    events: Arc<dyn EventStore>,
    interactions: Arc<dyn InteractionLog>,
    saved: Arc<dyn SavedEvents>,
    missing_distance: MissingDistance,
}

impl DiscoveryService {
    /// Uses one backend for all three collaborators.
    pub fn new<S>(store: Arc<S>) -> Self
    where
        S: EventStore + InteractionLog + SavedEvents + 'static,
    {
        Self::from_parts(store.clone(), store.clone(), store)
    }

    /// Uses separate collaborators.
    pub fn from_parts(
        events: Arc<dyn EventStore>,
        interactions: Arc<dyn InteractionLog>,
        saved: Arc<dyn SavedEvents>,
    ) -> Self {
        Self {
            events,
            interactions,
            saved,
            missing_distance: MissingDistance::default(),
        }
    }

    /// Sets where undefined distances go when the saved list is sorted by distance.
    pub fn with_missing_distance(mut self, missing: MissingDistance) -> Self {
        self.missing_distance = missing;
        self
    }

    /// Swipeable events for the user, soonest first.
    #[instrument(skip(self))]
    pub async fn discovery_feed(
        &self,
        user_id: &str,
        location: &Coordinate,
        now: DateTime<Utc>,
    ) -> Result<DiscoveryFeed> {
        location.validate()?;

        let raw = self.events.fetch_active_future_events(now).await?;
        let seen = self.interactions.interacted_event_ids(user_id).await?;

        let timer = Timer::start("feed.build_ms");
        let feed = build_discovery_feed(&raw, location, &seen, now)?;
        timer.stop();

        metrics().increment_by("feed.skipped_records", feed.skipped.len() as u64);
        info!(
            events = feed.events.len(),
            skipped = feed.skipped.len(),
            "Discovery feed ready"
        );
        Ok(feed)
    }

    /// Records a right swipe and saves the event with its current distance.
    ///
    /// Returns the saved record id.
    #[instrument(skip(self, event), fields(event_id = %event.event.id))]
    pub async fn accept(&self, user_id: &str, event: &EventWithDistance) -> Result<String> {
        let event_id = event.event.id.as_str();
        self.interactions
            .record_interaction(user_id, event_id, InteractionAction::Accept)
            .await?;
        let saved_id = self.saved.save_event(user_id, event_id, event.distance).await?;

        metrics().increment("feed.accepted");
        info!(saved_event_id = %saved_id, "Event saved");
        Ok(saved_id)
    }

    /// Records a left swipe.
    #[instrument(skip(self))]
    pub async fn reject(&self, user_id: &str, event_id: &str) -> Result<()> {
        self.interactions
            .record_interaction(user_id, event_id, InteractionAction::Reject)
            .await?;

        metrics().increment("feed.rejected");
        info!("Event rejected");
        Ok(())
    }

    /// Whether the user has swiped on the event either way.
    pub async fn has_interacted(&self, user_id: &str, event_id: &str) -> Result<bool> {
        Ok(self.interactions.has_interacted(user_id, event_id).await?)
    }

    /// The user's saved list, sorted by `key`.
    ///
    /// Duplicate saves collapse to the first one. Events that were deleted or
    /// no longer parse are left out. Each entry carries its distance at save
    /// time and the saved record id.
    #[instrument(skip(self))]
    pub async fn saved_events(&self, user_id: &str, key: SortKey) -> Result<Vec<EventWithDistance>> {
        let entries = dedupe_by_event_id(self.saved.list_saved_events(user_id).await?);
        if entries.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = entries.iter().map(|entry| entry.event_id.clone()).collect();
        let (events, skipped) = parse_events(&self.events.get_events(&ids).await?);
        metrics().increment_by("feed.skipped_records", skipped.len() as u64);

        let mut by_id: HashMap<String, _> = events
            .into_iter()
            .map(|event| (event.id.clone(), event))
            .collect();

        let mut saved = Vec::with_capacity(entries.len());
        for entry in entries {
            match by_id.remove(&entry.event_id) {
                Some(event) => saved.push(EventWithDistance {
                    event,
                    distance: entry.distance_at_save,
                    saved_event_id: Some(entry.saved_event_id),
                }),
                None => warn!(event_id = %entry.event_id, "Saved event no longer available"),
            }
        }

        Ok(sort_saved_events_with(saved, key, self.missing_distance))
    }

    /// Deletes a saved record and every swipe on the event, returning it to
    /// the discovery rotation.
    #[instrument(skip(self))]
    pub async fn remove_saved(
        &self,
        user_id: &str,
        saved_event_id: &str,
        event_id: &str,
    ) -> Result<()> {
        self.saved.remove_saved_event(saved_event_id).await?;
        let removed = self.interactions.remove_interactions(user_id, event_id).await?;

        info!(interactions_removed = removed, "Saved event removed");
        Ok(())
    }

    /// Forgets every left swipe so rejected events show up again.
    #[instrument(skip(self))]
    pub async fn reset_rejected(&self, user_id: &str) -> Result<usize> {
        let removed = self
            .interactions
            .remove_interactions_with_action(user_id, InteractionAction::Reject)
            .await?;

        info!(removed, "Rejected events reset");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FeedError;
    use crate::model::fixtures::{event, march};
    use crate::model::SavedRecord;
    use crate::record::RawEvent;
    use crate::store::{InMemoryStore, StoreError};
    use serde_json::json;

    const ATLANTA: Coordinate = Coordinate::new(33.7490, -84.3880);

    fn store() -> Arc<InMemoryStore> {
        Arc::new(InMemoryStore::with_events(vec![
            RawEvent::from_event(&event("e3", "Cumbia Night", 12)),
            RawEvent::from_event(&event("e1", "Banana Fest", 4)),
            RawEvent::from_event(&event("e2", "apple Fair", 8)),
            RawEvent::new("broken", json!({"name": "No venue", "isActive": true})),
        ]))
    }

    fn ids(events: &[EventWithDistance]) -> Vec<&str> {
        events.iter().map(|e| e.event.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_feed_excludes_swiped_events() {
        let store = store();
        let service = DiscoveryService::new(store.clone());

        let feed = service.discovery_feed("u1", &ATLANTA, march(1)).await.unwrap();
        assert_eq!(ids(&feed.events), ["e1", "e2", "e3"]);
        assert_eq!(feed.skipped.len(), 1);

        let first = feed.events[0].clone();
        service.accept("u1", &first).await.unwrap();
        service.reject("u1", "e2").await.unwrap();

        let feed = service.discovery_feed("u1", &ATLANTA, march(1)).await.unwrap();
        assert_eq!(ids(&feed.events), ["e3"]);

        let other = service.discovery_feed("u2", &ATLANTA, march(1)).await.unwrap();
        assert_eq!(other.events.len(), 3);
    }

    #[tokio::test]
    async fn test_feed_rejects_invalid_location() {
        let service = DiscoveryService::new(store());
        let result = service
            .discovery_feed("u1", &Coordinate::new(0.0, 190.0), march(1))
            .await;
        assert!(matches!(result, Err(FeedError::InvalidCoordinate(_))));
    }

    #[tokio::test]
    async fn test_accept_saves_distance() {
        let store = store();
        let service = DiscoveryService::new(store.clone());
        let feed = service.discovery_feed("u1", &ATLANTA, march(1)).await.unwrap();
        let chosen = &feed.events[1];

        let saved_id = service.accept("u1", chosen).await.unwrap();
        assert!(service.has_interacted("u1", "e2").await.unwrap());

        let records = store.saved_records().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, saved_id);
        assert_eq!(records[0].distance_at_save, chosen.distance);
    }

    #[tokio::test]
    async fn test_reject_does_not_save() {
        let store = store();
        let service = DiscoveryService::new(store.clone());

        service.reject("u1", "e1").await.unwrap();
        assert!(service.has_interacted("u1", "e1").await.unwrap());
        assert!(store.saved_records().await.is_empty());
    }

    #[tokio::test]
    async fn test_saved_events_sorted_and_deduplicated() {
        let store = store();
        for (id, event_id, distance) in [
            ("s1", "e3", Some(2.0)),
            ("s2", "e1", None),
            ("s3", "e2", Some(7.5)),
            ("s4", "e3", Some(9.9)),
            ("s5", "deleted", Some(1.0)),
            ("s6", "broken", Some(1.0)),
        ] {
            store
                .insert_saved_record(SavedRecord {
                    id: id.into(),
                    user_id: "u1".into(),
                    event_id: event_id.into(),
                    saved_at: march(1),
                    distance_at_save: distance,
                })
                .await;
        }
        let service = DiscoveryService::new(store);

        let by_name = service.saved_events("u1", SortKey::Name).await.unwrap();
        let names: Vec<&str> = by_name.iter().map(|e| e.event.name.as_str()).collect();
        assert_eq!(names, ["apple Fair", "Banana Fest", "Cumbia Night"]);
        assert_eq!(by_name[2].saved_event_id.as_deref(), Some("s1"));
        assert_eq!(by_name[2].distance, Some(2.0));

        let by_distance = service.saved_events("u1", SortKey::Distance).await.unwrap();
        assert_eq!(ids(&by_distance), ["e1", "e3", "e2"]);

        let by_date = service.saved_events("u1", SortKey::Date).await.unwrap();
        assert_eq!(ids(&by_date), ["e1", "e2", "e3"]);
    }

    #[tokio::test]
    async fn test_missing_distance_last_policy() {
        let store = store();
        let service = DiscoveryService::new(store.clone()).with_missing_distance(MissingDistance::Last);
        store.save_event("u1", "e1", None).await.unwrap();
        store.save_event("u1", "e2", Some(3.0)).await.unwrap();

        let saved = service.saved_events("u1", SortKey::Distance).await.unwrap();
        assert_eq!(ids(&saved), ["e2", "e1"]);
    }

    #[tokio::test]
    async fn test_empty_saved_list() {
        let service = DiscoveryService::new(store());
        assert!(service.saved_events("u1", SortKey::Date).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_saved_returns_event_to_rotation() {
        let store = store();
        let service = DiscoveryService::new(store.clone());
        let feed = service.discovery_feed("u1", &ATLANTA, march(1)).await.unwrap();
        let saved_id = service.accept("u1", &feed.events[0]).await.unwrap();

        service.remove_saved("u1", &saved_id, "e1").await.unwrap();

        assert!(!service.has_interacted("u1", "e1").await.unwrap());
        assert!(service.saved_events("u1", SortKey::Date).await.unwrap().is_empty());
        let feed = service.discovery_feed("u1", &ATLANTA, march(1)).await.unwrap();
        assert_eq!(feed.events.len(), 3);
    }

    #[tokio::test]
    async fn test_remove_unknown_saved_event() {
        let service = DiscoveryService::new(store());
        let err = service.remove_saved("u1", "missing", "e1").await.unwrap_err();
        assert!(matches!(err, FeedError::Store(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_reset_rejected_keeps_accepts() {
        let store = store();
        let service = DiscoveryService::new(store.clone());
        let feed = service.discovery_feed("u1", &ATLANTA, march(1)).await.unwrap();
        service.accept("u1", &feed.events[0]).await.unwrap();
        service.reject("u1", "e2").await.unwrap();
        service.reject("u1", "e3").await.unwrap();

        assert_eq!(service.reset_rejected("u1").await.unwrap(), 2);

        let feed = service.discovery_feed("u1", &ATLANTA, march(1)).await.unwrap();
        assert_eq!(ids(&feed.events), ["e2", "e3"]);
        assert_eq!(service.reset_rejected("u1").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_write_failure_propagates() {
        let store = store();
        let service = DiscoveryService::new(store.clone());
        store.set_fail_writes(true);

        let err = service.reject("u1", "e1").await.unwrap_err();
        assert!(matches!(err, FeedError::Store(StoreError::Write(_))));
        assert!(store.interactions().await.is_empty());
    }
}
