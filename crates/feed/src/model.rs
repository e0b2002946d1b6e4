//! Domain types shared by the pipeline, the stores and the service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use spoon_geo::Coordinate;
use std::fmt;

/// Where an event takes place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Street address as entered by the curator
    #[serde(default)]
    pub address: String,
}

impl Location {
    /// Creates a location.
    pub fn new(latitude: f64, longitude: f64, address: impl Into<String>) -> Self {
        Self {
            latitude,
            longitude,
            address: address.into(),
        }
    }

    /// The coordinate part of the location.
    #[inline]
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// A curated event, immutable once parsed from the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Store-assigned identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Venue name
    pub venue: String,
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// When the event starts
    pub date: DateTime<Utc>,
    /// Venue location
    pub location: Location,
    /// Card artwork
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Ticket or info link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Host's website
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_website: Option<String>,
    /// When the curator created the record
    pub created_at: DateTime<Utc>,
    /// Whether the curator still lists the event
    pub is_active: bool,
}

/// An event annotated for presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventWithDistance {
    /// The event itself
    #[serde(flatten)]
    pub event: Event,
    /// Miles from the user, or the distance frozen at save time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    /// Handle of the saved record, used for removal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_event_id: Option<String>,
}

impl EventWithDistance {
    /// Wraps an event with a distance and no saved record.
    pub fn new(event: Event, distance: Option<f64>) -> Self {
        Self {
            event,
            distance,
            saved_event_id: None,
        }
    }
}

/// A swipe decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractionAction {
    /// Swiped right; the event is saved
    #[serde(rename = "yes", alias = "accept")]
    Accept,
    /// Swiped left
    #[serde(rename = "no", alias = "reject")]
    Reject,
}

impl fmt::Display for InteractionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InteractionAction::Accept => f.write_str("accept"),
            InteractionAction::Reject => f.write_str("reject"),
        }
    }
}

/// One entry of the append-only interaction log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionRecord {
    /// Record identifier
    pub id: String,
    /// Who swiped
    pub user_id: String,
    /// Which event
    pub event_id: String,
    /// Accept or reject
    pub action: InteractionAction,
    /// When the swipe was recorded
    pub timestamp: DateTime<Utc>,
}

/// A persisted saved event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRecord {
    /// Record identifier
    pub id: String,
    /// Owner
    pub user_id: String,
    /// Saved event
    pub event_id: String,
    /// When the event was saved
    pub saved_at: DateTime<Utc>,
    /// Distance in miles at the moment of saving
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_at_save: Option<f64>,
}

/// What a saved-list read returns for each record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedEntry {
    /// Handle for removal
    pub saved_event_id: String,
    /// Saved event
    pub event_id: String,
    /// Distance frozen at save time
    pub distance_at_save: Option<f64>,
}

impl From<&SavedRecord> for SavedEntry {
    fn from(record: &SavedRecord) -> Self {
        Self {
            saved_event_id: record.id.clone(),
            event_id: record.event_id.clone(),
            distance_at_save: record.distance_at_save,
        }
    }
}
