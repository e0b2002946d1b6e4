//! Event discovery for Southern Spoon.
//!
//! This crate turns loosely-typed store documents into the swipe feed and the
//! saved list:
//!
//! - **Record parsing**: schema check with every failure reported, never fatal
//! - **Discovery pipeline**: active and upcoming, unseen, distance-annotated, soonest first
//! - **Saved lists**: deduplication and stable sorting by date, distance or name
//! - **Collaborators**: async store traits with an in-memory implementation
//! - **Location**: device providers, manual entry and Nominatim geocoding
//!
//! # Example
//!
//! ```
//! use spoon_feed::{sort_saved_events, SortKey};
//!
//! assert!(sort_saved_events(Vec::new(), SortKey::Distance).is_empty());
//! assert_eq!("name".parse::<SortKey>().unwrap(), SortKey::Name);
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod dedupe;
pub mod display;
mod error;
pub mod location;
mod model;
pub mod pipeline;
pub mod record;
pub mod service;
pub mod sort;
pub mod store;

pub use config::{DisplayConfig, FeedConfig, GeocoderConfig, LocationOptions, SavedConfig};
pub use dedupe::{dedupe_by_event_id, EventRef};
pub use display::{format_card_date, format_event_date, format_event_time};
pub use error::{FeedError, Result};
pub use location::{
    manual_location, GeocodeError, Geocoder, GeolocationProvider, LocationError,
    NominatimGeocoder, StaticLocation,
};
pub use model::{
    Event, EventWithDistance, InteractionAction, InteractionRecord, Location, SavedEntry,
    SavedRecord,
};
pub use pipeline::{
    build_discovery_feed, discovery_feed_from_events, is_upcoming, seen_event_ids, DiscoveryFeed,
};
pub use record::{parse_event, parse_events, parse_timestamp, MalformedRecord, RawEvent};
pub use service::DiscoveryService;
pub use sort::{compare_names, sort_saved_events, sort_saved_events_with, MissingDistance, SortKey};
pub use store::{EventStore, InMemoryStore, InteractionLog, SavedEvents, StoreError, StoreResult};
