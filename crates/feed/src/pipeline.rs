//! The discovery pipeline: parse, filter, annotate, order.
//!
//! Every function here is synchronous and pure. The same inputs always give
//! the same output, and nothing is cached between calls.

use crate::error::Result;
use crate::model::{Event, EventWithDistance, InteractionRecord};
use crate::record::{parse_events, MalformedRecord, RawEvent};
use chrono::{DateTime, Utc};
use serde::Serialize;
use spoon_geo::{annotate, Coordinate};
use std::collections::HashSet;
use tracing::debug;

/// Output of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DiscoveryFeed {
    /// Swipeable events, soonest first
    pub events: Vec<EventWithDistance>,
    /// Documents dropped by the schema check
    pub skipped: Vec<MalformedRecord>,
}

/// True when the event is listed and has not started yet.
#[inline]
pub fn is_upcoming(event: &Event, now: DateTime<Utc>) -> bool {
    event.is_active && event.date > now
}

/// Collapses an interaction log into the set of event ids the user has seen.
pub fn seen_event_ids<'a, I>(interactions: I) -> HashSet<String>
where
    I: IntoIterator<Item = &'a InteractionRecord>,
{
    interactions
        .into_iter()
        .map(|record| record.event_id.clone())
        .collect()
}

/// Builds the discovery feed from raw store documents.
///
/// The user location is checked first and an invalid one is an error.
/// Malformed documents are skipped and listed in [`DiscoveryFeed::skipped`].
///
/// # Example
/// ```
/// use chrono::{TimeZone, Utc};
/// use serde_json::json;
/// use spoon_feed::{build_discovery_feed, RawEvent};
/// use spoon_geo::Coordinate;
/// use std::collections::HashSet;
///
/// let raw = vec![RawEvent::new("e1", json!({
///     "name": "Jazz Night",
///     "venue": "Churchill Grounds",
///     "date": "2030-03-05T20:00:00Z",
///     "createdAt": "2030-01-01T00:00:00Z",
///     "location": {"latitude": 33.7722, "longitude": -84.3858},
///     "isActive": true
/// }))];
///
/// let now = Utc.with_ymd_and_hms(2030, 3, 1, 0, 0, 0).unwrap();
/// let user = Coordinate::new(33.7490, -84.3880);
/// let feed = build_discovery_feed(&raw, &user, &HashSet::new(), now).unwrap();
///
/// assert_eq!(feed.events.len(), 1);
/// assert!(feed.events[0].distance.unwrap() < 5.0);
/// ```
pub fn build_discovery_feed(
    raw_events: &[RawEvent],
    user_location: &Coordinate,
    seen_event_ids: &HashSet<String>,
    now: DateTime<Utc>,
) -> Result<DiscoveryFeed> {
    user_location.validate()?;

    let (events, skipped) = parse_events(raw_events);
    let events = discovery_feed_from_events(events, user_location, seen_event_ids, now)?;

    Ok(DiscoveryFeed { events, skipped })
}

/// Runs the pipeline on events that already passed the schema check.
pub fn discovery_feed_from_events(
    events: Vec<Event>,
    user_location: &Coordinate,
    seen_event_ids: &HashSet<String>,
    now: DateTime<Utc>,
) -> Result<Vec<EventWithDistance>> {
    user_location.validate()?;

    let total = events.len();
    let candidates: Vec<Event> = events
        .into_iter()
        .filter(|event| is_upcoming(event, now))
        .filter(|event| !seen_event_ids.contains(&event.id))
        .collect();

    let mut feed: Vec<EventWithDistance> =
        annotate(user_location, candidates, |event| event.location.coordinate())
            .into_iter()
            .map(|(event, distance)| EventWithDistance::new(event, Some(distance)))
            .collect();

    // Stable: equal dates keep input order.
    feed.sort_by_key(|entry| entry.event.date);

    debug!(
        total,
        kept = feed.len(),
        seen = seen_event_ids.len(),
        "Built discovery feed"
    );

    Ok(feed)
}
