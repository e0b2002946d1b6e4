//! Saved-list ordering.

use crate::error::FeedError;
use crate::model::EventWithDistance;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Which field the saved list is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Soonest first
    #[default]
    Date,
    /// Nearest first
    Distance,
    /// Alphabetical, ignoring case
    Name,
}

impl SortKey {
    /// Every key, in menu order.
    pub const ALL: [SortKey; 3] = [SortKey::Date, SortKey::Distance, SortKey::Name];

    /// Wire name of the key.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Date => "date",
            SortKey::Distance => "distance",
            SortKey::Name => "name",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(SortKey::Date),
            "distance" => Ok(SortKey::Distance),
            "name" => Ok(SortKey::Name),
            _ => Err(FeedError::UnknownSortKey(s.to_string())),
        }
    }
}

/// Where events without a distance go when sorting by distance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingDistance {
    /// Ordered as if the distance were zero
    #[default]
    TreatAsZero,
    /// After every event that has a distance
    Last,
}

impl MissingDistance {
    /// Wire name of the policy.
    pub fn as_str(&self) -> &'static str {
        match self {
            MissingDistance::TreatAsZero => "treat_as_zero",
            MissingDistance::Last => "last",
        }
    }
}

impl fmt::Display for MissingDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MissingDistance {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "treat_as_zero" | "zero" => Ok(MissingDistance::TreatAsZero),
            "last" => Ok(MissingDistance::Last),
            _ => Err(FeedError::UnknownMissingDistance(s.to_string())),
        }
    }
}

/// Case-insensitive name collation; exact comparison breaks case-only ties.
///
/// Names are compared by Unicode codepoint after lowercasing, not by a
/// locale collation table, so accented initials sort after `z`
/// (`"zebra"` before `"Éclair"`).
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn compare_distances(a: Option<f64>, b: Option<f64>, missing: MissingDistance) -> Ordering {
    match missing {
        MissingDistance::TreatAsZero => a.unwrap_or(0.0).total_cmp(&b.unwrap_or(0.0)),
        MissingDistance::Last => match (a, b) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    }
}

/// Sorts a saved list, treating undefined distances as zero.
///
/// # Example
/// ```
/// # use chrono::Utc;
/// # use spoon_feed::{Event, EventWithDistance, Location, SortKey, sort_saved_events};
/// # fn saved(id: &str, name: &str) -> EventWithDistance {
/// #     let now = Utc::now();
/// #     EventWithDistance::new(Event {
/// #         id: id.into(), name: name.into(), venue: "Venue".into(),
/// #         description: String::new(), date: now,
/// #         location: Location::new(33.7, -84.4, ""),
/// #         image_url: None, link: None, host_website: None,
/// #         created_at: now, is_active: true,
/// #     }, None)
/// # }
/// let sorted = sort_saved_events(
///     vec![saved("e1", "Banana Fest"), saved("e2", "apple Fair")],
///     SortKey::Name,
/// );
/// let names: Vec<&str> = sorted.iter().map(|e| e.event.name.as_str()).collect();
/// assert_eq!(names, ["apple Fair", "Banana Fest"]);
/// ```
pub fn sort_saved_events(events: Vec<EventWithDistance>, key: SortKey) -> Vec<EventWithDistance> {
    sort_saved_events_with(events, key, MissingDistance::default())
}

/// Sorts a saved list with an explicit undefined-distance policy.
///
/// Ties on the key are broken by event id, so the result depends only on the
/// set of inputs and sorting twice changes nothing.
pub fn sort_saved_events_with(
    mut events: Vec<EventWithDistance>,
    key: SortKey,
    missing: MissingDistance,
) -> Vec<EventWithDistance> {
    events.sort_by(|a, b| {
        let by_key = match key {
            SortKey::Date => a.event.date.cmp(&b.event.date),
            SortKey::Distance => compare_distances(a.distance, b.distance, missing),
            SortKey::Name => compare_names(&a.event.name, &b.event.name),
        };
        by_key.then_with(|| a.event.id.cmp(&b.event.id))
    });
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::with_distance;
    use proptest::prelude::*;

    fn ids(events: &[EventWithDistance]) -> Vec<&str> {
        events.iter().map(|e| e.event.id.as_str()).collect()
    }

    fn names(events: &[EventWithDistance]) -> Vec<&str> {
        events.iter().map(|e| e.event.name.as_str()).collect()
    }

    #[test]
    fn test_sort_by_date() {
        let events = vec![
            with_distance("e1", "C", 20, None),
            with_distance("e2", "A", 4, None),
            with_distance("e3", "B", 11, None),
        ];
        assert_eq!(ids(&sort_saved_events(events, SortKey::Date)), ["e2", "e3", "e1"]);
    }

    #[test]
    fn test_sort_by_name_ignores_case() {
        let events = vec![
            with_distance("e1", "Banana Fest", 5, None),
            with_distance("e2", "apple Fair", 6, None),
        ];
        assert_eq!(names(&sort_saved_events(events, SortKey::Name)), ["apple Fair", "Banana Fest"]);
    }

    #[test]
    fn test_sort_by_name_case_only_tie() {
        let events = vec![
            with_distance("e1", "jazz night", 5, None),
            with_distance("e2", "Jazz Night", 6, None),
        ];
        assert_eq!(names(&sort_saved_events(events, SortKey::Name)), ["Jazz Night", "jazz night"]);
    }

    #[test]
    fn test_compare_names_uses_codepoint_order() {
        assert_eq!(compare_names("zebra", "Éclair"), Ordering::Less);
        assert_eq!(compare_names("éclair", "Éclair"), Ordering::Greater);
    }

    #[test]
    fn test_sort_by_distance_treats_missing_as_zero() {
        let events = vec![
            with_distance("e1", "Far", 5, Some(12.5)),
            with_distance("e2", "Unknown", 5, None),
            with_distance("e3", "Near", 5, Some(0.4)),
        ];
        assert_eq!(ids(&sort_saved_events(events, SortKey::Distance)), ["e2", "e3", "e1"]);
    }

    #[test]
    fn test_sort_by_distance_missing_last() {
        let events = vec![
            with_distance("e1", "Far", 5, Some(12.5)),
            with_distance("e2", "Unknown", 5, None),
            with_distance("e3", "Near", 5, Some(0.4)),
        ];
        let sorted = sort_saved_events_with(events, SortKey::Distance, MissingDistance::Last);
        assert_eq!(ids(&sorted), ["e3", "e1", "e2"]);
    }

    #[test]
    fn test_key_ties_break_by_id() {
        let events = vec![
            with_distance("e9", "Same", 5, Some(1.0)),
            with_distance("e1", "Same", 5, Some(1.0)),
        ];
        for key in SortKey::ALL {
            assert_eq!(ids(&sort_saved_events(events.clone(), key)), ["e1", "e9"]);
        }
    }

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!("date".parse::<SortKey>().unwrap(), SortKey::Date);
        assert_eq!("Distance".parse::<SortKey>().unwrap(), SortKey::Distance);
        assert_eq!(" name ".parse::<SortKey>().unwrap(), SortKey::Name);
        assert!(matches!("price".parse::<SortKey>(), Err(FeedError::UnknownSortKey(k)) if k == "price"));
    }

    #[test]
    fn test_missing_distance_parsing() {
        assert_eq!("treat_as_zero".parse::<MissingDistance>().unwrap(), MissingDistance::TreatAsZero);
        assert_eq!("treat-as-zero".parse::<MissingDistance>().unwrap(), MissingDistance::TreatAsZero);
        assert_eq!("last".parse::<MissingDistance>().unwrap(), MissingDistance::Last);
        assert!("first".parse::<MissingDistance>().is_err());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&SortKey::Distance).unwrap(), "\"distance\"");
        assert_eq!(serde_json::to_string(&MissingDistance::TreatAsZero).unwrap(), "\"treat_as_zero\"");
    }

    fn arb_events() -> impl Strategy<Value = Vec<EventWithDistance>> {
        prop::collection::vec(
            (
                "[a-zA-Z ]{0,8}",
                1u32..28,
                prop::option::of(0.0f64..500.0),
            ),
            0..12,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (name, day, distance))| with_distance(&format!("e{i:02}"), &name, day, distance))
                .collect()
        })
    }

    fn arb_key() -> impl Strategy<Value = SortKey> {
        prop::sample::select(SortKey::ALL.to_vec())
    }

    fn arb_missing() -> impl Strategy<Value = MissingDistance> {
        prop::sample::select(vec![MissingDistance::TreatAsZero, MissingDistance::Last])
    }

    proptest! {
        #[test]
        fn prop_sort_is_idempotent(events in arb_events(), key in arb_key(), missing in arb_missing()) {
            let once = sort_saved_events_with(events, key, missing);
            let twice = sort_saved_events_with(once.clone(), key, missing);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_sort_ignores_prior_order(
            events in arb_events(),
            first in arb_key(),
            key in arb_key(),
        ) {
            let mut reversed = events.clone();
            reversed.reverse();

            let direct = sort_saved_events(events, key);
            let via_other = sort_saved_events(sort_saved_events(reversed, first), key);
            prop_assert_eq!(direct, via_other);
        }

        #[test]
        fn prop_sort_preserves_multiset(events in arb_events(), key in arb_key()) {
            let mut before: Vec<String> = events.iter().map(|e| e.event.id.clone()).collect();
            let mut after: Vec<String> = sort_saved_events(events, key)
                .iter()
                .map(|e| e.event.id.clone())
                .collect();
            before.sort();
            after.sort();
            prop_assert_eq!(before, after);
        }
    }
}
