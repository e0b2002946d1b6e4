//! Validated parsing of loosely-typed store documents.
//!
//! The store hands back documents without a schema. Every document goes
//! through [`parse_event`] before the pipeline sees it; a document that fails
//! is reported as a [`MalformedRecord`] and the rest of the batch carries on.

use crate::model::{Event, Location};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use spoon_core::validation::Validator;
use thiserror::Error;
use tracing::warn;

/// A store document: its identifier plus whatever fields it carries.
///
/// Deserializing never fails for a single document, so one bad element
/// cannot abort a batch. A numeric `id` is kept as text, any other non-text
/// `id` becomes empty, and a non-object element becomes a document with no
/// fields. [`parse_event`] then reports what is missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct RawEvent {
    /// Document identifier
    pub id: String,
    /// Remaining document fields
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl RawEvent {
    /// Creates a document from an identifier and a JSON object.
    ///
    /// Non-object values produce a document with no fields.
    pub fn new(id: impl Into<String>, fields: Value) -> Self {
        let fields = match fields {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Serializes a typed event back into document form.
    pub fn from_event(event: &Event) -> Self {
        let mut fields = match serde_json::to_value(event) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };
        fields.remove("id");
        Self {
            id: event.id.clone(),
            fields,
        }
    }

    fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name).filter(|v| !v.is_null())
    }

    fn text(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Value::as_str)
    }
}

impl From<Value> for RawEvent {
    fn from(value: Value) -> Self {
        let mut fields = match value {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        let id = match fields.remove("id") {
            Some(Value::String(id)) => id,
            Some(Value::Number(id)) => id.to_string(),
            _ => String::new(),
        };
        Self { id, fields }
    }
}

/// A document that failed the schema check.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[error("Malformed event {event_id}: {joined}", joined = .reasons.join("; "))]
pub struct MalformedRecord {
    /// Identifier of the skipped document
    pub event_id: String,
    /// One line per failed check
    pub reasons: Vec<String>,
}

/// Parses a timestamp in any of the forms the store produces.
///
/// Accepts RFC 3339 strings, epoch milliseconds, and `{ seconds, nanoseconds }`
/// objects (leading underscores allowed, as in exported Firestore data).
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => match n.as_i64() {
            Some(millis) => DateTime::from_timestamp_millis(millis),
            None => n
                .as_f64()
                .filter(|f| f.is_finite())
                .and_then(|f| DateTime::from_timestamp_millis(f.round() as i64)),
        },
        Value::Object(map) => {
            let seconds = map
                .get("seconds")
                .or_else(|| map.get("_seconds"))
                .and_then(Value::as_i64)?;
            let nanos = map
                .get("nanoseconds")
                .or_else(|| map.get("_nanoseconds"))
                .and_then(Value::as_u64)
                .unwrap_or(0);
            DateTime::from_timestamp(seconds, u32::try_from(nanos).ok()?)
        }
        _ => None,
    }
}

/// Parses a location object `{ latitude, longitude, address? }`.
pub fn parse_location(value: &Value) -> std::result::Result<Location, String> {
    let map = value
        .as_object()
        .ok_or_else(|| "expected an object with latitude and longitude".to_string())?;

    let latitude = map
        .get("latitude")
        .and_then(Value::as_f64)
        .ok_or_else(|| "latitude must be a number".to_string())?;
    let longitude = map
        .get("longitude")
        .and_then(Value::as_f64)
        .ok_or_else(|| "longitude must be a number".to_string())?;
    let address = map
        .get("address")
        .and_then(Value::as_str)
        .unwrap_or_default();

    let location = Location::new(latitude, longitude, address);
    location
        .coordinate()
        .validate()
        .map_err(|e| e.to_string())?;

    Ok(location)
}

/// Schema check for a single document.
///
/// Required: `name`, `venue` (non-empty text), `date`, `createdAt`
/// (parseable timestamps) and `location` (valid coordinate). Every failed
/// check is listed in the returned [`MalformedRecord`].
pub fn parse_event(raw: &RawEvent) -> std::result::Result<Event, MalformedRecord> {
    let name = raw.text("name");
    let venue = raw.text("venue");
    let date_value = raw.field("date");
    let created_value = raw.field("createdAt");
    let location_value = raw.field("location");

    let date = date_value.and_then(parse_timestamp);
    let created_at = created_value.and_then(parse_timestamp);
    let location = location_value.map(parse_location);

    let checked = Validator::new()
        .required("id", Some(raw.id.as_str()))
        .required("name", name)
        .required("venue", venue)
        .present("date", date_value.is_some())
        .custom("date", || {
            (date_value.is_some() && date.is_none()).then(|| "unrecognized timestamp".to_string())
        })
        .present("createdAt", created_value.is_some())
        .custom("createdAt", || {
            (created_value.is_some() && created_at.is_none())
                .then(|| "unrecognized timestamp".to_string())
        })
        .present("location", location_value.is_some())
        .custom("location", || location.as_ref().and_then(|l| l.clone().err()))
        .validate();

    match (checked.is_valid(), name, venue, date, created_at, location) {
        (true, Some(name), Some(venue), Some(date), Some(created_at), Some(Ok(location))) => {
            Ok(Event {
                id: raw.id.clone(),
                name: name.to_string(),
                venue: venue.to_string(),
                description: raw.text("description").unwrap_or_default().to_string(),
                date,
                location,
                image_url: raw.text("imageUrl").map(str::to_string),
                link: raw.text("link").map(str::to_string),
                host_website: raw.text("hostWebsite").map(str::to_string),
                created_at,
                is_active: raw
                    .field("isActive")
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
            })
        }
        _ => Err(MalformedRecord {
            event_id: raw.id.clone(),
            reasons: checked.errors().iter().map(ToString::to_string).collect(),
        }),
    }
}

/// Parses a batch, splitting it into events and skipped documents.
///
/// Each skipped document is logged at `warn`; input order is preserved in
/// both outputs.
pub fn parse_events(raw: &[RawEvent]) -> (Vec<Event>, Vec<MalformedRecord>) {
    let mut events = Vec::with_capacity(raw.len());
    let mut skipped = Vec::new();

    for document in raw {
        match parse_event(document) {
            Ok(event) => events.push(event),
            Err(malformed) => {
                warn!(
                    event_id = %malformed.event_id,
                    reasons = %malformed.reasons.join("; "),
                    "Skipping event with missing or invalid fields"
                );
                skipped.push(malformed);
            }
        }
    }

    (events, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures;
    use serde_json::json;

    fn document() -> Value {
        json!({
            "name": "Jazz Night",
            "venue": "Churchill Grounds",
            "description": "Late set",
            "date": "2030-03-05T20:00:00Z",
            "createdAt": {"seconds": 1_893_456_000, "nanoseconds": 0},
            "location": {"latitude": 33.7722, "longitude": -84.3858, "address": "660 Peachtree St"},
            "imageUrl": "https://example.com/jazz.jpg",
            "isActive": true
        })
    }

    #[test]
    fn test_parse_complete_document() {
        let event = parse_event(&RawEvent::new("e1", document())).unwrap();
        assert_eq!(event.id, "e1");
        assert_eq!(event.venue, "Churchill Grounds");
        assert_eq!(event.date.to_rfc3339(), "2030-03-05T20:00:00+00:00");
        assert_eq!(event.created_at.timestamp(), 1_893_456_000);
        assert_eq!(event.location.address, "660 Peachtree St");
        assert_eq!(event.image_url.as_deref(), Some("https://example.com/jazz.jpg"));
        assert!(event.link.is_none());
        assert!(event.is_active);
    }

    #[test]
    fn test_missing_venue_is_malformed() {
        let mut doc = document();
        doc.as_object_mut().unwrap().remove("venue");

        let err = parse_event(&RawEvent::new("e2", doc)).unwrap_err();
        assert_eq!(err.event_id, "e2");
        assert_eq!(err.reasons.len(), 1);
        assert!(err.reasons[0].starts_with("venue"));
    }

    #[test]
    fn test_every_missing_field_is_reported() {
        let err = parse_event(&RawEvent::new("e3", json!({"isActive": true}))).unwrap_err();
        let fields: Vec<&str> = err
            .reasons
            .iter()
            .map(|r| r.split(':').next().unwrap())
            .collect();
        assert_eq!(fields, ["name", "venue", "date", "createdAt", "location"]);
    }

    #[test]
    fn test_null_and_empty_fields_count_as_missing() {
        let mut doc = document();
        doc["name"] = json!("");
        doc["date"] = Value::Null;

        let err = parse_event(&RawEvent::new("e4", doc)).unwrap_err();
        assert!(err.reasons.iter().any(|r| r.starts_with("name")));
        assert!(err.reasons.iter().any(|r| r.starts_with("date")));
    }

    #[test]
    fn test_out_of_range_location_is_malformed() {
        let mut doc = document();
        doc["location"] = json!({"latitude": 133.0, "longitude": -84.0});

        let err = parse_event(&RawEvent::new("e5", doc)).unwrap_err();
        assert!(err.reasons[0].starts_with("location"));
    }

    #[test]
    fn test_unparseable_timestamp_is_malformed() {
        let mut doc = document();
        doc["date"] = json!("next tuesday");

        let err = parse_event(&RawEvent::new("e6", doc)).unwrap_err();
        assert!(err.reasons[0].contains("unrecognized timestamp"));
    }

    #[test]
    fn test_missing_is_active_defaults_false() {
        let mut doc = document();
        doc.as_object_mut().unwrap().remove("isActive");
        let event = parse_event(&RawEvent::new("e7", doc)).unwrap();
        assert!(!event.is_active);
    }

    #[test]
    fn test_timestamp_forms() {
        let expected = DateTime::parse_from_rfc3339("2030-03-05T20:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let millis = expected.timestamp_millis();

        assert_eq!(parse_timestamp(&json!("2030-03-05T20:00:00Z")), Some(expected));
        assert_eq!(parse_timestamp(&json!("2030-03-05T15:00:00-05:00")), Some(expected));
        assert_eq!(parse_timestamp(&json!(millis)), Some(expected));
        assert_eq!(
            parse_timestamp(&json!({"_seconds": expected.timestamp(), "_nanoseconds": 0})),
            Some(expected)
        );
        assert_eq!(parse_timestamp(&json!(true)), None);
        assert_eq!(parse_timestamp(&json!({"nanoseconds": 5})), None);
    }

    #[test]
    fn test_parse_events_splits_batch() {
        let mut broken = document();
        broken.as_object_mut().unwrap().remove("venue");

        let raw = vec![
            RawEvent::new("bad", broken),
            RawEvent::new("good", document()),
        ];
        let (events, skipped) = parse_events(&raw);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "good");
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].event_id, "bad");
    }

    #[test]
    fn test_from_event_round_trips_through_parser() {
        let event = fixtures::event("e8", "Open Mic", 9);
        let raw = RawEvent::from_event(&event);
        assert!(!raw.fields.contains_key("id"));
        assert_eq!(parse_event(&raw).unwrap(), event);
    }

    #[test]
    fn test_raw_event_deserializes_flat_document() {
        let raw: RawEvent = serde_json::from_value(json!({"id": "e9", "name": "Trivia"})).unwrap();
        assert_eq!(raw.id, "e9");
        assert_eq!(raw.fields["name"], "Trivia");
        assert!(!raw.fields.contains_key("id"));
    }

    #[test]
    fn test_wrongly_typed_documents_do_not_abort_batch() {
        let mut good = document();
        good["id"] = json!("good");
        let mut numeric = document();
        numeric["id"] = json!(42);
        let mut object_id = document();
        object_id["id"] = json!({"nested": true});

        let raw: Vec<RawEvent> =
            serde_json::from_value(json!([good, numeric, null, "text", object_id])).unwrap();
        assert_eq!(raw.len(), 5);
        assert_eq!(raw[1].id, "42");
        assert!(raw[2].fields.is_empty());

        let (events, skipped) = parse_events(&raw);
        let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["good", "42"]);

        assert_eq!(skipped.len(), 3);
        assert!(skipped.iter().all(|s| s.event_id.is_empty()));
        assert!(skipped[0].reasons[0].starts_with("id"));
        assert!(skipped[2].reasons.iter().all(|r| r.starts_with("id")));
    }

    #[test]
    fn test_malformed_record_serializes_camel_case() {
        let record = MalformedRecord {
            event_id: "e1".into(),
            reasons: vec!["venue: Field is required".into()],
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["eventId"], "e1");
        assert!(value.get("event_id").is_none());
    }

    #[test]
    fn test_malformed_record_display() {
        let record = MalformedRecord {
            event_id: "e1".into(),
            reasons: vec!["name: Field is required".into(), "venue: Field is required".into()],
        };
        assert_eq!(
            record.to_string(),
            "Malformed event e1: name: Field is required; venue: Field is required"
        );
    }
}
