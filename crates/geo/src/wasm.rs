//! WASM bindings for the geo crate.
//!
//! These bindings let the browser front end share the exact distance and
//! formatting rules used by the server-side feed.

use crate::{calculate_distances, distance_miles, format_distance, miles_to_km, Coordinate, DistanceUnit, LocationItem};
use wasm_bindgen::prelude::*;

/// Calculate distance between two coordinates.
///
/// # Returns
/// Distance in miles, rounded to one decimal place
#[wasm_bindgen]
pub fn distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> Result<f64, JsValue> {
    let from = Coordinate::new(lat1, lng1);
    let to = Coordinate::new(lat2, lng2);
    from.validate().map_err(|e| JsValue::from_str(&e.to_string()))?;
    to.validate().map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(distance_miles(&from, &to))
}

/// Convert miles to kilometers.
#[wasm_bindgen(js_name = milesToKm)]
pub fn miles_to_km_js(miles: f64) -> f64 {
    miles_to_km(miles)
}

/// Format a distance for display.
///
/// # Arguments
/// * `miles` - Distance in miles
/// * `unit` - `"miles"` or `"km"`
#[wasm_bindgen(js_name = formatDistance)]
pub fn format_distance_js(miles: f64, unit: &str) -> Result<String, JsValue> {
    let unit: DistanceUnit = unit.parse().map_err(|e: crate::GeoError| JsValue::from_str(&e.to_string()))?;
    Ok(format_distance(miles, unit))
}

/// Calculate distances from the user location to multiple events.
///
/// # Arguments
/// * `user_lat` - User's latitude
/// * `user_lng` - User's longitude
/// * `items_json` - JSON array of `{ id, location: { latitude, longitude } }`
///
/// # Returns
/// JSON array of `{ id, distance }`
#[wasm_bindgen(js_name = calculateEventDistances)]
pub fn calculate_event_distances(user_lat: f64, user_lng: f64, items_json: &str) -> Result<String, JsValue> {
    let origin = Coordinate::new(user_lat, user_lng);
    origin.validate().map_err(|e| JsValue::from_str(&e.to_string()))?;

    let items: Vec<LocationItem> = serde_json::from_str(items_json)
        .map_err(|e| JsValue::from_str(&format!("JSON parse error: {}", e)))?;

    let results = calculate_distances(&origin, &items);

    serde_json::to_string(&results)
        .map_err(|e| JsValue::from_str(&format!("JSON serialize error: {}", e)))
}
