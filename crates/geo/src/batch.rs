//! Batch distance calculations with optional parallelism.
//!
//! Discovery feeds annotate every candidate event with its distance from the
//! user. Order of the input is always preserved in the output.

use crate::{distance_miles, Coordinate};
use serde::{Deserialize, Serialize};

/// Result of a distance calculation for a single item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceResult {
    /// The item ID
    pub id: String,
    /// Distance in miles, `None` if the item location is invalid
    pub distance: Option<f64>,
}

/// Input item for batch distance calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationItem {
    /// Item ID
    pub id: String,
    /// Item location
    pub location: Coordinate,
}

/// Pairs every item with its distance in miles from `origin`.
///
/// `locate` extracts the coordinate of an item. Items are returned in input
/// order. With the `parallel` feature the distances are computed on the rayon
/// pool; the result is identical either way.
///
/// # Example
/// ```
/// use spoon_geo::{annotate, Coordinate};
///
/// let origin = Coordinate::new(34.0522, -118.2437);
/// let venues = vec![("pier", Coordinate::new(34.0100, -118.4960))];
///
/// let annotated = annotate(&origin, venues, |(_, coord)| *coord);
/// assert_eq!(annotated[0].0 .0, "pier");
/// assert!(annotated[0].1 > 10.0);
/// ```
pub fn annotate<T, F>(origin: &Coordinate, items: Vec<T>, locate: F) -> Vec<(T, f64)>
where
    T: Send,
    F: Fn(&T) -> Coordinate + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        items
            .into_par_iter()
            .map(|item| {
                let distance = distance_miles(origin, &locate(&item));
                (item, distance)
            })
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        items
            .into_iter()
            .map(|item| {
                let distance = distance_miles(origin, &locate(&item));
                (item, distance)
            })
            .collect()
    }
}

/// Calculate distances from `origin` to multiple items.
///
/// Items with an out-of-range location get `distance: None` instead of a
/// meaningless number.
///
/// # Example
/// ```
/// use spoon_geo::{calculate_distances, Coordinate, LocationItem};
///
/// let items = vec![
///     LocationItem { id: "a".into(), location: Coordinate::new(40.7128, -74.0060) },
///     LocationItem { id: "b".into(), location: Coordinate::new(120.0, 0.0) },
/// ];
///
/// let results = calculate_distances(&Coordinate::new(34.0522, -118.2437), &items);
/// assert!(results[0].distance.is_some());
/// assert!(results[1].distance.is_none());
/// ```
pub fn calculate_distances(origin: &Coordinate, items: &[LocationItem]) -> Vec<DistanceResult> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        items
            .par_iter()
            .map(|item| calculate_single_distance(origin, item))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        items
            .iter()
            .map(|item| calculate_single_distance(origin, item))
            .collect()
    }
}

/// Calculate distance for a single item.
#[inline]
fn calculate_single_distance(origin: &Coordinate, item: &LocationItem) -> DistanceResult {
    let distance = item
        .location
        .is_valid()
        .then(|| distance_miles(origin, &item.location));

    DistanceResult {
        id: item.id.clone(),
        distance,
    }
}
