//! Geocode command - resolve free text to a coordinate

use anyhow::Result;
use spoon_feed::{FeedConfig, FeedError, Geocoder, NominatimGeocoder};

/// Run geocode command
pub async fn run(query: &str, json: bool, config: &FeedConfig) -> Result<()> {
    let geocoder = NominatimGeocoder::new(&config.geocoder).map_err(into_core)?;
    let coordinate = geocoder.geocode(query).await.map_err(into_core)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&coordinate)?);
    } else {
        println!("{}, {}", coordinate.latitude, coordinate.longitude);
    }
    Ok(())
}

fn into_core(err: spoon_feed::GeocodeError) -> spoon_core::Error {
    FeedError::from(err).into()
}
