//! Decoding of `/places` response bodies
//!
//! The API answers either with a bare JSON array or with an object wrapping
//! the array in a `data` field. Anything else decodes to zero records.

use super::models::PlaceRecord;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// Accepted response shapes
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PlacesResponse {
    Bare(Vec<Value>),
    Wrapped { data: Vec<Value> },
}

impl PlacesResponse {
    fn into_items(self) -> Vec<Value> {
        match self {
            PlacesResponse::Bare(items) => items,
            PlacesResponse::Wrapped { data } => data,
        }
    }
}

/// Decode a response body into validated records.
///
/// Unknown shapes yield an empty list. Individual records that fail to
/// deserialize or validate are skipped.
pub fn decode_places(body: &str) -> Vec<PlaceRecord> {
    if body.trim().is_empty() {
        warn!("Empty response body from places API");
        return Vec::new();
    }

    let response: PlacesResponse = match serde_json::from_str(body) {
        Ok(response) => response,
        Err(e) => {
            warn!("Unexpected places response shape: {}", e);
            return Vec::new();
        }
    };

    response
        .into_items()
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| match serde_json::from_value::<PlaceRecord>(item) {
            Ok(place) => match place.validate() {
                Ok(()) => Some(place),
                Err(e) => {
                    warn!("Skipping place {} ({}): {}", place.id, place.name, e);
                    None
                }
            },
            Err(e) => {
                warn!("Skipping malformed place at index {}: {}", i, e);
                None
            }
        })
        .collect()
}
