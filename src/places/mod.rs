//! Coffee place data
//!
//! Record types, response decoding and the client for the places API.

mod client;
mod fallback;
mod models;
mod response;

pub use client::{distinct_cities, ApiError, PlaceRepository, PlacesClient};
pub use fallback::fallback_places;
pub use models::*;
pub use response::{decode_places, PlacesResponse};
