//! Client for the remote places API

use super::models::{PlaceRecord, SearchParams};
use super::response::decode_places;
use crate::network::HttpClient;
use async_trait::async_trait;
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::{debug, error, info, warn};
use url::Url;

/// Failures talking to the places API
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("places API returned HTTP {status} for {url}")]
    Status { status: u16, url: String },
    #[error("invalid API base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Non-blank cities of `places`, deduplicated and sorted
pub fn distinct_cities(places: &[PlaceRecord]) -> Vec<String> {
    places
        .iter()
        .filter_map(|p| p.city.as_deref())
        .filter(|c| !c.trim().is_empty())
        .map(String::from)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Source of coffee place data
#[async_trait]
pub trait PlaceRepository: Send + Sync {
    /// Search places. Failures propagate to the caller.
    async fn search(&self, params: &SearchParams) -> Result<Vec<PlaceRecord>, ApiError>;

    /// All known cities, deduplicated and sorted. Never fails: errors give
    /// an empty list.
    async fn list_cities(&self) -> Vec<String>;

    /// Every place the API will return without filters
    async fn fetch_all(&self) -> Result<Vec<PlaceRecord>, ApiError> {
        self.search(&SearchParams::default()).await
    }

    /// Tags offered to the user
    fn available_tags(&self) -> Vec<String>;
}

/// HTTP-backed place repository
#[derive(Clone)]
pub struct PlacesClient {
    http: HttpClient,
    places_url: String,
    tags: Vec<String>,
}

impl PlacesClient {
    /// Create a client for `{base_url}/places`
    pub fn new(
        http: HttpClient,
        base_url: &str,
        tags: Vec<String>,
    ) -> Result<Self, ApiError> {
        let places_url = format!("{}/places", base_url.trim_end_matches('/'));
        Url::parse(&places_url)?;

        info!("Places API endpoint: {}", places_url);

        Ok(Self {
            http,
            places_url,
            tags,
        })
    }

    /// Endpoint this client queries
    pub fn places_url(&self) -> &str {
        &self.places_url
    }
}

#[async_trait]
impl PlaceRepository for PlacesClient {
    async fn search(&self, params: &SearchParams) -> Result<Vec<PlaceRecord>, ApiError> {
        let query = params.to_query();

        let response = match self.http.get_with_params(&self.places_url, &query).await {
            Ok(response) => response,
            Err(e) => {
                error!("Places search failed: {}", e);
                return Err(e.into());
            }
        };

        if !response.is_success() {
            error!(
                "Places API returned HTTP {} for {}",
                response.status, response.url
            );
            return Err(ApiError::Status {
                status: response.status,
                url: response.url,
            });
        }

        let places = decode_places(&response.text);
        debug!("Places search {:?} returned {} places", query, places.len());
        Ok(places)
    }

    async fn list_cities(&self) -> Vec<String> {
        match self.fetch_all().await {
            Ok(places) => distinct_cities(&places),
            Err(e) => {
                warn!("Could not fetch cities: {}", e);
                Vec::new()
            }
        }
    }

    fn available_tags(&self) -> Vec<String> {
        self.tags.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> PlacesClient {
        let http = HttpClient::new().unwrap();
        PlacesClient::new(http, &format!("{}/api/", server.uri()), vec!["wifi".to_string()])
            .unwrap()
    }

    #[test]
    fn test_invalid_base_url() {
        let http = HttpClient::new().unwrap();
        let result = PlacesClient::new(http, "not a url", vec![]);
        assert!(matches!(result, Err(ApiError::InvalidUrl(_))));
    }

    #[test]
    fn test_places_url_joins_base() {
        let http = HttpClient::new().unwrap();
        let client = PlacesClient::new(http, "http://localhost:3000/api/", vec![]).unwrap();
        assert_eq!(client.places_url(), "http://localhost:3000/api/places");
    }

    #[tokio::test]
    async fn test_search_sends_present_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/places"))
            .and(query_param("city", "amsterdam"))
            .and(query_param("tags", "wifi,cozy"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"data":[{"id":"1","name":"Coffee Company","city":"Amsterdam","rating":4.3,"openHours":null,"tags":["wifi"]}]}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let params = SearchParams {
            city: Some("amsterdam".to_string()),
            tags: vec!["wifi".to_string(), "cozy".to_string()],
            ..Default::default()
        };
        let places = client.search(&params).await.unwrap();
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].name, "Coffee Company");
    }

    #[tokio::test]
    async fn test_search_propagates_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/places"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let result = client.search(&SearchParams::city("utrecht")).await;
        assert!(matches!(result, Err(ApiError::Status { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_search_unknown_shape_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/places"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"message":"ok"}"#))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let places = client.search(&SearchParams::default()).await.unwrap();
        assert!(places.is_empty());
    }

    #[tokio::test]
    async fn test_list_cities_sorted_and_deduplicated() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/places"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"[
                    {"id":"1","name":"A","city":"Rotterdam","rating":4,"tags":[]},
                    {"id":"2","name":"B","city":"Amsterdam","rating":4,"tags":[]},
                    {"id":"3","name":"C","city":null,"rating":4,"tags":[]},
                    {"id":"4","name":"D","city":"Amsterdam","rating":4,"tags":[]}
                ]"#,
            ))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert_eq!(client.list_cities().await, vec!["Amsterdam", "Rotterdam"]);
    }

    #[tokio::test]
    async fn test_list_cities_swallows_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert!(client.list_cities().await.is_empty());
        assert_eq!(client.available_tags(), vec!["wifi"]);
    }
}
