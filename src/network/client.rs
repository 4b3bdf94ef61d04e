//! HTTP client for talking to the places API

use crate::config::ApiSettings;
use anyhow::Result;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::debug;

/// Raw HTTP response from the API
#[derive(Debug)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub text: String,
    /// Response URL (after redirects)
    pub url: String,
}

impl ApiResponse {
    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client wrapper carrying the API configuration
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self> {
        Self::with_settings(&ApiSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &ApiSettings) -> Result<Self> {
        let timeout = Duration::try_from_secs_f64(settings.request_timeout)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        for (key, value) in &settings.extra_headers {
            headers.insert(
                HeaderName::from_bytes(key.as_bytes())?,
                HeaderValue::from_str(value)?,
            );
        }

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .user_agent(concat!("coffee-finder/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self { client, timeout })
    }

    /// GET request with query parameters
    pub async fn get_with_params(
        &self,
        url: &str,
        params: &[(String, String)],
    ) -> Result<ApiResponse, reqwest::Error> {
        debug!("GET {} params={:?}", url, params);

        let mut req_builder = self.client.get(url).timeout(self.timeout);
        if !params.is_empty() {
            req_builder = req_builder.query(params);
        }

        let response = req_builder.send().await?;
        Self::parse_response(response).await
    }

    /// Configured request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn parse_response(response: Response) -> Result<ApiResponse, reqwest::Error> {
        let status = response.status().as_u16();
        let url = response.url().to_string();

        let text = response.text().await?;

        Ok(ApiResponse {
            status,
            text,
            url,
        })
    }
}
