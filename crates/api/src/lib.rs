//! Drug search API client.
//!
//! This module provides a lightweight client for the remote search
//! collaborator that backs row suggestions. It focuses on:
//!
//! - Constructing an HTTP client with a request timeout and User-Agent
//! - Resolving the base URL from `RXPAD_SEARCH_BASE` or configuration
//! - Validating the base URL for safety
//! - Translating the `/search` response contract into [`Suggestion`]s
//!
//! # Example
//!
//! ```ignore
//! use rxpad_api::SearchClient;
//! use std::time::Duration;
//!
//! async fn demo() -> Result<(), rxpad_api::SearchApiError> {
//!     let client = SearchClient::new("http://localhost:8000", Duration::from_secs(30))?;
//!     let suggestions = client.search("amox").await?;
//!     println!("{} matches", suggestions.len());
//!     Ok(())
//! }
//! ```

use std::env;
use std::time::Duration;

use reqwest::{Client, header};
use rxpad_types::Suggestion;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Environment variable overriding the configured search base URL.
pub const SEARCH_BASE_ENV: &str = "RXPAD_SEARCH_BASE";

/// Hostnames allowed for local development regardless of scheme.
const LOCALHOST_DOMAINS: &[&str] = &["localhost", "127.0.0.1"];

/// Errors raised while talking to the search collaborator.
#[derive(Debug, Error)]
pub enum SearchApiError {
    #[error("invalid search base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("search request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("search returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

/// Response body of `GET /search?q=`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub results: Vec<SearchHit>,
}

/// One match in a [`SearchResponse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub brand: String,
    pub generic: String,
    #[serde(default)]
    pub confidence: f64,
}

impl From<SearchHit> for Suggestion {
    fn from(hit: SearchHit) -> Self {
        Suggestion::new(hit.brand, hit.generic, hit.confidence)
    }
}

#[derive(Debug, Clone)]
/// Thin wrapper around a configured `reqwest::Client` for the search endpoint.
pub struct SearchClient {
    base_url: String,
    http: Client,
    user_agent: String,
}

impl SearchClient {
    /// Build a client against a validated base URL.
    ///
    /// Non-localhost hosts must use HTTPS.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SearchApiError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        validate_base_url(&base_url)?;

        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));
        let http = Client::builder().default_headers(default_headers).timeout(timeout).build()?;

        Ok(Self {
            base_url,
            http,
            user_agent: format!("rxpad/{}; {}", env!("CARGO_PKG_VERSION"), env::consts::OS),
        })
    }

    /// Build a client using `RXPAD_SEARCH_BASE` when set, otherwise `configured`.
    pub fn from_env_or(configured: &str, timeout: Duration) -> Result<Self, SearchApiError> {
        Self::new(&resolve_base_url(configured), timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Look up drugs matching `query`, preserving the server's ordering.
    pub async fn search(&self, query: &str) -> Result<Vec<Suggestion>, SearchApiError> {
        let url = format!("{}/search", self.base_url);
        debug!(%url, query, "search request");

        let response = self
            .http
            .get(url)
            .header(header::USER_AGENT, &self.user_agent)
            .query(&[("q", query)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: SearchResponse = response.json().await?;
        debug!(query = %body.query, count = body.count, "search response");
        Ok(body.results.into_iter().map(Suggestion::from).collect())
    }
}

/// Pick the search base URL: `RXPAD_SEARCH_BASE` wins over the configured value.
pub fn resolve_base_url(configured: &str) -> String {
    env::var(SEARCH_BASE_ENV)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| configured.to_string())
}

/// Validate that a base URL is acceptable for use by the client.
///
/// Rules:
/// - `localhost` or `127.0.0.1`: any scheme is allowed
/// - otherwise: scheme must be HTTPS
fn validate_base_url(base: &str) -> Result<(), SearchApiError> {
    let invalid = |reason: String| SearchApiError::InvalidBaseUrl {
        url: base.to_string(),
        reason,
    };
    let parsed = Url::parse(base).map_err(|error| invalid(error.to_string()))?;
    let host_name = parsed.host_str().ok_or_else(|| invalid("missing host".into()))?;

    if LOCALHOST_DOMAINS
        .iter()
        .any(|&allowed| host_name.eq_ignore_ascii_case(allowed))
    {
        return Ok(());
    }

    if parsed.scheme() != "https" {
        return Err(invalid(format!(
            "non-localhost hosts must use https; got '{}://'",
            parsed.scheme()
        )));
    }
    Ok(())
}
