//! Open-Meteo geocoding client
//!
//! Resolves a free-text place name into candidate locations.

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use super::{Coordinates, Place};

/// Base URL for the Open-Meteo geocoding API
const GEOCODING_BASE_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

/// How many candidates a search returns
const CANDIDATE_COUNT: u8 = 8;

/// Language for place names unless configured otherwise
pub const DEFAULT_LANGUAGE: &str = "en";

/// Errors that can occur when searching for a place
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// HTTP request failed or returned a non-success status
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// One search hit
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlaceCandidate {
    pub name: String,
    /// First-level administrative region, e.g. a French région
    #[serde(default)]
    pub admin1: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl PlaceCandidate {
    /// Display label: `name[, admin1][ (CC)]`
    pub fn label(&self) -> String {
        let mut label = self.name.clone();
        if let Some(admin1) = self.admin1.as_deref().filter(|a| !a.is_empty()) {
            label.push_str(", ");
            label.push_str(admin1);
        }
        if let Some(code) = self.country_code.as_deref().filter(|c| !c.is_empty()) {
            label.push_str(&format!(" ({})", code));
        }
        label
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    pub fn into_place(self) -> Place {
        Place {
            label: self.label(),
            coordinates: self.coordinates(),
        }
    }
}

/// Geocoding API response structure
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Option<Vec<PlaceCandidate>>,
}

/// Client for searching places by name
#[derive(Debug, Clone)]
pub struct GeocodingClient {
    client: Client,
    base_url: String,
    language: String,
}

impl Default for GeocodingClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GeocodingClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: GEOCODING_BASE_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::new()
        }
    }

    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Set the language used for returned place names
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Search for places matching `query`, best match first
    ///
    /// An unknown place is not an error: the result is simply empty.
    pub async fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>, GeocodingError> {
        debug!(query, "searching places");
        let text = self
            .client
            .get(&self.base_url)
            .query(&[
                ("name", query.to_string()),
                ("count", CANDIDATE_COUNT.to_string()),
                ("language", self.language.clone()),
            ])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        parse_candidates(&text)
    }
}

/// Parses a geocoding response body; a missing `results` key means no match
pub fn parse_candidates(body: &str) -> Result<Vec<PlaceCandidate>, GeocodingError> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response.results.unwrap_or_default())
}
