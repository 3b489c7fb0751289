//! Primary provider: the poster backend's own search endpoint
//!
//! `POST /api/location-search` with `{"query": ...}`. Backends that don't
//! offer search answer 404, which the chain treats like any other failure.

use crate::constants::api::LOCATION_SEARCH_PATH;
use crate::error::{Error, Result};
use crate::geo::normalize::{display_name, RawNumber};
use crate::geo::{LocationCandidate, LocationProvider};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Backend location search
#[derive(Debug, Clone)]
pub struct InternalSearch {
    client: reqwest::Client,
    url: String,
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
}

/// Candidate-shaped item returned by the backend
///
/// Accepts both camelCase and snake_case field names.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PrimaryCandidate {
    #[serde(default, alias = "display_name")]
    display_name: Option<String>,
    #[serde(default, alias = "full_name")]
    full_name: Option<String>,
    lat: RawNumber,
    #[serde(alias = "lon")]
    lng: RawNumber,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    country: Option<String>,
}

impl PrimaryCandidate {
    fn into_candidate(self) -> Result<LocationCandidate> {
        let lat = self.lat.parse("latitude")?;
        let lng = self.lng.parse("longitude")?;
        let city = self.city.unwrap_or_default();
        let country = self.country.unwrap_or_default();
        let given = self.display_name.unwrap_or_default();
        let full_name = match self.full_name {
            Some(full) if !full.is_empty() => full,
            _ => given.clone(),
        };
        let display = if given.is_empty() {
            display_name(&city, &country, &full_name)
        } else {
            given
        };

        Ok(LocationCandidate::new(display, full_name, lat, lng, city, country))
    }
}

impl InternalSearch {
    /// Create a provider for the backend at `base_url`
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            url: format!("{}{}", base_url.trim_end_matches('/'), LOCATION_SEARCH_PATH),
        }
    }
}

impl LocationProvider for InternalSearch {
    fn name(&self) -> &'static str {
        "location-search"
    }

    async fn search(&self, query: &str) -> Result<Vec<LocationCandidate>> {
        let response = self
            .client
            .post(&self.url)
            .json(&SearchRequest { query })
            .send()
            .await
            .map_err(|e| Error::Geocoding(format!("Location search request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Geocoding(format!(
                "Location search returned status: {}",
                response.status()
            )));
        }

        let items: Vec<PrimaryCandidate> = response
            .json()
            .await
            .map_err(|e| Error::Geocoding(format!("Failed to parse location search response: {}", e)))?;

        debug!(count = items.len(), "location search answered");

        items.into_iter().map(PrimaryCandidate::into_candidate).collect()
    }
}
