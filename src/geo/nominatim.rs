//! Nominatim fallback provider (OpenStreetMap)
//!
//! Uses the free Nominatim search API with address details so the
//! normalizer can pick out city and country.
//! Usage policy requires an identifying User-Agent; the shared client sets it.

use crate::constants::search::FALLBACK_LIMIT;
use crate::error::{Error, Result};
use crate::geo::normalize::{normalize, RawPlace};
use crate::geo::{LocationCandidate, LocationProvider};
use reqwest::header::ACCEPT;
use tracing::warn;

/// Nominatim geocoding provider
#[derive(Debug, Clone)]
pub struct NominatimProvider {
    client: reqwest::Client,
    base_url: String,
    limit: usize,
}

impl NominatimProvider {
    /// Create a provider against `base_url` (normally the public instance)
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            limit: FALLBACK_LIMIT,
        }
    }

    /// Override the result limit
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    fn search_url(&self, query: &str) -> String {
        format!(
            "{}/search?format=json&addressdetails=1&limit={}&q={}",
            self.base_url,
            self.limit,
            urlencoding::encode(query)
        )
    }
}

impl LocationProvider for NominatimProvider {
    fn name(&self) -> &'static str {
        "nominatim"
    }

    async fn search(&self, query: &str) -> Result<Vec<LocationCandidate>> {
        let response = self
            .client
            .get(self.search_url(query))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| Error::Geocoding(format!("Nominatim request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Geocoding(format!(
                "Nominatim returned status: {}",
                response.status()
            )));
        }

        let results: Vec<RawPlace> = response
            .json()
            .await
            .map_err(|e| Error::Geocoding(format!("Failed to parse Nominatim response: {}", e)))?;

        // One malformed entry shouldn't cost the user the other suggestions
        Ok(results
            .iter()
            .filter_map(|raw| match normalize(raw) {
                Ok(candidate) => Some(candidate),
                Err(e) => {
                    warn!(display_name = %raw.display_name, "skipping Nominatim result: {}", e);
                    None
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::test_support::spawn;
    use axum::{extract::Query, http::HeaderMap, http::StatusCode, routing::get, Json, Router};
    use std::collections::HashMap;

    #[test]
    fn test_search_url() {
        let provider = NominatimProvider::new(reqwest::Client::new(), "https://nominatim.example/");
        assert_eq!(
            provider.search_url("São Paulo"),
            "https://nominatim.example/search?format=json&addressdetails=1&limit=5&q=S%C3%A3o%20Paulo"
        );

        let provider = provider.with_limit(2);
        assert!(provider.search_url("x").contains("limit=2"));
    }

    #[tokio::test]
    async fn test_search_normalizes_results() {
        let router = Router::new().route(
            "/search",
            get(
                |Query(params): Query<HashMap<String, String>>, headers: HeaderMap| async move {
                    assert_eq!(params["q"], "Berlin");
                    assert_eq!(params["format"], "json");
                    assert_eq!(params["addressdetails"], "1");
                    assert_eq!(params["limit"], "5");
                    assert_eq!(headers["accept"], "application/json");
                    Json(serde_json::json!([
                        {
                            "lat": "52.5170365",
                            "lon": "13.3888599",
                            "display_name": "Berlin, Deutschland",
                            "address": { "city": "Berlin", "country": "Deutschland" }
                        },
                        {
                            "lat": "garbage",
                            "lon": "0",
                            "display_name": "Broken"
                        },
                        {
                            "lat": "44.4759",
                            "lon": "-71.1851",
                            "display_name": "Berlin, Coös County, New Hampshire, United States",
                            "address": { "town": "Berlin", "country": "United States" }
                        }
                    ]))
                },
            ),
        );
        let base = spawn(router).await;

        let provider = NominatimProvider::new(reqwest::Client::new(), &base);
        let results = provider.search("Berlin").await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].display_name(), "Berlin, Deutschland");
        assert_eq!(results[1].display_name(), "Berlin, United States");
        assert_eq!(
            results[1].secondary_line(),
            Some("Berlin, Coös County, New Hampshire, United States")
        );
    }

    #[tokio::test]
    async fn test_search_server_error() {
        let router = Router::new().route(
            "/search",
            get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        );
        let base = spawn(router).await;

        let provider = NominatimProvider::new(reqwest::Client::new(), &base);
        assert!(matches!(
            provider.search("Berlin").await,
            Err(Error::Geocoding(_))
        ));
    }
}
