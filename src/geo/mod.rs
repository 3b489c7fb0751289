//! Location resolution
//!
//! Free text goes in, a list of [`LocationCandidate`]s comes out. Two
//! providers are tried in order: the backend's own search endpoint, then
//! Nominatim.

pub mod chain;
pub mod nominatim;
pub mod normalize;
pub mod primary;

use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::Result;
use serde::Serialize;
use std::time::Duration;

pub use chain::ProviderChain;
pub use nominatim::NominatimProvider;
pub use normalize::{normalize, RawPlace};
pub use primary::InternalSearch;

/// A named geocoordinate produced by resolving a text query
///
/// Candidates are immutable; they are replaced, never edited.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationCandidate {
    display_name: String,
    full_name: String,
    lat: f64,
    lng: f64,
    city: String,
    country: String,
}

impl LocationCandidate {
    pub(crate) fn new(
        display_name: String,
        full_name: String,
        lat: f64,
        lng: f64,
        city: String,
        country: String,
    ) -> Self {
        Self {
            display_name,
            full_name,
            lat,
            lng,
            city,
            country,
        }
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// The provider's complete label
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }

    /// Disambiguating second line, shown only when it adds information
    pub fn secondary_line(&self) -> Option<&str> {
        if self.full_name.is_empty() || self.full_name == self.display_name {
            None
        } else {
            Some(&self.full_name)
        }
    }
}

/// A single geocoding service
pub trait LocationProvider: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Look up candidates for a query. Any failure is an `Err`.
    fn search(
        &self,
        query: &str,
    ) -> impl std::future::Future<Output = Result<Vec<LocationCandidate>>> + Send;
}

/// Something that turns a query into candidates without ever failing
pub trait Resolver: Send + Sync {
    fn resolve(&self, query: &str) -> impl std::future::Future<Output = Vec<LocationCandidate>> + Send;
}

/// Resolver wired from configuration
pub type DefaultResolver = ProviderChain<InternalSearch, NominatimProvider>;

/// Build the shared HTTP client
///
/// A zero timeout means requests may wait indefinitely.
pub fn http_client(config: &Config) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().user_agent(config.api.user_agent.clone());
    if config.api.timeout_secs > 0 {
        builder = builder.timeout(Duration::from_secs(config.api.timeout_secs));
    }
    Ok(builder.build()?)
}

/// Get the default provider chain for a configuration
pub fn get_resolver(config: &Config) -> Result<DefaultResolver> {
    let client = http_client(config)?;
    let primary = InternalSearch::new(client.clone(), &config.api.base_url);
    let fallback = NominatimProvider::new(client, &config.api.nominatim_url)
        .with_limit(config.search.fallback_limit);

    Ok(ProviderChain::new(primary, fallback).with_min_query_len(config.search.min_query_len))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_serialization() {
        let candidate = test_support::candidate("Berlin", "Germany", 52.52, 13.405);
        let json = serde_json::to_value(&candidate).unwrap();

        assert_eq!(json["displayName"], "Berlin, Germany");
        assert_eq!(json["fullName"], "Berlin, Somewhere, Germany");
        assert_eq!(json["lat"], 52.52);
    }

    #[test]
    fn test_secondary_line() {
        let candidate = test_support::candidate("Berlin", "Germany", 52.52, 13.405);
        assert_eq!(candidate.secondary_line(), Some("Berlin, Somewhere, Germany"));

        let same = LocationCandidate::new(
            "Berlin".to_string(),
            "Berlin".to_string(),
            0.0,
            0.0,
            String::new(),
            String::new(),
        );
        assert!(same.secondary_line().is_none());
    }

    #[test]
    fn test_get_resolver() {
        let resolver = get_resolver(&Config::default()).unwrap();
        assert!(format!("{:?}", resolver).contains("ProviderChain"));
    }
}
