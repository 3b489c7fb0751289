//! Provider chain
//!
//! Primary first, fallback second, empty list last. Nothing here returns an
//! error: search failures are logged and degrade to "no suggestions".

use crate::constants::search::MIN_QUERY_LEN;
use crate::geo::{LocationCandidate, LocationProvider, Resolver};
use tracing::{debug, info, warn};

/// Ordered pair of location providers
#[derive(Debug, Clone)]
pub struct ProviderChain<P, F> {
    primary: P,
    fallback: F,
    min_query_len: usize,
}

impl<P: LocationProvider, F: LocationProvider> ProviderChain<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self {
            primary,
            fallback,
            min_query_len: MIN_QUERY_LEN,
        }
    }

    /// Queries shorter than `len` characters resolve to nothing
    pub fn with_min_query_len(mut self, len: usize) -> Self {
        self.min_query_len = len;
        self
    }

    /// Resolve a query to candidates
    pub async fn resolve(&self, query: &str) -> Vec<LocationCandidate> {
        let query = query.trim();
        if query.chars().count() < self.min_query_len {
            return Vec::new();
        }

        match self.primary.search(query).await {
            Ok(candidates) => {
                debug!(provider = self.primary.name(), count = candidates.len(), "resolved");
                return candidates;
            }
            Err(e) => {
                info!(
                    provider = self.primary.name(),
                    "primary search unavailable, falling back to {}: {}",
                    self.fallback.name(),
                    e
                );
            }
        }

        match self.fallback.search(query).await {
            Ok(candidates) => {
                debug!(provider = self.fallback.name(), count = candidates.len(), "resolved");
                candidates
            }
            Err(e) => {
                warn!(query, "all location providers failed: {}", e);
                Vec::new()
            }
        }
    }
}

impl<P: LocationProvider, F: LocationProvider> Resolver for ProviderChain<P, F> {
    async fn resolve(&self, query: &str) -> Vec<LocationCandidate> {
        ProviderChain::resolve(self, query).await
    }
}
