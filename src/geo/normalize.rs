//! Suggestion normalizer
//!
//! Turns a raw Nominatim search result into a [`LocationCandidate`]. Pure:
//! the same input always yields the same candidate.

use crate::error::{Error, Result};
use crate::geo::LocationCandidate;
use serde::Deserialize;

/// A coordinate field that providers send either as a JSON string or a number
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
}

impl RawNumber {
    /// Parse as f64; `field` names the value in the error
    pub fn parse(&self, field: &str) -> Result<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Ok(*n),
            Self::Text(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| Error::Geocoding(format!("Invalid {}: {}", field, s))),
            Self::Number(n) => Err(Error::Geocoding(format!("Invalid {}: {}", field, n))),
        }
    }
}

/// `address` block of a Nominatim result (`addressdetails=1`)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawAddress {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub town: Option<String>,
    #[serde(default)]
    pub village: Option<String>,
    #[serde(default)]
    pub municipality: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl RawAddress {
    /// Most specific settlement name available
    pub fn city(&self) -> &str {
        [
            &self.city,
            &self.town,
            &self.village,
            &self.municipality,
            &self.state,
            &self.region,
        ]
        .into_iter()
        .flatten()
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
        .unwrap_or("")
    }

    pub fn country(&self) -> &str {
        self.country.as_deref().map(str::trim).unwrap_or("")
    }
}

/// Nominatim search response item
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawPlace {
    pub lat: RawNumber,
    pub lon: RawNumber,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub address: Option<RawAddress>,
}

/// Normalize a raw provider result into a candidate
pub fn normalize(raw: &RawPlace) -> Result<LocationCandidate> {
    let lat = raw.lat.parse("latitude")?;
    let lng = raw.lon.parse("longitude")?;

    let (city, country) = match &raw.address {
        Some(address) => (address.city(), address.country()),
        None => ("", ""),
    };

    Ok(LocationCandidate::new(
        display_name(city, country, &raw.display_name),
        raw.display_name.clone(),
        lat,
        lng,
        city.to_string(),
        country.to_string(),
    ))
}

/// Short label for a suggestion
///
/// `"{city}, {country}"` when both are known, otherwise the first two
/// segments of the provider's full display string.
pub(crate) fn display_name(city: &str, country: &str, full_name: &str) -> String {
    if !city.is_empty() && !country.is_empty() {
        return format!("{}, {}", city, country);
    }

    full_name
        .split(',')
        .map(str::trim)
        .take(2)
        .collect::<Vec<_>>()
        .join(", ")
}
