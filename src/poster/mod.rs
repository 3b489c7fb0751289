//! Poster parameters
//!
//! This module handles:
//! - The generation parameters shared by search, map and submission
//! - Paper sizes and layers understood by the renderer
//! - Keeping parameters and the map viewport in step
//! - Submitting a generation request to the backend

pub mod client;
pub mod layers;
pub mod paper;
pub mod sync;

use crate::config::DefaultsConfig;
use crate::coord::Coordinates;
use serde::{Deserialize, Serialize};

pub use client::PosterApi;
pub use layers::{available_layers, default_layers, parse_layers, Layer};
pub use paper::{available_paper_sizes, PaperSize};
pub use sync::{Synchronizer, ViewCommand};

/// Everything the backend needs to render a poster
///
/// Fields change only through [`Synchronizer`] commands.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationParameters {
    lat: Option<f64>,
    lng: Option<f64>,
    distance_meters: u32,
    city: String,
    country: String,
    location: String,
    theme: String,
    layers: Vec<Layer>,
    paper_size: PaperSize,
}

impl GenerationParameters {
    /// Parameters with no location yet
    pub fn new(theme: impl Into<String>, distance_meters: u32, layers: Vec<Layer>, paper_size: PaperSize) -> Self {
        Self {
            lat: None,
            lng: None,
            distance_meters,
            city: String::new(),
            country: String::new(),
            location: String::new(),
            theme: theme.into(),
            layers,
            paper_size,
        }
    }

    /// Build from configured defaults; unparseable paper sizes fall back to 3:4
    pub fn from_defaults(defaults: &DefaultsConfig) -> Self {
        Self::new(
            defaults.theme.clone(),
            defaults.distance,
            parse_layers(&defaults.layers),
            defaults.paper_size.parse().unwrap_or_default(),
        )
    }

    pub fn lat(&self) -> Option<f64> {
        self.lat
    }

    pub fn lng(&self) -> Option<f64> {
        self.lng
    }

    /// Center, once both halves are known
    pub fn center(&self) -> Option<Coordinates> {
        Some(Coordinates::new(self.lat?, self.lng?))
    }

    pub fn distance_meters(&self) -> u32 {
        self.distance_meters
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    /// Text of the location field
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn paper_size(&self) -> PaperSize {
        self.paper_size
    }
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self::from_defaults(&DefaultsConfig::default())
    }
}

/// Body of `POST /api/generate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub location: String,
    pub city: String,
    pub country: String,
    pub theme: String,
    pub distance: u32,
    pub layers: Vec<Layer>,
    pub paper_size: PaperSize,
    pub lat: f64,
    pub lng: f64,
}

/// A rendered poster returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PosterArtifact {
    pub url: String,
    pub filename: String,
}
