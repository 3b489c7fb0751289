//! Geographic primitives
//!
//! This module handles:
//! - Coordinates and their validation
//! - Viewport bounds as reported by the map widget
//! - Great-circle distances and viewport radius

pub mod distance;

use serde::{Deserialize, Serialize};

pub use distance::{haversine_distance, viewport_radius};

/// A geographic coordinate (latitude, longitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> crate::error::Result<()> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lng)
    }
}

/// Visible map region as a pair of corners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub north_east: Coordinates,
    pub south_west: Coordinates,
}

impl LatLngBounds {
    pub fn new(north_east: Coordinates, south_west: Coordinates) -> Self {
        Self {
            north_east,
            south_west,
        }
    }

    /// Latitude of the northern edge
    pub fn north(&self) -> f64 {
        self.north_east.lat
    }

    /// Latitude of the southern edge
    pub fn south(&self) -> f64 {
        self.south_west.lat
    }

    pub fn contains(&self, point: Coordinates) -> bool {
        point.lat <= self.north_east.lat
            && point.lat >= self.south_west.lat
            && point.lng <= self.north_east.lng
            && point.lng >= self.south_west.lng
    }
}

/// The currently visible map region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapViewport {
    pub center: Coordinates,
    pub zoom: u8,
    pub bounds: LatLngBounds,
}
