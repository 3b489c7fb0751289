//! Error types for map-poster

use thiserror::Error;

/// Main error type for map-poster operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No usable place. Provider failures stay inside the resolver, which
    /// degrades to an empty list.
    #[error("Geocoding error: {0}")]
    Geocoding(String),

    /// Submission attempted before a location was resolved
    #[error("No location selected: search for a place or pick a point on the map first")]
    MissingCoordinates,

    /// The poster backend rejected the generation request
    #[error("Poster generation failed: {0}")]
    Generation(String),
}

/// Result type alias for map-poster operations
pub type Result<T> = std::result::Result<T, Error>;
