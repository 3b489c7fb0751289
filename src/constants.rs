//! Centralized constants for the map-poster crate
//!
//! Values shared between the config defaults, the controllers and the
//! provider clients live here so they stay in agreement.

/// Geographic constants
pub mod geo {
    /// Mean Earth radius in meters (spherical model, no ellipsoid correction)
    pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

    /// Web Mercator tile edge in pixels
    pub const TILE_SIZE: f64 = 256.0;

    /// Latitude limit of the Web Mercator projection
    pub const MAX_MERCATOR_LAT: f64 = 85.051_128_78;
}

/// External API endpoints
pub mod api {
    /// OpenStreetMap Nominatim geocoding API
    pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

    /// Poster backend base URL
    pub const BACKEND_URL: &str = "http://localhost:8000";

    /// Internal location search endpoint (primary provider)
    pub const LOCATION_SEARCH_PATH: &str = "/api/location-search";

    /// Poster generation endpoint
    pub const GENERATE_PATH: &str = "/api/generate";

    /// User agent sent to every provider
    pub const USER_AGENT: &str = concat!("map-poster/", env!("CARGO_PKG_VERSION"));
}

/// Search behaviour
pub mod search {
    /// Settle interval before a typed query is resolved
    pub const DEBOUNCE_MS: u64 = 300;

    /// Queries shorter than this never reach a provider
    pub const MIN_QUERY_LEN: usize = 2;

    /// Result limit requested from the fallback provider
    pub const FALLBACK_LIMIT: usize = 5;
}

/// Map view behaviour
pub mod map {
    /// Zoom level used when navigating to a selected candidate
    pub const NAVIGATE_ZOOM: u8 = 13;

    /// Delay before recalculating the map size after a layout change.
    /// Layout reflow is asynchronous; resizing earlier reads stale dimensions.
    pub const RESIZE_DELAY_MS: u64 = 100;

    /// Highest zoom level the map accepts
    pub const MAX_ZOOM: u8 = 19;
}
