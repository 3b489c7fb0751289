//! Default configuration values
//!
//! Named constants for all tunable parameters

use crate::constants;

/// Poster backend base URL
pub const DEFAULT_BASE_URL: &str = constants::api::BACKEND_URL;

/// Fallback geocoder base URL
pub const DEFAULT_NOMINATIM_URL: &str = constants::api::NOMINATIM_URL;

/// Request timeout in seconds (0 = none)
pub const DEFAULT_TIMEOUT_SECS: u64 = 0;

/// Keystroke settle interval in milliseconds
pub const DEFAULT_DEBOUNCE_MS: u64 = constants::search::DEBOUNCE_MS;

/// Shortest query sent to a provider
pub const DEFAULT_MIN_QUERY_LEN: usize = constants::search::MIN_QUERY_LEN;

/// Result limit for the fallback provider
pub const DEFAULT_FALLBACK_LIMIT: usize = constants::search::FALLBACK_LIMIT;

/// Drop responses to superseded queries
pub const DEFAULT_DISCARD_STALE: bool = true;

/// Zoom used when navigating to a candidate
pub const DEFAULT_NAVIGATE_ZOOM: u8 = constants::map::NAVIGATE_ZOOM;

/// Delay before recalculating the map size in milliseconds
pub const DEFAULT_RESIZE_DELAY_MS: u64 = constants::map::RESIZE_DELAY_MS;

/// Initial map center (Madrid)
pub const DEFAULT_INITIAL_LAT: f64 = 40.4168;
pub const DEFAULT_INITIAL_LNG: f64 = -3.7038;

/// Initial map zoom
pub const DEFAULT_INITIAL_ZOOM: u8 = 5;

/// Map container width in pixels; height follows the paper aspect ratio
pub const DEFAULT_WIDTH_PX: u32 = 600;

/// Default poster theme
pub const DEFAULT_THEME: &str = "feature_based";

/// Default poster radius in meters
pub const DEFAULT_DISTANCE: u32 = 29_000;

/// Default layers (comma-separated)
pub const DEFAULT_LAYERS: &str = "roads,water,parks";

/// Default paper size label
pub const DEFAULT_PAPER_SIZE: &str = "3:4";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "map-poster";
