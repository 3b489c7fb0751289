//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/map-poster/config.toml

pub mod defaults;

use crate::error::{Error, Result};
use crate::poster::{parse_layers, PaperSize};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend and provider endpoints
    #[serde(default)]
    pub api: ApiConfig,

    /// Search box behaviour
    #[serde(default)]
    pub search: SearchConfig,

    /// Map view behaviour
    #[serde(default)]
    pub map: MapConfig,

    /// Default poster parameters
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Endpoints and HTTP client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Poster backend (serves /api/location-search and /api/generate)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Nominatim instance used as the fallback provider
    #[serde(default = "default_nominatim_url")]
    pub nominatim_url: String,

    /// User-Agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds; 0 disables it
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Search box settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Keystroke settle interval
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Shorter queries never reach a provider
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,

    /// Result limit for the fallback provider
    #[serde(default = "default_fallback_limit")]
    pub fallback_limit: usize,

    /// Ignore responses to queries that were superseded while in flight
    #[serde(default = "default_discard_stale")]
    pub discard_stale: bool,
}

/// Map view settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Zoom applied when navigating to a selected place
    #[serde(default = "default_navigate_zoom")]
    pub navigate_zoom: u8,

    /// Wait for layout to settle before resizing the map
    #[serde(default = "default_resize_delay_ms")]
    pub resize_delay_ms: u64,

    #[serde(default = "default_initial_lat")]
    pub initial_lat: f64,

    #[serde(default = "default_initial_lng")]
    pub initial_lng: f64,

    #[serde(default = "default_initial_zoom")]
    pub initial_zoom: u8,

    /// Container width; the height follows the paper aspect ratio
    #[serde(default = "default_width_px")]
    pub width_px: u32,
}

/// Default values for poster parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Radius in meters until the map reports one
    #[serde(default = "default_distance")]
    pub distance: u32,

    /// Comma-separated layer names
    #[serde(default = "default_layers")]
    pub layers: String,

    #[serde(default = "default_paper_size")]
    pub paper_size: String,
}

// Default value functions for serde
fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_nominatim_url() -> String {
    DEFAULT_NOMINATIM_URL.to_string()
}
fn default_user_agent() -> String {
    crate::constants::api::USER_AGENT.to_string()
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}
fn default_min_query_len() -> usize {
    DEFAULT_MIN_QUERY_LEN
}
fn default_fallback_limit() -> usize {
    DEFAULT_FALLBACK_LIMIT
}
fn default_discard_stale() -> bool {
    DEFAULT_DISCARD_STALE
}
fn default_navigate_zoom() -> u8 {
    DEFAULT_NAVIGATE_ZOOM
}
fn default_resize_delay_ms() -> u64 {
    DEFAULT_RESIZE_DELAY_MS
}
fn default_initial_lat() -> f64 {
    DEFAULT_INITIAL_LAT
}
fn default_initial_lng() -> f64 {
    DEFAULT_INITIAL_LNG
}
fn default_initial_zoom() -> u8 {
    DEFAULT_INITIAL_ZOOM
}
fn default_width_px() -> u32 {
    DEFAULT_WIDTH_PX
}
fn default_theme() -> String {
    DEFAULT_THEME.to_string()
}
fn default_distance() -> u32 {
    DEFAULT_DISTANCE
}
fn default_layers() -> String {
    DEFAULT_LAYERS.to_string()
}
fn default_paper_size() -> String {
    DEFAULT_PAPER_SIZE.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            nominatim_url: default_nominatim_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            min_query_len: default_min_query_len(),
            fallback_limit: default_fallback_limit(),
            discard_stale: default_discard_stale(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            navigate_zoom: default_navigate_zoom(),
            resize_delay_ms: default_resize_delay_ms(),
            initial_lat: default_initial_lat(),
            initial_lng: default_initial_lng(),
            initial_zoom: default_initial_zoom(),
            width_px: default_width_px(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            distance: default_distance(),
            layers: default_layers(),
            paper_size: default_paper_size(),
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl MapConfig {
    pub fn resize_delay(&self) -> Duration {
        Duration::from_millis(self.resize_delay_ms)
    }
}

fn parse_value<T: std::str::FromStr>(what: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| Error::Config(format!("Invalid {} value: {}", what, value)))
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

            toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&path, content)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Get a configuration value by key path ("section.key")
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["api", "base_url"] => Some(self.api.base_url.clone()),
            ["api", "nominatim_url"] => Some(self.api.nominatim_url.clone()),
            ["api", "user_agent"] => Some(self.api.user_agent.clone()),
            ["api", "timeout_secs"] => Some(self.api.timeout_secs.to_string()),

            ["search", "debounce_ms"] => Some(self.search.debounce_ms.to_string()),
            ["search", "min_query_len"] => Some(self.search.min_query_len.to_string()),
            ["search", "fallback_limit"] => Some(self.search.fallback_limit.to_string()),
            ["search", "discard_stale"] => Some(self.search.discard_stale.to_string()),

            ["map", "navigate_zoom"] => Some(self.map.navigate_zoom.to_string()),
            ["map", "resize_delay_ms"] => Some(self.map.resize_delay_ms.to_string()),
            ["map", "initial_lat"] => Some(self.map.initial_lat.to_string()),
            ["map", "initial_lng"] => Some(self.map.initial_lng.to_string()),
            ["map", "initial_zoom"] => Some(self.map.initial_zoom.to_string()),
            ["map", "width_px"] => Some(self.map.width_px.to_string()),

            ["defaults", "theme"] => Some(self.defaults.theme.clone()),
            ["defaults", "distance"] => Some(self.defaults.distance.to_string()),
            ["defaults", "layers"] => Some(self.defaults.layers.clone()),
            ["defaults", "paper_size"] => Some(self.defaults.paper_size.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["api", "base_url"] => self.api.base_url = value.to_string(),
            ["api", "nominatim_url"] => self.api.nominatim_url = value.to_string(),
            ["api", "user_agent"] => self.api.user_agent = value.to_string(),
            ["api", "timeout_secs"] => self.api.timeout_secs = parse_value("timeout", value)?,

            ["search", "debounce_ms"] => {
                self.search.debounce_ms = parse_value("debounce", value)?;
            }
            ["search", "min_query_len"] => {
                self.search.min_query_len = parse_value("query length", value)?;
            }
            ["search", "fallback_limit"] => {
                self.search.fallback_limit = parse_value("limit", value)?;
            }
            ["search", "discard_stale"] => {
                self.search.discard_stale = parse_value("boolean", value)?;
            }

            ["map", "navigate_zoom"] => {
                let zoom: u8 = parse_value("zoom", value)?;
                if zoom > crate::constants::map::MAX_ZOOM {
                    return Err(Error::Config(format!("Zoom out of range: {}", zoom)));
                }
                self.map.navigate_zoom = zoom;
            }
            ["map", "resize_delay_ms"] => {
                self.map.resize_delay_ms = parse_value("delay", value)?;
            }
            ["map", "initial_lat"] => self.map.initial_lat = parse_value("latitude", value)?,
            ["map", "initial_lng"] => self.map.initial_lng = parse_value("longitude", value)?,
            ["map", "initial_zoom"] => self.map.initial_zoom = parse_value("zoom", value)?,
            ["map", "width_px"] => self.map.width_px = parse_value("width", value)?,

            ["defaults", "theme"] => self.defaults.theme = value.to_string(),
            ["defaults", "distance"] => self.defaults.distance = parse_value("distance", value)?,
            ["defaults", "layers"] => {
                if parse_layers(value).is_empty() {
                    return Err(Error::Config(format!("No known layers in: {}", value)));
                }
                self.defaults.layers = value.to_string();
            }
            ["defaults", "paper_size"] => {
                value.parse::<PaperSize>().map_err(Error::Config)?;
                self.defaults.paper_size = value.to_string();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "api.base_url",
            "api.nominatim_url",
            "api.user_agent",
            "api.timeout_secs",
            "search.debounce_ms",
            "search.min_query_len",
            "search.fallback_limit",
            "search.discard_stale",
            "map.navigate_zoom",
            "map.resize_delay_ms",
            "map.initial_lat",
            "map.initial_lng",
            "map.initial_zoom",
            "map.width_px",
            "defaults.theme",
            "defaults.distance",
            "defaults.layers",
            "defaults.paper_size",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    fn with_temp_config<F: FnOnce()>(f: F) {
        let temp_dir = TempDir::new().unwrap();
        env::set_var("XDG_CONFIG_HOME", temp_dir.path());
        f();
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.search.debounce_ms, 300);
        assert_eq!(config.search.min_query_len, 2);
        assert_eq!(config.search.fallback_limit, 5);
        assert!(config.search.discard_stale);
        assert_eq!(config.map.navigate_zoom, 13);
        assert_eq!(config.map.resize_delay_ms, 100);
        assert_eq!(config.defaults.distance, 29_000);
        assert_eq!(config.defaults.paper_size, "3:4");
    }

    #[test]
    fn test_durations() {
        let config = Config::default();
        assert_eq!(config.search.debounce(), Duration::from_millis(300));
        assert_eq!(config.map.resize_delay(), Duration::from_millis(100));
    }

    #[test]
    fn test_get_set() {
        let mut config = Config::default();

        config.set("api.base_url", "http://poster.local").unwrap();
        assert_eq!(config.get("api.base_url"), Some("http://poster.local".to_string()));

        config.set("search.discard_stale", "false").unwrap();
        assert!(!config.search.discard_stale);

        config.set("defaults.paper_size", "9:19.5").unwrap();
        assert_eq!(config.get("defaults.paper_size"), Some("9:19.5".to_string()));

        config.set("map.navigate_zoom", "15").unwrap();
        assert_eq!(config.map.navigate_zoom, 15);
    }

    #[test]
    fn test_every_key_is_readable() {
        let config = Config::default();
        for key in Config::available_keys() {
            assert!(config.get(key).is_some(), "missing getter for {}", key);
        }
    }

    #[test]
    fn test_get_invalid_key() {
        let config = Config::default();
        assert_eq!(config.get("invalid.key"), None);
    }

    #[test]
    fn test_set_invalid_key() {
        let mut config = Config::default();
        assert!(config.set("invalid.key", "value").is_err());
    }

    #[test]
    fn test_set_invalid_values() {
        let mut config = Config::default();
        assert!(config.set("search.debounce_ms", "soon").is_err());
        assert!(config.set("defaults.paper_size", "A4").is_err());
        assert!(config.set("defaults.layers", "lava,clouds").is_err());
        assert!(config.set("map.navigate_zoom", "30").is_err());
        assert_eq!(config.defaults.paper_size, "3:4");
    }

    #[test]
    fn test_save_and_load() {
        with_temp_config(|| {
            let mut config = Config::default();
            config.api.base_url = "http://example.test".to_string();
            config.search.debounce_ms = 500;
            config.save().unwrap();

            let loaded = Config::load().unwrap();
            assert_eq!(loaded.api.base_url, "http://example.test");
            assert_eq!(loaded.search.debounce_ms, 500);
        });
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let loaded: Config = toml::from_str("[search]\ndebounce_ms = 50\n").unwrap();
        assert_eq!(loaded.search.debounce_ms, 50);
        assert_eq!(loaded.search.min_query_len, 2);
        assert_eq!(loaded.map.navigate_zoom, 13);
    }

    #[test]
    fn test_serialization_format() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();

        assert!(toml.contains("[api]"));
        assert!(toml.contains("[search]"));
        assert!(toml.contains("[map]"));
        assert!(toml.contains("[defaults]"));
    }
}
