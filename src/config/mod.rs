//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/trip-atlas/config.toml

pub mod defaults;

use crate::constants::api::{
    GOOGLE_GEOCODE_URL, GOOGLE_MAPS_KEY_ENV, NOMINATIM_URL, OPENAI_CHAT_URL, OPENAI_KEY_ENV,
};
use crate::constants::geo::{DEFAULT_BIAS_RADIUS_METERS, DEFAULT_MAX_DISTANCE_KM};
use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Language-model extraction settings
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Geocoding settings
    #[serde(default)]
    pub geocoding: GeocodingConfig,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// API keys for external services
    #[serde(default)]
    pub api_keys: ApiKeysConfig,
}

/// Language-model extraction settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Chat completion endpoint
    #[serde(default = "default_extraction_url")]
    pub base_url: String,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Completion token cap
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout in seconds
    #[serde(default = "default_extraction_timeout")]
    pub timeout_secs: u64,
}

/// Geocoding settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Backend name: google or nominatim
    #[serde(default = "default_geocoder")]
    pub backend: String,

    /// Google geocoding endpoint
    #[serde(default = "default_google_url")]
    pub google_url: String,

    /// Nominatim base URL
    #[serde(default = "default_nominatim_url")]
    pub nominatim_url: String,

    /// Radius of the proximity preference around the destination
    #[serde(default = "default_bias_radius")]
    pub bias_radius_meters: u32,

    /// Places farther than this from the destination are dropped
    #[serde(default = "default_max_distance")]
    pub max_distance_km: f64,

    /// Concurrent per-place lookups
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Request timeout in seconds
    #[serde(default = "default_geocoding_timeout")]
    pub timeout_secs: u64,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format for `plan`
    #[serde(default = "default_format")]
    pub format: String,
}

/// API keys for external services
///
/// Empty values fall back to the environment, see [`ApiKeysConfig::openai_key`].
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiKeysConfig {
    /// OpenAI (or compatible) API key
    #[serde(default)]
    pub openai: String,

    /// Google Maps Geocoding API key
    #[serde(default)]
    pub google_maps: String,
}

// Default value functions for serde
fn default_extraction_url() -> String {
    OPENAI_CHAT_URL.to_string()
}
fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}
fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}
fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}
fn default_extraction_timeout() -> u64 {
    DEFAULT_EXTRACTION_TIMEOUT_SECS
}
fn default_geocoder() -> String {
    DEFAULT_GEOCODER.to_string()
}
fn default_google_url() -> String {
    GOOGLE_GEOCODE_URL.to_string()
}
fn default_nominatim_url() -> String {
    NOMINATIM_URL.to_string()
}
fn default_bias_radius() -> u32 {
    DEFAULT_BIAS_RADIUS_METERS
}
fn default_max_distance() -> f64 {
    DEFAULT_MAX_DISTANCE_KM
}
fn default_concurrency() -> usize {
    DEFAULT_GEOCODING_CONCURRENCY
}
fn default_geocoding_timeout() -> u64 {
    DEFAULT_GEOCODING_TIMEOUT_SECS
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            base_url: default_extraction_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_extraction_timeout(),
        }
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            backend: default_geocoder(),
            google_url: default_google_url(),
            nominatim_url: default_nominatim_url(),
            bias_radius_meters: default_bias_radius(),
            max_distance_km: default_max_distance(),
            concurrency: default_concurrency(),
            timeout_secs: default_geocoding_timeout(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

impl ApiKeysConfig {
    /// Extraction key: config value, else `OPENAI_API_KEY`
    pub fn openai_key(&self) -> String {
        resolve_key(&self.openai, OPENAI_KEY_ENV)
    }

    /// Geocoding key: config value, else `GOOGLE_MAPS_API_KEY`
    pub fn google_maps_key(&self) -> String {
        resolve_key(&self.google_maps, GOOGLE_MAPS_KEY_ENV)
    }
}

fn resolve_key(configured: &str, env_var: &str) -> String {
    if configured.trim().is_empty() {
        std::env::var(env_var).unwrap_or_default()
    } else {
        configured.trim().to_string()
    }
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
            Self::load_from(&path)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to an explicit file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["extraction", "base_url"] => Some(self.extraction.base_url.clone()),
            ["extraction", "model"] => Some(self.extraction.model.clone()),
            ["extraction", "temperature"] => Some(self.extraction.temperature.to_string()),
            ["extraction", "max_tokens"] => Some(self.extraction.max_tokens.to_string()),
            ["extraction", "timeout_secs"] => Some(self.extraction.timeout_secs.to_string()),

            ["geocoding", "backend"] => Some(self.geocoding.backend.clone()),
            ["geocoding", "google_url"] => Some(self.geocoding.google_url.clone()),
            ["geocoding", "nominatim_url"] => Some(self.geocoding.nominatim_url.clone()),
            ["geocoding", "bias_radius_meters"] => {
                Some(self.geocoding.bias_radius_meters.to_string())
            }
            ["geocoding", "max_distance_km"] => Some(self.geocoding.max_distance_km.to_string()),
            ["geocoding", "concurrency"] => Some(self.geocoding.concurrency.to_string()),
            ["geocoding", "timeout_secs"] => Some(self.geocoding.timeout_secs.to_string()),

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            ["output", "format"] => Some(self.output.format.clone()),

            ["api_keys", "openai"] => Some(self.api_keys.openai.clone()),
            ["api_keys", "google_maps"] => Some(self.api_keys.google_maps.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["extraction", "base_url"] => self.extraction.base_url = value.to_string(),
            ["extraction", "model"] => self.extraction.model = value.to_string(),
            ["extraction", "temperature"] => {
                self.extraction.temperature = parse_value(value, "temperature")?;
            }
            ["extraction", "max_tokens"] => {
                self.extraction.max_tokens = parse_value(value, "max_tokens")?;
            }
            ["extraction", "timeout_secs"] => {
                self.extraction.timeout_secs = parse_value(value, "timeout")?;
            }

            ["geocoding", "backend"] => self.geocoding.backend = value.to_string(),
            ["geocoding", "google_url"] => self.geocoding.google_url = value.to_string(),
            ["geocoding", "nominatim_url"] => self.geocoding.nominatim_url = value.to_string(),
            ["geocoding", "bias_radius_meters"] => {
                self.geocoding.bias_radius_meters = parse_value(value, "radius")?;
            }
            ["geocoding", "max_distance_km"] => {
                let km: f64 = parse_value(value, "distance")?;
                if !(km > 0.0) {
                    return Err(Error::Config(format!("Distance must be positive: {}", value)));
                }
                self.geocoding.max_distance_km = km;
            }
            ["geocoding", "concurrency"] => {
                let n: usize = parse_value(value, "concurrency")?;
                if n == 0 {
                    return Err(Error::Config("Concurrency must be at least 1".to_string()));
                }
                self.geocoding.concurrency = n;
            }
            ["geocoding", "timeout_secs"] => {
                self.geocoding.timeout_secs = parse_value(value, "timeout")?;
            }

            ["server", "host"] => self.server.host = value.to_string(),
            ["server", "port"] => self.server.port = parse_value(value, "port")?,

            ["output", "format"] => self.output.format = value.to_string(),

            ["api_keys", "openai"] => self.api_keys.openai = value.to_string(),
            ["api_keys", "google_maps"] => self.api_keys.google_maps = value.to_string(),

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "extraction.base_url",
            "extraction.model",
            "extraction.temperature",
            "extraction.max_tokens",
            "extraction.timeout_secs",
            "geocoding.backend",
            "geocoding.google_url",
            "geocoding.nominatim_url",
            "geocoding.bias_radius_meters",
            "geocoding.max_distance_km",
            "geocoding.concurrency",
            "geocoding.timeout_secs",
            "server.host",
            "server.port",
            "output.format",
            "api_keys.openai",
            "api_keys.google_maps",
        ]
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_value<T: std::str::FromStr>(value: &str, what: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("Invalid {} value: {}", what, value)))
}
