//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default language model used for extraction
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Sampling temperature for extraction (low: we want stable JSON)
pub const DEFAULT_TEMPERATURE: f64 = 0.2;

/// Completion size cap, keeps runaway responses from costing money
pub const DEFAULT_MAX_TOKENS: u32 = 800;

/// Extraction request timeout in seconds
pub const DEFAULT_EXTRACTION_TIMEOUT_SECS: u64 = 30;

/// Default geocoding backend
pub const DEFAULT_GEOCODER: &str = "google";

/// Geocoding request timeout in seconds
pub const DEFAULT_GEOCODING_TIMEOUT_SECS: u64 = 10;

/// Concurrent per-place geocoding lookups
pub const DEFAULT_GEOCODING_CONCURRENCY: usize = 4;

/// Default output format
pub const DEFAULT_FORMAT: &str = "json";

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 7979;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "trip-atlas";
