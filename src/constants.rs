//! Centralized constants for the trip-atlas crate
//!
//! This module consolidates constants that are used across multiple modules
//! to avoid duplication and ensure consistency.

/// Geographic constants
pub mod geo {
    /// Mean Earth radius in kilometers
    pub const EARTH_RADIUS_KM: f64 = 6371.0;

    /// Kilometers per degree of latitude (approximate)
    pub const KM_PER_DEGREE_LAT: f64 = 111.32;

    /// Places farther than this from the destination are treated as bad matches
    pub const DEFAULT_MAX_DISTANCE_KM: f64 = 100.0;

    /// Radius of the proximity preference sent with biased lookups
    pub const DEFAULT_BIAS_RADIUS_METERS: u32 = 50_000;
}

/// External API endpoints
pub mod api {
    /// Google Maps Geocoding API
    pub const GOOGLE_GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

    /// OpenStreetMap Nominatim geocoding API
    pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

    /// OpenAI-compatible chat completion endpoint
    pub const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";

    /// Environment fallback for the extraction API key
    pub const OPENAI_KEY_ENV: &str = "OPENAI_API_KEY";

    /// Environment fallback for the Google geocoding API key
    pub const GOOGLE_MAPS_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";

    /// User agent sent to every upstream service
    pub const USER_AGENT: &str = concat!("trip-atlas/", env!("CARGO_PKG_VERSION"));
}

/// Map link templates
pub mod maps {
    /// Google Maps search endpoint (single or multi-place)
    pub const GOOGLE_MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/";

    /// Google Maps directions endpoint
    pub const GOOGLE_MAPS_DIR_URL: &str = "https://www.google.com/maps/dir/";
}
