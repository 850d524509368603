//! Geocoding module
//!
//! Turns a free-text place query into coordinates and a formatted address.
//! Each backend is a single file implementing [`Geocoder`].
//!
//! ## Flex Point
//! Adding a new geocoding backend requires:
//! 1. Create `src/geo/{backend_name}.rs` implementing `Geocoder`
//! 2. Add a variant to [`GeocoderBackend`] and a match arm in [`get_geocoder`]
//! 3. List it in [`available_backends`]

pub mod google;
pub mod nominatim;

use crate::config::GeocodingConfig;
use crate::coord::Coordinates;
use crate::error::{Error, GeocodeError, Result};
use serde::{Deserialize, Serialize};
use std::future::Future;

/// A successful geocoding lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeHit {
    pub coords: Coordinates,
    /// Formatted address (or display name) of the match
    pub address: String,
}

/// Trait for geocoding backends
///
/// Implementations must be thread-safe (Send + Sync) to work with async server.
pub trait Geocoder: Send + Sync {
    /// Returns the backend name (e.g., "google", "nominatim")
    fn name(&self) -> &'static str;

    /// Resolve `query` to a single best match
    ///
    /// `bias`, when given, asks the service to prefer results near that
    /// point. It is a preference, not a filter: distant matches can still
    /// come back.
    fn resolve(
        &self,
        query: &str,
        bias: Option<Coordinates>,
    ) -> impl Future<Output = std::result::Result<GeocodeHit, GeocodeError>> + Send;
}

/// Build the lookup string for a place, qualified by the trip destination
pub fn search_query(place: &str, destination: Option<&str>) -> String {
    match destination.map(str::trim).filter(|d| !d.is_empty()) {
        Some(destination) => format!("{}, {}", place.trim(), destination),
        None => place.trim().to_string(),
    }
}

/// Configured geocoding backend
#[derive(Debug, Clone)]
pub enum GeocoderBackend {
    Google(google::GoogleGeocoder),
    Nominatim(nominatim::NominatimGeocoder),
}

impl Geocoder for GeocoderBackend {
    fn name(&self) -> &'static str {
        match self {
            Self::Google(g) => g.name(),
            Self::Nominatim(n) => n.name(),
        }
    }

    async fn resolve(
        &self,
        query: &str,
        bias: Option<Coordinates>,
    ) -> std::result::Result<GeocodeHit, GeocodeError> {
        match self {
            Self::Google(g) => g.resolve(query, bias).await,
            Self::Nominatim(n) => n.resolve(query, bias).await,
        }
    }
}

/// Information about a backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendInfo {
    /// Backend name (used in config/API)
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Whether the backend needs an API key
    pub requires_key: bool,
}

/// Build the backend named in the geocoding config
pub fn get_geocoder(config: &GeocodingConfig, google_api_key: &str) -> Result<GeocoderBackend> {
    match config.backend.to_lowercase().as_str() {
        "google" => Ok(GeocoderBackend::Google(google::GoogleGeocoder::from_config(
            config,
            google_api_key,
        )?)),
        "nominatim" | "osm" => Ok(GeocoderBackend::Nominatim(
            nominatim::NominatimGeocoder::from_config(config)?,
        )),
        other => Err(Error::Config(format!("Unknown geocoding backend: {}", other))),
    }
}

/// List all available backends with their info
pub fn available_backends() -> Vec<BackendInfo> {
    vec![
        BackendInfo {
            name: "google".to_string(),
            description: "Google Maps Geocoding API".to_string(),
            requires_key: true,
        },
        BackendInfo {
            name: "nominatim".to_string(),
            description: "OpenStreetMap Nominatim".to_string(),
            requires_key: false,
        },
    ]
}
