//! Server shared state
//!
//! Holds configuration and the upstream adapters built from it.

use crate::config::Config;
use crate::error::Result;
use crate::extract::openai::OpenAiExtractor;
use crate::geo::{get_geocoder, GeocoderBackend};
use crate::trip::pipeline::GeocodeOptions;
use std::time::Instant;

/// Shared state for the HTTP server
pub struct AppState {
    /// Configuration
    pub config: Config,

    /// Place extractor
    pub extractor: OpenAiExtractor,

    /// Configured geocoding backend
    pub geocoder: GeocoderBackend,

    started: Instant,
}

impl AppState {
    /// Build the adapters named in `config`, resolving API keys
    pub fn new(config: Config) -> Result<Self> {
        let extractor =
            OpenAiExtractor::from_config(&config.extraction, &config.api_keys.openai_key())?;
        let geocoder = get_geocoder(&config.geocoding, &config.api_keys.google_maps_key())?;
        Ok(Self::with_adapters(config, extractor, geocoder))
    }

    pub fn with_adapters(
        config: Config,
        extractor: OpenAiExtractor,
        geocoder: GeocoderBackend,
    ) -> Self {
        Self {
            config,
            extractor,
            geocoder,
            started: Instant::now(),
        }
    }

    /// Batch geocoding options from config, with an optional distance override
    pub fn geocode_options(&self, max_distance_km: Option<f64>) -> GeocodeOptions {
        let options = GeocodeOptions::from_config(&self.config.geocoding);
        match max_distance_km {
            Some(km) => options.with_max_distance(km),
            None => options,
        }
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }
}
