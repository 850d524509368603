//! Nominatim geocoding backend (OpenStreetMap)
//!
//! Uses the free Nominatim API for geocoding.
//! Rate limit: 1 request per second (enforced by User-Agent requirement)
//!
//! Nominatim has no status field, so outcomes come from the HTTP status and
//! an empty result list. Proximity bias is sent as an unbounded `viewbox`.

use crate::config::GeocodingConfig;
use crate::constants::api::{NOMINATIM_URL, USER_AGENT};
use crate::constants::geo::{DEFAULT_BIAS_RADIUS_METERS, KM_PER_DEGREE_LAT};
use crate::coord::Coordinates;
use crate::error::{GeocodeError, Result};
use crate::geo::{GeocodeHit, Geocoder};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Nominatim geocoding backend
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: reqwest::Client,
    base_url: String,
    bias_radius_meters: u32,
}

/// Nominatim search response item
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
    display_name: String,
}

impl NominatimGeocoder {
    /// Create a new Nominatim backend
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: NOMINATIM_URL.to_string(),
            bias_radius_meters: DEFAULT_BIAS_RADIUS_METERS,
        })
    }

    pub fn from_config(config: &GeocodingConfig) -> Result<Self> {
        let mut geocoder = Self::new(Duration::from_secs(config.timeout_secs))?;
        geocoder.base_url = config.nominatim_url.trim_end_matches('/').to_string();
        geocoder.bias_radius_meters = config.bias_radius_meters;
        Ok(geocoder)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Parse lat/lng strings to f64
    fn parse_coords(lat: &str, lng: &str) -> std::result::Result<Coordinates, GeocodeError> {
        let lat: f64 = lat
            .parse()
            .map_err(|_| GeocodeError::MalformedResponse(format!("Invalid latitude: {}", lat)))?;
        let lng: f64 = lng
            .parse()
            .map_err(|_| GeocodeError::MalformedResponse(format!("Invalid longitude: {}", lng)))?;
        Ok(Coordinates::new(lat, lng))
    }

    /// `viewbox` covering the bias radius: `left,top,right,bottom`
    fn viewbox(&self, bias: Coordinates) -> String {
        let radius_km = f64::from(self.bias_radius_meters) / 1000.0;
        let dlat = radius_km / KM_PER_DEGREE_LAT;
        let dlng = radius_km / (KM_PER_DEGREE_LAT * bias.lat.to_radians().cos().max(0.01));

        format!(
            "{},{},{},{}",
            bias.lng - dlng,
            bias.lat + dlat,
            bias.lng + dlng,
            bias.lat - dlat
        )
    }

    fn build_url(&self, query: &str, bias: Option<Coordinates>) -> String {
        let mut url = format!(
            "{}/search?q={}&format=json&limit=1",
            self.base_url,
            urlencoding::encode(query)
        );
        if let Some(bias) = bias {
            url.push_str(&format!("&viewbox={}", urlencoding::encode(&self.viewbox(bias))));
        }
        url
    }
}

/// Map a non-success HTTP status to an outcome
fn classify_status(status: StatusCode) -> GeocodeError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => GeocodeError::QuotaExceeded,
        StatusCode::FORBIDDEN | StatusCode::UNAUTHORIZED => GeocodeError::AuthDenied,
        StatusCode::BAD_REQUEST => GeocodeError::BadRequest,
        StatusCode::NOT_FOUND => GeocodeError::NotFound,
        s if s.is_server_error() => GeocodeError::TransientServerError,
        s => GeocodeError::UnexpectedStatus(format!("HTTP {}", s)),
    }
}

impl Geocoder for NominatimGeocoder {
    fn name(&self) -> &'static str {
        "nominatim"
    }

    async fn resolve(
        &self,
        query: &str,
        bias: Option<Coordinates>,
    ) -> std::result::Result<GeocodeHit, GeocodeError> {
        let url = self.build_url(query, bias);
        debug!("Nominatim URL: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| GeocodeError::Transport(format!("Nominatim request failed: {}", e)))?;

        if !response.status().is_success() {
            let outcome = classify_status(response.status());
            warn!("Nominatim returned {} for '{}'", response.status(), query);
            return Err(outcome);
        }

        let results: Vec<NominatimResult> = response.json().await.map_err(|e| {
            GeocodeError::MalformedResponse(format!("Failed to parse Nominatim response: {}", e))
        })?;

        match results.into_iter().next() {
            Some(result) => Ok(GeocodeHit {
                coords: Self::parse_coords(&result.lat, &result.lon)?,
                address: result.display_name,
            }),
            None => {
                debug!("No location found for '{}'", query);
                Err(GeocodeError::NotFound)
            }
        }
    }
}
