//! Google Maps geocoding backend
//!
//! Google reports failures in a `status` field of an HTTP 200 body, so the
//! outcome is decided by [`interpret_response`] rather than the HTTP status.

use crate::config::GeocodingConfig;
use crate::constants::api::{GOOGLE_GEOCODE_URL, USER_AGENT};
use crate::constants::geo::DEFAULT_BIAS_RADIUS_METERS;
use crate::coord::Coordinates;
use crate::error::{GeocodeError, Result};
use crate::geo::{GeocodeHit, Geocoder};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Google Maps Geocoding API backend
#[derive(Debug, Clone)]
pub struct GoogleGeocoder {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    bias_radius_meters: u32,
}

/// Geocoding response envelope
#[derive(Debug, Deserialize)]
pub struct GoogleResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GoogleResult>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GoogleResult {
    pub geometry: GoogleGeometry,
    #[serde(default)]
    pub formatted_address: String,
}

#[derive(Debug, Deserialize)]
pub struct GoogleGeometry {
    pub location: GoogleLatLng,
}

#[derive(Debug, Deserialize)]
pub struct GoogleLatLng {
    pub lat: f64,
    pub lng: f64,
}

impl GoogleGeocoder {
    /// Create a backend with the given key and request timeout
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: GOOGLE_GEOCODE_URL.to_string(),
            bias_radius_meters: DEFAULT_BIAS_RADIUS_METERS,
        })
    }

    pub fn from_config(config: &GeocodingConfig, api_key: &str) -> Result<Self> {
        Ok(Self::new(api_key, Duration::from_secs(config.timeout_secs))?
            .with_base_url(&config.google_url)
            .with_bias_radius(config.bias_radius_meters))
    }

    /// Point the backend at a different endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_bias_radius(mut self, meters: u32) -> Self {
        self.bias_radius_meters = meters;
        self
    }

    /// Full request URL for `query`, with the optional proximity bias
    fn build_url(&self, query: &str, bias: Option<Coordinates>) -> String {
        let mut url = format!(
            "{}?address={}&key={}",
            self.base_url,
            urlencoding::encode(query),
            urlencoding::encode(&self.api_key)
        );

        if let Some(bias) = bias {
            url.push_str(&format!(
                "&location={},{}&radius={}",
                bias.lat, bias.lng, self.bias_radius_meters
            ));
        }

        url
    }

    /// Request URL safe for logs
    fn redact(&self, url: &str) -> String {
        if self.api_key.is_empty() {
            url.to_string()
        } else {
            url.replace(&*urlencoding::encode(&self.api_key), "HIDDEN")
        }
    }
}

/// Map a decoded response to an outcome
///
/// `OK` with at least one result takes the first result; every other status
/// maps to a [`GeocodeError`].
pub fn interpret_response(
    query: &str,
    response: GoogleResponse,
) -> std::result::Result<GeocodeHit, GeocodeError> {
    let outcome = match response.status.as_str() {
        "OK" => match response.results.into_iter().next() {
            Some(result) => {
                let location = result.geometry.location;
                debug!(
                    "Geocoded {}: {}, {}",
                    query, location.lat, location.lng
                );
                return Ok(GeocodeHit {
                    coords: Coordinates::new(location.lat, location.lng),
                    address: result.formatted_address,
                });
            }
            None => {
                warn!("No results found for '{}'", query);
                GeocodeError::NotFound
            }
        },
        "ZERO_RESULTS" => {
            debug!("No location found for '{}'", query);
            GeocodeError::NotFound
        }
        "OVER_QUERY_LIMIT" => {
            error!("Google geocoding quota exceeded for '{}'", query);
            GeocodeError::QuotaExceeded
        }
        "REQUEST_DENIED" => {
            error!(
                "Google geocoding request denied for '{}': {}",
                query,
                response.error_message.as_deref().unwrap_or("check API key")
            );
            GeocodeError::AuthDenied
        }
        "INVALID_REQUEST" => {
            error!("Invalid geocoding request for '{}'", query);
            GeocodeError::BadRequest
        }
        "UNKNOWN_ERROR" => {
            error!("Google geocoding server error for '{}', retrying may succeed", query);
            GeocodeError::TransientServerError
        }
        other => {
            warn!("Unexpected Google geocoding status {} for '{}'", other, query);
            GeocodeError::UnexpectedStatus(other.to_string())
        }
    };

    Err(outcome)
}

impl Geocoder for GoogleGeocoder {
    fn name(&self) -> &'static str {
        "google"
    }

    async fn resolve(
        &self,
        query: &str,
        bias: Option<Coordinates>,
    ) -> std::result::Result<GeocodeHit, GeocodeError> {
        if self.api_key.trim().is_empty() {
            error!("Google API key is missing, cannot geocode '{}'", query);
            return Err(GeocodeError::AuthDenied);
        }

        let url = self.build_url(query, bias);
        debug!("Google geocoding URL: {}", self.redact(&url));

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| GeocodeError::Transport(format!("Google request failed: {}", e)))?;

        let http_status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GeocodeError::Transport(format!("Failed to read Google response: {}", e)))?;

        let decoded: GoogleResponse = match serde_json::from_str(&body) {
            Ok(decoded) => decoded,
            Err(_) if !http_status.is_success() => {
                return Err(GeocodeError::UnexpectedStatus(format!("HTTP {}", http_status)));
            }
            Err(e) => {
                return Err(GeocodeError::MalformedResponse(format!(
                    "Failed to parse Google response: {}",
                    e
                )));
            }
        };

        debug!("Google API response status: {}", decoded.status);
        interpret_response(query, decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::spawn_upstream;
    use axum::extract::Query;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use std::collections::HashMap;

    fn decode(body: serde_json::Value) -> GoogleResponse {
        serde_json::from_value(body).unwrap()
    }

    fn geocoder(base_url: &str) -> GoogleGeocoder {
        GoogleGeocoder::new("test-key", Duration::from_secs(5))
            .unwrap()
            .with_base_url(base_url)
    }

    #[test]
    fn test_ok_takes_first_result() {
        let response = decode(json!({
            "status": "OK",
            "results": [
                {
                    "geometry": {"location": {"lat": 35.6586, "lng": 139.7454}},
                    "formatted_address": "Tokyo Tower, Minato City"
                },
                {
                    "geometry": {"location": {"lat": 1.0, "lng": 2.0}},
                    "formatted_address": "Somewhere else"
                }
            ]
        }));

        let hit = interpret_response("Tokyo Tower", response).unwrap();
        assert_eq!(hit.coords, Coordinates::new(35.6586, 139.7454));
        assert_eq!(hit.address, "Tokyo Tower, Minato City");
    }

    #[test]
    fn test_ok_without_results_is_not_found() {
        let response = decode(json!({"status": "OK", "results": []}));
        assert_eq!(
            interpret_response("x", response),
            Err(GeocodeError::NotFound)
        );
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            ("ZERO_RESULTS", GeocodeError::NotFound),
            ("OVER_QUERY_LIMIT", GeocodeError::QuotaExceeded),
            ("REQUEST_DENIED", GeocodeError::AuthDenied),
            ("INVALID_REQUEST", GeocodeError::BadRequest),
            ("UNKNOWN_ERROR", GeocodeError::TransientServerError),
            (
                "OVER_DAILY_LIMIT",
                GeocodeError::UnexpectedStatus("OVER_DAILY_LIMIT".to_string()),
            ),
        ];

        for (status, expected) in cases {
            let response = decode(json!({"status": status}));
            assert_eq!(interpret_response("q", response), Err(expected), "{}", status);
        }
    }

    #[test]
    fn test_build_url_without_bias() {
        let url = geocoder("https://example.test/geocode").build_url("Café de Flore, Paris", None);
        assert_eq!(
            url,
            "https://example.test/geocode?address=Caf%C3%A9%20de%20Flore%2C%20Paris&key=test-key"
        );
    }

    #[test]
    fn test_build_url_with_bias() {
        let url = geocoder("https://example.test/geocode")
            .build_url("Louvre", Some(Coordinates::new(48.8566, 2.3522)));
        assert!(url.ends_with("&location=48.8566,2.3522&radius=50000"));
    }

    #[test]
    fn test_redact_hides_key() {
        let g = geocoder("https://example.test/geocode");
        let url = g.build_url("Louvre", None);
        let redacted = g.redact(&url);
        assert!(!redacted.contains("test-key"));
        assert!(redacted.contains("key=HIDDEN"));
    }

    #[tokio::test]
    async fn test_missing_key_is_denied_without_request() {
        let g = GoogleGeocoder::new("", Duration::from_secs(1))
            .unwrap()
            .with_base_url("http://127.0.0.1:1/unreachable");
        assert_eq!(g.resolve("Louvre", None).await, Err(GeocodeError::AuthDenied));
    }

    #[tokio::test]
    async fn test_resolve_against_fake_upstream() {
        let router = Router::new().route(
            "/geocode",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let biased = params.contains_key("location") && params.contains_key("radius");
                match params.get("address").map(String::as_str) {
                    Some("Tokyo Tower, Tokyo, Japan") if biased => Json(json!({
                        "status": "OK",
                        "results": [{
                            "geometry": {"location": {"lat": 35.6586, "lng": 139.7454}},
                            "formatted_address": "4 Chome-2-8 Shibakoen, Minato City, Tokyo"
                        }]
                    })),
                    Some("Quota") => Json(json!({"status": "OVER_QUERY_LIMIT"})),
                    _ => Json(json!({"status": "ZERO_RESULTS", "results": []})),
                }
            }),
        );
        let base = spawn_upstream(router).await;
        let g = geocoder(&format!("{}/geocode", base));
        let tokyo = Some(Coordinates::new(35.6762, 139.6503));

        let hit = g.resolve("Tokyo Tower, Tokyo, Japan", tokyo).await.unwrap();
        assert_eq!(hit.coords, Coordinates::new(35.6586, 139.7454));

        assert_eq!(
            g.resolve("Tokyo Tower, Tokyo, Japan", None).await,
            Err(GeocodeError::NotFound)
        );
        assert_eq!(g.resolve("Quota", None).await, Err(GeocodeError::QuotaExceeded));
    }

    #[tokio::test]
    async fn test_non_json_body_is_classified() {
        let router = Router::new()
            .route("/ok", get(|| async { "<html>not json</html>" }))
            .route(
                "/down",
                get(|| async { (axum::http::StatusCode::BAD_GATEWAY, "upstream down") }),
            );
        let base = spawn_upstream(router).await;

        let result = geocoder(&format!("{}/ok", base)).resolve("x", None).await;
        assert!(matches!(result, Err(GeocodeError::MalformedResponse(_))));

        let result = geocoder(&format!("{}/down", base)).resolve("x", None).await;
        assert!(matches!(result, Err(GeocodeError::UnexpectedStatus(_))));
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport() {
        let g = geocoder("http://127.0.0.1:1/geocode");
        let result = g.resolve("Louvre", None).await;
        assert!(matches!(result, Err(GeocodeError::Transport(_))));
    }
}
