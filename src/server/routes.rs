//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::coord::distance::haversine_km;
use crate::coord::Coordinates;
use crate::error::{Error, ErrorKind};
use crate::extract::Extractor;
use crate::format::{available_formats, url::share_links, url::ShareLinks, FormatInfo};
use crate::geo::Geocoder;
use crate::highlight::{highlight, HighlightPlace};
use crate::server::state::AppState;
use crate::trip::pipeline::{geocode_all, plan_trip};
use crate::trip::{ExtractedPlace, Extraction, GeocodedPlace, PlaceType, TripPlan};

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    // Try relative to cwd first, then next to the executable
    let static_path = if std::path::Path::new("static").exists() {
        "static".to_string()
    } else {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("static")))
            .filter(|path| path.exists())
            .map(|path| path.to_string_lossy().to_string())
            .unwrap_or_else(|| "static".to_string())
    };

    Router::new()
        .route("/api/plan", post(plan_handler))
        .route("/api/extract", post(extract_handler))
        .route("/api/geocode", post(geocode_handler))
        .route("/api/highlight", post(highlight_handler))
        .route("/api/share", post(share_handler))
        .route("/api/distance", post(distance_handler))
        .route("/api/status", get(status_handler))
        .route("/api/place-types", get(place_types_handler))
        .route("/api/formats", get(formats_handler))
        .fallback_service(ServeDir::new(&static_path).append_index_html_on_directories(true))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl ApiError {
    fn input(message: impl Into<String>) -> Self {
        ApiError {
            error: message.into(),
            code: ErrorKind::Input.code().to_string(),
        }
    }

    /// HTTP status for this error's code
    pub fn status(&self) -> StatusCode {
        match self.code.as_str() {
            "INPUT_ERROR" | "INVALID_COORDINATES" => StatusCode::BAD_REQUEST,
            "NOT_FOUND" => StatusCode::NOT_FOUND,
            "UPSTREAM_RESPONSE" => StatusCode::BAD_GATEWAY,
            "UPSTREAM_QUOTA_OR_AUTH" => StatusCode::SERVICE_UNAVAILABLE,
            "UPSTREAM_TRANSPORT" => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status(), Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let (error, code) = match &err {
            Error::Extraction(e) => (e.user_message().to_string(), e.kind().code()),
            Error::Geocode(e) => (e.user_message().to_string(), e.kind().code()),
            Error::InvalidCoordinates(_) => (err.to_string(), "INVALID_COORDINATES"),
            Error::Config(_) => (err.to_string(), "CONFIG_ERROR"),
            _ => (err.to_string(), "INTERNAL_ERROR"),
        };
        ApiError {
            error,
            code: code.to_string(),
        }
    }
}

fn check_max_distance(max_distance_km: Option<f64>) -> Result<(), ApiError> {
    match max_distance_km {
        Some(km) if !km.is_finite() || km <= 0.0 => {
            Err(ApiError::input("max_distance_km must be a positive number"))
        }
        _ => Ok(()),
    }
}

/// Plan request body
#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    /// Raw trip notes
    pub text: String,
    /// Override the configured distance filter
    pub max_distance_km: Option<f64>,
}

/// Extract and geocode places from notes
///
/// POST /api/plan
async fn plan_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PlanRequest>,
) -> Result<Json<TripPlan>, ApiError> {
    check_max_distance(req.max_distance_km)?;

    let options = state.geocode_options(req.max_distance_km);
    let plan = plan_trip(&state.extractor, &state.geocoder, &req.text, options).await?;
    Ok(Json(plan))
}

/// Extract request body
#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub text: String,
}

/// Extraction only
///
/// POST /api/extract
async fn extract_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ExtractRequest>,
) -> Result<Json<Extraction>, ApiError> {
    let extraction = state
        .extractor
        .extract(&req.text)
        .await
        .map_err(Error::from)?;
    Ok(Json(extraction))
}

/// Geocode request body
#[derive(Debug, Deserialize)]
pub struct GeocodeRequest {
    pub places: Vec<ExtractedPlace>,
    pub destination: Option<String>,
    pub max_distance_km: Option<f64>,
}

/// Geocode an already extracted place list
///
/// POST /api/geocode
async fn geocode_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GeocodeRequest>,
) -> Result<Json<Vec<GeocodedPlace>>, ApiError> {
    check_max_distance(req.max_distance_km)?;

    let options = state.geocode_options(req.max_distance_km);
    let mut places = geocode_all(
        &state.geocoder,
        req.places,
        req.destination.as_deref(),
        options,
    )
    .await;
    for (position, place) in places.iter_mut().enumerate() {
        place.position = position;
    }
    Ok(Json(places))
}

/// Highlight request body
#[derive(Debug, Deserialize)]
pub struct HighlightRequest {
    pub text: String,
    #[serde(default)]
    pub places: Vec<HighlightPlace>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HighlightResponse {
    pub html: String,
}

/// Wrap place names in the notes with place links
///
/// POST /api/highlight
async fn highlight_handler(Json(req): Json<HighlightRequest>) -> Json<HighlightResponse> {
    Json(HighlightResponse {
        html: highlight(&req.text, &req.places),
    })
}

/// Share request body
#[derive(Debug, Deserialize)]
pub struct ShareRequest {
    #[serde(default)]
    pub places: Vec<GeocodedPlace>,
}

/// Google Maps links for a place list
///
/// POST /api/share
async fn share_handler(Json(req): Json<ShareRequest>) -> Json<ShareLinks> {
    Json(share_links(&req.places))
}

/// Distance request body
#[derive(Debug, Deserialize)]
pub struct DistanceRequest {
    pub from: Coordinates,
    pub to: Coordinates,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DistanceResponse {
    pub km: f64,
}

/// Great-circle distance between two points
///
/// POST /api/distance
async fn distance_handler(
    Json(req): Json<DistanceRequest>,
) -> Result<Json<DistanceResponse>, ApiError> {
    req.from.validate()?;
    req.to.validate()?;
    Ok(Json(DistanceResponse {
        km: haversine_km(req.from, req.to),
    }))
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server is running
    pub running: bool,
    /// Server version
    pub version: String,
    /// Extraction backend and model
    pub extractor: String,
    pub model: String,
    /// Geocoding backend
    pub geocoder: String,
    /// Whether the extractor has an API key
    pub extraction_key_configured: bool,
    /// Uptime in seconds
    pub uptime_secs: u64,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        extractor: state.extractor.name().to_string(),
        model: state.extractor.model().to_string(),
        geocoder: state.geocoder.name().to_string(),
        extraction_key_configured: state.extractor.has_key(),
        uptime_secs: state.uptime_secs(),
    })
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlaceTypeInfo {
    pub name: String,
    pub gpx_symbol: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlaceTypesResponse {
    pub types: Vec<PlaceTypeInfo>,
}

/// List the place-type vocabulary
///
/// GET /api/place-types
async fn place_types_handler() -> Json<PlaceTypesResponse> {
    let types = PlaceType::ALL
        .iter()
        .map(|t| PlaceTypeInfo {
            name: t.to_string(),
            gpx_symbol: t.gpx_symbol().to_string(),
        })
        .collect();
    Json(PlaceTypesResponse { types })
}

/// Formats list response
#[derive(Debug, Serialize, Deserialize)]
pub struct FormatsResponse {
    pub formats: Vec<FormatInfo>,
}

/// List available output formats
///
/// GET /api/formats
async fn formats_handler() -> Json<FormatsResponse> {
    Json(FormatsResponse {
        formats: available_formats(),
    })
}
