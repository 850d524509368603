//! Error types for trip-atlas
//!
//! The adapters report their failures through two domain enums,
//! [`ExtractionError`] and [`GeocodeError`]. Both classify into the coarse
//! [`ErrorKind`] taxonomy so callers can pick a retry or display policy
//! without matching on every variant.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coarse classification shared by every upstream failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Caller supplied unusable input (blank text, bad request)
    Input,
    /// Timeout or connection failure talking to an upstream service
    UpstreamTransport,
    /// Upstream answered, but with something we could not use
    UpstreamResponse,
    /// Rate limit, quota or credential problem
    UpstreamQuotaOrAuth,
    /// Lookup succeeded but matched nothing
    NotFound,
}

impl ErrorKind {
    /// Stable machine-readable code used by the HTTP API
    pub fn code(&self) -> &'static str {
        match self {
            Self::Input => "INPUT_ERROR",
            Self::UpstreamTransport => "UPSTREAM_TRANSPORT",
            Self::UpstreamResponse => "UPSTREAM_RESPONSE",
            Self::UpstreamQuotaOrAuth => "UPSTREAM_QUOTA_OR_AUTH",
            Self::NotFound => "NOT_FOUND",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Failures of the language-model extraction call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionError {
    #[error("No text provided")]
    EmptyInput,

    #[error("Malformed extraction response: {0}")]
    MalformedResponse(String),

    #[error("Extraction request timed out: {0}")]
    Timeout(String),

    #[error("Could not connect to extraction service: {0}")]
    ConnectionFailure(String),

    #[error("Extraction service rate limited: {0}")]
    RateLimited(String),

    #[error("Extraction service rejected credentials: {0}")]
    AuthConfigError(String),

    #[error("Extraction service error: {0}")]
    ServiceError(String),
}

impl ExtractionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyInput => ErrorKind::Input,
            Self::Timeout(_) | Self::ConnectionFailure(_) => ErrorKind::UpstreamTransport,
            Self::MalformedResponse(_) | Self::ServiceError(_) => ErrorKind::UpstreamResponse,
            Self::RateLimited(_) | Self::AuthConfigError(_) => ErrorKind::UpstreamQuotaOrAuth,
        }
    }

    /// Whether a caller-side retry has a reasonable chance of succeeding
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout(_) | Self::ConnectionFailure(_) | Self::RateLimited(_) | Self::ServiceError(_)
        )
    }

    /// Short message suitable for showing to an end user
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::EmptyInput => "No text provided",
            Self::MalformedResponse(_) => "Failed to parse extracted places. Please try again.",
            Self::Timeout(_) => "Request timed out. Please try again.",
            Self::ConnectionFailure(_) => {
                "Could not connect to the AI service. Please check your internet connection."
            }
            Self::RateLimited(_) => "AI service is busy. Please try again in a moment.",
            Self::AuthConfigError(_) => "AI service configuration error. Please contact support.",
            Self::ServiceError(_) => "AI service error. Please try again.",
        }
    }
}

/// Non-success outcomes of a single geocoding lookup
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeocodeError {
    #[error("No location found")]
    NotFound,

    #[error("Geocoding quota exceeded")]
    QuotaExceeded,

    #[error("Geocoding request denied (check API key)")]
    AuthDenied,

    #[error("Invalid geocoding request")]
    BadRequest,

    #[error("Geocoding server error, retrying may succeed")]
    TransientServerError,

    #[error("Unexpected geocoding status: {0}")]
    UnexpectedStatus(String),

    #[error("Geocoding request failed: {0}")]
    Transport(String),

    #[error("Malformed geocoding response: {0}")]
    MalformedResponse(String),
}

impl GeocodeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound => ErrorKind::NotFound,
            Self::QuotaExceeded | Self::AuthDenied => ErrorKind::UpstreamQuotaOrAuth,
            Self::BadRequest => ErrorKind::Input,
            Self::TransientServerError | Self::UnexpectedStatus(_) | Self::MalformedResponse(_) => {
                ErrorKind::UpstreamResponse
            }
            Self::Transport(_) => ErrorKind::UpstreamTransport,
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::TransientServerError | Self::Transport(_))
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::NotFound => "Place could not be located.",
            Self::QuotaExceeded => "Map service quota exceeded. Please try again later.",
            Self::AuthDenied => "Map service configuration error. Please contact support.",
            Self::BadRequest => "Invalid location query.",
            Self::TransientServerError | Self::Transport(_) => {
                "Map service is unavailable. Please try again."
            }
            Self::UnexpectedStatus(_) | Self::MalformedResponse(_) => "Map service error.",
        }
    }
}

/// Main error type for trip-atlas operations
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Format error: {0}")]
    Format(String),
}

/// Result type alias for trip-atlas operations
pub type Result<T> = std::result::Result<T, Error>;
