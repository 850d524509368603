//! trip-atlas: Travel Notes Place Mapper
//!
//! A library and CLI tool that pulls the places mentioned in free-form
//! travel notes, geocodes them near the trip's destination, and links each
//! mention back to its pin.
//!
//! ## Features
//!
//! - Place extraction through an OpenAI-compatible chat completions endpoint
//! - Geocoding via Google or Nominatim, biased toward the destination
//! - Distance filtering of stray matches
//! - Entity-aware highlighting of place names in the notes
//! - JSON, text, GPX, share-link and HTML output
//! - HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```rust
//! use trip_atlas::highlight::{highlight, HighlightPlace};
//!
//! let notes = "Morning at the Louvre, then coffee.";
//! let places = vec![HighlightPlace::new("Louvre", 0)];
//!
//! let html = highlight(notes, &places);
//! assert!(html.contains("data-place-index='0'>Louvre</a>"));
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod extract;
pub mod format;
pub mod geo;
pub mod highlight;
pub mod server;
pub mod trip;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use config::Config;
pub use coord::Coordinates;
pub use error::{Error, Result};
pub use highlight::highlight;
pub use trip::pipeline::{geocode_all, plan_trip};
pub use trip::{ExtractedPlace, GeocodedPlace, TripPlan};
