//! Output formatters
//!
//! Provides trait-based output formatting for trip plans.

pub mod gpx;
pub mod html;
pub mod json;
pub mod text;
pub mod url;

use crate::error::Result;
use crate::trip::TripPlan;
use serde::{Deserialize, Serialize};

/// Information about an output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Format name
    pub name: String,
    /// Format description
    pub description: String,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Get the format name
    fn name(&self) -> &str;

    /// Get the format description
    fn description(&self) -> &str;

    /// Render a trip plan
    fn format(&self, plan: &TripPlan) -> Result<String>;
}

/// Get a formatter by name
pub fn get_formatter(name: &str) -> Option<Box<dyn OutputFormatter>> {
    match name.to_lowercase().as_str() {
        "json" => Some(Box::new(json::JsonFormatter)),
        "text" => Some(Box::new(text::TextFormatter)),
        "gpx" => Some(Box::new(gpx::GpxFormatter)),
        "url" => Some(Box::new(url::UrlFormatter)),
        "html" => Some(Box::new(html::HtmlFormatter)),
        _ => None,
    }
}

/// List all available formatters
pub fn available_formats() -> Vec<FormatInfo> {
    let formatters: [Box<dyn OutputFormatter>; 5] = [
        Box::new(json::JsonFormatter),
        Box::new(text::TextFormatter),
        Box::new(gpx::GpxFormatter),
        Box::new(url::UrlFormatter),
        Box::new(html::HtmlFormatter),
    ];
    formatters
        .iter()
        .map(|f| FormatInfo {
            name: f.name().to_string(),
            description: f.description().to_string(),
        })
        .collect()
}
