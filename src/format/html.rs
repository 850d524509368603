//! Highlighted-notes HTML formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::highlight::highlight_places;
use crate::trip::TripPlan;

/// HTML formatter - outputs the notes with place links
pub struct HtmlFormatter;

impl OutputFormatter for HtmlFormatter {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "Notes with place names linked"
    }

    fn format(&self, plan: &TripPlan) -> Result<String> {
        Ok(highlight_places(&plan.notes, &plan.places))
    }
}
