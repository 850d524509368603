//! Human-readable text output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::trip::TripPlan;

/// Text formatter - outputs human-readable summary
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format(&self, plan: &TripPlan) -> Result<String> {
        let mut output = String::new();

        // Header
        output.push_str(&format!("trip-atlas plan ({})\n", plan.id));
        output.push_str(&format!("Destination: {}\n", plan.destination));
        output.push_str(&format!("Created: {}\n\n", plan.created_at));

        if plan.places.is_empty() {
            output.push_str("No places located.\n");
        } else {
            output.push_str("Places:\n");
            for place in &plan.places {
                output.push_str(&format!(
                    "  {}. {} [{}] ({:.6}, {:.6})\n",
                    place.position + 1,
                    place.name,
                    place.place_type,
                    place.latitude,
                    place.longitude
                ));
                if !place.address.is_empty() {
                    output.push_str(&format!("     {}\n", place.address));
                }
                if !place.context.is_empty() {
                    output.push_str(&format!("     {}\n", place.context));
                }
            }
        }

        if let Some(summary) = plan.unresolved_summary() {
            output.push_str(&format!("\n{}\n", summary));
        }

        Ok(output)
    }
}
