//! JSON output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::trip::TripPlan;

/// JSON formatter - outputs the full plan as pretty-printed JSON
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Full JSON trip plan"
    }

    fn format(&self, plan: &TripPlan) -> Result<String> {
        Ok(serde_json::to_string_pretty(plan)?)
    }
}
