//! GPX output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::trip::TripPlan;
use quick_xml::escape::escape;

/// GPX formatter - outputs GPX waypoint file
pub struct GpxFormatter;

impl OutputFormatter for GpxFormatter {
    fn name(&self) -> &str {
        "gpx"
    }

    fn description(&self) -> &str {
        "GPX waypoint file"
    }

    fn format(&self, plan: &TripPlan) -> Result<String> {
        let mut gpx = String::new();

        // XML header
        gpx.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        gpx.push('\n');
        gpx.push_str(r#"<gpx version="1.1" creator="trip-atlas">"#);
        gpx.push('\n');

        // Metadata
        gpx.push_str("  <metadata>\n");
        gpx.push_str(&format!("    <name>{}</name>\n", escape(&plan.destination)));
        gpx.push_str(&format!("    <time>{}</time>\n", plan.created_at));
        gpx.push_str("  </metadata>\n");

        for place in &plan.places {
            gpx.push_str(&format!(
                r#"  <wpt lat="{}" lon="{}">"#,
                place.latitude, place.longitude
            ));
            gpx.push('\n');
            gpx.push_str(&format!("    <name>{}</name>\n", escape(&place.name)));

            if !place.address.is_empty() {
                gpx.push_str(&format!("    <cmt>{}</cmt>\n", escape(&place.address)));
            }
            if !place.context.is_empty() {
                gpx.push_str(&format!("    <desc>{}</desc>\n", escape(&place.context)));
            }

            if let Some(kind) = place.kind() {
                gpx.push_str(&format!("    <sym>{}</sym>\n", kind.gpx_symbol()));
                gpx.push_str(&format!("    <type>{}</type>\n", kind));
            }

            gpx.push_str("  </wpt>\n");
        }

        gpx.push_str("</gpx>\n");
        Ok(gpx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::fixtures::tokyo_plan;

    #[test]
    fn test_gpx_format() {
        let output = GpxFormatter.format(&tokyo_plan()).unwrap();

        assert!(output.contains(r#"<?xml version="1.0""#));
        assert!(output.contains(r#"<gpx version="1.1" creator="trip-atlas">"#));
        assert!(output.contains(r#"<wpt lat="35.6586" lon="139.7454">"#));
        assert!(output.contains("<name>Sukiyabashi Jiro</name>"));
        assert!(output.contains("<sym>Restaurant</sym>"));
        assert!(output.contains("<sym>Scenic Area</sym>"));
        assert_eq!(output.matches("<wpt").count(), 2);
        assert!(output.ends_with("</gpx>\n"));
    }

    #[test]
    fn test_gpx_escapes_text() {
        let mut plan = tokyo_plan();
        plan.places[0].name = "Fish & <Chips>".to_string();
        plan.places[0].place_type = "spa".to_string();

        let output = GpxFormatter.format(&plan).unwrap();
        assert!(output.contains("<name>Fish &amp; &lt;Chips&gt;</name>"));
        // unknown type: no symbol for this waypoint
        assert_eq!(output.matches("<sym>").count(), 1);
    }

    #[test]
    fn test_gpx_formatter_info() {
        let formatter = GpxFormatter;
        assert_eq!(formatter.name(), "gpx");
        assert!(!formatter.description().is_empty());
    }
}
