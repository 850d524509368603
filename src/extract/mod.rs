//! Place extraction
//!
//! Turns free-form trip notes into a destination plus an ordered list of
//! [`ExtractedPlace`]s. The only backend is a chat-completion language model
//! ([`openai::OpenAiExtractor`]); the trait exists so the pipeline can be
//! driven by fakes in tests.

pub mod openai;

use crate::error::ExtractionError;
use crate::trip::{ExtractedPlace, Extraction};
use serde_json::Value;
use std::future::Future;
use tracing::warn;

/// Trait for extraction backends
pub trait Extractor: Send + Sync {
    /// Returns the backend name (e.g., "openai")
    fn name(&self) -> &'static str;

    /// Extract a destination and places from `text`
    ///
    /// Blank text fails with [`ExtractionError::EmptyInput`] before any
    /// network call.
    fn extract(
        &self,
        text: &str,
    ) -> impl Future<Output = std::result::Result<Extraction, ExtractionError>> + Send;
}

/// Destination used when the model does not name one
pub const UNKNOWN_DESTINATION: &str = "Unknown";

/// Parse the JSON document the model produced
///
/// Two shapes are accepted: a bare array of places, or an object carrying
/// `places` (preferred) or `locations`. Entries that are not place objects
/// are skipped.
pub fn parse_payload(content: &str) -> std::result::Result<Extraction, ExtractionError> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| ExtractionError::MalformedResponse(e.to_string()))?;

    let (destination, items) = match value {
        Value::Array(items) => (None, items),
        Value::Object(mut map) => {
            let destination = map
                .get("destination")
                .and_then(Value::as_str)
                .map(str::to_string);
            // a null or non-list `places` counts as absent
            let items = match map.remove("places") {
                Some(Value::Array(items)) => items,
                _ => match map.remove("locations") {
                    Some(Value::Array(items)) => items,
                    _ => Vec::new(),
                },
            };
            (destination, items)
        }
        other => {
            return Err(ExtractionError::MalformedResponse(format!(
                "expected an object or array, got {}",
                other
            )))
        }
    };

    let places = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<ExtractedPlace>(item) {
            Ok(place) => Some(place),
            Err(e) => {
                warn!("Skipping unreadable place entry: {}", e);
                None
            }
        })
        .collect();

    Ok(Extraction {
        destination: destination.unwrap_or_else(|| UNKNOWN_DESTINATION.to_string()),
        places,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_with_places() {
        let extraction = parse_payload(
            r#"{"destination": "Paris, France", "places": [
                {"name": "Eiffel Tower", "context": "iconic landmark", "type": "landmark"},
                {"name": "Le Jules Verne", "context": "Michelin restaurant", "type": "restaurant"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(extraction.destination, "Paris, France");
        assert_eq!(extraction.places.len(), 2);
        assert_eq!(extraction.places[0].name, "Eiffel Tower");
        assert_eq!(extraction.places[1].place_type, "restaurant");
    }

    #[test]
    fn test_parse_locations_fallback() {
        let extraction = parse_payload(
            r#"{"destination": "Kyoto", "locations": [{"name": "Fushimi Inari", "context": "", "type": "landmark"}]}"#,
        )
        .unwrap();
        assert_eq!(extraction.places.len(), 1);
        assert_eq!(extraction.places[0].name, "Fushimi Inari");
    }

    #[test]
    fn test_parse_null_places_uses_locations() {
        let extraction = parse_payload(
            r#"{"destination": "Kyoto", "places": null, "locations": [{"name": "Fushimi Inari", "context": "", "type": "landmark"}]}"#,
        )
        .unwrap();
        assert_eq!(extraction.destination, "Kyoto");
        assert_eq!(extraction.places.len(), 1);
        assert_eq!(extraction.places[0].name, "Fushimi Inari");

        let extraction =
            parse_payload(r#"{"places": "none", "locations": [{"name": "Gion"}]}"#).unwrap();
        assert_eq!(extraction.places.len(), 1);
    }

    #[test]
    fn test_parse_prefers_places_over_locations() {
        let extraction = parse_payload(
            r#"{"places": [{"name": "A"}], "locations": [{"name": "B"}, {"name": "C"}]}"#,
        )
        .unwrap();
        assert_eq!(extraction.places.len(), 1);
        assert_eq!(extraction.places[0].name, "A");
    }

    #[test]
    fn test_parse_bare_array() {
        let extraction = parse_payload(r#"[{"name": "Tokyo Tower", "type": "landmark"}]"#).unwrap();
        assert_eq!(extraction.destination, UNKNOWN_DESTINATION);
        assert_eq!(extraction.places[0].name, "Tokyo Tower");
    }

    #[test]
    fn test_parse_missing_lists() {
        let extraction = parse_payload(r#"{"destination": "Lisbon"}"#).unwrap();
        assert_eq!(extraction.destination, "Lisbon");
        assert!(extraction.places.is_empty());
    }

    #[test]
    fn test_parse_skips_non_objects() {
        let extraction = parse_payload(r#"{"places": ["oops", {"name": "Ok"}]}"#).unwrap();
        assert_eq!(extraction.places.len(), 1);
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(
            parse_payload("not json at all"),
            Err(ExtractionError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_payload("42"),
            Err(ExtractionError::MalformedResponse(_))
        ));
    }
}
