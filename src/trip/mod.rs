//! Trip records
//!
//! Types flowing through the extraction → geocoding → highlighting pipeline.
//! Every type here is a plain value: the pipeline owns no persistent state.

pub mod pipeline;

use crate::coord::{Coordinates, Located};
use serde::{Deserialize, Serialize};

/// Fixed vocabulary the extractor is asked to classify places into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceType {
    Restaurant,
    Bar,
    Cafe,
    Hotel,
    Landmark,
    Museum,
    Park,
    Shopping,
    Nightlife,
    Attraction,
}

impl PlaceType {
    pub const ALL: [PlaceType; 10] = [
        PlaceType::Restaurant,
        PlaceType::Bar,
        PlaceType::Cafe,
        PlaceType::Hotel,
        PlaceType::Landmark,
        PlaceType::Museum,
        PlaceType::Park,
        PlaceType::Shopping,
        PlaceType::Nightlife,
        PlaceType::Attraction,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Restaurant => "restaurant",
            Self::Bar => "bar",
            Self::Cafe => "cafe",
            Self::Hotel => "hotel",
            Self::Landmark => "landmark",
            Self::Museum => "museum",
            Self::Park => "park",
            Self::Shopping => "shopping",
            Self::Nightlife => "nightlife",
            Self::Attraction => "attraction",
        }
    }

    /// GPX waypoint symbol
    pub fn gpx_symbol(&self) -> &'static str {
        match self {
            Self::Restaurant => "Restaurant",
            Self::Bar | Self::Nightlife => "Bar",
            Self::Cafe => "Restaurant",
            Self::Hotel => "Lodging",
            Self::Landmark | Self::Attraction => "Scenic Area",
            Self::Museum => "Museum",
            Self::Park => "Park",
            Self::Shopping => "Shopping Center",
        }
    }

    /// Pipe-separated list used in the extraction prompt
    pub fn vocabulary() -> String {
        Self::ALL
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join("|")
    }
}

impl std::fmt::Display for PlaceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PlaceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| format!("Unknown place type: {}", s))
    }
}

/// A place as returned by the extractor
///
/// `place_type` is kept as free text because the language model does not
/// always stick to the vocabulary; use [`ExtractedPlace::kind`] to classify.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedPlace {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub context: String,
    #[serde(rename = "type", default)]
    pub place_type: String,
}

impl ExtractedPlace {
    pub fn new(
        name: impl Into<String>,
        context: impl Into<String>,
        place_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            context: context.into(),
            place_type: place_type.into(),
        }
    }

    /// The place type if it belongs to the known vocabulary
    pub fn kind(&self) -> Option<PlaceType> {
        self.place_type.parse().ok()
    }
}

/// A place the geocoder could resolve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedPlace {
    pub name: String,
    pub context: String,
    #[serde(rename = "type")]
    pub place_type: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    /// Zero-based position in the trip's ordered place list
    #[serde(default)]
    pub position: usize,
}

impl GeocodedPlace {
    /// Combine an extracted place with a geocoding hit
    pub fn from_hit(place: ExtractedPlace, hit: crate::geo::GeocodeHit) -> Self {
        Self {
            name: place.name,
            context: place.context,
            place_type: place.place_type,
            latitude: hit.coords.lat,
            longitude: hit.coords.lng,
            address: hit.address,
            position: 0,
        }
    }

    pub fn kind(&self) -> Option<PlaceType> {
        self.place_type.parse().ok()
    }
}

impl Located for GeocodedPlace {
    fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// Output of one extraction call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    pub destination: String,
    pub places: Vec<ExtractedPlace>,
}

/// A fully processed set of trip notes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripPlan {
    /// Unique ID for this plan
    pub id: String,

    /// When the plan was produced (RFC 3339)
    pub created_at: String,

    /// The raw notes the plan was extracted from
    pub notes: String,

    /// Primary destination named by the extractor
    pub destination: String,

    /// Everything the extractor returned, before geocoding
    pub extracted: Vec<ExtractedPlace>,

    /// Resolved places in input order
    pub places: Vec<GeocodedPlace>,

    /// Extracted places that could not be located or were too far away
    pub unresolved: usize,
}

impl TripPlan {
    /// "N of M places could not be located", or None when all resolved
    pub fn unresolved_summary(&self) -> Option<String> {
        if self.unresolved == 0 {
            None
        } else {
            Some(format!(
                "{} of {} places could not be located",
                self.unresolved,
                self.extracted.len()
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_type_parse() {
        assert_eq!("Museum".parse::<PlaceType>(), Ok(PlaceType::Museum));
        assert_eq!(" nightlife ".parse::<PlaceType>(), Ok(PlaceType::Nightlife));
        assert!("spa".parse::<PlaceType>().is_err());
    }

    #[test]
    fn test_vocabulary() {
        let vocab = PlaceType::vocabulary();
        assert!(vocab.starts_with("restaurant|bar|cafe"));
        assert!(vocab.ends_with("|attraction"));
        assert_eq!(vocab.split('|').count(), 10);
    }

    #[test]
    fn test_extracted_place_lenient_fields() {
        let place: ExtractedPlace = serde_json::from_str(r#"{"name": "Tsukiji"}"#).unwrap();
        assert_eq!(place.name, "Tsukiji");
        assert!(place.context.is_empty());
        assert_eq!(place.kind(), None);

        let place: ExtractedPlace =
            serde_json::from_str(r#"{"name": "Louvre", "context": "art", "type": "museum"}"#)
                .unwrap();
        assert_eq!(place.kind(), Some(PlaceType::Museum));
    }

    #[test]
    fn test_geocoded_place_serializes_type_key() {
        let place = GeocodedPlace {
            name: "Tokyo Tower".to_string(),
            context: "views".to_string(),
            place_type: "landmark".to_string(),
            latitude: 35.6586,
            longitude: 139.7454,
            address: "4 Chome-2-8 Shibakoen, Minato City, Tokyo".to_string(),
            position: 0,
        };
        let json = serde_json::to_value(&place).unwrap();
        assert_eq!(json["type"], "landmark");
        assert_eq!(place.coordinates(), Coordinates::new(35.6586, 139.7454));
    }

    #[test]
    fn test_unresolved_summary() {
        let mut plan = TripPlan {
            id: "x".to_string(),
            created_at: "2025-01-01T00:00:00Z".to_string(),
            notes: String::new(),
            destination: "Paris, France".to_string(),
            extracted: vec![
                ExtractedPlace::new("A", "", ""),
                ExtractedPlace::new("B", "", ""),
                ExtractedPlace::new("C", "", ""),
            ],
            places: Vec::new(),
            unresolved: 0,
        };
        assert_eq!(plan.unresolved_summary(), None);

        plan.unresolved = 2;
        assert_eq!(
            plan.unresolved_summary().as_deref(),
            Some("2 of 3 places could not be located")
        );
    }
}
