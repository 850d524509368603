//! Shareable Google Maps links
//!
//! A single place links to a plain search; several places link to a
//! multi-pin search or to directions visiting them in order.

use crate::constants::maps::{GOOGLE_MAPS_DIR_URL, GOOGLE_MAPS_SEARCH_URL};
use crate::error::{Error, Result};
use crate::format::OutputFormatter;
use crate::trip::{GeocodedPlace, TripPlan};
use serde::{Deserialize, Serialize};

/// Both link flavours for a list of places
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareLinks {
    pub search_url: Option<String>,
    pub directions_url: Option<String>,
}

/// Name if present, else "lat,lng"
fn place_query(place: &GeocodedPlace) -> String {
    if place.name.trim().is_empty() {
        format!("{},{}", place.latitude, place.longitude)
    } else {
        urlencoding::encode(&place.name).into_owned()
    }
}

fn single_search(place: &GeocodedPlace) -> String {
    format!("{}?api=1&query={}", GOOGLE_MAPS_SEARCH_URL, place_query(place))
}

/// Search link showing every place as a pin
pub fn search_url(places: &[GeocodedPlace]) -> Option<String> {
    match places {
        [] => None,
        [place] => Some(single_search(place)),
        _ => {
            let queries: Vec<String> = places.iter().map(place_query).collect();
            Some(format!("{}{}", GOOGLE_MAPS_SEARCH_URL, queries.join("/")))
        }
    }
}

/// Directions link visiting the places in order
pub fn directions_url(places: &[GeocodedPlace]) -> Option<String> {
    match places {
        [] => None,
        [place] => Some(single_search(place)),
        _ => {
            let stops: Vec<String> = places.iter().map(place_query).collect();
            Some(format!(
                "{}?api=1&query={}",
                GOOGLE_MAPS_DIR_URL,
                stops.join("+to:")
            ))
        }
    }
}

pub fn share_links(places: &[GeocodedPlace]) -> ShareLinks {
    ShareLinks {
        search_url: search_url(places),
        directions_url: directions_url(places),
    }
}

/// URL formatter - outputs the multi-place search link
pub struct UrlFormatter;

impl OutputFormatter for UrlFormatter {
    fn name(&self) -> &str {
        "url"
    }

    fn description(&self) -> &str {
        "Google Maps link with every place"
    }

    fn format(&self, plan: &TripPlan) -> Result<String> {
        search_url(&plan.places)
            .ok_or_else(|| Error::Format("No located places to link to".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::fixtures::tokyo_plan;

    #[test]
    fn test_no_places() {
        assert_eq!(search_url(&[]), None);
        assert_eq!(directions_url(&[]), None);
    }

    #[test]
    fn test_single_place() {
        let plan = tokyo_plan();
        let url = search_url(&plan.places[..1]).unwrap();
        assert_eq!(
            url,
            "https://www.google.com/maps/search/?api=1&query=Tokyo%20Tower"
        );
        assert_eq!(directions_url(&plan.places[..1]).unwrap(), url);
    }

    #[test]
    fn test_single_unnamed_place_uses_coordinates() {
        let mut plan = tokyo_plan();
        plan.places[0].name = " ".to_string();
        assert_eq!(
            search_url(&plan.places[..1]).unwrap(),
            "https://www.google.com/maps/search/?api=1&query=35.6586,139.7454"
        );
    }

    #[test]
    fn test_many_places() {
        let plan = tokyo_plan();
        assert_eq!(
            search_url(&plan.places).unwrap(),
            "https://www.google.com/maps/search/Tokyo%20Tower/Sukiyabashi%20Jiro"
        );
        assert_eq!(
            directions_url(&plan.places).unwrap(),
            "https://www.google.com/maps/dir/?api=1&query=Tokyo%20Tower+to:Sukiyabashi%20Jiro"
        );
    }

    #[test]
    fn test_url_formatter() {
        let mut plan = tokyo_plan();
        let output = UrlFormatter.format(&plan).unwrap();
        assert!(output.starts_with("https://www.google.com/maps/search/"));

        plan.places.clear();
        assert!(UrlFormatter.format(&plan).is_err());
    }

    #[test]
    fn test_url_formatter_info() {
        let formatter = UrlFormatter;
        assert_eq!(formatter.name(), "url");
        assert!(!formatter.description().is_empty());
    }
}
