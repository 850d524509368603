//! Extraction → geocoding pipeline
//!
//! [`geocode_all`] resolves a batch of extracted places against a
//! [`Geocoder`]; [`plan_trip`] runs the whole flow from raw notes to a
//! [`TripPlan`]. Neither keeps state between calls.

use crate::config::defaults::DEFAULT_GEOCODING_CONCURRENCY;
use crate::config::GeocodingConfig;
use crate::constants::geo::DEFAULT_MAX_DISTANCE_KM;
use crate::coord::distance::filter_by_distance;
use crate::error::Result;
use crate::extract::{Extractor, UNKNOWN_DESTINATION};
use crate::geo::{search_query, Geocoder};
use crate::trip::{ExtractedPlace, GeocodedPlace, TripPlan};
use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

/// Tuning for a batch geocoding run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeocodeOptions {
    /// Drop places farther than this from the destination
    pub max_distance_km: f64,
    /// Lookups in flight at once
    pub concurrency: usize,
}

impl Default for GeocodeOptions {
    fn default() -> Self {
        Self {
            max_distance_km: DEFAULT_MAX_DISTANCE_KM,
            concurrency: DEFAULT_GEOCODING_CONCURRENCY,
        }
    }
}

impl GeocodeOptions {
    pub fn from_config(config: &GeocodingConfig) -> Self {
        Self {
            max_distance_km: config.max_distance_km,
            concurrency: config.concurrency.max(1),
        }
    }

    pub fn with_max_distance(mut self, max_km: f64) -> Self {
        self.max_distance_km = max_km;
        self
    }
}

/// Resolve every place, keeping input order
///
/// The destination (when given) is looked up first and used as a proximity
/// bias; if that lookup fails the places are resolved without one. Places
/// that fail to resolve are dropped. With a bias point, results farther
/// than `options.max_distance_km` from it are dropped too.
pub async fn geocode_all<G: Geocoder>(
    geocoder: &G,
    places: Vec<ExtractedPlace>,
    destination: Option<&str>,
    options: GeocodeOptions,
) -> Vec<GeocodedPlace> {
    let destination = destination.map(str::trim).filter(|d| !d.is_empty());

    let bias = match destination {
        Some(dest) => match geocoder.resolve(dest, None).await {
            Ok(hit) => {
                debug!("Destination '{}' biased to {}", dest, hit.coords);
                Some(hit.coords)
            }
            Err(e) => {
                warn!("Could not locate destination '{}': {}", dest, e);
                None
            }
        },
        None => None,
    };

    let total = places.len();
    let places: Vec<ExtractedPlace> = places
        .into_iter()
        .filter(|place| !place.name.trim().is_empty())
        .collect();

    let lookups: Vec<Option<GeocodedPlace>> = stream::iter(places)
        .map(|place| async move {
            let query = search_query(&place.name, destination);
            match geocoder.resolve(&query, bias).await {
                Ok(hit) => Some(GeocodedPlace::from_hit(place, hit)),
                Err(e) => {
                    warn!("Dropping '{}': {}", place.name, e);
                    None
                }
            }
        })
        .buffered(options.concurrency.max(1))
        .collect()
        .await;
    let resolved: Vec<GeocodedPlace> = lookups.into_iter().flatten().collect();

    let kept = match bias {
        Some(anchor) => filter_by_distance(resolved, anchor, options.max_distance_km),
        None => resolved,
    };

    info!(
        "Geocoded {} of {} places with {}",
        kept.len(),
        total,
        geocoder.name()
    );
    kept
}

/// Run extraction and geocoding over raw notes
///
/// Extraction failures are returned as errors; geocoding failures only
/// shrink the place list and are counted in [`TripPlan::unresolved`].
pub async fn plan_trip<E: Extractor, G: Geocoder>(
    extractor: &E,
    geocoder: &G,
    text: &str,
    options: GeocodeOptions,
) -> Result<TripPlan> {
    let extraction = extractor.extract(text).await?;

    let destination = Some(extraction.destination.as_str())
        .filter(|d| !d.eq_ignore_ascii_case(UNKNOWN_DESTINATION));

    let mut places = geocode_all(
        geocoder,
        extraction.places.clone(),
        destination,
        options,
    )
    .await;

    for (position, place) in places.iter_mut().enumerate() {
        place.position = position;
    }

    let unresolved = extraction.places.len().saturating_sub(places.len());

    Ok(TripPlan {
        id: uuid::Uuid::new_v4().to_string(),
        created_at: chrono::Utc::now().to_rfc3339(),
        notes: text.to_string(),
        destination: extraction.destination,
        extracted: extraction.places,
        places,
        unresolved,
    })
}
