//! Great-circle distance and the destination proximity filter

use crate::constants::geo::{DEFAULT_MAX_DISTANCE_KM, EARTH_RADIUS_KM};
use crate::coord::{Coordinates, Located};
use tracing::debug;

/// Calculate the distance between two points in kilometers (Haversine formula)
///
/// # Arguments
/// * `p1` - First point
/// * `p2` - Second point
///
/// # Returns
/// Distance in kilometers
pub fn haversine_km(p1: Coordinates, p2: Coordinates) -> f64 {
    let lat1 = p1.lat.to_radians();
    let lat2 = p2.lat.to_radians();
    let delta_lat = (p2.lat - p1.lat).to_radians();
    let delta_lng = (p2.lng - p1.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Slack absorbing floating-point error at the threshold (one micrometre)
const BOUNDARY_TOLERANCE_KM: f64 = 1e-9;

/// Check if a point lies within `max_km` of the anchor (boundary inclusive)
pub fn is_within_km(point: Coordinates, anchor: Coordinates, max_km: f64) -> bool {
    let km = haversine_km(anchor, point);
    debug!("{:.2}km from anchor {}", km, anchor);
    km <= max_km + BOUNDARY_TOLERANCE_KM
}

/// Keep only the items within `max_km` of `anchor`
///
/// Order-preserving: the result is a subsequence of the input.
pub fn filter_by_distance<T: Located>(items: Vec<T>, anchor: Coordinates, max_km: f64) -> Vec<T> {
    items
        .into_iter()
        .filter(|item| is_within_km(item.coordinates(), anchor, max_km))
        .collect()
}

/// [`filter_by_distance`] with the default 100 km threshold
pub fn filter_by_default_distance<T: Located>(items: Vec<T>, anchor: Coordinates) -> Vec<T> {
    filter_by_distance(items, anchor, DEFAULT_MAX_DISTANCE_KM)
}
