//! # Geographic Utilities
//!
//! Great-circle distance computation for route tracks.
//!
//! | Function | Description |
//! |----------|-------------|
//! | [`haversine_distance`] | Great-circle distance between two points, in kilometers |
//! | [`polyline_length`] | Total length of a track, in kilometers |
//!
//! ## Example
//!
//! ```rust
//! use ultra_pacer::{GeoPoint, geo_utils};
//!
//! let track = vec![
//!     GeoPoint::new(51.5074, -0.1278),  // London
//!     GeoPoint::new(51.5080, -0.1290),
//!     GeoPoint::new(51.5090, -0.1300),
//! ];
//!
//! let length = geo_utils::polyline_length(&track);
//! println!("Track length: {:.3} km", length);
//!
//! let dist = geo_utils::haversine_distance(&track[0], &track[2]);
//! println!("Start to end: {:.3} km", dist);
//! ```
//!
//! ## Algorithm Notes
//!
//! The haversine formula treats the Earth as a sphere of radius 6371 km.
//! Coordinates are WGS84 latitude/longitude in degrees.
//!
//! Reference: [Haversine formula (Wikipedia)](https://en.wikipedia.org/wiki/Haversine_formula)

use crate::GeoPoint;

/// Mean Earth radius used by the pacing engine, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

// =============================================================================
// Distance Functions
// =============================================================================

/// Calculate the great-circle distance between two points using the Haversine formula.
///
/// Returns the distance in kilometers. Defined for every pair of real
/// coordinates; identical points yield `0.0`.
///
/// # Example
///
/// ```rust
/// use ultra_pacer::{GeoPoint, geo_utils};
///
/// let london = GeoPoint::new(51.5074, -0.1278);
/// let paris = GeoPoint::new(48.8566, 2.3522);
///
/// let distance = geo_utils::haversine_distance(&london, &paris);
/// assert!((distance - 343.5).abs() < 1.0); // ~344 km
/// ```
#[inline]
pub fn haversine_distance(p1: &GeoPoint, p2: &GeoPoint) -> f64 {
    let lat1 = p1.latitude.to_radians();
    let lat2 = p2.latitude.to_radians();
    let dlat = (p2.latitude - p1.latitude).to_radians();
    let dlon = (p2.longitude - p1.longitude).to_radians();

    // Rounding can push `a` just past 1 for antipodal points
    let a = ((dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2))
        .clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Calculate the total length of a polyline (track) in kilometers.
///
/// Sums the haversine distance between consecutive points. Empty or single-point
/// tracks return 0.0.
///
/// # Example
///
/// ```rust
/// use ultra_pacer::{GeoPoint, geo_utils};
///
/// let track = vec![
///     GeoPoint::new(51.5074, -0.1278),
///     GeoPoint::new(51.5080, -0.1290),
///     GeoPoint::new(51.5090, -0.1300),
/// ];
///
/// let length = geo_utils::polyline_length(&track);
/// assert!(length > 0.0 && length < 1.0);
/// ```
pub fn polyline_length(points: &[GeoPoint]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }

    points
        .windows(2)
        .map(|w| haversine_distance(&w[0], &w[1]))
        .sum()
}

// =============================================================================
// Unit Tests
// =============================================================================
