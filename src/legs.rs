//! # Leg Segmentation
//!
//! Splits a route into contiguous legs for pacing.
//!
//! Two strategies are available:
//! - [`segment_legs`] walks a single point sequence and closes a leg each time
//!   the accumulated distance reaches `total / num_legs`.
//! - [`legs_from_segments`] uses the discrete segments a track already has,
//!   one leg per segment.
//!
//! The accumulating splitter is approximate: a route can come out with one
//! more or one fewer leg than requested, because legs close on the first
//! point at or past the target distance.

use log::{debug, warn};

use crate::geo_utils::haversine_distance;
use crate::{GeoPoint, Leg};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Split an ordered point sequence into roughly equal-distance legs.
///
/// Returns an empty list for fewer than two points or a route with zero
/// total distance; callers fall back to [`whole_route_leg`] in that case.
/// A `num_legs` of zero is treated as one.
///
/// # Example
/// ```
/// use ultra_pacer::{GeoPoint, segment_legs, polyline_length};
///
/// let route: Vec<GeoPoint> = (0..=10)
///     .map(|i| GeoPoint::new(45.0 + i as f64 * 0.01, 6.0))
///     .collect();
///
/// let legs = segment_legs(&route, 1);
/// assert_eq!(legs.len(), 1);
/// assert_eq!(legs[0].distance_km, polyline_length(&route));
/// ```
pub fn segment_legs(points: &[GeoPoint], num_legs: usize) -> Vec<Leg> {
    if points.len() < 2 {
        return Vec::new();
    }

    let num_legs = if num_legs == 0 {
        warn!("[LegSegmenter] Requested 0 legs, splitting into 1");
        1
    } else {
        num_legs
    };

    // Same summation order as the walk below, so num_legs = 1 closes exactly on the last point
    let total: f64 = points
        .windows(2)
        .map(|w| haversine_distance(&w[0], &w[1]))
        .sum();

    if total <= 0.0 {
        warn!("[LegSegmenter] Route of {} points has zero length", points.len());
        return Vec::new();
    }

    let target = total / num_legs as f64;
    let mut legs = Vec::with_capacity(num_legs + 1);
    let mut current = 0.0;
    let mut leg_points = vec![points[0]];

    for w in points.windows(2) {
        current += haversine_distance(&w[0], &w[1]);
        leg_points.push(w[1]);

        if current >= target {
            let closed = std::mem::replace(&mut leg_points, vec![w[1]]);
            legs.push(Leg::with_points(legs.len() + 1, current, closed));
            current = 0.0;
        }
    }

    if current > 0.0 {
        legs.push(Leg::with_points(legs.len() + 1, current, leg_points));
    }

    debug!(
        "[LegSegmenter] Split {:.3} km into {} legs (requested {}, target {:.3} km)",
        total,
        legs.len(),
        num_legs,
        target
    );

    legs
}

/// Build one leg per discrete track segment.
///
/// Each segment's own length becomes the leg distance, bypassing the
/// accumulating splitter entirely. Segments with fewer than two points
/// produce zero-length legs so leg numbering follows segment order.
///
/// # Example
/// ```
/// use ultra_pacer::{GeoPoint, legs_from_segments};
///
/// let first = vec![GeoPoint::new(45.0, 6.0), GeoPoint::new(45.1, 6.0)];
/// let second = vec![GeoPoint::new(45.1, 6.0), GeoPoint::new(45.1, 6.1)];
///
/// let legs = legs_from_segments(&[first, second]);
/// assert_eq!(legs.len(), 2);
/// assert_eq!(legs[1].index, 2);
/// ```
pub fn legs_from_segments(segments: &[Vec<GeoPoint>]) -> Vec<Leg> {
    #[cfg(feature = "parallel")]
    let legs: Vec<Leg> = segments
        .par_iter()
        .enumerate()
        .map(|(i, segment)| segment_leg(i, segment))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let legs: Vec<Leg> = segments
        .iter()
        .enumerate()
        .map(|(i, segment)| segment_leg(i, segment))
        .collect();

    debug!("[LegSegmenter] Using {} discrete track segments as legs", legs.len());
    legs
}

fn segment_leg(i: usize, segment: &[GeoPoint]) -> Leg {
    let distance = crate::geo_utils::polyline_length(segment);
    Leg::with_points(i + 1, distance, segment.to_vec())
}

/// A single leg covering the whole route.
///
/// Used for race presets and as the fallback when segmentation yields nothing.
pub fn whole_route_leg(distance_km: f64) -> Vec<Leg> {
    vec![Leg::new(1, distance_km)]
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo_utils::polyline_length;

    /// Straight north-south line with evenly spaced points (~1.112 km apart).
    fn straight_route(n: usize) -> Vec<GeoPoint> {
        (0..n)
            .map(|i| GeoPoint::new(45.0 + i as f64 * 0.01, 6.0))
            .collect()
    }

    #[test]
    fn test_single_leg_covers_full_route() {
        let route = straight_route(25);
        let legs = segment_legs(&route, 1);
        assert_eq!(legs.len(), 1);
        assert_eq!(legs[0].index, 1);
        assert_eq!(legs[0].distance_km, polyline_length(&route));
        assert_eq!(legs[0].points.as_ref().map(Vec::len), Some(25));
    }

    #[test]
    fn test_even_route_splits_into_requested_legs() {
        // 20 equal hops, 4 legs of 5 hops each
        let route = straight_route(21);
        let legs = segment_legs(&route, 4);

        assert!(legs.len() >= 4 && legs.len() <= 5);
        let summed: f64 = legs.iter().map(|l| l.distance_km).sum();
        assert!((summed - polyline_length(&route)).abs() < 1e-9);

        for (i, leg) in legs.iter().enumerate() {
            assert_eq!(leg.index, i + 1);
        }
    }

    #[test]
    fn test_legs_share_boundary_points() {
        let route = straight_route(11);
        let legs = segment_legs(&route, 2);
        let first = legs[0].points.as_ref().unwrap();
        let second = legs[1].points.as_ref().unwrap();
        assert_eq!(first.last(), second.first());
    }

    #[test]
    fn test_uneven_hops_still_sum_to_total() {
        let route = vec![
            GeoPoint::new(45.0, 6.0),
            GeoPoint::new(45.001, 6.0),
            GeoPoint::new(45.05, 6.0),
            GeoPoint::new(45.051, 6.0),
            GeoPoint::new(45.2, 6.0),
        ];
        let legs = segment_legs(&route, 3);
        let summed: f64 = legs.iter().map(|l| l.distance_km).sum();
        assert!((summed - polyline_length(&route)).abs() < 1e-9);
        assert!(legs.iter().all(|l| l.distance_km > 0.0));
    }

    #[test]
    fn test_single_point_yields_no_legs() {
        let route = straight_route(1);
        assert!(segment_legs(&route, 3).is_empty());
        assert!(segment_legs(&[], 3).is_empty());
    }

    #[test]
    fn test_zero_length_route_yields_no_legs() {
        let p = GeoPoint::new(45.0, 6.0);
        assert!(segment_legs(&[p, p, p], 2).is_empty());
    }

    #[test]
    fn test_zero_legs_treated_as_one() {
        let route = straight_route(5);
        let legs = segment_legs(&route, 0);
        assert_eq!(legs.len(), 1);
    }

    #[test]
    fn test_legs_from_segments() {
        let a = straight_route(3);
        let b = vec![GeoPoint::new(46.0, 7.0), GeoPoint::new(46.0, 7.05)];
        let legs = legs_from_segments(&[a.clone(), b.clone()]);

        assert_eq!(legs.len(), 2);
        assert_eq!(legs[0].distance_km, polyline_length(&a));
        assert_eq!(legs[1].distance_km, polyline_length(&b));
        assert_eq!(legs[1].index, 2);
    }

    #[test]
    fn test_legs_from_degenerate_segment() {
        let legs = legs_from_segments(&[vec![GeoPoint::new(46.0, 7.0)]]);
        assert_eq!(legs.len(), 1);
        assert_eq!(legs[0].distance_km, 0.0);
    }

    #[test]
    fn test_whole_route_leg() {
        let legs = whole_route_leg(42.2);
        assert_eq!(legs, vec![Leg::new(1, 42.2)]);
    }
}
