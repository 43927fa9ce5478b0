//! # Ultra Pacer
//!
//! Pacing tables and periodized training plans for road and ultra races.
//!
//! This library provides:
//! - Great-circle route distances from GPS tracks
//! - Leg segmentation of a route into roughly equal-distance legs
//! - Per-leg pacing tables for a target finish time or a target pace
//! - Multi-week periodized training plans (Base, Build, Peak, Taper)
//!
//! Every planning operation is a pure function over its inputs. Nothing is
//! cached or shared between calls.
//!
//! ## Features
//!
//! - **`serde`** - Serialize plan outputs and load JSON tracks
//! - **`gpx`** - Load GPX tracks
//! - **`parallel`** - Enable parallel processing with rayon
//! - **`cli`** - Build the `ultra-pacer` command-line front end
//! - **`full`** - Enable all features
//!
//! ## Quick Start
//!
//! ```rust
//! use ultra_pacer::{GeoPoint, PlanUnit, segment_legs, plan_pacing_by_time, generate_training_plan};
//!
//! let route: Vec<GeoPoint> = (0..=40)
//!     .map(|i| GeoPoint::new(45.0 + i as f64 * 0.01, 6.0))
//!     .collect();
//!
//! let legs = segment_legs(&route, 4);
//! let pacing = plan_pacing_by_time(&legs, 5.0);
//! assert!((pacing.total_hours - 5.0).abs() <= 0.01);
//!
//! let plan = generate_training_plan(100.0, 16, 5, true, PlanUnit::Distance);
//! assert_eq!(plan.len(), 16);
//! assert_eq!(plan[0].total_volume, 56.0);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{PlanError, Result};

pub mod geo_utils;
pub use geo_utils::{haversine_distance, polyline_length};

// Leg segmentation (accumulating splitter and discrete track segments)
pub mod legs;
pub use legs::{legs_from_segments, segment_legs, whole_route_leg};

pub mod pacing;
pub use pacing::{plan_pacing_by_pace, plan_pacing_by_time, PacingMode, PacingPlan, PacingRow};

pub mod races;
pub use races::RacePreset;

pub mod track;
pub use track::Track;

// Periodized training plan generation
pub mod training;
pub use training::{
    generate_training_plan, generate_training_plan_with_config, Activity, DayEntry, Phase,
    PlanUnit, TrainingPlanConfig, WeekPlan, Weekday,
};

// ============================================================================
// Core Types
// ============================================================================

/// A geographic coordinate with latitude and longitude in degrees.
///
/// # Example
/// ```
/// use ultra_pacer::GeoPoint;
/// let point = GeoPoint::new(45.9237, 6.8694); // Chamonix
/// assert!(point.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a new point.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Check if the point has valid coordinates.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }
}

impl From<geo::Point<f64>> for GeoPoint {
    fn from(point: geo::Point<f64>) -> Self {
        Self::new(point.y(), point.x())
    }
}

impl From<GeoPoint> for geo::Point<f64> {
    fn from(point: GeoPoint) -> Self {
        geo::Point::new(point.longitude, point.latitude)
    }
}

/// A contiguous, distance-bounded part of a route.
///
/// Legs are the unit of pacing calculation. The raw points the leg was built
/// from are kept when the segmenter had them; the pacing planner only needs
/// the distance.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Leg {
    /// 1-based position of the leg along the route
    pub index: usize,
    /// Leg length in kilometers
    pub distance_km: f64,
    /// Points covered by this leg, if known
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub points: Option<Vec<GeoPoint>>,
}

impl Leg {
    /// Create a leg with no associated points.
    pub fn new(index: usize, distance_km: f64) -> Self {
        Self { index, distance_km, points: None }
    }

    /// Create a leg that remembers the points it covers.
    pub fn with_points(index: usize, distance_km: f64, points: Vec<GeoPoint>) -> Self {
        Self { index, distance_km, points: Some(points) }
    }
}

/// Total distance of a list of legs in kilometers.
pub fn total_distance_km(legs: &[Leg]) -> f64 {
    legs.iter().map(|leg| leg.distance_km).sum()
}

// ============================================================================
// Tests
// ============================================================================
