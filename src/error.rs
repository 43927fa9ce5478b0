//! Errors for the collaborator-facing surface.
//!
//! The planning operations themselves never fail. These errors come from
//! loading tracks and from the range checks a front end applies before it
//! calls into the planner.

use std::ops::RangeInclusive;

use thiserror::Error;

/// Result alias for track loading and input validation.
pub type Result<T> = std::result::Result<T, PlanError>;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("invalid coordinate at point {index}: ({latitude}, {longitude})")]
    InvalidPoint {
        index: usize,
        latitude: f64,
        longitude: f64,
    },

    #[error("{name} must be between {min} and {max}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{name} must be a positive number, got {value}")]
    NotPositive { name: &'static str, value: f64 },

    #[error("track contains no points")]
    EmptyTrack,

    #[error("unknown race preset '{0}'")]
    UnknownRace(String),

    #[error("unknown plan unit '{0}' (expected km or hours)")]
    UnknownUnit(String),

    #[cfg(feature = "serde")]
    #[error("malformed track document: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "gpx")]
    #[error("malformed GPX document: {0}")]
    Gpx(#[from] gpx::errors::GpxError),
}

/// Inclusive bounds used by a front end for leg count, week count and days per week.
pub const LEG_COUNT_RANGE: RangeInclusive<u32> = 1..=20;
pub const WEEK_COUNT_RANGE: RangeInclusive<u32> = 4..=52;
pub const DAYS_PER_WEEK_RANGE: RangeInclusive<u32> = 3..=7;

fn check_range(name: &'static str, value: u32, range: &RangeInclusive<u32>) -> Result<u32> {
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(PlanError::OutOfRange {
            name,
            value: value as f64,
            min: *range.start() as f64,
            max: *range.end() as f64,
        })
    }
}

/// Check a requested leg count.
pub fn validate_leg_count(num_legs: u32) -> Result<u32> {
    check_range("leg count", num_legs, &LEG_COUNT_RANGE)
}

/// Check a requested training plan length in weeks.
pub fn validate_weeks(weeks: u32) -> Result<u32> {
    check_range("weeks", weeks, &WEEK_COUNT_RANGE)
}

/// Check a requested number of training days per week.
pub fn validate_days_per_week(days: u32) -> Result<u32> {
    check_range("days per week", days, &DAYS_PER_WEEK_RANGE)
}

/// Check that a target (hours or min/km) is a finite positive number.
pub fn validate_positive(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PlanError::NotPositive { name, value })
    }
}
