//! # Pacing Tables
//!
//! Per-leg pace and time for a target finish time or a target pace.
//!
//! ## Target time
//!
//! A flat pace (`target minutes / total km`) is applied to every leg, then
//! all rows are rescaled by `target minutes / first-pass minutes` so the
//! table sums to the target. Rows are rounded for display (distance to 3
//! decimals, pace and time to 2), and any rounding drift left in the summed
//! times is folded into the longest leg.
//!
//! ## Target pace
//!
//! The given pace is applied uniformly with no normalization; the total is
//! whatever `distance x pace` yields.

use log::{debug, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{total_distance_km, Leg};

/// Which target a pacing table was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PacingMode {
    TargetTime,
    TargetPace,
}

/// One row of a pacing table.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PacingRow {
    /// 1-based leg number
    pub leg: usize,
    /// Leg distance, rounded to 3 decimals
    pub distance_km: f64,
    /// Pace in minutes per km, rounded to 2 decimals
    pub pace_min_per_km: f64,
    /// Leg time in hours, rounded to 2 decimals
    pub time_hours: f64,
}

/// A complete pacing table with its reported total.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PacingPlan {
    pub mode: PacingMode,
    pub rows: Vec<PacingRow>,
    /// Estimated finish time in hours
    pub total_hours: f64,
}

/// Round to a fixed number of decimal places.
#[inline]
pub(crate) fn round_to(value: f64, dp: i32) -> f64 {
    let factor = 10_f64.powi(dp);
    (value * factor).round() / factor
}

/// Build a pacing table that finishes in `target_hours`.
///
/// The summed row times match the target within 0.01 h for any legs with a
/// positive total distance. A zero-distance route produces zero paces and
/// times rather than dividing by zero.
///
/// # Example
/// ```
/// use ultra_pacer::{Leg, plan_pacing_by_time};
///
/// let legs = vec![Leg::new(1, 10.0), Leg::new(2, 15.0)];
/// let plan = plan_pacing_by_time(&legs, 5.0);
///
/// assert_eq!(plan.rows[0].pace_min_per_km, 12.0);
/// assert_eq!(plan.rows[0].time_hours, 2.0);
/// assert_eq!(plan.rows[1].time_hours, 3.0);
/// assert_eq!(plan.total_hours, 5.0);
/// ```
pub fn plan_pacing_by_time(legs: &[Leg], target_hours: f64) -> PacingPlan {
    let total_distance = total_distance_km(legs);
    let target_minutes = target_hours * 60.0;

    let flat_pace = if total_distance > 0.0 {
        target_minutes / total_distance
    } else {
        warn!("[PacingPlanner] Total distance is zero, using a zero flat pace");
        0.0
    };

    let mut first_pass_minutes = 0.0;
    let mut rows = Vec::with_capacity(legs.len());
    for (i, leg) in legs.iter().enumerate() {
        let minutes = leg.distance_km * flat_pace;
        first_pass_minutes += minutes;
        rows.push(PacingRow {
            leg: i + 1,
            distance_km: round_to(leg.distance_km, 3),
            pace_min_per_km: round_to(flat_pace, 2),
            time_hours: round_to(minutes / 60.0, 2),
        });
    }

    let scaling = if first_pass_minutes > 0.0 {
        target_minutes / first_pass_minutes
    } else {
        1.0
    };

    for row in rows.iter_mut() {
        row.pace_min_per_km = round_to(row.pace_min_per_km * scaling, 2);
        row.time_hours = round_to(row.time_hours * scaling, 2);
    }

    if first_pass_minutes > 0.0 {
        absorb_rounding_drift(&mut rows, legs, target_hours);
    }

    let total_hours = rows.iter().map(|r| r.time_hours).sum();

    debug!(
        "[PacingPlanner] {} legs, {:.3} km, flat pace {:.2} min/km, scaling {:.6}, total {:.2} h",
        legs.len(),
        total_distance,
        flat_pace,
        scaling,
        total_hours
    );

    PacingPlan { mode: PacingMode::TargetTime, rows, total_hours }
}

/// Fold the residual between the summed (rounded) row times and the target
/// into the longest leg, and re-derive that leg's pace from its new time so
/// the row still reads `time = distance x pace / 60`.
fn absorb_rounding_drift(rows: &mut [PacingRow], legs: &[Leg], target_hours: f64) {
    let summed: f64 = rows.iter().map(|r| r.time_hours).sum();
    let residual = target_hours - summed;
    if residual.abs() < 0.005 {
        return;
    }

    let longest = legs
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.distance_km.total_cmp(&b.distance_km))
        .map(|(i, _)| i);

    if let Some(i) = longest {
        debug!("[PacingPlanner] Absorbing {:+.2} h of rounding drift into leg {}", residual, i + 1);
        let row = &mut rows[i];
        row.time_hours = round_to(row.time_hours + residual, 2);
        if legs[i].distance_km > 0.0 {
            row.pace_min_per_km = round_to(row.time_hours * 60.0 / legs[i].distance_km, 2);
        }
    }
}

/// Build a pacing table that holds `target_pace` (min/km) on every leg.
///
/// Each row's time is `distance x pace / 60`. The reported total is the
/// unrounded sum, so it can differ from the summed rows by rounding.
///
/// # Example
/// ```
/// use ultra_pacer::{Leg, plan_pacing_by_pace};
///
/// let legs = vec![Leg::new(1, 42.2)];
/// let plan = plan_pacing_by_pace(&legs, 6.0);
///
/// assert_eq!(plan.rows[0].time_hours, 4.22);
/// assert!((plan.total_hours - 4.22).abs() < 1e-9);
/// ```
pub fn plan_pacing_by_pace(legs: &[Leg], target_pace: f64) -> PacingPlan {
    let mut total_minutes = 0.0;
    let mut rows = Vec::with_capacity(legs.len());

    for (i, leg) in legs.iter().enumerate() {
        let minutes = leg.distance_km * target_pace;
        total_minutes += minutes;
        rows.push(PacingRow {
            leg: i + 1,
            distance_km: round_to(leg.distance_km, 3),
            pace_min_per_km: round_to(target_pace, 2),
            time_hours: round_to(minutes / 60.0, 2),
        });
    }

    let total_hours = total_minutes / 60.0;
    debug!(
        "[PacingPlanner] {} legs at {:.2} min/km, total {:.2} h",
        legs.len(),
        target_pace,
        total_hours
    );

    PacingPlan { mode: PacingMode::TargetPace, rows, total_hours }
}

// ============================================================================
// Tests
// ============================================================================
