//! # Periodized Training Plans
//!
//! Generates a multi-week plan from a race distance. The plan is split into
//! four contiguous phases (Base, Build, Peak, Taper); each week's volume is
//! the peak weekly volume scaled by a phase factor, and is then spread over a
//! fixed Monday-to-Sunday layout with a back-to-back long run at the weekend.
//!
//! ## Algorithm
//! 1. Phase blocks: Base = W/4, Build = 2·(W/4), Peak = W/4, Taper = the rest
//! 2. Peak weekly volume: a lookup table in hours, or 85% of race distance in km
//! 3. Week factor per phase (Base and Build ramp with `week mod 4`, Taper steps down)
//! 4. Saturday 40%, Sunday 25%, rounded up; the remainder feeds midweek runs
//! 5. Volumes round up to the next quarter hour or whole kilometer

use std::fmt;
use std::str::FromStr;

use log::{debug, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::PlanError;

// ============================================================================
// Types
// ============================================================================

/// Unit a training plan is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PlanUnit {
    /// Kilometers
    #[default]
    Distance,
    /// Hours
    Time,
}

impl fmt::Display for PlanUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanUnit::Distance => write!(f, "km"),
            PlanUnit::Time => write!(f, "hours"),
        }
    }
}

impl FromStr for PlanUnit {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "km" | "distance" => Ok(PlanUnit::Distance),
            "h" | "hours" | "time" => Ok(PlanUnit::Time),
            other => Err(PlanError::UnknownUnit(other.to_string())),
        }
    }
}

/// Training periodization block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Phase {
    Base,
    Build,
    Peak,
    Taper,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Base => "Base",
            Phase::Build => "Build",
            Phase::Peak => "Peak",
            Phase::Taper => "Taper",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Day of the training week, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
            Weekday::Sun => "Sun",
        }
    }
}

/// What a day of the week is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Activity {
    LongRun,
    BackToBackLongRun,
    Workout,
    ModerateRun,
    EasyRun,
    Strength,
    Rest,
}

impl Activity {
    pub fn label(&self) -> &'static str {
        match self {
            Activity::LongRun | Activity::BackToBackLongRun => "Long run",
            Activity::Workout => "Workout (hills/tempo)",
            Activity::ModerateRun => "Moderate run",
            Activity::EasyRun => "Easy run",
            Activity::Strength => "Strength / cross-training",
            Activity::Rest => "Rest or short walk",
        }
    }
}

/// One day of a training week.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DayEntry {
    pub day: Weekday,
    pub activity: Activity,
    /// Planned volume for running days, in the plan's unit
    pub volume: Option<f64>,
    pub unit: PlanUnit,
}

impl DayEntry {
    fn run(day: Weekday, activity: Activity, volume: f64, unit: PlanUnit) -> Self {
        Self { day, activity, volume: Some(volume), unit }
    }

    fn without_volume(day: Weekday, activity: Activity, unit: PlanUnit) -> Self {
        Self { day, activity, volume: None, unit }
    }

    /// Day text without the day label, e.g. `Long run ~23 km (back-to-back)`.
    pub fn description(&self) -> String {
        let mut text = self.activity.label().to_string();
        if let Some(volume) = self.volume {
            text.push_str(" ~");
            text.push_str(&format_volume(volume, self.unit));
        }
        if self.activity == Activity::BackToBackLongRun {
            text.push_str(" (back-to-back)");
        }
        text
    }
}

impl fmt::Display for DayEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.day.label(), self.description())
    }
}

/// One week of a training plan.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WeekPlan {
    /// 1-based week number
    pub week: u32,
    pub phase: Phase,
    pub unit: PlanUnit,
    /// Rounded weekly volume
    pub total_volume: f64,
    /// Rounded Saturday long run
    pub long_run_saturday: f64,
    /// Rounded Sunday long run
    pub long_run_sunday: f64,
    /// Volume left for midweek runs after the long runs (never negative)
    pub remaining_volume: f64,
    /// Monday to Sunday
    pub days: [DayEntry; 7],
}

impl WeekPlan {
    /// Weekly total, e.g. `56 km` or `6h 30m`.
    pub fn total_label(&self) -> String {
        format_volume(self.total_volume, self.unit)
    }

    /// Sum of every day's planned volume.
    pub fn allocated_volume(&self) -> f64 {
        self.days.iter().filter_map(|d| d.volume).sum()
    }

    /// Whether the rounded daily volumes add up to more than the weekly total.
    ///
    /// Only happens for very small weeks: either the long runs alone round
    /// past the total, or a remainder of a couple of units is split across
    /// midweek days that each round up.
    pub fn is_over_allocated(&self) -> bool {
        self.allocated_volume() > self.total_volume
    }

    /// Weekend pair, e.g. `23 + 14 km` or `2h 45m + 1h 45m`.
    pub fn long_runs_label(&self) -> String {
        match self.unit {
            PlanUnit::Time => format!(
                "{} + {}",
                format_hours(self.long_run_saturday),
                format_hours(self.long_run_sunday)
            ),
            PlanUnit::Distance => {
                format!("{} + {} km", self.long_run_saturday, self.long_run_sunday)
            }
        }
    }
}

/// Heuristic constants of the plan generator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrainingPlanConfig {
    /// Peak weekly distance as a fraction of race distance.
    /// Default: 0.85
    pub peak_distance_factor: f64,

    /// Peak weekly hours by race distance: (max race km, hours), ascending.
    /// Default: ≤50 → 7, ≤100 → 10, ≤160 → 13
    pub peak_hours_table: Vec<(f64, f64)>,

    /// Peak weekly hours for races longer than the last table entry.
    /// Default: 15
    pub peak_hours_max: f64,

    /// Base phase factor before the weekly ramp. Default: 0.6
    pub base_factor: f64,

    /// Build phase factor before the weekly ramp. Default: 0.75
    pub build_factor: f64,

    /// Ramp added per `week mod 4` in Base and Build. Default: 0.05
    pub ramp_step: f64,

    /// Flat Peak phase factor. Default: 0.95
    pub peak_factor: f64,

    /// Taper factors by week within the taper. Default: [0.7, 0.5, 0.3]
    pub taper_factors: Vec<f64>,

    /// Taper factor once `taper_factors` runs out. Default: 0.3
    pub taper_floor: f64,

    /// Saturday long run share of the weekly volume. Default: 0.4
    pub saturday_share: f64,

    /// Sunday long run share of the weekly volume. Default: 0.25
    pub sunday_share: f64,

    /// Tuesday and Thursday share of the remaining volume. Default: 0.25
    pub midweek_share: f64,

    /// Wednesday share of the remaining volume (6+ days a week). Default: 0.2
    pub easy_share: f64,
}

impl Default for TrainingPlanConfig {
    fn default() -> Self {
        Self {
            peak_distance_factor: 0.85,
            peak_hours_table: vec![(50.0, 7.0), (100.0, 10.0), (160.0, 13.0)],
            peak_hours_max: 15.0,
            base_factor: 0.6,
            build_factor: 0.75,
            ramp_step: 0.05,
            peak_factor: 0.95,
            taper_factors: vec![0.7, 0.5, 0.3],
            taper_floor: 0.3,
            saturday_share: 0.4,
            sunday_share: 0.25,
            midweek_share: 0.25,
            easy_share: 0.2,
        }
    }
}

// ============================================================================
// Plan Generation
// ============================================================================

/// Generate a periodized plan with the default heuristics.
///
/// `weeks = 0` yields an empty plan. Inputs are not validated; see
/// [`crate::error`] for the range checks a front end applies.
///
/// # Example
/// ```
/// use ultra_pacer::{generate_training_plan, Phase, PlanUnit};
///
/// let plan = generate_training_plan(100.0, 16, 5, true, PlanUnit::Distance);
///
/// assert_eq!(plan.len(), 16);
/// assert_eq!(plan[0].phase, Phase::Base);
/// assert_eq!(plan[0].total_volume, 56.0);
/// assert_eq!(plan[0].days[5].to_string(), "Sat: Long run ~23 km");
/// ```
pub fn generate_training_plan(
    total_distance: f64,
    weeks: u32,
    days_per_week: u32,
    include_strength: bool,
    unit: PlanUnit,
) -> Vec<WeekPlan> {
    generate_training_plan_with_config(
        total_distance,
        weeks,
        days_per_week,
        include_strength,
        unit,
        &TrainingPlanConfig::default(),
    )
}

/// Generate a periodized plan with custom heuristics.
pub fn generate_training_plan_with_config(
    total_distance: f64,
    weeks: u32,
    days_per_week: u32,
    include_strength: bool,
    unit: PlanUnit,
    config: &TrainingPlanConfig,
) -> Vec<WeekPlan> {
    let phases = phase_schedule(weeks);
    let peak = peak_weekly_volume(total_distance, unit, config);

    debug!(
        "[TrainingPlan] {:.1} km race, {} weeks, {} days/week, peak {} {}",
        total_distance, weeks, days_per_week, peak, unit
    );

    let mut taper_index = 0;
    let mut plan = Vec::with_capacity(phases.len());

    for (i, phase) in phases.into_iter().enumerate() {
        let week = i as u32 + 1;
        let factor = week_factor(phase, week, taper_index, config);
        if phase == Phase::Taper {
            taper_index += 1;
        }

        plan.push(build_week(
            week,
            phase,
            peak * factor,
            days_per_week,
            include_strength,
            unit,
            config,
        ));
    }

    plan
}

/// Phase label for every week, in Base → Build → Peak → Taper order.
///
/// # Example
/// ```
/// use ultra_pacer::{Phase, training::phase_schedule};
///
/// let phases = phase_schedule(6);
/// assert_eq!(
///     phases,
///     vec![Phase::Base, Phase::Build, Phase::Build, Phase::Peak, Phase::Taper, Phase::Taper]
/// );
/// ```
pub fn phase_schedule(weeks: u32) -> Vec<Phase> {
    let weeks = weeks as usize;
    let quarter = weeks / 4;

    let mut phases = Vec::with_capacity(weeks);
    phases.extend(std::iter::repeat(Phase::Base).take(quarter));
    phases.extend(std::iter::repeat(Phase::Build).take(quarter * 2));
    phases.extend(std::iter::repeat(Phase::Peak).take(quarter));
    phases.extend(std::iter::repeat(Phase::Taper).take(weeks - quarter * 4));
    phases
}

/// Largest single-week load of the plan, in the plan's unit.
pub fn peak_weekly_volume(total_distance: f64, unit: PlanUnit, config: &TrainingPlanConfig) -> f64 {
    match unit {
        PlanUnit::Time => config
            .peak_hours_table
            .iter()
            .find(|(max_km, _)| total_distance <= *max_km)
            .map(|(_, hours)| *hours)
            .unwrap_or(config.peak_hours_max),
        PlanUnit::Distance => total_distance * config.peak_distance_factor,
    }
}

/// Scaling factor applied to the peak weekly volume.
///
/// `week` is the 1-based week number of the whole plan; `taper_index` is the
/// 0-based position within the taper block.
pub fn week_factor(phase: Phase, week: u32, taper_index: usize, config: &TrainingPlanConfig) -> f64 {
    let ramp = config.ramp_step * (week % 4) as f64;
    match phase {
        Phase::Base => config.base_factor + ramp,
        Phase::Build => config.build_factor + ramp,
        Phase::Peak => config.peak_factor,
        Phase::Taper => config
            .taper_factors
            .get(taper_index)
            .copied()
            .unwrap_or(config.taper_floor),
    }
}

fn build_week(
    week: u32,
    phase: Phase,
    raw_volume: f64,
    days_per_week: u32,
    include_strength: bool,
    unit: PlanUnit,
    config: &TrainingPlanConfig,
) -> WeekPlan {
    let total_volume = round_volume(raw_volume, unit);
    let long_run_saturday = round_volume(raw_volume * config.saturday_share, unit);
    let long_run_sunday = round_volume(raw_volume * config.sunday_share, unit);

    let mut remaining_volume = total_volume - (long_run_saturday + long_run_sunday);
    if remaining_volume < 0.0 {
        warn!(
            "[TrainingPlan] Week {}: long runs ({} + {}) exceed rounded total {}, no midweek volume",
            week, long_run_saturday, long_run_sunday, total_volume
        );
        remaining_volume = 0.0;
    }

    let quality = if matches!(phase, Phase::Build | Phase::Peak) && week % 2 == 0 {
        Activity::Workout
    } else {
        Activity::ModerateRun
    };
    let midweek = round_volume(remaining_volume * config.midweek_share, unit);
    let easy = round_volume(remaining_volume * config.easy_share, unit);

    let days = Weekday::ALL.map(|day| match day {
        Weekday::Sat => DayEntry::run(day, Activity::LongRun, long_run_saturday, unit),
        Weekday::Sun => DayEntry::run(day, Activity::BackToBackLongRun, long_run_sunday, unit),
        Weekday::Tue | Weekday::Thu => DayEntry::run(day, quality, midweek, unit),
        Weekday::Wed if days_per_week > 5 => DayEntry::run(day, Activity::EasyRun, easy, unit),
        Weekday::Mon | Weekday::Fri if include_strength => {
            DayEntry::without_volume(day, Activity::Strength, unit)
        }
        _ => DayEntry::without_volume(day, Activity::Rest, unit),
    });

    let plan = WeekPlan {
        week,
        phase,
        unit,
        total_volume,
        long_run_saturday,
        long_run_sunday,
        remaining_volume,
        days,
    };

    // Midweek runs round up independently, so a small remainder can overshoot
    if plan.is_over_allocated() {
        warn!(
            "[TrainingPlan] Week {}: daily volumes sum to {} {}, above the rounded total {}",
            week,
            plan.allocated_volume(),
            unit,
            total_volume
        );
    }
    plan
}

// ============================================================================
// Rounding & Formatting
// ============================================================================

/// Tolerance (in quarters) below which a value just above a quarter-hour
/// boundary stays on that boundary.
const QUARTER_TOLERANCE: f64 = 1e-4;

/// Round up to the next quarter hour.
///
/// ```
/// use ultra_pacer::training::round_quarter_hour;
///
/// assert_eq!(round_quarter_hour(1.0), 1.0);
/// assert_eq!(round_quarter_hour(1.1), 1.25);
/// assert_eq!(round_quarter_hour(2.6), 2.75);
/// ```
pub fn round_quarter_hour(hours: f64) -> f64 {
    (hours * 4.0 + 1.0 - QUARTER_TOLERANCE).floor() / 4.0
}

/// Round up to the next whole kilometer.
pub fn round_up_km(km: f64) -> f64 {
    km.ceil()
}

fn round_volume(value: f64, unit: PlanUnit) -> f64 {
    match unit {
        PlanUnit::Time => round_quarter_hour(value),
        PlanUnit::Distance => round_up_km(value),
    }
}

/// Render a duration in hours as `Hh Mm`; zero renders as `0h`.
///
/// ```
/// use ultra_pacer::training::format_hours;
///
/// assert_eq!(format_hours(6.5), "6h 30m");
/// assert_eq!(format_hours(0.0), "0h");
/// ```
pub fn format_hours(hours: f64) -> String {
    let mut h = hours.trunc() as i64;
    let mut m = ((hours - hours.trunc()) * 60.0).round() as i64;
    if m == 60 {
        h += 1;
        m = 0;
    }

    if h == 0 && m == 0 {
        "0h".to_string()
    } else {
        format!("{}h {}m", h, m)
    }
}

/// Render a volume in the plan's unit.
pub fn format_volume(value: f64, unit: PlanUnit) -> String {
    match unit {
        PlanUnit::Time => format_hours(value),
        PlanUnit::Distance => format!("{} km", value),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn count(phases: &[Phase], phase: Phase) -> usize {
        phases.iter().filter(|p| **p == phase).count()
    }

    fn day(week: &WeekPlan, day: Weekday) -> DayEntry {
        week.days[Weekday::ALL.iter().position(|d| *d == day).unwrap()]
    }

    #[test]
    fn test_phase_schedule_sixteen_weeks() {
        let phases = phase_schedule(16);
        assert_eq!(phases.len(), 16);
        assert_eq!(count(&phases, Phase::Base), 4);
        assert_eq!(count(&phases, Phase::Build), 8);
        assert_eq!(count(&phases, Phase::Peak), 4);
        assert_eq!(count(&phases, Phase::Taper), 0);
    }

    #[test]
    fn test_phase_schedule_remainder_goes_to_taper() {
        let phases = phase_schedule(18);
        assert_eq!(count(&phases, Phase::Taper), 2);
        assert_eq!(phases[16], Phase::Taper);

        let phases = phase_schedule(3);
        assert_eq!(phases, vec![Phase::Taper; 3]);
    }

    #[test]
    fn test_phase_schedule_is_ordered() {
        for weeks in 0..=52 {
            let phases = phase_schedule(weeks);
            assert_eq!(phases.len(), weeks as usize);
            assert!(phases.windows(2).all(|w| w[0] <= w[1]), "out of order for {} weeks", weeks);
        }
    }

    #[test]
    fn test_peak_weekly_volume() {
        let config = TrainingPlanConfig::default();
        assert_eq!(peak_weekly_volume(42.2, PlanUnit::Time, &config), 7.0);
        assert_eq!(peak_weekly_volume(50.0, PlanUnit::Time, &config), 7.0);
        assert_eq!(peak_weekly_volume(80.0, PlanUnit::Time, &config), 10.0);
        assert_eq!(peak_weekly_volume(100.0, PlanUnit::Time, &config), 10.0);
        assert_eq!(peak_weekly_volume(160.0, PlanUnit::Time, &config), 13.0);
        assert_eq!(peak_weekly_volume(161.0, PlanUnit::Time, &config), 15.0);
        assert_eq!(peak_weekly_volume(100.0, PlanUnit::Distance, &config), 85.0);
    }

    #[test]
    fn test_week_factor() {
        let config = TrainingPlanConfig::default();
        assert!((week_factor(Phase::Base, 1, 0, &config) - 0.65).abs() < 1e-12);
        assert!((week_factor(Phase::Base, 4, 0, &config) - 0.6).abs() < 1e-12);
        assert!((week_factor(Phase::Build, 6, 0, &config) - 0.85).abs() < 1e-12);
        assert_eq!(week_factor(Phase::Peak, 13, 0, &config), 0.95);
        assert_eq!(week_factor(Phase::Taper, 17, 0, &config), 0.7);
        assert_eq!(week_factor(Phase::Taper, 18, 1, &config), 0.5);
        assert_eq!(week_factor(Phase::Taper, 19, 2, &config), 0.3);
        assert_eq!(week_factor(Phase::Taper, 22, 5, &config), 0.3);
    }

    #[test]
    fn test_distance_plan_first_week() {
        let plan = generate_training_plan(100.0, 16, 5, true, PlanUnit::Distance);
        let week = &plan[0];

        assert_eq!(week.week, 1);
        assert_eq!(week.phase, Phase::Base);
        assert_eq!(week.total_volume, 56.0);
        assert_eq!(week.long_run_saturday, 23.0);
        assert_eq!(week.long_run_sunday, 14.0);
        assert_eq!(week.remaining_volume, 19.0);
        assert_eq!(week.total_label(), "56 km");
        assert_eq!(week.long_runs_label(), "23 + 14 km");

        let text: Vec<String> = week.days.iter().map(|d| d.to_string()).collect();
        assert_eq!(
            text,
            vec![
                "Mon: Strength / cross-training",
                "Tue: Moderate run ~5 km",
                "Wed: Rest or short walk",
                "Thu: Moderate run ~5 km",
                "Fri: Strength / cross-training",
                "Sat: Long run ~23 km",
                "Sun: Long run ~14 km (back-to-back)",
            ]
        );
    }

    #[test]
    fn test_build_and_peak_weeks() {
        let plan = generate_training_plan(100.0, 16, 5, true, PlanUnit::Distance);

        // Week 6: Build, even week, factor 0.85
        let week6 = &plan[5];
        assert_eq!(week6.phase, Phase::Build);
        assert_eq!(week6.total_volume, 73.0);
        assert_eq!(day(week6, Weekday::Tue).activity, Activity::Workout);

        // Week 5: Build, odd week
        assert_eq!(day(&plan[4], Weekday::Thu).activity, Activity::ModerateRun);

        // Week 13: Peak, odd; week 14: Peak, even
        assert_eq!(plan[12].phase, Phase::Peak);
        assert_eq!(plan[12].total_volume, 81.0);
        assert_eq!(day(&plan[12], Weekday::Tue).activity, Activity::ModerateRun);
        assert_eq!(day(&plan[13], Weekday::Tue).activity, Activity::Workout);

        // Base weeks never carry workouts
        assert_eq!(day(&plan[1], Weekday::Tue).activity, Activity::ModerateRun);
    }

    #[test]
    fn test_taper_weeks_step_down() {
        let plan = generate_training_plan(100.0, 18, 5, true, PlanUnit::Distance);
        assert_eq!(plan[16].phase, Phase::Taper);
        assert_eq!(plan[16].total_volume, 60.0);
        assert_eq!(plan[17].total_volume, 43.0);
    }

    #[test]
    fn test_six_days_adds_wednesday_easy_run() {
        let plan = generate_training_plan(100.0, 16, 6, true, PlanUnit::Distance);
        let wed = day(&plan[0], Weekday::Wed);
        assert_eq!(wed.activity, Activity::EasyRun);
        assert_eq!(wed.volume, Some(4.0));
        assert_eq!(wed.to_string(), "Wed: Easy run ~4 km");
    }

    #[test]
    fn test_without_strength_mon_fri_rest() {
        let plan = generate_training_plan(50.0, 8, 5, false, PlanUnit::Distance);
        for week in &plan {
            assert_eq!(day(week, Weekday::Mon).activity, Activity::Rest);
            assert_eq!(day(week, Weekday::Fri).activity, Activity::Rest);
            assert_eq!(day(week, Weekday::Mon).volume, None);
        }
    }

    #[test]
    fn test_time_plan_first_week() {
        let plan = generate_training_plan(100.0, 16, 5, true, PlanUnit::Time);
        let week = &plan[0];

        assert_eq!(week.total_volume, 6.5);
        assert_eq!(week.long_run_saturday, 2.75);
        assert_eq!(week.long_run_sunday, 1.75);
        assert_eq!(week.remaining_volume, 2.0);
        assert_eq!(week.total_label(), "6h 30m");
        assert_eq!(week.long_runs_label(), "2h 45m + 1h 45m");
        assert_eq!(day(week, Weekday::Tue).to_string(), "Tue: Moderate run ~0h 30m");
        assert_eq!(day(week, Weekday::Sun).to_string(), "Sun: Long run ~1h 45m (back-to-back)");
    }

    #[test]
    fn test_every_week_has_seven_days_in_order() {
        let plan = generate_training_plan(160.0, 23, 7, true, PlanUnit::Time);
        assert_eq!(plan.len(), 23);
        for (i, week) in plan.iter().enumerate() {
            assert_eq!(week.week, i as u32 + 1);
            let days: Vec<Weekday> = week.days.iter().map(|d| d.day).collect();
            assert_eq!(days, Weekday::ALL.to_vec());
        }
    }

    #[test]
    fn test_distance_allocation_fits_weekly_total() {
        for days_per_week in 3..=7 {
            let plan = generate_training_plan(100.0, 16, days_per_week, true, PlanUnit::Distance);
            for week in &plan {
                assert!(week.remaining_volume >= 0.0);
                assert!(
                    !week.is_over_allocated(),
                    "week {}: {} > {}",
                    week.week,
                    week.allocated_volume(),
                    week.total_volume
                );
            }
        }
    }

    #[test]
    fn test_small_distances_only_overshoot_on_tiny_remainders() {
        let mut overshoots = 0;
        for half_km in 2..=400 {
            let distance = half_km as f64 * 0.5;
            for weeks in [16, 18] {
                for days_per_week in 5..=7 {
                    let plan =
                        generate_training_plan(distance, weeks, days_per_week, true, PlanUnit::Distance);
                    for week in plan.iter().filter(|w| w.is_over_allocated()) {
                        overshoots += 1;
                        let long_runs = week.long_run_saturday + week.long_run_sunday;
                        assert!(
                            long_runs > week.total_volume || week.remaining_volume <= 2.0,
                            "{} km, {} days, week {}: allocated {} of {}",
                            distance,
                            days_per_week,
                            week.week,
                            week.allocated_volume(),
                            week.total_volume
                        );
                        assert!(distance < 25.0, "{} km week {} over-allocated", distance, week.week);
                    }
                }
            }
        }
        assert!(overshoots > 0);
    }

    #[test]
    fn test_remainder_of_one_km_overshoots() {
        // 2.5 km race, week 13 (Peak): total 3, long runs 1 + 1, remaining 1
        let plan = generate_training_plan(2.5, 16, 5, true, PlanUnit::Distance);
        let week = &plan[12];
        assert_eq!(week.total_volume, 3.0);
        assert_eq!(week.remaining_volume, 1.0);
        assert_eq!(week.allocated_volume(), 4.0);
        assert!(week.is_over_allocated());
    }

    #[test]
    fn test_tiny_distance_clamps_negative_remaining() {
        // Long runs round up to 1 km each against a 1 km week
        let plan = generate_training_plan(1.0, 4, 5, true, PlanUnit::Distance);
        let week = &plan[0];
        assert_eq!(week.total_volume, 1.0);
        assert_eq!(week.long_run_saturday, 1.0);
        assert_eq!(week.long_run_sunday, 1.0);
        assert_eq!(week.remaining_volume, 0.0);
        assert_eq!(day(week, Weekday::Tue).volume, Some(0.0));
    }

    #[test]
    fn test_zero_weeks_is_empty() {
        assert!(generate_training_plan(100.0, 0, 5, true, PlanUnit::Distance).is_empty());
    }

    #[test]
    fn test_custom_config() {
        let config = TrainingPlanConfig { peak_distance_factor: 1.0, ..Default::default() };
        let plan =
            generate_training_plan_with_config(100.0, 4, 5, true, PlanUnit::Distance, &config);
        // Week 4 is Peak: 100 * 0.95
        assert_eq!(plan[3].phase, Phase::Peak);
        assert_eq!(plan[3].total_volume, 95.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_plan_serde_round_trip() {
        let plan = generate_training_plan(100.0, 16, 6, true, PlanUnit::Distance);
        let json = serde_json::to_string(&plan).unwrap();
        let back: Vec<WeekPlan> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, plan);

        let value = serde_json::to_value(&plan[0]).unwrap();
        assert_eq!(value["phase"], "Base");
        assert_eq!(value["unit"], "distance");
        assert_eq!(value["total_volume"], 56.0);

        let days = value["days"].as_array().unwrap();
        assert_eq!(days.len(), 7);
        assert_eq!(days[0]["day"], "Mon");
        assert_eq!(days[0]["activity"], "strength");
        assert!(days[0]["volume"].is_null());
        assert_eq!(days[2]["activity"], "easy_run");
        assert_eq!(days[5]["activity"], "long_run");
        assert_eq!(days[6]["activity"], "back_to_back_long_run");
        assert_eq!(days[6]["volume"], 14.0);
    }

    #[test]
    fn test_round_quarter_hour() {
        assert_eq!(round_quarter_hour(0.0), 0.0);
        assert_eq!(round_quarter_hour(1.0), 1.0);
        assert_eq!(round_quarter_hour(1.01), 1.25);
        assert_eq!(round_quarter_hour(1.25), 1.25);
        assert_eq!(round_quarter_hour(1.000_001), 1.0);
        assert_eq!(round_quarter_hour(6.55), 6.75);
    }

    #[test]
    fn test_round_up_km() {
        assert_eq!(round_up_km(55.25), 56.0);
        assert_eq!(round_up_km(56.0), 56.0);
        assert_eq!(round_up_km(0.0), 0.0);
    }

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(6.5), "6h 30m");
        assert_eq!(format_hours(1.0), "1h 0m");
        assert_eq!(format_hours(0.25), "0h 15m");
        assert_eq!(format_hours(0.0), "0h");
        assert_eq!(format_hours(1.9999), "2h 0m");
    }

    #[test]
    fn test_plan_unit_parsing() {
        assert_eq!("km".parse::<PlanUnit>().unwrap(), PlanUnit::Distance);
        assert_eq!("Hours".parse::<PlanUnit>().unwrap(), PlanUnit::Time);
        assert_eq!("time".parse::<PlanUnit>().unwrap(), PlanUnit::Time);
        assert!("miles".parse::<PlanUnit>().is_err());
        assert_eq!(PlanUnit::Time.to_string(), "hours");
    }
}
