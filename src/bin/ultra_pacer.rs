//! Command-line front end: pacing tables and training plans from a GPX or
//! JSON track, or a race preset.

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint};
use log::info;
use tracing_subscriber::EnvFilter;

use ultra_pacer::error::{
    validate_days_per_week, validate_leg_count, validate_positive, validate_weeks,
};
use ultra_pacer::training::format_hours;
use ultra_pacer::{
    generate_training_plan, plan_pacing_by_pace, plan_pacing_by_time, Leg, PacingPlan,
    PlanUnit, RacePreset, Track, WeekPlan,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Ultra race pacing and training plans", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a per-leg pacing table
    Pacing(PacingArgs),
    /// Generate a periodized training plan
    Training(TrainingArgs),
    /// List the built-in race presets
    Races,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct RouteSource {
    /// Track file: `.gpx`, or JSON with `latlngs` or `segments`
    #[arg(long, value_hint = ValueHint::FilePath)]
    track: Option<PathBuf>,

    /// Race preset key (marathon, half, 50k, 100k, 50mi, 100mi)
    #[arg(long)]
    race: Option<RacePreset>,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct PacingTarget {
    /// Target finish time in hours
    #[arg(long)]
    target_hours: Option<f64>,

    /// Target pace in minutes per km
    #[arg(long)]
    target_pace: Option<f64>,
}

#[derive(Parser, Debug)]
struct PacingArgs {
    #[command(flatten)]
    source: RouteSource,

    /// Number of legs (ignored for multi-segment tracks)
    #[arg(long, default_value_t = 5)]
    legs: u32,

    #[command(flatten)]
    target: PacingTarget,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Parser, Debug)]
struct TrainingArgs {
    #[command(flatten)]
    source: RouteSource,

    /// Plan length in weeks
    #[arg(long, default_value_t = 16)]
    weeks: u32,

    /// Running days per week
    #[arg(long, default_value_t = 5)]
    days_per_week: u32,

    /// Leave Monday and Friday as rest days
    #[arg(long)]
    no_strength: bool,

    /// Plan unit: km or hours
    #[arg(long, default_value = "km")]
    unit: PlanUnit,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    match cli.command {
        Command::Pacing(args) => handle_pacing(args),
        Command::Training(args) => handle_training(args),
        Command::Races => {
            handle_races();
            Ok(())
        }
    }
}

fn load_track(path: &Path) -> Result<Track> {
    let is_gpx = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gpx"));

    let track = if is_gpx {
        let file = File::open(path)
            .with_context(|| format!("failed to open track {}", path.display()))?;
        Track::from_gpx_reader(BufReader::new(file))
    } else {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read track {}", path.display()))?;
        Track::from_json(&json)
    }
    .with_context(|| format!("failed to parse track {}", path.display()))?;

    info!(
        "[CLI] Loaded {} ({} segment(s), {:.2} km)",
        path.display(),
        track.segment_count(),
        track.total_distance_km()
    );
    Ok(track)
}

fn route_legs(source: &RouteSource, num_legs: usize) -> Result<Vec<Leg>> {
    match (&source.track, source.race) {
        (Some(path), _) => Ok(load_track(path)?.legs(num_legs)),
        (None, Some(race)) => Ok(race.legs()),
        (None, None) => bail!("either --track or --race is required"),
    }
}

fn route_distance(source: &RouteSource) -> Result<f64> {
    match (&source.track, source.race) {
        (Some(path), _) => Ok(load_track(path)?.total_distance_km()),
        (None, Some(race)) => Ok(race.distance_km()),
        (None, None) => bail!("either --track or --race is required"),
    }
}

fn handle_pacing(args: PacingArgs) -> Result<()> {
    let num_legs = validate_leg_count(args.legs)? as usize;

    let legs = route_legs(&args.source, num_legs)?;

    let plan = match (args.target.target_hours, args.target.target_pace) {
        (Some(hours), _) => plan_pacing_by_time(&legs, validate_positive("target hours", hours)?),
        (None, Some(pace)) => plan_pacing_by_pace(&legs, validate_positive("target pace", pace)?),
        (None, None) => bail!("either --target-hours or --target-pace is required"),
    };

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
        OutputFormat::Text => print_pacing(&plan),
    }
    Ok(())
}

fn print_pacing(plan: &PacingPlan) {
    println!("{:>4}  {:>12}  {:>12}  {:>9}", "Leg", "Distance km", "Pace min/km", "Time h");
    for row in &plan.rows {
        println!(
            "{:>4}  {:>12.3}  {:>12.2}  {:>9.2}",
            row.leg, row.distance_km, row.pace_min_per_km, row.time_hours
        );
    }
    println!();
    println!(
        "Estimated finish: {:.2} h ({})",
        plan.total_hours,
        format_hours(plan.total_hours)
    );
}

fn handle_training(args: TrainingArgs) -> Result<()> {
    let weeks = validate_weeks(args.weeks)?;
    let days_per_week = validate_days_per_week(args.days_per_week)?;

    let total_distance = route_distance(&args.source)?;

    let plan = generate_training_plan(
        total_distance,
        weeks,
        days_per_week,
        !args.no_strength,
        args.unit,
    );

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
        OutputFormat::Text => print_training(&plan),
    }
    Ok(())
}

fn print_training(plan: &[WeekPlan]) {
    for week in plan {
        println!(
            "Week {} ({}): total {}, long runs {}",
            week.week,
            week.phase,
            week.total_label(),
            week.long_runs_label()
        );
        for day in &week.days {
            println!("  {}", day);
        }
    }
}

fn handle_races() {
    for race in RacePreset::ALL {
        println!("{:<10} {:<14} {:>6.1} km", race.key(), race.name(), race.distance_km());
    }
}
