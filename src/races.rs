//! Named default race distances.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::legs::whole_route_leg;
use crate::Leg;

/// A standard race distance, used when no track is available.
///
/// # Example
/// ```
/// use ultra_pacer::RacePreset;
///
/// let race: RacePreset = "100k".parse().unwrap();
/// assert_eq!(race.distance_km(), 100.0);
/// assert_eq!(race.to_string(), "100 km");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RacePreset {
    Marathon,
    HalfMarathon,
    FiftyKm,
    HundredKm,
    FiftyMile,
    HundredMile,
}

impl RacePreset {
    pub const ALL: [RacePreset; 6] = [
        RacePreset::Marathon,
        RacePreset::HalfMarathon,
        RacePreset::FiftyKm,
        RacePreset::HundredKm,
        RacePreset::FiftyMile,
        RacePreset::HundredMile,
    ];

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            RacePreset::Marathon => "Marathon",
            RacePreset::HalfMarathon => "Half Marathon",
            RacePreset::FiftyKm => "50 km",
            RacePreset::HundredKm => "100 km",
            RacePreset::FiftyMile => "50 Mile",
            RacePreset::HundredMile => "100 Mile",
        }
    }

    /// Short key accepted by [`FromStr`].
    pub fn key(&self) -> &'static str {
        match self {
            RacePreset::Marathon => "marathon",
            RacePreset::HalfMarathon => "half",
            RacePreset::FiftyKm => "50k",
            RacePreset::HundredKm => "100k",
            RacePreset::FiftyMile => "50mi",
            RacePreset::HundredMile => "100mi",
        }
    }

    /// Nominal distance in kilometers (mile races use rounded values).
    pub fn distance_km(&self) -> f64 {
        match self {
            RacePreset::Marathon => 42.2,
            RacePreset::HalfMarathon => 21.1,
            RacePreset::FiftyKm => 50.0,
            RacePreset::HundredKm => 100.0,
            RacePreset::FiftyMile => 80.0,
            RacePreset::HundredMile => 160.0,
        }
    }

    /// The whole race as a single leg.
    pub fn legs(&self) -> Vec<Leg> {
        whole_route_leg(self.distance_km())
    }
}

impl fmt::Display for RacePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RacePreset {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        match key.as_str() {
            "marathon" => Ok(RacePreset::Marathon),
            "half" | "half-marathon" | "half_marathon" => Ok(RacePreset::HalfMarathon),
            "50k" | "50km" => Ok(RacePreset::FiftyKm),
            "100k" | "100km" => Ok(RacePreset::HundredKm),
            "50mi" | "50mile" => Ok(RacePreset::FiftyMile),
            "100mi" | "100mile" => Ok(RacePreset::HundredMile),
            _ => Err(PlanError::UnknownRace(s.to_string())),
        }
    }
}
