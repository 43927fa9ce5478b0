//! # Route Tracks
//!
//! A [`Track`] is the route a pacing table is built from: either one point
//! sequence or several discrete segments (a GPS file with multiple track
//! segments). [`Track::legs`] picks the segmentation strategy.
//!
//! With the `serde` feature, tracks load from JSON:
//! ```json
//! { "latlngs": [[45.92, 6.86], null, [45.93, 6.87]] }
//! { "segments": [[[45.92, 6.86], [45.93, 6.87]], [[45.93, 6.87], [45.95, 6.90]]] }
//! ```
//! Coordinates are `[lat, lng]` pairs; `null` entries in `latlngs` are
//! skipped.
//!
//! With the `gpx` feature, every non-empty `<trkseg>` of a GPX file becomes
//! one segment.

#[cfg(any(feature = "serde", feature = "gpx"))]
use log::debug;
use log::warn;
#[cfg(feature = "serde")]
use serde::Deserialize;

#[cfg(any(feature = "serde", feature = "gpx"))]
use crate::error::{PlanError, Result};
use crate::geo_utils::polyline_length;
use crate::legs::{legs_from_segments, segment_legs, whole_route_leg};
use crate::{GeoPoint, Leg};

/// A route as loaded from a GPS source.
#[derive(Debug, Clone, PartialEq)]
pub enum Track {
    /// One continuous point sequence
    Single(Vec<GeoPoint>),
    /// Discrete segments, each becoming its own leg
    Segmented(Vec<Vec<GeoPoint>>),
}

impl Track {
    /// Derive pacing legs.
    ///
    /// A track with more than one segment yields one leg per segment and
    /// ignores `num_legs`. Otherwise the points are split into roughly
    /// `num_legs` equal-distance legs; if that produces nothing (too few
    /// points, zero length) the whole track becomes a single leg.
    ///
    /// # Example
    /// ```
    /// use ultra_pacer::{GeoPoint, Track};
    ///
    /// let track = Track::Single(
    ///     (0..=20).map(|i| GeoPoint::new(45.0 + i as f64 * 0.01, 6.0)).collect(),
    /// );
    /// let legs = track.legs(1);
    /// assert_eq!(legs.len(), 1);
    /// assert_eq!(legs[0].distance_km, track.total_distance_km());
    /// ```
    pub fn legs(&self, num_legs: usize) -> Vec<Leg> {
        if let Track::Segmented(segments) = self {
            if segments.len() > 1 {
                return legs_from_segments(segments);
            }
        }

        let points = self.points();
        let legs = segment_legs(&points, num_legs);
        if legs.is_empty() {
            warn!(
                "[Track] Segmentation of {} points produced no legs, using the whole route",
                points.len()
            );
            return whole_route_leg(self.total_distance_km());
        }
        legs
    }

    /// Total route length in kilometers, summed per segment.
    pub fn total_distance_km(&self) -> f64 {
        match self {
            Track::Single(points) => polyline_length(points),
            Track::Segmented(segments) => segments.iter().map(|s| polyline_length(s)).sum(),
        }
    }

    /// All points in route order.
    pub fn points(&self) -> Vec<GeoPoint> {
        match self {
            Track::Single(points) => points.clone(),
            Track::Segmented(segments) => segments.iter().flatten().copied().collect(),
        }
    }

    pub fn segment_count(&self) -> usize {
        match self {
            Track::Single(_) => 1,
            Track::Segmented(segments) => segments.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Track::Single(points) => points.is_empty(),
            Track::Segmented(segments) => segments.iter().all(|s| s.is_empty()),
        }
    }
}

impl From<geo::LineString<f64>> for Track {
    fn from(line: geo::LineString<f64>) -> Self {
        Track::Single(line.points().map(GeoPoint::from).collect())
    }
}

impl From<geo::MultiLineString<f64>> for Track {
    fn from(lines: geo::MultiLineString<f64>) -> Self {
        Track::Segmented(
            lines
                .0
                .iter()
                .map(|line| line.points().map(GeoPoint::from).collect())
                .collect(),
        )
    }
}

// ============================================================================
// JSON Loading
// ============================================================================

#[cfg(feature = "serde")]
#[derive(Debug, Deserialize)]
struct TrackDocument {
    latlngs: Option<Vec<Option<[f64; 2]>>>,
    segments: Option<Vec<Vec<[f64; 2]>>>,
}

#[cfg(any(feature = "serde", feature = "gpx"))]
fn checked_point(index: usize, [latitude, longitude]: [f64; 2]) -> Result<GeoPoint> {
    let point = GeoPoint::new(latitude, longitude);
    if point.is_valid() {
        Ok(point)
    } else {
        Err(PlanError::InvalidPoint { index, latitude, longitude })
    }
}

#[cfg(feature = "serde")]
impl Track {
    /// Parse a track from a JSON document.
    ///
    /// `segments` takes precedence over `latlngs` when both are present.
    ///
    /// # Errors
    /// - [`PlanError::Json`] for malformed JSON
    /// - [`PlanError::InvalidPoint`] for coordinates outside ±90/±180
    /// - [`PlanError::EmptyTrack`] when the document holds no points
    ///
    /// # Example
    /// ```
    /// use ultra_pacer::Track;
    ///
    /// let track = Track::from_json(r#"{"latlngs": [[45.0, 6.0], null, [45.1, 6.0]]}"#).unwrap();
    /// assert_eq!(track.points().len(), 2);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: TrackDocument = serde_json::from_str(json)?;

        let track = match (doc.segments, doc.latlngs) {
            (Some(segments), _) if !segments.is_empty() => {
                let mut index = 0;
                let mut parsed = Vec::with_capacity(segments.len());
                for segment in segments {
                    let mut points = Vec::with_capacity(segment.len());
                    for coord in segment {
                        points.push(checked_point(index, coord)?);
                        index += 1;
                    }
                    parsed.push(points);
                }
                Track::Segmented(parsed)
            }
            (_, Some(latlngs)) => {
                let mut points = Vec::with_capacity(latlngs.len());
                for (index, coord) in latlngs.into_iter().enumerate() {
                    if let Some(coord) = coord {
                        points.push(checked_point(index, coord)?);
                    }
                }
                Track::Single(points)
            }
            _ => return Err(PlanError::EmptyTrack),
        };

        if track.is_empty() {
            return Err(PlanError::EmptyTrack);
        }

        track.log_loaded("JSON");
        Ok(track)
    }
}

#[cfg(any(feature = "serde", feature = "gpx"))]
impl Track {
    fn log_loaded(&self, source: &str) {
        debug!(
            "[Track] Loaded {} points in {} segment(s) from {}, {:.3} km",
            self.points().len(),
            self.segment_count(),
            source,
            self.total_distance_km()
        );
    }
}

// ============================================================================
// GPX Loading
// ============================================================================

#[cfg(feature = "gpx")]
impl Track {
    /// Parse a GPX document from a reader.
    ///
    /// # Errors
    /// - [`PlanError::Gpx`] for malformed XML or GPX
    /// - everything [`Track::from_gpx`] returns
    pub fn from_gpx_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        let gpx = gpx::read(reader)?;
        Self::from_gpx(&gpx)
    }

    /// Collect the track segments of a parsed GPX document.
    ///
    /// Segments from all `<trk>` elements are kept in document order and
    /// empty segments are dropped. A single remaining segment becomes
    /// [`Track::Single`], several become [`Track::Segmented`]. Waypoints
    /// (`<wpt>`) and routes (`<rte>`) are ignored.
    pub fn from_gpx(gpx: &gpx::Gpx) -> Result<Self> {
        let mut index = 0;
        let mut segments = Vec::new();

        for track in &gpx.tracks {
            for segment in &track.segments {
                let mut points = Vec::with_capacity(segment.points.len());
                for waypoint in &segment.points {
                    let point = waypoint.point();
                    points.push(checked_point(index, [point.y(), point.x()])?);
                    index += 1;
                }
                if !points.is_empty() {
                    segments.push(points);
                }
            }
        }

        let track = match segments.len() {
            0 => return Err(PlanError::EmptyTrack),
            1 => Track::Single(segments.swap_remove(0)),
            _ => Track::Segmented(segments),
        };

        track.log_loaded("GPX");
        Ok(track)
    }
}

// ============================================================================
// Tests
// ============================================================================
