//! Coordinates and polylines for route geometries.
//!
//! Route legs arrive as decoded coordinate sequences. Encoded polyline
//! strings are not part of the routing backend's wire format, so this module
//! only deals with point lists.

use serde::{Deserialize, Serialize};

/// A geographic point as (latitude, longitude) in degrees.
///
/// Accepts both `[lat, lng]` arrays and `{"lat": .., "lng": ..}` objects on
/// the wire and always serializes back as an array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "CoordinateRepr", into = "[f64; 2]")]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(coordinate: Coordinate) -> Self {
        [coordinate.lat, coordinate.lng]
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CoordinateRepr {
    Pair([f64; 2]),
    Object { lat: f64, lng: f64 },
}

impl From<CoordinateRepr> for Coordinate {
    fn from(repr: CoordinateRepr) -> Self {
        match repr {
            CoordinateRepr::Pair([lat, lng]) => Self { lat, lng },
            CoordinateRepr::Object { lat, lng } => Self { lat, lng },
        }
    }
}

/// A polyline representing a leg geometry as decoded coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polyline {
    points: Vec<Coordinate>,
}

impl Polyline {
    /// Creates a new Polyline from decoded coordinate points.
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }

    /// Returns the number of vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true when the leg has no path.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the starting vertex, if any.
    pub fn first(&self) -> Option<Coordinate> {
        self.points.first().copied()
    }

    /// Point at `progress` (0.0..=1.0) of the way between the first and last
    /// vertex, snapped down to an existing vertex.
    ///
    /// The index is `floor(progress * (len - 1))`. Returns `None` for an
    /// empty polyline.
    pub fn interpolate(&self, progress: f64) -> Option<Coordinate> {
        if self.points.is_empty() {
            return None;
        }
        let last = (self.points.len() - 1) as f64;
        let index = (progress * last).floor() as usize;
        self.points.get(index).copied()
    }

    /// Vertex at `floor(len * fraction)`, falling back to the first vertex
    /// when that index is out of range.
    pub fn sample(&self, fraction: f64) -> Option<Coordinate> {
        let index = (self.points.len() as f64 * fraction).floor() as usize;
        self.points.get(index).or_else(|| self.points.first()).copied()
    }
}

impl From<Vec<(f64, f64)>> for Polyline {
    fn from(points: Vec<(f64, f64)>) -> Self {
        Self::new(points.into_iter().map(Coordinate::from).collect())
    }
}
