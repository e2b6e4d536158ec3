//! Core geometry types, snapping configuration and errors.

use std::fmt;

use geo::{Coord, Point};

use crate::identifiers::*;

/// Distance under which a marker is relocated onto the channel.
pub const DEFAULT_SNAP_THRESHOLD_M: f64 = 200.0;

// ============================================================================
// Geometry
// ============================================================================

/// A geographic coordinate in degrees.
///
/// Ranges are not checked; only non-finite components are rejected where
/// validation applies.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Build a point, rejecting NaN and infinite components.
    pub fn try_new(lat: f64, lng: f64) -> Result<Self> {
        let point = Self::new(lat, lng);
        point.validate()?;
        Ok(point)
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    pub fn validate(&self) -> Result<()> {
        self.check_finite(None)
    }

    pub(crate) fn validate_vertex(&self, index: usize) -> Result<()> {
        self.check_finite(Some(index))
    }

    fn check_finite(&self, index: Option<usize>) -> Result<()> {
        if self.is_finite() {
            Ok(())
        } else {
            Err(ChannelError::InvalidCoordinate {
                index,
                lat: self.lat,
                lng: self.lng,
            })
        }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

// geo uses x = longitude, y = latitude
impl From<GeoPoint> for Point {
    fn from(p: GeoPoint) -> Self {
        Point::new(p.lng, p.lat)
    }
}

impl From<Point> for GeoPoint {
    fn from(p: Point) -> Self {
        Self::new(p.y(), p.x())
    }
}

impl From<GeoPoint> for Coord {
    fn from(p: GeoPoint) -> Self {
        Coord { x: p.lng, y: p.lat }
    }
}

impl From<Coord> for GeoPoint {
    fn from(c: Coord) -> Self {
        Self::new(c.y, c.x)
    }
}

// ============================================================================
// Snapping
// ============================================================================

/// Closest point on a polyline to a query point.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnapResult {
    /// Point lying on the polyline
    pub point: GeoPoint,
    /// Great-circle distance from the query point to `point`
    pub distance_m: f64,
    pub within_threshold: bool,
    /// Index of the segment (`polyline[segment]..polyline[segment + 1]`) holding `point`
    pub segment: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SnapConfig {
    /// Acceptance threshold in meters (strictly less-than)
    pub threshold_m: f64,
}

impl SnapConfig {
    pub fn new(threshold_m: f64) -> Result<Self> {
        let config = Self { threshold_m };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        validate_threshold(self.threshold_m)
    }
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            threshold_m: DEFAULT_SNAP_THRESHOLD_M,
        }
    }
}

pub(crate) fn validate_threshold(threshold_m: f64) -> Result<()> {
    if threshold_m.is_finite() && threshold_m > 0.0 {
        Ok(())
    } else {
        Err(ChannelError::InvalidThreshold(threshold_m))
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// `index` is the polyline vertex position, `None` for a lone point
    #[error(
        "Invalid coordinate: ({lat}, {lng}){}",
        .index.map(|i| format!(" at vertex {i}")).unwrap_or_default()
    )]
    InvalidCoordinate {
        index: Option<usize>,
        lat: f64,
        lng: f64,
    },

    #[error("Invalid snap threshold: {0} m")]
    InvalidThreshold(f64),

    #[error("Report not found: {0}")]
    ReportNotFound(ReportIdentifier),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, ChannelError>;
