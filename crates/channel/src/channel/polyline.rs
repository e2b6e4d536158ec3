//! Validated channel centerline and buoy snapping.

use std::sync::Arc;

use geo::{LineString, Rect};
use tracing::debug;

use crate::models::buoy::{Buoy, Placement, SnappedBuoy};
use crate::models::types::{GeoPoint, Result, SnapConfig, SnapResult};
use crate::spatial::queries::{closest_on_polyline, distance_meters};

/// Channel centerline: an ordered polyline whose vertices are all finite.
///
/// A channel with fewer than two vertices is valid but never snaps.
/// Cheap to clone, safe to share across threads.
#[derive(Clone, Debug, PartialEq)]
pub struct Channel {
    name: Arc<str>,
    vertices: Arc<[GeoPoint]>,
}

impl Channel {
    pub fn new(name: impl Into<Arc<str>>, vertices: Vec<GeoPoint>) -> Result<Self> {
        for (index, vertex) in vertices.iter().enumerate() {
            vertex.validate_vertex(index)?;
        }

        Ok(Self {
            name: name.into(),
            vertices: vertices.into(),
        })
    }

    pub fn from_line_string(name: impl Into<Arc<str>>, line: &LineString) -> Result<Self> {
        Self::new(name, line.coords().map(|c| GeoPoint::from(*c)).collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertices(&self) -> &[GeoPoint] {
        &self.vertices
    }

    pub fn segment_count(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }

    pub fn to_line_string(&self) -> LineString {
        self.vertices.iter().map(|p| geo::Coord::from(*p)).collect()
    }

    /// Total great-circle length in meters
    pub fn length_m(&self) -> f64 {
        self.vertices
            .windows(2)
            .map(|pair| distance_meters(pair[0], pair[1]))
            .sum()
    }

    /// Lng/lat bounding rectangle, `None` for an empty channel
    pub fn bounds(&self) -> Option<Rect> {
        let first = self.vertices.first()?;
        let (mut min, mut max) = (*first, *first);
        for p in self.vertices.iter().skip(1) {
            min.lat = min.lat.min(p.lat);
            min.lng = min.lng.min(p.lng);
            max.lat = max.lat.max(p.lat);
            max.lng = max.lng.max(p.lng);
        }
        Some(Rect::new(geo::Coord::from(min), geo::Coord::from(max)))
    }

    /// Nearest point on the channel, see [`nearest_point_on_polyline`](crate::spatial::nearest_point_on_polyline).
    pub fn snap(&self, point: GeoPoint, config: &SnapConfig) -> Result<Option<SnapResult>> {
        config.validate()?;
        point.validate()?;

        // Vertices were validated on construction
        Ok(closest_on_polyline(&self.vertices, point).map(|(segment, point, distance_m)| {
            SnapResult {
                point,
                distance_m,
                within_threshold: distance_m < config.threshold_m,
                segment,
            }
        }))
    }

    /// Relocate a buoy onto the channel when it lies within the threshold,
    /// otherwise keep its surveyed position and mark it unsnapped.
    pub fn snap_buoy(&self, buoy: &Buoy, config: &SnapConfig) -> Result<SnappedBuoy> {
        let snapped = match self.snap(buoy.position, config)? {
            Some(snap) if snap.within_threshold => SnappedBuoy {
                buoy: buoy.clone(),
                position: snap.point,
                placement: Placement::Snapped {
                    distance_m: snap.distance_m.round() as u32,
                },
            },
            other => {
                debug!(
                    buoy = %buoy.id,
                    channel = %self.name,
                    distance_m = other.map(|s| s.distance_m),
                    threshold_m = config.threshold_m,
                    "buoy left unsnapped"
                );
                SnappedBuoy {
                    buoy: buoy.clone(),
                    position: buoy.position,
                    placement: Placement::Unsnapped,
                }
            }
        };

        Ok(snapped)
    }

    /// Recompute placements for every buoy, preserving order.
    pub fn snap_buoys(&self, buoys: &[Buoy], config: &SnapConfig) -> Result<Vec<SnappedBuoy>> {
        let snapped = buoys
            .iter()
            .map(|buoy| self.snap_buoy(buoy, config))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            channel = %self.name,
            total = snapped.len(),
            snapped = snapped.iter().filter(|b| b.is_snapped()).count(),
            "re-snapped buoys"
        );

        Ok(snapped)
    }
}
