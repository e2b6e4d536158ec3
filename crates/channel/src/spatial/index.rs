//! R-tree nodes for spatial lookup of hazard reports.
//!
//! ## Two-Stage Filtering
//!
//! Radius queries first select nodes whose coordinates fall inside the
//! spherical-cap bounding box from [`search_bounds`](super::queries::search_bounds),
//! then keep only those whose Haversine distance is within the radius.

use rstar::{PointDistance, RTreeObject, AABB};

use crate::identifiers::ReportIdentifier;
use crate::models::types::GeoPoint;

// ============================================================================
// Report Spatial Node
// ============================================================================

/// Report position keyed by id; coordinates are `[lng, lat]`.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportNode {
    pub id: ReportIdentifier,
    point: [f64; 2],
}

impl ReportNode {
    pub fn new(position: GeoPoint, id: ReportIdentifier) -> Self {
        Self {
            id,
            point: [position.lng, position.lat],
        }
    }

    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.point[1], self.point[0])
    }
}

impl RTreeObject for ReportNode {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for ReportNode {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}
