//! Snapping geometry and spatial indexing.

pub mod index;
pub mod queries;

pub use queries::{
    distance_meters, nearest_point_on_polyline, project_point_onto_segment, EARTH_RADIUS_M,
    EQUATORIAL_RADIUS_M,
};
