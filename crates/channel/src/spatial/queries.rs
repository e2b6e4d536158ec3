//! Distance and projection utilities for snapping points onto polylines.
//!
//! Distances use the Haversine formula on a sphere of radius
//! [`EARTH_RADIUS_M`]. Projection onto segments uses a local equirectangular
//! approximation (see [`to_local_xy`]) that is only adequate over a few
//! kilometers and away from the poles.

use std::f64::consts::FRAC_PI_2;

use crate::models::types::{validate_threshold, GeoPoint, Result, SnapResult};

/// Mean Earth radius used for great-circle distances
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// WGS84 equatorial radius used by the planar approximation
pub const EQUATORIAL_RADIUS_M: f64 = 6_378_137.0;

/// Great-circle distance between two points in meters
pub fn distance_meters(p1: GeoPoint, p2: GeoPoint) -> f64 {
    let d_lat = (p2.lat - p1.lat).to_radians();
    let d_lng = (p2.lng - p1.lng).to_radians();

    let lat1 = p1.lat.to_radians();
    let lat2 = p2.lat.to_radians();

    let a = (d_lat * 0.5).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lng * 0.5).sin().powi(2);
    // Rounding can push `a` past 1 for near-antipodal points
    let a = a.min(1.0);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_M * c
}

/// Project a point onto a local plane, in meters.
///
/// Longitude is scaled by the cosine of the point's *own* latitude, so this
/// is not a single tangent plane: two points only share a frame to the
/// extent that their latitudes are close. Results must be converted back
/// with [`from_local_xy`] right away.
pub fn to_local_xy(p: GeoPoint) -> [f64; 2] {
    let x = EQUATORIAL_RADIUS_M * p.lng.to_radians() * p.lat.to_radians().cos();
    let y = EQUATORIAL_RADIUS_M * p.lat.to_radians();
    [x, y]
}

/// Inverse of [`to_local_xy`]; latitude is recovered first and its cosine
/// used to unscale longitude.
pub fn from_local_xy(xy: [f64; 2]) -> GeoPoint {
    let lat = (xy[1] / EQUATORIAL_RADIUS_M).to_degrees();
    let lng = (xy[0] / (EQUATORIAL_RADIUS_M * lat.to_radians().cos())).to_degrees();
    GeoPoint::new(lat, lng)
}

/// Closest point to `p` on segment `a`-`b`, never extrapolated past either end.
///
/// A zero-length segment yields `a`.
pub fn project_point_onto_segment(a: GeoPoint, b: GeoPoint, p: GeoPoint) -> GeoPoint {
    let a = to_local_xy(a);
    let b = to_local_xy(b);
    let p = to_local_xy(p);

    let ab = [b[0] - a[0], b[1] - a[1]];
    let ap = [p[0] - a[0], p[1] - a[1]];

    let ab_ab = ab[0] * ab[0] + ab[1] * ab[1];
    let t = if ab_ab == 0.0 {
        0.0
    } else {
        let ab_ap = ab[0] * ap[0] + ab[1] * ap[1];
        (ab_ap / ab_ab).clamp(0.0, 1.0)
    };

    from_local_xy([a[0] + t * ab[0], a[1] + t * ab[1]])
}

/// Snap `point` onto the nearest point of `polyline`.
///
/// Returns `Ok(None)` when the polyline has fewer than two vertices. On
/// equal distances the earliest segment wins. `within_threshold` is a
/// strict `distance < threshold_m` test.
pub fn nearest_point_on_polyline(
    polyline: &[GeoPoint],
    point: GeoPoint,
    threshold_m: f64,
) -> Result<Option<SnapResult>> {
    validate_threshold(threshold_m)?;
    point.validate()?;
    for (index, vertex) in polyline.iter().enumerate() {
        vertex.validate_vertex(index)?;
    }

    Ok(closest_on_polyline(polyline, point).map(|(segment, point, distance_m)| SnapResult {
        point,
        distance_m,
        within_threshold: distance_m < threshold_m,
        segment,
    }))
}

/// Unvalidated scan over every segment: `(segment index, point, distance)`.
pub(crate) fn closest_on_polyline(
    polyline: &[GeoPoint],
    point: GeoPoint,
) -> Option<(usize, GeoPoint, f64)> {
    let mut best: Option<(usize, GeoPoint, f64)> = None;

    for (segment, pair) in polyline.windows(2).enumerate() {
        let candidate = project_point_onto_segment(pair[0], pair[1], point);
        let distance = distance_meters(candidate, point);

        if best.map_or(true, |(_, _, best_distance)| distance < best_distance) {
            best = Some((segment, candidate, distance));
        }
    }

    best
}

/// Bounding box `[[min_lng, min_lat], [max_lng, max_lat]]` of every point
/// within `radius_m` of `center` on the sphere.
///
/// Uses the spherical-cap bounds, so a box check followed by
/// [`distance_meters`] never drops a point that is actually in range.
pub fn search_bounds(center: GeoPoint, radius_m: f64) -> [[f64; 2]; 2] {
    let angular = radius_m / EARTH_RADIUS_M;
    let lat = center.lat.to_radians();

    let min_lat = lat - angular;
    let max_lat = lat + angular;

    // Cap reaches a pole: every longitude is in range
    if min_lat <= -FRAC_PI_2 || max_lat >= FRAC_PI_2 {
        return [
            [-180.0, min_lat.to_degrees().max(-90.0)],
            [180.0, max_lat.to_degrees().min(90.0)],
        ];
    }

    let d_lng = (angular.sin() / lat.cos()).min(1.0).asin().to_degrees();
    [
        [center.lng - d_lng, min_lat.to_degrees()],
        [center.lng + d_lng, max_lat.to_degrees()],
    ]
}
