use approx::assert_relative_eq;
use hidrovia_channel::prelude::*;
use hidrovia_channel::spatial::EARTH_RADIUS_M;

const REACH: [GeoPoint; 2] = [
    GeoPoint::new(-22.4750, -48.5400),
    GeoPoint::new(-22.4855, -48.5485),
];

/// Barra Bonita -> Jaú centerline
fn barra_bonita() -> Vec<GeoPoint> {
    vec![
        GeoPoint::new(-22.4750, -48.5400),
        GeoPoint::new(-22.4855, -48.5485),
        GeoPoint::new(-22.4949, -48.5581),
        GeoPoint::new(-22.5018, -48.5655),
        GeoPoint::new(-22.5085, -48.5740),
        GeoPoint::new(-22.5155, -48.5825),
        GeoPoint::new(-22.5250, -48.5930),
    ]
}

fn surveyed_buoys() -> Vec<Buoy> {
    let buoy = |id: &str, name: &str, kind, lat, lng| Buoy {
        id: BuoyIdentifier::new(id),
        name: name.into(),
        kind,
        condition: "Boa".into(),
        position: GeoPoint::new(lat, lng),
    };

    vec![
        buoy("BCE-155", "BCE-155", BuoyKind::Port, -22.4945, -48.5578),
        buoy("BCV-158", "BCV-158", BuoyKind::Starboard, -22.5010, -48.5658),
        buoy("BCV-158A", "BCV-158A", BuoyKind::Starboard, -22.5082, -48.5739),
        buoy("B-BB-10", "BB-10", BuoyKind::Port, -22.5150, -48.5820),
        buoy("B-ESP-01", "ESP-01", BuoyKind::Special, -22.4852, -48.5482),
    ]
}

#[test]
fn near_midpoint_snaps_within_threshold() {
    let p = GeoPoint::new(-22.4800, -48.5440);
    let snap = nearest_point_on_polyline(&REACH, p, 200.0).unwrap().unwrap();

    let midpoint = GeoPoint::new(
        (REACH[0].lat + REACH[1].lat) / 2.0,
        (REACH[0].lng + REACH[1].lng) / 2.0,
    );
    assert!(distance_meters(snap.point, midpoint) < 100.0);
    assert!(snap.distance_m < 50.0);
    assert!(snap.within_threshold);
    assert_eq!(snap.segment, 0);
}

#[test]
fn far_point_is_outside_threshold() {
    let p = GeoPoint::new(-22.6000, -48.7000);
    let snap = nearest_point_on_polyline(&REACH, p, 200.0).unwrap().unwrap();

    assert!(!snap.within_threshold);
    assert!(snap.distance_m > 10_000.0 && snap.distance_m < 100_000.0);
    // Foot of the perpendicular is past B, so the result is clamped to B
    assert_relative_eq!(snap.point.lat, REACH[1].lat, epsilon = 1e-9);
    assert_relative_eq!(snap.point.lng, REACH[1].lng, epsilon = 1e-9);
}

#[test]
fn threshold_is_strict() {
    // East-west segment on the equator; the query sits due north of its middle
    let segment = [GeoPoint::new(0.0, -0.01), GeoPoint::new(0.0, 0.01)];
    let at = |meters: f64| GeoPoint::new((meters / EARTH_RADIUS_M).to_degrees(), 0.0);

    let inside = nearest_point_on_polyline(&segment, at(199.0), 200.0).unwrap().unwrap();
    assert_relative_eq!(inside.distance_m, 199.0, epsilon = 1e-6);
    assert!(inside.within_threshold);

    let outside = nearest_point_on_polyline(&segment, at(201.0), 200.0).unwrap().unwrap();
    assert_relative_eq!(outside.distance_m, 201.0, epsilon = 1e-6);
    assert!(!outside.within_threshold);
}

#[test]
fn degenerate_polylines_do_not_snap() {
    let p = GeoPoint::new(-22.4800, -48.5440);

    assert!(nearest_point_on_polyline(&[], p, 200.0).unwrap().is_none());
    assert!(nearest_point_on_polyline(&REACH[..1], p, 200.0).unwrap().is_none());
}

#[test]
fn non_finite_input_is_rejected() {
    let err = nearest_point_on_polyline(&REACH, GeoPoint::new(f64::NAN, -48.5), 200.0).unwrap_err();
    assert!(matches!(err, ChannelError::InvalidCoordinate { .. }));

    let err = nearest_point_on_polyline(&REACH, REACH[0], f64::NAN).unwrap_err();
    assert!(matches!(err, ChannelError::InvalidThreshold(_)));
}

#[test]
fn result_is_the_global_minimum() {
    let line = barra_bonita();

    for buoy in surveyed_buoys() {
        let snap = nearest_point_on_polyline(&line, buoy.position, 200.0)
            .unwrap()
            .unwrap();

        for pair in line.windows(2) {
            let candidate = project_point_onto_segment(pair[0], pair[1], buoy.position);
            assert!(snap.distance_m <= distance_meters(candidate, buoy.position));
        }

        // Reported distance is the true great-circle one
        assert_eq!(snap.distance_m, distance_meters(snap.point, buoy.position));
    }
}

#[test]
fn snapped_point_stays_within_segment() {
    let line = barra_bonita();
    let queries = [
        GeoPoint::new(-22.4700, -48.5300),
        GeoPoint::new(-22.5300, -48.6000),
        GeoPoint::new(-22.5000, -48.5500),
    ];

    for p in queries {
        let snap = nearest_point_on_polyline(&line, p, 200.0).unwrap().unwrap();
        let a = line[snap.segment];
        let b = line[snap.segment + 1];

        let eps = 1e-9;
        assert!(snap.point.lat >= a.lat.min(b.lat) - eps && snap.point.lat <= a.lat.max(b.lat) + eps);
        assert!(snap.point.lng >= a.lng.min(b.lng) - eps && snap.point.lng <= a.lng.max(b.lng) + eps);
    }
}

#[test]
fn surveyed_buoys_all_snap_to_channel() {
    let channel = Channel::new("Barra Bonita - Jaú", barra_bonita()).unwrap();
    let snapped = channel
        .snap_buoys(&surveyed_buoys(), &SnapConfig::default())
        .unwrap();

    let distances: Vec<_> = snapped.iter().map(|b| b.snap_distance_m()).collect();
    assert_eq!(distances, [Some(8), Some(85), Some(19), Some(7), Some(5)]);

    // A tighter threshold leaves BCV-158 where it was surveyed
    let strict = channel
        .snap_buoys(&surveyed_buoys(), &SnapConfig::new(50.0).unwrap())
        .unwrap();
    assert_eq!(strict[1].placement, Placement::Unsnapped);
    assert_eq!(strict[1].position, strict[1].buoy.position);
    assert_eq!(strict.iter().filter(|b| b.is_snapped()).count(), 4);
}

#[test]
fn snapping_types_are_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Channel>();
    assert_send_sync::<SnapConfig>();
    assert_send_sync::<SnappedBuoy>();
    assert_send_sync::<ReportRegistry>();

    let channel = Channel::new("shared", barra_bonita()).unwrap();
    let buoys = surveyed_buoys();

    let handles: Vec<_> = buoys
        .into_iter()
        .map(|buoy| {
            let channel = channel.clone();
            std::thread::spawn(move || channel.snap_buoy(&buoy, &SnapConfig::default()).unwrap())
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap().is_snapped());
    }
}
