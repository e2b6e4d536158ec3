//! Built-in survey of the Barra Bonita -> Jaú reach of the Tietê waterway.
//!
//! Centerline and buoy positions are approximations; buoys are expected to
//! be snapped onto the channel before display.

use hidrovia_channel::{Buoy, BuoyIdentifier, BuoyKind, Channel, GeoPoint};

pub const CHANNEL_NAME: &str = "Barra Bonita - Jaú";

const CENTERLINE: [(f64, f64); 7] = [
    (-22.4750, -48.5400),
    (-22.4855, -48.5485),
    (-22.4949, -48.5581),
    (-22.5018, -48.5655),
    (-22.5085, -48.5740),
    (-22.5155, -48.5825),
    (-22.5250, -48.5930),
];

// (id, name, kind, condition, lat, lng)
const BUOYS: [(&str, &str, BuoyKind, &str, f64, f64); 5] = [
    ("BCE-155", "BCE-155", BuoyKind::Port, "Boa", -22.4945, -48.5578),
    ("BCV-158", "BCV-158", BuoyKind::Starboard, "Boa", -22.5010, -48.5658),
    ("BCV-158A", "BCV-158A", BuoyKind::Starboard, "Boa", -22.5082, -48.5739),
    ("B-BB-10", "BB-10", BuoyKind::Port, "Boa", -22.5150, -48.5820),
    ("B-ESP-01", "ESP-01", BuoyKind::Special, "Boa", -22.4852, -48.5482),
];

pub fn channel() -> anyhow::Result<Channel> {
    let vertices = CENTERLINE.iter().map(|&p| GeoPoint::from(p)).collect();
    Ok(Channel::new(CHANNEL_NAME, vertices)?)
}

pub fn buoys() -> Vec<Buoy> {
    BUOYS
        .iter()
        .map(|&(id, name, kind, condition, lat, lng)| Buoy {
            id: BuoyIdentifier::new(id),
            name: name.into(),
            kind,
            condition: condition.into(),
            position: GeoPoint::new(lat, lng),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hidrovia_channel::SnapConfig;

    #[test]
    fn test_builtin_buoys_snap() {
        let channel = channel().unwrap();
        assert_eq!(channel.segment_count(), 6);

        let snapped = channel.snap_buoys(&buoys(), &SnapConfig::default()).unwrap();
        assert!(snapped.iter().all(|b| b.is_snapped()));
    }
}
