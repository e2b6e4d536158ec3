use anyhow::{Context, Result};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value};
use hidrovia_channel::{Channel, GeoPoint, HazardReport, SnappedBuoy};
use std::path::Path;

/// GeoJSON positions are `[lng, lat]`
fn point_to_geojson(p: GeoPoint) -> Value {
    Value::Point(vec![p.lng, p.lat])
}

fn feature(geometry: Value, properties: serde_json::Map<String, serde_json::Value>) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(geometry)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Create a GeoJSON Feature for the channel centerline
fn channel_to_feature(channel: &Channel) -> Feature {
    let line: Vec<Vec<f64>> = channel.vertices().iter().map(|p| vec![p.lng, p.lat]).collect();

    let mut properties = serde_json::Map::new();
    properties.insert("feature_type".to_string(), serde_json::json!("channel"));
    properties.insert("name".to_string(), serde_json::json!(channel.name()));
    properties.insert("length_m".to_string(), serde_json::json!(channel.length_m().round()));

    feature(Value::LineString(line), properties)
}

/// Create a GeoJSON Feature for a buoy at its placed position
fn buoy_to_feature(snapped: &SnappedBuoy) -> Feature {
    let buoy = &snapped.buoy;

    let mut properties = serde_json::Map::new();
    properties.insert("feature_type".to_string(), serde_json::json!("buoy"));
    properties.insert("id".to_string(), serde_json::json!(buoy.id.as_str()));
    properties.insert("name".to_string(), serde_json::json!(&*buoy.name));
    properties.insert("kind".to_string(), serde_json::json!(buoy.kind.code()));
    properties.insert("condition".to_string(), serde_json::json!(&*buoy.condition));
    properties.insert("good_condition".to_string(), serde_json::json!(buoy.is_in_good_condition()));
    properties.insert("snapped".to_string(), serde_json::json!(snapped.is_snapped()));
    properties.insert("snap_distance_m".to_string(), serde_json::json!(snapped.snap_distance_m()));

    feature(point_to_geojson(snapped.position), properties)
}

fn report_to_feature(report: &HazardReport) -> Feature {
    let mut properties = serde_json::Map::new();
    properties.insert("feature_type".to_string(), serde_json::json!("report"));
    properties.insert("id".to_string(), serde_json::json!(report.id.as_str()));
    properties.insert("kind".to_string(), serde_json::json!(report.kind.code()));
    properties.insert("title".to_string(), serde_json::json!(report.display_title()));
    properties.insert("description".to_string(), serde_json::json!(&*report.description));
    properties.insert("severity".to_string(), serde_json::json!(report.severity.code()));
    properties.insert("confirmations".to_string(), serde_json::json!(report.confirmations));
    properties.insert("updated_at_ms".to_string(), serde_json::json!(report.updated_at_ms));

    feature(point_to_geojson(report.position), properties)
}

fn write_features(features: Vec<Feature>, output_path: &Path) -> Result<()> {
    let feature_collection = FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    };

    let geojson = GeoJson::from(feature_collection);
    let json_string = serde_json::to_string_pretty(&geojson)
        .context("Failed to serialize GeoJSON")?;

    std::fs::write(output_path, json_string)
        .with_context(|| format!("Failed to write GeoJSON to {}", output_path.display()))?;

    Ok(())
}

/// Write the channel line followed by every buoy point
pub fn write_snapped_geojson(
    channel: &Channel,
    buoys: &[SnappedBuoy],
    output_path: &Path,
) -> Result<()> {
    log::info!("Writing channel and {} buoys to {}", buoys.len(), output_path.display());

    let features = std::iter::once(channel_to_feature(channel))
        .chain(buoys.iter().map(buoy_to_feature))
        .collect();

    write_features(features, output_path)
}

pub fn write_reports_geojson(reports: &[HazardReport], output_path: &Path) -> Result<()> {
    log::info!("Writing {} reports to {}", reports.len(), output_path.display());

    write_features(reports.iter().map(report_to_feature).collect(), output_path)
}
