use anyhow::{bail, Context, Result};
use geo::LineString;
use geojson::GeoJson;
use hidrovia_channel::{Buoy, Channel};
use std::path::Path;

/// Read a channel centerline from a GeoJSON file.
///
/// The first LineString found (bare geometry, Feature, or inside a
/// FeatureCollection) is used. A `name` property on the feature names the
/// channel, otherwise the file stem does.
pub fn read_channel(path: &Path) -> Result<Channel> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read channel file: {}", path.display()))?;

    let geojson: GeoJson = content
        .parse()
        .with_context(|| format!("Failed to parse GeoJSON from: {}", path.display()))?;

    let fallback_name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "channel".to_string());

    let (name, line) = extract_line_from_geojson(geojson)
        .with_context(|| format!("No valid LineString found in: {}", path.display()))?;

    let channel = Channel::from_line_string(name.unwrap_or(fallback_name), &line)
        .with_context(|| format!("Invalid channel geometry in: {}", path.display()))?;

    log::debug!(
        "Channel '{}': {} vertices, {:.0} m",
        channel.name(),
        channel.vertices().len(),
        channel.length_m()
    );
    Ok(channel)
}

/// Extract a line (and optional feature name) from various GeoJSON structures
fn extract_line_from_geojson(geojson: GeoJson) -> Result<(Option<String>, LineString<f64>)> {
    match geojson {
        GeoJson::Geometry(geom) => Ok((None, geometry_to_line(geom.value)?)),
        GeoJson::Feature(feature) => feature_to_line(feature),
        GeoJson::FeatureCollection(fc) => {
            for feature in fc.features {
                if let Ok(found) = feature_to_line(feature) {
                    return Ok(found);
                }
            }
            bail!("No LineString found in FeatureCollection")
        }
    }
}

fn feature_to_line(feature: geojson::Feature) -> Result<(Option<String>, LineString<f64>)> {
    let name = feature
        .property("name")
        .and_then(|v| v.as_str())
        .map(str::to_string);

    match feature.geometry {
        Some(geom) => Ok((name, geometry_to_line(geom.value)?)),
        None => bail!("Feature has no geometry"),
    }
}

/// Convert a GeoJSON geometry value to a geo LineString
fn geometry_to_line(value: geojson::Value) -> Result<LineString<f64>> {
    match value {
        geojson::Value::LineString(positions) => {
            let coords = positions
                .iter()
                .map(|pos| match pos.as_slice() {
                    [x, y, ..] => Ok(geo::Coord { x: *x, y: *y }),
                    _ => bail!("Position has fewer than two coordinates"),
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(LineString::new(coords))
        }
        _ => bail!("Expected a LineString geometry"),
    }
}

/// Read buoys from a JSON array
pub fn read_buoys(path: &Path) -> Result<Vec<Buoy>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read buoy file: {}", path.display()))?;

    let buoys: Vec<Buoy> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse buoys from: {}", path.display()))?;

    log::debug!("Read {} buoys from {}", buoys.len(), path.display());
    Ok(buoys)
}
