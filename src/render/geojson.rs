use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::MapOverlay;
use crate::domain::Coordinate;

fn positions(coords: &[Coordinate]) -> Vec<[f64; 2]> {
    coords.iter().map(Coordinate::position).collect()
}

/// Describe the overlay as a GeoJSON `FeatureCollection`
///
/// Fills become `Polygon` features, the drawing preview a `LineString` and
/// each marker a `Point`. The `layer` property tells them apart.
pub fn feature_collection(overlay: &MapOverlay) -> Value {
    let mut features = Vec::new();

    for fill in &overlay.fills {
        features.push(json!({
            "type": "Feature",
            "id": fill.id,
            "properties": { "layer": "fill", "fillColor": fill.fill_color },
            "geometry": { "type": "Polygon", "coordinates": [positions(&fill.ring)] },
        }));
    }

    if let Some(strip) = &overlay.line_strip {
        features.push(json!({
            "type": "Feature",
            "id": "drawing-preview",
            "properties": { "layer": "preview" },
            "geometry": { "type": "LineString", "coordinates": positions(strip) },
        }));
    }

    for marker in &overlay.markers {
        features.push(json!({
            "type": "Feature",
            "id": marker.id,
            "properties": { "layer": "marker", "color": super::overlay::MARKER_COLOR },
            "geometry": { "type": "Point", "coordinates": marker.coordinate.position() },
        }));
    }

    let camera = &overlay.camera;
    let duration_ms = u64::try_from(camera.animation_duration.as_millis()).unwrap_or(u64::MAX);
    json!({
        "type": "FeatureCollection",
        "features": features,
        "camera": {
            "centerCoordinate": camera.center.position(),
            "zoomLevel": camera.zoom,
            "animationDuration": duration_ms,
            "animationMode": camera.mode.as_str(),
        },
        "gestures": {
            "scrollEnabled": overlay.gestures.scroll_enabled,
            "zoomEnabled": overlay.gestures.zoom_enabled,
        },
    })
}

pub fn write_geojson(path: &Path, overlay: &MapOverlay) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create GeoJSON file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, &feature_collection(overlay))
        .context("Failed to serialize overlay")?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    Ok(())
}
