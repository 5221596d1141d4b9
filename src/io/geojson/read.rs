use std::{fs::File, io::BufReader, path::Path};

use ahash::AHashMap;
use anyhow::{anyhow, Context, Result};
use geo::{Coord, LineString};
use serde_json::Value;

use crate::io::LineFeature;

/// Parse a GeoJSON position array into a coordinate.
fn parse_coord(value: &Value) -> Result<Coord<f64>> {
    let pair = value.as_array()
        .filter(|a| a.len() >= 2)
        .ok_or_else(|| anyhow!("[io::geojson::read] Invalid position: {value}"))?;
    let x = pair[0].as_f64().ok_or_else(|| anyhow!("[io::geojson::read] Invalid coordinate: x must be a number"))?;
    let y = pair[1].as_f64().ok_or_else(|| anyhow!("[io::geojson::read] Invalid coordinate: y must be a number"))?;
    Ok(Coord { x, y })
}

/// Parse a LineString coordinate array: [[x, y], [x, y], ...]
fn parse_line(value: &Value) -> Result<LineString<f64>> {
    let coords = value.as_array()
        .ok_or_else(|| anyhow!("[io::geojson::read] LineString coordinates must be an array"))?;
    Ok(LineString(coords.iter().map(parse_coord).collect::<Result<Vec<_>>>()?))
}

/// Lines of a geometry object; other geometry types yield nothing.
fn geometry_lines(geometry: &Value) -> Result<Vec<LineString<f64>>> {
    let coords = &geometry["coordinates"];
    match geometry["type"].as_str() {
        Some("LineString") => Ok(vec![parse_line(coords)?]),
        Some("MultiLineString") => coords.as_array()
            .ok_or_else(|| anyhow!("[io::geojson::read] MultiLineString coordinates must be an array"))?
            .iter()
            .map(parse_line)
            .collect(),
        Some("GeometryCollection") => {
            let mut lines = Vec::new();
            for inner in geometry["geometries"].as_array().into_iter().flatten() {
                lines.extend(geometry_lines(inner)?);
            }
            Ok(lines)
        }
        _ => Ok(Vec::new()),
    }
}

fn property_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Parse line features from a GeoJSON FeatureCollection value.
pub(crate) fn parse_geojson_lines(value: &Value) -> Result<Vec<LineFeature>> {
    let features = value["features"].as_array()
        .ok_or_else(|| anyhow!("[io::geojson::read] Expected a FeatureCollection"))?;

    let mut out = Vec::with_capacity(features.len());
    for feature in features {
        let lines = geometry_lines(&feature["geometry"])?
            .into_iter()
            .filter(|line| line.0.len() >= 2)
            .collect::<Vec<_>>();
        if lines.is_empty() { continue }

        let attrs = feature["properties"].as_object()
            .map(|props| props.iter()
                .filter_map(|(k, v)| property_to_string(v).map(|v| (k.clone(), v)))
                .collect::<AHashMap<_, _>>())
            .unwrap_or_default();
        out.push(LineFeature { attrs, lines });
    }
    Ok(out)
}

/// Read line features from a GeoJSON file.
pub(crate) fn read_geojson_lines(path: &Path) -> Result<Vec<LineFeature>> {
    let file = File::open(path)
        .with_context(|| format!("[io::geojson::read] Failed to open GeoJSON file: {}", path.display()))?;
    let value: Value = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("[io::geojson::read] Failed to parse GeoJSON from {:?}", path))?;
    parse_geojson_lines(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lines_and_properties_are_read() {
        let value = json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {"Linea": "Sarmiento", "id": 3, "nota": null},
                    "geometry": {"type": "MultiLineString", "coordinates": [[[0, 0], [1, 0]], [[1, 0], [2, 1]]]}
                },
                {
                    "type": "Feature",
                    "properties": {"Linea": "Estacion"},
                    "geometry": {"type": "Point", "coordinates": [0, 0]}
                }
            ]
        });
        let features = parse_geojson_lines(&value).unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].lines.len(), 2);
        assert_eq!(features[0].attr("Linea"), Some("Sarmiento"));
        assert_eq!(features[0].attr("id"), Some("3"));
        assert_eq!(features[0].attr("nota"), None);
    }

    #[test]
    fn non_collection_is_rejected() {
        assert!(parse_geojson_lines(&json!({"type": "Feature"})).is_err());
    }
}
