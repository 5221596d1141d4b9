use anyhow::{Context, Result};
use geo::LineString;
use serde_json::{json, Map, Value};

/// GeoJSON geometry object for a LineString.
pub(crate) fn linestring_to_geojson(line: &LineString<f64>) -> Value {
    let coords = line.coords().map(|c| vec![c.x, c.y]).collect::<Vec<_>>();
    json!({ "type": "LineString", "coordinates": coords })
}

/// Write line features (geometry + properties) as a FeatureCollection.
pub(crate) fn write_lines_to_geojson_bytes(features: &[(&LineString<f64>, Map<String, Value>)]) -> Result<Vec<u8>> {
    let features = features.iter()
        .map(|(line, properties)| json!({
            "type": "Feature",
            "geometry": linestring_to_geojson(line),
            "properties": properties,
        }))
        .collect::<Vec<_>>();

    let feature_collection = json!({
        "type": "FeatureCollection",
        "features": features,
    });

    serde_json::to_vec(&feature_collection).context("[io::geojson::write] Failed to serialize GeoJSON to bytes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::geojson::parse_geojson_lines;

    #[test]
    fn written_routes_read_back_as_lines() {
        let line = LineString::from(vec![(-58.4, -34.6), (-58.3, -34.5)]);
        let mut props = Map::new();
        props.insert("id_tarjeta".into(), json!("X"));

        let bytes = write_lines_to_geojson_bytes(&[(&line, props)]).unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        let features = parse_geojson_lines(&value).unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].lines[0], line);
        assert_eq!(features[0].attr("id_tarjeta"), Some("X"));
    }
}
