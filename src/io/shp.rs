use std::path::Path;

use ahash::AHashMap;
use anyhow::{Context, Result};
use geo::{Coord, LineString};
use shapefile::{dbase::FieldValue, Reader, Shape};

use super::LineFeature;

/// Render a dBase field as text, or `None` when it is empty.
fn field_to_string(value: FieldValue) -> Option<String> {
    match value {
        FieldValue::Character(v) => v,
        FieldValue::Memo(v) => Some(v),
        FieldValue::Numeric(v) => v.map(|x| x.to_string()),
        FieldValue::Float(v) => v.map(|x| x.to_string()),
        FieldValue::Double(x) => Some(x.to_string()),
        FieldValue::Integer(x) => Some(x.to_string()),
        FieldValue::Logical(v) => v.map(|x| x.to_string()),
        _ => None,
    }
}

fn parts_to_lines<P>(parts: &[Vec<P>], xy: impl Fn(&P) -> (f64, f64)) -> Vec<LineString<f64>> {
    parts.iter()
        .filter(|part| part.len() >= 2)
        .map(|part| LineString::from(part.iter().map(|p| { let (x, y) = xy(p); Coord { x, y } }).collect::<Vec<_>>()))
        .collect()
}

/// Reads all polyline shapes + attribute records from a given `.shp` file path.
pub(crate) fn read_shapefile_lines(path: &Path) -> Result<Vec<LineFeature>> {
    let mut reader = Reader::from_path(path)
        .with_context(|| format!("[io::shp] Failed to open shapefile: {}", path.display()))?;

    let mut features = Vec::new();
    for result in reader.iter_shapes_and_records() {
        let (shape, record) = result.context("[io::shp] Error reading shape+record")?;
        let lines = match shape {
            Shape::Polyline(p) => parts_to_lines(p.parts(), |pt| (pt.x, pt.y)),
            Shape::PolylineM(p) => parts_to_lines(p.parts(), |pt| (pt.x, pt.y)),
            Shape::PolylineZ(p) => parts_to_lines(p.parts(), |pt| (pt.x, pt.y)),
            _ => continue,
        };
        if lines.is_empty() { continue }

        let attrs = record.into_iter()
            .filter_map(|(name, value)| field_to_string(value).map(|v| (name, v)))
            .collect::<AHashMap<_, _>>();
        features.push(LineFeature { attrs, lines });
    }
    Ok(features)
}
