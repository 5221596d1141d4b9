use std::path::Path;

use ahash::AHashMap;
use anyhow::{bail, Result};
use geo::LineString;

use super::{geojson, shp};

/// A line (or multi-line) feature with its attributes rendered as text.
#[derive(Debug, Clone, Default)]
pub(crate) struct LineFeature {
    pub(crate) attrs: AHashMap<String, String>,
    pub(crate) lines: Vec<LineString<f64>>,
}

impl LineFeature {
    /// Attribute value by name, if present and non-empty.
    pub(crate) fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str).filter(|v| !v.is_empty())
    }
}

/// Read line features from a `.shp` or `.geojson` file. Non-line geometries are skipped.
pub(crate) fn read_line_features(path: &Path) -> Result<Vec<LineFeature>> {
    match path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref() {
        Some("shp") => shp::read_shapefile_lines(path),
        Some("geojson") | Some("json") => geojson::read_geojson_lines(path),
        _ => bail!("[io::lines] Unsupported line file: {} (expected .shp or .geojson)", path.display()),
    }
}
