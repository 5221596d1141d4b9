use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use geo::{LineString, MultiLineString};
use regex::{Regex, RegexBuilder};

use crate::geom::crosses;
use crate::io::{read_line_features, LineFeature};

/// A named rail corridor.
#[derive(Debug, Clone, PartialEq)]
pub struct Barrier {
    pub name: String,
    pub geometry: MultiLineString<f64>,
}

impl Barrier {
    /// Name of the route-table column flagging crossings of this barrier.
    #[inline] pub fn column(&self) -> String { crossing_column(&self.name) }

    #[inline] pub fn crossed_by(&self, route: &LineString<f64>) -> bool { crosses(route, &self.geometry) }
}

/// `cruza_<name>`, lowercased with spaces as underscores.
pub fn crossing_column(name: &str) -> String {
    format!("cruza_{}", name.to_lowercase().replace(' ', "_"))
}

/// Group features into barriers by `name_field`, sorted by name.
///
/// Features lacking the field are dropped, unless no feature has it, in which case each
/// feature becomes `barrera_<i>`. With a `filter`, only matching names are kept; if none
/// match, every barrier is kept.
fn group_barriers(features: &[LineFeature], name_field: &str, filter: Option<&Regex>) -> Vec<Barrier> {
    let barriers = if features.iter().any(|f| f.attr(name_field).is_some()) {
        let mut groups: BTreeMap<String, Vec<LineString<f64>>> = BTreeMap::new();
        for feature in features {
            let Some(name) = feature.attr(name_field) else { continue };
            groups.entry(name.to_string()).or_default().extend(feature.lines.iter().cloned());
        }
        groups.into_iter()
            .map(|(name, lines)| Barrier { name, geometry: MultiLineString::new(lines) })
            .collect::<Vec<_>>()
    } else {
        log::debug!("[barrier::load] No '{name_field}' attribute; naming barriers by position");
        features.iter().enumerate()
            .map(|(i, f)| Barrier { name: format!("barrera_{i}"), geometry: MultiLineString::new(f.lines.clone()) })
            .collect()
    };

    let Some(filter) = filter else { return barriers };
    let selected = barriers.iter().filter(|b| filter.is_match(&b.name)).cloned().collect::<Vec<_>>();
    if selected.is_empty() {
        log::warn!("[barrier::load] No barrier matches '{}'; using all {} lines", filter.as_str(), barriers.len());
        return barriers;
    }
    selected
}

/// Load barriers from a `.shp` or `.geojson` file.
/// `filter` is a case-insensitive regular expression over barrier names.
pub fn load_barriers(path: &Path, name_field: &str, filter: Option<&str>) -> Result<Vec<Barrier>> {
    let filter = filter
        .map(|pattern| RegexBuilder::new(pattern).case_insensitive(true).build()
            .with_context(|| format!("[barrier::load] Invalid barrier filter '{pattern}'")))
        .transpose()?;

    let barriers = group_barriers(&read_line_features(path)?, name_field, filter.as_ref());
    log::info!(
        "[barrier::load] {} barriers from {}: {}",
        barriers.len(), path.display(),
        barriers.iter().map(|b| b.name.as_str()).collect::<Vec<_>>().join(", ")
    );
    Ok(barriers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::AHashMap;

    fn feature(name: Option<&str>, x: f64) -> LineFeature {
        let mut attrs = AHashMap::new();
        if let Some(name) = name { attrs.insert("Linea".to_string(), name.to_string()); }
        LineFeature { attrs, lines: vec![LineString::from(vec![(x, 0.0), (x + 1.0, 0.0)])] }
    }

    fn names(barriers: &[Barrier]) -> Vec<&str> {
        barriers.iter().map(|b| b.name.as_str()).collect()
    }

    #[test]
    fn features_group_by_name() {
        let features = [feature(Some("Sarmiento"), 0.0), feature(Some("Mitre"), 1.0), feature(Some("Sarmiento"), 2.0)];
        let barriers = group_barriers(&features, "Linea", None);
        assert_eq!(names(&barriers), vec!["Mitre", "Sarmiento"]);
        assert_eq!(barriers[1].geometry.0.len(), 2);
    }

    #[test]
    fn unnamed_features_get_positional_names() {
        let features = [feature(None, 0.0), feature(None, 1.0)];
        assert_eq!(names(&group_barriers(&features, "Linea", None)), vec!["barrera_0", "barrera_1"]);
    }

    #[test]
    fn filter_is_case_insensitive() {
        let features = [feature(Some("SARMIENTO"), 0.0), feature(Some("Mitre"), 1.0)];
        let filter = RegexBuilder::new("sarmiento").case_insensitive(true).build().unwrap();
        assert_eq!(names(&group_barriers(&features, "Linea", Some(&filter))), vec!["SARMIENTO"]);
    }

    #[test]
    fn empty_filter_result_keeps_everything() {
        let features = [feature(Some("Roca"), 0.0), feature(Some("Mitre"), 1.0)];
        let filter = Regex::new("(?i)sarmiento").unwrap();
        assert_eq!(names(&group_barriers(&features, "Linea", Some(&filter))), vec!["Mitre", "Roca"]);
    }

    #[test]
    fn column_names_are_slugged() {
        assert_eq!(crossing_column("San Martin"), "cruza_san_martin");
    }

    #[test]
    fn loads_from_geojson() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trenes.geojson");
        std::fs::write(&path, r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{"Linea":"Sarmiento"},
             "geometry":{"type":"LineString","coordinates":[[-58.5,-34.6],[-58.4,-34.6]]}},
            {"type":"Feature","properties":{"Linea":"Mitre"},
             "geometry":{"type":"MultiLineString","coordinates":[[[-58.5,-34.5],[-58.4,-34.5]]]}}
        ]}"#).unwrap();
        let barriers = load_barriers(&path, "Linea", Some("sarm")).unwrap();
        assert_eq!(names(&barriers), vec!["Sarmiento"]);
        assert!(barriers[0].crossed_by(&LineString::from(vec![(-58.45, -34.7), (-58.45, -34.5)])));
    }
}
