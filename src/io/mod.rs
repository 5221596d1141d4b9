//! IO module for format-specific reading and writing operations.
//!
//! Organized by format rather than by pipeline stage. Stage modules convert
//! their records to and from `DataFrame`s and hand them to `table`.
//!
//! # Format Modules
//!
//! - `csv` - CSV tables and the raw transaction log
//! - `parquet` - Parquet tables
//! - `table` - extension-based dispatch between the two, with atomic writes
//! - `wkb` - Well-Known Binary encoding of route geometries
//! - `geojson` - line features in, route features out
//! - `shp` - line features from shapefiles
//! - `json` - structured reports

pub(crate) mod atomic;
pub(crate) mod csv;
pub(crate) mod geojson;
pub(crate) mod json;
pub(crate) mod lines;
pub(crate) mod parquet;
pub(crate) mod shp;
pub(crate) mod table;
pub(crate) mod wkb;

pub(crate) use lines::{read_line_features, LineFeature};
pub(crate) use table::{read_table, write_table};
