//! Well-Known Binary encoding for route geometries (LineString only).

mod read;
mod write;

pub(crate) use read::*;
pub(crate) use write::*;

/// WKB geometry type for LineString
const WKB_LINESTRING: u32 = 2;
/// WKB byte order: little endian
const WKB_LE: u8 = 1;
