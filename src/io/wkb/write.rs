//! WKB writing operations.

use geo::LineString;

use super::{WKB_LE, WKB_LINESTRING};

/// Encode a LineString as little-endian WKB.
pub(crate) fn linestring_to_wkb(line: &LineString<f64>) -> Vec<u8> {
    let mut wkb = Vec::with_capacity(9 + 16 * line.0.len());
    wkb.push(WKB_LE);
    wkb.extend_from_slice(&WKB_LINESTRING.to_le_bytes());
    wkb.extend_from_slice(&(line.0.len() as u32).to_le_bytes());
    for coord in line.coords() {
        wkb.extend_from_slice(&coord.x.to_le_bytes());
        wkb.extend_from_slice(&coord.y.to_le_bytes());
    }
    wkb
}

/// Encode a LineString as hex WKB, the text form stored in route tables.
pub(crate) fn linestring_to_hex(line: &LineString<f64>) -> String {
    hex::encode(linestring_to_wkb(line))
}
