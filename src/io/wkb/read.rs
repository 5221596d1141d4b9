//! WKB reading operations.

use std::io::{Cursor, Read};

use anyhow::{bail, Context, Result};
use geo::{Coord, LineString};

use super::{WKB_LE, WKB_LINESTRING};

fn read_u32(cursor: &mut Cursor<&[u8]>, is_le: bool) -> Result<u32> {
    let mut bytes = [0u8; 4];
    cursor.read_exact(&mut bytes)?;
    Ok(if is_le { u32::from_le_bytes(bytes) } else { u32::from_be_bytes(bytes) })
}

fn read_f64(cursor: &mut Cursor<&[u8]>, is_le: bool) -> Result<f64> {
    let mut bytes = [0u8; 8];
    cursor.read_exact(&mut bytes)?;
    Ok(if is_le { f64::from_le_bytes(bytes) } else { f64::from_be_bytes(bytes) })
}

/// Decode a LineString from WKB of either byte order.
pub(crate) fn linestring_from_wkb(wkb: &[u8]) -> Result<LineString<f64>> {
    let mut cursor = Cursor::new(wkb);

    let mut byte_order = [0u8; 1];
    cursor.read_exact(&mut byte_order)
        .context("[io::wkb::read] Failed to read byte order")?;
    let is_le = byte_order[0] == WKB_LE;

    let geom_type = read_u32(&mut cursor, is_le)
        .context("[io::wkb::read] Failed to read geometry type")?;
    if geom_type != WKB_LINESTRING {
        bail!("[io::wkb::read] Expected LineString geometry type, got {}", geom_type);
    }

    let len = read_u32(&mut cursor, is_le)
        .context("[io::wkb::read] Failed to read point count")?;
    let remaining = wkb.len().saturating_sub(cursor.position() as usize) / 16;
    if len as usize > remaining {
        bail!("[io::wkb::read] Point count {} exceeds the {} points left in the buffer", len, remaining);
    }
    let mut coords = Vec::with_capacity(len as usize);
    for _ in 0..len {
        let x = read_f64(&mut cursor, is_le).context("[io::wkb::read] Failed to read x coordinate")?;
        let y = read_f64(&mut cursor, is_le).context("[io::wkb::read] Failed to read y coordinate")?;
        coords.push(Coord { x, y });
    }
    Ok(LineString::from(coords))
}

/// Decode a LineString from hex WKB.
pub(crate) fn linestring_from_hex(text: &str) -> Result<LineString<f64>> {
    let bytes = hex::decode(text.trim())
        .context("[io::wkb::read] Geometry is not valid hex")?;
    linestring_from_wkb(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::wkb::{linestring_to_hex, linestring_to_wkb};

    #[test]
    fn hex_round_trip_keeps_vertices() {
        let line = LineString::from(vec![(-58.45, -34.61), (-58.44, -34.60), (-58.43, -34.58)]);
        assert_eq!(linestring_from_hex(&linestring_to_hex(&line)).unwrap(), line);
    }

    #[test]
    fn big_endian_is_accepted() {
        let mut wkb = vec![0u8];
        wkb.extend_from_slice(&2u32.to_be_bytes());
        wkb.extend_from_slice(&1u32.to_be_bytes());
        wkb.extend_from_slice(&1.5f64.to_be_bytes());
        wkb.extend_from_slice(&(-2.5f64).to_be_bytes());
        let line = linestring_from_wkb(&wkb).unwrap();
        assert_eq!(line.0, vec![Coord { x: 1.5, y: -2.5 }]);
    }

    #[test]
    fn polygon_type_is_rejected() {
        let mut wkb = linestring_to_wkb(&LineString::from(vec![(0.0, 0.0)]));
        wkb[1] = 3;
        assert!(linestring_from_wkb(&wkb).is_err());
    }

    #[test]
    fn truncated_input_is_an_error() {
        let wkb = linestring_to_wkb(&LineString::from(vec![(0.0, 0.0), (1.0, 1.0)]));
        assert!(linestring_from_wkb(&wkb[..wkb.len() - 4]).is_err());
    }

    #[test]
    fn oversized_point_count_is_an_error() {
        let err = linestring_from_hex("0102000000ffffffff").unwrap_err();
        assert!(err.to_string().contains("Point count"));
    }
}
