use std::path::Path;

use anyhow::Result;

use crate::io::csv::read_fixed_width_rows;

use super::{SwipeRecord, RAW_COLUMNS};

/// Filters applied by the cleaner.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanParams {
    /// Fare category kept (11 = primary student).
    pub fare_code: i64,
    /// Inclusive latitude range of the metro area.
    pub lat_range: (f64, f64),
    /// Inclusive longitude range of the metro area.
    pub lon_range: (f64, f64),
}

impl Default for CleanParams {
    fn default() -> Self {
        Self { fare_code: 11, lat_range: (-35.5, -34.0), lon_range: (-59.5, -57.0) }
    }
}

/// Row accounting for one cleaning run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanOutcome {
    pub records: Vec<SwipeRecord>,
    /// Rows discarded for not having exactly 13 fields.
    pub malformed: usize,
    /// Well-formed rows removed by the fare, coordinate or bounding-box filters.
    pub filtered: usize,
}

fn text(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|x| x.is_finite())
}

fn integer(value: &str) -> Option<i64> {
    number(value).filter(|x| x.fract() == 0.0).map(|x| x as i64)
}

/// Type one raw row and apply the cleaning filters. `None` means the row is dropped.
fn clean_row(row: &[String], params: &CleanParams) -> Option<SwipeRecord> {
    if row.len() != RAW_COLUMNS.len() { return None }

    let id_tarifa = integer(&row[11]);
    if id_tarifa != Some(params.fare_code) { return None }

    let id_tarjeta = text(&row[1])?;
    let lat = number(&row[3])?;
    let lon = number(&row[4])?;
    let (lat_min, lat_max) = params.lat_range;
    let (lon_min, lon_max) = params.lon_range;
    if !(lat_min..=lat_max).contains(&lat) || !(lon_min..=lon_max).contains(&lon) { return None }

    Some(SwipeRecord {
        id: text(&row[0]),
        id_tarjeta,
        modo: text(&row[2]),
        lat,
        lon,
        sexo: text(&row[5]),
        interno_bus: text(&row[6]),
        tipo_trx_tren: text(&row[7]),
        etapa_red_sube: integer(&row[8]),
        id_linea: text(&row[9]),
        id_ramal: text(&row[10]),
        id_tarifa,
        hora: number(&row[12]),
    })
}

/// Clean already-split raw rows, preserving input order.
pub fn clean_records(rows: &[Vec<String>], params: &CleanParams) -> Vec<SwipeRecord> {
    rows.iter().filter_map(|row| clean_row(row, params)).collect()
}

/// Read the raw transaction log and clean it.
pub fn read_raw_swipes(path: &Path, params: &CleanParams) -> Result<CleanOutcome> {
    let (rows, malformed) = read_fixed_width_rows(path, RAW_COLUMNS.len())?;
    let records = clean_records(&rows, params);
    let filtered = rows.len() - records.len();
    Ok(CleanOutcome { records, malformed, filtered })
}
