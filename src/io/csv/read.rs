//! CSV reading operations.

use std::{fs::File, path::Path};

use anyhow::{Context, Result};
use polars::{frame::DataFrame, io::SerReader, prelude::CsvReadOptions};

/// Reads a CSV file with a header row into a Polars DataFrame.
/// Every column is read as text so identifiers keep their leading zeros;
/// callers cast numeric columns explicitly.
pub(crate) fn read_csv(path: &Path) -> Result<DataFrame> {
    let file = File::open(path)
        .with_context(|| format!("[io::csv::read] Failed to open CSV file: {}", path.display()))?;
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(file)
        .finish()
        .with_context(|| format!("[io::csv::read] Failed to read CSV from {:?}", path))
}

/// Reads a headerless comma-separated log, keeping only rows with exactly `fields` fields.
/// Returns the kept rows and the number of rows discarded.
pub(crate) fn read_fixed_width_rows(path: &Path, fields: usize) -> Result<(Vec<Vec<String>>, usize)> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("[io::csv::read] Failed to open raw file: {}", path.display()))?;

    let mut rows = Vec::new();
    let mut dropped = 0;
    for record in reader.records() {
        match record {
            Ok(record) if record.len() == fields => {
                rows.push(record.iter().map(|v| v.trim().to_string()).collect());
            }
            Ok(_) => dropped += 1,
            Err(e) if matches!(e.kind(), ::csv::ErrorKind::Utf8 { .. }) => dropped += 1,
            Err(e) => {
                return Err(e).with_context(|| format!("[io::csv::read] Failed to read row from {:?}", path));
            }
        }
    }
    Ok((rows, dropped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn rows_with_wrong_width_are_dropped() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "a,b,c").unwrap();
        writeln!(file, "a,b").unwrap();
        writeln!(file, "d,e,f").unwrap();
        writeln!(file, "a,b,c,d").unwrap();

        let (rows, dropped) = read_fixed_width_rows(file.path(), 3).unwrap();
        assert_eq!(rows, vec![vec!["a", "b", "c"], vec!["d", "e", "f"]]);
        assert_eq!(dropped, 2);
    }

    #[test]
    fn header_csv_keeps_leading_zeros() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "id_tarjeta,lat").unwrap();
        writeln!(file, "0042,-34.6").unwrap();

        let df = read_csv(file.path()).unwrap();
        let ids = df.column("id_tarjeta").unwrap().as_materialized_series().str().unwrap().get(0).map(str::to_string);
        assert_eq!(ids.as_deref(), Some("0042"));
    }
}
