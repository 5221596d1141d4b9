//! Tabular store: one entry point per direction, format chosen by file extension.

use std::path::Path;

use anyhow::{bail, Result};
use polars::frame::DataFrame;

use super::{atomic::write_atomically, csv, parquet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableFormat { Csv, Parquet }

fn format_of(path: &Path) -> Result<TableFormat> {
    match path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref() {
        Some("parquet") => Ok(TableFormat::Parquet),
        Some("csv") => Ok(TableFormat::Csv),
        _ => bail!("[io::table] Unsupported table extension: {} (expected .parquet or .csv)", path.display()),
    }
}

/// Read a table from a `.parquet` or `.csv` file.
pub(crate) fn read_table(path: &Path) -> Result<DataFrame> {
    match format_of(path)? {
        TableFormat::Parquet => parquet::read_parquet(path),
        TableFormat::Csv => csv::read_csv(path),
    }
}

/// Write a table to a `.parquet` or `.csv` file, replacing it atomically.
pub(crate) fn write_table(df: &mut DataFrame, path: &Path) -> Result<()> {
    let format = format_of(path)?;
    write_atomically(path, |sink| match format {
        TableFormat::Parquet => parquet::write_parquet(df, sink),
        TableFormat::Csv => csv::write_csv(df, sink),
    })
}
