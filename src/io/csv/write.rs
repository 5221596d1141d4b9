//! CSV writing operations.

use std::io::Write;

use anyhow::{Context, Result};
use polars::{frame::DataFrame, io::SerWriter, prelude::CsvWriter};

/// Write a DataFrame as CSV with a header row.
pub(crate) fn write_csv<W: Write>(df: &mut DataFrame, sink: W) -> Result<()> {
    CsvWriter::new(sink)
        .include_header(true)
        .finish(df)
        .context("[io::csv::write] Failed to write CSV")
}
