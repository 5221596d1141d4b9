//! Parquet writing operations.

use std::io::Write;

use anyhow::{Context, Result};
use polars::{frame::DataFrame, prelude::ParquetWriter};

/// Write a DataFrame as Parquet.
pub(crate) fn write_parquet<W: Write>(df: &mut DataFrame, sink: W) -> Result<()> {
    ParquetWriter::new(sink)
        .finish(df)
        .context("[io::parquet::write] Failed to write Parquet")?;
    Ok(())
}
