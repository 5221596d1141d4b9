//! Parquet format reading and writing operations.

mod read;
mod write;

pub(crate) use read::*;
pub(crate) use write::*;
