use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use super::atomic::write_atomically;

/// Write a serializable value as pretty-printed JSON, replacing `path` atomically.
pub(crate) fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    write_atomically(path, |sink| {
        let mut writer = BufWriter::new(sink);
        serde_json::to_writer_pretty(&mut writer, value)
            .with_context(|| format!("[io::json] Failed to write JSON to {:?}", path))?;
        writer.flush().with_context(|| format!("[io::json] Failed to flush {:?}", path))
    })
}

/// Write raw bytes, replacing `path` atomically.
pub(crate) fn write_bytes(bytes: &[u8], path: &Path) -> Result<()> {
    write_atomically(path, |sink| {
        sink.write_all(bytes)
            .with_context(|| format!("[io::json] Failed to write {:?}", path))
    })
}
