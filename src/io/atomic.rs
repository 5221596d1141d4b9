use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, Seek, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::common::ensure_parent_exists;

/// Write-then-rename wrapper so readers never observe a half-written output.
pub(crate) struct PendingWrite {
    target: PathBuf,
    tmp: Option<NamedTempFile>,
}

impl PendingWrite {
    fn file(&mut self) -> io::Result<&mut NamedTempFile> {
        self.tmp.as_mut().ok_or_else(|| io::Error::other("write already finalized"))
    }
}

/// Open a temporary file next to `target`, creating parent directories as needed.
pub(crate) fn open_for_write(target: &Path) -> Result<PendingWrite> {
    ensure_parent_exists(target)?;
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("[io::atomic] Failed to create temp file in {}", dir.display()))?;

    Ok(PendingWrite { target: target.to_path_buf(), tmp: Some(tmp) })
}

impl Write for PendingWrite {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> { self.file()?.write(buf) }
    fn flush(&mut self) -> io::Result<()> { self.file()?.flush() }
}

impl Seek for PendingWrite {
    fn seek(&mut self, pos: io::SeekFrom) -> io::Result<u64> { self.file()?.as_file_mut().seek(pos) }
}

/// Flush and move the temporary file onto its target.
pub(crate) fn finalize_write(mut pending: PendingWrite) -> Result<()> {
    let tmp = pending.tmp.take().context("[io::atomic] Write already finalized")?;
    tmp.as_file().sync_all().ok(); // best-effort fsync file
    tmp.persist(&pending.target)
        .with_context(|| format!("[io::atomic] Failed to rename into {}", pending.target.display()))?;
    if let Some(dir) = pending.target.parent() {
        let _ = File::open(dir).and_then(|f| f.sync_all());
    }
    Ok(())
}

/// Write `target` atomically through `body`.
pub(crate) fn write_atomically(target: &Path, body: impl FnOnce(&mut PendingWrite) -> Result<()>) -> Result<()> {
    let mut pending = open_for_write(target)?;
    body(&mut pending)?;
    finalize_write(pending)
}
