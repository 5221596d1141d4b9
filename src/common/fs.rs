use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::PipelineError;

/// Create the directory if it doesn’t exist; error if a non-directory exists there.
pub(crate) fn ensure_dir_exists(path: &Path) -> Result<()> {
    if path.exists() {
        if !path.is_dir() {
            anyhow::bail!("Path exists but is not a directory: {}", path.display());
        }
    } else {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {}", path.display()))?;
    }
    Ok(())
}

/// Create the parent directory of `path` if it has one.
pub(crate) fn ensure_parent_exists(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_dir_exists(parent),
        _ => Ok(()),
    }
}

/// Error unless the input file exists. `hint` says how to produce it.
pub(crate) fn require_input(path: &Path, hint: &str) -> Result<(), PipelineError> {
    if path.is_file() { return Ok(()) }
    Err(PipelineError::MissingInput { path: path.to_path_buf(), hint: hint.to_string() })
}
