use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex::Regex;
use walkdir::WalkDir;

use crate::barrier::{load_barriers, score_all, NullRun};
use crate::cli::{Cli, ScoreArgs};
use crate::common::require_input;
use crate::io::json::write_json;
use crate::io::read_table;
use crate::route::{routes_from_frame, Route};

/// Files directly inside `dir` whose name matches `pattern`, sorted.
fn discover_nulls(dir: &Path, pattern: &Regex) -> Vec<PathBuf> {
    if !dir.is_dir() { return Vec::new() }
    let mut paths = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.file_name().to_str().is_some_and(|name| pattern.is_match(name)))
        .map(|entry| entry.into_path())
        .collect::<Vec<_>>();
    paths.sort();
    paths
}

fn run_id(path: &Path) -> String {
    path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_else(|| path.display().to_string())
}

/// Pair each null collection with its run id. The same file reached twice counts once; two files sharing an id are an error.
fn null_runs(paths: impl IntoIterator<Item = PathBuf>) -> Result<Vec<(String, PathBuf)>> {
    let mut runs: Vec<(String, PathBuf, PathBuf)> = Vec::new();
    for path in paths {
        require_input(&path, "Run `transit-barrier route` on the null OD table first.")?;
        let canonical = path.canonicalize()
            .with_context(|| format!("[score] Failed to resolve {}", path.display()))?;
        if runs.iter().any(|(_, _, seen)| *seen == canonical) { continue }

        let id = run_id(&path);
        if let Some((_, other, _)) = runs.iter().find(|(seen, _, _)| *seen == id) {
            anyhow::bail!(
                "Null runs {} and {} share the id '{id}'. Rename one of them.",
                other.display(), path.display()
            );
        }
        runs.push((id, path, canonical));
    }
    Ok(runs.into_iter().map(|(id, path, _)| (id, path)).collect())
}

fn load_routes(path: &Path, table: &str) -> Result<Vec<Route>> {
    routes_from_frame(&read_table(path)?, table)
}

pub fn run(_cli: &Cli, args: &ScoreArgs) -> Result<()> {
    require_input(&args.obs, "Run `transit-barrier route` first.")?;
    require_input(&args.barriers, "Place the rail lines there or pass --barriers.")?;

    let pattern = Regex::new(&args.null_pattern)
        .with_context(|| format!("[score] Invalid null pattern '{}'", args.null_pattern))?;
    let runs = null_runs(args.nulls.iter().cloned().chain(discover_nulls(&args.null_dir, &pattern)))?;
    if runs.is_empty() {
        anyhow::bail!(
            "No null route collections in {} matching {}. Run `transit-barrier route` on the null OD table first.",
            args.null_dir.display(), args.null_pattern
        );
    }

    let real = load_routes(&args.obs, "observed routes")?;
    let nulls = runs.into_iter()
        .map(|(id, path)| Ok(NullRun { id, routes: load_routes(&path, "null routes")? }))
        .collect::<Result<Vec<_>>>()?;
    log::info!("[score] {} observed routes, {} null runs", real.len(), nulls.len());

    let barriers = load_barriers(&args.barriers, &args.name_field, args.barrier_filter.as_deref())?;
    let (global, directional) = score_all(&real, &nulls, &barriers);

    write_json(&global, &args.out_global)?;
    write_json(&directional, &args.out_directional)?;

    log::info!("[score] Wrote {} and {}", args.out_global.display(), args.out_directional.display());
    Ok(())
}
