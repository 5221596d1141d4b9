use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::barrier::load_barriers;
use crate::cli::{Cli, RouteArgs};
use crate::common::require_input;
use crate::geom::Position;
use crate::io::json::write_bytes;
use crate::io::{read_table, write_table};
use crate::od::{pairs_from_frame, OdPair};
use crate::route::{route_pairs, routes_to_frame, routes_to_geojson, Checkpoint, NetworkParams, RoadNetwork, RouteJob};

/// `<dir>/<stem>.partial.parquet` next to the output.
fn default_checkpoint(output: &Path) -> PathBuf {
    let stem = output.file_stem().and_then(|s| s.to_str()).unwrap_or("routes");
    output.with_file_name(format!("{stem}.partial.parquet"))
}

/// Mean of all origin and destination positions.
fn centroid(pairs: &[&OdPair]) -> Option<Position> {
    if pairs.is_empty() { return None }
    let n = (pairs.len() * 2) as f64;
    let (lat, lon) = pairs.iter()
        .flat_map(|p| [p.origin.position, p.destination.position])
        .fold((0.0, 0.0), |(lat, lon), p| (lat + p.lat, lon + p.lon));
    Some(Position::new(lat / n, lon / n))
}

pub fn run(_cli: &Cli, args: &RouteArgs) -> Result<()> {
    require_input(&args.input, "Run `transit-barrier od` (or `transit-barrier null`) first.")?;
    require_input(&args.roads, "Export the road network lines there or pass --roads.")?;
    require_input(&args.barriers, "Place the rail lines there or pass --barriers.")?;

    let jobs = pairs_from_frame(&read_table(&args.input)?, "OD pairs")?
        .into_iter()
        .map(|(fila, pair)| RouteJob { fila, pair })
        .collect::<Vec<_>>();
    log::info!("[route] {} OD pairs loaded", jobs.len());

    let barriers = load_barriers(&args.barriers, &args.name_field, args.barrier_filter.as_deref())?;

    let params = NetworkParams { dist_m: args.dist_m, network_type: args.network_type, snap_m: args.snap_m };
    let center = centroid(&jobs.iter().map(|j| &j.pair).collect::<Vec<_>>());
    let network = RoadNetwork::load(&args.roads, &params, center)?;

    let checkpoint = Checkpoint {
        path: args.checkpoint.clone().unwrap_or_else(|| default_checkpoint(&args.output)),
        every: args.checkpoint_every,
    };
    let resumed = if args.resume { checkpoint.load()? } else { Vec::new() };

    let outcome = route_pairs(&network, &jobs, &barriers, Some(&checkpoint), resumed)?;

    write_table(&mut routes_to_frame(&outcome.routes)?, &args.output)?;
    if let Some(geojson) = &args.geojson {
        write_bytes(&routes_to_geojson(&outcome.routes)?, geojson)?;
    }

    log::info!(
        "[route] Wrote {} routes to {} ({} failed)",
        outcome.routes.len(), args.output.display(), outcome.failed
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkpoint_sits_next_to_the_output() {
        let path = default_checkpoint(Path::new("data/processed/routes_null.parquet"));
        assert_eq!(path, PathBuf::from("data/processed/routes_null.partial.parquet"));
    }
}
