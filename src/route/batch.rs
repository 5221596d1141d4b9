use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::Result;
use kdam::tqdm;

use crate::barrier::Barrier;
use crate::io::{read_table, write_table};
use crate::od::OdPair;

use super::{routes_from_frame, routes_to_frame, Route, Router};

/// One OD row to route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteJob {
    /// Row of the source OD table.
    pub fila: usize,
    pub pair: OdPair,
}

/// Partial route table written while a batch runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Checkpoint {
    pub path: PathBuf,
    /// Write after this many new routes. Zero disables writes.
    pub every: usize,
}

impl Checkpoint {
    /// Routes saved by an earlier run, or none if the file is absent.
    pub fn load(&self) -> Result<Vec<Route>> {
        if !self.path.is_file() { return Ok(Vec::new()) }
        let routes = routes_from_frame(&read_table(&self.path)?, "route checkpoint")?;
        log::info!("[route::batch] Resuming from {} routes in {}", routes.len(), self.path.display());
        Ok(routes)
    }

    fn save(&self, routes: &[Route]) -> Result<()> {
        write_table(&mut routes_to_frame(routes)?, &self.path)?;
        log::info!("[route::batch] Checkpoint: {} routes in {}", routes.len(), self.path.display());
        Ok(())
    }
}

/// Routes of a batch and how many rows were skipped.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// Resumed routes first, then new ones in job order.
    pub routes: Vec<Route>,
    pub failed: usize,
    pub resumed: usize,
}

/// Route every job not already in `resumed`, flagging crossings of `barriers`.
///
/// Failures are logged and skipped. With a `checkpoint`, all routes so far are written
/// every `checkpoint.every` new routes.
pub fn route_pairs<R: Router + ?Sized>(
    router: &R,
    jobs: &[RouteJob],
    barriers: &[Barrier],
    checkpoint: Option<&Checkpoint>,
    resumed: Vec<Route>,
) -> Result<BatchOutcome> {
    let done = resumed.iter().map(|r| r.fila).collect::<BTreeSet<_>>();
    let pending = jobs.iter().filter(|job| !done.contains(&job.fila)).collect::<Vec<_>>();
    let resumed_count = resumed.len();

    let mut routes = resumed;
    let mut failed = 0;
    let mut added = 0;

    for job in tqdm!(pending.iter(), total = pending.len(), desc = "routing OD pairs") {
        let pair = &job.pair;
        match router.route(pair.origin.position, pair.destination.position) {
            Ok(geometry) => {
                routes.push(Route::new(job.fila, pair, geometry, barriers));
                added += 1;
            }
            Err(err) => {
                log::warn!("[route::batch] Skipping card {} (row {}): {err}", pair.id_tarjeta, job.fila);
                failed += 1;
                continue;
            }
        }

        if let Some(checkpoint) = checkpoint.filter(|c| c.every > 0 && added % c.every == 0) {
            checkpoint.save(&routes)?;
        }
    }
    eprintln!();

    log::info!("[route::batch] {added} routed, {failed} failed, {resumed_count} resumed");
    Ok(BatchOutcome { routes, failed, resumed: resumed_count })
}
