use std::collections::BTreeMap;

use serde::Serialize;

use crate::geom::Direction;
use crate::route::Route;

use super::Barrier;

/// Why a score could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingScore {
    /// The real routes never cross the barrier.
    SinCrucesReales,
    /// The null routes never cross the barrier.
    SinCrucesNulo,
}

/// Crossing count of one null run and its score against the real count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreEntry {
    pub cruces_nulo: usize,
    pub barrier_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motivo: Option<MissingScore>,
}

/// `(null - real) / real`. A null count of zero is reported first, then a real count of zero.
pub fn barrier_score(real: usize, null: usize) -> ScoreEntry {
    let (barrier_score, motivo) = if null == 0 {
        (None, Some(MissingScore::SinCrucesNulo))
    } else if real == 0 {
        (None, Some(MissingScore::SinCrucesReales))
    } else {
        (Some((null as f64 - real as f64) / real as f64), None)
    };
    ScoreEntry { cruces_nulo: null, barrier_score, motivo }
}

/// Routes of one null-model run, keyed by run id.
#[derive(Debug, Clone)]
pub struct NullRun {
    pub id: String,
    pub routes: Vec<Route>,
}

/// Routes crossing one barrier, split by direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrossingTally {
    pub total: usize,
    pub sur_norte: usize,
    pub norte_sur: usize,
    pub horizontal: usize,
}

impl CrossingTally {
    /// Count the routes in `routes` that cross `barrier`.
    pub fn of(routes: &[Route], barrier: &Barrier) -> Self {
        routes.iter()
            .filter(|r| barrier.crossed_by(&r.geometry))
            .fold(Self::default(), |mut tally, r| {
                tally.total += 1;
                match r.direction {
                    Direction::SurNorte => tally.sur_norte += 1,
                    Direction::NorteSur => tally.norte_sur += 1,
                    Direction::Horizontal => tally.horizontal += 1,
                }
                tally
            })
    }
}

/// Real and per-run tallies of one barrier.
#[derive(Debug, Clone)]
struct BarrierTallies {
    real: CrossingTally,
    nulls: Vec<(String, CrossingTally)>,
}

fn tally(real: &[Route], nulls: &[NullRun], barrier: &Barrier) -> BarrierTallies {
    BarrierTallies {
        real: CrossingTally::of(real, barrier),
        nulls: nulls.iter().map(|run| (run.id.clone(), CrossingTally::of(&run.routes, barrier))).collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalEntry {
    pub cruces_reales: usize,
    pub norte_sur: usize,
    pub sur_norte: usize,
    pub modelos_nulos: BTreeMap<String, ScoreEntry>,
}

/// Global scores by barrier name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BarrierReport(pub BTreeMap<String, GlobalEntry>);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RealCrossings {
    pub sur_norte: usize,
    pub norte_sur: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectionalScores {
    pub sur_norte: ScoreEntry,
    pub norte_sur: ScoreEntry,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectionalEntry {
    pub cruces_reales: RealCrossings,
    /// Real crossings left out of both directions.
    pub horizontal: usize,
    pub modelos_nulos: BTreeMap<String, DirectionalScores>,
}

/// Directional scores by barrier name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DirectionalBarrierReport(pub BTreeMap<String, DirectionalEntry>);

impl BarrierReport {
    fn insert(&mut self, name: &str, tallies: &BarrierTallies) {
        let real = tallies.real;
        let modelos_nulos = tallies.nulls.iter()
            .map(|(id, null)| (id.clone(), barrier_score(real.total, null.total)))
            .collect();
        self.0.insert(name.to_string(), GlobalEntry {
            cruces_reales: real.total,
            norte_sur: real.norte_sur,
            sur_norte: real.sur_norte,
            modelos_nulos,
        });
    }
}

impl DirectionalBarrierReport {
    fn insert(&mut self, name: &str, tallies: &BarrierTallies) {
        let real = tallies.real;
        let modelos_nulos = tallies.nulls.iter()
            .map(|(id, null)| (id.clone(), DirectionalScores {
                sur_norte: barrier_score(real.sur_norte, null.sur_norte),
                norte_sur: barrier_score(real.norte_sur, null.norte_sur),
            }))
            .collect();
        self.0.insert(name.to_string(), DirectionalEntry {
            cruces_reales: RealCrossings { sur_norte: real.sur_norte, norte_sur: real.norte_sur },
            horizontal: real.horizontal,
            modelos_nulos,
        });
    }
}

/// Global and directional reports from a single crossing pass per route set and barrier.
pub(crate) fn score_all(real: &[Route], nulls: &[NullRun], barriers: &[Barrier]) -> (BarrierReport, DirectionalBarrierReport) {
    let mut global = BarrierReport::default();
    let mut directional = DirectionalBarrierReport::default();
    for barrier in barriers {
        let tallies = tally(real, nulls, barrier);
        for (id, null) in &tallies.nulls {
            log::info!(
                "[barrier::score] {} / {id}: {} real vs {} null crossings",
                barrier.name, tallies.real.total, null.total
            );
        }
        global.insert(&barrier.name, &tallies);
        directional.insert(&barrier.name, &tallies);
    }
    (global, directional)
}

/// One global score per barrier and null run.
pub fn global_scores(real: &[Route], nulls: &[NullRun], barriers: &[Barrier]) -> BarrierReport {
    let mut report = BarrierReport::default();
    for barrier in barriers {
        report.insert(&barrier.name, &tally(real, nulls, barrier));
    }
    report
}

/// One score per direction, barrier and null run. Horizontal routes take no part.
pub fn directional_scores(real: &[Route], nulls: &[NullRun], barriers: &[Barrier]) -> DirectionalBarrierReport {
    let mut report = DirectionalBarrierReport::default();
    for barrier in barriers {
        report.insert(&barrier.name, &tally(real, nulls, barrier));
    }
    report
}
