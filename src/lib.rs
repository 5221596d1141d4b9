#![doc = "Transit barrier public API"]
mod barrier;
mod common;
mod geom;
mod io;
mod null;
mod od;
mod route;
mod swipe;

pub mod cli;
pub mod commands;

#[doc(inline)]
pub use common::PipelineError;

#[doc(inline)]
pub use geom::{crosses, Direction, Position};

#[doc(inline)]
pub use swipe::{clean_records, read_raw_swipes, CleanOutcome, CleanParams, SwipeRecord};

#[doc(inline)]
pub use od::{infer_od_pairs, select_pair, Endpoint, OdPair, OdParams};

#[doc(inline)]
pub use null::{match_destinations, rewire, DestinationPool, DistanceBins, NullModel, NullOdPair, NullParams, SummaryRow};

#[doc(inline)]
pub use route::{
    route_pairs, BatchOutcome, Checkpoint, NetworkParams, NetworkType, RoadNetwork, Route, RouteError,
    RouteJob, Router,
};

#[doc(inline)]
pub use barrier::{
    barrier_score, crossing_column, directional_scores, global_scores, load_barriers, Barrier,
    BarrierReport, CrossingTally, DirectionalBarrierReport, DirectionalEntry, DirectionalScores,
    GlobalEntry, MissingScore, NullRun, RealCrossings, ScoreEntry,
};
