mod load;
mod score;

pub use load::{crossing_column, load_barriers, Barrier};
pub(crate) use score::score_all;
pub use score::{
    barrier_score, directional_scores, global_scores, BarrierReport, CrossingTally,
    DirectionalBarrierReport, DirectionalEntry, DirectionalScores, GlobalEntry, MissingScore,
    NullRun, RealCrossings, ScoreEntry,
};
