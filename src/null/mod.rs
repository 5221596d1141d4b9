mod bins;
mod matching;
mod pool;
mod summary;
mod table;

pub use bins::DistanceBins;
pub use matching::{match_destinations, rewire, NullModel, NullOdPair, NullParams};
pub use pool::DestinationPool;
pub use summary::SummaryRow;
pub(crate) use summary::summary_to_frame;
pub(crate) use table::null_pairs_to_frame;
