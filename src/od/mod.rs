mod infer;
mod pair;
mod table;

pub use infer::{infer_od_pairs, select_pair, OdParams};
pub use pair::{Endpoint, OdPair};
pub(crate) use table::{pairs_from_frame, pairs_to_frame};
