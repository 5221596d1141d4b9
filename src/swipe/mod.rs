mod clean;
mod record;
mod table;

pub use clean::{clean_records, read_raw_swipes, CleanOutcome, CleanParams};
pub use record::SwipeRecord;
pub(crate) use record::RAW_COLUMNS;
pub(crate) use table::{swipes_from_frame, swipes_to_frame};
