mod data;
mod error;
mod fs;

pub(crate) use data::*;
pub use error::PipelineError;
pub(crate) use fs::*;
