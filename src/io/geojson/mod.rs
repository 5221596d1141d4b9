//! GeoJSON: line features in, route features out.

mod read;
mod write;

pub(crate) use read::*;
pub(crate) use write::*;
