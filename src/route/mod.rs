mod batch;
mod graph;
mod network;
mod table;

use geo::LineString;

use crate::geom::Position;

pub use batch::{route_pairs, BatchOutcome, Checkpoint, RouteJob};
pub use network::{NetworkParams, NetworkType, RoadNetwork};
pub use table::Route;
pub(crate) use table::{routes_from_frame, routes_to_frame, routes_to_geojson};

/// Why one OD pair could not be routed.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RouteError {
    #[error("no network node within {snap_m} m of ({lat}, {lon})")]
    NoNearestNode { lat: f64, lon: f64, snap_m: f64 },
    #[error("no path between nodes {from} and {to}")]
    NoPath { from: usize, to: usize },
    #[error("origin and destination share node {node}")]
    SameNode { node: usize },
}

/// Shortest-path service between two positions.
pub trait Router {
    /// Path as (lon, lat) vertices from `origin` to `destination`.
    fn route(&self, origin: Position, destination: Position) -> Result<LineString<f64>, RouteError>;
}
