use std::path::Path;

use ahash::AHashMap;
use anyhow::Result;
use geo::LineString;
use rstar::{primitives::GeomWithData, RTree};

use crate::geom::{haversine_km, Position};
use crate::io::read_line_features;

use super::{graph::Graph, RouteError, Router};

/// Which road classes (`highway` attribute) a network admits.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NetworkType {
    /// Roads open to motor traffic.
    #[default]
    Drive,
    /// Ways usable on foot.
    Walk,
    /// Every line in the source.
    All,
}

const NOT_DRIVABLE: &[&str] = &[
    "footway", "path", "pedestrian", "steps", "cycleway", "bridleway", "track", "corridor",
    "elevator", "escalator", "platform", "proposed", "construction", "abandoned", "raceway",
    "bus_guideway", "busway",
];

const NOT_WALKABLE: &[&str] = &[
    "motorway", "motorway_link", "cycleway", "bus_guideway", "busway", "raceway",
    "proposed", "construction", "abandoned", "platform",
];

impl NetworkType {
    /// Whether a way of class `highway` belongs to this network. Unclassified ways always do.
    pub fn admits(self, highway: Option<&str>) -> bool {
        let Some(class) = highway else { return true };
        match self {
            NetworkType::Drive => !NOT_DRIVABLE.contains(&class),
            NetworkType::Walk => !NOT_WALKABLE.contains(&class),
            NetworkType::All => true,
        }
    }
}

/// How the road network is built and queried.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkParams {
    /// Radius in metres around the network centre; segments reaching past it are dropped.
    pub dist_m: f64,
    pub network_type: NetworkType,
    /// Maximum distance in metres from a query point to its nearest node.
    pub snap_m: f64,
}

impl Default for NetworkParams {
    fn default() -> Self {
        Self { dist_m: 12_000.0, network_type: NetworkType::Drive, snap_m: 500.0 }
    }
}

/// Undirected road graph over the vertices of a set of road lines, weighted by length in metres.
#[derive(Debug)]
pub struct RoadNetwork {
    nodes: Vec<Position>,
    graph: Graph,
    index: RTree<GeomWithData<[f64; 2], usize>>,
    /// Cosine of the mean node latitude; shrinks longitude so index distances track ground distances.
    lon_scale: f64,
    snap_m: f64,
}

/// Index key for `p`, with longitude shrunk by `lon_scale`.
#[inline]
fn planar(p: Position, lon_scale: f64) -> [f64; 2] { [p.lon * lon_scale, p.lat] }

impl RoadNetwork {
    /// Build from road lines. With a `center`, segments with an end farther than `dist_m` are dropped.
    pub fn from_lines<'a>(
        lines: impl IntoIterator<Item = &'a LineString<f64>>,
        params: &NetworkParams,
        center: Option<Position>,
    ) -> Self {
        let inside = |p: Position| center.is_none_or(|c| haversine_km(c, p) * 1000.0 <= params.dist_m);

        let mut ids: AHashMap<(u64, u64), usize> = AHashMap::new();
        let mut nodes: Vec<Position> = Vec::new();
        let mut adjacency: Vec<Vec<u32>> = Vec::new();
        let mut weights: Vec<Vec<f64>> = Vec::new();

        let mut node_of = |p: Position, adjacency: &mut Vec<Vec<u32>>, weights: &mut Vec<Vec<f64>>| {
            *ids.entry((p.lon.to_bits(), p.lat.to_bits())).or_insert_with(|| {
                nodes.push(p);
                adjacency.push(Vec::new());
                weights.push(Vec::new());
                nodes.len() - 1
            })
        };

        for line in lines {
            for segment in line.lines() {
                let a = Position::new(segment.start.y, segment.start.x);
                let b = Position::new(segment.end.y, segment.end.x);
                if a == b || !inside(a) || !inside(b) { continue }

                let u = node_of(a, &mut adjacency, &mut weights);
                let v = node_of(b, &mut adjacency, &mut weights);
                let metres = haversine_km(a, b) * 1000.0;
                adjacency[u].push(v as u32);
                weights[u].push(metres);
                adjacency[v].push(u as u32);
                weights[v].push(metres);
            }
        }

        let lon_scale = match nodes.len() {
            0 => 1.0,
            n => (nodes.iter().map(|p| p.lat).sum::<f64>() / n as f64).to_radians().cos(),
        };
        let index = RTree::bulk_load(
            nodes.iter().enumerate()
                .map(|(i, &p)| GeomWithData::new(planar(p, lon_scale), i))
                .collect()
        );

        Self {
            graph: Graph::new(nodes.len(), &adjacency, &weights),
            nodes,
            index,
            lon_scale,
            snap_m: params.snap_m,
        }
    }

    /// Load road lines from a `.shp` or `.geojson` file, keeping the classes of `params.network_type`.
    pub fn load(path: &Path, params: &NetworkParams, center: Option<Position>) -> Result<Self> {
        let features = read_line_features(path)?;
        let lines = features.iter()
            .filter(|f| params.network_type.admits(f.attr("highway")))
            .flat_map(|f| f.lines.iter());

        let network = Self::from_lines(lines, params, center);
        log::info!(
            "[route::network] Loaded {} nodes and {} edges from {}",
            network.node_count(), network.graph.edge_count() / 2, path.display()
        );
        Ok(network)
    }

    #[inline] pub fn node_count(&self) -> usize { self.nodes.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

    /// Closest node to `p`, if within the snap distance.
    fn nearest(&self, p: Position) -> Result<usize, RouteError> {
        self.index.nearest_neighbor(&planar(p, self.lon_scale))
            .map(|hit| hit.data)
            .filter(|&node| haversine_km(self.nodes[node], p) * 1000.0 <= self.snap_m)
            .ok_or(RouteError::NoNearestNode { lat: p.lat, lon: p.lon, snap_m: self.snap_m })
    }
}

impl Router for RoadNetwork {
    fn route(&self, origin: Position, destination: Position) -> Result<LineString<f64>, RouteError> {
        let from = self.nearest(origin)?;
        let to = self.nearest(destination)?;
        if from == to { return Err(RouteError::SameNode { node: from }) }

        let path = self.graph.shortest_path(from, to).ok_or(RouteError::NoPath { from, to })?;
        Ok(path.into_iter().map(|n| (self.nodes[n].lon, self.nodes[n].lat)).collect::<Vec<_>>().into())
    }
}
