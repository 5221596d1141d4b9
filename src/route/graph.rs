/// A weighted, undirected graph in compressed sparse row format.
#[derive(Debug, Default)]
pub(super) struct Graph {
    size: usize,
    offsets: Vec<u32>,
    edges: Vec<u32>,
    edge_weights: Vec<f64>,
}

impl Graph {
    /// Construct a graph from adjacency lists.
    pub(super) fn new(num_nodes: usize, edges: &[Vec<u32>], edge_weights: &[Vec<f64>]) -> Self {
        assert!(edges.len() == num_nodes, "edges.len() must equal num_nodes");
        assert!(edge_weights.len() == num_nodes, "edge_weights.len() must equal num_nodes");
        edges.iter().zip(edge_weights.iter()).enumerate().for_each(|(i, (edges, weights))| {
            assert!(edges.len() == weights.len(), "edges[{i}].len() must equal edge_weights[{i}].len()");
        });

        Self {
            size: num_nodes,
            offsets: std::iter::once(0u32).chain(
                edges.iter()
                    .map(|v| v.len() as u32)
                    .scan(0u32, |acc, len| {*acc += len; Some(*acc)})
            ).collect::<Vec<u32>>(),
            edges: edges.iter().flatten().copied().collect(),
            edge_weights: edge_weights.iter().flatten().copied().collect(),
        }
    }

    /// Get the number of nodes in the graph.
    #[inline] pub(super) fn node_count(&self) -> usize { self.size }

    /// Get the number of directed edge entries in the graph.
    #[inline] pub(super) fn edge_count(&self) -> usize { self.edges.len() }

    #[inline]
    fn range(&self, node: usize) -> std::ops::Range<usize> {
        self.offsets[node] as usize .. self.offsets[node + 1] as usize
    }

    /// Get an iterator over the neighbors and edge weights of a given node.
    #[inline]
    pub(super) fn edges_with_weights(&self, node: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.range(node).map(move |v| (self.edges[v] as usize, self.edge_weights[v]))
    }

    /// Cheapest node sequence from `source` to `target`, both included.
    pub(super) fn shortest_path(&self, source: usize, target: usize) -> Option<Vec<usize>> {
        pathfinding::prelude::dijkstra(
            &source,
            |&node| self.edges_with_weights(node).map(|(next, weight)| (next, millimetres(weight))),
            |&node| node == target,
        ).map(|(path, _cost)| path)
    }
}

/// Edge cost as whole millimetres, the ordered cost the search needs.
#[inline]
fn millimetres(metres: f64) -> u64 {
    (metres * 1000.0).round().max(0.0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_graph() -> Graph {
        Graph::new(
            5,
            &[
                vec![1, 2],       // 0
                vec![0, 2],       // 1
                vec![0, 1, 3],    // 2
                vec![2],          // 3
                vec![],           // 4
            ],
            &[
                vec![1.5, 2.0],
                vec![1.5, 3.8],
                vec![2.0, 3.8, 0.5],
                vec![0.5],
                vec![],
            ],
        )
    }

    #[test]
    fn csr_graph_construction() {
        let graph = make_test_graph();

        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.edge_count(), 8);
        assert_eq!(graph.offsets, vec![0, 2, 4, 7, 8, 8]);
        assert_eq!(graph.edges,        vec![  1,   2,   0,   2,   0,   1,   3,   2]);
        assert_eq!(graph.edge_weights, vec![1.5, 2.0, 1.5, 3.8, 2.0, 3.8, 0.5, 0.5]);
        assert_eq!(graph.edges_with_weights(2).collect::<Vec<_>>(), vec![(0, 2.0), (1, 3.8), (3, 0.5)]);
    }

    #[test]
    fn shortest_path_prefers_lighter_detour() {
        let graph = make_test_graph();
        assert_eq!(graph.shortest_path(1, 3), Some(vec![1, 0, 2, 3]));
    }

    #[test]
    fn path_to_self_is_a_single_node() {
        assert_eq!(make_test_graph().shortest_path(2, 2), Some(vec![2]));
    }

    #[test]
    fn unreachable_node_has_no_path() {
        assert_eq!(make_test_graph().shortest_path(0, 4), None);
    }

    #[test]
    fn costs_round_to_millimetres() {
        assert_eq!(millimetres(1.2345), 1235);
        assert_eq!(millimetres(0.0), 0);
    }

    #[test]
    #[should_panic(expected = "edges[0].len() must equal edge_weights[0].len()")]
    fn new_panics_when_per_node_len_mismatch() {
        let _ = Graph::new(2, &[vec![1], vec![]], &[vec![], vec![]]);
    }
}
