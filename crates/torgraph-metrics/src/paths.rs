//! All-pairs shortest paths, diameter, and average path length.
//!
//! Distance is **hop count**: edge weights record link multiplicity, not
//! traversal cost, so they do not shorten or lengthen paths. (A
//! link-strength-aware distance would be a behavior change; weight feeds
//! PageRank only.)
//!
//! The matrix is computed by breadth-first search from every vertex.
//! Unreachable pairs are recorded as `None` and excluded from aggregate
//! statistics; degenerate graphs yield explicitly undefined (`None`)
//! diameter and average path length rather than a misleading zero.

use std::collections::VecDeque;

use petgraph::Direction;
use petgraph::graph::NodeIndex;

use torgraph_core::DomainGraph;

/// All-pairs hop-count distance matrix.
///
/// `dist[i][j]` is the shortest hop distance from `order[i]` to `order[j]`,
/// or `None` when `j` is unreachable from `i`. Indices follow the graph's
/// canonical vertex order.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    /// Domains in canonical vertex order.
    pub order: Vec<String>,
    /// Row-major distances; `dist[i][i]` is always `Some(0)`.
    pub dist: Vec<Vec<Option<u32>>>,
}

impl DistanceMatrix {
    /// Distance from `from` to `to`; `None` if either domain is unknown or
    /// the pair is unreachable.
    #[must_use]
    pub fn get(&self, from: &str, to: &str) -> Option<u32> {
        let i = self.order.iter().position(|d| d == from)?;
        let j = self.order.iter().position(|d| d == to)?;
        self.dist[i][j]
    }

    /// Maximum finite distance over ordered pairs of distinct vertices.
    ///
    /// `None` when the graph has fewer than 2 vertices or no such pair is
    /// reachable.
    #[must_use]
    pub fn diameter(&self) -> Option<u32> {
        if self.order.len() < 2 {
            return None;
        }
        self.finite_pair_distances().max()
    }

    /// Arithmetic mean of the finite, non-zero entries — self-distances and
    /// unreachable pairs are excluded.
    ///
    /// `None` when no finite non-zero pair exists.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_path_length(&self) -> Option<f64> {
        let mut sum = 0u64;
        let mut count = 0u64;
        for d in self.finite_pair_distances() {
            sum += u64::from(d);
            count += 1;
        }
        if count == 0 {
            return None;
        }
        Some(sum as f64 / count as f64)
    }

    /// Finite distances over ordered pairs `(i, j)` with `i != j`.
    fn finite_pair_distances(&self) -> impl Iterator<Item = u32> + '_ {
        self.dist.iter().enumerate().flat_map(|(i, row)| {
            row.iter()
                .enumerate()
                .filter(move |&(j, _)| i != j)
                .filter_map(|(_, d)| *d)
        })
    }
}

/// Compute the all-pairs distance matrix by BFS from every vertex.
#[must_use]
pub fn shortest_paths(graph: &DomainGraph) -> DistanceMatrix {
    let n = graph.node_count();
    let order: Vec<String> = graph.domains().map(str::to_owned).collect();
    let dist = (0..n).map(|i| bfs_row(graph, i, n)).collect();

    DistanceMatrix { order, dist }
}

/// Single-source hop distances from vertex `source`.
fn bfs_row(graph: &DomainGraph, source: usize, n: usize) -> Vec<Option<u32>> {
    let g = &graph.graph;
    let mut row = vec![None; n];
    row[source] = Some(0);

    let mut queue = VecDeque::from([NodeIndex::new(source)]);
    while let Some(node) = queue.pop_front() {
        let Some(here) = row[node.index()] else {
            continue;
        };
        for neighbor in g.neighbors_directed(node, Direction::Outgoing) {
            if row[neighbor.index()].is_none() {
                row[neighbor.index()] = Some(here + 1);
                queue.push_back(neighbor);
            }
        }
    }

    row
}
