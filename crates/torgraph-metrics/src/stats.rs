//! Graph-level summary statistics.
//!
//! # Statistics Provided
//!
//! - **node_count / edge_count**: vertex and distinct weighted edge counts.
//! - **density**: `edge_count / (node_count * (node_count - 1))` for a
//!   directed graph. Self-loop edges count toward the numerator but the
//!   denominator only counts ordered pairs of distinct vertices. Undefined
//!   (`None`) for graphs with fewer than 2 vertices — never a
//!   division-by-zero or a silent 0.0.
//! - **diameter / average_path_length**: from the all-pairs hop-distance
//!   matrix; undefined on degenerate or fully disconnected graphs.
//! - **isolated_node_count**: domains with no edges in either direction.
//! - **self_loop_count**: domains linking to themselves.
//! - **max_in_degree / max_out_degree / mean_out_degree**: degree extremes
//!   and the average out-degree.

use petgraph::Direction;
use petgraph::graph::NodeIndex;
use serde::Serialize;

use torgraph_core::DomainGraph;

use crate::degree::mean_out_degree;
use crate::paths::shortest_paths;

/// Summary statistics for a domain graph.
///
/// Undefined metrics are `None` and must be rendered as such.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    /// Number of domains in the graph.
    pub node_count: usize,
    /// Number of distinct weighted edges.
    pub edge_count: usize,
    /// Sum of all edge weights (total observed inter-domain links).
    pub total_link_count: u64,
    /// Directed graph density, if defined.
    pub density: Option<f64>,
    /// Maximum finite shortest-path distance, if defined.
    pub diameter: Option<u32>,
    /// Mean finite non-zero shortest-path distance, if defined.
    pub average_path_length: Option<f64>,
    /// Domains with no in- or out-edges.
    pub isolated_node_count: usize,
    /// Domains with an edge to themselves.
    pub self_loop_count: usize,
    /// Highest in-degree over all domains.
    pub max_in_degree: usize,
    /// Highest out-degree over all domains.
    pub max_out_degree: usize,
    /// Mean out-degree, if the graph is non-empty.
    pub mean_out_degree: Option<f64>,
}

impl GraphStats {
    /// Compute statistics from a built graph.
    #[must_use]
    pub fn from_graph(graph: &DomainGraph) -> Self {
        let g = &graph.graph;
        let node_count = g.node_count();
        let edge_count = g.edge_count();

        let total_link_count: u64 = g.edge_weights().copied().sum();

        let density = compute_density(node_count, edge_count);

        let matrix = shortest_paths(graph);
        let diameter = matrix.diameter();
        let average_path_length = matrix.average_path_length();

        let isolated_node_count = (0..node_count)
            .filter(|&i| {
                let idx = NodeIndex::new(i);
                g.neighbors_directed(idx, Direction::Incoming).next().is_none()
                    && g.neighbors_directed(idx, Direction::Outgoing).next().is_none()
            })
            .count();

        let self_loop_count = (0..node_count)
            .filter(|&i| {
                let idx = NodeIndex::new(i);
                g.find_edge(idx, idx).is_some()
            })
            .count();

        let max_in_degree = (0..node_count)
            .map(|i| g.edges_directed(NodeIndex::new(i), Direction::Incoming).count())
            .max()
            .unwrap_or(0);

        let max_out_degree = (0..node_count)
            .map(|i| g.edges_directed(NodeIndex::new(i), Direction::Outgoing).count())
            .max()
            .unwrap_or(0);

        Self {
            node_count,
            edge_count,
            total_link_count,
            density,
            diameter,
            average_path_length,
            isolated_node_count,
            self_loop_count,
            max_in_degree,
            max_out_degree,
            mean_out_degree: mean_out_degree(graph),
        }
    }
}

/// Density of a directed graph; `None` below 2 vertices.
#[allow(clippy::cast_precision_loss)]
fn compute_density(node_count: usize, edge_count: usize) -> Option<f64> {
    if node_count < 2 {
        return None;
    }
    let max_pairs = (node_count * (node_count - 1)) as f64;
    Some(edge_count as f64 / max_pairs)
}
