//! Degree centrality rankings.
//!
//! Counts **distinct incident edges** per vertex in the requested direction;
//! edge weight is deliberately ignored here (weight matters for PageRank,
//! not for degree). Zero-degree vertices are included in the ranking, never
//! omitted.

use petgraph::Direction;
use petgraph::graph::NodeIndex;

use torgraph_core::DomainGraph;

/// Rank all domains by degree in `direction`, descending.
///
/// A self-loop counts once as an out-edge and once as an in-edge. Ties keep
/// canonical vertex order (stable sort).
#[must_use]
pub fn degree_ranking(graph: &DomainGraph, direction: Direction) -> Vec<(String, usize)> {
    let g = &graph.graph;
    let mut ranking: Vec<(String, usize)> = (0..g.node_count())
        .map(|i| {
            let idx = NodeIndex::new(i);
            let count = g.edges_directed(idx, direction).count();
            (g[idx].clone(), count)
        })
        .collect();

    ranking.sort_by(|a, b| b.1.cmp(&a.1));
    ranking
}

/// Mean out-degree across all vertices; `None` for an empty graph.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean_out_degree(graph: &DomainGraph) -> Option<f64> {
    let n = graph.node_count();
    if n == 0 {
        return None;
    }
    let total: usize = (0..n)
        .map(|i| {
            graph
                .graph
                .edges_directed(NodeIndex::new(i), Direction::Outgoing)
                .count()
        })
        .sum();
    Some(total as f64 / n as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use torgraph_core::PageRecord;

    fn graph_from(records: &[(&str, &[&str])]) -> DomainGraph {
        let records: Vec<PageRecord> = records
            .iter()
            .map(|(page, links)| {
                PageRecord::new(
                    format!("http://{page}.onion/"),
                    links
                        .iter()
                        .map(|l| format!("http://{l}.onion/"))
                        .collect(),
                )
            })
            .collect();
        DomainGraph::from_records(&records)
    }

    #[test]
    fn in_degree_counts_distinct_edges_not_weight() {
        // a links to c five times: still one distinct in-edge for c.
        let graph = graph_from(&[("a", &["c", "c", "c", "c", "c"]), ("b", &["c"])]);
        let ranking = degree_ranking(&graph, Direction::Incoming);

        assert_eq!(ranking[0], ("c.onion".to_string(), 2));
    }

    #[test]
    fn zero_out_degree_vertex_reported_not_omitted() {
        let graph = graph_from(&[("a", &["b"])]);
        let ranking = degree_ranking(&graph, Direction::Outgoing);

        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[0], ("a.onion".to_string(), 1));
        assert_eq!(ranking[1], ("b.onion".to_string(), 0));
    }

    #[test]
    fn self_loop_counts_in_both_directions() {
        let graph = graph_from(&[("a", &["a"])]);
        let outgoing = degree_ranking(&graph, Direction::Outgoing);
        let incoming = degree_ranking(&graph, Direction::Incoming);
        assert_eq!(outgoing[0].1, 1);
        assert_eq!(incoming[0].1, 1);
    }

    #[test]
    fn ties_keep_canonical_order() {
        let graph = graph_from(&[("a", &["c"]), ("b", &["c"])]);
        let ranking = degree_ranking(&graph, Direction::Outgoing);
        let names: Vec<&str> = ranking.iter().map(|(d, _)| d.as_str()).collect();
        // a and b tie at out-degree 1; a was seen first, so it stays first.
        assert_eq!(names, vec!["a.onion", "b.onion", "c.onion"]);
    }

    #[test]
    fn mean_out_degree_undefined_on_empty_graph() {
        let graph = DomainGraph::from_records(&[]);
        assert_eq!(mean_out_degree(&graph), None);
    }

    #[test]
    fn mean_out_degree_average() {
        // a→b, a→c, b→c: out-degrees 2, 1, 0 → mean 1.0
        let graph = graph_from(&[("a", &["b", "c"]), ("b", &["c"])]);
        let mean = mean_out_degree(&graph).expect("non-empty");
        assert!((mean - 1.0).abs() < 1e-10);
    }
}
