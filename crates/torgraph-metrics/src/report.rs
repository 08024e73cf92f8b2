//! Combined metric report for the reporting boundary.
//!
//! Recomputed in full on every analysis pass — there are no incremental
//! update semantics. The payload serializes cleanly for JSON output and
//! feeds the human renderer in the CLI.

use petgraph::Direction;
use serde::Serialize;

use torgraph_core::DomainGraph;

use crate::degree::degree_ranking;
use crate::pagerank::{PageRankConfig, pagerank};
use crate::stats::GraphStats;

/// One entry in a PageRank ranking.
#[derive(Debug, Clone, Serialize)]
pub struct RankedScore {
    /// Domain name.
    pub domain: String,
    /// PageRank score.
    pub score: f64,
}

/// One entry in a degree ranking.
#[derive(Debug, Clone, Serialize)]
pub struct RankedDegree {
    /// Domain name.
    pub domain: String,
    /// Distinct incident edge count.
    pub degree: usize,
}

/// Everything the analyzer derives from one graph snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct MetricReport {
    /// Graph-level summary statistics.
    pub stats: GraphStats,
    /// Top domains by PageRank, descending.
    pub pagerank_top: Vec<RankedScore>,
    /// Iterations the PageRank solver performed.
    pub pagerank_iterations: usize,
    /// Whether PageRank converged within its iteration cap.
    pub pagerank_converged: bool,
    /// Top domains by in-degree, descending.
    pub in_degree_top: Vec<RankedDegree>,
    /// Top domains by out-degree, descending.
    pub out_degree_top: Vec<RankedDegree>,
}

impl MetricReport {
    /// Compute the full report, truncating rankings to `top_n` entries.
    #[must_use]
    pub fn compute(graph: &DomainGraph, config: &PageRankConfig, top_n: usize) -> Self {
        let pr = pagerank(graph, config);

        let pagerank_top = pr
            .ranking
            .iter()
            .take(top_n)
            .map(|(domain, score)| RankedScore {
                domain: domain.clone(),
                score: *score,
            })
            .collect();

        let to_degrees = |direction| {
            degree_ranking(graph, direction)
                .into_iter()
                .take(top_n)
                .map(|(domain, degree)| RankedDegree { domain, degree })
                .collect()
        };

        Self {
            stats: GraphStats::from_graph(graph),
            pagerank_top,
            pagerank_iterations: pr.iterations,
            pagerank_converged: pr.converged,
            in_degree_top: to_degrees(Direction::Incoming),
            out_degree_top: to_degrees(Direction::Outgoing),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use torgraph_core::PageRecord;

    fn sample_graph() -> DomainGraph {
        let records = [
            PageRecord::new("http://a.onion/p1", vec!["http://b.onion/x".to_string()]),
            PageRecord::new(
                "http://b.onion/x",
                vec![
                    "http://a.onion/p1".to_string(),
                    "http://b.onion/y".to_string(),
                ],
            ),
        ];
        DomainGraph::from_records(&records)
    }

    #[test]
    fn report_truncates_to_top_n() {
        let graph = sample_graph();
        let report = MetricReport::compute(&graph, &PageRankConfig::default(), 1);
        assert_eq!(report.pagerank_top.len(), 1);
        assert_eq!(report.in_degree_top.len(), 1);
        assert_eq!(report.out_degree_top.len(), 1);
    }

    #[test]
    fn report_serializes_undefined_as_null() {
        let graph = DomainGraph::from_records(&[]);
        let report = MetricReport::compute(&graph, &PageRankConfig::default(), 3);
        let json = serde_json::to_value(&report).expect("serialize");
        assert!(json["stats"]["density"].is_null());
        assert!(json["stats"]["diameter"].is_null());
    }

    #[test]
    fn report_carries_convergence_state() {
        let graph = sample_graph();
        let config = PageRankConfig {
            max_iter: 1,
            tolerance: 1e-15,
            ..PageRankConfig::default()
        };
        let report = MetricReport::compute(&graph, &config, 3);
        assert!(!report.pagerank_converged);
        assert_eq!(report.pagerank_iterations, 1);
    }
}
