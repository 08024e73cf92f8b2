//! Cross-metric invariants on seeded random domain graphs.
//!
//! # Test Strategy
//!
//! 1. Generate seeded random record sets (random link structure over a
//!    small domain universe, including self-links and clearnet noise).
//! 2. Build the graph and run every analyzer query.
//! 3. Assert the invariants that must hold for *any* graph: rank mass
//!    conservation, ranking completeness, degree/edge bookkeeping, and
//!    distance-matrix consistency.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use petgraph::Direction;
use torgraph_core::{DomainGraph, PageRecord};
use torgraph_metrics::pagerank::{PageRankConfig, pagerank};
use torgraph_metrics::degree::degree_ranking;
use torgraph_metrics::paths::shortest_paths;
use torgraph_metrics::stats::GraphStats;

// ---------------------------------------------------------------------------
// Random record generation
// ---------------------------------------------------------------------------

/// Generate `pages` records over a universe of `domains` onion domains.
/// Roughly one in eight links points at a clearnet URL and must be
/// filtered out by the builder.
fn random_records(seed: u64, domains: usize, pages: usize) -> Vec<PageRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut records = Vec::with_capacity(pages);

    for _ in 0..pages {
        let page = rng.gen_range(0..domains);
        let link_count = rng.gen_range(0..6);
        let links = (0..link_count)
            .map(|_| {
                if rng.gen_ratio(1, 8) {
                    "http://clearnet.example.com/".to_string()
                } else {
                    let target = rng.gen_range(0..domains);
                    format!("http://d{target}.onion/page{}", rng.gen_range(0..4))
                }
            })
            .collect();
        records.push(PageRecord::new(format!("http://d{page}.onion/"), links));
    }

    records
}

// ---------------------------------------------------------------------------
// PageRank invariants
// ---------------------------------------------------------------------------

#[test]
fn pagerank_mass_conserved_on_random_graphs() {
    for seed in 0..40 {
        let records = random_records(seed, 12, 30);
        let graph = DomainGraph::from_records(&records);
        if graph.node_count() == 0 {
            continue;
        }

        let result = pagerank(&graph, &PageRankConfig::default());
        let total: f64 = result.ranking.iter().map(|&(_, s)| s).sum();
        assert!(
            (total - 1.0).abs() < 1e-3,
            "seed {seed}: rank mass {total} != 1.0"
        );
        assert_eq!(
            result.ranking.len(),
            graph.node_count(),
            "seed {seed}: every vertex must be ranked"
        );
    }
}

#[test]
fn pagerank_deterministic_across_runs() {
    let records = random_records(7, 10, 25);
    let graph = DomainGraph::from_records(&records);

    let a = pagerank(&graph, &PageRankConfig::default());
    let b = pagerank(&graph, &PageRankConfig::default());
    assert_eq!(a.iterations, b.iterations);
    for (x, y) in a.ranking.iter().zip(b.ranking.iter()) {
        assert_eq!(x.0, y.0);
        assert!((x.1 - y.1).abs() < f64::EPSILON);
    }
}

#[test]
fn pagerank_terminates_under_iteration_cap() {
    for seed in 0..20 {
        let records = random_records(seed, 15, 40);
        let graph = DomainGraph::from_records(&records);
        let config = PageRankConfig::default();
        let result = pagerank(&graph, &config);
        assert!(result.iterations <= config.max_iter, "seed {seed}");
    }
}

// ---------------------------------------------------------------------------
// Degree invariants
// ---------------------------------------------------------------------------

#[test]
fn degree_rankings_cover_all_vertices_and_sum_to_edge_count() {
    for seed in 0..20 {
        let records = random_records(seed, 10, 30);
        let graph = DomainGraph::from_records(&records);

        let outgoing = degree_ranking(&graph, Direction::Outgoing);
        let incoming = degree_ranking(&graph, Direction::Incoming);

        assert_eq!(outgoing.len(), graph.node_count(), "seed {seed}");
        assert_eq!(incoming.len(), graph.node_count(), "seed {seed}");

        let out_sum: usize = outgoing.iter().map(|&(_, d)| d).sum();
        let in_sum: usize = incoming.iter().map(|&(_, d)| d).sum();
        assert_eq!(out_sum, graph.edge_count(), "seed {seed}: Σout = |E|");
        assert_eq!(in_sum, graph.edge_count(), "seed {seed}: Σin = |E|");
    }
}

// ---------------------------------------------------------------------------
// Distance-matrix invariants
// ---------------------------------------------------------------------------

#[test]
fn distance_matrix_consistent_with_stats() {
    for seed in 0..20 {
        let records = random_records(seed, 10, 30);
        let graph = DomainGraph::from_records(&records);
        let matrix = shortest_paths(&graph);
        let stats = GraphStats::from_graph(&graph);

        assert_eq!(matrix.diameter(), stats.diameter, "seed {seed}");
        assert_eq!(
            matrix.average_path_length(),
            stats.average_path_length,
            "seed {seed}"
        );

        // Diagonal is always zero; diameter bounds every finite entry.
        for (i, row) in matrix.dist.iter().enumerate() {
            assert_eq!(row[i], Some(0), "seed {seed}: self distance");
            for (j, d) in row.iter().enumerate() {
                if i == j {
                    continue;
                }
                if let Some(d) = d {
                    let diameter = stats.diameter.expect("finite entry implies diameter");
                    assert!(*d >= 1 && *d <= diameter, "seed {seed}: d({i},{j}) = {d}");
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Builder ↔ analyzer agreement
// ---------------------------------------------------------------------------

#[test]
fn total_links_equals_record_level_count() {
    for seed in 0..20 {
        let records = random_records(seed, 8, 25);
        let graph = DomainGraph::from_records(&records);
        let stats = GraphStats::from_graph(&graph);

        // Count qualifying page→outlink pairs straight off the records.
        let expected: u64 = records
            .iter()
            .filter(|r| torgraph_core::domain::onion_host(&r.page_url).is_some())
            .map(|r| {
                r.link_urls
                    .iter()
                    .filter(|l| torgraph_core::domain::onion_host(l).is_some())
                    .count() as u64
            })
            .sum();

        assert_eq!(stats.total_link_count, expected, "seed {seed}");
    }
}
