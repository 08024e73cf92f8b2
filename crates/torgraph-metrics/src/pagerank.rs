//! Weighted PageRank over the domain graph.
//!
//! # Algorithm
//!
//! Standard power-method PageRank:
//!
//! ```text
//! PR(v) = (1 - d) / N + d * Σ PR(u) * w(u → v) / out_weight(u)
//! ```
//!
//! where `d` is the damping factor and `w(u → v)` the edge weight — a
//! vertex's rank mass is distributed to its out-neighbors **in proportion
//! to edge weight**, not uniformly. Heavily-linked domains receive more of
//! their linker's authority.
//!
//! Dangling vertices (out-degree 0) redistribute their rank mass uniformly
//! across all vertices, preserving total rank mass = 1.
//!
//! Iteration stops when the L1 norm of the rank delta falls below
//! `tolerance`, or unconditionally at `max_iter` — non-convergence is not
//! an error; the result reports `converged: false` and carries the best
//! estimate.

use petgraph::Direction;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use tracing::instrument;

use torgraph_core::DomainGraph;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for PageRank computation.
#[derive(Debug, Clone)]
pub struct PageRankConfig {
    /// Damping factor (probability of following a link vs teleporting).
    /// Default: 0.85.
    pub damping: f64,
    /// Convergence threshold: stop when L1 norm of rank delta < tolerance.
    /// Default: 1e-6.
    pub tolerance: f64,
    /// Maximum number of iterations; a hard termination cap.
    /// Default: 100.
    pub max_iter: usize,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            tolerance: 1e-6,
            max_iter: 100,
        }
    }
}

// ---------------------------------------------------------------------------
// Result type
// ---------------------------------------------------------------------------

/// Result of a PageRank computation.
#[derive(Debug, Clone)]
pub struct PageRankResult {
    /// `(domain, score)` pairs, descending by score; ties keep canonical
    /// vertex order (stable sort).
    pub ranking: Vec<(String, f64)>,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Whether the L1 delta fell below tolerance within `max_iter`.
    pub converged: bool,
}

impl PageRankResult {
    /// Look up one domain's score.
    #[must_use]
    pub fn score(&self, domain: &str) -> Option<f64> {
        self.ranking
            .iter()
            .find(|(d, _)| d == domain)
            .map(|&(_, s)| s)
    }
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

/// Compute weighted PageRank for every domain in the graph.
#[must_use]
#[instrument(skip(graph, config), fields(nodes = graph.node_count()))]
#[allow(clippy::cast_precision_loss)]
pub fn pagerank(graph: &DomainGraph, config: &PageRankConfig) -> PageRankResult {
    let g = &graph.graph;
    let n = g.node_count();

    if n == 0 {
        return PageRankResult {
            ranking: Vec::new(),
            iterations: 0,
            converged: true,
        };
    }

    let n_f64 = n as f64;
    let base = (1.0 - config.damping) / n_f64;

    // Total outgoing weight per vertex, once up front. 0 marks a dangling
    // vertex.
    let out_weight: Vec<f64> = (0..n)
        .map(|i| {
            g.edges_directed(NodeIndex::new(i), Direction::Outgoing)
                .map(|e| *e.weight() as f64)
                .sum()
        })
        .collect();

    let mut ranks = vec![1.0 / n_f64; n];
    let mut new_ranks = vec![0.0_f64; n];

    let mut iterations = 0;
    let mut converged = false;

    for _ in 0..config.max_iter {
        iterations += 1;

        for r in &mut new_ranks {
            *r = base;
        }

        for i in 0..n {
            let node = NodeIndex::new(i);
            if out_weight[i] == 0.0 {
                // Dangling vertex: spread its mass over every vertex.
                let share = config.damping * ranks[i] / n_f64;
                for r in &mut new_ranks {
                    *r += share;
                }
            } else {
                let scale = config.damping * ranks[i] / out_weight[i];
                for edge in g.edges_directed(node, Direction::Outgoing) {
                    new_ranks[edge.target().index()] += scale * *edge.weight() as f64;
                }
            }
        }

        let delta: f64 = ranks
            .iter()
            .zip(new_ranks.iter())
            .map(|(old, new)| (old - new).abs())
            .sum();

        std::mem::swap(&mut ranks, &mut new_ranks);

        if delta < config.tolerance {
            converged = true;
            break;
        }
    }

    // Rank descending; sort_by is stable, so equal scores keep canonical
    // vertex order.
    let mut ranking: Vec<(String, f64)> = graph
        .domains()
        .map(str::to_owned)
        .zip(ranks.iter().copied())
        .collect();
    ranking.sort_by(|a, b| b.1.total_cmp(&a.1));

    PageRankResult {
        ranking,
        iterations,
        converged,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
