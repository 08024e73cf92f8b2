#![forbid(unsafe_code)]
//! torgraph-metrics library.
//!
//! Read-only analysis queries over a built
//! [`DomainGraph`](torgraph_core::DomainGraph):
//!
//! - **PageRank** ([`pagerank`]): which domains accumulate link authority?
//!   Rank mass flows along edges in proportion to edge weight.
//! - **Degree rankings** ([`degree`]): which domains have the most distinct
//!   in- or out-neighbor edges?
//! - **Shortest paths** ([`paths`]): all-pairs hop distances, diameter, and
//!   average finite path length.
//! - **Graph statistics** ([`stats`]): counts, density, degree extremes.
//! - **Metric report** ([`report`]): everything above in one serializable
//!   payload for the reporting boundary.
//!
//! Every query is a pure function of the graph snapshot passed in — nothing
//! here mutates the graph or keeps state between calls, so independent
//! queries may run concurrently against the same graph.
//!
//! # Conventions
//!
//! - **Errors**: none. Degenerate inputs yield explicit `Option::None`
//!   ("undefined") metrics, never a numeric placeholder or a panic.
//! - **Logging**: `tracing` macros; `#[instrument]` on the iterative solver.

pub mod degree;
pub mod pagerank;
pub mod paths;
pub mod report;
pub mod stats;

pub use pagerank::{PageRankConfig, PageRankResult};
pub use paths::DistanceMatrix;
pub use report::MetricReport;
pub use stats::GraphStats;
