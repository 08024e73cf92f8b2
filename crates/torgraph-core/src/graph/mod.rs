//! Domain link graph construction.
//!
//! # Overview
//!
//! This module builds a [`petgraph`] directed weighted graph from a sequence
//! of normalized [`PageRecord`](crate::record::PageRecord) values. Vertices
//! are hidden-service domains; an edge `A → B` with weight `w` means pages
//! on domain `A` were observed linking to pages on domain `B` exactly `w`
//! times. Self-loops (`A → A`) are permitted and meaningful.
//!
//! ## Pipeline
//!
//! ```text
//! Vec<PageRecord>
//!        ↓  build::DomainGraph::from_records()
//! DomainGraph (DiGraph<String, u64> + node_map + content hash)
//!        ↓  torgraph-metrics (PageRank, degrees, shortest paths, …)
//! ```
//!
//! ## Cache Invalidation
//!
//! [`DomainGraph::content_hash`] is a BLAKE3 hash of the vertex set and the
//! sorted weighted edge list. Compare it against a stored value to detect
//! when a persisted graph no longer matches its source records.

pub mod build;

pub use build::DomainGraph;
