#![forbid(unsafe_code)]
//! torgraph-core library.
//!
//! Turns raw hidden-service crawl archives into a canonical domain-level
//! link graph and persists it to an interchange format.
//!
//! # Pipeline
//!
//! ```text
//! gzipped crawl files (one JSON page per line)
//!        ↓  normalize::merge_crawl_files()
//! merged record list (gzipped JSON array of PageRecord)
//!        ↓  graph::DomainGraph::from_records()
//! DomainGraph (directed, weighted, .onion domains only)
//!        ↓  store::StoredGraph / store::save()
//! JSON interchange file (+ optional GraphML export)
//! ```
//!
//! # Conventions
//!
//! - **Errors**: typed `thiserror` enums at module boundaries
//!   (`NormalizeError`, `StoreError`); `anyhow::Result` at I/O seams.
//!   Graph construction is a pure function and never fails.
//! - **Logging**: `tracing` macros (`info!`, `warn!`, `debug!`).

pub mod config;
pub mod domain;
pub mod graph;
pub mod normalize;
pub mod record;
pub mod store;

pub use graph::DomainGraph;
pub use record::PageRecord;
