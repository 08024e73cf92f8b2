//! Graph persistence: JSON interchange plus GraphML export.
//!
//! # Overview
//!
//! A built [`DomainGraph`] is persisted as a gzipped JSON document so later
//! analysis runs can reload it without re-reading the crawl records. The
//! round trip is lossless: same vertex set (in canonical order), same edge
//! set, same weights, same content hash.
//!
//! A GraphML export is also provided for interoperability with external
//! graph tooling — vertices carry a `name` attribute and directed edges a
//! `weight` attribute. GraphML is write-only here; the JSON document is the
//! authoritative interchange format.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::graph::DomainGraph;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors from graph store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O failure reading or writing a graph file.
    #[error("graph store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored graph document could not be parsed.
    #[error("graph store parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// An edge references a domain missing from the vertex list.
    #[error("edge references unknown vertex {0:?}")]
    UnknownVertex(String),

    /// An edge carries weight 0, which the graph model forbids.
    #[error("edge {from} → {to} has zero weight")]
    ZeroWeight {
        /// Source domain of the offending edge.
        from: String,
        /// Target domain of the offending edge.
        to: String,
    },
}

// ---------------------------------------------------------------------------
// Stored document
// ---------------------------------------------------------------------------

/// One weighted directed edge in the stored document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEdge {
    /// Source domain.
    pub from: String,
    /// Target domain.
    pub to: String,
    /// Link-occurrence count; always ≥ 1.
    pub weight: u64,
}

/// Serialized form of a [`DomainGraph`].
///
/// `vertices` preserves the builder's canonical (first-seen) order so that
/// ranking tie-breaks are identical before and after a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredGraph {
    /// Graph name attribute (e.g. `torNetwork`).
    pub name: String,
    /// When the graph was built, UTC.
    pub built_at: DateTime<Utc>,
    /// BLAKE3 content hash of the graph at build time.
    pub content_hash: String,
    /// Domains in canonical order.
    pub vertices: Vec<String>,
    /// Weighted directed edges.
    pub edges: Vec<StoredEdge>,
}

impl StoredGraph {
    /// Capture a built graph into its stored form.
    #[must_use]
    pub fn from_graph(name: impl Into<String>, graph: &DomainGraph) -> Self {
        let vertices: Vec<String> = graph.domains().map(str::to_owned).collect();

        let edges: Vec<StoredEdge> = graph
            .graph
            .edge_indices()
            .filter_map(|e| {
                let (a, b) = graph.graph.edge_endpoints(e)?;
                Some(StoredEdge {
                    from: graph.graph[a].clone(),
                    to: graph.graph[b].clone(),
                    weight: *graph.graph.edge_weight(e)?,
                })
            })
            .collect();

        Self {
            name: name.into(),
            built_at: Utc::now(),
            content_hash: graph.content_hash.clone(),
            vertices,
            edges,
        }
    }

    /// Reconstruct the in-memory graph without passing through the builder.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownVertex`] if an edge references a domain
    /// missing from `vertices`, or [`StoreError::ZeroWeight`] if an edge
    /// violates the weight ≥ 1 invariant.
    pub fn to_graph(&self) -> Result<DomainGraph, StoreError> {
        for edge in &self.edges {
            if edge.weight == 0 {
                return Err(StoreError::ZeroWeight {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                });
            }
        }

        DomainGraph::from_parts(
            self.vertices.clone(),
            self.edges
                .iter()
                .map(|e| (e.from.clone(), e.to.clone(), e.weight)),
        )
        .map_err(StoreError::UnknownVertex)
    }
}

// ---------------------------------------------------------------------------
// File I/O
// ---------------------------------------------------------------------------

/// Write a stored graph as gzipped JSON.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
#[instrument(skip(stored, path), fields(path = %path.display(), vertices = stored.vertices.len()))]
pub fn save(path: &Path, stored: &StoredGraph) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = GzEncoder::new(BufWriter::new(File::create(path)?), Compression::default());
    serde_json::to_writer(&mut writer, stored)?;
    writer.try_finish()?;
    info!("graph saved");
    Ok(())
}

/// Read a stored graph written by [`save`].
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
#[instrument(skip(path), fields(path = %path.display()))]
pub fn load(path: &Path) -> Result<StoredGraph, StoreError> {
    let reader = GzDecoder::new(BufReader::new(File::open(path)?));
    let stored = serde_json::from_reader(reader)?;
    Ok(stored)
}

// ---------------------------------------------------------------------------
// GraphML export
// ---------------------------------------------------------------------------

/// Write the stored graph as GraphML.
///
/// Vertex ids are positional (`n0`, `n1`, …); the domain goes into the
/// `name` data attribute, matching the artifact layout the crawl tooling
/// expects.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_graphml<W: Write>(mut w: W, stored: &StoredGraph) -> Result<(), StoreError> {
    writeln!(w, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        w,
        r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns">"#
    )?;
    writeln!(
        w,
        r#"  <key id="name" for="node" attr.name="name" attr.type="string"/>"#
    )?;
    writeln!(
        w,
        r#"  <key id="weight" for="edge" attr.name="weight" attr.type="double"/>"#
    )?;
    writeln!(
        w,
        r#"  <graph id="{}" edgedefault="directed">"#,
        xml_escape(&stored.name)
    )?;

    let index_of = |domain: &str| stored.vertices.iter().position(|v| v == domain);

    for (i, vertex) in stored.vertices.iter().enumerate() {
        writeln!(
            w,
            r#"    <node id="n{i}"><data key="name">{}</data></node>"#,
            xml_escape(vertex)
        )?;
    }

    for edge in &stored.edges {
        let from = index_of(&edge.from).ok_or_else(|| StoreError::UnknownVertex(edge.from.clone()))?;
        let to = index_of(&edge.to).ok_or_else(|| StoreError::UnknownVertex(edge.to.clone()))?;
        writeln!(
            w,
            r#"    <edge source="n{from}" target="n{to}"><data key="weight">{}</data></edge>"#,
            edge.weight
        )?;
    }

    writeln!(w, "  </graph>")?;
    writeln!(w, "</graphml>")?;
    Ok(())
}

/// Escape the five XML special characters.
fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
