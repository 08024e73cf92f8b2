//! Two-pass graph construction from normalized crawl records.
//!
//! # Overview
//!
//! The builder makes two passes over the record list:
//!
//! 1. **Vertex discovery** — every qualifying page domain and outlink domain
//!    is registered as a vertex. This guarantees that every domain that will
//!    ever appear as an edge endpoint pre-exists before edges are added, and
//!    that isolated domains (no qualifying links in either direction) still
//!    appear as vertices with degree 0.
//! 2. **Edge accumulation** — for every record whose page URL qualifies,
//!    each qualifying outlink increments the weight of the corresponding
//!    domain pair by one. Multiple links on the same page to the same target
//!    domain increment the weight each time.
//!
//! The two-pass ordering is deliberate: a single-pass implicit-vertex
//! approach would silently drop domains with no outgoing links.
//!
//! Construction is a pure function over its input — it performs no I/O and
//! never fails. Malformed individual URLs are excluded per
//! [`crate::domain::onion_host`].

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use tracing::instrument;

use crate::domain::onion_host;
use crate::record::PageRecord;

// ---------------------------------------------------------------------------
// DomainGraph
// ---------------------------------------------------------------------------

/// A directed weighted graph of hidden-service domains.
///
/// Nodes are domain strings. An edge `A → B` with weight `w` means `w`
/// page-to-page links from domain `A` to domain `B` were observed across
/// the whole record set. Every present edge has weight ≥ 1; absence
/// encodes zero.
///
/// Node index order is first-seen order during vertex discovery. That order
/// is the canonical vertex order used for stable tie-breaking in rankings,
/// and it survives a store round-trip.
#[derive(Debug)]
pub struct DomainGraph {
    /// Directed graph: nodes = domains, edge weights = link counts.
    pub graph: DiGraph<String, u64>,
    /// Mapping from domain to petgraph `NodeIndex`.
    pub node_map: HashMap<String, NodeIndex>,
    /// BLAKE3 content hash of the vertex set and weighted edge list.
    pub content_hash: String,
}

impl DomainGraph {
    /// Build a [`DomainGraph`] from a complete sequence of records.
    ///
    /// A record with a non-qualifying or malformed page URL contributes no
    /// edges, but its qualifying outlinks still register as vertices — they
    /// may be targets of other pages' edges.
    #[must_use]
    #[instrument(skip(records), fields(records = records.len()))]
    pub fn from_records(records: &[PageRecord]) -> Self {
        let mut graph = DiGraph::<String, u64>::new();
        let mut node_map: HashMap<String, NodeIndex> = HashMap::new();

        // Pass 1: vertex discovery, in record order.
        for record in records {
            if let Some(domain) = onion_host(&record.page_url) {
                intern(&mut graph, &mut node_map, domain);
            }
            for link in &record.link_urls {
                if let Some(domain) = onion_host(link) {
                    intern(&mut graph, &mut node_map, domain);
                }
            }
        }

        // Pass 2: edge accumulation. Both endpoints were registered above.
        for record in records {
            let Some(page_domain) = onion_host(&record.page_url) else {
                continue;
            };
            let Some(&from) = node_map.get(&page_domain) else {
                continue;
            };
            for link in &record.link_urls {
                let Some(link_domain) = onion_host(link) else {
                    continue;
                };
                let Some(&to) = node_map.get(&link_domain) else {
                    continue;
                };
                if let Some(edge) = graph.find_edge(from, to) {
                    if let Some(weight) = graph.edge_weight_mut(edge) {
                        *weight += 1;
                    }
                } else {
                    graph.add_edge(from, to, 1);
                }
            }
        }

        let content_hash = compute_content_hash(&graph);

        Self {
            graph,
            node_map,
            content_hash,
        }
    }

    /// Reassemble a graph from stored vertices and weighted edges.
    ///
    /// Used by the graph store to reload a persisted graph without passing
    /// through the builder again. Vertex order in `vertices` becomes the
    /// canonical vertex order. Edges referencing domains absent from
    /// `vertices` are reported back to the caller by name.
    ///
    /// # Errors
    ///
    /// Returns the first unknown domain name referenced by an edge.
    pub fn from_parts(
        vertices: Vec<String>,
        edges: impl IntoIterator<Item = (String, String, u64)>,
    ) -> Result<Self, String> {
        let mut graph = DiGraph::<String, u64>::new();
        let mut node_map: HashMap<String, NodeIndex> = HashMap::with_capacity(vertices.len());

        for domain in vertices {
            intern(&mut graph, &mut node_map, domain);
        }

        for (from, to, weight) in edges {
            let Some(&a) = node_map.get(&from) else {
                return Err(from);
            };
            let Some(&b) = node_map.get(&to) else {
                return Err(to);
            };
            graph.add_edge(a, b, weight);
        }

        let content_hash = compute_content_hash(&graph);

        Ok(Self {
            graph,
            node_map,
            content_hash,
        })
    }

    /// Return the number of domains (vertices) in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of distinct weighted edges in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Look up the `NodeIndex` for a domain.
    #[must_use]
    pub fn node_index(&self, domain: &str) -> Option<NodeIndex> {
        self.node_map.get(domain).copied()
    }

    /// Return the domain label for a node.
    #[must_use]
    pub fn domain(&self, idx: NodeIndex) -> Option<&str> {
        self.graph.node_weight(idx).map(String::as_str)
    }

    /// Iterate domains in canonical (first-seen) order.
    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(String::as_str)
    }

    /// Return the weight of edge `(from, to)`, or `None` if absent.
    #[must_use]
    pub fn weight(&self, from: &str, to: &str) -> Option<u64> {
        let a = self.node_index(from)?;
        let b = self.node_index(to)?;
        let edge = self.graph.find_edge(a, b)?;
        self.graph.edge_weight(edge).copied()
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Register `domain` as a vertex, returning the existing index if present.
fn intern(
    graph: &mut DiGraph<String, u64>,
    node_map: &mut HashMap<String, NodeIndex>,
    domain: String,
) -> NodeIndex {
    if let Some(&idx) = node_map.get(&domain) {
        return idx;
    }
    let idx = graph.add_node(domain.clone());
    node_map.insert(domain, idx);
    idx
}

/// Compute a BLAKE3 hash of the vertex set and sorted weighted edge list.
///
/// Isolated vertices participate in the hash, so adding a degree-0 domain
/// changes it even though the edge list is unchanged.
fn compute_content_hash(graph: &DiGraph<String, u64>) -> String {
    let mut vertices: Vec<&str> = graph.node_weights().map(String::as_str).collect();
    vertices.sort_unstable();

    let mut edges: Vec<(&str, &str, u64)> = graph
        .edge_indices()
        .filter_map(|e| {
            let (a, b) = graph.edge_endpoints(e)?;
            let weight = *graph.edge_weight(e)?;
            Some((graph[a].as_str(), graph[b].as_str(), weight))
        })
        .collect();
    edges.sort_unstable();

    let mut hasher = blake3::Hasher::new();
    for v in vertices {
        hasher.update(v.as_bytes());
        hasher.update(b"\x00");
    }
    hasher.update(b"\x01");
    for (from, to, weight) in edges {
        hasher.update(from.as_bytes());
        hasher.update(b"\x00");
        hasher.update(to.as_bytes());
        hasher.update(b"\x00");
        hasher.update(&weight.to_le_bytes());
    }
    format!("blake3:{}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
