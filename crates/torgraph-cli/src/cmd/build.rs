//! `torgraph build` — build the domain graph from merged records.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use torgraph_core::config::DataConfig;
use torgraph_core::graph::DomainGraph;
use torgraph_core::normalize::load_records;
use torgraph_core::store::{self, StoredGraph};

use crate::output::{OutputMode, pretty_kv, render};

/// Arguments for `torgraph build`.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Merged record list to read (overrides config).
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Graph file to write (overrides config).
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Graph name attribute stored in the output.
    #[arg(long, default_value = "torNetwork")]
    pub name: String,
}

/// Report payload for `torgraph build`.
#[derive(Debug, Serialize)]
struct BuildReport {
    records: usize,
    vertices: usize,
    edges: usize,
    content_hash: String,
    output: String,
}

/// Execute `torgraph build`.
pub fn run_build(args: &BuildArgs, config: &DataConfig, output: OutputMode) -> Result<()> {
    let input_path = args.input.clone().unwrap_or_else(|| config.url_path());
    let output_path = args.output.clone().unwrap_or_else(|| config.graph_path());

    let records = load_records(&input_path)
        .with_context(|| format!("failed to load records from {}", input_path.display()))?;

    let graph = DomainGraph::from_records(&records);
    let stored = StoredGraph::from_graph(&args.name, &graph);
    store::save(&output_path, &stored)
        .with_context(|| format!("failed to save graph to {}", output_path.display()))?;

    let payload = BuildReport {
        records: records.len(),
        vertices: graph.node_count(),
        edges: graph.edge_count(),
        content_hash: graph.content_hash,
        output: output_path.display().to_string(),
    };

    render(output, &payload, |payload, w| {
        pretty_kv(w, "records", payload.records.to_string())?;
        pretty_kv(w, "vertices", payload.vertices.to_string())?;
        pretty_kv(w, "edges", payload.edges.to_string())?;
        pretty_kv(w, "content hash", &payload.content_hash)?;
        pretty_kv(w, "output", &payload.output)
    })
}
