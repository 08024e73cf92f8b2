//! `torgraph export` — GraphML export of a stored graph.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use torgraph_core::config::DataConfig;
use torgraph_core::store;

use crate::output::{OutputMode, pretty_kv, render};

/// Arguments for `torgraph export`.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Stored graph file to export (overrides config).
    #[arg(long, value_name = "FILE")]
    pub graph: Option<PathBuf>,

    /// GraphML output path (overrides config; `-` for stdout).
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Report payload for `torgraph export`.
#[derive(Debug, Serialize)]
struct ExportReport {
    vertices: usize,
    edges: usize,
    output: String,
}

/// Execute `torgraph export`.
pub fn run_export(args: &ExportArgs, config: &DataConfig, output: OutputMode) -> Result<()> {
    let graph_path = args.graph.clone().unwrap_or_else(|| config.graph_path());
    let out_path = args.output.clone().unwrap_or_else(|| config.graphml_path());

    let stored = store::load(&graph_path)
        .with_context(|| format!("failed to load graph from {}", graph_path.display()))?;

    if out_path == PathBuf::from("-") {
        let stdout = std::io::stdout();
        store::write_graphml(stdout.lock(), &stored).context("failed to write GraphML")?;
        return Ok(());
    }

    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let mut writer = BufWriter::new(
        File::create(&out_path)
            .with_context(|| format!("failed to create {}", out_path.display()))?,
    );
    store::write_graphml(&mut writer, &stored)
        .with_context(|| format!("failed to write GraphML to {}", out_path.display()))?;
    writer.flush()?;

    let payload = ExportReport {
        vertices: stored.vertices.len(),
        edges: stored.edges.len(),
        output: out_path.display().to_string(),
    };

    render(output, &payload, |payload, w| {
        pretty_kv(w, "vertices", payload.vertices.to_string())?;
        pretty_kv(w, "edges", payload.edges.to_string())?;
        pretty_kv(w, "output", &payload.output)
    })
}
