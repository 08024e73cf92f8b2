//! `torgraph analyze` — metric report over a stored graph.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use torgraph_core::config::DataConfig;
use torgraph_core::store;
use torgraph_metrics::{MetricReport, PageRankConfig};

use crate::output::{OutputMode, fmt_metric, pretty_kv, pretty_section, render};

/// Arguments for `torgraph analyze`.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Stored graph file to analyze (overrides config).
    #[arg(long, value_name = "FILE")]
    pub graph: Option<PathBuf>,

    /// Number of entries in each ranking.
    #[arg(long, default_value_t = 3)]
    pub top: usize,

    /// PageRank damping factor.
    #[arg(long, default_value_t = 0.85)]
    pub damping: f64,

    /// PageRank convergence tolerance (L1).
    #[arg(long, default_value_t = 1e-6)]
    pub tolerance: f64,

    /// PageRank iteration cap.
    #[arg(long, default_value_t = 100)]
    pub max_iter: usize,
}

/// Execute `torgraph analyze`.
pub fn run_analyze(args: &AnalyzeArgs, config: &DataConfig, output: OutputMode) -> Result<()> {
    let graph_path = args.graph.clone().unwrap_or_else(|| config.graph_path());

    let stored = store::load(&graph_path)
        .with_context(|| format!("failed to load graph from {}", graph_path.display()))?;
    let graph = stored
        .to_graph()
        .with_context(|| format!("stored graph {} is inconsistent", graph_path.display()))?;

    let pr_config = PageRankConfig {
        damping: args.damping,
        tolerance: args.tolerance,
        max_iter: args.max_iter,
    };
    let report = MetricReport::compute(&graph, &pr_config, args.top);

    render(output, &report, |report, w| render_report_human(report, w))
}

fn render_report_human(report: &MetricReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Graph summary")?;
    pretty_kv(w, "vertices", report.stats.node_count.to_string())?;
    pretty_kv(w, "edges", report.stats.edge_count.to_string())?;
    pretty_kv(w, "total links", report.stats.total_link_count.to_string())?;
    pretty_kv(w, "density", fmt_metric(report.stats.density))?;
    pretty_kv(w, "diameter", fmt_metric(report.stats.diameter))?;
    pretty_kv(
        w,
        "avg shortest path",
        fmt_metric(report.stats.average_path_length),
    )?;
    pretty_kv(
        w,
        "isolated domains",
        report.stats.isolated_node_count.to_string(),
    )?;
    pretty_kv(w, "self-loops", report.stats.self_loop_count.to_string())?;
    pretty_kv(
        w,
        "mean out-degree",
        fmt_metric(report.stats.mean_out_degree),
    )?;
    writeln!(w)?;

    let convergence = if report.pagerank_converged {
        format!("converged in {} iterations", report.pagerank_iterations)
    } else {
        format!(
            "did not converge within {} iterations (best estimate shown)",
            report.pagerank_iterations
        )
    };
    pretty_section(w, &format!("Top domains by PageRank ({convergence})"))?;
    for entry in &report.pagerank_top {
        writeln!(w, "  {:<40} {:.6}", entry.domain, entry.score)?;
    }
    writeln!(w)?;

    pretty_section(w, "Top domains by in-degree")?;
    for entry in &report.in_degree_top {
        writeln!(w, "  {:<40} {}", entry.domain, entry.degree)?;
    }
    writeln!(w)?;

    pretty_section(w, "Top domains by out-degree")?;
    for entry in &report.out_degree_top {
        writeln!(w, "  {:<40} {}", entry.domain, entry.degree)?;
    }

    Ok(())
}
