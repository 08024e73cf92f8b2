//! `torgraph merge` — merge raw crawl archives into one record list.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use torgraph_core::config::DataConfig;
use torgraph_core::normalize::merge_crawl_files;

use crate::output::{OutputMode, pretty_kv, render};

/// Arguments for `torgraph merge`.
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Folder holding raw gzipped crawl page files (overrides config).
    #[arg(long, value_name = "DIR")]
    pub pages_dir: Option<PathBuf>,

    /// Output folder for the merged record list (overrides config).
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

/// Report payload for `torgraph merge`.
#[derive(Debug, Serialize)]
struct MergeReport {
    merged_files: usize,
    skipped_files: Vec<String>,
    records: usize,
    output: String,
}

/// Execute `torgraph merge`.
pub fn run_merge(args: &MergeArgs, mut config: DataConfig, output: OutputMode) -> Result<()> {
    if let Some(dir) = &args.pages_dir {
        config.pages_dir.clone_from(dir);
    }
    if let Some(dir) = &args.out_dir {
        config.out_dir.clone_from(dir);
    }

    let summary = merge_crawl_files(&config)
        .with_context(|| format!("failed to merge crawl files in {}", config.pages_dir.display()))?;

    let payload = MergeReport {
        merged_files: summary.merged_files,
        skipped_files: summary
            .skipped_files
            .iter()
            .map(|p| p.display().to_string())
            .collect(),
        records: summary.records,
        output: config.url_path().display().to_string(),
    };

    render(output, &payload, |payload, w| {
        pretty_kv(w, "merged files", payload.merged_files.to_string())?;
        pretty_kv(w, "skipped files", payload.skipped_files.len().to_string())?;
        for skipped in &payload.skipped_files {
            writeln!(w, "  skipped: {skipped}")?;
        }
        pretty_kv(w, "records", payload.records.to_string())?;
        pretty_kv(w, "output", &payload.output)
    })
}
