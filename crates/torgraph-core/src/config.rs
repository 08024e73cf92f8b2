//! Data-folder configuration.
//!
//! Input/output locations are ordinary configuration passed explicitly into
//! the normalizer and the graph store — never ambient globals. Defaults
//! match the crawl layout; an optional `torgraph.toml` in the working
//! directory overrides them.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File suffix of raw crawl archives.
pub const CRAWL_SUFFIX: &str = "gz";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Folder holding the raw gzipped crawl page files.
    #[serde(default = "default_pages_dir")]
    pub pages_dir: PathBuf,

    /// Folder where merged record lists and graph files are written.
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    /// File name of the merged record list inside `out_dir`.
    #[serde(default = "default_url_file")]
    pub url_file: String,

    /// File name of the stored graph inside `out_dir`.
    #[serde(default = "default_graph_file")]
    pub graph_file: String,

    /// File name of the GraphML export inside `out_dir`.
    #[serde(default = "default_graphml_file")]
    pub graphml_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            pages_dir: default_pages_dir(),
            out_dir: default_out_dir(),
            url_file: default_url_file(),
            graph_file: default_graph_file(),
            graphml_file: default_graphml_file(),
        }
    }
}

impl DataConfig {
    /// Path of the merged record list.
    #[must_use]
    pub fn url_path(&self) -> PathBuf {
        self.out_dir.join(&self.url_file)
    }

    /// Path of the stored graph.
    #[must_use]
    pub fn graph_path(&self) -> PathBuf {
        self.out_dir.join(&self.graph_file)
    }

    /// Path of the GraphML export.
    #[must_use]
    pub fn graphml_path(&self) -> PathBuf {
        self.out_dir.join(&self.graphml_file)
    }
}

fn default_pages_dir() -> PathBuf {
    PathBuf::from("data/pages")
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("data/urls")
}

fn default_url_file() -> String {
    "all.json.gz".to_string()
}

fn default_graph_file() -> String {
    "torNetwork.json.gz".to_string()
}

fn default_graphml_file() -> String {
    "torNetwork.GraphML".to_string()
}

/// Load [`DataConfig`] from `<root>/torgraph.toml`, or defaults if absent.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_data_config(root: &Path) -> Result<DataConfig> {
    let path = root.join("torgraph.toml");
    if !path.exists() {
        return Ok(DataConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<DataConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}
