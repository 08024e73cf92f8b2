//! Record normalization: merge raw crawl archives into one record list.
//!
//! # Overview
//!
//! The crawler writes one gzipped file per fetch batch, each holding one
//! JSON page object per line (URL, outlinks, title, content). Normalization
//! merges every `*.gz` file in the pages folder into a single gzipped JSON
//! **array** of [`PageRecord`] values with `title`/`content` stripped.
//!
//! # Partial-failure semantics
//!
//! A file copied out of an ongoing crawl may be truncated mid-write and
//! fail gzip or JSON decoding partway through. Such a file is skipped
//! **whole** with a warning; it never aborts the merge and no partial
//! records from it are emitted. The graph builder therefore only ever sees
//! complete, well-formed records.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read};
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use tracing::{debug, info, instrument, warn};

use crate::config::{CRAWL_SUFFIX, DataConfig};
use crate::record::{PageRecord, RawCrawlPage};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors from record normalization and record-list I/O.
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    /// I/O failure on the pages folder or the merged output file.
    #[error("record I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The merged record list could not be parsed.
    #[error("record list parse error: {0}")]
    Json(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Merge
// ---------------------------------------------------------------------------

/// Outcome of a merge run, for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeSummary {
    /// Source files merged successfully.
    pub merged_files: usize,
    /// Source files skipped as truncated or corrupt.
    pub skipped_files: Vec<PathBuf>,
    /// Total records written to the merged list.
    pub records: usize,
}

/// Merge all crawl archives under `config.pages_dir` into `config.url_path()`.
///
/// Files are processed in name order so repeated runs over the same crawl
/// produce an identical record list.
///
/// # Errors
///
/// Returns an error if the pages folder cannot be listed or the output file
/// cannot be written. Per-source-file decode failures are *not* errors —
/// the file is skipped and reported in the summary.
#[instrument(skip(config), fields(pages_dir = %config.pages_dir.display()))]
pub fn merge_crawl_files(config: &DataConfig) -> Result<MergeSummary, NormalizeError> {
    let mut sources: Vec<PathBuf> = std::fs::read_dir(&config.pages_dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == CRAWL_SUFFIX))
        .collect();
    sources.sort();

    let mut records = Vec::new();
    let mut merged_files = 0_usize;
    let mut skipped_files = Vec::new();

    for path in sources {
        match read_crawl_file(&path) {
            Ok(mut file_records) => {
                debug!(file = %path.display(), records = file_records.len(), "merged crawl file");
                records.append(&mut file_records);
                merged_files += 1;
            }
            Err(err) => {
                warn!(file = %path.display(), error = %err, "skipping corrupt crawl file");
                skipped_files.push(path);
            }
        }
    }

    let out_path = config.url_path();
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer =
        GzEncoder::new(BufWriter::new(File::create(&out_path)?), Compression::default());
    serde_json::to_writer(&mut writer, &records)?;
    writer.try_finish()?;

    info!(
        merged = merged_files,
        skipped = skipped_files.len(),
        records = records.len(),
        out = %out_path.display(),
        "crawl files merged"
    );

    Ok(MergeSummary {
        merged_files,
        skipped_files,
        records: records.len(),
    })
}

/// Load the merged record list written by [`merge_crawl_files`].
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a gzipped JSON
/// array of records.
#[instrument(skip(path), fields(path = %path.display()))]
pub fn load_records(path: &Path) -> Result<Vec<PageRecord>, NormalizeError> {
    let reader = GzDecoder::new(BufReader::new(File::open(path)?));
    let records = serde_json::from_reader(reader)?;
    Ok(records)
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Decode one crawl archive: gzipped, one JSON page object per line.
///
/// Decompresses fully before parsing so a truncated gzip stream surfaces as
/// an error for the *whole* file instead of a silently short record list.
fn read_crawl_file(path: &Path) -> Result<Vec<PageRecord>, NormalizeError> {
    let mut text = String::new();
    GzDecoder::new(BufReader::new(File::open(path)?)).read_to_string(&mut text)?;

    let mut records = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let page: RawCrawlPage = serde_json::from_str(line)?;
        records.push(page.strip());
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
