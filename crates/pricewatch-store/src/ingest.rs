//! Listing ingestion from a directory of scraped JSON containers.
//!
//! Each container is a JSON array of objects carrying at least `title`,
//! `price` and optionally `link`. Files are read in file-name order and
//! listings keep their in-file order, which fixes the order that
//! first-seen deduplication depends on.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::NaiveDate;
use pricewatch_core::{PipelineConfig, RawListing};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::StoreError;

static FILE_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").expect("valid file date pattern"));

/// One scraped record. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct SourceRecord {
    #[serde(default)]
    title: Option<Value>,
    #[serde(default)]
    price: Option<Value>,
    #[serde(default)]
    link: Option<Value>,
}

impl SourceRecord {
    fn into_raw(self, capture_date: Option<NaiveDate>) -> RawListing {
        RawListing {
            title: text_of(self.title),
            price_text: text_of(self.price),
            // Only string links carry an identity.
            link: self.link.and_then(|v| v.as_str().map(str::to_string)),
            capture_date,
        }
    }
}

/// Strings pass through, numbers print as written, anything else is empty.
fn text_of(value: Option<Value>) -> String {
    match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// A source file that could not be read as a listing container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSource {
    pub path: PathBuf,
    pub reason: String,
}

/// Everything one ingestion pass produced.
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Listings in file-name order, then in-file order.
    pub listings: Vec<RawListing>,
    /// Source files read successfully.
    pub sources: usize,
    pub skipped: Vec<SkippedSource>,
}

/// Capture date embedded in a file name, e.g. `marketplace_2025-03-01.json`.
///
/// The first `YYYY-MM-DD` substring that is a real calendar date wins.
pub fn capture_date(file_name: &str) -> Option<NaiveDate> {
    FILE_DATE
        .find_iter(file_name)
        .find_map(|m| NaiveDate::parse_from_str(m.as_str(), "%Y-%m-%d").ok())
}

/// Source files in `config.data_dir`, sorted by file name.
pub fn source_files(config: &PipelineConfig) -> Result<Vec<PathBuf>, StoreError> {
    if !config.data_dir.is_dir() {
        return Err(StoreError::DataDirNotFound(config.data_dir.clone()));
    }
    let mut files = Vec::new();
    for entry in std::fs::read_dir(&config.data_dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            debug!(path = ?entry.path(), "skipping non-UTF8 file name");
            continue;
        };
        if config.is_source_file(name) && entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Read one listing container, tagging each listing with the file's capture date.
pub fn read_source(path: &Path) -> Result<Vec<RawListing>, StoreError> {
    let capture_date = path
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(capture_date);
    let bytes = std::fs::read(path)?;
    let records: Vec<SourceRecord> = serde_json::from_slice(&bytes)?;
    Ok(records
        .into_iter()
        .map(|r| r.into_raw(capture_date))
        .collect())
}

/// Read every source container under the configured data directory.
///
/// A container that fails to read or parse is skipped and reported; only a
/// missing data directory is an error. Zero listings is left for the caller
/// to judge.
pub fn ingest(config: &PipelineConfig) -> Result<IngestReport, StoreError> {
    let mut report = IngestReport::default();
    for path in source_files(config)? {
        match read_source(&path) {
            Ok(listings) => {
                debug!(path = ?path, count = listings.len(), "read source file");
                report.listings.extend(listings);
                report.sources += 1;
            }
            Err(e) => {
                warn!(path = ?path, error = %e, "skipping unreadable source file");
                report.skipped.push(SkippedSource {
                    path,
                    reason: e.to_string(),
                });
            }
        }
    }
    info!(
        sources = report.sources,
        skipped = report.skipped.len(),
        listings = report.listings.len(),
        "ingested listings"
    );
    Ok(report)
}
