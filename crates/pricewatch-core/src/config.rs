//! Pipeline configuration passed explicitly into the run entry point.

use std::path::PathBuf;

use serde::Deserialize;

/// Locations and switches for one batch run.
///
/// Nothing in the extraction core reads the environment; the CLI builds this
/// value from flags, environment fallbacks, or a JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory holding the scraped listing containers.
    pub data_dir: PathBuf,
    /// Directory the report tables are written to.
    pub output_dir: PathBuf,
    /// Only files whose name starts with this prefix are ingested.
    pub source_prefix: String,
    /// File extension of listing containers, without the dot.
    pub source_extension: String,
    /// Also write every table as Parquet next to the CSV.
    pub write_parquet: bool,
    /// Normalise listings on the rayon pool. Output order is unaffected.
    pub parallel: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("output/data"),
            source_prefix: "marketplace".to_string(),
            source_extension: "json".to_string(),
            write_parquet: false,
            parallel: true,
        }
    }
}

impl PipelineConfig {
    /// Parse a JSON config; missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Whether `file_name` names a listing container this run should ingest.
    pub fn is_source_file(&self, file_name: &str) -> bool {
        file_name.starts_with(&self.source_prefix)
            && file_name
                .rsplit_once('.')
                .is_some_and(|(_, ext)| ext == self.source_extension)
    }
}
