//! Storage layer: listing ingestion, Arrow table conversion, CSV/Parquet sinks.

mod error;
pub use error::StoreError;

pub mod batches;
pub mod export;
pub mod ingest;

pub use batches::{breakdown_to_batch, listings_to_batch, summary_to_batch};
pub use export::{TableWriter, write_csv};
#[cfg(feature = "parquet")]
pub use export::write_parquet;
pub use ingest::{IngestReport, SkippedSource, capture_date, ingest, read_source, source_files};
