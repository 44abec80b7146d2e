use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("data directory not found: {0}")]
    DataDirNotFound(std::path::PathBuf),

    #[error("no listings ingested from {0}")]
    NoListings(std::path::PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[cfg(feature = "parquet")]
    #[error("parquet error: {0}")]
    Parquet(#[from] ::parquet::errors::ParquetError),
}
