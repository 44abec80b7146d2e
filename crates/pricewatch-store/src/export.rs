//! CSV and Parquet sinks for report tables.

use std::fs::File;
use std::path::{Path, PathBuf};

use arrow::csv::WriterBuilder;
use arrow::record_batch::RecordBatch;
use tracing::info;

use crate::StoreError;

/// Write `batch` as a CSV file with a header row.
pub fn write_csv(batch: &RecordBatch, path: &Path) -> Result<(), StoreError> {
    let file = File::create(path)?;
    let mut writer = WriterBuilder::new().with_header(true).build(file);
    writer.write(batch)?;
    Ok(())
}

/// Write `batch` as a single-row-group Parquet file.
#[cfg(feature = "parquet")]
pub fn write_parquet(batch: &RecordBatch, path: &Path) -> Result<(), StoreError> {
    use parquet::arrow::ArrowWriter;

    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(batch)?;
    writer.close()?;
    Ok(())
}

/// Writes named report tables into one output directory.
pub struct TableWriter {
    dir: PathBuf,
    #[cfg_attr(not(feature = "parquet"), allow(dead_code))]
    parquet: bool,
}

impl TableWriter {
    /// Create the output directory if needed.
    ///
    /// `parquet` is ignored when the crate is built without the `parquet` feature.
    pub fn create(dir: &Path, parquet: bool) -> Result<Self, StoreError> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            parquet,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `batch` as `<name>.csv` (and `<name>.parquet` when enabled).
    /// Returns the paths written.
    pub fn write(&self, name: &str, batch: &RecordBatch) -> Result<Vec<PathBuf>, StoreError> {
        let mut written = Vec::with_capacity(2);

        let csv_path = self.dir.join(format!("{name}.csv"));
        write_csv(batch, &csv_path)?;
        written.push(csv_path);

        #[cfg(feature = "parquet")]
        if self.parquet {
            let parquet_path = self.dir.join(format!("{name}.parquet"));
            write_parquet(batch, &parquet_path)?;
            written.push(parquet_path);
        }

        info!(table = name, rows = batch.num_rows(), "wrote table");
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use arrow::array::{StringArray, UInt64Array};
    use arrow::datatypes::{DataType, Field, Schema};
    use tempfile::TempDir;

    fn batch() -> RecordBatch {
        let schema = Arc::new(Schema::new(vec![
            Field::new("model", DataType::Utf8, false),
            Field::new("price", DataType::UInt64, true),
        ]));
        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(vec!["MacBook Air", "MacBook Pro"])),
                Arc::new(UInt64Array::from(vec![Some(18_500), None])),
            ],
        )
        .unwrap()
    }

    #[test]
    fn csv_has_header_and_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("t.csv");
        write_csv(&batch(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["model,price", "MacBook Air,18500", "MacBook Pro,"]);
    }

    #[test]
    fn writer_creates_directory() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("output").join("data");
        let writer = TableWriter::create(&out, false).unwrap();
        let written = writer.write("summary_stats", &batch()).unwrap();
        assert_eq!(written, vec![out.join("summary_stats.csv")]);
        assert!(out.join("summary_stats.csv").exists());
        assert!(!out.join("summary_stats.parquet").exists());
    }

    #[cfg(feature = "parquet")]
    #[test]
    fn parquet_round_trips_row_count() {
        use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

        let dir = TempDir::new().unwrap();
        let writer = TableWriter::create(dir.path(), true).unwrap();
        let written = writer.write("verification", &batch()).unwrap();
        assert_eq!(written.len(), 2);

        let file = File::open(dir.path().join("verification.parquet")).unwrap();
        let reader = ParquetRecordBatchReaderBuilder::try_new(file)
            .unwrap()
            .build()
            .unwrap();
        let rows: usize = reader.map(|b| b.unwrap().num_rows()).sum();
        assert_eq!(rows, 2);
    }
}
