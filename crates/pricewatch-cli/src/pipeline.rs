//! Batch pipeline: ingest → normalise → dedup → clean → aggregate → export.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use pricewatch_core::diagnostics::{self, Attribute};
use pricewatch_core::summary::{self, ProcessorPrice};
use pricewatch_core::tables::{self, review_columns};
use pricewatch_core::{Model, NormalizedListing, PipelineConfig, ScreenSize, dedup_by_link};
use pricewatch_store::{StoreError, TableWriter, ingest};
use tracing::info;

/// Lines and sizes covered by the processor breakdown report.
pub const REPORT_LINES: &[Model] = &[Model::MacBookAir, Model::MacBookPro];
pub const REPORT_SIZES: &[u16] = &[13, 14, 15, 16];

pub const CLEAN_TABLE: &str = "clean_listings";
pub const SUMMARY_TABLE: &str = "summary_stats";
pub const VERIFICATION_TABLE: &str = "verification";

/// Output table name for an attribute's review slice.
pub fn review_table(attribute: Attribute) -> &'static str {
    match attribute {
        Attribute::Processor => "unknown_processors",
        Attribute::Storage => "unknown_storage",
        Attribute::Ram => "unknown_ram",
        Attribute::Model => "unknown_model",
        Attribute::ScreenSize => "unknown_screen_size",
    }
}

/// Deduplicated listings ready for cleaning and diagnostics.
#[derive(Debug)]
pub struct Prepared {
    pub listings: Vec<NormalizedListing>,
    pub sources: usize,
    pub skipped: usize,
    pub ingested: usize,
}

#[derive(Debug)]
pub struct RunStats {
    pub sources: usize,
    pub skipped: usize,
    pub ingested: usize,
    pub unique: usize,
    pub eligible: usize,
    pub summary_rows: usize,
    pub written: Vec<PathBuf>,
    pub elapsed_secs: f64,
}

/// Ingest, normalise, and deduplicate. Zero ingested listings is an error.
pub fn prepare(config: &PipelineConfig) -> anyhow::Result<Prepared> {
    let report = ingest(config).context("ingesting listings")?;
    if report.listings.is_empty() {
        return Err(StoreError::NoListings(config.data_dir.clone()).into());
    }
    let ingested = report.listings.len();
    let normalized = pricewatch_rules::normalize_all(&report.listings, config.parallel);
    let listings = dedup_by_link(normalized);
    info!(ingested, unique = listings.len(), "prepared listings");
    Ok(Prepared {
        listings,
        sources: report.sources,
        skipped: report.skipped.len(),
        ingested,
    })
}

/// Run the full batch and write every report table to `config.output_dir`.
pub fn run_pipeline(config: &PipelineConfig) -> anyhow::Result<RunStats> {
    let start = Instant::now();
    let prepared = prepare(config)?;
    let listings = &prepared.listings;

    let writer = TableWriter::create(&config.output_dir, config.write_parquet)
        .with_context(|| format!("creating {}", config.output_dir.display()))?;
    let mut written = Vec::new();

    // 1. Cleaned listings and their price summary.
    let cleaned = summary::clean(listings);
    let batch = pricewatch_store::listings_to_batch(&cleaned, tables::CLEAN_COLUMNS)?;
    written.extend(writer.write(CLEAN_TABLE, &batch)?);

    let rows = summary::aggregate(cleaned.iter().copied());
    let batch = pricewatch_store::summary_to_batch(&rows)?;
    written.extend(writer.write(SUMMARY_TABLE, &batch)?);

    // 2. Review slices over every deduplicated listing.
    for slice in diagnostics::route(listings) {
        let batch =
            pricewatch_store::listings_to_batch(&slice.listings, review_columns(slice.attribute))?;
        written.extend(writer.write(review_table(slice.attribute), &batch)?);
    }

    // 3. Verification dump.
    let all: Vec<&NormalizedListing> = listings.iter().collect();
    let batch = pricewatch_store::listings_to_batch(&all, tables::VERIFICATION_COLUMNS)?;
    written.extend(writer.write(VERIFICATION_TABLE, &batch)?);

    Ok(RunStats {
        sources: prepared.sources,
        skipped: prepared.skipped,
        ingested: prepared.ingested,
        unique: listings.len(),
        eligible: cleaned.len(),
        summary_rows: rows.len(),
        written,
        elapsed_secs: start.elapsed().as_secs_f64(),
    })
}

/// Processor breakdowns for every report line and size that has data.
pub fn breakdowns(listings: &[NormalizedListing]) -> Vec<(Model, ScreenSize, Vec<ProcessorPrice>)> {
    let cleaned = summary::clean(listings);
    let mut out = Vec::new();
    for &model in REPORT_LINES {
        for &inches in REPORT_SIZES {
            let screen = ScreenSize::inches(inches);
            let rows = summary::processor_breakdown(cleaned.iter().copied(), model, screen);
            if !rows.is_empty() {
                out.push((model, screen, rows));
            }
        }
    }
    out
}
