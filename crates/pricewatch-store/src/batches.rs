//! Conversion of listings and summary rows into Arrow `RecordBatch`es.
//!
//! Every table is built against its schema in `pricewatch_core::tables`, so
//! the CSV and Parquet sinks see the same column names and types.

use std::sync::Arc;

use arrow::array::{ArrayRef, Date32Array, Float64Array, StringArray, UInt64Array};
use arrow::datatypes::Date32Type;
use arrow::record_batch::RecordBatch;
use pricewatch_core::tables::{self, ListingColumn};
use pricewatch_core::{NormalizedListing, ProcessorPrice, SummaryRow};

use crate::StoreError;

fn labels<T: ToString>(values: impl Iterator<Item = T>) -> ArrayRef {
    Arc::new(StringArray::from_iter_values(values.map(|v| v.to_string())))
}

fn optional_labels<T: ToString>(values: impl Iterator<Item = Option<T>>) -> ArrayRef {
    Arc::new(values.map(|v| v.map(|v| v.to_string())).collect::<StringArray>())
}

fn column(listings: &[&NormalizedListing], col: ListingColumn) -> ArrayRef {
    let rows = listings.iter();
    match col {
        ListingColumn::Title => labels(rows.map(|l| &l.title)),
        ListingColumn::PriceText => labels(rows.map(|l| &l.price_text)),
        ListingColumn::Model => labels(rows.map(|l| l.model)),
        ListingColumn::Storage => labels(rows.map(|l| l.storage)),
        ListingColumn::Ram => labels(rows.map(|l| l.ram)),
        ListingColumn::Warranty => labels(rows.map(|l| l.warranty)),
        ListingColumn::Processor => optional_labels(rows.map(|l| l.processor)),
        ListingColumn::ScreenSize => optional_labels(rows.map(|l| l.screen_size)),
        ListingColumn::Link => optional_labels(rows.map(|l| l.link.as_ref())),
        ListingColumn::LinkKey => optional_labels(rows.map(|l| l.link_key.as_ref())),
        ListingColumn::CaptureDate => Arc::new(
            rows.map(|l| l.capture_date.map(Date32Type::from_naive_date))
                .collect::<Date32Array>(),
        ),
        ListingColumn::Price => Arc::new(
            rows.map(|l| l.price.amount())
                .collect::<UInt64Array>(),
        ),
    }
}

/// Build a listing table with the given columns, one row per listing.
pub fn listings_to_batch(
    listings: &[&NormalizedListing],
    columns: &[ListingColumn],
) -> Result<RecordBatch, StoreError> {
    let schema = Arc::new(tables::listing_schema(columns));
    let arrays: Vec<ArrayRef> = columns.iter().map(|&c| column(listings, c)).collect();
    Ok(RecordBatch::try_new(schema, arrays)?)
}

/// Build the price summary table.
pub fn summary_to_batch(rows: &[SummaryRow]) -> Result<RecordBatch, StoreError> {
    let schema = Arc::new(tables::summary_schema());
    let keys = || rows.iter().map(|r| r.key);
    let arrays: Vec<ArrayRef> = vec![
        labels(keys().map(|k| k.model)),
        optional_labels(keys().map(|k| k.processor)),
        optional_labels(keys().map(|k| k.screen_size)),
        labels(keys().map(|k| k.ram)),
        labels(keys().map(|k| k.storage)),
        labels(keys().map(|k| k.warranty)),
        Arc::new(UInt64Array::from_iter_values(rows.iter().map(|r| r.count as u64))),
        Arc::new(UInt64Array::from_iter_values(rows.iter().map(|r| r.min_price))),
        Arc::new(UInt64Array::from_iter_values(rows.iter().map(|r| r.max_price))),
        Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.mean_price))),
    ];
    Ok(RecordBatch::try_new(schema, arrays)?)
}

/// Build a per-processor price breakdown table.
pub fn breakdown_to_batch(rows: &[ProcessorPrice]) -> Result<RecordBatch, StoreError> {
    let schema = Arc::new(tables::processor_breakdown_schema());
    let arrays: Vec<ArrayRef> = vec![
        optional_labels(rows.iter().map(|r| r.processor)),
        Arc::new(UInt64Array::from_iter_values(rows.iter().map(|r| r.count as u64))),
        Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.mean_price))),
    ];
    Ok(RecordBatch::try_new(schema, arrays)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Array;
    use chrono::NaiveDate;
    use pricewatch_core::{
        Model, Price, Processor, Ram, ScreenSize, Storage, SummaryKey, Warranty,
    };

    fn listing() -> NormalizedListing {
        NormalizedListing {
            title: "MacBook Air M1 8+256".to_string(),
            model: Model::MacBookAir,
            processor: Some(Processor::Apple {
                generation: 1,
                tier: None,
            }),
            screen_size: Some(ScreenSize::inches(13)),
            storage: Storage::Capacity(256),
            ram: Ram::Gigabytes(8),
            warranty: Warranty::UnknownWarranty,
            price: Price::Amount(18_500),
            price_text: "NT$18,500".to_string(),
            link: Some("https://x/1?a".to_string()),
            link_key: Some("https://x/1".to_string()),
            capture_date: NaiveDate::from_ymd_opt(2025, 3, 1),
        }
    }

    fn accessory() -> NormalizedListing {
        NormalizedListing {
            title: "Magic Keyboard".to_string(),
            model: Model::NotApplicable,
            processor: None,
            screen_size: None,
            storage: Storage::UnknownStorage,
            ram: Ram::UnknownRam,
            warranty: Warranty::UnknownWarranty,
            price: Price::UnknownPrice,
            price_text: "面議".to_string(),
            link: None,
            link_key: None,
            capture_date: None,
        }
    }

    fn strings(batch: &RecordBatch, name: &str) -> Vec<Option<String>> {
        let col = batch.column_by_name(name).unwrap();
        let arr = col.as_any().downcast_ref::<StringArray>().unwrap();
        (0..arr.len())
            .map(|i| (!arr.is_null(i)).then(|| arr.value(i).to_string()))
            .collect()
    }

    #[test]
    fn listing_table_labels_and_nulls() {
        let (a, b) = (listing(), accessory());
        let batch = listings_to_batch(&[&a, &b], tables::ALL_COLUMNS).unwrap();
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.num_columns(), tables::ALL_COLUMNS.len());

        assert_eq!(
            strings(&batch, "model"),
            vec![Some("MacBook Air".into()), Some("Not Applicable".into())]
        );
        assert_eq!(strings(&batch, "processor"), vec![Some("M1".into()), None]);
        assert_eq!(strings(&batch, "storage"), vec![Some("256".into()), Some("Unknown".into())]);

        let price = batch
            .column_by_name("price")
            .unwrap()
            .as_any()
            .downcast_ref::<UInt64Array>()
            .unwrap();
        assert_eq!(price.value(0), 18_500);
        assert!(price.is_null(1));

        let date = batch
            .column_by_name("capture_date")
            .unwrap()
            .as_any()
            .downcast_ref::<Date32Array>()
            .unwrap();
        assert_eq!(date.value_as_date(0), NaiveDate::from_ymd_opt(2025, 3, 1));
        assert!(date.is_null(1));
    }

    #[test]
    fn column_subset_follows_order() {
        let a = listing();
        let batch = listings_to_batch(&[&a], tables::VERIFICATION_COLUMNS).unwrap();
        let names: Vec<&str> = batch
            .schema_ref()
            .fields()
            .iter()
            .map(|f| f.name().as_str())
            .collect();
        assert_eq!(names, vec!["model", "processor", "screen_size", "storage", "ram", "title"]);
    }

    #[test]
    fn empty_listing_table() {
        let batch = listings_to_batch(&[], tables::CLEAN_COLUMNS).unwrap();
        assert_eq!(batch.num_rows(), 0);
    }

    #[test]
    fn summary_table() {
        let a = listing();
        let row = SummaryRow {
            key: SummaryKey::of(&a),
            count: 2,
            min_price: 18_000,
            max_price: 19_000,
            mean_price: 18_500.0,
        };
        let batch = summary_to_batch(&[row]).unwrap();
        assert_eq!(batch.num_columns(), 10);
        assert_eq!(strings(&batch, "warranty"), vec![Some("Unknown".into())]);
        let avg = batch
            .column_by_name("avg_price")
            .unwrap()
            .as_any()
            .downcast_ref::<Float64Array>()
            .unwrap();
        assert_eq!(avg.value(0), 18_500.0);
    }

    #[test]
    fn breakdown_table() {
        let rows = vec![ProcessorPrice {
            processor: Some(Processor::UnknownProcessor),
            count: 1,
            mean_price: 10.0,
        }];
        let batch = breakdown_to_batch(&rows).unwrap();
        assert_eq!(strings(&batch, "processor"), vec![Some("Unknown".into())]);
    }
}
