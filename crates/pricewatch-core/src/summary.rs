//! Cleaning filter and price aggregation over normalised listings.

use std::collections::BTreeMap;

use tracing::info;

use crate::NormalizedListing;
use crate::attrs::{Model, Processor, Ram, ScreenSize, Storage, Warranty};

/// Listing eligible for price analysis: a resolved clamshell line with a
/// parsed, strictly positive price.
pub fn is_eligible(listing: &NormalizedListing) -> bool {
    listing.model.is_priced_line() && listing.price.is_positive()
}

/// Listings passing [`is_eligible`], in input order.
pub fn clean(listings: &[NormalizedListing]) -> Vec<&NormalizedListing> {
    let cleaned: Vec<&NormalizedListing> = listings.iter().filter(|l| is_eligible(l)).collect();
    info!(
        total = listings.len(),
        eligible = cleaned.len(),
        "applied cleaning filter"
    );
    cleaned
}

/// Grouping key of a [`SummaryRow`]. Unknown sentinels group like any other value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SummaryKey {
    pub model: Model,
    pub processor: Option<Processor>,
    pub screen_size: Option<ScreenSize>,
    pub ram: Ram,
    pub storage: Storage,
    pub warranty: Warranty,
}

impl SummaryKey {
    pub fn of(listing: &NormalizedListing) -> Self {
        Self {
            model: listing.model,
            processor: listing.processor,
            screen_size: listing.screen_size,
            ram: listing.ram,
            storage: listing.storage,
            warranty: listing.warranty,
        }
    }
}

/// Price statistics for one attribute combination.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub key: SummaryKey,
    pub count: usize,
    pub min_price: u64,
    pub max_price: u64,
    /// Arithmetic mean, unrounded.
    pub mean_price: f64,
}

#[derive(Debug, Clone, Copy)]
struct PriceAccum {
    count: usize,
    min: u64,
    max: u64,
    sum: u128,
}

impl PriceAccum {
    fn new(price: u64) -> Self {
        Self {
            count: 1,
            min: price,
            max: price,
            sum: u128::from(price),
        }
    }

    fn push(&mut self, price: u64) {
        self.count += 1;
        self.min = self.min.min(price);
        self.max = self.max.max(price);
        self.sum += u128::from(price);
    }

    fn mean(&self) -> f64 {
        self.sum as f64 / self.count as f64
    }
}

/// Group listings by their full attribute tuple and compute price statistics.
///
/// Listings without a parsed price are skipped; pass the output of
/// [`clean`] to aggregate only eligible listings. Rows come out ordered by
/// key, and the whole table is recomputed on every call.
pub fn aggregate<'a, I>(listings: I) -> Vec<SummaryRow>
where
    I: IntoIterator<Item = &'a NormalizedListing>,
{
    let mut groups: BTreeMap<SummaryKey, PriceAccum> = BTreeMap::new();
    for listing in listings {
        let Some(price) = listing.price.amount() else {
            continue;
        };
        groups
            .entry(SummaryKey::of(listing))
            .and_modify(|acc| acc.push(price))
            .or_insert_with(|| PriceAccum::new(price));
    }

    let rows: Vec<SummaryRow> = groups
        .into_iter()
        .map(|(key, acc)| SummaryRow {
            key,
            count: acc.count,
            min_price: acc.min,
            max_price: acc.max,
            mean_price: acc.mean(),
        })
        .collect();
    info!(groups = rows.len(), "aggregated price summary");
    rows
}

/// Mean price of one processor within a (line, screen) slice.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessorPrice {
    pub processor: Option<Processor>,
    pub count: usize,
    pub mean_price: f64,
}

/// Per-processor mean prices for one clamshell line and screen size,
/// most expensive first.
pub fn processor_breakdown<'a, I>(
    listings: I,
    model: Model,
    screen_size: ScreenSize,
) -> Vec<ProcessorPrice>
where
    I: IntoIterator<Item = &'a NormalizedListing>,
{
    let mut groups: BTreeMap<Option<Processor>, PriceAccum> = BTreeMap::new();
    for listing in listings {
        if listing.model != model || listing.screen_size != Some(screen_size) {
            continue;
        }
        let Some(price) = listing.price.amount() else {
            continue;
        };
        groups
            .entry(listing.processor)
            .and_modify(|acc| acc.push(price))
            .or_insert_with(|| PriceAccum::new(price));
    }

    let mut out: Vec<ProcessorPrice> = groups
        .into_iter()
        .map(|(processor, acc)| ProcessorPrice {
            processor,
            count: acc.count,
            mean_price: acc.mean(),
        })
        .collect();
    out.sort_by(|a, b| b.mean_price.total_cmp(&a.mean_price));
    out
}
