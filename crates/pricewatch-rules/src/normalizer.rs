//! Raw listing → [`NormalizedListing`].
//!
//! Every extractor reads the same lower-cased [`Title`]. Normalisation is a
//! pure function of the raw listing, so a batch can be fanned out across the
//! rayon pool without changing the result or its order.

use pricewatch_core::{NormalizedListing, Ram, RawListing, Storage, Warranty, link_key};
use tracing::{debug, info};

use crate::model::classify_model;
use crate::price::parse_price;
use crate::ram::RAM_RULES;
use crate::rule::first_match;
use crate::storage::STORAGE_RULES;
use crate::title::Title;
use crate::warranty::WARRANTY_RULES;

/// Names of the rules that decided each attribute of one listing.
///
/// `None` means no rule in that chain fired and the unknown sentinel was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleTrace {
    pub family: &'static str,
    pub line: Option<&'static str>,
    pub storage: Option<&'static str>,
    pub ram: Option<&'static str>,
    pub warranty: Option<&'static str>,
}

/// Normalise one listing.
pub fn normalize(raw: &RawListing) -> NormalizedListing {
    normalize_traced(raw).0
}

/// Normalise one listing and report which rules fired.
pub fn normalize_traced(raw: &RawListing) -> (NormalizedListing, RuleTrace) {
    let title = Title::new(&raw.title);
    let classification = classify_model(&title);
    let storage = first_match(STORAGE_RULES, &title);
    let ram = first_match(RAM_RULES, &title);
    let warranty = first_match(WARRANTY_RULES, &title);

    let trace = RuleTrace {
        family: classification.family_rule,
        line: classification.line_rule,
        storage: storage.map(|f| f.rule),
        ram: ram.map(|f| f.rule),
        warranty: warranty.map(|f| f.rule),
    };
    debug!(
        title = %raw.title,
        family = trace.family,
        line = trace.line,
        model = %classification.result.model,
        "normalised listing"
    );

    let listing = NormalizedListing {
        title: raw.title.clone(),
        model: classification.result.model,
        processor: classification.result.processor,
        screen_size: classification.result.screen_size,
        storage: storage.map_or(Storage::UnknownStorage, |f| f.value),
        ram: ram.map_or(Ram::UnknownRam, |f| f.value),
        warranty: warranty.map_or(Warranty::UnknownWarranty, |f| f.value),
        price: parse_price(&raw.price_text),
        price_text: raw.price_text.clone(),
        link: raw.link.clone(),
        link_key: link_key(raw.link.as_deref()),
        capture_date: raw.capture_date,
    };
    (listing, trace)
}

/// Normalise a batch, preserving input order.
///
/// With `parallel` set (and the `parallel` feature enabled) listings are
/// processed on the rayon pool; the output is identical either way.
pub fn normalize_all(raws: &[RawListing], parallel: bool) -> Vec<NormalizedListing> {
    let listings = if parallel {
        normalize_parallel(raws)
    } else {
        raws.iter().map(normalize).collect()
    };
    info!(count = listings.len(), parallel, "normalised listings");
    listings
}

#[cfg(feature = "parallel")]
fn normalize_parallel(raws: &[RawListing]) -> Vec<NormalizedListing> {
    use rayon::prelude::*;
    raws.par_iter().map(normalize).collect()
}

#[cfg(not(feature = "parallel"))]
fn normalize_parallel(raws: &[RawListing]) -> Vec<NormalizedListing> {
    raws.iter().map(normalize).collect()
}
