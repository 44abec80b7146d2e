//! Link identity keys and first-seen deduplication.
//!
//! Marketplace links carry tracking and session parameters that change
//! between scrapes of the same listing, e.g.
//! `https://example.com/item/123/?ref=search&t=1700000000`. Everything from
//! the first `?` onward is dropped to obtain a stable identity key.
//!
//! Deduplication keeps the first listing seen per key, so the result depends
//! on input order. Callers must supply listings in a deterministic order
//! (source file name, then position within the file).

use std::collections::HashSet;

use tracing::debug;

use crate::NormalizedListing;

/// Strip the query string from a link.
///
/// `"https://x/item/1?ref=a"` → `"https://x/item/1"`. Links without a query
/// string come back unchanged.
pub fn normalize_link(link: &str) -> &str {
    match link.find('?') {
        Some(idx) => &link[..idx],
        None => link,
    }
}

/// Identity key for an optional link. Absent links stay absent.
pub fn link_key(link: Option<&str>) -> Option<String> {
    link.map(|l| normalize_link(l).to_string())
}

/// Keep the first listing per link key, preserving input order.
///
/// Listings without a key have no identity to compare and are always kept.
pub fn dedup_by_link(listings: Vec<NormalizedListing>) -> Vec<NormalizedListing> {
    let before = listings.len();
    let mut seen: HashSet<String> = HashSet::with_capacity(before);
    let kept: Vec<NormalizedListing> = listings
        .into_iter()
        .filter(|listing| match &listing.link_key {
            Some(key) => seen.insert(key.clone()),
            None => true,
        })
        .collect();
    debug!(before, after = kept.len(), "deduplicated listings by link");
    kept
}
