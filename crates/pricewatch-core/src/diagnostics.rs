//! Routes listings with unresolved attributes into per-attribute review slices.

use std::fmt;

use crate::NormalizedListing;
use crate::attrs::Model;

/// Attribute whose extraction can fall back to an unknown sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Model,
    Processor,
    ScreenSize,
    Storage,
    Ram,
}

impl Attribute {
    pub const ALL: [Attribute; 5] = [
        Self::Processor,
        Self::Storage,
        Self::Ram,
        Self::Model,
        Self::ScreenSize,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Processor => "processor",
            Self::ScreenSize => "screen_size",
            Self::Storage => "storage",
            Self::Ram => "ram",
        }
    }

    /// Whether `listing` belongs in this attribute's review slice.
    ///
    /// Slices are restricted to the clamshell family. The model slice holds
    /// clamshell listings whose line could not be resolved.
    pub fn needs_review(&self, listing: &NormalizedListing) -> bool {
        if !listing.model.is_clamshell() {
            return false;
        }
        match self {
            Self::Model => listing.model == Model::MacBookUnknown,
            Self::Processor => listing.processor_is_unknown(),
            Self::ScreenSize => listing.screen_is_unknown(),
            Self::Storage => listing.storage.is_unknown(),
            Self::Ram => listing.ram.is_unknown(),
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Listings needing manual review for one attribute.
#[derive(Debug)]
pub struct ReviewSlice<'a> {
    pub attribute: Attribute,
    pub listings: Vec<&'a NormalizedListing>,
}

/// Split listings into one review slice per attribute, in [`Attribute::ALL`] order.
///
/// A listing may appear in several slices. Input order is preserved within
/// each slice.
pub fn route(listings: &[NormalizedListing]) -> Vec<ReviewSlice<'_>> {
    Attribute::ALL
        .iter()
        .map(|&attribute| ReviewSlice {
            attribute,
            listings: listings
                .iter()
                .filter(|l| attribute.needs_review(l))
                .collect(),
        })
        .collect()
}
