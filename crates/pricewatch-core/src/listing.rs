//! Listing records as ingested and as normalised.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::attrs::{Model, Price, Processor, Ram, ScreenSize, Storage, Warranty};

/// A marketplace listing as scraped. Never mutated after ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawListing {
    pub title: String,
    /// Free-text price as displayed, e.g. `"NT$32,000"`.
    pub price_text: String,
    pub link: Option<String>,
    /// Taken from the source file name, when it carries one.
    pub capture_date: Option<NaiveDate>,
}

impl RawListing {
    pub fn new(title: impl Into<String>, price_text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            price_text: price_text.into(),
            link: None,
            capture_date: None,
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_capture_date(mut self, date: NaiveDate) -> Self {
        self.capture_date = Some(date);
        self
    }
}

/// Fully typed attribute record derived from one [`RawListing`].
///
/// `processor` and `screen_size` are `None` when the listing is
/// [`Model::NotApplicable`]; otherwise they hold a value or their unknown
/// sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedListing {
    pub title: String,
    pub model: Model,
    pub processor: Option<Processor>,
    pub screen_size: Option<ScreenSize>,
    pub storage: Storage,
    pub ram: Ram,
    pub warranty: Warranty,
    pub price: Price,
    pub price_text: String,
    pub link: Option<String>,
    /// Link with volatile query parameters removed.
    pub link_key: Option<String>,
    pub capture_date: Option<NaiveDate>,
}

impl NormalizedListing {
    pub fn processor_is_unknown(&self) -> bool {
        self.processor.is_some_and(|p| p.is_unknown())
    }

    pub fn screen_is_unknown(&self) -> bool {
        self.screen_size.is_some_and(|s| s.is_unknown())
    }
}
