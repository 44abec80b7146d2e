pub mod attrs;
pub mod config;
pub mod dedup;
pub mod diagnostics;
pub mod listing;
pub mod schema;
pub mod summary;

pub use attrs::{
    ChipTier, Family, Inches, IntelTier, Model, Price, Processor, Ram, ScreenSize, Storage,
    Warranty,
};
pub use config::PipelineConfig;
pub use dedup::{dedup_by_link, link_key, normalize_link};
pub use diagnostics::{Attribute, ReviewSlice};
pub use listing::{NormalizedListing, RawListing};
pub use schema::tables;
pub use summary::{ProcessorPrice, SummaryKey, SummaryRow};
