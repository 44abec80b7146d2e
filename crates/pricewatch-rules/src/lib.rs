//! Title extractors for marketplace listings.
//!
//! Each attribute is decided by an ordered chain of named [`rule::Rule`]s;
//! [`normalizer`] runs every chain over a listing and assembles the typed
//! record.

pub mod model;
pub mod normalizer;
pub mod price;
pub mod processor;
pub mod ram;
pub mod rule;
pub mod screen;
pub mod storage;
pub mod title;
pub mod warranty;

pub use model::{Classification, ModelMatch, classify_model};
pub use normalizer::{RuleTrace, normalize, normalize_all, normalize_traced};
pub use price::parse_price;
pub use processor::extract_processor;
pub use ram::extract_ram;
pub use rule::{Fired, Rule, first_match};
pub use screen::{extract_screen, extract_tablet_screen};
pub use storage::extract_storage;
pub use title::Title;
pub use warranty::classify_warranty;
