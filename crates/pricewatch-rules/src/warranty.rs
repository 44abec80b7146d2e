//! Warranty status from title phrases, checked in priority order.

use pricewatch_core::Warranty;

use crate::rule::{Rule, first_match};
use crate::title::Title;

pub const IN_WARRANTY_PHRASES: &[&str] = &["保固內", "in warranty"];
pub const EXPIRED_PHRASES: &[&str] = &["過保", "warranty expired", "expired warranty"];
/// Matched against the whitespace-free title (`"apple care"` counts).
pub const APPLECARE_KEYWORD: &str = "applecare";

pub const WARRANTY_RULES: &[Rule<Title, Warranty>] = &[
    Rule::new("in-warranty", in_warranty),
    Rule::new("expired", expired),
    Rule::new("applecare", applecare),
];

pub fn classify_warranty(title: &Title) -> Warranty {
    first_match(WARRANTY_RULES, title)
        .map(|fired| fired.value)
        .unwrap_or(Warranty::UnknownWarranty)
}

fn in_warranty(title: &Title) -> Option<Warranty> {
    title
        .contains_any(IN_WARRANTY_PHRASES)
        .then_some(Warranty::InWarranty)
}

fn expired(title: &Title) -> Option<Warranty> {
    title
        .contains_any(EXPIRED_PHRASES)
        .then_some(Warranty::ExpiredWarranty)
}

fn applecare(title: &Title) -> Option<Warranty> {
    title
        .compact()
        .contains(APPLECARE_KEYWORD)
        .then_some(Warranty::HasAppleCare)
}
