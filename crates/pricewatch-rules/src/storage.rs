//! Storage capacity extraction, normalised to binary gigabytes.

use std::sync::LazyLock;

use pricewatch_core::Storage;
use regex::Regex;

use crate::rule::{Rule, first_match};
use crate::title::Title;

/// Capacities recognised as storage figures.
pub const STORAGE_SIZES: &[u32] = &[256, 512, 1024, 2048, 4096];

const GB_PER_TB: u32 = 1024;

static CAPACITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(256|512|1024|2048|4096)\s*(gb|g|tb|t|ｇｂ|ｇ|ｔｂ|ｔ)?\b")
        .expect("valid storage pattern")
});

static SMALL_TERABYTES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([1248])\s*(tb|t|ｔｂ|ｔ)\b").expect("valid terabyte pattern")
});

pub const STORAGE_RULES: &[Rule<Title, Storage>] = &[
    Rule::new("whitelisted-capacity", whitelisted_capacity),
    Rule::new("small-terabytes", small_terabytes),
];

/// Storage capacity named in the title, or [`Storage::UnknownStorage`].
pub fn extract_storage(title: &Title) -> Storage {
    first_match(STORAGE_RULES, title)
        .map(|fired| fired.value)
        .unwrap_or(Storage::UnknownStorage)
}

fn is_terabyte_unit(unit: &str) -> bool {
    unit.contains('t') || unit.contains('ｔ')
}

/// `256g`, `512`, `1024gb`; a terabyte unit multiplies the figure by 1024.
pub fn whitelisted_capacity(title: &Title) -> Option<Storage> {
    let caps = CAPACITY.captures(title.as_str())?;
    let value: u32 = caps.get(1)?.as_str().parse().ok()?;
    let terabytes = caps.get(2).is_some_and(|u| is_terabyte_unit(u.as_str()));
    let gigabytes = if terabytes {
        value.checked_mul(GB_PER_TB)?
    } else {
        value
    };
    Some(Storage::Capacity(gigabytes))
}

/// `1tb`, `2T`: small figures only count with an explicit terabyte unit.
pub fn small_terabytes(title: &Title) -> Option<Storage> {
    let caps = SMALL_TERABYTES.captures(title.as_str())?;
    let value: u32 = caps.get(1)?.as_str().parse().ok()?;
    Some(Storage::Capacity(value * GB_PER_TB))
}
