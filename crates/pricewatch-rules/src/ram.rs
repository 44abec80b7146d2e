//! Memory size extraction.

use std::sync::LazyLock;

use pricewatch_core::Ram;
use regex::Regex;

use crate::rule::{Rule, first_match};
use crate::storage::STORAGE_SIZES;
use crate::title::{Title, char_before, is_word_char};

/// Memory sizes recognised as RAM figures.
pub const RAM_SIZES: &[u32] = &[4, 8, 16, 24, 32, 64, 96, 128];

/// Optional memory units, longest first.
const RAM_UNITS: &[&str] = &["記憶體", "gb", "記", "g"];

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("valid digit run pattern"));

static MEMORY_STORAGE_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]+)\s*[+/]\s*([0-9]+)").expect("valid memory storage pair pattern")
});

pub const RAM_RULES: &[Rule<Title, Ram>] = &[
    Rule::new("standalone-figure", standalone_figure),
    Rule::new("memory-storage-pair", memory_storage_pair),
];

/// Memory size named in the title, or [`Ram::UnknownRam`].
pub fn extract_ram(title: &Title) -> Ram {
    first_match(RAM_RULES, title)
        .map(|fired| fired.value)
        .unwrap_or(Ram::UnknownRam)
}

fn parse_whitelisted(s: &str, whitelist: &[u32]) -> Option<u32> {
    s.parse().ok().filter(|n| whitelist.contains(n))
}

/// A whitelisted number standing alone, optionally followed by a unit.
///
/// The number must not follow a letter, digit or decimal point, which keeps
/// the trailing digit of a chip name (`m1`, `m4`) and the fraction of a
/// screen size (`15.4`) from reading as memory. After the
/// optional unit the next character must not be a word character.
pub fn standalone_figure(title: &Title) -> Option<Ram> {
    let text = title.as_str();
    DIGIT_RUN.find_iter(text).find_map(|m| {
        if char_before(text, m.start())
            .is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.')
        {
            return None;
        }
        let gigabytes = parse_whitelisted(m.as_str(), RAM_SIZES)?;
        let rest = &text[m.end()..];
        stands_alone(rest).then_some(Ram::Gigabytes(gigabytes))
    })
}

fn stands_alone(rest: &str) -> bool {
    let ends_token = |s: &str| s.chars().next().is_none_or(|c| !is_word_char(c));
    if ends_token(rest) {
        return true;
    }
    let trimmed = rest.trim_start();
    RAM_UNITS
        .iter()
        .any(|unit| trimmed.strip_prefix(unit).is_some_and(ends_token))
}

/// `8+256`, `16/512`: memory and storage stated as one token.
pub fn memory_storage_pair(title: &Title) -> Option<Ram> {
    let text = title.as_str();
    MEMORY_STORAGE_PAIR.captures_iter(text).find_map(|caps| {
        let memory = caps.get(1)?;
        if char_before(text, memory.start()).is_some_and(|c| c == 'm' || c.is_ascii_digit()) {
            return None;
        }
        parse_whitelisted(caps.get(2)?.as_str(), STORAGE_SIZES)?;
        parse_whitelisted(memory.as_str(), RAM_SIZES).map(Ram::Gigabytes)
    })
}
