//! Processor extraction: Apple silicon generations first, then Intel Core tiers.

use std::sync::LazyLock;

use pricewatch_core::{ChipTier, IntelTier, Processor};
use regex::Regex;

use crate::rule::{Rule, first_match};
use crate::title::{Title, char_at, char_before};

static APPLE_SILICON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"m\s*([1-4])(?:\s*(pro|max|ultra))?").expect("valid apple silicon pattern")
});

static INTEL_CORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bi[3579]\b").expect("valid intel core pattern"));

pub const PROCESSOR_RULES: &[Rule<Title, Processor>] = &[
    Rule::new("apple-silicon", apple_silicon),
    Rule::new("intel-core", intel_core),
];

/// Processor named in the title, or [`Processor::UnknownProcessor`].
pub fn extract_processor(title: &Title) -> Processor {
    first_match(PROCESSOR_RULES, title)
        .map(|fired| fired.value)
        .unwrap_or(Processor::UnknownProcessor)
}

/// `m2`, `m2 pro`, `M3Max`.
///
/// The `m` must not follow a letter or digit, and the generation digit must
/// not be followed by another digit or a decimal point, so `ram 4g`,
/// `ram 16g` and `m.2` never read as chips.
pub fn apple_silicon(title: &Title) -> Option<Processor> {
    let text = title.as_str();
    APPLE_SILICON.captures_iter(text).find_map(|caps| {
        let whole = caps.get(0)?;
        let generation = caps.get(1)?;
        if char_before(text, whole.start()).is_some_and(|c| c.is_ascii_alphanumeric()) {
            return None;
        }
        if char_at(text, generation.end()).is_some_and(|c| c.is_ascii_digit() || c == '.') {
            return None;
        }
        Some(Processor::Apple {
            generation: generation.as_str().parse().ok()?,
            tier: caps.get(2).and_then(|t| ChipTier::parse(t.as_str())),
        })
    })
}

/// `i5`, `i7` as standalone tokens.
pub fn intel_core(title: &Title) -> Option<Processor> {
    INTEL_CORE
        .find(title.as_str())
        .and_then(|m| IntelTier::parse(m.as_str()))
        .map(Processor::Intel)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(s: &str) -> String {
        extract_processor(&Title::new(s)).to_string()
    }

    #[test]
    fn generation_with_tier() {
        assert_eq!(extract("MacBook Pro 14 M2 Pro 16/512"), "M2Pro");
        assert_eq!(extract("Mac Studio M1 Ultra"), "M1Ultra");
        assert_eq!(extract("macbook pro m3max 36g"), "M3Max");
    }

    #[test]
    fn generation_without_tier() {
        assert_eq!(extract("二手 MacBook Air M1 8+256"), "M1");
        assert_eq!(extract("MacBook Air m 2 午夜色"), "M2");
    }

    #[test]
    fn intel_tiers() {
        assert_eq!(extract("MacBook Pro 2019 i7 16g"), "Intel i7");
        assert_eq!(extract("macbook air i5"), "Intel i5");
    }

    #[test]
    fn intel_needs_word_boundary() {
        assert_eq!(extract("macbook pro wifi5"), "Unknown");
        assert_eq!(extract("macbook i77"), "Unknown");
    }

    #[test]
    fn apple_silicon_beats_intel() {
        assert_eq!(extract("i7 to m1 upgrade"), "M1");
    }

    #[test]
    fn memory_number_after_m_is_not_a_chip() {
        assert_eq!(extract("macbook pro ram 16g 512g"), "Unknown");
        assert_eq!(extract("macbook m.2 ssd"), "Unknown");
    }

    #[test]
    fn memory_word_ending_in_m_is_not_a_chip() {
        assert_eq!(extract("MacBook Air 2015 i5 RAM 4G 128G"), "Intel i5");
        assert_eq!(extract("macbook pro ram 4g"), "Unknown");
        assert_eq!(extract("macbook pro ram 8g m2"), "M2");
    }

    #[test]
    fn digit_before_m_is_not_a_chip() {
        assert_eq!(extract("macbook 16m1"), "Unknown");
    }

    #[test]
    fn rejected_candidate_does_not_hide_later_chip() {
        assert_eq!(extract("ram 16g macbook air m2"), "M2");
    }

    #[test]
    fn nothing_found() {
        assert_eq!(extract("MacBook 12 吋"), "Unknown");
    }
}
