//! Product-line classification.
//!
//! Two ordered chains. [`FAMILY_RULES`] decides the device family:
//! accessories are excluded first, then tablets, desktops, and finally the
//! MacBook clamshell. A MacBook title then runs through [`MACBOOK_RULES`],
//! where a known model-number code overrides every keyword and numeric
//! heuristic that follows it.

use std::sync::LazyLock;

use pricewatch_core::{Inches, Model, Processor, ScreenSize};
use regex::Regex;

use crate::processor::{apple_silicon, extract_processor};
use crate::rule::{Rule, first_match};
use crate::screen::{extract_screen, extract_tablet_screen};
use crate::title::Title;

/// Accessories and peripherals; any hit makes the listing not applicable.
pub const EXCLUDED_KEYWORDS: &[&str] = &[
    "keyboard",
    "鍵盤",
    "watch",
    "apple watch",
    "pencil",
    "巧控",
    "滑鼠",
    "mouse",
    "trackpad",
    "妙控",
    "耳機",
    "airpods",
    "鍵",
    "保護殼",
];

/// Manufacturer model numbers that pin the line and screen size.
pub const MODEL_NUMBERS: &[(&str, Model, u16)] = &[
    ("a1466", Model::MacBookAir, 13),
    ("a1932", Model::MacBookAir, 13),
    ("a2179", Model::MacBookAir, 13),
    ("a2337", Model::MacBookAir, 13),
    ("a2681", Model::MacBookAir, 13),
    ("a3113", Model::MacBookAir, 13),
    ("a1534", Model::MacBookRetina, 12),
    ("a1989", Model::MacBookPro, 13),
    ("a1990", Model::MacBookPro, 15),
    ("a2251", Model::MacBookPro, 13),
    ("a2141", Model::MacBookPro, 16),
    ("a2442", Model::MacBookPro, 14),
    ("a2485", Model::MacBookPro, 16),
    ("a2780", Model::MacBookPro, 14),
    ("a2786", Model::MacBookPro, 16),
];

/// Tablet variants in match order, with the screen assumed when none is stated.
const TABLET_VARIANTS: &[(&str, Model, ScreenSize)] = &[
    ("mini", Model::IPadMini, ScreenSize::Size(Inches::from_tenths(83))),
    ("pro", Model::IPadPro, ScreenSize::UnknownScreen),
    ("air", Model::IPadAir, ScreenSize::UnknownScreen),
];

pub const AIR_SIZES: &[u16] = &[13, 15];
/// A 12 read from an Air title is a misread 13.
const AIR_FALSE_POSITIVE: u16 = 12;
pub const PRO_SIZES: &[u16] = &[13, 14, 15, 16];
const RETINA_SIZE: u16 = 12;

static MODEL_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"a[0-9]{4}").expect("valid model number pattern"));

/// Outcome of model classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelMatch {
    pub model: Model,
    /// `None` when the listing is not a device.
    pub processor: Option<Processor>,
    pub screen_size: Option<ScreenSize>,
}

impl ModelMatch {
    const fn not_a_device(model: Model) -> Self {
        Self {
            model,
            processor: None,
            screen_size: None,
        }
    }
}

/// What a family rule yields: the match plus the MacBook line rule, if one ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FamilyMatch {
    pub result: ModelMatch,
    pub line_rule: Option<&'static str>,
}

impl From<ModelMatch> for FamilyMatch {
    fn from(result: ModelMatch) -> Self {
        Self {
            result,
            line_rule: None,
        }
    }
}

/// A classification with the rules that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub family_rule: &'static str,
    /// The MacBook line rule, for clamshell titles.
    pub line_rule: Option<&'static str>,
    pub result: ModelMatch,
}

pub const FAMILY_RULES: &[Rule<Title, FamilyMatch>] = &[
    Rule::new("excluded-accessory", excluded_accessory),
    Rule::new("tablet", tablet),
    Rule::new("mac-mini", mac_mini),
    Rule::new("mac-studio", mac_studio),
    Rule::new("imac", imac),
    Rule::new("macbook", macbook),
];

/// Fallback rule name when no family keyword is present.
pub const NO_FAMILY: &str = "no-family";

/// Classify a title into a product line with its processor and screen.
pub fn classify_model(title: &Title) -> Classification {
    match first_match(FAMILY_RULES, title) {
        Some(fired) => Classification {
            family_rule: fired.rule,
            line_rule: fired.value.line_rule,
            result: fired.value.result,
        },
        None => Classification {
            family_rule: NO_FAMILY,
            line_rule: None,
            result: ModelMatch::not_a_device(Model::UnknownModel),
        },
    }
}

fn excluded_accessory(title: &Title) -> Option<FamilyMatch> {
    title
        .contains_any(EXCLUDED_KEYWORDS)
        .then(|| ModelMatch::not_a_device(Model::NotApplicable).into())
}

fn tablet(title: &Title) -> Option<FamilyMatch> {
    if !title.contains("ipad") {
        return None;
    }
    let (model, default_screen) = TABLET_VARIANTS
        .iter()
        .find(|(keyword, _, _)| title.contains(keyword))
        .map(|&(_, model, screen)| (model, screen))
        .unwrap_or((Model::IPad, ScreenSize::UnknownScreen));

    let screen = match extract_tablet_screen(title) {
        ScreenSize::UnknownScreen => default_screen,
        stated => stated,
    };
    let processor = apple_silicon(title)
        .map(Processor::without_tier)
        .unwrap_or(Processor::UnknownProcessor);

    Some(
        ModelMatch {
            model,
            processor: Some(processor),
            screen_size: Some(screen),
        }
        .into(),
    )
}

fn mac_mini(title: &Title) -> Option<FamilyMatch> {
    desktop(title, "mac mini", Model::MacMini)
}

fn mac_studio(title: &Title) -> Option<FamilyMatch> {
    desktop(title, "mac studio", Model::MacStudio)
}

fn imac(title: &Title) -> Option<FamilyMatch> {
    desktop(title, "imac", Model::IMac)
}

fn desktop(title: &Title, keyword: &str, model: Model) -> Option<FamilyMatch> {
    if !title.contains(keyword) {
        return None;
    }
    Some(
        ModelMatch {
            model,
            processor: Some(extract_processor(title)),
            screen_size: Some(extract_screen(title)),
        }
        .into(),
    )
}

fn macbook(title: &Title) -> Option<FamilyMatch> {
    if !title.contains("macbook") {
        return None;
    }
    let signals = MacBookSignals::read(title);
    let (line_rule, (model, screen)) = match first_match(MACBOOK_RULES, &signals) {
        Some(fired) => (fired.rule, fired.value),
        None => (NO_LINE, (Model::MacBookUnknown, signals.screen_size)),
    };
    Some(FamilyMatch {
        result: ModelMatch {
            model,
            processor: Some(signals.processor),
            screen_size: Some(screen),
        },
        line_rule: Some(line_rule),
    })
}

// ── MacBook line rules ──

/// Everything the MacBook line rules look at, read from the title up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacBookSignals {
    /// Line and inches of the first known model number in the title.
    pub model_number: Option<(Model, u16)>,
    pub says_air: bool,
    pub says_pro: bool,
    pub says_retina: bool,
    pub processor: Processor,
    pub screen_size: ScreenSize,
}

impl MacBookSignals {
    pub fn read(title: &Title) -> Self {
        Self {
            model_number: lookup_model_number(title),
            says_air: title.contains("air"),
            says_pro: title.contains("pro"),
            says_retina: title.contains("retina"),
            processor: extract_processor(title),
            screen_size: extract_screen(title),
        }
    }

    fn screen_is(&self, inches: u16) -> bool {
        self.screen_size == ScreenSize::inches(inches)
    }

    fn screen_in(&self, sizes: &[u16]) -> bool {
        sizes.iter().any(|&s| self.screen_is(s))
    }
}

/// First `a` + four digit code (not part of a longer number) present in
/// [`MODEL_NUMBERS`].
fn lookup_model_number(title: &Title) -> Option<(Model, u16)> {
    let text = title.as_str();
    MODEL_NUMBER.find_iter(text).find_map(|m| {
        if text[m.end()..].starts_with(|c: char| c.is_ascii_digit()) {
            return None;
        }
        MODEL_NUMBERS
            .iter()
            .find(|(code, _, _)| *code == m.as_str())
            .map(|&(_, model, inches)| (model, inches))
    })
}

/// Fallback line rule name when no line keyword matches.
pub const NO_LINE: &str = "unresolved-line";

pub const MACBOOK_RULES: &[Rule<MacBookSignals, (Model, ScreenSize)>] = &[
    Rule::new("model-number", model_number_override),
    Rule::new("air", air_line),
    Rule::new("pro", pro_line),
    Rule::new("retina-12", retina_line),
];

fn model_number_override(signals: &MacBookSignals) -> Option<(Model, ScreenSize)> {
    signals
        .model_number
        .map(|(model, inches)| (model, ScreenSize::inches(inches)))
}

fn air_line(signals: &MacBookSignals) -> Option<(Model, ScreenSize)> {
    if !signals.says_air {
        return None;
    }
    let smallest = ScreenSize::inches(AIR_SIZES[0]);
    let mut screen = signals.screen_size;
    if !signals.processor.is_unknown() && signals.screen_is(AIR_FALSE_POSITIVE) {
        screen = smallest;
    }
    if !AIR_SIZES.iter().any(|&s| screen == ScreenSize::inches(s)) {
        screen = smallest;
    }
    Some((Model::MacBookAir, screen))
}

fn pro_line(signals: &MacBookSignals) -> Option<(Model, ScreenSize)> {
    if !signals.says_pro {
        return None;
    }
    let screen = if signals.screen_in(PRO_SIZES) {
        signals.screen_size
    } else {
        ScreenSize::inches(PRO_SIZES[0])
    };
    Some((Model::MacBookPro, screen))
}

fn retina_line(signals: &MacBookSignals) -> Option<(Model, ScreenSize)> {
    (signals.says_retina && signals.screen_is(RETINA_SIZE))
        .then_some((Model::MacBookRetina, signals.screen_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::rule_names;
    use pricewatch_core::ChipTier;

    fn classify(s: &str) -> Classification {
        classify_model(&Title::new(s))
    }

    fn model_of(s: &str) -> Model {
        classify(s).result.model
    }

    fn screen_of(s: &str) -> String {
        classify(s)
            .result
            .screen_size
            .map(|s| s.to_string())
            .unwrap_or_default()
    }

    #[test]
    fn rule_order_is_fixed() {
        assert_eq!(
            rule_names(FAMILY_RULES),
            vec!["excluded-accessory", "tablet", "mac-mini", "mac-studio", "imac", "macbook"]
        );
        assert_eq!(
            rule_names(MACBOOK_RULES),
            vec!["model-number", "air", "pro", "retina-12"]
        );
    }

    // ── Family rules ──

    #[test]
    fn accessories_are_not_applicable() {
        let c = classify("Apple Watch Ultra 保固內");
        assert_eq!(c.family_rule, "excluded-accessory");
        assert_eq!(c.result.model, Model::NotApplicable);
        assert_eq!(c.result.processor, None);
        assert_eq!(c.result.screen_size, None);
    }

    #[test]
    fn exclusion_beats_device_keywords() {
        assert_eq!(model_of("MacBook Pro 巧控鍵盤"), Model::NotApplicable);
        assert_eq!(model_of("iPad Pro Apple Pencil 2"), Model::NotApplicable);
        assert_eq!(model_of("MacBook Air 保護殼 13吋"), Model::NotApplicable);
    }

    #[test]
    fn tablet_variants() {
        assert_eq!(model_of("iPad mini 6"), Model::IPadMini);
        assert_eq!(model_of("iPad Pro 11 M2"), Model::IPadPro);
        assert_eq!(model_of("iPad Air 5"), Model::IPadAir);
        assert_eq!(model_of("iPad 9 64g"), Model::IPad);
    }

    #[test]
    fn tablet_screens() {
        assert_eq!(screen_of("iPad mini 6"), "8.3");
        assert_eq!(screen_of("iPad Pro 12.9 M2"), "12.9");
        assert_eq!(screen_of("iPad Air 5"), "Unknown");
    }

    #[test]
    fn tablet_processor_drops_tier() {
        let c = classify("iPad Pro M2 Pro");
        assert_eq!(
            c.result.processor,
            Some(Processor::Apple {
                generation: 2,
                tier: None
            })
        );
        assert_eq!(
            classify("iPad Air 5").result.processor,
            Some(Processor::UnknownProcessor)
        );
    }

    #[test]
    fn tablet_beats_macbook_keyword() {
        assert_eq!(model_of("iPad Air 換 MacBook"), Model::IPadAir);
    }

    #[test]
    fn desktops() {
        let c = classify("Mac mini M2 Pro");
        assert_eq!(c.family_rule, "mac-mini");
        assert_eq!(c.result.model, Model::MacMini);
        assert_eq!(
            c.result.processor,
            Some(Processor::Apple {
                generation: 2,
                tier: Some(ChipTier::Pro)
            })
        );
        assert_eq!(model_of("Mac Studio M1 Max"), Model::MacStudio);
        assert_eq!(model_of("iMac 24 M1"), Model::IMac);
        assert_eq!(screen_of("iMac 24 M1"), "24");
    }

    #[test]
    fn no_family_is_unknown_model() {
        let c = classify("ThinkPad X1 Carbon");
        assert_eq!(c.family_rule, NO_FAMILY);
        assert_eq!(c.result.model, Model::UnknownModel);
        assert_eq!(c.result.processor, None);
    }

    // ── MacBook line rules ──

    #[test]
    fn model_number_overrides_keywords() {
        let c = classify("MacBook Pro a2337 16吋");
        assert_eq!(c.line_rule, Some("model-number"));
        assert_eq!(c.result.model, Model::MacBookAir);
        assert_eq!(c.result.screen_size, Some(ScreenSize::inches(13)));
    }

    #[test]
    fn model_number_keeps_processor() {
        let c = classify("MacBook a2442 M1 Pro");
        assert_eq!(c.result.model, Model::MacBookPro);
        assert_eq!(screen_of("MacBook a2442 M1 Pro"), "14");
        assert_eq!(c.result.processor.unwrap().to_string(), "M1Pro");
    }

    #[test]
    fn unknown_model_number_falls_back_to_keywords() {
        let c = classify("MacBook Pro A9999 15吋");
        assert_eq!(c.line_rule, Some("pro"));
        assert_eq!(c.result.screen_size, Some(ScreenSize::inches(15)));
    }

    #[test]
    fn model_number_inside_longer_number_ignored() {
        assert_eq!(classify("MacBook Pro a23370").line_rule, Some("pro"));
    }

    #[test]
    fn air_defaults_to_smallest_size() {
        assert_eq!(screen_of("二手 MacBook Air M1 8+256"), "13");
        assert_eq!(screen_of("MacBook Air M2 15吋"), "15");
        assert_eq!(screen_of("MacBook Air 11吋 2015"), "13");
    }

    #[test]
    fn air_corrects_false_positive_twelve() {
        let c = classify("MacBook Air M1 12");
        assert_eq!(c.result.model, Model::MacBookAir);
        assert_eq!(c.result.screen_size, Some(ScreenSize::inches(13)));
    }

    #[test]
    fn air_rule_precedes_pro() {
        assert_eq!(model_of("MacBook Air M2 Pro"), Model::MacBookAir);
    }

    #[test]
    fn pro_sizes() {
        assert_eq!(screen_of("MacBook Pro 14 M2 Pro 16/512 保固內"), "14");
        assert_eq!(screen_of("MacBook Pro 16吋 M1 Max"), "16");
        assert_eq!(screen_of("MacBook Pro M1"), "13");
        assert_eq!(screen_of("MacBook Pro 12吋"), "13");
    }

    #[test]
    fn retina_needs_twelve_inches() {
        let c = classify("MacBook Retina 12吋 2017");
        assert_eq!(c.line_rule, Some("retina-12"));
        assert_eq!(c.result.model, Model::MacBookRetina);
        assert_eq!(model_of("MacBook Retina 13吋"), Model::MacBookUnknown);
    }

    #[test]
    fn unresolved_line_kept_as_macbook_unknown() {
        let c = classify("MacBook 2017 12");
        assert_eq!(c.family_rule, "macbook");
        assert_eq!(c.line_rule, Some(NO_LINE));
        assert_eq!(c.result.model, Model::MacBookUnknown);
        assert_eq!(c.result.screen_size, Some(ScreenSize::inches(12)));
        assert_eq!(c.result.processor, Some(Processor::UnknownProcessor));
    }

    #[test]
    fn signals_read_once() {
        let s = MacBookSignals::read(&Title::new("MacBook Air A2681 M2"));
        assert_eq!(s.model_number, Some((Model::MacBookAir, 13)));
        assert!(s.says_air);
        assert!(!s.says_pro);
        assert_eq!(s.screen_size, ScreenSize::UnknownScreen);
    }
}
