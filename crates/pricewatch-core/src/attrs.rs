//! Typed device attributes extracted from listing titles.
//!
//! Every attribute carries its own "unknown" variant. Attributes that do not
//! apply to a listing at all (processor and screen of an accessory) are
//! modelled as `Option::None` on [`NormalizedListing`](crate::NormalizedListing),
//! which keeps the three states apart: extracted, recognised-but-unknown,
//! and not applicable.

use std::fmt;

use serde::{Serialize, Serializer};

/// Label written for any unknown sentinel in exported tables.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Implements `Serialize` by writing the attribute's display label.
macro_rules! serialize_as_label {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Serialize for $ty {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.collect_str(self)
                }
            }
        )+
    };
}

// ── Model ──

/// Broad device family a [`Model`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Family {
    /// Portable clamshell laptops (the MacBook lines).
    Clamshell,
    Tablet,
    Desktop,
}

/// Product line assigned by the model classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Model {
    MacBookAir,
    MacBookPro,
    MacBookRetina,
    /// Clamshell keyword present but no line could be resolved.
    MacBookUnknown,
    IPad,
    IPadMini,
    IPadAir,
    IPadPro,
    MacMini,
    MacStudio,
    IMac,
    /// Accessory, peripheral, or otherwise excluded listing.
    NotApplicable,
    /// No device family keyword found.
    UnknownModel,
}

impl Model {
    pub fn family(&self) -> Option<Family> {
        match self {
            Self::MacBookAir | Self::MacBookPro | Self::MacBookRetina | Self::MacBookUnknown => {
                Some(Family::Clamshell)
            }
            Self::IPad | Self::IPadMini | Self::IPadAir | Self::IPadPro => Some(Family::Tablet),
            Self::MacMini | Self::MacStudio | Self::IMac => Some(Family::Desktop),
            Self::NotApplicable | Self::UnknownModel => None,
        }
    }

    /// Member of the clamshell family, including the unresolved line.
    pub fn is_clamshell(&self) -> bool {
        self.family() == Some(Family::Clamshell)
    }

    /// A resolved clamshell line; the only models eligible for price analysis.
    pub fn is_priced_line(&self) -> bool {
        self.is_clamshell() && *self != Self::MacBookUnknown
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MacBookAir => "MacBook Air",
            Self::MacBookPro => "MacBook Pro",
            Self::MacBookRetina => "MacBook Retina",
            Self::MacBookUnknown => "MacBook Unknown",
            Self::IPad => "iPad",
            Self::IPadMini => "iPad Mini",
            Self::IPadAir => "iPad Air",
            Self::IPadPro => "iPad Pro",
            Self::MacMini => "Mac mini",
            Self::MacStudio => "Mac Studio",
            Self::IMac => "iMac",
            Self::NotApplicable => "Not Applicable",
            Self::UnknownModel => UNKNOWN_LABEL,
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Processor ──

/// Performance tier suffix of an Apple silicon chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChipTier {
    Pro,
    Max,
    Ultra,
}

impl ChipTier {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pro" => Some(Self::Pro),
            "max" => Some(Self::Max),
            "ultra" => Some(Self::Ultra),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pro => "Pro",
            Self::Max => "Max",
            Self::Ultra => "Ultra",
        }
    }
}

/// Legacy Intel Core tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IntelTier {
    I3,
    I5,
    I7,
    I9,
}

impl IntelTier {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "i3" => Some(Self::I3),
            "i5" => Some(Self::I5),
            "i7" => Some(Self::I7),
            "i9" => Some(Self::I9),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::I3 => "i3",
            Self::I5 => "i5",
            Self::I7 => "i7",
            Self::I9 => "i9",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Processor {
    /// Apple silicon, e.g. `M2Pro`.
    Apple { generation: u8, tier: Option<ChipTier> },
    /// Intel Core, e.g. `Intel i7`.
    Intel(IntelTier),
    UnknownProcessor,
}

impl Processor {
    /// Same chip without its tier suffix.
    pub fn without_tier(self) -> Self {
        match self {
            Self::Apple { generation, .. } => Self::Apple {
                generation,
                tier: None,
            },
            other => other,
        }
    }

    pub fn is_unknown(&self) -> bool {
        *self == Self::UnknownProcessor
    }
}

impl fmt::Display for Processor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Apple { generation, tier } => {
                write!(f, "M{generation}")?;
                if let Some(tier) = tier {
                    f.write_str(tier.as_str())?;
                }
                Ok(())
            }
            Self::Intel(tier) => write!(f, "Intel {}", tier.as_str()),
            Self::UnknownProcessor => f.write_str(UNKNOWN_LABEL),
        }
    }
}

// ── Screen size ──

/// A screen diagonal stored in tenths of an inch (`215` is 21.5").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Inches(u16);

impl Inches {
    pub const fn whole(inches: u16) -> Self {
        Self(inches * 10)
    }

    pub const fn from_tenths(tenths: u16) -> Self {
        Self(tenths)
    }

    pub fn tenths(&self) -> u16 {
        self.0
    }

    /// Parse `"13"` or `"21.5"`. Only a single fractional digit is accepted.
    pub fn parse(s: &str) -> Option<Self> {
        let (whole, frac) = match s.split_once('.') {
            Some((w, f)) if f.len() == 1 => (w, f),
            Some(_) => return None,
            None => (s, "0"),
        };
        let whole: u16 = whole.parse().ok()?;
        let frac: u16 = frac.parse().ok()?;
        whole.checked_mul(10)?.checked_add(frac).map(Self)
    }
}

impl fmt::Display for Inches {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (whole, frac) = (self.0 / 10, self.0 % 10);
        if frac == 0 {
            write!(f, "{whole}")
        } else {
            write!(f, "{whole}.{frac}")
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScreenSize {
    Size(Inches),
    UnknownScreen,
}

impl ScreenSize {
    pub const fn inches(whole: u16) -> Self {
        Self::Size(Inches::whole(whole))
    }

    pub fn is_unknown(&self) -> bool {
        *self == Self::UnknownScreen
    }
}

impl fmt::Display for ScreenSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Size(inches) => inches.fmt(f),
            Self::UnknownScreen => f.write_str(UNKNOWN_LABEL),
        }
    }
}

// ── Storage / memory ──

/// Storage capacity in binary gigabytes; terabyte figures are scaled by 1024.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Storage {
    Capacity(u32),
    UnknownStorage,
}

impl Storage {
    pub fn is_unknown(&self) -> bool {
        *self == Self::UnknownStorage
    }
}

impl fmt::Display for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Capacity(n) => write!(f, "{n}"),
            Self::UnknownStorage => f.write_str(UNKNOWN_LABEL),
        }
    }
}

/// Memory size in gigabytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Ram {
    Gigabytes(u32),
    UnknownRam,
}

impl Ram {
    pub fn is_unknown(&self) -> bool {
        *self == Self::UnknownRam
    }
}

impl fmt::Display for Ram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gigabytes(n) => write!(f, "{n}"),
            Self::UnknownRam => f.write_str(UNKNOWN_LABEL),
        }
    }
}

// ── Warranty ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Warranty {
    InWarranty,
    ExpiredWarranty,
    HasAppleCare,
    UnknownWarranty,
}

impl Warranty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InWarranty => "In Warranty",
            Self::ExpiredWarranty => "Expired Warranty",
            Self::HasAppleCare => "AppleCare",
            Self::UnknownWarranty => UNKNOWN_LABEL,
        }
    }
}

impl fmt::Display for Warranty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Price ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Price {
    Amount(u64),
    UnknownPrice,
}

impl Price {
    pub fn amount(&self) -> Option<u64> {
        match self {
            Self::Amount(n) => Some(*n),
            Self::UnknownPrice => None,
        }
    }

    /// Parsed and strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.amount().is_some_and(|n| n > 0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Amount(n) => write!(f, "{n}"),
            Self::UnknownPrice => f.write_str(UNKNOWN_LABEL),
        }
    }
}

serialize_as_label!(Model, Processor, ScreenSize, Storage, Ram, Warranty, Price);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamshell_lines() {
        assert!(Model::MacBookAir.is_priced_line());
        assert!(Model::MacBookRetina.is_priced_line());
        assert!(Model::MacBookUnknown.is_clamshell());
        assert!(!Model::MacBookUnknown.is_priced_line());
        assert!(!Model::IPadPro.is_clamshell());
        assert!(!Model::NotApplicable.is_clamshell());
        assert_eq!(Model::UnknownModel.family(), None);
    }

    #[test]
    fn processor_labels() {
        let m2pro = Processor::Apple {
            generation: 2,
            tier: Some(ChipTier::Pro),
        };
        assert_eq!(m2pro.to_string(), "M2Pro");
        assert_eq!(m2pro.without_tier().to_string(), "M2");
        assert_eq!(Processor::Intel(IntelTier::I7).to_string(), "Intel i7");
        assert_eq!(Processor::UnknownProcessor.to_string(), "Unknown");
    }

    #[test]
    fn inches_parse_and_display() {
        assert_eq!(Inches::parse("13"), Some(Inches::whole(13)));
        assert_eq!(Inches::parse("21.5"), Some(Inches::from_tenths(215)));
        assert_eq!(Inches::parse("12.95"), None);
        assert_eq!(Inches::parse("x"), None);
        assert_eq!(Inches::from_tenths(83).to_string(), "8.3");
        assert_eq!(ScreenSize::inches(16).to_string(), "16");
    }

    #[test]
    fn price_positivity() {
        assert!(Price::Amount(1).is_positive());
        assert!(!Price::Amount(0).is_positive());
        assert!(!Price::UnknownPrice.is_positive());
    }

    #[test]
    fn serializes_as_labels() {
        let json = serde_json::to_string(&(Model::MacBookPro, Warranty::HasAppleCare)).unwrap();
        assert_eq!(json, r#"["MacBook Pro","AppleCare"]"#);
    }
}
