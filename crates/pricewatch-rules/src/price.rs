//! Free-text price parsing.
//!
//! Never fails: anything that does not yield a digit run becomes
//! [`Price::UnknownPrice`].

use pricewatch_core::Price;

/// Tokens (after whitespace removal and lower-casing) meaning a zero price.
pub const ZERO_TOKENS: &[&str] = &["free", "免費", "0", "nt$0", "nt$0.00", "$0", "$0.00"];

/// Parse a displayed price such as `"NT$32,000"` or `"Free"`.
///
/// Whitespace is removed and case folded, zero tokens map to 0, a trailing
/// one- or two-digit decimal fraction is dropped, and the remaining digits
/// are read as one integer.
pub fn parse_price(text: &str) -> Price {
    let compact: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    if ZERO_TOKENS.contains(&compact.as_str()) {
        return Price::Amount(0);
    }

    let digits: String = strip_fraction(&compact)
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return Price::UnknownPrice;
    }
    digits
        .parse::<u64>()
        .map(Price::Amount)
        .unwrap_or(Price::UnknownPrice)
}

/// `"nt$1,234.50"` → `"nt$1,234"`. Three-digit tails are digit grouping and stay.
fn strip_fraction(s: &str) -> &str {
    if let Some(idx) = s.rfind('.') {
        let frac = &s[idx + 1..];
        if (1..=2).contains(&frac.len()) && frac.bytes().all(|b| b.is_ascii_digit()) {
            return &s[..idx];
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_and_grouping() {
        assert_eq!(parse_price("NT$32,000"), Price::Amount(32_000));
        assert_eq!(parse_price(" $ 1,299 "), Price::Amount(1_299));
        assert_eq!(parse_price("45000"), Price::Amount(45_000));
    }

    #[test]
    fn zero_tokens() {
        assert_eq!(parse_price("NT$0"), Price::Amount(0));
        assert_eq!(parse_price("FREE"), Price::Amount(0));
        assert_eq!(parse_price("免費"), Price::Amount(0));
        assert_eq!(parse_price("NT$ 0.00"), Price::Amount(0));
        assert_eq!(parse_price("0"), Price::Amount(0));
    }

    #[test]
    fn decimal_fraction_dropped() {
        assert_eq!(parse_price("NT$1,234.00"), Price::Amount(1_234));
        assert_eq!(parse_price("$99.5"), Price::Amount(99));
    }

    #[test]
    fn dot_grouping_kept() {
        assert_eq!(parse_price("1.234"), Price::Amount(1_234));
    }

    #[test]
    fn no_digits_is_unknown() {
        assert_eq!(parse_price(""), Price::UnknownPrice);
        assert_eq!(parse_price("面議"), Price::UnknownPrice);
        assert_eq!(parse_price("NT$"), Price::UnknownPrice);
    }

    #[test]
    fn overflow_is_unknown() {
        assert_eq!(parse_price("99999999999999999999999"), Price::UnknownPrice);
    }
}
