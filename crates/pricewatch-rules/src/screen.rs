//! Screen-size extraction against fixed whitelists of diagonals.

use std::sync::LazyLock;

use pricewatch_core::{Inches, ScreenSize};
use regex::Regex;

use crate::title::{Title, char_at, char_before};

/// Laptop and desktop diagonals. A trailing `.d` (as in `13.3`) is ignored.
static COMPUTER_SIZES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(11|12|13|14|15|16|21\.5|24|27|30)(?:\.\d)?(?:\s*(?:吋|inch|"|”))?"#)
        .expect("valid computer screen pattern")
});

static TABLET_SIZES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(8\.3|10\.9|11|12\.9|13)(?:\s*(?:吋|inch|"|”))?"#)
        .expect("valid tablet screen pattern")
});

/// First whitelisted laptop/desktop diagonal in the title.
pub fn extract_screen(title: &Title) -> ScreenSize {
    first_size(&COMPUTER_SIZES, title)
}

/// First whitelisted tablet diagonal in the title.
pub fn extract_tablet_screen(title: &Title) -> ScreenSize {
    first_size(&TABLET_SIZES, title)
}

/// The size value must stand alone: no digit or decimal point before it and
/// no digit after it, so years (`2024`) and capacities (`1024`) are skipped.
fn first_size(pattern: &Regex, title: &Title) -> ScreenSize {
    let text = title.as_str();
    pattern
        .captures_iter(text)
        .find_map(|caps| {
            let value = caps.get(1)?;
            if char_before(text, value.start()).is_some_and(|c| c.is_ascii_digit() || c == '.') {
                return None;
            }
            let whole = caps.get(0)?;
            if char_at(text, whole.end()).is_some_and(|c| c.is_ascii_digit()) {
                return None;
            }
            Inches::parse(value.as_str())
        })
        .map(ScreenSize::Size)
        .unwrap_or(ScreenSize::UnknownScreen)
}
