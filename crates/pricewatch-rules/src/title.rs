/// A listing title lower-cased once for every extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title {
    text: String,
}

impl Title {
    pub fn new(raw: &str) -> Self {
        Self {
            text: raw.to_lowercase(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.text.contains(needle)
    }

    pub fn contains_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.text.contains(n))
    }

    /// The title with all whitespace removed (`"apple care"` → `"applecare"`).
    pub fn compact(&self) -> String {
        self.text.chars().filter(|c| !c.is_whitespace()).collect()
    }
}

/// Character immediately before byte offset `at`.
pub(crate) fn char_before(text: &str, at: usize) -> Option<char> {
    text[..at].chars().next_back()
}

/// Character starting at byte offset `at`.
pub(crate) fn char_at(text: &str, at: usize) -> Option<char> {
    text[at..].chars().next()
}

/// Regex `\w`: Unicode alphanumerics and underscore.
pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_once() {
        let t = Title::new("MacBook PRO 保固內");
        assert_eq!(t.as_str(), "macbook pro 保固內");
        assert!(t.contains("macbook"));
        assert!(t.contains_any(&["ipad", "pro"]));
        assert!(!t.contains_any(&["ipad", "imac"]));
    }

    #[test]
    fn compact_removes_whitespace() {
        assert_eq!(Title::new("Apple Care+\t到期").compact(), "applecare+到期");
    }

    #[test]
    fn char_helpers() {
        let s = "m1 保固";
        assert_eq!(char_before(s, 0), None);
        assert_eq!(char_before(s, 2), Some('1'));
        assert_eq!(char_at(s, 3), Some('保'));
        assert_eq!(char_at(s, s.len()), None);
        assert!(is_word_char('保'));
        assert!(!is_word_char('/'));
    }
}
