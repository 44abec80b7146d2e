//! Ordered, first-match-wins rule chains.
//!
//! Each extractor is a list of named rules evaluated in sequence; the first
//! rule returning `Some` decides the result. Keeping precedence in data
//! rather than nested branches lets tests pin individual rules and lets the
//! normaliser report which rule fired.

use tracing::trace;

/// A named matcher over some input.
pub struct Rule<I: ?Sized, T> {
    pub name: &'static str,
    pub matcher: fn(&I) -> Option<T>,
}

impl<I: ?Sized, T> Rule<I, T> {
    pub const fn new(name: &'static str, matcher: fn(&I) -> Option<T>) -> Self {
        Self { name, matcher }
    }

    pub fn apply(&self, input: &I) -> Option<T> {
        (self.matcher)(input)
    }
}

/// Result of a rule chain, tagged with the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired<T> {
    pub rule: &'static str,
    pub value: T,
}

/// Evaluate `rules` in order and return the first match.
pub fn first_match<I: ?Sized, T>(rules: &[Rule<I, T>], input: &I) -> Option<Fired<T>> {
    rules.iter().find_map(|rule| {
        rule.apply(input).map(|value| {
            trace!(rule = rule.name, "rule fired");
            Fired {
                rule: rule.name,
                value,
            }
        })
    })
}

/// Names of a chain's rules in evaluation order.
pub fn rule_names<I: ?Sized, T>(rules: &[Rule<I, T>]) -> Vec<&'static str> {
    rules.iter().map(|r| r.name).collect()
}
