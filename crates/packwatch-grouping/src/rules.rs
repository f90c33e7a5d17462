//! Ordered first-match-wins pattern tables.
//!
//! Declaration order is the priority order. A table must never be turned
//! into an unordered map: more specific labels sit above the generic labels
//! that would otherwise shadow them.

use regex::Regex;

/// One label with the regex alternatives that select it.
pub(crate) struct Rule {
    pub(crate) label: &'static str,
    patterns: Vec<Regex>,
}

impl Rule {
    fn is_match(&self, normalized: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(normalized))
    }
}

pub(crate) struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Compiles an ordered `(label, patterns)` table.
    ///
    /// # Panics
    ///
    /// Panics on an invalid pattern. Tables are compile-time literals.
    pub(crate) fn compile(table: &[(&'static str, &[&str])]) -> Self {
        let rules = table
            .iter()
            .map(|&(label, patterns)| Rule {
                label,
                patterns: patterns
                    .iter()
                    .map(|p| Regex::new(p).expect("valid rule pattern"))
                    .collect(),
            })
            .collect();
        Self { rules }
    }

    /// Returns the index and label of the first rule with a matching alternative.
    pub(crate) fn first_match(&self, normalized: &str) -> Option<(usize, &'static str)> {
        self.rules
            .iter()
            .enumerate()
            .find(|(_, rule)| rule.is_match(normalized))
            .map(|(idx, rule)| (idx, rule.label))
    }

    /// Position of `label` in the table, if present.
    pub(crate) fn rank_of(&self, label: &str) -> Option<usize> {
        self.rules.iter().position(|rule| rule.label == label)
    }

    pub(crate) fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.label)
    }
}
