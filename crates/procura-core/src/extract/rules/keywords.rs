//! First-match-wins category lookup over ordered trigger tables.

use super::capture::PatternExtractor;
use super::ExtractionMatch;
use crate::extract::normalize::SourceText;

/// Ordered `(category, triggers)` pairs. Earlier entries take priority,
/// and triggers are authored in lowercase.
pub type TriggerTable = &'static [(&'static str, &'static [&'static str])];

/// A category selected by one of its triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordHit {
    pub category: &'static str,
    pub trigger: &'static str,
}

/// Looks up the first category whose trigger occurs in lowercased text.
#[derive(Debug, Clone, Copy)]
pub struct KeywordMatcher {
    table: TriggerTable,
}

impl KeywordMatcher {
    pub const fn new(table: TriggerTable) -> Self {
        Self { table }
    }

    /// Find the first matching entry. `lowered` must already be lowercase.
    pub fn find(&self, lowered: &str) -> Option<KeywordHit> {
        self.table.iter().find_map(|&(category, triggers)| {
            triggers
                .iter()
                .copied()
                .find(|trigger| lowered.contains(trigger))
                .map(|trigger| KeywordHit {
                    category,
                    trigger,
                })
        })
    }

    /// Category label of the first matching entry.
    pub fn category(&self, lowered: &str) -> Option<&'static str> {
        self.find(lowered).map(|hit| hit.category)
    }
}

/// Keyword lookup first, labelled patterns only when no category matches.
#[derive(Debug, Clone)]
pub(crate) struct KeywordFirst {
    pub keywords: Option<KeywordMatcher>,
    pub patterns: PatternExtractor,
}

impl KeywordFirst {
    pub fn extract(&self, source: &SourceText<'_>) -> Option<ExtractionMatch> {
        if let Some(hit) = self.keywords.and_then(|k| k.find(&source.lowered)) {
            return Some(ExtractionMatch::keyword(hit.category, hit.trigger));
        }
        self.patterns.extract(source.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLOURS: TriggerTable = &[
        ("Warm", &["red", "orange"]),
        ("Cool", &["blue", "green"]),
        ("Reddish", &["red"]),
    ];

    #[test]
    fn test_first_entry_wins() {
        let matcher = KeywordMatcher::new(COLOURS);
        assert_eq!(matcher.category("blue and red"), Some("Warm"));
        assert_eq!(matcher.category("deep green"), Some("Cool"));
    }

    #[test]
    fn test_reports_trigger() {
        let matcher = KeywordMatcher::new(COLOURS);
        assert_eq!(
            matcher.find("burnt orange"),
            Some(KeywordHit {
                category: "Warm",
                trigger: "orange"
            })
        );
    }

    #[test]
    fn test_substring_semantics() {
        let matcher = KeywordMatcher::new(COLOURS);
        assert_eq!(matcher.category("bluebird"), Some("Cool"));
        assert_eq!(matcher.category("purple"), None);
        assert_eq!(matcher.category(""), None);
    }
}
