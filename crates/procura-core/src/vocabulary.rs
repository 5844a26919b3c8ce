//! Matching extracted values against known names.
//!
//! Used to suggest the canonical spelling of a manufacturer, product or
//! location that was extracted with a typo or odd casing. Suggestions are
//! reported alongside the extracted record and never replace it.

use serde::Serialize;

/// Default score needed for [`Vocabulary::auto_correct`].
pub const AUTO_CORRECT_THRESHOLD: f64 = 0.92;

/// Lowest score for an entry to be suggested at all.
const SUGGESTION_FLOOR: f64 = 0.6;

/// A known name and its similarity to the input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub value: String,
    pub score: f64,
}

/// A list of known names.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    entries: Vec<String>,
}

impl Vocabulary {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(Into::into)
                .filter(|entry: &String| !entry.trim().is_empty())
                .collect(),
        }
    }

    /// Parse a JSON array of strings.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let entries: Vec<String> = serde_json::from_str(json)?;
        Ok(Self::new(entries))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries scoring at least 0.6 against `input`, best first.
    pub fn suggestions(&self, input: &str, max: usize) -> Vec<Suggestion> {
        if normalize(input).is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<Suggestion> = self
            .entries
            .iter()
            .map(|entry| Suggestion {
                value: entry.clone(),
                score: similarity(input, entry),
            })
            .filter(|s| s.score >= SUGGESTION_FLOOR)
            .collect();

        // Stable sort keeps vocabulary order for equal scores.
        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        matches.truncate(max);
        matches
    }

    /// The best entry if it scores at least `threshold`.
    pub fn auto_correct(&self, input: &str, threshold: f64) -> Option<Suggestion> {
        self.suggestions(input, 1)
            .into_iter()
            .next()
            .filter(|best| best.score >= threshold)
    }
}

/// Similarity between two names in `0.0..=1.0`.
///
/// Exact after normalisation scores 1.0, containment 0.95, otherwise the
/// better of Jaro-Winkler and normalised Levenshtein.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);

    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }
    if a.contains(&b) || b.contains(&a) {
        return 0.95;
    }

    strsim::jaro_winkler(&a, &b).max(strsim::normalized_levenshtein(&a, &b))
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
