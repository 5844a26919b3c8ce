//! Ordered labelled-capture extraction with value cleanup.

use regex::Regex;

use super::ExtractionMatch;
use super::patterns::{DIGIT_RUN, EDGE_PUNCTUATION, WHITESPACE_RUN};

/// How a raw capture is turned into a field value.
#[derive(Debug, Clone, Copy)]
pub enum Cleanup {
    /// Trim, collapse whitespace, cut at the first stop word and require
    /// at least `min_len` characters.
    Text {
        stop_words: &'static Regex,
        min_len: usize,
    },
    /// Keep only the first run of digits.
    Digits,
}

impl Cleanup {
    pub fn text(stop_words: &'static Regex, min_len: usize) -> Self {
        Cleanup::Text {
            stop_words,
            min_len,
        }
    }

    /// Clean a captured value; `None` if nothing acceptable remains.
    pub fn apply(&self, captured: &str) -> Option<String> {
        match *self {
            Cleanup::Text {
                stop_words,
                min_len,
            } => clean_text(captured, stop_words, min_len),
            Cleanup::Digits => DIGIT_RUN.find(captured).map(|m| m.as_str().to_string()),
        }
    }
}

fn clean_text(captured: &str, stop_words: &Regex, min_len: usize) -> Option<String> {
    let trimmed = EDGE_PUNCTUATION.replace_all(captured, "");
    let collapsed = WHITESPACE_RUN.replace_all(&trimmed, " ");

    // The capture runs past the value; the first stop word marks where the
    // next field begins.
    let value = match stop_words.find(&collapsed) {
        Some(stop) => &collapsed[..stop.start()],
        None => &collapsed[..],
    };
    let value = EDGE_PUNCTUATION.replace_all(value, "");

    if value.chars().count() >= min_len {
        Some(value.into_owned())
    } else {
        None
    }
}

/// Tries label patterns in table order, and each pattern's matches in
/// document order, returning the first capture that survives cleanup.
#[derive(Debug, Clone)]
pub struct PatternExtractor {
    patterns: &'static [Regex],
    cleanup: Cleanup,
}

impl PatternExtractor {
    pub fn new(patterns: &'static [Regex], cleanup: Cleanup) -> Self {
        Self { patterns, cleanup }
    }

    /// First acceptable value.
    pub fn extract(&self, text: &str) -> Option<ExtractionMatch> {
        self.candidates(text).next()
    }

    /// Every acceptable value, in the order `extract` would consider them.
    pub fn extract_all(&self, text: &str) -> Vec<ExtractionMatch> {
        self.candidates(text).collect()
    }

    fn candidates<'t>(&'t self, text: &'t str) -> impl Iterator<Item = ExtractionMatch> + 't {
        self.patterns
            .iter()
            .enumerate()
            .flat_map(move |(index, pattern)| {
                pattern.captures_iter(text).filter_map(move |caps| {
                    let group = caps.get(1)?;
                    let value = self.cleanup.apply(group.as_str())?;
                    Some(
                        ExtractionMatch::pattern(value, index, group.as_str())
                            .with_position(group.start(), group.end()),
                    )
                })
            })
    }
}
