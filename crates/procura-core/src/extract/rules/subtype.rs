//! Product subtype extraction: geometry, finish and purpose classes.

use super::capture::{Cleanup, PatternExtractor};
use super::keywords::{KeywordFirst, KeywordMatcher, TriggerTable};
use super::patterns::{SUBTYPE_STOP, field_patterns};
use super::{ExtractionMatch, FieldExtractor};
use crate::extract::normalize::SourceText;
use crate::models::config::CaptureScope;
use crate::models::order::Field;

/// Subtype categories in priority order.
pub const SUBTYPE_CATEGORIES: TriggerTable = &[
    ("W-Beam", &["w-beam", "w beam"]),
    ("Thrie-Beam", &["thrie-beam", "thrie beam"]),
    ("Double W-Beam", &["double w-beam", "double w beam"]),
    ("Crash-Tested", &["crash-tested", "crash tested"]),
    ("White", &["white"]),
    ("Yellow", &["yellow"]),
    ("Reflective", &["reflective"]),
    ("Directional", &["directional"]),
    ("Informational", &["informational"]),
    ("Cautionary", &["cautionary"]),
];

/// Subtype field extractor.
#[derive(Debug, Clone)]
pub struct SubtypeExtractor {
    inner: KeywordFirst,
}

impl SubtypeExtractor {
    pub fn new(scope: CaptureScope, keyword_detection: bool) -> Self {
        Self {
            inner: KeywordFirst {
                keywords: keyword_detection.then(|| KeywordMatcher::new(SUBTYPE_CATEGORIES)),
                patterns: PatternExtractor::new(
                    &field_patterns(scope).subtype,
                    Cleanup::text(&SUBTYPE_STOP, 2),
                ),
            },
        }
    }
}

impl Default for SubtypeExtractor {
    fn default() -> Self {
        Self::new(CaptureScope::default(), true)
    }
}

impl FieldExtractor for SubtypeExtractor {
    fn field(&self) -> Field {
        Field::Subtype
    }

    fn extract(&self, source: &SourceText<'_>) -> Option<ExtractionMatch> {
        self.inner.extract(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(extractor: &SubtypeExtractor, text: &str) -> Option<String> {
        extractor.extract(&SourceText::new(text)).map(|m| m.value)
    }

    #[test]
    fn test_colour_and_purpose_classes() {
        let extractor = SubtypeExtractor::default();
        assert_eq!(extract(&extractor, "Paint colour: YELLOW"), Some("Yellow".to_string()));
        assert_eq!(
            extract(&extractor, "Cautionary boards, 600mm"),
            Some("Cautionary".to_string())
        );
    }

    #[test]
    fn test_normalised_dash_variants_match() {
        let extractor = SubtypeExtractor::default();
        assert_eq!(
            extract(&extractor, "Crash\u{2014}tested barrier"),
            Some("Crash-Tested".to_string())
        );
    }

    #[test]
    fn test_label_fallback_min_length_two() {
        let extractor = SubtypeExtractor::default();
        assert_eq!(extract(&extractor, "Type: A2 Quantity: 5"), Some("A2".to_string()));
        assert_eq!(extract(&extractor, "Type: A"), None);
    }

    #[test]
    fn test_subtype_label() {
        let extractor = SubtypeExtractor::new(CaptureScope::Line, false);
        assert_eq!(
            extract(&extractor, "Subtype: Retro reflective, white"),
            Some("Retro reflective, white".to_string())
        );
    }
}
