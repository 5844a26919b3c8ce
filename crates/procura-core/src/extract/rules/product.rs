//! Product extraction: road-safety product categories, then labels.

use super::capture::{Cleanup, PatternExtractor};
use super::keywords::{KeywordFirst, KeywordMatcher, TriggerTable};
use super::patterns::{PRODUCT_STOP, field_patterns};
use super::{ExtractionMatch, FieldExtractor};
use crate::extract::normalize::SourceText;
use crate::models::config::CaptureScope;
use crate::models::order::Field;

/// Product categories in priority order.
pub const PRODUCT_CATEGORIES: TriggerTable = &[
    (
        "W Beam Crash Barrier",
        &["w beam", "w-beam", "wbeam", "crash barrier"],
    ),
    ("Thrie Beam", &["thrie beam", "thrie-beam"]),
    ("Double W Beam", &["double w beam", "double w-beam"]),
    ("Crash-Tested", &["crash tested", "crash-tested"]),
    (
        "Hot Thermoplastic Paint",
        &["hot thermoplastic paint", "thermoplastic paint", "hot paint"],
    ),
    ("Signages", &["signages", "signage", "signs"]),
];

/// Product field extractor.
#[derive(Debug, Clone)]
pub struct ProductExtractor {
    inner: KeywordFirst,
}

impl ProductExtractor {
    pub fn new(scope: CaptureScope, keyword_detection: bool) -> Self {
        Self {
            inner: KeywordFirst {
                keywords: keyword_detection.then(|| KeywordMatcher::new(PRODUCT_CATEGORIES)),
                patterns: PatternExtractor::new(
                    &field_patterns(scope).product,
                    Cleanup::text(&PRODUCT_STOP, 3),
                ),
            },
        }
    }
}

impl Default for ProductExtractor {
    fn default() -> Self {
        Self::new(CaptureScope::default(), true)
    }
}

impl FieldExtractor for ProductExtractor {
    fn field(&self) -> Field {
        Field::Product
    }

    fn extract(&self, source: &SourceText<'_>) -> Option<ExtractionMatch> {
        self.inner.extract(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::rules::MatchMethod;

    fn extract(extractor: &ProductExtractor, text: &str) -> Option<String> {
        extractor.extract(&SourceText::new(text)).map(|m| m.value)
    }

    #[test]
    fn test_keyword_categories() {
        let extractor = ProductExtractor::default();
        assert_eq!(
            extract(&extractor, "Supply of W-BEAM sections"),
            Some("W Beam Crash Barrier".to_string())
        );
        assert_eq!(
            extract(&extractor, "thermoplastic   paint, 20 drums"),
            Some("Hot Thermoplastic Paint".to_string())
        );
        assert_eq!(extract(&extractor, "Road Signs"), Some("Signages".to_string()));
    }

    #[test]
    fn test_table_order_decides_overlaps() {
        let extractor = ProductExtractor::default();
        // "double w beam" also contains "w beam", which is listed first.
        assert_eq!(
            extract(&extractor, "Double W Beam barrier"),
            Some("W Beam Crash Barrier".to_string())
        );
    }

    #[test]
    fn test_keyword_beats_label() {
        let extractor = ProductExtractor::default();
        let found = extractor
            .extract(&SourceText::new("Product: Guard rail\nNote: thrie beam profile"))
            .unwrap();
        assert_eq!(found.value, "Thrie Beam");
        assert_eq!(found.method, MatchMethod::Keyword { trigger: "thrie beam" });
    }

    #[test]
    fn test_label_fallback() {
        let extractor = ProductExtractor::default();
        assert_eq!(
            extract(&extractor, "Item: Solar road studs Quantity: 40"),
            Some("Solar road studs".to_string())
        );
    }

    #[test]
    fn test_label_only_strips_trailing_type() {
        let extractor = ProductExtractor::new(CaptureScope::Line, false);
        assert_eq!(
            extract(&extractor, "Product: Thrie Beam Type"),
            Some("Thrie Beam".to_string())
        );
    }
}
