//! Ordered quantity extraction.

use super::capture::{Cleanup, PatternExtractor};
use super::patterns::field_patterns;
use super::{ExtractionMatch, FieldExtractor};
use crate::extract::normalize::SourceText;
use crate::models::config::CaptureScope;
use crate::models::order::Field;

/// Quantity field extractor. Yields the first digit run after a label.
#[derive(Debug, Clone)]
pub struct QuantityExtractor {
    patterns: PatternExtractor,
}

impl QuantityExtractor {
    pub fn new(scope: CaptureScope) -> Self {
        Self {
            patterns: PatternExtractor::new(&field_patterns(scope).quantity, Cleanup::Digits),
        }
    }
}

impl Default for QuantityExtractor {
    fn default() -> Self {
        Self::new(CaptureScope::default())
    }
}

impl FieldExtractor for QuantityExtractor {
    fn field(&self) -> Field {
        Field::Quantity
    }

    fn extract(&self, source: &SourceText<'_>) -> Option<ExtractionMatch> {
        self.patterns.extract(source.raw)
    }
}
