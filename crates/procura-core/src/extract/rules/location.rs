//! Origin and destination extraction.

use super::capture::{Cleanup, PatternExtractor};
use super::patterns::{FROM_STOP, TO_STOP, field_patterns};
use super::{ExtractionMatch, FieldExtractor};
use crate::extract::normalize::SourceText;
use crate::models::config::CaptureScope;
use crate::models::order::Field;

/// Origin ("from") field extractor.
#[derive(Debug, Clone)]
pub struct FromLocationExtractor {
    patterns: PatternExtractor,
}

impl FromLocationExtractor {
    pub fn new(scope: CaptureScope) -> Self {
        Self {
            patterns: PatternExtractor::new(
                &field_patterns(scope).from_location,
                Cleanup::text(&FROM_STOP, 3),
            ),
        }
    }
}

impl Default for FromLocationExtractor {
    fn default() -> Self {
        Self::new(CaptureScope::default())
    }
}

impl FieldExtractor for FromLocationExtractor {
    fn field(&self) -> Field {
        Field::FromLocation
    }

    fn extract(&self, source: &SourceText<'_>) -> Option<ExtractionMatch> {
        self.patterns.extract(source.raw)
    }
}

/// Destination ("to") field extractor.
#[derive(Debug, Clone)]
pub struct ToLocationExtractor {
    patterns: PatternExtractor,
}

impl ToLocationExtractor {
    pub fn new(scope: CaptureScope) -> Self {
        Self {
            patterns: PatternExtractor::new(
                &field_patterns(scope).to_location,
                Cleanup::text(&TO_STOP, 3),
            ),
        }
    }
}

impl Default for ToLocationExtractor {
    fn default() -> Self {
        Self::new(CaptureScope::default())
    }
}

impl FieldExtractor for ToLocationExtractor {
    fn field(&self) -> Field {
        Field::ToLocation
    }

    fn extract(&self, source: &SourceText<'_>) -> Option<ExtractionMatch> {
        self.patterns.extract(source.raw)
    }
}
