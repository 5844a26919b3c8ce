//! Manufacturer (vendor / supplier) extraction.

use super::capture::{Cleanup, PatternExtractor};
use super::patterns::{MANUFACTURER_STOP, field_patterns};
use super::{ExtractionMatch, FieldExtractor};
use crate::extract::normalize::SourceText;
use crate::models::config::CaptureScope;
use crate::models::order::Field;

/// Manufacturer field extractor. Labelled patterns only.
#[derive(Debug, Clone)]
pub struct ManufacturerExtractor {
    patterns: PatternExtractor,
}

impl ManufacturerExtractor {
    pub fn new(scope: CaptureScope) -> Self {
        Self {
            patterns: PatternExtractor::new(
                &field_patterns(scope).manufacturer,
                Cleanup::text(&MANUFACTURER_STOP, 3),
            ),
        }
    }
}

impl Default for ManufacturerExtractor {
    fn default() -> Self {
        Self::new(CaptureScope::default())
    }
}

impl FieldExtractor for ManufacturerExtractor {
    fn field(&self) -> Field {
        Field::Manufacturer
    }

    fn extract(&self, source: &SourceText<'_>) -> Option<ExtractionMatch> {
        self.patterns.extract(source.raw)
    }
}
