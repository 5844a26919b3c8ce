//! Rule-based field extractors for procurement orders.

pub mod capture;
pub mod keywords;
pub mod location;
pub mod manufacturer;
pub mod patterns;
pub mod product;
pub mod quantity;
pub mod subtype;

pub use capture::{Cleanup, PatternExtractor};
pub use keywords::{KeywordHit, KeywordMatcher, TriggerTable};
pub use location::{FromLocationExtractor, ToLocationExtractor};
pub use manufacturer::ManufacturerExtractor;
pub use product::{PRODUCT_CATEGORIES, ProductExtractor};
pub use quantity::QuantityExtractor;
pub use subtype::{SUBTYPE_CATEGORIES, SubtypeExtractor};

use serde::Serialize;

use super::normalize::SourceText;
use crate::models::order::Field;

/// Trait for field extractors.
///
/// A miss is `None`, never an error.
pub trait FieldExtractor {
    /// The field this extractor fills.
    fn field(&self) -> Field;

    /// Extract the field from a document's text.
    fn extract(&self, source: &SourceText<'_>) -> Option<ExtractionMatch>;
}

/// How a value was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchMethod {
    /// A trigger phrase selected a fixed category.
    Keyword { trigger: &'static str },
    /// A labelled pattern captured the value.
    Pattern { index: usize },
}

/// An extracted value with where and how it was found.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionMatch {
    /// Extracted value.
    pub value: String,
    /// Confidence score (0.0 - 1.0).
    pub confidence: f32,
    /// How the value was found.
    pub method: MatchMethod,
    /// Byte span of the capture in the raw text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl ExtractionMatch {
    pub const KEYWORD_CONFIDENCE: f32 = 0.95;
    pub const PATTERN_CONFIDENCE: f32 = 0.8;

    pub fn keyword(label: &'static str, trigger: &'static str) -> Self {
        Self {
            value: label.to_string(),
            confidence: Self::KEYWORD_CONFIDENCE,
            method: MatchMethod::Keyword { trigger },
            position: None,
            source: trigger.to_string(),
        }
    }

    pub fn pattern(value: String, index: usize, source: impl Into<String>) -> Self {
        Self {
            value,
            confidence: Self::PATTERN_CONFIDENCE,
            method: MatchMethod::Pattern { index },
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}
