//! Heuristic extraction pipeline: normalise once, run every field
//! extractor, assemble the record.

use std::collections::BTreeMap;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::ExtractionError;
use crate::models::config::ExtractionConfig;
use crate::models::order::{ExtractionResult, Field};

use super::Result;
use super::normalize::SourceText;
use super::rules::{
    ExtractionMatch, FieldExtractor, FromLocationExtractor, ManufacturerExtractor,
    ProductExtractor, QuantityExtractor, SubtypeExtractor, ToLocationExtractor,
};

/// Extraction outcome with per-field detail.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    /// The extracted record.
    pub result: ExtractionResult,
    /// How each found field was matched.
    pub matches: BTreeMap<Field, ExtractionMatch>,
    /// Fields that came back empty.
    pub missing_fields: Vec<Field>,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for order parsing.
pub trait OrderParser {
    /// Parse order fields from text.
    fn parse(&self, text: &str) -> Result<ExtractionReport>;

    /// Parse order fields from text, keeping only the record.
    fn extract(&self, text: &str) -> Result<ExtractionResult> {
        self.parse(text).map(|report| report.result)
    }
}

type BoxedExtractor = Box<dyn FieldExtractor + Send + Sync>;

/// Keyword-and-pattern pipeline over the six order fields.
///
/// Holds only immutable compiled tables, so one instance can serve many
/// threads.
pub struct HeuristicPipeline {
    extractors: Vec<BoxedExtractor>,
    max_input_bytes: usize,
}

impl HeuristicPipeline {
    /// Create a pipeline with default settings.
    pub fn new() -> Self {
        Self::with_config(&ExtractionConfig::default())
    }

    /// Create a pipeline from extraction settings.
    pub fn with_config(config: &ExtractionConfig) -> Self {
        let scope = config.capture_scope;
        let extractors: Vec<BoxedExtractor> = vec![
            Box::new(ManufacturerExtractor::new(scope)),
            Box::new(ProductExtractor::new(scope, config.keyword_detection)),
            Box::new(SubtypeExtractor::new(scope, config.keyword_detection)),
            Box::new(QuantityExtractor::new(scope)),
            Box::new(FromLocationExtractor::new(scope)),
            Box::new(ToLocationExtractor::new(scope)),
        ];

        Self {
            extractors,
            max_input_bytes: config.max_input_bytes,
        }
    }

    /// Set the input size cap.
    pub fn with_max_input_bytes(mut self, max: usize) -> Self {
        self.max_input_bytes = max;
        self
    }
}

impl Default for HeuristicPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderParser for HeuristicPipeline {
    fn parse(&self, text: &str) -> Result<ExtractionReport> {
        let start = Instant::now();
        let mut warnings = Vec::new();

        if text.trim().is_empty() {
            return Err(ExtractionError::EmptyInput);
        }

        let text = match truncate_to_char_boundary(text, self.max_input_bytes) {
            Some(truncated) => {
                warn!(
                    "Input of {} bytes truncated to {} bytes before extraction",
                    text.len(),
                    truncated.len()
                );
                warnings.push(format!(
                    "Input truncated from {} to {} bytes",
                    text.len(),
                    truncated.len()
                ));
                truncated
            }
            None => text,
        };

        // The kept prefix may itself be blank.
        if text.trim().is_empty() {
            return Err(ExtractionError::EmptyInput);
        }

        info!("Extracting order fields from {} characters of text", text.len());

        let source = SourceText::new(text);
        let mut result = ExtractionResult::default();
        let mut matches = BTreeMap::new();

        for extractor in &self.extractors {
            let field = extractor.field();
            match extractor.extract(&source) {
                Some(found) => {
                    debug!("{}: {:?} via {:?}", field, found.value, found.method);
                    result.set(field, Some(found.value.clone()));
                    matches.insert(field, found);
                }
                None => {
                    debug!("{}: no match", field);
                    result.set(field, None);
                }
            }
        }

        let missing_fields = result.missing_fields();
        for field in &missing_fields {
            warnings.push(format!("Could not extract {}", field));
        }

        Ok(ExtractionReport {
            result,
            matches,
            missing_fields,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }
}

/// The longest prefix of `text` within `max` bytes, or `None` if it fits.
fn truncate_to_char_boundary(text: &str, max: usize) -> Option<&str> {
    if text.len() <= max {
        return None;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    Some(&text[..end])
}
