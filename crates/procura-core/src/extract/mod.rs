//! Order field extraction module.

pub mod normalize;
mod pipeline;
pub mod rules;

pub use normalize::{SourceText, normalize_text};
pub use pipeline::{ExtractionReport, HeuristicPipeline, OrderParser};
pub use rules::{ExtractionMatch, FieldExtractor, MatchMethod};

use crate::error::ExtractionError;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;
