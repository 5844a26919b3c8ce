//! Core library for procurement order field extraction.
//!
//! This crate provides:
//! - Text normalisation for document-converter output
//! - Keyword and labelled-pattern rules for manufacturer, product, subtype,
//!   quantity, origin and destination
//! - An extraction pipeline that assembles those fields into a record
//! - PDF text conversion
//! - Vocabulary matching for suggesting canonical names

pub mod error;
pub mod extract;
pub mod models;
pub mod pdf;
pub mod vocabulary;

pub use error::{ExtractionError, PdfError, ProcuraError, Result};
pub use extract::{ExtractionReport, HeuristicPipeline, OrderParser, normalize_text};
pub use models::config::{CaptureScope, ExtractionConfig, PdfConfig, ProcuraConfig, ServerConfig};
pub use models::order::{ExtractionResult, Field};
pub use pdf::{PdfExtractor, PdfProcessor, PdfType, extract_document_text};
pub use vocabulary::{Suggestion, Vocabulary};

/// Extract order fields from raw text with default settings.
///
/// Fails only when the text is empty or whitespace; fields that cannot be
/// found come back as empty strings.
pub fn extract(raw_text: &str) -> std::result::Result<ExtractionResult, ExtractionError> {
    HeuristicPipeline::new().extract(raw_text)
}
