//! Error types for the procura-core library.

use thiserror::Error;

/// Main error type for the procura library.
#[derive(Error, Debug)]
pub enum ProcuraError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// The PDF decoded but carries no usable text (image-only scan).
    #[error("PDF contains no extractable text")]
    NoText,
}

/// Errors raised by the extraction pipeline.
///
/// A field that cannot be found is not an error; it comes back as an empty
/// string in the result. Only the complete absence of text is escalated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The input was empty or contained only whitespace.
    #[error("no text to extract fields from")]
    EmptyInput,
}

/// Result type for the procura library.
pub type Result<T> = std::result::Result<T, ProcuraError>;
