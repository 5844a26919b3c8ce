//! PDF text extraction using lopdf and pdf-extract.

use lopdf::{Document, Object};
use tracing::{debug, trace};

use super::{PdfProcessor, PdfType, Result};
use crate::error::PdfError;
use crate::models::config::PdfConfig;

/// PDF content extractor using lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    /// Count image XObjects anywhere in the document.
    fn image_count(&self) -> usize {
        let Some(doc) = self.document.as_ref() else {
            return 0;
        };

        let count = doc.objects.values().filter(|obj| is_image(obj)).count();
        trace!("Found {} image objects", count);
        count
    }
}

fn is_image(obj: &Object) -> bool {
    let Object::Stream(stream) = obj else {
        return false;
    };
    stream
        .dict
        .get(b"Subtype")
        .and_then(Object::as_name)
        .map(|name| name == b"Image")
        .unwrap_or(false)
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract needs the decrypted bytes
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn analyze(&self) -> PdfType {
        let text = self.extract_text().unwrap_or_default();
        classify(&text, self.image_count(), 1)
    }

    fn extract_text(&self) -> Result<String> {
        if self.document.is_none() {
            return Err(PdfError::Parse("No document loaded".to_string()));
        }
        // pdf-extract panics on some malformed content streams
        let data = self.raw_data.as_slice();
        std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(data))
            .map_err(|_| PdfError::TextExtraction("text decoder panicked".to_string()))?
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}

/// Classify a document from its extracted text and image count.
///
/// Text counts when at least `min_chars` characters remain after trimming.
fn classify(text: &str, images: usize, min_chars: usize) -> PdfType {
    let usable = text.trim().chars().count();
    let has_text = usable > 0 && usable >= min_chars;
    let has_images = images > 0;

    let pdf_type = match (has_text, has_images) {
        (true, false) => PdfType::Text,
        (false, true) => PdfType::Image,
        (true, true) => PdfType::Hybrid,
        (false, false) => PdfType::Empty,
    };

    debug!(
        "PDF analysis: {} chars, {} images -> {:?}",
        usable, images, pdf_type
    );
    pdf_type
}

/// Convert a PDF to text for field extraction.
///
/// Fails with [`PdfError::NoText`] when the document is image-only or empty,
/// as with scans.
pub fn extract_document_text(data: &[u8], config: &PdfConfig) -> Result<String> {
    let mut extractor = PdfExtractor::new();
    extractor.load(data)?;

    let text = extractor.extract_text()?;
    let pdf_type = classify(&text, extractor.image_count(), config.min_text_length);
    debug!("Classified {}-page PDF as {:?}", extractor.page_count(), pdf_type);

    match pdf_type {
        PdfType::Text | PdfType::Hybrid => Ok(text),
        PdfType::Image | PdfType::Empty => Err(PdfError::NoText),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{Stream, dictionary};

    /// A one-page document showing `text` in Courier.
    fn text_pdf(text: &str) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn test_extract_document_text_from_text_pdf() {
        let data = text_pdf("Manufacturer: Acme Corp");
        let text = extract_document_text(&data, &PdfConfig::default()).unwrap();
        assert!(text.contains("Acme Corp"));
    }

    #[test]
    fn test_load_counts_pages() {
        let mut extractor = PdfExtractor::new();
        extractor.load(&text_pdf("Qty: 5")).unwrap();
        assert_eq!(extractor.page_count(), 1);
        assert_eq!(extractor.image_count(), 0);
    }

    #[test]
    fn test_short_text_is_no_text() {
        let data = text_pdf("Qty: 5");
        let config = PdfConfig { min_text_length: 100 };
        let err = extract_document_text(&data, &config).unwrap_err();
        assert!(matches!(err, PdfError::NoText));
    }

    #[test]
    fn test_pdf_extractor_new() {
        let extractor = PdfExtractor::new();
        assert!(extractor.document.is_none());
        assert_eq!(extractor.page_count(), 0);
        assert_eq!(extractor.image_count(), 0);
    }

    #[test]
    fn test_extract_text_requires_document() {
        let extractor = PdfExtractor::new();
        assert!(matches!(extractor.extract_text(), Err(PdfError::Parse(_))));
    }

    #[test]
    fn test_garbage_is_parse_error() {
        let mut extractor = PdfExtractor::new();
        let err = extractor.load(b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, PdfError::Parse(_)));
    }

    #[test]
    fn test_extract_document_text_rejects_garbage() {
        let err = extract_document_text(b"", &PdfConfig::default()).unwrap_err();
        assert!(matches!(err, PdfError::Parse(_)));
    }

    #[test]
    fn test_analyze_text_pdf() {
        let mut extractor = PdfExtractor::new();
        extractor.load(&text_pdf("Manufacturer: Acme Corp")).unwrap();
        assert_eq!(extractor.analyze(), PdfType::Text);
    }

    #[test]
    fn test_analyze_without_document_is_empty() {
        assert_eq!(PdfExtractor::new().analyze(), PdfType::Empty);
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("Qty: 5", 0, 1), PdfType::Text);
        assert_eq!(classify("Qty: 5", 2, 1), PdfType::Hybrid);
        assert_eq!(classify("  \n ", 3, 1), PdfType::Image);
        assert_eq!(classify("", 0, 1), PdfType::Empty);
        assert_eq!(classify("Qty: 5", 0, 100), PdfType::Empty);
        assert_eq!(classify("   ", 0, 0), PdfType::Empty);
    }

    #[test]
    fn test_is_image() {
        let mut dict = lopdf::Dictionary::new();
        dict.set("Subtype", Object::Name(b"Image".to_vec()));
        let image = Object::Stream(lopdf::Stream::new(dict, Vec::new()));
        assert!(is_image(&image));

        let mut dict = lopdf::Dictionary::new();
        dict.set("Subtype", Object::Name(b"Form".to_vec()));
        let form = Object::Stream(lopdf::Stream::new(dict, Vec::new()));
        assert!(!is_image(&form));

        assert!(!is_image(&Object::Integer(1)));
    }
}
