//! Regex tables for order field extraction.
//!
//! Label tables are ordered: earlier labels win. Each label is a regex
//! fragment matched case-insensitively and followed by `[: ]+` and the
//! value capture.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::config::CaptureScope;

pub const MANUFACTURER_LABELS: &[&str] = &[
    "Manufacturer",
    "Mfr",
    "Vendor",
    "Supplier",
    r"Party\s+Name",
];

pub const PRODUCT_LABELS: &[&str] = &["Product", "Item", "Material"];

pub const SUBTYPE_LABELS: &[&str] = &["Type", r"Product\s+Type", "Subtype"];

pub const QUANTITY_LABELS: &[&str] = &["Quantity", "Qty", "Ordered"];

pub const FROM_LABELS: &[&str] = &["From", "Origin", r"Shipped\s+From"];

pub const TO_LABELS: &[&str] = &["To", r"Deliver\s+To", "Destination", r"Ship\s+To"];

// Words that start the next field (or are noise) and end a captured value.
pub const MANUFACTURER_STOP_WORDS: &[&str] = &["product", "quantity", "price", "from", "to"];
pub const PRODUCT_STOP_WORDS: &[&str] = &["type", "quantity", "price", "from", "to"];
pub const SUBTYPE_STOP_WORDS: &[&str] = &["quantity", "price", "from", "to"];
pub const FROM_STOP_WORDS: &[&str] = &["to", "destination", "delivery", "transport"];
pub const TO_STOP_WORDS: &[&str] = &["transport", "rate", "distance", "estimated"];

/// Capture for free-text values.
const TEXT_VALUE: &str = "(.+)";

/// Capture for numeric values.
const NUMBER_VALUE: &str = "([0-9]+)";

lazy_static! {
    // Normalisation
    pub static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();

    pub static ref COLON_FORMS: Regex = Regex::new(r"[:;]\s*").unwrap();

    pub static ref DASH_FORMS: Regex = Regex::new(r"[-\u{2013}\u{2014}]\s*").unwrap();

    // Value cleanup
    pub static ref EDGE_PUNCTUATION: Regex = Regex::new(r"^[\s:.\-]+|[\s:.\-]+$").unwrap();

    pub static ref DIGIT_RUN: Regex = Regex::new(r"[0-9]+").unwrap();

    pub static ref MANUFACTURER_STOP: Regex = stop_word_pattern(MANUFACTURER_STOP_WORDS);
    pub static ref PRODUCT_STOP: Regex = stop_word_pattern(PRODUCT_STOP_WORDS);
    pub static ref SUBTYPE_STOP: Regex = stop_word_pattern(SUBTYPE_STOP_WORDS);
    pub static ref FROM_STOP: Regex = stop_word_pattern(FROM_STOP_WORDS);
    pub static ref TO_STOP: Regex = stop_word_pattern(TO_STOP_WORDS);

    // Labelled captures, one compiled set per scope
    static ref LINE_PATTERNS: FieldPatterns = FieldPatterns::compile(CaptureScope::Line);
    static ref DOCUMENT_PATTERNS: FieldPatterns = FieldPatterns::compile(CaptureScope::Document);
}

/// Compiled label patterns for every field.
pub struct FieldPatterns {
    pub manufacturer: Vec<Regex>,
    pub product: Vec<Regex>,
    pub subtype: Vec<Regex>,
    pub quantity: Vec<Regex>,
    pub from_location: Vec<Regex>,
    pub to_location: Vec<Regex>,
}

impl FieldPatterns {
    fn compile(scope: CaptureScope) -> Self {
        Self {
            manufacturer: label_patterns(MANUFACTURER_LABELS, TEXT_VALUE, scope),
            product: label_patterns(PRODUCT_LABELS, TEXT_VALUE, scope),
            subtype: label_patterns(SUBTYPE_LABELS, TEXT_VALUE, scope),
            quantity: label_patterns(QUANTITY_LABELS, NUMBER_VALUE, scope),
            from_location: label_patterns(FROM_LABELS, TEXT_VALUE, scope),
            to_location: label_patterns(TO_LABELS, TEXT_VALUE, scope),
        }
    }
}

/// Label patterns compiled for the given capture scope.
pub fn field_patterns(scope: CaptureScope) -> &'static FieldPatterns {
    match scope {
        CaptureScope::Line => &*LINE_PATTERNS,
        CaptureScope::Document => &*DOCUMENT_PATTERNS,
    }
}

fn label_patterns(labels: &[&str], value: &str, scope: CaptureScope) -> Vec<Regex> {
    let flags = match scope {
        CaptureScope::Line => "(?i)",
        CaptureScope::Document => "(?is)",
    };
    labels
        .iter()
        .map(|label| Regex::new(&format!("{flags}{label}[: ]+{value}")).unwrap())
        .collect()
}

/// A stop word as a whole word preceded by whitespace, case-insensitive.
fn stop_word_pattern(words: &[&str]) -> Regex {
    Regex::new(&format!(r"(?i)\s+(?:{})\b", words.join("|"))).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_follow_label_order() {
        let patterns = field_patterns(CaptureScope::Line);
        assert_eq!(patterns.manufacturer.len(), MANUFACTURER_LABELS.len());
        assert_eq!(patterns.to_location.len(), TO_LABELS.len());
        assert!(patterns.manufacturer[0].as_str().contains("Manufacturer"));
        assert!(patterns.manufacturer[4].as_str().contains(r"Party\s+Name"));
    }

    #[test]
    fn test_line_scope_stops_at_newline() {
        let line = &field_patterns(CaptureScope::Line).manufacturer[0];
        let caps = line.captures("Manufacturer: Acme\nProduct: Paint").unwrap();
        assert_eq!(&caps[1], "Acme");

        let document = &field_patterns(CaptureScope::Document).manufacturer[0];
        let caps = document.captures("Manufacturer: Acme\nProduct: Paint").unwrap();
        assert_eq!(&caps[1], "Acme\nProduct: Paint");
    }

    #[test]
    fn test_labels_are_case_insensitive() {
        let qty = &field_patterns(CaptureScope::Line).quantity[1];
        assert_eq!(&qty.captures("QTY 42 nos").unwrap()[1], "42");
        assert_eq!(&qty.captures("qty:7").unwrap()[1], "7");
    }

    #[test]
    fn test_stop_word_needs_whole_word() {
        assert!(FROM_STOP.is_match("Delhi To: Mumbai"));
        assert!(!FROM_STOP.is_match("Delhi Tonk"));
        assert!(!FROM_STOP.is_match("To Delhi"));
    }
}
