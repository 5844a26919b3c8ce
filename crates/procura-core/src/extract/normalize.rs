//! Text normalisation for converter output.

use super::rules::patterns::{COLON_FORMS, DASH_FORMS, WHITESPACE_RUN};

/// Canonicalise whitespace and punctuation.
///
/// Newlines become spaces, whitespace runs collapse to a single space,
/// `:`/`;` become `": "`, en/em dashes become `-` with trailing space
/// dropped, and the result is trimmed. Normalising twice gives the same
/// text as normalising once.
pub fn normalize_text(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let text = raw.replace(['\n', '\r'], " ");
    let text = WHITESPACE_RUN.replace_all(&text, " ");
    let text = COLON_FORMS.replace_all(&text, ": ");
    let text = DASH_FORMS.replace_all(&text, "-");

    text.trim().to_string()
}

/// The forms of one document's text that extractors read from.
///
/// Labelled patterns run on `raw` so positions and casing survive;
/// keyword lookups run on `lowered`.
#[derive(Debug, Clone)]
pub struct SourceText<'a> {
    pub raw: &'a str,
    pub normalized: String,
    pub lowered: String,
}

impl<'a> SourceText<'a> {
    pub fn new(raw: &'a str) -> Self {
        let normalized = normalize_text(raw);
        let lowered = normalized.to_lowercase();
        Self {
            raw,
            normalized,
            lowered,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const IRREGULAR: &[&str] = &[
        "",
        "   ",
        "\n\r\t",
        "Manufacturer:Acme\r\nProduct ;  Paint",
        "Qty  :  150\n\nFrom -  Delhi",
        "a - - b",
        "x –  y — z",
        "ends with colon:",
        ":- leading",
        "- : mixed",
        "tabs\tand\u{00a0}nbsp  here",
        "Deliver To;Mumbai -Transport: road",
        "trailing dash -   ",
    ];

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text(" \n \r\n "), "");
    }

    #[test]
    fn test_whitespace_and_newlines() {
        assert_eq!(
            normalize_text("Manufacturer  Acme\r\nCorp\n\nLtd"),
            "Manufacturer Acme Corp Ltd"
        );
    }

    #[test]
    fn test_colons_and_semicolons() {
        assert_eq!(normalize_text("Qty:150"), "Qty: 150");
        assert_eq!(normalize_text("Qty ;  150"), "Qty : 150");
        assert_eq!(normalize_text("From:   Delhi"), "From: Delhi");
    }

    #[test]
    fn test_dash_variants() {
        assert_eq!(normalize_text("W – Beam"), "W -Beam");
        assert_eq!(normalize_text("Crash—tested"), "Crash-tested");
        assert_eq!(normalize_text("W- Beam"), "W-Beam");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for input in IRREGULAR {
            let once = normalize_text(input);
            assert_eq!(normalize_text(&once), once, "input: {:?}", input);
        }
    }

    #[test]
    fn test_source_text_forms() {
        let source = SourceText::new("Product:\nW-BEAM");
        assert_eq!(source.raw, "Product:\nW-BEAM");
        assert_eq!(source.normalized, "Product: W-BEAM");
        assert_eq!(source.lowered, "product: w-beam");
    }
}
