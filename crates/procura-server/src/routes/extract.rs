//! Field extraction for uploaded PDFs.

use std::path::Path;
use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use serde::Serialize;
use tracing::{error, info, warn};

use procura_core::{ExtractionResult, OrderParser, Suggestion, Vocabulary, extract_document_text};

use crate::error::ApiError;
use crate::state::AppState;

/// Most manufacturer suggestions returned per request.
const MAX_SUGGESTIONS: usize = 3;

/// Successful extraction response.
#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    success: bool,
    #[serde(flatten)]
    result: ExtractionResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestions: Option<Vec<Suggestion>>,
}

/// An uploaded PDF and its form options.
struct Upload {
    filename: String,
    content: Bytes,
    manufacturers: Option<Vocabulary>,
}

/// POST /extract and /extract-pdf: extract order fields from an uploaded PDF.
pub async fn extract_pdf(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ExtractResponse>, ApiError> {
    let multipart = multipart.map_err(|rejection| {
        warn!("Rejected upload: {}", rejection);
        ApiError::NoFile
    })?;
    let upload = read_upload(multipart).await?;

    info!("Extracting fields from {} ({} bytes)", upload.filename, upload.content.len());

    let worker_state = Arc::clone(&state);
    let content = upload.content;
    let result = tokio::task::spawn_blocking(move || -> Result<ExtractionResult, ApiError> {
        let text = extract_document_text(&content, &worker_state.config.pdf).map_err(|e| {
            warn!("PDF text conversion failed: {}", e);
            ApiError::NoText
        })?;
        worker_state.pipeline.extract(&text).map_err(|e| {
            warn!("Extraction failed: {}", e);
            ApiError::NoText
        })
    })
    .await
    .map_err(|e| {
        error!("PDF worker failed: {}", e);
        ApiError::Internal
    })??;

    let suggestions = upload
        .manufacturers
        .and_then(|vocabulary| manufacturer_suggestions(&vocabulary, &result.manufacturer));

    Ok(Json(ExtractResponse {
        success: true,
        result,
        suggestions,
    }))
}

/// Collect the `file` part and the optional `manufacturer_list` part.
async fn read_upload(mut multipart: Multipart) -> Result<Upload, ApiError> {
    let mut file: Option<(String, Bytes)> = None;
    let mut manufacturers = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => {
                // A part without a filename is a form value, not an upload.
                let Some(filename) = field.file_name().map(str::to_owned) else {
                    continue;
                };
                let content = field.bytes().await?;
                file = Some((filename, content));
            }
            Some("manufacturer_list") => {
                let raw = field.text().await?;
                manufacturers = match Vocabulary::from_json(&raw) {
                    Ok(vocabulary) => Some(vocabulary),
                    Err(e) => {
                        warn!("Ignoring invalid manufacturer_list: {}", e);
                        None
                    }
                };
            }
            _ => {}
        }
    }

    let (filename, content) = file.ok_or(ApiError::NoFile)?;
    if filename.is_empty() {
        return Err(ApiError::NoFileSelected);
    }
    if !is_pdf(&filename) {
        return Err(ApiError::InvalidFileType);
    }
    if content.is_empty() {
        return Err(ApiError::EmptyFile);
    }

    Ok(Upload {
        filename,
        content,
        manufacturers,
    })
}

fn is_pdf(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Known names close to the extracted manufacturer, unless it is already one.
fn manufacturer_suggestions(vocabulary: &Vocabulary, extracted: &str) -> Option<Vec<Suggestion>> {
    if extracted.is_empty() || vocabulary.is_empty() {
        return None;
    }

    let suggestions = vocabulary.suggestions(extracted, MAX_SUGGESTIONS);
    match suggestions.first() {
        None => None,
        Some(best) if best.value == extracted => None,
        Some(_) => Some(suggestions),
    }
}
