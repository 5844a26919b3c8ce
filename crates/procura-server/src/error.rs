//! Error responses for the HTTP API.

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::debug;

/// A failed request, rendered as `{"success": false, "error": ...}`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("No file provided")]
    NoFile,

    #[error("No file selected")]
    NoFileSelected,

    #[error("Uploaded file is empty")]
    EmptyFile,

    #[error("Invalid file type. Only PDF files are allowed.")]
    InvalidFileType,

    #[error("File exceeds the maximum upload size")]
    TooLarge,

    #[error("Malformed multipart upload")]
    MalformedUpload,

    #[error("Could not extract text from PDF. The PDF may be image-based or corrupted.")]
    NoText,

    /// Worker panic or join failure. Details stay in the log.
    #[error("Error processing PDF")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::TooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        debug!("Multipart error: {}", err);
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::TooLarge
        } else {
            ApiError::MalformedUpload
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
        }));
        (self.status(), body).into_response()
    }
}
