//! Error types for the compliance assistant

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use regex::Regex;
use serde_json::json;
use std::sync::OnceLock;
use thiserror::Error;

/// Result type alias for assistant operations
pub type Result<T> = std::result::Result<T, Error>;

/// Compliance assistant errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Uploaded file has the wrong content type
    #[error("Invalid file type. Only PDF files are allowed (got {0}).")]
    InvalidContentType(String),

    /// Text extraction failed
    #[error("Error extracting text from '{filename}': {message}")]
    FileParse { filename: String, message: String },

    /// Document type outside the allow-list
    #[error("Invalid document type.")]
    InvalidDocumentType(String),

    /// Upload filename that cannot be stored
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    /// Request body is not the JSON shape expected
    #[error("Invalid JSON content: {0}")]
    InvalidJson(String),

    /// Required form field absent
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Body could not be read as a form
    #[error("Invalid form data: {0}")]
    InvalidForm(String),

    /// No live session under this identifier
    #[error("Session not found")]
    SessionNotFound(String),

    /// Oracle rejected the call for rate or quota reasons
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// Any other oracle failure
    #[error("LLM error: {0}")]
    Llm(String),

    /// Local QA inference failure
    #[error("Inference error: {0}")]
    Inference(String),

    /// Local QA model was not loaded at startup
    #[error("QA model is not loaded")]
    ModelUnavailable,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a file parse error
    pub fn file_parse(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FileParse {
            filename: filename.into(),
            message: message.into(),
        }
    }

    /// Create an LLM error, promoting it to `RateLimited` when the text looks like one
    pub fn llm(message: impl Into<String>) -> Self {
        let message = message.into();
        if looks_rate_limited(&message) {
            Self::RateLimited(message)
        } else {
            Self::Llm(message)
        }
    }

    /// Create an inference error
    pub fn inference(message: impl Into<String>) -> Self {
        Self::Inference(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// HTTP status and machine-readable type for this error
    pub fn status(&self) -> (StatusCode, &'static str) {
        match self {
            Error::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
            Error::InvalidContentType(_) => (StatusCode::BAD_REQUEST, "invalid_content_type"),
            Error::FileParse { .. } => (StatusCode::BAD_REQUEST, "parse_error"),
            Error::InvalidDocumentType(_) => (StatusCode::BAD_REQUEST, "invalid_document_type"),
            Error::InvalidFilename(_) => (StatusCode::BAD_REQUEST, "invalid_filename"),
            Error::InvalidJson(_) => (StatusCode::BAD_REQUEST, "invalid_json"),
            Error::MissingField(_) => (StatusCode::UNPROCESSABLE_ENTITY, "missing_field"),
            Error::InvalidForm(_) => (StatusCode::UNPROCESSABLE_ENTITY, "invalid_form"),
            Error::SessionNotFound(_) => (StatusCode::NOT_FOUND, "session_not_found"),
            Error::RateLimited(_) => (StatusCode::TOO_MANY_REQUESTS, "rate_limited"),
            Error::Llm(_) => (StatusCode::INTERNAL_SERVER_ERROR, "llm_error"),
            Error::Inference(_) => (StatusCode::INTERNAL_SERVER_ERROR, "inference_error"),
            Error::ModelUnavailable => (StatusCode::INTERNAL_SERVER_ERROR, "model_unavailable"),
            Error::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "io_error"),
            Error::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }
}

/// Heuristic rate-limit detection on free-form oracle error text.
///
/// Used only when the oracle response carries no structured status. Matches
/// `429`, `rate limit`, `resource exhausted` (with `_`, `-` or space) and
/// `quota`, case-insensitively.
pub fn looks_rate_limited(message: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(r"(?i)\b429\b|rate[ _-]?limit|resource[ _-]?exhausted|quota")
                .expect("rate-limit pattern is valid")
        })
        .is_match(message)
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!("{} ({})", message, error_type);
        } else {
            tracing::debug!("Client error {}: {}", status, message);
        }

        let body = Json(json!({
            "detail": message,
            "error": error_type,
        }));

        (status, body).into_response()
    }
}
