//! API routes for the compliance assistant

pub mod answer;
pub mod ask;
pub mod documents;
pub mod faq;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use crate::server::state::AppState;

/// Document Q&A, FAQ session and local QA routes
pub fn assistant_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        // Document Q&A - with larger body limit for PDF uploads
        .route(
            "/ask",
            post(ask::ask_document).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        // FAQ sessions
        .route("/faq/start", post(faq::start_session))
        .route("/faq/ask", post(faq::ask_session))
        .route("/faq/end/:session_id", delete(faq::end_session))
        // Local extractive QA
        .route("/answer", post(answer::answer_inline))
}

/// Mock compliance document routes
pub fn document_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        .route("/generate-documents", get(documents::generate_documents))
        .route(
            "/generate-synthetic-data",
            get(documents::synthetic_by_query),
        )
        .route(
            "/generate-synthetic-data/:document_type",
            get(documents::synthetic_by_path),
        )
        .route("/validate-document", post(documents::validate_document))
        .route("/validate-compliance", post(documents::validate_compliance))
        .route(
            "/upload-document",
            post(documents::upload_document).layer(DefaultBodyLimit::max(max_upload_size)),
        )
}

/// Routes mounted under `/api`
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    document_routes(max_upload_size).route("/info", get(info))
}

/// API info endpoint
async fn info() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": "compliance-assistant",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Export compliance assistant: document Q&A, FAQ chat and mock trade documents",
        "endpoints": {
            "POST /ask": "Ask a question about an uploaded PDF (form: question, file)",
            "POST /faq/start": "Start an FAQ session (form: context, session_id)",
            "POST /faq/ask": "Ask within an FAQ session (form: question, session_id)",
            "DELETE /faq/end/:session_id": "End an FAQ session",
            "POST /answer": "Extractive QA over inline context (json: context, question)",
            "GET /api/generate-documents": "Sample compliance document descriptors",
            "GET /api/generate-synthetic-data/:document_type": "Synthetic content for a document type",
            "POST /api/validate-document": "Check a document type (json: document_type, content)",
            "POST /api/validate-compliance": "Check required fields (json: content)",
            "POST /api/upload-document": "Store an uploaded file",
            "GET /health": "Health check"
        },
        "document_types": documents::catalog_summary()
    }))
}
