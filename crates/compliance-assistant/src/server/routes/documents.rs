//! Mock compliance document endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::Value;

use crate::compliance::{self, synthetic, FieldCheck, SyntheticDocument};
use crate::error::{Error, Result};
use crate::server::{form::FormFields, state::AppState};
use crate::types::{
    GenerateDocumentsResponse, MessageResponse, SyntheticQuery, UploadResponse,
    ValidateComplianceRequest, ValidateDocumentRequest,
};

/// GET /generate-documents - Sample 3 to 5 catalog entries
pub async fn generate_documents() -> Json<GenerateDocumentsResponse> {
    let compliance_documents = compliance::sample_documents(&mut rand::thread_rng());
    Json(GenerateDocumentsResponse {
        compliance_documents,
    })
}

/// GET /generate-synthetic-data/:document_type
pub async fn synthetic_by_path(Path(document_type): Path<String>) -> Json<SyntheticDocument> {
    Json(synthesize(&document_type))
}

/// GET /generate-synthetic-data?document_type=...
pub async fn synthetic_by_query(Query(query): Query<SyntheticQuery>) -> Result<Json<SyntheticDocument>> {
    let document_type = query
        .document_type
        .ok_or_else(|| Error::MissingField("document_type".to_string()))?;
    Ok(Json(synthesize(&document_type)))
}

fn synthesize(document_type: &str) -> SyntheticDocument {
    let document = synthetic::generate(document_type, &mut rand::thread_rng());
    if document.is_unknown() {
        tracing::debug!("No synthetic template for '{}'", document_type);
    }
    document
}

/// POST /validate-document - Check the document type against the allow-list
pub async fn validate_document(
    Json(request): Json<ValidateDocumentRequest>,
) -> Result<Json<MessageResponse>> {
    let message = compliance::validate_document(&request.document_type, &request.content)?;
    Ok(Json(MessageResponse::new(message)))
}

/// POST /validate-compliance - Check required fields in a JSON document
pub async fn validate_compliance(
    Json(request): Json<ValidateComplianceRequest>,
) -> Result<Json<FieldCheck>> {
    Ok(Json(compliance::check_required_fields(&request.content)?))
}

/// POST /upload-document - Store the uploaded file under its client name
pub async fn upload_document(
    State(state): State<AppState>,
    form: FormFields,
) -> Result<Json<UploadResponse>> {
    let file = form.file("file")?;
    let filename = file.filename.clone().unwrap_or_default();

    let location = state.uploads().save(&filename, &file.data).await?;

    Ok(Json(UploadResponse {
        filename,
        location: location.display().to_string(),
    }))
}

/// Catalog listing for the info endpoint
pub fn catalog_summary() -> Value {
    serde_json::to_value(compliance::catalog()).unwrap_or(Value::Null)
}
