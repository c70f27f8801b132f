//! Request bodies for the JSON endpoints

use serde::Deserialize;

/// Body of `POST /answer`
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerRequest {
    pub context: String,
    pub question: String,
}

/// Body of `POST /validate-document`
#[derive(Debug, Clone, Deserialize)]
pub struct ValidateDocumentRequest {
    pub document_type: String,
    #[serde(default)]
    pub content: String,
}

/// Body of `POST /validate-compliance`
///
/// `content` is the JSON text of the document to check.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidateComplianceRequest {
    pub content: String,
}

/// Query string accepted by `GET /generate-synthetic-data`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SyntheticQuery {
    pub document_type: Option<String>,
}
