//! Document validation
//!
//! `validate_document` checks only that the type is in the allow-list; the
//! content is never inspected. `check_required_fields` is the field-presence
//! check over a JSON document.

use serde::Serialize;
use serde_json::Value;

use super::catalog::DocumentType;
use crate::error::{Error, Result};

/// Keys a complete compliance bundle must contain
pub const REQUIRED_FIELDS: [&str; 4] = ["IEC", "AD Code", "Shipping Bill", "Commercial Invoice"];

/// Accept any content for an allow-listed type; returns the success message
pub fn validate_document(document_type: &str, _content: &str) -> Result<String> {
    let doc_type: DocumentType = document_type.parse()?;
    Ok(format!("The {} is valid.", doc_type))
}

/// Outcome of the field-presence check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FieldCheck {
    Success { message: String },
    Fail { missing_fields: Vec<String> },
}

/// Check that `content` is a JSON object holding every required key
pub fn check_required_fields(content: &str) -> Result<FieldCheck> {
    let document: Value =
        serde_json::from_str(content).map_err(|e| Error::InvalidJson(e.to_string()))?;
    let Value::Object(fields) = document else {
        return Err(Error::InvalidJson("content must be a JSON object".to_string()));
    };

    let missing_fields: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|field| !fields.contains_key(**field))
        .map(|field| field.to_string())
        .collect();

    if missing_fields.is_empty() {
        Ok(FieldCheck::Success {
            message: "All required fields are present".to_string(),
        })
    } else {
        Ok(FieldCheck::Fail { missing_fields })
    }
}
