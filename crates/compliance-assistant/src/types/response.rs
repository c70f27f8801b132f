//! Response bodies

use serde::Serialize;

use crate::compliance::DocumentDescriptor;
use crate::generation::DocumentAnswer;
use crate::providers::QaAnswer;

/// Answer with a confidence value
///
/// For `/ask` the score is a fixed placeholder; for `/answer` it is the
/// span probability from the QA model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerResponse {
    pub answer: String,
    pub score: f32,
}

impl From<DocumentAnswer> for AnswerResponse {
    fn from(answer: DocumentAnswer) -> Self {
        Self {
            answer: answer.answer,
            score: answer.score,
        }
    }
}

impl From<QaAnswer> for AnswerResponse {
    fn from(answer: QaAnswer) -> Self {
        Self {
            answer: answer.answer,
            score: answer.score,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FaqStartResponse {
    pub message: String,
    pub session_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FaqAskResponse {
    pub answer: String,
    pub session_id: String,
}

/// Plain acknowledgement
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Randomly sampled catalog entries
#[derive(Debug, Clone, Serialize)]
pub struct GenerateDocumentsResponse {
    pub compliance_documents: Vec<DocumentDescriptor>,
}

/// Where an upload was stored
#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub filename: String,
    pub location: String,
}
