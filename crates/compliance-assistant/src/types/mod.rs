//! Request and response types for the HTTP API

pub mod request;
pub mod response;

pub use request::{AnswerRequest, SyntheticQuery, ValidateComplianceRequest, ValidateDocumentRequest};
pub use response::{
    AnswerResponse, FaqAskResponse, FaqStartResponse, GenerateDocumentsResponse, HealthResponse,
    MessageResponse, UploadResponse,
};
