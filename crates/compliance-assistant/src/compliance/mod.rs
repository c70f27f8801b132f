//! Mock compliance document service: catalog sampling, synthetic content and validation

pub mod catalog;
pub mod synthetic;
pub mod validation;

pub use catalog::{catalog, sample_documents, DocumentDescriptor, DocumentType};
pub use synthetic::{SyntheticDocument, UNKNOWN_CONTENT};
pub use validation::{check_required_fields, validate_document, FieldCheck, REQUIRED_FIELDS};
