//! Answer generation through the generative oracle

pub mod document_qa;
pub mod faq;
pub mod prompt;

pub use document_qa::{DocumentAnswer, DocumentQa, PLACEHOLDER_SCORE};
pub use faq::FaqAssistant;
pub use prompt::PromptBuilder;
