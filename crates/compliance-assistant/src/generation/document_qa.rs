//! One-shot question answering over an extracted document

use std::sync::Arc;

use super::prompt::PromptBuilder;
use crate::error::Result;
use crate::providers::llm::{GenerationRequest, LlmProvider};

/// Confidence reported alongside oracle answers. The oracle returns no score.
pub const PLACEHOLDER_SCORE: f32 = 0.95;

/// Answer to a document question
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentAnswer {
    pub answer: String,
    pub score: f32,
}

/// Answers questions about uploaded documents through the generative oracle
#[derive(Clone)]
pub struct DocumentQa {
    llm: Arc<dyn LlmProvider>,
}

impl DocumentQa {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// Ask `question` with the whole document text as context
    pub async fn answer(&self, question: &str, document_text: &str) -> Result<DocumentAnswer> {
        tracing::debug!(
            "Document question against {} chars via {}/{}",
            document_text.len(),
            self.llm.name(),
            self.llm.model()
        );

        let prompt = PromptBuilder::build_document_prompt(question, document_text);
        let answer = self.llm.generate(GenerationRequest::prompt(prompt)).await?;

        Ok(DocumentAnswer {
            answer,
            score: PLACEHOLDER_SCORE,
        })
    }
}
