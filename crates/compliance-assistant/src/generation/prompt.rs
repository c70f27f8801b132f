//! Prompt templates for the compliance assistant

/// Prompt builder for document Q&A and FAQ sessions
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build the one-shot prompt embedding the full extracted document text
    pub fn build_document_prompt(question: &str, document_text: &str) -> String {
        format!(
            r#"You are an export compliance assistant. Answer the question using the document below as context.
If the document does not contain the answer, say so plainly.

DOCUMENT:
{context}

QUESTION: {question}

ANSWER:"#,
            context = document_text.trim(),
            question = question.trim()
        )
    }

    /// Build the system instruction that anchors an FAQ session to its context
    pub fn build_faq_instruction(context: &str) -> String {
        format!(
            r#"You are a friendly FAQ assistant for an export compliance platform.
Answer the user's questions using the FAQ context below and the conversation so far.
Keep answers short and practical. If a question is outside the FAQ context, answer briefly from general export compliance knowledge and say that the FAQ does not cover it.

FAQ CONTEXT:
{context}"#,
            context = context.trim()
        )
    }
}
