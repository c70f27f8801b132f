//! LLM provider trait for generating answers

use async_trait::async_trait;

use crate::error::Result;

/// Speaker of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Model,
}

/// One message in a conversation with the oracle
#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            text: text.into(),
        }
    }
}

/// A single generation call: optional system instruction plus ordered turns.
/// The last turn is the one being answered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationRequest {
    pub system_instruction: Option<String>,
    pub turns: Vec<ChatTurn>,
}

impl GenerationRequest {
    /// One-shot prompt with no history
    pub fn prompt(text: impl Into<String>) -> Self {
        Self {
            system_instruction: None,
            turns: vec![ChatTurn::user(text)],
        }
    }
}

/// Trait for the generative-AI oracle
///
/// Implementations:
/// - `GeminiClient`: Google Generative Language REST API
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate the next model turn
    async fn generate(&self, request: GenerationRequest) -> Result<String>;

    /// Check if the provider is reachable and the key is accepted
    async fn health_check(&self) -> Result<bool>;

    /// Get provider name for logging
    fn name(&self) -> &str;

    /// Get the model being used
    fn model(&self) -> &str;
}
