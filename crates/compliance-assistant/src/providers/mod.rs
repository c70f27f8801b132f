//! Provider abstractions for the generative oracle and the local QA model
//!
//! Handlers depend only on the `LlmProvider` and `QaPipeline` traits so tests
//! can swap in mocks for the Gemini and ONNX backends.

pub mod gemini;
pub mod llm;
pub mod onnx_qa;
pub mod qa;

pub use gemini::GeminiClient;
pub use llm::{ChatRole, ChatTurn, GenerationRequest, LlmProvider};
pub use onnx_qa::OnnxQaPipeline;
pub use qa::{QaAnswer, QaPipeline};
