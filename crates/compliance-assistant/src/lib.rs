//! compliance-assistant: backend for an export compliance assistant
//!
//! Answers questions about uploaded PDFs through a generative-AI oracle, runs
//! session-based FAQ chats, serves a local extractive QA model, and produces
//! mock trade-compliance documents for demos.

pub mod compliance;
pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod server;
pub mod storage;
pub mod types;

pub use config::AssistantConfig;
pub use error::{Error, Result};
pub use generation::{DocumentQa, FaqAssistant};
pub use providers::{LlmProvider, QaPipeline};
pub use server::ComplianceServer;
pub use storage::{InMemorySessionStore, SessionStore};
