//! Application state for the compliance assistant server

use std::sync::Arc;

use crate::config::AssistantConfig;
use crate::error::{Error, Result};
use crate::generation::{DocumentQa, FaqAssistant};
use crate::providers::{GeminiClient, LlmProvider, OnnxQaPipeline, QaPipeline};
use crate::storage::{InMemorySessionStore, SessionStore, UploadStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: AssistantConfig,
    /// One-shot document Q&A over the oracle
    document_qa: DocumentQa,
    /// FAQ session lifecycle over the oracle
    faq: FaqAssistant,
    /// Local extractive QA model; None when disabled or failed to load
    qa_pipeline: Option<Arc<dyn QaPipeline>>,
    /// Disk storage for uploaded documents
    uploads: UploadStore,
}

impl AppState {
    /// Create new application state
    pub async fn new(config: AssistantConfig) -> Result<Self> {
        tracing::info!("Initializing compliance assistant state...");

        let llm: Arc<dyn LlmProvider> = Arc::new(GeminiClient::new(&config.gemini)?);
        tracing::info!("Gemini client initialized (model: {})", config.gemini.model);

        if !config.gemini.api_key.is_empty() {
            match llm.health_check().await {
                Ok(true) => tracing::info!("Gemini model {} is reachable", llm.model()),
                _ => tracing::warn!(
                    "Gemini model {} is not reachable at {}",
                    llm.model(),
                    config.gemini.base_url
                ),
            }
        }

        let qa_pipeline = Self::load_qa_pipeline(&config).await;

        let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
        tracing::info!("Session store initialized");

        Ok(Self::from_parts(config, llm, qa_pipeline, sessions))
    }

    /// Assemble state from already-built collaborators
    pub fn from_parts(
        config: AssistantConfig,
        llm: Arc<dyn LlmProvider>,
        qa_pipeline: Option<Arc<dyn QaPipeline>>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        let uploads = UploadStore::new(config.storage.upload_dir.clone());

        Self {
            inner: Arc::new(AppStateInner {
                document_qa: DocumentQa::new(Arc::clone(&llm)),
                faq: FaqAssistant::new(sessions, llm),
                qa_pipeline,
                uploads,
                config,
            }),
        }
    }

    async fn load_qa_pipeline(config: &AssistantConfig) -> Option<Arc<dyn QaPipeline>> {
        if !config.qa_model.enabled {
            tracing::info!("Local QA model disabled");
            return None;
        }

        let qa_config = config.qa_model.clone();
        let loaded = tokio::task::spawn_blocking(move || OnnxQaPipeline::load(&qa_config))
            .await
            .map_err(|e| Error::internal(format!("QA model loader panicked: {}", e)))
            .and_then(|result| result);

        match loaded {
            Ok(pipeline) => {
                tracing::info!("QA model loaded (device: {})", pipeline.device());
                Some(Arc::new(pipeline))
            }
            Err(e) => {
                tracing::warn!("QA model unavailable, /answer will fail: {}", e);
                None
            }
        }
    }

    /// Get configuration
    pub fn config(&self) -> &AssistantConfig {
        &self.inner.config
    }

    pub fn document_qa(&self) -> &DocumentQa {
        &self.inner.document_qa
    }

    pub fn faq(&self) -> &FaqAssistant {
        &self.inner.faq
    }

    /// Get the QA pipeline, or `ModelUnavailable` if it never loaded
    pub fn qa_pipeline(&self) -> Result<Arc<dyn QaPipeline>> {
        self.inner
            .qa_pipeline
            .clone()
            .ok_or(Error::ModelUnavailable)
    }

    pub fn uploads(&self) -> &UploadStore {
        &self.inner.uploads
    }
}
