//! Session-based FAQ assistant
//!
//! Lifecycle per session id: start creates (or silently replaces) a session
//! with empty history, ask appends one question/answer exchange, end removes
//! it. Asking or ending an unknown id is `SessionNotFound`.

use std::sync::Arc;

use super::prompt::PromptBuilder;
use crate::error::{Error, Result};
use crate::providers::llm::{ChatTurn, GenerationRequest, LlmProvider};
use crate::storage::{FaqSession, SessionStore};

/// FAQ session operations over an injected store and oracle
#[derive(Clone)]
pub struct FaqAssistant {
    sessions: Arc<dyn SessionStore>,
    llm: Arc<dyn LlmProvider>,
}

impl FaqAssistant {
    pub fn new(sessions: Arc<dyn SessionStore>, llm: Arc<dyn LlmProvider>) -> Self {
        Self { sessions, llm }
    }

    /// Session store backing this assistant
    pub fn sessions(&self) -> &Arc<dyn SessionStore> {
        &self.sessions
    }

    /// Start a session, overwriting any live session with the same id
    pub fn start(&self, session_id: &str, context: &str) {
        self.sessions.put(session_id, FaqSession::new(context));
        tracing::info!(
            "FAQ session '{}' started ({} live)",
            session_id,
            self.sessions.len()
        );
    }

    /// Ask a question within a live session
    pub async fn ask(&self, session_id: &str, question: &str) -> Result<String> {
        let shared = self
            .sessions
            .get(session_id)
            .ok_or_else(|| Error::SessionNotFound(session_id.to_string()))?;

        // Held across the oracle call so exchanges on one session stay ordered.
        let mut session = shared.lock().await;

        let mut turns = session.history.clone();
        turns.push(ChatTurn::user(question));
        let request = GenerationRequest {
            system_instruction: Some(PromptBuilder::build_faq_instruction(&session.context)),
            turns,
        };

        let answer = self.llm.generate(request).await?;

        session.history.push(ChatTurn::user(question));
        session.history.push(ChatTurn::model(answer.clone()));
        tracing::debug!(
            "FAQ session '{}' now has {} exchanges",
            session_id,
            session.exchanges()
        );

        Ok(answer)
    }

    /// End a live session
    pub fn end(&self, session_id: &str) -> Result<()> {
        if self.sessions.delete(session_id) {
            tracing::info!("FAQ session '{}' ended", session_id);
            Ok(())
        } else {
            Err(Error::SessionNotFound(session_id.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::llm::{ChatRole, MockLlmProvider};
    use crate::storage::InMemorySessionStore;

    fn assistant(llm: MockLlmProvider) -> FaqAssistant {
        FaqAssistant::new(Arc::new(InMemorySessionStore::new()), Arc::new(llm))
    }

    #[tokio::test]
    async fn test_start_then_ask_appends_history() {
        let mut llm = MockLlmProvider::new();
        llm.expect_generate()
            .withf(|req| {
                req.turns.len() == 1
                    && req.turns[0].text == "What is IEC?"
                    && req
                        .system_instruction
                        .as_deref()
                        .is_some_and(|s| s.contains("IEC is a 10-digit code"))
            })
            .times(1)
            .returning(|_| Ok("A 10-digit importer-exporter code.".to_string()));
        llm.expect_generate()
            .withf(|req| req.turns.len() == 3 && req.turns[1].role == ChatRole::Model)
            .times(1)
            .returning(|_| Ok("DGFT issues it.".to_string()));

        let faq = assistant(llm);
        faq.start("s1", "IEC is a 10-digit code issued by DGFT.");

        assert_eq!(
            faq.ask("s1", "What is IEC?").await.unwrap(),
            "A 10-digit importer-exporter code."
        );
        assert_eq!(faq.ask("s1", "Who issues it?").await.unwrap(), "DGFT issues it.");

        let session = faq.sessions().get("s1").unwrap();
        let session = session.lock().await;
        assert_eq!(session.exchanges(), 2);
        assert_eq!(session.history[2], ChatTurn::user("Who issues it?"));
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let mut llm = MockLlmProvider::new();
        llm.expect_generate().never();

        let faq = assistant(llm);
        faq.start("live", "context");

        assert!(matches!(
            faq.ask("ghost", "hello?").await,
            Err(Error::SessionNotFound(id)) if id == "ghost"
        ));
        assert!(matches!(faq.end("ghost"), Err(Error::SessionNotFound(_))));
        assert_eq!(faq.sessions().len(), 1);
    }

    #[tokio::test]
    async fn test_end_then_ask_fails() {
        let mut llm = MockLlmProvider::new();
        llm.expect_generate().never();

        let faq = assistant(llm);
        faq.start("s1", "context");
        faq.end("s1").unwrap();

        assert!(matches!(faq.ask("s1", "still there?").await, Err(Error::SessionNotFound(_))));
        assert!(matches!(faq.end("s1"), Err(Error::SessionNotFound(_))));
    }

    #[tokio::test]
    async fn test_failed_ask_leaves_history_untouched() {
        let mut llm = MockLlmProvider::new();
        llm.expect_generate()
            .returning(|_| Err(Error::RateLimited("429".to_string())));

        let faq = assistant(llm);
        faq.start("s1", "context");

        assert!(matches!(faq.ask("s1", "q").await, Err(Error::RateLimited(_))));
        let session = faq.sessions().get("s1").unwrap();
        assert!(session.lock().await.history.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_asks_serialize() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        const ASKS: usize = 16;

        let last_len = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&last_len);
        let mut llm = MockLlmProvider::new();
        llm.expect_generate()
            .times(ASKS)
            .returning(move |req| {
                let len = req.turns.len();
                assert_eq!(len % 2, 1, "history plus question must be odd");
                let previous = seen.swap(len, Ordering::SeqCst);
                assert!(len > previous, "turns went from {} to {}", previous, len);
                Ok(format!("answer {}", len))
            });

        let faq = assistant(llm);
        faq.start("shared", "context");

        let handles: Vec<_> = (0..ASKS)
            .map(|i| {
                let faq = faq.clone();
                tokio::spawn(async move { faq.ask("shared", &format!("question {}", i)).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let session = faq.sessions().get("shared").unwrap();
        let session = session.lock().await;
        assert_eq!(session.exchanges(), ASKS);
        assert_eq!(last_len.load(Ordering::SeqCst), 2 * ASKS - 1);

        for (exchange, pair) in session.history.chunks(2).enumerate() {
            assert_eq!(pair[0].role, ChatRole::User);
            assert_eq!(pair[1].role, ChatRole::Model);
            assert_eq!(pair[1].text, format!("answer {}", 2 * exchange + 1));
        }
    }

    #[tokio::test]
    async fn test_restart_resets_history() {
        let mut llm = MockLlmProvider::new();
        llm.expect_generate()
            .returning(|_| Ok("answer".to_string()));

        let faq = assistant(llm);
        faq.start("s1", "first");
        faq.ask("s1", "q").await.unwrap();
        faq.start("s1", "second");

        let session = faq.sessions().get("s1").unwrap();
        let session = session.lock().await;
        assert_eq!(session.context, "second");
        assert_eq!(session.exchanges(), 0);
    }
}
