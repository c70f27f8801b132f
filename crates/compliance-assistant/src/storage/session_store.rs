//! In-memory FAQ session storage
//!
//! Sessions live only in process memory: no persistence, no expiry, no
//! capacity bound. Each entry sits behind its own async mutex so turns on one
//! session are applied in order.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::providers::llm::ChatTurn;

/// Conversational state for one FAQ session
#[derive(Debug, Clone)]
pub struct FaqSession {
    /// FAQ context supplied at start
    pub context: String,
    /// Prior exchanges, oldest first
    pub history: Vec<ChatTurn>,
    /// When the session was started
    pub created_at: DateTime<Utc>,
}

impl FaqSession {
    /// Create a session with empty history
    pub fn new(context: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            history: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Number of completed question/answer exchanges
    pub fn exchanges(&self) -> usize {
        self.history.len() / 2
    }
}

/// Handle to a live session
pub type SharedSession = Arc<Mutex<FaqSession>>;

/// Capability interface over the session mapping
pub trait SessionStore: Send + Sync {
    /// Insert a session, replacing any live session under the same id
    fn put(&self, id: &str, session: FaqSession);

    /// Look up a live session
    fn get(&self, id: &str) -> Option<SharedSession>;

    /// Remove a session; false if it was not live
    fn delete(&self, id: &str) -> bool;

    /// Number of live sessions
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// DashMap-backed session store
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<String, SharedSession>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn put(&self, id: &str, session: FaqSession) {
        if self
            .sessions
            .insert(id.to_string(), Arc::new(Mutex::new(session)))
            .is_some()
        {
            tracing::debug!("Session '{}' overwritten", id);
        }
    }

    fn get(&self, id: &str) -> Option<SharedSession> {
        self.sessions.get(id).map(|entry| Arc::clone(entry.value()))
    }

    fn delete(&self, id: &str) -> bool {
        self.sessions.remove(id).is_some()
    }

    fn len(&self) -> usize {
        self.sessions.len()
    }
}
