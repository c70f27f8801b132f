//! Storage for FAQ sessions and uploaded files

mod session_store;
mod upload_store;

pub use session_store::{FaqSession, InMemorySessionStore, SessionStore, SharedSession};
pub use upload_store::UploadStore;
