//! Chat session management.
//!
//! A `SessionManager` lazily owns the single `ChatSession` of the process.
//! The session replays its accumulated turn history on every request so
//! the model keeps conversational context.

mod chat;
mod manager;
mod types;


pub use chat::ChatSession;
pub use manager::SessionManager;
pub use types::{SessionError, SessionSettings, CONNECTION_ERROR_MESSAGE};
