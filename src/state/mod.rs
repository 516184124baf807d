//! State management module
//!
//! This module holds the per-conversant sessions and the booking state
//! machine that drives them.

pub mod context;
pub mod engine;
pub mod session;
pub mod storage;

// Re-export commonly used state components
pub use context::AppContext;
pub use engine::{BookingEngine, Transition};
pub use session::{ConversationState, Session, SessionState};
pub use storage::{SessionStore, SessionStoreManager, StorageStats};
