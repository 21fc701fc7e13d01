//! Shared types for the dining orchestration core
//!
//! Domain models, status enums, the unified error system and the event
//! payloads published after every committed transition.

pub mod error;
pub mod message;
pub mod models;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCategory, ErrorCode, ErrorKind};
pub use message::{DiningEvent, DiningMessage};
