//! 事件通知
//!
//! ```text
//! WorkflowOrchestrator ──(commit)──▶ EventNotifier::emit()
//!                                         │
//!                              EventBus: broadcast::Sender<DiningMessage>
//!                                         │
//!                     ┌───────────────────┼───────────────────┐
//!                     ▼                   ▼                   ▼
//!                  kitchen             waiters            front desk
//! ```

pub mod bus;

pub use bus::EventBus;
pub use shared::message::{DiningEvent, DiningMessage};

use async_trait::async_trait;

/// Receiver of lifecycle notifications
///
/// Called after the owning transaction commits; implementations must not
/// fail the caller.
#[async_trait]
pub trait EventNotifier: Send + Sync {
    async fn emit(&self, event: DiningEvent);
}
