//! 审计日志模块
//!
//! # 架构
//!
//! ```text
//! 事务提交后
//!   └─ AuditLog::record() → AuditService → mpsc → AuditWorker → SQLite (audit_log 表)
//! ```
//!
//! Recording never blocks a business operation: a full or closed queue is
//! logged and the entry dropped.

pub mod service;
pub mod types;
pub mod worker;

pub use service::AuditService;
pub use types::{AuditAction, AuditEntry, AuditEntityType};
pub use worker::AuditWorker;

use async_trait::async_trait;

/// Sink for committed transitions
#[async_trait]
pub trait AuditLog: Send + Sync {
    async fn record(&self, entry: AuditEntry);
}
