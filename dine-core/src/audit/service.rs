//! 审计日志服务
//!
//! `AuditService` 通过 mpsc 通道把条目交给 [`AuditWorker`](super::AuditWorker)。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::AuditLog;
use super::types::AuditEntry;

/// 审计日志服务
pub struct AuditService {
    tx: mpsc::Sender<AuditEntry>,
}

impl std::fmt::Debug for AuditService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditService")
            .field("capacity", &self.tx.capacity())
            .finish_non_exhaustive()
    }
}

impl AuditService {
    /// 创建审计服务，返回服务与待交给 worker 的接收端
    pub fn new(buffer_size: usize) -> (Arc<Self>, mpsc::Receiver<AuditEntry>) {
        let (tx, rx) = mpsc::channel(buffer_size.max(1));
        (Arc::new(Self { tx }), rx)
    }
}

#[async_trait]
impl AuditLog for AuditService {
    async fn record(&self, entry: AuditEntry) {
        if let Err(e) = self.tx.try_send(entry) {
            let (reason, entry) = match e {
                mpsc::error::TrySendError::Full(entry) => ("queue full", entry),
                mpsc::error::TrySendError::Closed(entry) => ("worker stopped", entry),
            };
            tracing::error!(
                action = %entry.action,
                entity = entry.entity_type.as_str(),
                entity_id = entry.entity_id,
                "Audit entry dropped: {}",
                reason
            );
        }
    }
}
