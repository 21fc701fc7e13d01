//! 审计日志后台 Worker
//!
//! 从 mpsc 通道消费 AuditEntry，写入 SQLite。
//! 通道关闭时自动退出。

use tokio::sync::mpsc;

use super::types::AuditEntry;
use crate::db::DbService;
use crate::db::repository::{RepoResult, audit_log};

/// 审计日志后台 Worker
pub struct AuditWorker {
    db: DbService,
}

impl AuditWorker {
    pub fn new(db: DbService) -> Self {
        Self { db }
    }

    /// 运行 worker（阻塞直到通道关闭）
    pub async fn run(self, mut rx: mpsc::Receiver<AuditEntry>) {
        tracing::info!("📋 Audit log worker started");

        while let Some(entry) = rx.recv().await {
            match self.persist(&entry).await {
                Ok(id) => {
                    tracing::debug!(
                        audit_id = id,
                        action = %entry.action,
                        entity = entry.entity_type.as_str(),
                        "Audit entry recorded"
                    );
                }
                Err(e) => {
                    tracing::error!("Failed to write audit entry: {:?}", e);
                }
            }
        }

        tracing::info!("Audit log channel closed, worker stopping");
    }

    async fn persist(&self, entry: &AuditEntry) -> RepoResult<i64> {
        let _gate = self.db.write_gate().await;
        let mut conn = self.db.pool.acquire().await?;
        audit_log::append(
            &mut conn,
            audit_log::NewAuditLog {
                entity_type: entry.entity_type.as_str(),
                entity_id: entry.entity_id,
                action: entry.action.as_str(),
                actor_id: entry.actor_id,
                old_status: entry.old_status.as_deref(),
                new_status: entry.new_status.as_deref(),
                metadata: &entry.metadata,
                created_at: entry.timestamp,
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::types::{AuditAction, AuditEntityType};
    use crate::audit::{AuditLog, AuditService};
    use shared::models::ReservationStatus;

    #[tokio::test]
    async fn test_worker_persists_until_channel_closes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.db");
        let db = DbService::new(path.to_str().unwrap()).await.unwrap();

        let (service, rx) = AuditService::new(8);
        let worker = tokio::spawn(AuditWorker::new(db.clone()).run(rx));

        service
            .record(
                AuditEntry::new(AuditEntityType::Reservation, 42, AuditAction::ReservationConfirmed, 1_000)
                    .actor(Some(7))
                    .transition(ReservationStatus::Pending, ReservationStatus::Confirmed)
                    .metadata(serde_json::json!({ "code": "RSVABC1234" })),
            )
            .await;
        drop(service);
        worker.await.unwrap();

        let mut conn = db.pool.acquire().await.unwrap();
        let rows = audit_log::find_by_entity(&mut conn, "reservation", 42).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].action, "reservation_confirmed");
        assert_eq!(rows[0].actor_id, Some(7));
        assert_eq!(rows[0].old_status.as_deref(), Some("pending"));
        assert_eq!(rows[0].new_status.as_deref(), Some("confirmed"));
        assert!(rows[0].metadata.contains("RSVABC1234"));
    }
}
