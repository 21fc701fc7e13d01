//! Audit Log Repository (append-only)

use super::{RepoError, RepoResult};
use serde::{Deserialize, Serialize};
use sqlx::SqliteConnection;

/// Persisted audit row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct AuditLogRow {
    pub id: i64,
    pub entity_type: String,
    pub entity_id: i64,
    pub action: String,
    pub actor_id: Option<i64>,
    pub old_status: Option<String>,
    pub new_status: Option<String>,
    /// JSON object
    pub metadata: String,
    pub created_at: i64,
}

/// Row to append, id assigned by the store
#[derive(Debug, Clone)]
pub struct NewAuditLog<'a> {
    pub entity_type: &'a str,
    pub entity_id: i64,
    pub action: &'a str,
    pub actor_id: Option<i64>,
    pub old_status: Option<&'a str>,
    pub new_status: Option<&'a str>,
    pub metadata: &'a serde_json::Value,
    pub created_at: i64,
}

pub async fn append(conn: &mut SqliteConnection, entry: NewAuditLog<'_>) -> RepoResult<i64> {
    let metadata = serde_json::to_string(entry.metadata)
        .map_err(|e| RepoError::Validation(format!("Audit metadata is not serializable: {e}")))?;
    let result = sqlx::query(
        "INSERT INTO audit_log (entity_type, entity_id, action, actor_id, old_status, new_status, metadata, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )
    .bind(entry.entity_type)
    .bind(entry.entity_id)
    .bind(entry.action)
    .bind(entry.actor_id)
    .bind(entry.old_status)
    .bind(entry.new_status)
    .bind(metadata)
    .bind(entry.created_at)
    .execute(&mut *conn)
    .await?;
    Ok(result.last_insert_rowid())
}

/// History of one entity, oldest first
pub async fn find_by_entity(
    conn: &mut SqliteConnection,
    entity_type: &str,
    entity_id: i64,
) -> RepoResult<Vec<AuditLogRow>> {
    let rows = sqlx::query_as::<_, AuditLogRow>(
        "SELECT id, entity_type, entity_id, action, actor_id, old_status, new_status, metadata, created_at FROM audit_log WHERE entity_type = ?1 AND entity_id = ?2 ORDER BY id",
    )
    .bind(entity_type)
    .bind(entity_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows)
}
