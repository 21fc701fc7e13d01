//! Dining Table Repository

use super::{RepoError, RepoResult};
use shared::models::{DiningTable, DiningTableCreate, TableStatus};
use sqlx::SqliteConnection;

const TABLE_SELECT: &str = "SELECT id, name, capacity, min_capacity, floor, section, is_active, status, updated_at FROM dining_table";

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<DiningTable>> {
    let sql = format!("{TABLE_SELECT} WHERE id = ?");
    let table = sqlx::query_as::<_, DiningTable>(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(table)
}

/// Every table, active or not, ordered by id
pub async fn find_all(conn: &mut SqliteConnection) -> RepoResult<Vec<DiningTable>> {
    let sql = format!("{TABLE_SELECT} ORDER BY id");
    let tables = sqlx::query_as::<_, DiningTable>(&sql)
        .fetch_all(&mut *conn)
        .await?;
    Ok(tables)
}

pub async fn create(conn: &mut SqliteConnection, data: DiningTableCreate) -> RepoResult<DiningTable> {
    if data.capacity <= 0 {
        return Err(RepoError::Validation(format!(
            "Table capacity must be positive, got {}",
            data.capacity
        )));
    }
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO dining_table (id, name, capacity, min_capacity, floor, section, is_active, status, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1, 'available', ?7)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(data.capacity)
    .bind(data.min_capacity)
    .bind(data.floor.unwrap_or(1))
    .bind(&data.section)
    .bind(now)
    .execute(&mut *conn)
    .await?;
    find_by_id(conn, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create dining table".into()))
}

/// Flip occupancy
pub async fn set_status(
    conn: &mut SqliteConnection,
    id: i64,
    status: TableStatus,
    now: i64,
) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE dining_table SET status = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(status)
        .bind(now)
        .bind(id)
        .execute(&mut *conn)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Dining table {id} not found")));
    }
    Ok(())
}

pub async fn set_active(conn: &mut SqliteConnection, id: i64, is_active: bool) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE dining_table SET is_active = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(is_active)
        .bind(shared::util::now_millis())
        .bind(id)
        .execute(&mut *conn)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Dining table {id} not found")));
    }
    Ok(())
}
