//! Kitchen Order Repository

use super::{RepoError, RepoResult};
use shared::models::{KitchenOrder, KitchenOrderStatus, KitchenPriority};
use sqlx::SqliteConnection;

const KITCHEN_SELECT: &str = "SELECT id, order_id, status, priority, staff_id, station, started_at, completed_at, created_at, updated_at FROM kitchen_order";

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<KitchenOrder>> {
    let sql = format!("{KITCHEN_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, KitchenOrder>(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row)
}

pub async fn find_by_order(conn: &mut SqliteConnection, order_id: i64) -> RepoResult<Option<KitchenOrder>> {
    let sql = format!("{KITCHEN_SELECT} WHERE order_id = ?");
    let row = sqlx::query_as::<_, KitchenOrder>(&sql)
        .bind(order_id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row)
}

/// Tickets not yet completed or cancelled, oldest first
pub async fn find_open(conn: &mut SqliteConnection) -> RepoResult<Vec<KitchenOrder>> {
    let sql = format!(
        "{KITCHEN_SELECT} WHERE status NOT IN ('completed', 'cancelled') ORDER BY created_at, id"
    );
    let rows = sqlx::query_as::<_, KitchenOrder>(&sql)
        .fetch_all(&mut *conn)
        .await?;
    Ok(rows)
}

/// Fresh pending ticket for `order_id`
pub async fn create(
    conn: &mut SqliteConnection,
    order_id: i64,
    priority: KitchenPriority,
    now: i64,
) -> RepoResult<KitchenOrder> {
    let ticket = KitchenOrder {
        id: shared::util::snowflake_id(),
        order_id,
        status: KitchenOrderStatus::Pending,
        priority,
        staff_id: None,
        station: None,
        started_at: None,
        completed_at: None,
        created_at: now,
        updated_at: now,
    };
    sqlx::query(
        "INSERT INTO kitchen_order (id, order_id, status, priority, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(ticket.id)
    .bind(ticket.order_id)
    .bind(ticket.status)
    .bind(ticket.priority)
    .bind(ticket.created_at)
    .bind(ticket.updated_at)
    .execute(&mut *conn)
    .await?;
    Ok(ticket)
}

/// Persist status, stamps, staff and priority carried by `ticket`
pub async fn update(conn: &mut SqliteConnection, ticket: &KitchenOrder) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE kitchen_order SET status = ?1, priority = ?2, staff_id = ?3, station = ?4, started_at = ?5, completed_at = ?6, updated_at = ?7 WHERE id = ?8",
    )
    .bind(ticket.status)
    .bind(ticket.priority)
    .bind(ticket.staff_id)
    .bind(&ticket.station)
    .bind(ticket.started_at)
    .bind(ticket.completed_at)
    .bind(ticket.updated_at)
    .bind(ticket.id)
    .execute(&mut *conn)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Kitchen order {} not found", ticket.id)));
    }
    Ok(())
}

/// Drop the ticket of `order_id`, returns whether one existed
pub async fn delete_by_order(conn: &mut SqliteConnection, order_id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM kitchen_order WHERE order_id = ?")
        .bind(order_id)
        .execute(&mut *conn)
        .await?;
    Ok(rows.rows_affected() > 0)
}
