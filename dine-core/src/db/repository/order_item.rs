//! Order Item Repository

use super::{RepoError, RepoResult};
use shared::models::{OrderItem, OrderItemStatus};
use sqlx::SqliteConnection;

const ITEM_SELECT: &str = "SELECT id, order_id, menu_item_id, item_name, quantity, unit_price, total_price, status, special_request, cancellation_reason, created_at, updated_at FROM order_item";

pub async fn find_by_order(conn: &mut SqliteConnection, order_id: i64) -> RepoResult<Vec<OrderItem>> {
    let sql = format!("{ITEM_SELECT} WHERE order_id = ? ORDER BY created_at, id");
    let items = sqlx::query_as::<_, OrderItem>(&sql)
        .bind(order_id)
        .fetch_all(&mut *conn)
        .await?;
    Ok(items)
}

pub async fn insert(conn: &mut SqliteConnection, item: &OrderItem) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO order_item (id, order_id, menu_item_id, item_name, quantity, unit_price, total_price, status, special_request, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
    )
    .bind(item.id)
    .bind(item.order_id)
    .bind(item.menu_item_id)
    .bind(&item.item_name)
    .bind(item.quantity)
    .bind(item.unit_price)
    .bind(item.total_price)
    .bind(item.status)
    .bind(&item.special_request)
    .bind(item.created_at)
    .bind(item.updated_at)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub async fn set_status(
    conn: &mut SqliteConnection,
    id: i64,
    status: OrderItemStatus,
    cancellation_reason: Option<&str>,
    now: i64,
) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE order_item SET status = ?1, cancellation_reason = COALESCE(?2, cancellation_reason), updated_at = ?3 WHERE id = ?4",
    )
    .bind(status)
    .bind(cancellation_reason)
    .bind(now)
    .bind(id)
    .execute(&mut *conn)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Order item {id} not found")));
    }
    Ok(())
}

/// Bulk move every item of `order_id` in `from` to `to`, returns rows touched
pub async fn transition_all(
    conn: &mut SqliteConnection,
    order_id: i64,
    from: OrderItemStatus,
    to: OrderItemStatus,
    cancellation_reason: Option<&str>,
    now: i64,
) -> RepoResult<u64> {
    let rows = sqlx::query(
        "UPDATE order_item SET status = ?1, cancellation_reason = COALESCE(?2, cancellation_reason), updated_at = ?3 WHERE order_id = ?4 AND status = ?5",
    )
    .bind(to)
    .bind(cancellation_reason)
    .bind(now)
    .bind(order_id)
    .bind(from)
    .execute(&mut *conn)
    .await?;
    Ok(rows.rows_affected())
}
