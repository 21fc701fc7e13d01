//! Order Repository

use super::{RepoError, RepoResult};
use shared::models::{Order, OrderStatus};
use sqlx::SqliteConnection;

const ORDER_SELECT: &str = "SELECT id, order_number, table_id, reservation_id, staff_id, customer_name, customer_phone, party_size, notes, status, total_amount, final_amount, confirmed_at, completed_at, cancelled_at, cancellation_reason, created_at, updated_at FROM orders";

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<Order>> {
    let sql = format!("{ORDER_SELECT} WHERE id = ?");
    let order = sqlx::query_as::<_, Order>(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(order)
}

pub async fn find_by_number(conn: &mut SqliteConnection, order_number: &str) -> RepoResult<Option<Order>> {
    let sql = format!("{ORDER_SELECT} WHERE order_number = ?");
    let order = sqlx::query_as::<_, Order>(&sql)
        .bind(order_number)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(order)
}

/// The single non-terminal order on a table, if any
pub async fn find_active_for_table(conn: &mut SqliteConnection, table_id: i64) -> RepoResult<Option<Order>> {
    let sql = format!(
        "{ORDER_SELECT} WHERE table_id = ? AND status NOT IN ('completed', 'cancelled') LIMIT 1"
    );
    let order = sqlx::query_as::<_, Order>(&sql)
        .bind(table_id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(order)
}

/// Non-terminal order spawned by seating `reservation_id`
pub async fn find_active_for_reservation(
    conn: &mut SqliteConnection,
    reservation_id: i64,
) -> RepoResult<Option<Order>> {
    let sql = format!(
        "{ORDER_SELECT} WHERE reservation_id = ? AND status NOT IN ('completed', 'cancelled') LIMIT 1"
    );
    let order = sqlx::query_as::<_, Order>(&sql)
        .bind(reservation_id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(order)
}

/// Orders created in `[day_start, day_start + 1 day)`
pub async fn count_created_between(conn: &mut SqliteConnection, from: i64, to: i64) -> RepoResult<i64> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE created_at >= ?1 AND created_at < ?2")
            .bind(from)
            .bind(to)
            .fetch_one(&mut *conn)
            .await?;
    Ok(count)
}

pub async fn insert(conn: &mut SqliteConnection, order: &Order) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO orders (id, order_number, table_id, reservation_id, staff_id, customer_name, customer_phone, party_size, notes, status, total_amount, final_amount, confirmed_at, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
    )
    .bind(order.id)
    .bind(&order.order_number)
    .bind(order.table_id)
    .bind(order.reservation_id)
    .bind(order.staff_id)
    .bind(&order.customer_name)
    .bind(&order.customer_phone)
    .bind(order.party_size)
    .bind(&order.notes)
    .bind(order.status)
    .bind(order.total_amount)
    .bind(order.final_amount)
    .bind(order.confirmed_at)
    .bind(order.created_at)
    .bind(order.updated_at)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Persist status plus every lifecycle stamp carried by `order`
pub async fn update_state(conn: &mut SqliteConnection, order: &Order) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE orders SET status = ?1, confirmed_at = ?2, completed_at = ?3, cancelled_at = ?4, cancellation_reason = ?5, updated_at = ?6 WHERE id = ?7",
    )
    .bind(order.status)
    .bind(order.confirmed_at)
    .bind(order.completed_at)
    .bind(order.cancelled_at)
    .bind(&order.cancellation_reason)
    .bind(order.updated_at)
    .bind(order.id)
    .execute(&mut *conn)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Order {} not found", order.id)));
    }
    Ok(())
}

pub async fn set_status(
    conn: &mut SqliteConnection,
    id: i64,
    status: OrderStatus,
    now: i64,
) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE orders SET status = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(status)
        .bind(now)
        .bind(id)
        .execute(&mut *conn)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Order {id} not found")));
    }
    Ok(())
}

pub async fn set_totals(
    conn: &mut SqliteConnection,
    id: i64,
    total_amount: f64,
    final_amount: f64,
    now: i64,
) -> RepoResult<()> {
    sqlx::query("UPDATE orders SET total_amount = ?1, final_amount = ?2, updated_at = ?3 WHERE id = ?4")
        .bind(total_amount)
        .bind(final_amount)
        .bind(now)
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}
