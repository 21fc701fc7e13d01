//! Bill Repository
//!
//! Bills are written by the billing module, this core only needs to know
//! whether one exists for an order.

use super::RepoResult;
use sqlx::SqliteConnection;

pub async fn exists_for_order(conn: &mut SqliteConnection, order_id: i64) -> RepoResult<bool> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM bill WHERE order_id = ? LIMIT 1")
        .bind(order_id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(found.is_some())
}

pub async fn create(conn: &mut SqliteConnection, order_id: i64, amount: f64, now: i64) -> RepoResult<i64> {
    let id = shared::util::snowflake_id();
    sqlx::query("INSERT INTO bill (id, order_id, amount, created_at) VALUES (?1, ?2, ?3, ?4)")
        .bind(id)
        .bind(order_id)
        .bind(amount)
        .bind(now)
        .execute(&mut *conn)
        .await?;
    Ok(id)
}
