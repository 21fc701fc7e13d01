//! Customer Repository

use super::{RepoError, RepoResult};
use shared::models::Customer;
use sqlx::SqliteConnection;

const CUSTOMER_SELECT: &str = "SELECT id, name, phone, email, created_at, updated_at FROM customer";

pub async fn find_by_phone(conn: &mut SqliteConnection, phone: &str) -> RepoResult<Option<Customer>> {
    let sql = format!("{CUSTOMER_SELECT} WHERE phone = ?");
    let row = sqlx::query_as::<_, Customer>(&sql)
        .bind(phone)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row)
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<Customer>> {
    let sql = format!("{CUSTOMER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Customer>(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row)
}

/// Insert, or refresh name/email of the customer already owning `phone`
pub async fn upsert_by_phone(
    conn: &mut SqliteConnection,
    name: &str,
    phone: &str,
    email: Option<&str>,
    now: i64,
) -> RepoResult<Customer> {
    sqlx::query(
        "INSERT INTO customer (id, name, phone, email, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?5) \
         ON CONFLICT(phone) DO UPDATE SET name = excluded.name, email = COALESCE(excluded.email, customer.email), updated_at = excluded.updated_at",
    )
    .bind(shared::util::snowflake_id())
    .bind(name)
    .bind(phone)
    .bind(email)
    .bind(now)
    .execute(&mut *conn)
    .await?;
    find_by_phone(conn, phone)
        .await?
        .ok_or_else(|| RepoError::Database(format!("Customer with phone {phone} vanished after upsert")))
}
