//! Menu Item Repository

use super::{RepoError, RepoResult};
use shared::models::MenuItem;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

pub async fn find_by_ids(conn: &mut SqliteConnection, ids: &[i64]) -> RepoResult<Vec<MenuItem>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut qb: QueryBuilder<Sqlite> =
        QueryBuilder::new("SELECT id, name, price, is_available, is_active FROM menu_item WHERE id IN (");
    let mut separated = qb.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");
    let rows = qb.build_query_as::<MenuItem>().fetch_all(&mut *conn).await?;
    Ok(rows)
}

pub async fn create(conn: &mut SqliteConnection, name: &str, price: f64) -> RepoResult<MenuItem> {
    if price < 0.0 {
        return Err(RepoError::Validation(format!("Price must be non-negative, got {price}")));
    }
    let item = MenuItem {
        id: shared::util::snowflake_id(),
        name: name.to_string(),
        price,
        is_available: true,
        is_active: true,
    };
    sqlx::query("INSERT INTO menu_item (id, name, price, is_available, is_active) VALUES (?1, ?2, ?3, 1, 1)")
        .bind(item.id)
        .bind(&item.name)
        .bind(item.price)
        .execute(&mut *conn)
        .await?;
    Ok(item)
}

/// Toggle the two catalog flags
pub async fn set_flags(
    conn: &mut SqliteConnection,
    id: i64,
    is_available: bool,
    is_active: bool,
) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE menu_item SET is_available = ?1, is_active = ?2 WHERE id = ?3")
        .bind(is_available)
        .bind(is_active)
        .bind(id)
        .execute(&mut *conn)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Menu item {id} not found")));
    }
    Ok(())
}
