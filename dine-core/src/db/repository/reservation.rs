//! Reservation Repository

use super::{RepoError, RepoResult};
use shared::models::{Reservation, ReservationFilter, ReservationStatus};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

const RESERVATION_SELECT: &str = "SELECT id, code, customer_id, table_id, customer_name, customer_phone, customer_email, party_size, start_time, duration_minutes, status, special_request, notes, confirmed_at, seated_at, completed_at, cancelled_at, cancellation_reason, created_by, created_at, updated_at FROM reservation";

/// Interval clash against reservations that still hold their table
const OVERLAP_CONDITION: &str = "status IN ('pending', 'confirmed', 'seated') AND start_time < ?1 AND ?2 < start_time + duration_minutes * 60000 AND (?3 IS NULL OR id <> ?3)";

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<Reservation>> {
    let sql = format!("{RESERVATION_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Reservation>(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row)
}

pub async fn find_by_code(conn: &mut SqliteConnection, code: &str) -> RepoResult<Option<Reservation>> {
    let sql = format!("{RESERVATION_SELECT} WHERE code = ?");
    let row = sqlx::query_as::<_, Reservation>(&sql)
        .bind(code)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row)
}

pub async fn list(
    conn: &mut SqliteConnection,
    filter: &ReservationFilter,
) -> RepoResult<Vec<Reservation>> {
    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(RESERVATION_SELECT);
    qb.push(" WHERE 1 = 1");
    if let Some(status) = filter.status {
        qb.push(" AND status = ").push_bind(status);
    }
    if let Some(table_id) = filter.table_id {
        qb.push(" AND table_id = ").push_bind(table_id);
    }
    if let Some(from) = filter.from {
        qb.push(" AND start_time >= ").push_bind(from);
    }
    if let Some(to) = filter.to {
        qb.push(" AND start_time < ").push_bind(to);
    }
    qb.push(" ORDER BY start_time, id");
    let rows = qb
        .build_query_as::<Reservation>()
        .fetch_all(&mut *conn)
        .await?;
    Ok(rows)
}

/// Reservations on `table_id` whose interval intersects `[start, end)`
pub async fn find_overlapping(
    conn: &mut SqliteConnection,
    table_id: i64,
    start: i64,
    end: i64,
    exclude_id: Option<i64>,
) -> RepoResult<Vec<Reservation>> {
    let sql = format!("{RESERVATION_SELECT} WHERE table_id = ?4 AND {OVERLAP_CONDITION} ORDER BY start_time");
    let rows = sqlx::query_as::<_, Reservation>(&sql)
        .bind(end)
        .bind(start)
        .bind(exclude_id)
        .bind(table_id)
        .fetch_all(&mut *conn)
        .await?;
    Ok(rows)
}

/// Table ids that have at least one clashing reservation in `[start, end)`
pub async fn busy_table_ids(
    conn: &mut SqliteConnection,
    start: i64,
    end: i64,
    exclude_id: Option<i64>,
) -> RepoResult<Vec<i64>> {
    let sql = format!("SELECT DISTINCT table_id FROM reservation WHERE {OVERLAP_CONDITION}");
    let ids = sqlx::query_scalar::<_, i64>(&sql)
        .bind(end)
        .bind(start)
        .bind(exclude_id)
        .fetch_all(&mut *conn)
        .await?;
    Ok(ids)
}

pub async fn insert(conn: &mut SqliteConnection, r: &Reservation) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO reservation (id, code, customer_id, table_id, customer_name, customer_phone, customer_email, party_size, start_time, duration_minutes, status, special_request, notes, created_by, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
    )
    .bind(r.id)
    .bind(&r.code)
    .bind(r.customer_id)
    .bind(r.table_id)
    .bind(&r.customer_name)
    .bind(&r.customer_phone)
    .bind(&r.customer_email)
    .bind(r.party_size)
    .bind(r.start_time)
    .bind(r.duration_minutes)
    .bind(r.status)
    .bind(&r.special_request)
    .bind(&r.notes)
    .bind(r.created_by)
    .bind(r.created_at)
    .bind(r.updated_at)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Write back the editable fields after a reschedule
pub async fn update_details(conn: &mut SqliteConnection, r: &Reservation) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE reservation SET table_id = ?1, customer_id = ?2, customer_name = ?3, customer_phone = ?4, customer_email = ?5, party_size = ?6, start_time = ?7, duration_minutes = ?8, special_request = ?9, notes = ?10, updated_at = ?11 WHERE id = ?12",
    )
    .bind(r.table_id)
    .bind(r.customer_id)
    .bind(&r.customer_name)
    .bind(&r.customer_phone)
    .bind(&r.customer_email)
    .bind(r.party_size)
    .bind(r.start_time)
    .bind(r.duration_minutes)
    .bind(&r.special_request)
    .bind(&r.notes)
    .bind(r.updated_at)
    .bind(r.id)
    .execute(&mut *conn)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Reservation {} not found", r.id)));
    }
    Ok(())
}

/// Move to `status` and stamp the matching transition column
pub async fn set_status(
    conn: &mut SqliteConnection,
    id: i64,
    status: ReservationStatus,
    cancellation_reason: Option<&str>,
    now: i64,
) -> RepoResult<()> {
    let sql = match status {
        ReservationStatus::Confirmed => {
            "UPDATE reservation SET status = ?1, confirmed_at = ?2, updated_at = ?2 WHERE id = ?3"
        }
        ReservationStatus::Seated => {
            "UPDATE reservation SET status = ?1, seated_at = ?2, updated_at = ?2 WHERE id = ?3"
        }
        ReservationStatus::Completed => {
            "UPDATE reservation SET status = ?1, completed_at = ?2, updated_at = ?2 WHERE id = ?3"
        }
        ReservationStatus::Cancelled => {
            "UPDATE reservation SET status = ?1, cancelled_at = ?2, cancellation_reason = ?4, updated_at = ?2 WHERE id = ?3"
        }
        ReservationStatus::Pending | ReservationStatus::NoShow => {
            "UPDATE reservation SET status = ?1, updated_at = ?2 WHERE id = ?3"
        }
    };
    let mut query = sqlx::query(sql).bind(status).bind(now).bind(id);
    if status == ReservationStatus::Cancelled {
        query = query.bind(cancellation_reason);
    }
    let rows = query.execute(&mut *conn).await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Reservation {id} not found")));
    }
    Ok(())
}
