//! 桌台可用性引擎
//!
//! Filtering and ranking are pure functions over loaded rows; the only
//! store access is one overlap query per lookup.
//!
//! ```text
//! all tables ──▶ eligible (active, capacity, floor/section)
//!            ──▶ minus busy (overlapping pending/confirmed/seated)
//!            ──▶ rank (preferred, |capacity - party|, id)
//! ```

use sqlx::SqliteConnection;

use shared::models::DiningTable;
use shared::util::intervals_overlap;

use crate::db::repository::{dining_table, reservation};
use crate::utils::error::not_found;
use crate::utils::{AppError, AppResult, ErrorCode};

/// Requested slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRequest {
    pub start: i64,
    /// Exclusive
    pub end: i64,
    pub party_size: i32,
    pub floor: Option<i32>,
    pub section: Option<String>,
    pub preferred_table_id: Option<i64>,
    /// Ignore this reservation's own interval (rescheduling)
    pub exclude_reservation: Option<i64>,
}

impl SlotRequest {
    pub fn new(start: i64, end: i64, party_size: i32) -> Self {
        Self {
            start,
            end,
            party_size,
            floor: None,
            section: None,
            preferred_table_id: None,
            exclude_reservation: None,
        }
    }
}

/// Static fit: active, big enough, not too big, in the requested area
pub fn is_eligible(table: &DiningTable, request: &SlotRequest) -> bool {
    table.is_active
        && table.fits_party(request.party_size)
        && request.floor.is_none_or(|floor| table.floor == floor)
        && request
            .section
            .as_deref()
            .is_none_or(|section| table.section.as_deref() == Some(section))
}

/// Whether an existing `[start, end)` booking clashes with the request
pub fn conflicts(existing_start: i64, existing_end: i64, request: &SlotRequest) -> bool {
    intervals_overlap(existing_start, existing_end, request.start, request.end)
}

/// Preferred table first, then smallest capacity surplus, then lowest id
pub fn rank(mut tables: Vec<DiningTable>, party_size: i32, preferred: Option<i64>) -> Vec<DiningTable> {
    tables.sort_by_key(|t| {
        (
            Some(t.id) != preferred,
            (t.capacity - party_size).abs(),
            t.id,
        )
    });
    tables
}

/// Pure pipeline: eligible, not busy, ranked
pub fn select_candidates(
    tables: Vec<DiningTable>,
    busy_table_ids: &[i64],
    request: &SlotRequest,
) -> Vec<DiningTable> {
    let free = tables
        .into_iter()
        .filter(|t| is_eligible(t, request) && !busy_table_ids.contains(&t.id))
        .collect();
    rank(free, request.party_size, request.preferred_table_id)
}

/// Free tables for `request`, best first (may be empty)
pub async fn find_candidates(
    conn: &mut SqliteConnection,
    request: &SlotRequest,
) -> AppResult<Vec<DiningTable>> {
    let tables = dining_table::find_all(conn).await?;
    let busy =
        reservation::busy_table_ids(conn, request.start, request.end, request.exclude_reservation)
            .await?;
    Ok(select_candidates(tables, &busy, request))
}

/// Best free table or `NoTablesAvailable`
pub async fn assign_table(
    conn: &mut SqliteConnection,
    request: &SlotRequest,
) -> AppResult<DiningTable> {
    find_candidates(conn, request)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| {
            AppError::new(ErrorCode::NoTablesAvailable)
                .with_detail("party_size", request.party_size)
                .with_detail("start_time", request.start)
        })
}

/// Same rule on exactly one table, never falls back to auto assignment
pub async fn validate_explicit_table(
    conn: &mut SqliteConnection,
    table_id: i64,
    request: &SlotRequest,
) -> AppResult<DiningTable> {
    let table = dining_table::find_by_id(conn, table_id)
        .await?
        .ok_or_else(|| not_found(ErrorCode::TableNotFound, table_id))?;

    if !is_eligible(&table, request) {
        return Err(AppError::with_message(
            ErrorCode::TableNotAvailable,
            format!("Table {} cannot host a party of {}", table.name, request.party_size),
        )
        .with_detail("table_id", table_id));
    }

    let clashes = reservation::find_overlapping(
        conn,
        table_id,
        request.start,
        request.end,
        request.exclude_reservation,
    )
    .await?;
    if let Some(existing) = clashes.first() {
        return Err(AppError::new(ErrorCode::TableNotAvailable)
            .with_detail("table_id", table_id)
            .with_detail("conflicting_reservation", existing.code.clone()));
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::TableStatus;

    fn table(id: i64, capacity: i32) -> DiningTable {
        DiningTable {
            id,
            name: format!("T{id}"),
            capacity,
            min_capacity: None,
            floor: 1,
            section: None,
            is_active: true,
            status: TableStatus::Available,
            updated_at: 0,
        }
    }

    fn ids(tables: &[DiningTable]) -> Vec<i64> {
        tables.iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_eligibility_rules() {
        let request = SlotRequest::new(0, 1, 4);
        assert!(is_eligible(&table(1, 4), &request));
        assert!(!is_eligible(&table(1, 3), &request));

        let mut inactive = table(2, 6);
        inactive.is_active = false;
        assert!(!is_eligible(&inactive, &request));

        let mut big = table(3, 10);
        big.min_capacity = Some(6);
        assert!(!is_eligible(&big, &request));
        big.min_capacity = Some(4);
        assert!(is_eligible(&big, &request));
    }

    #[test]
    fn test_floor_and_section_filters() {
        let mut terrace = table(1, 4);
        terrace.floor = 2;
        terrace.section = Some("terrace".to_string());

        let mut request = SlotRequest::new(0, 1, 2);
        request.floor = Some(2);
        assert!(is_eligible(&terrace, &request));
        request.section = Some("terrace".to_string());
        assert!(is_eligible(&terrace, &request));
        request.section = Some("bar".to_string());
        assert!(!is_eligible(&terrace, &request));
        request.section = None;
        request.floor = Some(1);
        assert!(!is_eligible(&terrace, &request));
    }

    #[test]
    fn test_interval_conflicts() {
        let hour = 3_600_000;
        let request = SlotRequest::new(19 * hour + hour / 2, 21 * hour + hour / 2, 2);
        assert!(conflicts(19 * hour, 21 * hour, &request));
        // back to back is fine
        assert!(!conflicts(21 * hour + hour / 2, 23 * hour, &request));
        assert!(!conflicts(17 * hour, 19 * hour + hour / 2, &request));
    }

    #[test]
    fn test_rank_by_fit_then_id() {
        let ranked = rank(vec![table(5, 8), table(3, 4), table(2, 6), table(1, 4)], 4, None);
        assert_eq!(ids(&ranked), vec![1, 3, 2, 5]);
    }

    #[test]
    fn test_preferred_table_first() {
        let ranked = rank(vec![table(1, 4), table(2, 8)], 4, Some(2));
        assert_eq!(ids(&ranked), vec![2, 1]);
        // unknown preference changes nothing
        let ranked = rank(vec![table(2, 8), table(1, 4)], 4, Some(99));
        assert_eq!(ids(&ranked), vec![1, 2]);
    }

    #[test]
    fn test_select_candidates_drops_busy_and_ineligible() {
        let request = SlotRequest {
            preferred_table_id: Some(2),
            ..SlotRequest::new(0, 1, 4)
        };
        let tables = vec![table(1, 4), table(2, 6), table(3, 2), table(4, 4)];
        let selected = select_candidates(tables, &[2], &request);
        assert_eq!(ids(&selected), vec![1, 4]);
    }
}
