//! Reservation Model

use serde::{Deserialize, Serialize};

use super::status_strings;
use crate::util::interval_end;

/// Reservation status
///
/// `completed`, `cancelled` and `no_show` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    Seated,
    Completed,
    Cancelled,
    NoShow,
}

status_strings!(ReservationStatus {
    Pending => "pending",
    Confirmed => "confirmed",
    Seated => "seated",
    Completed => "completed",
    Cancelled => "cancelled",
    NoShow => "no_show",
});

impl ReservationStatus {
    /// Statuses whose interval blocks the table
    pub const BLOCKING: [ReservationStatus; 3] = [Self::Pending, Self::Confirmed, Self::Seated];

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::NoShow)
    }

    /// Whether the reservation still holds its table interval
    pub fn blocks_table(&self) -> bool {
        Self::BLOCKING.contains(self)
    }
}

/// Reservation entity (预订)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Reservation {
    pub id: i64,
    pub code: String,
    pub customer_id: Option<i64>,
    pub table_id: i64,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub party_size: i32,
    /// Interval start (Unix millis)
    pub start_time: i64,
    pub duration_minutes: i32,
    pub status: ReservationStatus,
    pub special_request: Option<String>,
    pub notes: Option<String>,
    pub confirmed_at: Option<i64>,
    pub seated_at: Option<i64>,
    pub completed_at: Option<i64>,
    pub cancelled_at: Option<i64>,
    pub cancellation_reason: Option<String>,
    pub created_by: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Reservation {
    /// Exclusive interval end
    pub fn end_time(&self) -> i64 {
        interval_end(self.start_time, self.duration_minutes)
    }
}

/// How the table of a new reservation is chosen
///
/// A reservation never exists without a table: the request carries the
/// choice, the persisted row carries the resolved id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TableChoice {
    /// Pick the best fitting free table, trying `preferred_table_id` first
    Auto { preferred_table_id: Option<i64> },
    /// Use exactly this table or fail
    Explicit { table_id: i64 },
}

impl Default for TableChoice {
    fn default() -> Self {
        Self::Auto {
            preferred_table_id: None,
        }
    }
}

/// Create reservation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationCreate {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub party_size: i32,
    pub start_time: i64,
    /// Falls back to the configured default duration
    pub duration_minutes: Option<i32>,
    #[serde(default)]
    pub table: TableChoice,
    pub floor: Option<i32>,
    pub section: Option<String>,
    pub special_request: Option<String>,
    pub notes: Option<String>,
}

/// Reschedule / edit payload (only pending or confirmed reservations)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationUpdate {
    pub start_time: Option<i64>,
    pub duration_minutes: Option<i32>,
    pub party_size: Option<i32>,
    /// Move to this table explicitly
    pub table_id: Option<i64>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub special_request: Option<String>,
    pub notes: Option<String>,
}

impl ReservationUpdate {
    /// Whether the change can move the reservation in time or space
    pub fn touches_interval(&self) -> bool {
        self.start_time.is_some()
            || self.duration_minutes.is_some()
            || self.party_size.is_some()
            || self.table_id.is_some()
    }
}

/// Reservation listing filter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationFilter {
    pub status: Option<ReservationStatus>,
    pub table_id: Option<i64>,
    /// Inclusive lower bound on `start_time`
    pub from: Option<i64>,
    /// Exclusive upper bound on `start_time`
    pub to: Option<i64>,
}

/// Availability lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    pub start_time: i64,
    pub duration_minutes: Option<i32>,
    pub party_size: i32,
    pub floor: Option<i32>,
    pub section: Option<String>,
    pub preferred_table_id: Option<i64>,
}
