//! Dining Table Model

use serde::{Deserialize, Serialize};

use super::status_strings;

/// Occupancy flag flipped by seating, walk-in orders and releases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum TableStatus {
    #[default]
    Available,
    Occupied,
}

status_strings!(TableStatus {
    Available => "available",
    Occupied => "occupied",
});

/// Dining table entity (桌台)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DiningTable {
    pub id: i64,
    pub name: String,
    pub capacity: i32,
    /// Smallest party the table should be given to
    pub min_capacity: Option<i32>,
    pub floor: i32,
    pub section: Option<String>,
    pub is_active: bool,
    pub status: TableStatus,
    pub updated_at: i64,
}

impl DiningTable {
    /// Static fit check: active, large enough, not wasted on a small party
    pub fn fits_party(&self, party_size: i32) -> bool {
        self.is_active
            && self.capacity >= party_size
            && self.min_capacity.is_none_or(|min| min <= party_size)
    }
}

/// Create dining table payload (floor-plan provisioning)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTableCreate {
    pub name: String,
    pub capacity: i32,
    pub min_capacity: Option<i32>,
    pub floor: Option<i32>,
    pub section: Option<String>,
}
