//! Repository Module
//!
//! Free async functions over a `&mut SqliteConnection`, so the same call
//! works on a pooled connection or inside an open transaction:
//!
//! ```ignore
//! let mut tx = pool.begin().await?;
//! let table = dining_table::find_by_id(&mut tx, table_id).await?;
//! dining_table::set_status(&mut tx, table_id, TableStatus::Occupied, now).await?;
//! tx.commit().await?;
//! ```

pub mod audit_log;
pub mod bill;
pub mod customer;
pub mod dining_table;
pub mod kitchen_order;
pub mod menu_item;
pub mod order;
pub mod order_item;
pub mod reservation;

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Message raised by the reservation overlap triggers
const OVERLAP_MARKER: &str = "reservation_overlap";

/// Column reported when the one-active-order-per-table index fires
const ACTIVE_ORDER_MARKER: &str = "orders.table_id";

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Overlapping reservation: {0}")]
    Overlap(String),

    #[error("Database busy: {0}")]
    Busy(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => RepoError::NotFound(err.to_string()),
            sqlx::Error::PoolTimedOut => RepoError::Busy(err.to_string()),
            sqlx::Error::Database(db) => {
                let message = db.message().to_string();
                if message.contains(OVERLAP_MARKER) {
                    RepoError::Overlap(message)
                } else if db.is_unique_violation() {
                    RepoError::Duplicate(message)
                } else if message.contains("database is locked") {
                    RepoError::Busy(message)
                } else {
                    RepoError::Database(message)
                }
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) if msg.contains(ACTIVE_ORDER_MARKER) => {
                AppError::with_message(ErrorCode::TableOccupied, "Table already has an active order")
            }
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Overlap(_) => AppError::new(ErrorCode::TableNotAvailable),
            RepoError::Busy(msg) => AppError::with_message(ErrorCode::SystemBusy, msg),
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
