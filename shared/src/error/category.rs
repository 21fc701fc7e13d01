//! Error category and kind classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// - 0xxx: General errors
/// - 1xxx: Reservation errors
/// - 2xxx: Order errors
/// - 3xxx: Kitchen errors
/// - 4xxx: Menu errors
/// - 5xxx: Table errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    General,
    Reservation,
    Order,
    Kitchen,
    Menu,
    Table,
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Reservation,
            2000..3000 => Self::Order,
            3000..4000 => Self::Kitchen,
            4000..5000 => Self::Menu,
            5000..6000 => Self::Table,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Reservation => "reservation",
            Self::Order => "order",
            Self::Kitchen => "kitchen",
            Self::Menu => "menu",
            Self::Table => "table",
            Self::System => "system",
        }
    }
}

/// Stable machine-readable failure kind
///
/// Callers translate the kind into their own transport response; the
/// [`ErrorCode`] keeps the precise reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Referenced entity does not exist
    NotFound,
    /// Request clashes with current state
    Conflict,
    /// Request is malformed or breaks a business rule
    InvalidRequest,
    /// Store or runtime failure
    Internal,
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }

    /// Get the failure kind for this error code
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound
            | Self::ReservationNotFound
            | Self::OrderNotFound
            | Self::OrderItemNotFound
            | Self::KitchenOrderNotFound
            | Self::MenuItemNotFound
            | Self::TableNotFound => ErrorKind::NotFound,

            Self::AlreadyExists
            | Self::ReservationAlreadyConfirmed
            | Self::ReservationAlreadyCancelled
            | Self::ReservationAlreadyCompleted
            | Self::ReservationHasActiveOrder
            | Self::OrderAlreadyCompleted
            | Self::OrderAlreadyCancelled
            | Self::BillAlreadyCreated
            | Self::TableOccupied
            | Self::TableNotAvailable
            | Self::NoTablesAvailable => ErrorKind::Conflict,

            Self::Unknown
            | Self::InternalError
            | Self::DatabaseError
            | Self::TimeoutError
            | Self::ConfigError
            | Self::SystemBusy => ErrorKind::Internal,

            // Success never reaches an AppError; everything else is a bad request
            _ => ErrorKind::InvalidRequest,
        }
    }
}
