//! Unified error codes for the dining core
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Reservation errors
//! - 2xxx: Order errors
//! - 3xxx: Kitchen errors
//! - 4xxx: Menu errors
//! - 5xxx: Table errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,
    /// Status change not allowed by the state machine
    InvalidStatusTransition = 9,

    // ==================== 1xxx: Reservation ====================
    /// Reservation not found
    ReservationNotFound = 1001,
    /// Reservation has already been confirmed
    ReservationAlreadyConfirmed = 1002,
    /// Reservation has already been cancelled
    ReservationAlreadyCancelled = 1003,
    /// Reservation has already been completed
    ReservationAlreadyCompleted = 1004,
    /// Linked order is still in progress
    ReservationHasActiveOrder = 1005,
    /// Party size outside the accepted range
    InvalidPartySize = 1101,
    /// Reservation time is not in the future
    InvalidReservationDate = 1102,
    /// Reservation is inside the minimum lead time
    ReservationTooEarly = 1103,
    /// Reservation is beyond the booking horizon
    ReservationTooFar = 1104,
    /// Grace period elapsed without seating
    ReservationExpired = 1105,
    /// Duration outside the accepted range
    InvalidReservationDuration = 1106,

    // ==================== 2xxx: Order ====================
    /// Order not found
    OrderNotFound = 2001,
    /// Order has already been completed
    OrderAlreadyCompleted = 2002,
    /// Order has already been cancelled
    OrderAlreadyCancelled = 2003,
    /// Order item not found
    OrderItemNotFound = 2004,
    /// Order has no live items
    OrderEmpty = 2005,
    /// A bill exists for the order
    BillAlreadyCreated = 2006,
    /// Quantity outside the accepted range
    InvalidQuantity = 2007,

    // ==================== 3xxx: Kitchen ====================
    /// Kitchen order not found
    KitchenOrderNotFound = 3001,

    // ==================== 4xxx: Menu ====================
    /// Menu item not found
    MenuItemNotFound = 4001,
    /// Menu item is currently unavailable
    MenuItemNotAvailable = 4002,
    /// Menu item is not active
    MenuItemNotActive = 4003,

    // ==================== 5xxx: Table ====================
    /// Table not found
    TableNotFound = 5001,
    /// Table already has an active order
    TableOccupied = 5002,
    /// Table cannot take the requested booking
    TableNotAvailable = 5003,
    /// No table fits the request
    NoTablesAvailable = 5004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Operation timeout
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
    /// System busy (store locked, retry later)
    SystemBusy = 9404,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",
            ErrorCode::InvalidStatusTransition => "Status transition is not allowed",

            // Reservation
            ErrorCode::ReservationNotFound => "Reservation not found",
            ErrorCode::ReservationAlreadyConfirmed => "Reservation has already been confirmed",
            ErrorCode::ReservationAlreadyCancelled => "Reservation has already been cancelled",
            ErrorCode::ReservationAlreadyCompleted => "Reservation has already been completed",
            ErrorCode::ReservationHasActiveOrder => "Reservation has an order still in progress",
            ErrorCode::InvalidPartySize => "Party size is out of range",
            ErrorCode::InvalidReservationDate => "Reservation time must be in the future",
            ErrorCode::ReservationTooEarly => "Reservation is too close to the current time",
            ErrorCode::ReservationTooFar => "Reservation is too far in advance",
            ErrorCode::ReservationExpired => "Reservation has expired",
            ErrorCode::InvalidReservationDuration => "Reservation duration is out of range",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderAlreadyCompleted => "Order has already been completed",
            ErrorCode::OrderAlreadyCancelled => "Order has already been cancelled",
            ErrorCode::OrderItemNotFound => "Order item not found",
            ErrorCode::OrderEmpty => "Order is empty",
            ErrorCode::BillAlreadyCreated => "A bill has already been created for this order",
            ErrorCode::InvalidQuantity => "Quantity is out of range",

            // Kitchen
            ErrorCode::KitchenOrderNotFound => "Kitchen order not found",

            // Menu
            ErrorCode::MenuItemNotFound => "Menu item not found",
            ErrorCode::MenuItemNotAvailable => "Menu item is not available",
            ErrorCode::MenuItemNotActive => "Menu item is not active",

            // Table
            ErrorCode::TableNotFound => "Table not found",
            ErrorCode::TableOccupied => "Table is occupied",
            ErrorCode::TableNotAvailable => "Table is not available for the requested time",
            ErrorCode::NoTablesAvailable => "No tables available for the requested time",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::SystemBusy => "System busy, please retry",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),
            9 => Ok(ErrorCode::InvalidStatusTransition),

            // Reservation
            1001 => Ok(ErrorCode::ReservationNotFound),
            1002 => Ok(ErrorCode::ReservationAlreadyConfirmed),
            1003 => Ok(ErrorCode::ReservationAlreadyCancelled),
            1004 => Ok(ErrorCode::ReservationAlreadyCompleted),
            1005 => Ok(ErrorCode::ReservationHasActiveOrder),
            1101 => Ok(ErrorCode::InvalidPartySize),
            1102 => Ok(ErrorCode::InvalidReservationDate),
            1103 => Ok(ErrorCode::ReservationTooEarly),
            1104 => Ok(ErrorCode::ReservationTooFar),
            1105 => Ok(ErrorCode::ReservationExpired),
            1106 => Ok(ErrorCode::InvalidReservationDuration),

            // Order
            2001 => Ok(ErrorCode::OrderNotFound),
            2002 => Ok(ErrorCode::OrderAlreadyCompleted),
            2003 => Ok(ErrorCode::OrderAlreadyCancelled),
            2004 => Ok(ErrorCode::OrderItemNotFound),
            2005 => Ok(ErrorCode::OrderEmpty),
            2006 => Ok(ErrorCode::BillAlreadyCreated),
            2007 => Ok(ErrorCode::InvalidQuantity),

            // Kitchen
            3001 => Ok(ErrorCode::KitchenOrderNotFound),

            // Menu
            4001 => Ok(ErrorCode::MenuItemNotFound),
            4002 => Ok(ErrorCode::MenuItemNotAvailable),
            4003 => Ok(ErrorCode::MenuItemNotActive),

            // Table
            5001 => Ok(ErrorCode::TableNotFound),
            5002 => Ok(ErrorCode::TableOccupied),
            5003 => Ok(ErrorCode::TableNotAvailable),
            5004 => Ok(ErrorCode::NoTablesAvailable),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),
            9404 => Ok(ErrorCode::SystemBusy),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::InvalidStatusTransition.code(), 9);
        assert_eq!(ErrorCode::ReservationNotFound.code(), 1001);
        assert_eq!(ErrorCode::OrderNotFound.code(), 2001);
        assert_eq!(ErrorCode::KitchenOrderNotFound.code(), 3001);
        assert_eq!(ErrorCode::MenuItemNotFound.code(), 4001);
        assert_eq!(ErrorCode::TableNotAvailable.code(), 5003);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::Success.to_string(), "E0000");
        assert_eq!(ErrorCode::TableOccupied.to_string(), "E5002");
        assert_eq!(ErrorCode::ReservationTooFar.to_string(), "E1104");
    }

    #[test]
    fn test_error_code_roundtrip() {
        let codes = [
            ErrorCode::Success,
            ErrorCode::ReservationExpired,
            ErrorCode::BillAlreadyCreated,
            ErrorCode::KitchenOrderNotFound,
            ErrorCode::MenuItemNotActive,
            ErrorCode::NoTablesAvailable,
            ErrorCode::SystemBusy,
        ];
        for code in codes {
            let value: u16 = code.into();
            assert_eq!(ErrorCode::try_from(value), Ok(code));
        }
    }

    #[test]
    fn test_invalid_error_code() {
        assert_eq!(ErrorCode::try_from(6), Err(InvalidErrorCode(6)));
        assert_eq!(ErrorCode::try_from(9999), Err(InvalidErrorCode(9999)));
    }

    #[test]
    fn test_error_code_serde_as_number() {
        let json = serde_json::to_string(&ErrorCode::TableNotAvailable).unwrap();
        assert_eq!(json, "5003");
        let code: ErrorCode = serde_json::from_str("1105").unwrap();
        assert_eq!(code, ErrorCode::ReservationExpired);
        assert!(serde_json::from_str::<ErrorCode>("12345").is_err());
    }

    #[test]
    fn test_messages_not_empty() {
        assert_eq!(ErrorCode::OrderEmpty.message(), "Order is empty");
        assert!(!ErrorCode::InvalidStatusTransition.message().is_empty());
    }
}
