//! 统一错误处理
//!
//! The core returns [`AppError`] from every public operation. The code
//! ranges and kinds live in `shared::error`; helpers here build the
//! domain-specific errors with their details attached.

pub use shared::error::{AppError, AppResult, ErrorCategory, ErrorCode, ErrorKind};

/// Illegal state-machine move, raised before anything is written
pub fn invalid_transition(
    entity: &str,
    id: i64,
    from: impl std::fmt::Display,
    to: impl std::fmt::Display,
) -> AppError {
    let (from, to) = (from.to_string(), to.to_string());
    AppError::with_message(
        ErrorCode::InvalidStatusTransition,
        format!("Cannot move {entity} {id} from {from} to {to}"),
    )
    .with_detail("entity", entity)
    .with_detail("id", id)
    .with_detail("from", from)
    .with_detail("to", to)
}

/// Not-found error for a specific entity code
pub fn not_found(code: ErrorCode, id: i64) -> AppError {
    AppError::with_message(code, format!("{} (id {id})", code.message())).with_detail("id", id)
}
