//! Reservation lifecycle
//!
//! ```text
//! pending ──▶ confirmed ──▶ seated ──▶ completed
//!    │            │  └──▶ no_show
//!    └────────────┴──────────┴──────▶ cancelled
//! ```

use shared::models::{Reservation, ReservationStatus};

use crate::utils::error::invalid_transition;
use crate::utils::{AppError, AppResult, ErrorCode};

/// Legal targets from `from`
pub fn allowed_targets(from: ReservationStatus) -> &'static [ReservationStatus] {
    use ReservationStatus::*;
    match from {
        Pending => &[Confirmed, Cancelled],
        Confirmed => &[Seated, Cancelled, NoShow],
        Seated => &[Completed, Cancelled],
        Completed | Cancelled | NoShow => &[],
    }
}

pub fn can_transition(from: ReservationStatus, to: ReservationStatus) -> bool {
    allowed_targets(from).contains(&to)
}

/// Check `reservation.status → to`
///
/// Terminal sources report the specific conflict, confirming twice reports
/// `ReservationAlreadyConfirmed`.
pub fn check_transition(reservation: &Reservation, to: ReservationStatus) -> AppResult<()> {
    let from = reservation.status;
    if can_transition(from, to) {
        return Ok(());
    }
    let err = match from {
        ReservationStatus::Cancelled => AppError::new(ErrorCode::ReservationAlreadyCancelled),
        ReservationStatus::Completed => AppError::new(ErrorCode::ReservationAlreadyCompleted),
        ReservationStatus::Confirmed if to == ReservationStatus::Confirmed => {
            AppError::new(ErrorCode::ReservationAlreadyConfirmed)
        }
        _ => invalid_transition("reservation", reservation.id, from, to),
    };
    Err(err.with_detail("reservation_id", reservation.id))
}

/// Seating guard: legal transition and not past `start + grace`
pub fn check_seat(reservation: &Reservation, now: i64, grace_period_ms: i64) -> AppResult<()> {
    check_transition(reservation, ReservationStatus::Seated)?;
    if now > reservation.start_time + grace_period_ms {
        return Err(AppError::new(ErrorCode::ReservationExpired)
            .with_detail("reservation_id", reservation.id)
            .with_detail("start_time", reservation.start_time)
            .with_detail("now", now));
    }
    Ok(())
}

/// Only upcoming reservations can be edited
pub fn check_editable(reservation: &Reservation) -> AppResult<()> {
    match reservation.status {
        ReservationStatus::Pending | ReservationStatus::Confirmed => Ok(()),
        ReservationStatus::Cancelled => Err(AppError::new(ErrorCode::ReservationAlreadyCancelled)),
        ReservationStatus::Completed => Err(AppError::new(ErrorCode::ReservationAlreadyCompleted)),
        status => Err(AppError::with_message(
            ErrorCode::InvalidStatusTransition,
            format!("Reservation {} is {status} and can no longer be changed", reservation.id),
        )),
    }
}
