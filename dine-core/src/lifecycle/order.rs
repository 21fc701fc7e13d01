//! Order lifecycle
//!
//! ```text
//! pending ──▶ confirmed ──▶ ready ──▶ serving ──▶ completed
//!    │            │           │  └───────────────────▲
//!    └────────────┴───────────┴──▶ cancelled
//!
//! completed ──(add items)──▶ confirmed      重新打开
//! ```
//!
//! Items: `pending ──▶ {ready, cancelled}`, `ready ──▶ served`.

use shared::models::{Order, OrderItem, OrderItemStatus, OrderStatus};

use crate::money::MAX_QUANTITY;
use crate::utils::error::invalid_transition;
use crate::utils::{AppError, AppResult, ErrorCode};

/// Legal targets from `from` (the reopen edge is not listed)
pub fn allowed_targets(from: OrderStatus) -> &'static [OrderStatus] {
    use OrderStatus::*;
    match from {
        Pending => &[Confirmed, Cancelled],
        Confirmed => &[Ready, Cancelled],
        Ready => &[Serving, Completed, Cancelled],
        Serving => &[Completed],
        Completed | Cancelled => &[],
    }
}

pub fn can_transition(from: OrderStatus, to: OrderStatus) -> bool {
    allowed_targets(from).contains(&to)
}

pub fn check_transition(order: &Order, to: OrderStatus) -> AppResult<()> {
    if can_transition(order.status, to) {
        Ok(())
    } else {
        Err(invalid_transition("order", order.id, order.status, to))
    }
}

/// Item sub-state table
pub fn can_item_transition(from: OrderItemStatus, to: OrderItemStatus) -> bool {
    use OrderItemStatus::*;
    matches!(
        (from, to),
        (Pending, Ready) | (Pending, Cancelled) | (Ready, Served)
    )
}

pub fn check_item_transition(item: &OrderItem, to: OrderItemStatus) -> AppResult<()> {
    if can_item_transition(item.status, to) {
        Ok(())
    } else {
        Err(invalid_transition("order item", item.id, item.status, to))
    }
}

/// Mutations guarded by the bill / terminal rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    AddItems,
    CancelItem,
    CancelOrder,
}

/// Outcome of a permitted mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationMode {
    /// Order is open, mutate in place
    InPlace,
    /// Order was completed; adding items reopens it
    Reopen,
}

/// Guard shared by add-items, cancel-item and cancel-order
///
/// Order of checks: cancelled, billed, completed.
pub fn check_mutation(order: &Order, bill_exists: bool, mutation: Mutation) -> AppResult<MutationMode> {
    if order.status == OrderStatus::Cancelled {
        return Err(AppError::new(ErrorCode::OrderAlreadyCancelled).with_detail("order_id", order.id));
    }
    if bill_exists {
        return Err(AppError::new(ErrorCode::BillAlreadyCreated).with_detail("order_id", order.id));
    }
    if order.status == OrderStatus::Completed {
        return match mutation {
            Mutation::AddItems => Ok(MutationMode::Reopen),
            Mutation::CancelItem | Mutation::CancelOrder => Err(
                AppError::new(ErrorCode::OrderAlreadyCompleted).with_detail("order_id", order.id),
            ),
        };
    }
    if mutation == Mutation::CancelOrder {
        check_transition(order, OrderStatus::Cancelled)?;
    }
    Ok(MutationMode::InPlace)
}

/// Quantity bounds for a new line
pub fn check_quantity(quantity: i32) -> AppResult<()> {
    if (1..=MAX_QUANTITY).contains(&quantity) {
        Ok(())
    } else {
        Err(AppError::with_message(
            ErrorCode::InvalidQuantity,
            format!("Quantity must be between 1 and {MAX_QUANTITY}, got {quantity}"),
        )
        .with_detail("quantity", quantity))
    }
}

/// Whether every live item has been served (false for an order with none)
pub fn all_served<'a>(items: impl IntoIterator<Item = &'a OrderItem>) -> bool {
    let mut live = items
        .into_iter()
        .filter(|item| item.status != OrderItemStatus::Cancelled)
        .peekable();
    live.peek().is_some() && live.all(|item| item.status == OrderItemStatus::Served)
}
