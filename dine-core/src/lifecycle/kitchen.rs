//! Kitchen order lifecycle
//!
//! ```text
//! pending ──▶ acknowledged ──▶ preparing ──▶ ready ──▶ completed
//!    │  └──────────────────────────▲           ▲
//!    │                             └───────────┘
//!    └──────────────┴────────────────┴──▶ cancelled
//! ```
//!
//! `mark_ready` is lenient: any non-terminal ticket can be marked ready.

use shared::models::{KitchenOrder, KitchenOrderStatus};

use crate::utils::error::invalid_transition;
use crate::utils::AppResult;

pub fn allowed_targets(from: KitchenOrderStatus) -> &'static [KitchenOrderStatus] {
    use KitchenOrderStatus::*;
    match from {
        Pending => &[Acknowledged, Preparing, Cancelled],
        Acknowledged => &[Preparing, Ready, Cancelled],
        Preparing => &[Ready, Cancelled],
        Ready => &[Completed],
        Completed | Cancelled => &[],
    }
}

pub fn can_transition(from: KitchenOrderStatus, to: KitchenOrderStatus) -> bool {
    allowed_targets(from).contains(&to)
}

pub fn check_transition(ticket: &KitchenOrder, to: KitchenOrderStatus) -> AppResult<()> {
    if can_transition(ticket.status, to) {
        Ok(())
    } else {
        Err(invalid_transition("kitchen order", ticket.id, ticket.status, to))
    }
}

pub fn check_mark_ready(ticket: &KitchenOrder) -> AppResult<()> {
    if ticket.status.is_terminal() {
        Err(invalid_transition(
            "kitchen order",
            ticket.id,
            ticket.status,
            KitchenOrderStatus::Ready,
        ))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::ErrorCode;
    use KitchenOrderStatus::*;

    const ALL: [KitchenOrderStatus; 6] = [Pending, Acknowledged, Preparing, Ready, Completed, Cancelled];

    fn ticket(status: KitchenOrderStatus) -> KitchenOrder {
        KitchenOrder {
            id: 11,
            order_id: 7,
            status,
            priority: Default::default(),
            staff_id: None,
            station: None,
            started_at: None,
            completed_at: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_transition_table() {
        let legal = [
            (Pending, Acknowledged),
            (Pending, Preparing),
            (Pending, Cancelled),
            (Acknowledged, Preparing),
            (Acknowledged, Ready),
            (Acknowledged, Cancelled),
            (Preparing, Ready),
            (Preparing, Cancelled),
            (Ready, Completed),
        ];
        for from in ALL {
            for to in ALL {
                let expected = legal.contains(&(from, to));
                assert_eq!(can_transition(from, to), expected, "{from} -> {to}");
                if !expected {
                    assert_eq!(
                        check_transition(&ticket(from), to).unwrap_err().code,
                        ErrorCode::InvalidStatusTransition
                    );
                }
            }
        }
    }

    #[test]
    fn test_mark_ready_from_any_open_status() {
        for status in [Pending, Acknowledged, Preparing, Ready] {
            assert!(check_mark_ready(&ticket(status)).is_ok(), "{status}");
        }
        for status in [Completed, Cancelled] {
            assert_eq!(
                check_mark_ready(&ticket(status)).unwrap_err().code,
                ErrorCode::InvalidStatusTransition
            );
        }
    }
}
