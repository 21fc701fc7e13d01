//! Money calculation utilities using rust_decimal for precision
//!
//! Prices are stored as `f64`; every sum goes through `Decimal` and is
//! rounded to 2 decimal places (half away from zero) on the way back.

use rust_decimal::prelude::*;
use shared::models::{OrderItem, OrderItemStatus};

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed quantity per line
pub const MAX_QUANTITY: i32 = 9999;

#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    let rounded =
        value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded.to_f64().unwrap_or_else(|| {
        tracing::error!(value = %rounded, "Decimal out of f64 range, defaulting to zero");
        0.0
    })
}

/// `unit_price × quantity`
pub fn line_total(unit_price: f64, quantity: i32) -> f64 {
    to_f64(to_decimal(unit_price) * Decimal::from(quantity))
}

/// Sum of `total_price` over lines that are not cancelled
pub fn order_total<'a>(items: impl IntoIterator<Item = &'a OrderItem>) -> f64 {
    let sum = items
        .into_iter()
        .filter(|item| item.status != OrderItemStatus::Cancelled)
        .fold(Decimal::ZERO, |acc, item| acc + to_decimal(item.total_price));
    to_f64(sum)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(total_price: f64, status: OrderItemStatus) -> OrderItem {
        OrderItem {
            id: 1,
            order_id: 1,
            menu_item_id: 1,
            item_name: "Paella".to_string(),
            quantity: 1,
            unit_price: total_price,
            total_price,
            status,
            special_request: None,
            cancellation_reason: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_line_total_is_exact() {
        assert_eq!(line_total(0.1, 3), 0.3);
        assert_eq!(line_total(19.99, 3), 59.97);
        assert_eq!(line_total(12.5, 4), 50.0);
    }

    #[test]
    fn test_order_total_skips_cancelled() {
        let items = vec![
            item(100.0, OrderItemStatus::Cancelled),
            item(50.0, OrderItemStatus::Pending),
            item(0.1, OrderItemStatus::Ready),
            item(0.2, OrderItemStatus::Served),
        ];
        assert_eq!(order_total(&items), 50.3);
        assert_eq!(order_total(&Vec::<OrderItem>::new()), 0.0);
    }
}
