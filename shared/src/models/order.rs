//! Order Model

use serde::{Deserialize, Serialize};

use super::kitchen_order::KitchenOrder;
use super::status_strings;

/// Order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Ready,
    Serving,
    Completed,
    Cancelled,
}

status_strings!(OrderStatus {
    Pending => "pending",
    Confirmed => "confirmed",
    Ready => "ready",
    Serving => "serving",
    Completed => "completed",
    Cancelled => "cancelled",
});

impl OrderStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Active orders hold their table
    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }
}

/// Per-item status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum OrderItemStatus {
    #[default]
    Pending,
    Ready,
    Served,
    Cancelled,
}

status_strings!(OrderItemStatus {
    Pending => "pending",
    Ready => "ready",
    Served => "served",
    Cancelled => "cancelled",
});

/// Order entity (订单)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub order_number: String,
    pub table_id: i64,
    /// Set only when the order was spawned by seating a reservation
    pub reservation_id: Option<i64>,
    pub staff_id: Option<i64>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub party_size: i32,
    pub notes: Option<String>,
    pub status: OrderStatus,
    pub total_amount: f64,
    pub final_amount: f64,
    pub confirmed_at: Option<i64>,
    pub completed_at: Option<i64>,
    pub cancelled_at: Option<i64>,
    pub cancellation_reason: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Order line (订单明细)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub menu_item_id: i64,
    /// Catalog name at the time of ordering
    pub item_name: String,
    pub quantity: i32,
    pub unit_price: f64,
    pub total_price: f64,
    pub status: OrderItemStatus,
    pub special_request: Option<String>,
    pub cancellation_reason: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// One requested line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemInput {
    pub menu_item_id: i64,
    pub quantity: i32,
    pub special_request: Option<String>,
}

/// Walk-in order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub table_id: i64,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub party_size: i32,
    pub notes: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItemInput>,
}

/// Order with its lines and kitchen ticket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
    pub kitchen_order: Option<KitchenOrder>,
}

impl OrderDetail {
    /// Lines that still count towards the total
    pub fn live_items(&self) -> impl Iterator<Item = &OrderItem> {
        self.items
            .iter()
            .filter(|item| item.status != OrderItemStatus::Cancelled)
    }

    pub fn item(&self, item_id: i64) -> Option<&OrderItem> {
        self.items.iter().find(|item| item.id == item_id)
    }
}
