//! 事件消息类型定义
//!
//! Notifications published after a transaction commits. Payloads carry
//! denormalized fields (reservation code, order number, table id) so that
//! kitchen and waiter displays never need a follow-up query.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{
    KitchenOrderStatus, KitchenPriority, OrderItemStatus, OrderStatus, ReservationStatus,
    TableStatus,
};

/// Reservation snapshot carried by creation / reschedule events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationPayload {
    pub reservation_id: i64,
    pub code: String,
    pub table_id: i64,
    pub party_size: i32,
    pub start_time: i64,
    pub duration_minutes: i32,
    pub status: ReservationStatus,
}

/// Reservation status change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationTransitionPayload {
    pub reservation_id: i64,
    pub code: String,
    pub table_id: i64,
    pub from: ReservationStatus,
    pub to: ReservationStatus,
    /// Order spawned by seating
    pub order_id: Option<i64>,
    pub order_number: Option<String>,
}

/// Order snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPayload {
    pub order_id: i64,
    pub order_number: String,
    pub table_id: i64,
    pub reservation_id: Option<i64>,
    pub status: OrderStatus,
    pub total_amount: f64,
}

/// Order status change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderTransitionPayload {
    pub order_id: i64,
    pub order_number: String,
    pub table_id: i64,
    pub from: OrderStatus,
    pub to: OrderStatus,
}

/// Lines appended to an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemsAddedPayload {
    pub order_id: i64,
    pub order_number: String,
    pub table_id: i64,
    pub item_ids: Vec<i64>,
    /// The order was completed and has been reopened
    pub reopened: bool,
    pub total_amount: f64,
}

/// Single line change (cancelled / served)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemPayload {
    pub order_id: i64,
    pub order_number: String,
    pub table_id: i64,
    pub item_id: i64,
    pub item_name: String,
    pub status: OrderItemStatus,
    pub total_amount: f64,
}

/// Whole order cancelled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCancelledPayload {
    pub order_id: i64,
    pub order_number: String,
    pub table_id: i64,
    pub reason: Option<String>,
}

/// Kitchen ticket snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitchenOrderPayload {
    pub kitchen_order_id: i64,
    pub order_id: i64,
    pub order_number: String,
    pub table_id: i64,
    pub status: KitchenOrderStatus,
    pub priority: KitchenPriority,
    pub staff_id: Option<i64>,
}

/// Kitchen ticket status change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitchenTransitionPayload {
    pub kitchen_order_id: i64,
    pub order_id: i64,
    pub order_number: String,
    pub table_id: i64,
    pub from: KitchenOrderStatus,
    pub to: KitchenOrderStatus,
}

/// Table occupancy flip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableStatusPayload {
    pub table_id: i64,
    pub table_name: String,
    pub status: TableStatus,
}

/// 生命周期事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "snake_case")]
pub enum DiningEvent {
    ReservationCreated(ReservationPayload),
    ReservationRescheduled(ReservationPayload),
    ReservationStatusChanged(ReservationTransitionPayload),
    OrderCreated(OrderPayload),
    OrderStatusChanged(OrderTransitionPayload),
    OrderItemsAdded(OrderItemsAddedPayload),
    OrderItemCancelled(OrderItemPayload),
    OrderItemServed(OrderItemPayload),
    OrderCancelled(OrderCancelledPayload),
    KitchenOrderCreated(KitchenOrderPayload),
    KitchenOrderStatusChanged(KitchenTransitionPayload),
    /// Ticket marked ready; items and order cascaded
    KitchenOrderDone(KitchenOrderPayload),
    TableStatusChanged(TableStatusPayload),
}

impl DiningEvent {
    /// Event name as seen by subscribers
    pub fn name(&self) -> &'static str {
        match self {
            Self::ReservationCreated(_) => "reservation_created",
            Self::ReservationRescheduled(_) => "reservation_rescheduled",
            Self::ReservationStatusChanged(_) => "reservation_status_changed",
            Self::OrderCreated(_) => "order_created",
            Self::OrderStatusChanged(_) => "order_status_changed",
            Self::OrderItemsAdded(_) => "order_items_added",
            Self::OrderItemCancelled(_) => "order_item_cancelled",
            Self::OrderItemServed(_) => "order_item_served",
            Self::OrderCancelled(_) => "order_cancelled",
            Self::KitchenOrderCreated(_) => "kitchen_order_created",
            Self::KitchenOrderStatusChanged(_) => "kitchen_order_status_changed",
            Self::KitchenOrderDone(_) => "kitchen_order_done",
            Self::TableStatusChanged(_) => "table_status_changed",
        }
    }
}

/// Envelope handed to subscribers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiningMessage {
    pub event_id: Uuid,
    /// Publish time (Unix millis)
    pub timestamp: i64,
    #[serde(flatten)]
    pub event: DiningEvent,
}

impl DiningMessage {
    pub fn new(event: DiningEvent, timestamp: i64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            timestamp,
            event,
        }
    }

    pub fn name(&self) -> &'static str {
        self.event.name()
    }
}
