//! 审计日志类型定义

use serde::{Deserialize, Serialize};

/// 审计实体类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEntityType {
    Reservation,
    Order,
    OrderItem,
    KitchenOrder,
}

impl AuditEntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reservation => "reservation",
            Self::Order => "order",
            Self::OrderItem => "order_item",
            Self::KitchenOrder => "kitchen_order",
        }
    }
}

/// 审计操作类型（枚举，非自由文本）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    // ═══ 预订 ═══
    ReservationCreated,
    ReservationRescheduled,
    ReservationConfirmed,
    ReservationSeated,
    ReservationCompleted,
    ReservationCancelled,
    ReservationNoShow,

    // ═══ 订单 ═══
    OrderCreated,
    OrderItemsAdded,
    /// Items added to a completed order
    OrderReopened,
    OrderItemCancelled,
    OrderItemServed,
    OrderStatusChanged,
    OrderCancelled,

    // ═══ 厨房 ═══
    KitchenOrderStatusChanged,
    KitchenPriorityChanged,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReservationCreated => "reservation_created",
            Self::ReservationRescheduled => "reservation_rescheduled",
            Self::ReservationConfirmed => "reservation_confirmed",
            Self::ReservationSeated => "reservation_seated",
            Self::ReservationCompleted => "reservation_completed",
            Self::ReservationCancelled => "reservation_cancelled",
            Self::ReservationNoShow => "reservation_no_show",
            Self::OrderCreated => "order_created",
            Self::OrderItemsAdded => "order_items_added",
            Self::OrderReopened => "order_reopened",
            Self::OrderItemCancelled => "order_item_cancelled",
            Self::OrderItemServed => "order_item_served",
            Self::OrderStatusChanged => "order_status_changed",
            Self::OrderCancelled => "order_cancelled",
            Self::KitchenOrderStatusChanged => "kitchen_order_status_changed",
            Self::KitchenPriorityChanged => "kitchen_priority_changed",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 审计条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub entity_type: AuditEntityType,
    pub entity_id: i64,
    pub action: AuditAction,
    /// 操作人（系统操作为 None）
    pub actor_id: Option<i64>,
    pub old_status: Option<String>,
    pub new_status: Option<String>,
    /// 结构化详情（JSON object）
    pub metadata: serde_json::Value,
    pub timestamp: i64,
}

impl AuditEntry {
    pub fn new(
        entity_type: AuditEntityType,
        entity_id: i64,
        action: AuditAction,
        timestamp: i64,
    ) -> Self {
        Self {
            entity_type,
            entity_id,
            action,
            actor_id: None,
            old_status: None,
            new_status: None,
            metadata: serde_json::Value::Object(Default::default()),
            timestamp,
        }
    }

    pub fn actor(mut self, actor_id: Option<i64>) -> Self {
        self.actor_id = actor_id;
        self
    }

    /// Record a `from → to` status move
    pub fn transition(mut self, from: impl ToString, to: impl ToString) -> Self {
        self.old_status = Some(from.to_string());
        self.new_status = Some(to.to_string());
        self
    }

    pub fn metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }
}
