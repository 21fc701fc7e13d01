//! Kitchen Order Model

use serde::{Deserialize, Serialize};

use super::status_strings;

/// Kitchen ticket status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum KitchenOrderStatus {
    #[default]
    Pending,
    Acknowledged,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

status_strings!(KitchenOrderStatus {
    Pending => "pending",
    Acknowledged => "acknowledged",
    Preparing => "preparing",
    Ready => "ready",
    Completed => "completed",
    Cancelled => "cancelled",
});

impl KitchenOrderStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

/// Kitchen priority, `urgent` first in the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum KitchenPriority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

status_strings!(KitchenPriority {
    Low => "low",
    Normal => "normal",
    High => "high",
    Urgent => "urgent",
});

impl KitchenPriority {
    /// Queue weight, higher is served first
    pub fn weight(&self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Normal => 1,
            Self::High => 2,
            Self::Urgent => 3,
        }
    }
}

/// Kitchen ticket (厨房单), one per order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct KitchenOrder {
    pub id: i64,
    pub order_id: i64,
    pub status: KitchenOrderStatus,
    pub priority: KitchenPriority,
    pub staff_id: Option<i64>,
    pub station: Option<String>,
    pub started_at: Option<i64>,
    pub completed_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}
