//! Customer Model

use serde::{Deserialize, Serialize};

/// Customer record keyed by phone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}
