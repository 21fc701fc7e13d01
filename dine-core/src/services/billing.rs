//! 账单端口

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::db::repository::bill;
use crate::utils::AppResult;

/// Billing collaborator: once a bill exists the order is frozen
#[async_trait]
pub trait BillingModule: Send + Sync {
    async fn bill_exists_for(&self, order_id: i64) -> AppResult<bool>;
}

/// `bill` table backed billing check
#[derive(Debug, Clone)]
pub struct SqliteBilling {
    pool: SqlitePool,
}

impl SqliteBilling {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BillingModule for SqliteBilling {
    async fn bill_exists_for(&self, order_id: i64) -> AppResult<bool> {
        let mut conn = self.pool.acquire().await?;
        Ok(bill::exists_for_order(&mut conn, order_id).await?)
    }
}
