//! 顾客目录端口

use async_trait::async_trait;
use sqlx::SqliteConnection;

use crate::db::repository::customer;
use crate::utils::{AppResult, Clock};
use std::sync::Arc;

/// Resolves a contact to a customer id, creating the customer on first sight
///
/// Runs on the caller's connection so the write commits or rolls back with
/// the booking that needed it.
#[async_trait]
pub trait CustomerDirectory: Send + Sync {
    async fn find_or_create(
        &self,
        conn: &mut SqliteConnection,
        name: &str,
        phone: &str,
        email: Option<&str>,
    ) -> AppResult<i64>;
}

/// `customer` table backed directory, keyed by phone
pub struct SqliteCustomerDirectory {
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for SqliteCustomerDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteCustomerDirectory").finish_non_exhaustive()
    }
}

impl SqliteCustomerDirectory {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

#[async_trait]
impl CustomerDirectory for SqliteCustomerDirectory {
    async fn find_or_create(
        &self,
        conn: &mut SqliteConnection,
        name: &str,
        phone: &str,
        email: Option<&str>,
    ) -> AppResult<i64> {
        // 已存在且资料一致时不写库
        if let Some(existing) = customer::find_by_phone(&mut *conn, phone).await? {
            let email_matches = email.is_none() || existing.email.as_deref() == email;
            if existing.name == name && email_matches {
                return Ok(existing.id);
            }
        }

        let saved =
            customer::upsert_by_phone(&mut *conn, name, phone, email, self.clock.now_millis()).await?;
        tracing::debug!(customer_id = saved.id, "Customer resolved");
        Ok(saved.id)
    }
}
