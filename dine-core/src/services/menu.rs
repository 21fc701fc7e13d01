//! 菜单目录端口

use std::collections::HashMap;

use async_trait::async_trait;
use shared::models::MenuItem;
use sqlx::SqlitePool;

use crate::db::repository::menu_item;
use crate::utils::AppResult;

/// Catalog lookups used to validate and price order lines
#[async_trait]
pub trait MenuCatalog: Send + Sync {
    /// Items keyed by id; unknown ids are simply absent
    async fn lookup_items(&self, ids: &[i64]) -> AppResult<HashMap<i64, MenuItem>>;
}

/// `menu_item` table backed catalog
#[derive(Debug, Clone)]
pub struct SqliteMenuCatalog {
    pool: SqlitePool,
}

impl SqliteMenuCatalog {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MenuCatalog for SqliteMenuCatalog {
    async fn lookup_items(&self, ids: &[i64]) -> AppResult<HashMap<i64, MenuItem>> {
        let mut unique = ids.to_vec();
        unique.sort_unstable();
        unique.dedup();

        let mut conn = self.pool.acquire().await?;
        let items = menu_item::find_by_ids(&mut conn, &unique).await?;
        Ok(items.into_iter().map(|item| (item.id, item)).collect())
    }
}
