//! 服务层 - 外部协作方端口
//!
//! # 服务列表
//!
//! - [`MenuCatalog`] - 菜单查询（名称/价格/可售状态）
//! - [`BillingModule`] - 账单存在性检查
//! - [`CustomerDirectory`] - 顾客查找或建档
//!
//! Each port ships a SQLite-backed default so the core runs standalone;
//! integrators inject their own `Arc<dyn …>` into the orchestrator.

pub mod billing;
pub mod customer;
pub mod menu;

pub use billing::{BillingModule, SqliteBilling};
pub use customer::{CustomerDirectory, SqliteCustomerDirectory};
pub use menu::{MenuCatalog, SqliteMenuCatalog};
