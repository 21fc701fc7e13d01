//! Dine Core - 餐厅预订 / 点单 / 后厨编排核心
//!
//! # 架构概述
//!
//! - **可用性** (`availability`): 桌台筛选、时间冲突检测与排序
//! - **生命周期** (`lifecycle`): 预订、订单、后厨单的状态机与守卫
//! - **编排器** (`workflow`): 跨实体原子操作，提交后派发审计与事件
//! - **数据库** (`db`): SQLite (sqlx) 存储与迁移
//! - **审计** (`audit`): mpsc 队列 + 后台 worker
//! - **消息** (`message`): broadcast 事件总线
//!
//! # 模块结构
//!
//! ```text
//! dine-core/src/
//! ├── core/          # 配置、运行时状态
//! ├── availability/  # 桌台可用性
//! ├── lifecycle/     # 状态机
//! ├── workflow/      # 编排器
//! ├── services/      # 菜单 / 账单 / 顾客端口
//! ├── audit/         # 审计日志
//! ├── message/       # 事件总线
//! ├── db/            # 数据库层
//! ├── money.rs       # 金额计算
//! └── utils/         # 错误、时钟、日志、校验
//! ```

pub mod audit;
pub mod availability;
pub mod core;
pub mod db;
pub mod lifecycle;
pub mod message;
pub mod money;
pub mod services;
pub mod utils;
pub mod workflow;

// Re-export 公共类型
pub use crate::core::{Config, CoreState, ReservationPolicy};
pub use db::DbService;
pub use message::{EventBus, EventNotifier};
pub use utils::{AppError, AppResult, Clock, ErrorCategory, ErrorCode, FixedClock, SystemClock};
pub use workflow::{SeatedReservation, WorkflowOrchestrator};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 加载 .env 并初始化日志
pub fn setup_environment(config: &Config) -> anyhow::Result<()> {
    std::fs::create_dir_all(&config.log_dir)?;
    init_logger_with_file(
        Some(&config.log_level),
        config.log_json,
        Some(&config.log_dir),
    );
    Ok(())
}
