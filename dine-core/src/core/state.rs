//! 运行时状态
//!
//! [`CoreState`] 组合数据库、事件总线、审计 worker 与编排器，可廉价克隆。

use std::path::Path;
use std::sync::Arc;

use crate::audit::{AuditService, AuditWorker};
use crate::core::Config;
use crate::db::DbService;
use crate::message::EventBus;
use crate::utils::{AppError, AppResult, SystemClock};
use crate::workflow::WorkflowOrchestrator;

/// 核心运行时状态
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 启动配置 |
/// | db | SQLite 连接池 + 写入闸门 |
/// | event_bus | 提交后事件广播 |
/// | orchestrator | 所有写操作的唯一入口 |
#[derive(Clone, Debug)]
pub struct CoreState {
    pub config: Config,
    pub db: DbService,
    pub event_bus: EventBus,
    pub orchestrator: Arc<WorkflowOrchestrator>,
}

impl CoreState {
    /// 初始化运行时状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录与数据库 (迁移)
    /// 2. 事件总线
    /// 3. 审计服务 + 后台 worker
    /// 4. 编排器
    ///
    /// 必须在 Tokio 运行时内调用。
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        // 0. Ensure work_dir and the database parent exist
        std::fs::create_dir_all(&config.work_dir).map_err(|e| {
            AppError::config(format!("Failed to create work dir {}: {e}", config.work_dir))
        })?;
        if let Some(parent) = Path::new(&config.database_path).parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::config(format!("Failed to create database dir: {e}"))
            })?;
        }

        // 1. Database
        let db = DbService::new(&config.database_path).await?;

        // 2. Event bus
        let clock = Arc::new(SystemClock);
        let event_bus = EventBus::new(config.event_channel_capacity, clock.clone());

        // 3. Audit log worker
        let (audit, audit_rx) = AuditService::new(config.audit_buffer_size);
        tokio::spawn(AuditWorker::new(db.clone()).run(audit_rx));

        // 4. Orchestrator
        let orchestrator = WorkflowOrchestrator::builder(db.clone())
            .clock(clock)
            .policy(config.reservation.clone())
            .audit(audit)
            .notifier(Arc::new(event_bus.clone()))
            .build();

        tracing::info!(
            work_dir = %config.work_dir,
            environment = %config.environment,
            "Core state initialized"
        );

        Ok(Self {
            config: config.clone(),
            db,
            event_bus,
            orchestrator: Arc::new(orchestrator),
        })
    }

    /// 获取编排器
    pub fn orchestrator(&self) -> &WorkflowOrchestrator {
        &self.orchestrator
    }

    /// 获取事件总线
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// 关闭数据库连接
    pub async fn shutdown(&self) {
        self.db.close().await;
        tracing::info!("Core state shut down");
    }
}
