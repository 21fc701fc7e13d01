//! 核心模块 - 配置与运行时状态
//!
//! - [`Config`] - 环境变量配置
//! - [`ReservationPolicy`] - 预订规则
//! - [`CoreState`] - 数据库、事件总线、审计与编排器的组合

pub mod config;
pub mod state;

pub use config::{Config, ReservationPolicy};
pub use state::CoreState;
