//! 工具模块 - 通用工具函数和类型
//!
//! - [`AppError`] - 应用错误类型 (from shared::error)
//! - [`Clock`] - 可注入的时钟
//! - 日志、输入校验

pub mod error;
pub mod logger;
pub mod time;
pub mod validation;

pub use error::{AppError, AppResult, ErrorCategory, ErrorCode, ErrorKind};
pub use time::{Clock, FixedClock, SystemClock};
