use std::path::PathBuf;

use shared::util::{DAY_MS, MINUTE_MS};

/// 事件广播默认容量
pub const DEFAULT_EVENT_CHANNEL_CAPACITY: usize = 1024;

/// 审计队列默认容量
pub const DEFAULT_AUDIT_BUFFER_SIZE: usize = 256;

/// Booking rules enforced by the orchestrator
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | MIN_PARTY_SIZE | 1 | 最小人数 |
/// | MAX_PARTY_SIZE | 20 | 最大人数 |
/// | MIN_ADVANCE_BOOKING_MINUTES | 30 | 最短提前预订时间 |
/// | MAX_ADVANCE_BOOKING_DAYS | 90 | 最长提前预订天数 |
/// | DEFAULT_RESERVATION_DURATION | 120 | 默认用餐时长(分钟) |
/// | MAX_RESERVATION_DURATION | 480 | 最长用餐时长(分钟) |
/// | RESERVATION_GRACE_PERIOD_MINUTES | 15 | 迟到宽限期(分钟) |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationPolicy {
    pub min_party_size: i32,
    pub max_party_size: i32,
    pub min_advance_minutes: i64,
    pub max_advance_days: i64,
    pub default_duration_minutes: i32,
    pub max_duration_minutes: i32,
    pub grace_period_minutes: i64,
}

impl Default for ReservationPolicy {
    fn default() -> Self {
        Self {
            min_party_size: 1,
            max_party_size: 20,
            min_advance_minutes: 30,
            max_advance_days: 90,
            default_duration_minutes: 120,
            max_duration_minutes: 480,
            grace_period_minutes: 15,
        }
    }
}

impl ReservationPolicy {
    /// 从环境变量加载，未设置时使用默认值
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            min_party_size: env_or("MIN_PARTY_SIZE", defaults.min_party_size),
            max_party_size: env_or("MAX_PARTY_SIZE", defaults.max_party_size),
            min_advance_minutes: env_or("MIN_ADVANCE_BOOKING_MINUTES", defaults.min_advance_minutes),
            max_advance_days: env_or("MAX_ADVANCE_BOOKING_DAYS", defaults.max_advance_days),
            default_duration_minutes: env_or(
                "DEFAULT_RESERVATION_DURATION",
                defaults.default_duration_minutes,
            ),
            max_duration_minutes: env_or("MAX_RESERVATION_DURATION", defaults.max_duration_minutes),
            grace_period_minutes: env_or(
                "RESERVATION_GRACE_PERIOD_MINUTES",
                defaults.grace_period_minutes,
            ),
        }
    }

    pub fn min_advance_ms(&self) -> i64 {
        self.min_advance_minutes * MINUTE_MS
    }

    pub fn max_advance_ms(&self) -> i64 {
        self.max_advance_days * DAY_MS
    }

    pub fn grace_period_ms(&self) -> i64 {
        self.grace_period_minutes * MINUTE_MS
    }
}

/// 核心配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/dine | 工作目录 |
/// | DATABASE_PATH | {WORK_DIR}/dine.db | SQLite 文件 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | {WORK_DIR}/logs | 日志目录(存在时写文件) |
/// | LOG_JSON | false | JSON 日志 |
/// | ENVIRONMENT | development | 运行环境 |
/// | EVENT_CHANNEL_CAPACITY | 1024 | 事件广播容量 |
/// | AUDIT_BUFFER_SIZE | 256 | 审计队列容量 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/dine MAX_PARTY_SIZE=12 cargo run -p dine-core
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub database_path: String,
    pub log_level: String,
    pub log_dir: String,
    pub log_json: bool,
    /// development | staging | production
    pub environment: String,
    pub event_channel_capacity: usize,
    pub audit_buffer_size: usize,
    pub reservation: ReservationPolicy,
}

impl Config {
    /// 从环境变量加载配置
    pub fn from_env() -> Self {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/dine".into());
        Self::with_work_dir(work_dir)
    }

    /// 指定工作目录，其余项仍读取环境变量
    ///
    /// 常用于测试场景
    pub fn with_work_dir(work_dir: impl Into<String>) -> Self {
        let work_dir = work_dir.into();
        let base = PathBuf::from(&work_dir);
        Self {
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| base.join("dine.db").to_string_lossy().into_owned()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR")
                .unwrap_or_else(|_| base.join("logs").to_string_lossy().into_owned()),
            log_json: env_or("LOG_JSON", false),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            event_channel_capacity: env_or("EVENT_CHANNEL_CAPACITY", DEFAULT_EVENT_CHANNEL_CAPACITY),
            audit_buffer_size: env_or("AUDIT_BUFFER_SIZE", DEFAULT_AUDIT_BUFFER_SIZE),
            reservation: ReservationPolicy::from_env(),
            work_dir,
        }
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
