use std::sync::atomic::{AtomicU16, Ordering};

/// 一分钟的毫秒数
pub const MINUTE_MS: i64 = 60_000;

/// 一天的毫秒数
pub const DAY_MS: i64 = 24 * 60 * MINUTE_MS;

/// Prefix of every reservation code
pub const RESERVATION_CODE_PREFIX: &str = "RSV";

/// Random part of a reservation code
const RESERVATION_CODE_RANDOM_LEN: usize = 7;

static SNOWFLAKE_SEQ: AtomicU16 = AtomicU16::new(0);

/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a Snowflake-style i64 for use as resource ID.
///
/// Layout (53 bits, fits in JavaScript's Number.MAX_SAFE_INTEGER):
///   - 41 bits: milliseconds since 2024-01-01 UTC (~69 years)
///   - 12 bits: process-wide rolling sequence (4096 ids per ms)
pub fn snowflake_id() -> i64 {
    // Custom epoch: 2024-01-01 00:00:00 UTC
    const EPOCH_MS: i64 = 1_704_067_200_000;
    let now = now_millis();
    let ts = (now - EPOCH_MS) & 0x1FF_FFFF_FFFF; // 41 bits
    let seq = i64::from(SNOWFLAKE_SEQ.fetch_add(1, Ordering::Relaxed) & 0x0FFF);
    (ts << 12) | seq
}

/// Human-readable reservation code, e.g. `RSV7K2M9QA`
pub fn reservation_code() -> String {
    use rand::Rng;
    use rand::distributions::Alphanumeric;

    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(RESERVATION_CODE_RANDOM_LEN)
        .map(|c| char::from(c).to_ascii_uppercase())
        .collect();
    format!("{RESERVATION_CODE_PREFIX}{suffix}")
}

/// Interval end for a `[start, start + duration)` booking
#[inline]
pub fn interval_end(start: i64, duration_minutes: i32) -> i64 {
    start + i64::from(duration_minutes) * MINUTE_MS
}

/// Half-open interval intersection: `[a0, a1)` and `[b0, b1)` overlap iff `a0 < b1 && b0 < a1`
#[inline]
pub fn intervals_overlap(a_start: i64, a_end: i64, b_start: i64, b_end: i64) -> bool {
    a_start < b_end && b_start < a_end
}
