//! 状态机
//!
//! Pure transition tables and guards for the three coupled entities. Each
//! module only knows its own entity; cascades across entities live in
//! [`crate::workflow`].
//!
//! Guards return the precise [`ErrorCode`](crate::utils::ErrorCode) and never
//! touch storage, so the orchestrator can run them before its first write.

pub mod kitchen;
pub mod order;
pub mod reservation;
