use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Accepted contact requests per client address per window.
pub const RATE_LIMIT_MAX_REQUESTS: u64 = 5;
/// Rate-limit window, 15 minutes.
pub const RATE_LIMIT_WINDOW_SECS: u64 = 15 * 60;
/// Idle limiter entries are evicted after this long without a request.
pub const LIMITER_IDLE_TTL_SECS: u64 = 2 * RATE_LIMIT_WINDOW_SECS;

/// Submissions older than this are removed by the sweep.
pub const SUBMISSION_RETENTION_HOURS: i64 = 24;
/// Cadence of the retention sweep.
pub const SWEEP_INTERVAL_SECS: u64 = 60 * 60;

/// Upper bound on a single outbound email send.
pub const MAIL_SEND_TIMEOUT_SECS: u64 = 30;
/// Maximum pooled SMTP connections.
pub const MAIL_POOL_MAX_SIZE: u32 = 5;

pub const RATE_LIMIT_MESSAGE: &str =
    "Too many requests from this address. Please try again later.";
