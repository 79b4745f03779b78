use chrono::NaiveTime;
use rust_decimal::Decimal;
use thiserror::Error;

/// Configuration errors - fatal at load time
///
/// A registry that fails validation must never reach the scheduler;
/// malformed sessions surface here instead of at tick time.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Session id cannot be empty")]
    EmptySessionId,

    #[error("Duplicate session id: {0}")]
    DuplicateSessionId(String),

    #[error("Session {id}: window start {start} is not before window end {end}")]
    InvalidWindow {
        id: String,
        start: NaiveTime,
        end: NaiveTime,
    },

    #[error("Session {0}: exchange set cannot be empty")]
    EmptyExchangeSet(String),

    #[error("Session {id}: max gross exposure must be in (0, 1], got {value}")]
    InvalidExposure { id: String, value: Decimal },

    #[error("Session {id}: max order notional must be positive, got {value}")]
    InvalidNotional { id: String, value: Decimal },

    #[error("Session {0}: weekday mask cannot be empty")]
    EmptyWeekdayMask(String),

    #[error("Unknown weekday: {0}")]
    UnknownWeekday(String),

    #[error("Invalid registry JSON: {0}")]
    Json(#[from] serde_json::Error),
}
