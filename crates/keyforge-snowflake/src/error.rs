use jiff::Timestamp;
use thiserror::Error;

/// Errors returned by Snowflake initialization and ID generation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    #[error("Datacenter ID must be between 0 and {max_datacenter_id}, got {datacenter_id}")]
    InvalidDatacenterId {
        datacenter_id: u8,
        max_datacenter_id: u8,
    },
    #[error("Worker ID must be between 0 and {max_worker_id}, got {worker_id}")]
    InvalidWorkerId { worker_id: u8, max_worker_id: u8 },
    #[error("epoch is ahead of current clock time: epoch={epoch}, now={now}")]
    EpochAhead { epoch: Timestamp, now: Timestamp },
    #[error("overtime limit")]
    OverTimeLimit,
    #[error("clock target out of range: {millisecond}ms")]
    ClockOutOfRange { millisecond: i64 },
    #[error("generator state lock is poisoned")]
    StatePoisoned,
}

/// Errors returned when reading a [`SnowflakeId`](crate::SnowflakeId) from its
/// decimal string form.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseIdError {
    #[error("invalid snowflake id {input:?}: {reason}")]
    InvalidDigits { input: String, reason: String },
    #[error("invalid snowflake id {value}: top bit must be clear")]
    SignBitSet { value: u64 },
}
