use thiserror::Error;

/// Errors raised while turning configuration into an [`IdGenerator`](crate::IdGenerator).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error(transparent)]
    Snowflake(#[from] keyforge_snowflake::Error),
    #[error("epoch {epoch_millis}ms is not a representable timestamp")]
    InvalidEpoch { epoch_millis: i64 },
}
