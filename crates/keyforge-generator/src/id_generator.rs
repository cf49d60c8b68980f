use crate::error::ConfigError;
use jiff::Timestamp;
use keyforge_snowflake::{
    Clock, Error, ParseIdError, Snowflake, SnowflakeId, SnowflakeParts, SnowflakeSettings,
    SystemClock, DEFAULT_EPOCH,
};
use tracing::info;

/// Primary key source handed to entity factories.
///
/// Ids cross this boundary as decimal strings, so callers whose numeric types
/// hold fewer than 64 bits of integer precision never truncate them.
pub struct IdGenerator<C: Clock = SystemClock> {
    inner: Snowflake<C>,
}

impl IdGenerator<SystemClock> {
    /// Creates a generator backed by the system clock.
    ///
    /// `epoch_millis` defaults to [`DEFAULT_EPOCH`]; only generators sharing
    /// an epoch produce comparable ids.
    pub fn new(
        datacenter_id: u8,
        worker_id: u8,
        epoch_millis: Option<i64>,
    ) -> Result<Self, ConfigError> {
        Self::with_clock(datacenter_id, worker_id, epoch_millis, SystemClock)
    }
}

impl<C: Clock> IdGenerator<C> {
    pub fn with_clock(
        datacenter_id: u8,
        worker_id: u8,
        epoch_millis: Option<i64>,
        clock: C,
    ) -> Result<Self, ConfigError> {
        let epoch = match epoch_millis {
            Some(epoch_millis) => Timestamp::from_millisecond(epoch_millis)
                .map_err(|_| ConfigError::InvalidEpoch { epoch_millis })?,
            None => DEFAULT_EPOCH,
        };

        let settings = SnowflakeSettings::builder()
            .datacenter_id(datacenter_id)
            .worker_id(worker_id)
            .epoch(epoch)
            .build();
        let inner = Snowflake::with_clock(settings, clock)?;

        info!(
            datacenter_id,
            worker_id,
            epoch_millis = epoch.as_millisecond(),
            "id generator ready"
        );

        Ok(Self { inner })
    }

    /// Returns the next id as a decimal string.
    pub fn generate_id(&self) -> Result<String, Error> {
        self.next_id().map(|id| id.to_string())
    }

    /// Returns the next id in its typed form.
    pub fn next_id(&self) -> Result<SnowflakeId, Error> {
        self.inner.next_id()
    }

    /// Decodes a decimal id string.
    ///
    /// Any 64-bit value decodes, including output of
    /// [`IdGenerator::reconstruct`] with oversized fields; only non-digit input
    /// fails. The returned `timestamp` is relative to the epoch; use
    /// [`IdGenerator::created_at`] for the absolute time.
    pub fn parse(&self, id: &str) -> Result<SnowflakeParts, ParseIdError> {
        SnowflakeId::from_decimal(id).map(|id| self.inner.parse(id))
    }

    /// Encodes the fields into a decimal id string. Fields are not range
    /// checked.
    pub fn reconstruct(
        &self,
        timestamp: u64,
        datacenter_id: u8,
        worker_id: u8,
        sequence: u16,
    ) -> String {
        self.inner
            .reconstruct(timestamp, datacenter_id, worker_id, sequence)
            .to_string()
    }

    /// Absolute creation time of `id` under this generator's epoch.
    pub fn created_at(&self, id: SnowflakeId) -> Result<Timestamp, Error> {
        self.inner.timestamp_of(id)
    }

    pub fn epoch(&self) -> Timestamp {
        self.inner.epoch()
    }

    pub fn datacenter_id(&self) -> u8 {
        self.inner.datacenter_id()
    }

    pub fn worker_id(&self) -> u8 {
        self.inner.worker_id()
    }
}

impl<C: Clock> From<Snowflake<C>> for IdGenerator<C> {
    fn from(inner: Snowflake<C>) -> Self {
        Self { inner }
    }
}
