use crate::{
    clock::{Clock, SystemClock},
    error::Error,
    layout::{MAX_DATACENTER_ID, MAX_SEQUENCE, MAX_TIMESTAMP, MAX_WORKER_ID},
    SnowflakeId, SnowflakeParts,
};
use jiff::Timestamp;
use std::sync::Mutex;
use tracing::{debug, warn};
use typed_builder::TypedBuilder;

/// Default epoch: 2010-11-04T01:42:54.657Z, the Twitter snowflake epoch.
///
/// Ids are only comparable between generators sharing the same epoch.
pub const DEFAULT_EPOCH: Timestamp = Timestamp::constant(1_288_834_974, 657_000_000);

/// Configures a Snowflake generator instance.
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct SnowflakeSettings {
    /// Datacenter index in the range `[0, 31]`.
    #[builder]
    pub datacenter_id: u8,
    /// Worker index in the range `[0, 31]`, unique within the datacenter.
    #[builder]
    pub worker_id: u8,
    /// Zero point for the 41-bit timestamp field.
    ///
    /// Only millisecond precision is kept.
    #[builder(default = DEFAULT_EPOCH)]
    pub epoch: Timestamp,
}

#[derive(Debug, Default)]
struct GeneratorState {
    /// Millisecond bucket of the last issued id.
    last_timestamp: Option<i64>,
    sequence: u16,
}

/// Snowflake ID generator with wait-on-overflow and wait-on-regression
/// semantics.
pub struct Snowflake<C: Clock> {
    epoch: Timestamp,
    epoch_millis: i64,
    datacenter_id: u8,
    worker_id: u8,
    clock: C,
    state: Mutex<GeneratorState>,
}

impl Snowflake<SystemClock> {
    /// Creates a generator backed by the real system clock.
    pub fn new(settings: SnowflakeSettings) -> Result<Self, Error> {
        Self::with_clock(settings, SystemClock)
    }
}

impl<C: Clock> Snowflake<C> {
    /// Creates a generator reading time from `clock`.
    pub fn with_clock(settings: SnowflakeSettings, clock: C) -> Result<Self, Error> {
        if settings.datacenter_id > MAX_DATACENTER_ID {
            return Err(Error::InvalidDatacenterId {
                datacenter_id: settings.datacenter_id,
                max_datacenter_id: MAX_DATACENTER_ID,
            });
        }

        if settings.worker_id > MAX_WORKER_ID {
            return Err(Error::InvalidWorkerId {
                worker_id: settings.worker_id,
                max_worker_id: MAX_WORKER_ID,
            });
        }

        let now = clock.now();
        if settings.epoch > now {
            return Err(Error::EpochAhead {
                epoch: settings.epoch,
                now,
            });
        }

        let epoch_millis = settings.epoch.as_millisecond();
        let epoch = Timestamp::from_millisecond(epoch_millis).map_err(|_| {
            Error::ClockOutOfRange {
                millisecond: epoch_millis,
            }
        })?;

        debug!(
            datacenter_id = settings.datacenter_id,
            worker_id = settings.worker_id,
            epoch = %settings.epoch,
            "snowflake generator initialized"
        );

        Ok(Self {
            epoch,
            epoch_millis,
            datacenter_id: settings.datacenter_id,
            worker_id: settings.worker_id,
            clock,
            state: Mutex::new(GeneratorState::default()),
        })
    }

    pub fn datacenter_id(&self) -> u8 {
        self.datacenter_id
    }

    pub fn worker_id(&self) -> u8 {
        self.worker_id
    }

    /// The configured epoch, truncated to whole milliseconds.
    pub fn epoch(&self) -> Timestamp {
        self.epoch
    }

    /// Generates the next unique SnowflakeId.
    ///
    /// The whole read-modify-write of the state happens under one lock, so
    /// concurrent callers are fully serialized. Correctness strategy:
    /// - if the clock moves backward, wait until it catches up
    /// - if the per-millisecond sequence is exhausted, wait for the next
    ///   millisecond
    ///
    /// Neither wait has a timeout; a clock stuck in the past blocks the caller
    /// for as long as it stays there.
    pub fn next_id(&self) -> Result<SnowflakeId, Error> {
        let mut state = self.state.lock().map_err(|_| Error::StatePoisoned)?;

        let mut now = self.clock.now().as_millisecond();

        if let Some(last) = state.last_timestamp {
            if now < last {
                warn!(
                    last_timestamp = last,
                    now,
                    regression_ms = last - now,
                    "clock moved backwards, waiting for it to catch up"
                );
                now = self.wait_for(last)?;
            }

            if now == last {
                state.sequence = (state.sequence + 1) & MAX_SEQUENCE;
                if state.sequence == 0 {
                    // Sequence wrapped: the 0 it wrapped to is the first
                    // sequence of the next millisecond.
                    debug!(
                        last_timestamp = last,
                        "sequence exhausted, waiting for next millisecond"
                    );
                    now = self.wait_for(last + 1)?;
                }
            } else {
                state.sequence = 0;
            }
        } else {
            state.sequence = 0;
        }

        // Milliseconds elapsed since the custom epoch, used as the timestamp field.
        let elapsed = now - self.epoch_millis;
        if elapsed < 0 {
            return Err(Error::EpochAhead {
                epoch: self.epoch,
                now: self.clock.now(),
            });
        }
        if elapsed as u64 > MAX_TIMESTAMP {
            return Err(Error::OverTimeLimit);
        }

        state.last_timestamp = Some(now);

        Ok(SnowflakeId::compose(
            elapsed as u64,
            self.datacenter_id,
            self.worker_id,
            state.sequence,
        ))
    }

    /// Decodes `id`. The timestamp stays relative to this generator's epoch;
    /// see [`Snowflake::timestamp_of`] for the absolute time.
    pub fn parse(&self, id: SnowflakeId) -> SnowflakeParts {
        id.parts()
    }

    /// Encodes the given fields without range checks; see
    /// [`SnowflakeId::reconstruct`].
    pub fn reconstruct(
        &self,
        timestamp: u64,
        datacenter_id: u8,
        worker_id: u8,
        sequence: u16,
    ) -> SnowflakeId {
        SnowflakeId::reconstruct(timestamp, datacenter_id, worker_id, sequence)
    }

    /// Absolute creation time of `id`, assuming it was minted with this
    /// generator's epoch.
    pub fn timestamp_of(&self, id: SnowflakeId) -> Result<Timestamp, Error> {
        let millisecond = self.epoch_millis + id.timestamp() as i64;
        Timestamp::from_millisecond(millisecond)
            .map_err(|_| Error::ClockOutOfRange { millisecond })
    }

    /// Waits until the clock reads at least `millisecond` and returns that
    /// reading. Loops because the clock may be stepped back again between
    /// `wait_until` returning and the reading.
    fn wait_for(&self, millisecond: i64) -> Result<i64, Error> {
        let target = Timestamp::from_millisecond(millisecond)
            .map_err(|_| Error::ClockOutOfRange { millisecond })?;
        loop {
            self.clock.wait_until(target);
            let now = self.clock.now().as_millisecond();
            if now >= millisecond {
                return Ok(now);
            }
            warn!(
                wait_target = millisecond,
                now,
                "clock stepped back while waiting, waiting again"
            );
        }
    }
}
