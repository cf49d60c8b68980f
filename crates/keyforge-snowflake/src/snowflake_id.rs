use crate::error::ParseIdError;
use crate::layout::{Layout, DATACENTER_ID_SHIFT, TIMESTAMP_SHIFT, WORKER_ID_SHIFT};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A 64-bit snowflake identifier.
///
/// Ordering follows the numeric value, which for ids minted by one generator
/// is also creation order. The decimal string is the canonical external form
/// (see [`Display`](fmt::Display) and [`FromStr`]); serde uses it too, so the
/// value survives JSON consumers limited to 53-bit integers.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct SnowflakeId(u64);

/// The decoded fields of a [`SnowflakeId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SnowflakeParts {
    /// Milliseconds since the minting generator's epoch, not since the Unix
    /// epoch.
    pub timestamp: u64,
    pub datacenter_id: u8,
    pub worker_id: u8,
    pub sequence: u16,
}

impl SnowflakeId {
    /// Packs already validated fields. Used by the generator.
    pub(crate) fn compose(timestamp: u64, datacenter_id: u8, worker_id: u8, sequence: u16) -> Self {
        let layout = Layout::new()
            .with_timestamp(timestamp)
            .with_datacenter_id(datacenter_id)
            .with_worker_id(worker_id)
            .with_sequence(sequence);
        Self(layout.to_u64())
    }

    /// Rebuilds an id from its fields.
    ///
    /// No range checks are made: a component wider than its field spills into
    /// the neighbouring fields. Intended for tests and for re-encoding the
    /// output of [`SnowflakeId::parts`].
    pub fn reconstruct(timestamp: u64, datacenter_id: u8, worker_id: u8, sequence: u16) -> Self {
        Self(
            (timestamp << TIMESTAMP_SHIFT)
                | (u64::from(datacenter_id) << DATACENTER_ID_SHIFT)
                | (u64::from(worker_id) << WORKER_ID_SHIFT)
                | u64::from(sequence),
        )
    }

    /// Wraps a raw value. The top bit is not checked.
    pub const fn from_u64(raw: u64) -> Self {
        Self(raw)
    }

    /// Reads any 64-bit decimal value, top bit included.
    ///
    /// This is the decoding counterpart of [`SnowflakeId::reconstruct`], which
    /// can produce such values. [`FromStr`] is the strict form that rejects
    /// them.
    pub fn from_decimal(s: &str) -> Result<Self, ParseIdError> {
        parse_decimal(s).map(Self)
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Decodes the id into its fields.
    pub fn parts(self) -> SnowflakeParts {
        let layout = Layout::from_u64(self.0);
        SnowflakeParts {
            timestamp: layout.timestamp(),
            datacenter_id: layout.datacenter_id(),
            worker_id: layout.worker_id(),
            sequence: layout.sequence(),
        }
    }

    pub fn timestamp(self) -> u64 {
        self.parts().timestamp
    }

    pub fn datacenter_id(self) -> u8 {
        self.parts().datacenter_id
    }

    pub fn worker_id(self) -> u8 {
        self.parts().worker_id
    }

    pub fn sequence(self) -> u16 {
        self.parts().sequence
    }
}

impl From<SnowflakeParts> for SnowflakeId {
    fn from(parts: SnowflakeParts) -> Self {
        Self::reconstruct(
            parts.timestamp,
            parts.datacenter_id,
            parts.worker_id,
            parts.sequence,
        )
    }
}

impl From<SnowflakeId> for u64 {
    fn from(id: SnowflakeId) -> Self {
        id.0
    }
}

impl From<SnowflakeId> for String {
    fn from(id: SnowflakeId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for SnowflakeId {
    type Error = ParseIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for SnowflakeId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = parse_decimal(s)?;
        if value > i64::MAX as u64 {
            return Err(ParseIdError::SignBitSet { value });
        }
        Ok(Self(value))
    }
}

/// Plain ASCII digits only; `u64::from_str` would also take a leading `+`.
fn parse_decimal(s: &str) -> Result<u64, ParseIdError> {
    let invalid = |reason: String| ParseIdError::InvalidDigits {
        input: s.to_string(),
        reason,
    };
    if s.is_empty() {
        return Err(invalid("empty string".to_string()));
    }
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("expected only ascii digits".to_string()));
    }
    s.parse().map_err(|e: std::num::ParseIntError| invalid(e.to_string()))
}

impl fmt::Display for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = self.parts();
        f.debug_struct("SnowflakeId")
            .field("value", &self.0)
            .field("timestamp", &parts.timestamp)
            .field("datacenter_id", &parts.datacenter_id)
            .field("worker_id", &parts.worker_id)
            .field("sequence", &parts.sequence)
            .finish()
    }
}
