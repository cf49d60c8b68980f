use modular_bitfield::prelude::*;

pub(crate) const SEQUENCE_BITS: u32 = 12;
pub(crate) const WORKER_ID_BITS: u32 = 5;
pub(crate) const DATACENTER_ID_BITS: u32 = 5;
pub(crate) const TIMESTAMP_BITS: u32 = 41;

pub(crate) const WORKER_ID_SHIFT: u32 = SEQUENCE_BITS;
pub(crate) const DATACENTER_ID_SHIFT: u32 = SEQUENCE_BITS + WORKER_ID_BITS;
pub(crate) const TIMESTAMP_SHIFT: u32 = SEQUENCE_BITS + WORKER_ID_BITS + DATACENTER_ID_BITS;

pub(crate) const MAX_SEQUENCE: u16 = (1 << SEQUENCE_BITS) - 1;
pub(crate) const MAX_WORKER_ID: u8 = (1 << WORKER_ID_BITS) - 1;
pub(crate) const MAX_DATACENTER_ID: u8 = (1 << DATACENTER_ID_BITS) - 1;
pub(crate) const MAX_TIMESTAMP: u64 = (1 << TIMESTAMP_BITS) - 1;

/// Bit layout of a snowflake id, least significant field first.
///
/// Read and written through little-endian bytes so that the declared order
/// maps onto `u64` significance: `sequence` occupies the low 12 bits and the
/// unused top bit keeps the value a non-negative `i64`.
#[bitfield]
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) struct Layout {
    /// 12 bits for sequence number (resets every millisecond).
    pub sequence: B12,
    /// 5 bits for worker ID.
    pub worker_id: B5,
    /// 5 bits for datacenter ID.
    pub datacenter_id: B5,
    /// 41 bits for timestamp (milliseconds since a custom epoch).
    pub timestamp: B41,
    #[skip]
    __: B1,
}

impl Layout {
    pub(crate) fn from_u64(raw: u64) -> Self {
        Self::from_bytes(raw.to_le_bytes())
    }

    pub(crate) fn to_u64(self) -> u64 {
        u64::from_le_bytes(self.into_bytes())
    }
}
