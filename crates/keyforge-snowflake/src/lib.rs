//! 64-bit, time-sortable identifiers minted without coordination.
//!
//! Each [`Snowflake`] owns a `(datacenter_id, worker_id)` pair that partitions
//! the id space between instances, so any number of independently running
//! generators can mint ids that never collide.

pub mod clock;
pub mod error;
mod layout;
mod snowflake;
mod snowflake_id;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{Error, ParseIdError};
pub use snowflake::{Snowflake, SnowflakeSettings, DEFAULT_EPOCH};
pub use snowflake_id::{SnowflakeId, SnowflakeParts};
