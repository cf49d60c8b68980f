use crate::error::ConfigError;
use crate::id_generator::IdGenerator;
use clap::Args;

pub const DATACENTER_ID_ENV: &str = "KEYFORGE_DATACENTER_ID";
pub const WORKER_ID_ENV: &str = "KEYFORGE_WORKER_ID";
pub const EPOCH_MILLIS_ENV: &str = "KEYFORGE_EPOCH_MILLIS";

/// Identity of this process in the id space, supplied by flags or the
/// environment.
///
/// Every running instance sharing an epoch needs a distinct
/// `(datacenter_id, worker_id)` pair; nothing here checks that at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct GeneratorConfig {
    #[arg(long, env = DATACENTER_ID_ENV, default_value_t = 0)]
    pub datacenter_id: u8,

    #[arg(long, env = WORKER_ID_ENV, default_value_t = 0)]
    pub worker_id: u8,

    /// Milliseconds since the Unix epoch; defaults to the Twitter epoch.
    #[arg(long, env = EPOCH_MILLIS_ENV, allow_negative_numbers = true)]
    pub epoch_millis: Option<i64>,
}

impl GeneratorConfig {
    pub fn build(&self) -> Result<IdGenerator, ConfigError> {
        IdGenerator::new(self.datacenter_id, self.worker_id, self.epoch_millis)
    }
}
