use clap::{Parser, Subcommand};
use keyforge_generator::telemetry::{LogFormat, LOG_FORMAT_ENV};
use keyforge_generator::GeneratorConfig;

#[derive(Debug, Parser)]
#[command(name = "keyforge", about = "Mint and inspect snowflake ids")]
pub struct CLI {
    #[command(flatten)]
    pub generator: GeneratorConfig,

    #[arg(
        long,
        env = LOG_FORMAT_ENV,
        value_enum,
        default_value_t = LogFormat::Text,
        global = true
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print freshly minted ids, one per line.
    Generate {
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },
    /// Decode an id into its fields.
    Parse { id: String },
    /// Encode fields into an id. Fields are not range checked.
    Reconstruct {
        timestamp: u64,
        datacenter_id: u8,
        worker_id: u8,
        sequence: u16,
    },
}
