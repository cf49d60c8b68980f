mod cli;

use crate::cli::{Command, CLI};
use anyhow::Context;
use clap::Parser;
use jiff::Timestamp;
use keyforge_generator::telemetry;
use keyforge_snowflake::{SnowflakeId, SnowflakeParts};
use serde::Serialize;
use std::io::Write;
use tracing::info;

#[derive(Debug, Serialize)]
struct DecodedId {
    id: SnowflakeId,
    #[serde(flatten)]
    parts: SnowflakeParts,
    created_at: Timestamp,
}

fn main() -> anyhow::Result<()> {
    let config = CLI::parse();

    telemetry::init(config.log_format)?;

    info!(
        datacenter_id = config.generator.datacenter_id,
        worker_id = config.generator.worker_id,
        log_format = %config.log_format,
        "starting keyforge"
    );

    let generator = config
        .generator
        .build()
        .context("invalid generator configuration")?;

    let mut stdout = std::io::stdout().lock();
    match config.command {
        Command::Generate { count } => {
            for _ in 0..count {
                writeln!(stdout, "{}", generator.generate_id()?)?;
            }
        }
        Command::Parse { id } => {
            let id = SnowflakeId::from_decimal(&id)?;
            let decoded = DecodedId {
                id,
                parts: id.parts(),
                created_at: generator.created_at(id)?,
            };
            writeln!(stdout, "{}", serde_json::to_string_pretty(&decoded)?)?;
        }
        Command::Reconstruct {
            timestamp,
            datacenter_id,
            worker_id,
            sequence,
        } => {
            writeln!(
                stdout,
                "{}",
                generator.reconstruct(timestamp, datacenter_id, worker_id, sequence)
            )?;
        }
    }

    Ok(())
}
