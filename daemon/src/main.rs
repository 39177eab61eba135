//! AirMile daemon: entry point for running token scenarios.

mod scenario;

use airmile_node::{init_logging, LogFormat, NetworkConfig};
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use crate::scenario::Scenario;

#[derive(Parser)]
#[command(name = "airmile-daemon", about = "AirMile token network runner")]
struct Cli {
    /// Log level: "trace", "debug", "info", "warn", "error".
    /// Overrides the scenario's network setting.
    #[arg(long, env = "AIRMILE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "AIRMILE_LOG_FORMAT")]
    log_format: Option<String>,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Run a scenario and print every node's holdings as JSON.
    Run {
        /// Path to the scenario TOML file.
        #[arg(long, env = "AIRMILE_SCENARIO")]
        config: PathBuf,
    },
    /// Print the default network configuration as TOML.
    DefaultConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run { config } => {
            let mut scenario = Scenario::from_toml_file(&config)?;
            if let Some(level) = cli.log_level {
                scenario.network.log_level = level;
            }
            if let Some(format) = cli.log_format {
                scenario.network.log_format = format;
            }
            let format: LogFormat = scenario.network.log_format()?;
            init_logging(format, &scenario.network.log_level)?;

            tracing::info!(
                "Running scenario {} ({} steps, {} nodes)",
                config.display(),
                scenario.steps.len(),
                scenario.network.nodes.len(),
            );
            let report = scenario.run().await?;
            let json = serde_json::to_string_pretty(&report).context("encoding report")?;
            println!("{json}");
            tracing::info!("Scenario finished");
        }
        Command::DefaultConfig => {
            print!("{}", NetworkConfig::default().to_toml_string()?);
        }
    }

    Ok(())
}
