//! nxos-devconf - render NX-OS update plans
//!
//! Builds the update plan for a YAML device configuration (or the default
//! baseline) and prints it as the Set operations a session would send.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

use nxos_devconf::{DeviceConfig, OfflineAccessor, Registry};
use nxos_gnmi::{GnmiResult, SetOperation, Update};

/// Render NX-OS gNMI update plans
#[derive(Parser, Debug)]
#[command(name = "nxos-devconf")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the plan that converges a device to the configuration
    Render {
        /// Device configuration (YAML); the baseline when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Render the plan that restores device defaults
    Reset {
        /// Device configuration (YAML); the baseline when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Only reset these registered names
        #[arg(short, long)]
        domain: Vec<String>,
    },
}

fn init_logging(log_level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

fn load(config: Option<&PathBuf>) -> Result<Registry> {
    match config {
        Some(path) => DeviceConfig::from_file(path)?
            .into_registry()
            .context("Invalid device configuration"),
        None => Ok(Registry::baseline()),
    }
}

fn print_plan(updates: &[Update]) -> Result<()> {
    let ops = updates
        .iter()
        .map(Update::to_set_operation)
        .collect::<GnmiResult<Vec<SetOperation>>>()?;
    println!("{}", serde_json::to_string_pretty(&ops)?);
    Ok(())
}

async fn run(args: Args) -> Result<()> {
    let updates = match args.command {
        Command::Render { config } => {
            let registry = load(config.as_ref())?;
            info!(domains = registry.len(), "Rendering update plan");
            registry.to_updates(&OfflineAccessor).await?
        }
        Command::Reset { config, domain } => {
            let mut registry = load(config.as_ref())?;
            if !domain.is_empty() {
                registry = registry.select(&domain)?;
            }
            info!(domains = registry.len(), "Rendering reset plan");
            registry.reset(&OfflineAccessor).await?
        }
    };
    print_plan(&updates)
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
