//! `custodia` — build and load the incident-report star schema.
//!
//! # Usage
//!
//! ```
//! custodia --config custodia.toml build
//! custodia --config custodia.toml load
//! custodia --config custodia.toml run
//! ```

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use custodia_cli::Settings;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
  name = "custodia",
  about = "Incident-report star-schema warehouse builder"
)]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "custodia.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Run the ETL pipeline and export the tables as CSV.
  Build,
  /// Bulk-load previously exported tables into SQLite.
  Load,
  /// `build` followed by `load`.
  Run,
}

fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config.clone()))
    .add_source(
      config::Environment::with_prefix("CUSTODIA").separator("__"),
    )
    .build()
    .context("failed to read config file")?;
  let settings: Settings = settings
    .try_deserialize()
    .context("failed to deserialise settings")?;

  match cli.command {
    Command::Build => {
      custodia_cli::run_build(&settings.build)?;
    }
    Command::Load => custodia_cli::run_load(&settings.load)?,
    Command::Run => {
      custodia_cli::run_build(&settings.build)?;
      custodia_cli::run_load(&settings.load)?;
    }
  }
  Ok(())
}
