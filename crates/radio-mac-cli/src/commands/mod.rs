//! CLI command definitions and dispatch.

pub mod channels;
pub mod config;
pub mod simulate;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use radio_mac_core::config::AppConfig;
use radio_mac_core::error::AppError;

/// Environment variable selecting the configuration overlay.
const ENV_VAR: &str = "RADIO_MAC_ENV";

/// Radio MAC: inspect and exercise the 802.15.4 MAC hook layer
#[derive(Debug, Parser)]
#[command(name = "radio-mac", version, about, long_about = None)]
pub struct Cli {
    /// Path to a configuration file (defaults to config/default + overlay)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show each channel's policy and candidate order
    Channels(channels::ChannelsArgs),
    /// Configuration management
    Config(config::ConfigArgs),
    /// Replay a transmit/receive sequence through probe modules
    Simulate(simulate::SimulateArgs),
}

impl Cli {
    /// Load configuration from `--config` or the default sources
    pub fn load_config(&self) -> Result<AppConfig, AppError> {
        match &self.config {
            Some(path) => AppConfig::from_file(path),
            None => {
                let env = std::env::var(ENV_VAR).unwrap_or_else(|_| "development".to_string());
                AppConfig::load(&env)
            }
        }
    }

    /// Execute the CLI command
    pub fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Channels(args) => channels::execute(args, config, self.format),
            Commands::Config(args) => config::execute(args, config, self.format),
            Commands::Simulate(args) => simulate::execute(args, config, self.format),
        }
    }
}
