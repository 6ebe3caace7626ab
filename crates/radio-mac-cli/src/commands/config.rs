//! Configuration management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;

use radio_mac_core::config::AppConfig;
use radio_mac_core::config::features::{FeatureConfig, FeatureSet};
use radio_mac_core::config::logging::LoggingConfig;
use radio_mac_core::error::AppError;
use radio_mac_hooks::Feature;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the resolved feature set and logging settings
    Show,
    /// Check configured switches against the compiled-in features
    Validate,
    /// Generate a default configuration file
    Generate {
        /// Output file path
        #[arg(short, long, default_value = "config/generated.toml")]
        output: String,
    },
}

/// Resolved view of the configuration
#[derive(Debug, Serialize)]
struct ResolvedConfig {
    compiled: FeatureSet,
    enabled: FeatureSet,
    logging: LoggingConfig,
}

/// Execute config commands
pub fn execute(
    args: &ConfigArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let resolved = ResolvedConfig {
                compiled: FeatureSet::compiled(),
                enabled: config.feature_set(),
                logging: config.logging.clone(),
            };
            output::print_item(&resolved, format);
        }
        ConfigCommand::Validate => {
            let enabled = config.feature_set();
            let masked = masked_features(&config.features, FeatureSet::compiled());

            for feature in &masked {
                output::print_warning(&format!(
                    "'{feature}' is enabled in configuration but not compiled in"
                ));
            }

            if !masked.is_empty() {
                return Err(AppError::validation(format!(
                    "{} feature switch(es) have no effect in this build",
                    masked.len()
                )));
            }

            output::print_success(&format!(
                "Configuration is valid ({} optional feature(s) enabled)",
                enabled.enabled_count()
            ));
        }
        ConfigCommand::Generate { output: out_path } => {
            let rendered = toml::to_string_pretty(&AppConfig::default())
                .map_err(|e| AppError::internal(format!("Failed to render config: {}", e)))?;

            if let Some(parent) = std::path::Path::new(out_path).parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(out_path, rendered)?;

            output::print_success(&format!("Default config written to '{}'", out_path));
        }
    }

    Ok(())
}

/// Features switched on in configuration that `compiled` does not contain.
fn masked_features(config: &FeatureConfig, compiled: FeatureSet) -> Vec<Feature> {
    let configured = FeatureSet::resolve_against(config, FeatureSet::ALL);

    Feature::ALL
        .into_iter()
        .filter(Feature::is_optional)
        .filter(|f| f.is_enabled_in(&configured) && !f.is_enabled_in(&compiled))
        .collect()
}
