//! Channel layout command.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use radio_mac_core::config::AppConfig;
use radio_mac_core::error::AppError;
use radio_mac_hooks::ChannelLayout;

use crate::output::{self, OutputFormat};
use crate::probe::{ProbeLog, probe_manager};

/// Arguments for the channels command
#[derive(Debug, Args)]
pub struct ChannelsArgs {
    /// Only list channels with at least one candidate
    #[arg(long)]
    pub non_empty: bool,
}

/// Table row for one channel
#[derive(Debug, Serialize, Tabled)]
struct ChannelRow {
    #[tabled(rename = "Channel")]
    channel: String,
    #[tabled(rename = "Policy")]
    policy: String,
    #[tabled(rename = "On false")]
    veto_meaning: String,
    #[tabled(rename = "Candidates")]
    candidates: String,
}

impl From<&ChannelLayout> for ChannelRow {
    fn from(entry: &ChannelLayout) -> Self {
        Self {
            channel: entry.channel.to_string(),
            policy: entry.policy.to_string(),
            veto_meaning: entry
                .veto_meaning
                .map(|m| m.to_string())
                .unwrap_or_else(|| "-".to_string()),
            candidates: output::join(&entry.candidates),
        }
    }
}

/// Execute the channels command
pub fn execute(
    args: &ChannelsArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let (manager, _) = probe_manager(config.feature_set(), None, &ProbeLog::default())?;
    let dispatcher = manager.build()?;

    let layout: Vec<ChannelLayout> = dispatcher
        .registry()
        .layout()
        .into_iter()
        .filter(|entry| !args.non_empty || !entry.candidates.is_empty())
        .collect();

    match format {
        OutputFormat::Json => output::print_item(&layout, format),
        OutputFormat::Table => {
            let rows: Vec<ChannelRow> = layout.iter().map(ChannelRow::from).collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
