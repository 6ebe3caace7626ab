//! Replays a canonical transmit/receive sequence through probe modules.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use radio_mac_core::config::AppConfig;
use radio_mac_core::error::AppError;
use radio_mac_core::types::{FrameRef, Priority, ReqOriginator, TermLevel, TxError};
use radio_mac_hooks::{Channel, Feature, HookDispatcher};

use crate::output::{self, OutputFormat};
use crate::probe::{ProbeLog, probe_manager, report_transmit_failed};

/// Data frame with PHR length 10 and the ACK request bit set.
const SAMPLE_FRAME: [u8; 11] = [
    0x0a, 0x61, 0x88, 0x2a, 0xcd, 0xab, 0xff, 0xff, 0x34, 0x12, 0x00,
];

/// Arguments for the simulate command
#[derive(Debug, Args)]
pub struct SimulateArgs {
    /// Feature whose probe answers `false` on every boolean channel
    #[arg(long)]
    pub veto: Option<Feature>,

    /// Error reported on the failed-transmission step
    #[arg(long, default_value = "no_ack")]
    pub tx_error: TxError,

    /// Priority granted by the radio scheduler at the start of the sequence
    #[arg(long, default_value_t = 1)]
    pub priority: u32,
}

/// Outcome of one core transition
#[derive(Debug, Serialize, Tabled)]
struct StepRow {
    #[tabled(rename = "#")]
    step: usize,
    #[tabled(rename = "Channel")]
    channel: String,
    #[tabled(rename = "Verdict")]
    verdict: String,
    #[tabled(rename = "Invoked")]
    invoked: String,
}

/// Replays core transitions and records what each one dispatched.
struct Sequence<'a> {
    dispatcher: &'a HookDispatcher,
    log: &'a ProbeLog,
    rows: Vec<StepRow>,
}

impl Sequence<'_> {
    fn step(
        &mut self,
        channel: Channel,
        run: impl FnOnce(&HookDispatcher) -> Option<bool>,
    ) -> bool {
        let verdict = run(self.dispatcher);
        let invoked: Vec<Feature> = self.log.drain().into_iter().map(|c| c.feature).collect();

        self.rows.push(StepRow {
            step: self.rows.len() + 1,
            channel: channel.to_string(),
            verdict: verdict
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".to_string()),
            invoked: output::join(&invoked),
        });

        verdict.unwrap_or(true)
    }
}

/// Drives one transmit attempt through the dispatcher the way the core would.
///
/// A deferred or vetoed attempt never reaches the air: it is reported through
/// `tx_failed` instead of `transmitted`. ACK reception only follows a frame
/// that requests an acknowledgement.
fn run_sequence(
    dispatcher: &HookDispatcher,
    log: &ProbeLog,
    frame: &[u8],
    granted: Priority,
    tx_error: TxError,
) -> Vec<StepRow> {
    let mut seq = Sequence {
        dispatcher,
        log,
        rows: Vec::new(),
    };

    seq.step(Channel::PrioChanged, |d| {
        d.prio_changed(Priority::IDLE, granted);
        None
    });

    let admitted = seq.step(Channel::PreTransmission, |d| {
        Some(d.pre_transmission(frame, true, report_transmit_failed))
    });
    seq.step(Channel::TransmissionReady, |d| {
        d.transmission_ready(frame, admitted);
        None
    });

    let on_air = admitted && seq.step(Channel::TxStarted, |d| Some(d.tx_started(frame)));

    if on_air {
        seq.step(Channel::Transmitted, |d| {
            d.transmitted(frame);
            None
        });
        if FrameRef::new(frame).ack_requested() {
            seq.step(Channel::RxAckStarted, |d| {
                d.rx_ack_started();
                None
            });
        }
        seq.step(Channel::RxStarted, |d| {
            d.rx_started(frame);
            None
        });
    } else {
        seq.step(Channel::TxFailed, |d| Some(d.tx_failed(frame, tx_error)));
    }

    seq.step(Channel::Terminate, |d| {
        Some(d.terminate(TermLevel::Ieee802154, ReqOriginator::HigherLayer))
    });
    seq.step(Channel::PrioChanged, |d| {
        d.prio_changed(granted, Priority::IDLE);
        None
    });

    seq.rows
}

/// Execute the simulate command
pub fn execute(
    args: &SimulateArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let features = config.feature_set();
    if let Some(feature) = args.veto {
        if !feature.is_enabled_in(&features) {
            output::print_warning(&format!(
                "'{feature}' is disabled, its veto will never be consulted"
            ));
        }
    }

    let log = ProbeLog::default();
    let (manager, probes) = probe_manager(features, args.veto, &log)?;
    let dispatcher = manager.build()?;
    let frame = &SAMPLE_FRAME[..];

    let rows = run_sequence(
        &dispatcher,
        &log,
        frame,
        Priority(args.priority),
        args.tx_error,
    );
    output::print_list(&rows, format);

    // Deferred attempts are reported only after dispatch has returned.
    let resumed = probes
        .iter()
        .filter(|probe| probe.resume_deferred(frame))
        .count();
    if resumed > 0 && format == OutputFormat::Table {
        output::print_success(&format!("{resumed} deferred transmission(s) reported"));
    }

    Ok(())
}
