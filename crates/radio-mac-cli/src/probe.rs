//! Probe feature modules.
//!
//! A probe stands in for a real MAC feature: it hooks exactly the channels the
//! driver's implementation of that feature uses, records every call, and
//! answers boolean channels with a fixed verdict. A vetoing probe keeps the
//! `pre_transmission` continuation and reports the deferred attempt later,
//! outside of dispatch.

use std::sync::{Mutex, PoisonError};

use tracing::info;

use radio_mac_hooks::prelude::*;

/// One recorded hook invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeCall {
    /// Channel that was dispatched.
    pub channel: Channel,
    /// Feature whose probe ran.
    pub feature: Feature,
    /// Answer given on a boolean channel.
    pub verdict: Option<bool>,
}

/// Shared record of probe invocations.
#[derive(Debug, Clone, Default)]
pub struct ProbeLog {
    calls: Arc<Mutex<Vec<ProbeCall>>>,
}

impl ProbeLog {
    fn record(&self, call: ProbeCall) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }

    /// Removes and returns everything recorded so far.
    pub fn drain(&self) -> Vec<ProbeCall> {
        std::mem::take(&mut *self.calls.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

/// Probe standing in for one feature module.
#[derive(Debug)]
pub struct ProbeModule {
    /// Feature impersonated.
    feature: Feature,
    /// Whether boolean channels answer `false`.
    veto: bool,
    /// Where calls are recorded.
    log: ProbeLog,
    /// Continuation kept from a deferred `pre_transmission`.
    deferred: Mutex<Option<TransmitFailedNotify>>,
}

impl ProbeModule {
    /// Creates a probe for `feature`.
    pub fn new(feature: Feature, veto: bool, log: ProbeLog) -> Self {
        Self {
            feature,
            veto,
            log,
            deferred: Mutex::new(None),
        }
    }

    fn answer(&self, channel: Channel) -> bool {
        self.record_verdict(channel, !self.veto)
    }

    /// Own requests and levels that abort nothing in progress are granted.
    fn terminate(&self, term_lvl: TermLevel, req_orig: ReqOriginator) -> bool {
        let own_request = req_orig == self.feature.originator();
        let verdict = own_request || !term_lvl.aborts_in_progress() || !self.veto;
        self.record_verdict(Channel::Terminate, verdict)
    }

    fn record_verdict(&self, channel: Channel, verdict: bool) -> bool {
        info!(feature = %self.feature, channel = %channel, verdict, "Probe answered");
        self.log.record(ProbeCall {
            channel,
            feature: self.feature,
            verdict: Some(verdict),
        });
        verdict
    }

    fn observe(&self, channel: Channel) {
        info!(feature = %self.feature, channel = %channel, "Probe notified");
        self.log.record(ProbeCall {
            channel,
            feature: self.feature,
            verdict: None,
        });
    }

    fn defer(&self, notify: TransmitFailedNotify) -> bool {
        let verdict = self.answer(Channel::PreTransmission);
        if !verdict {
            *self
                .deferred
                .lock()
                .unwrap_or_else(PoisonError::into_inner) = Some(notify);
        }
        verdict
    }

    /// Reports a deferred attempt through its continuation, if one is held.
    ///
    /// Returns whether a continuation was invoked.
    pub fn resume_deferred(&self, frame: &[u8]) -> bool {
        let notify = self
            .deferred
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        match notify {
            Some(notify) => {
                info!(feature = %self.feature, "Reporting deferred transmission");
                notify(frame, TxError::BusyChannel);
                true
            }
            None => false,
        }
    }
}

impl FeatureModule for ProbeModule {
    fn feature(&self) -> Feature {
        self.feature
    }

    fn register_hooks(self: Arc<Self>, hooks: &mut FeatureHooks<'_>) -> AppResult<()> {
        for &channel in self.feature.channels() {
            let probe = Arc::clone(&self);
            match channel {
                Channel::Terminate => {
                    hooks.terminate(move |lvl, orig| probe.terminate(lvl, orig));
                }
                Channel::PreTransmission => {
                    hooks.pre_transmission(move |_, _, notify| probe.defer(notify));
                }
                Channel::TransmissionReady => {
                    hooks.transmission_ready(move |_, _| {
                        probe.observe(Channel::TransmissionReady)
                    });
                }
                Channel::Transmitted => {
                    hooks.transmitted(move |_| probe.observe(Channel::Transmitted));
                }
                Channel::TxFailed => {
                    hooks.tx_failed(move |_, _| probe.answer(Channel::TxFailed));
                }
                Channel::TxStarted => {
                    hooks.tx_started(move |_| probe.answer(Channel::TxStarted));
                }
                Channel::RxStarted => {
                    hooks.rx_started(move |_| probe.observe(Channel::RxStarted));
                }
                Channel::RxAckStarted => {
                    hooks.rx_ack_started(move || probe.observe(Channel::RxAckStarted));
                }
                Channel::PrioChanged => {
                    hooks.prio_changed(move |_, _| probe.observe(Channel::PrioChanged));
                }
            }
        }
        Ok(())
    }
}

/// Continuation handed to `pre_transmission` by the simulated core.
pub fn report_transmit_failed(frame: &[u8], error: TxError) {
    let frame = FrameRef::new(frame);
    info!(
        psdu_length = ?frame.psdu_length(),
        ack_requested = frame.ack_requested(),
        error = %error,
        "Transmit failed notification"
    );
}

/// Builds a manager with one probe per feature; `veto` selects the probe
/// that answers `false`.
pub fn probe_manager(
    features: FeatureSet,
    veto: Option<Feature>,
    log: &ProbeLog,
) -> AppResult<(FeatureManager, Vec<Arc<ProbeModule>>)> {
    let mut manager = FeatureManager::new(features);
    let mut probes = Vec::new();

    for feature in Feature::ALL {
        let probe = Arc::new(ProbeModule::new(
            feature,
            veto == Some(feature),
            log.clone(),
        ));
        manager.add(probe.clone())?;
        probes.push(probe);
    }

    Ok((manager, probes))
}
