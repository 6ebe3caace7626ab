//! Shared test helpers for dispatch tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use radio_mac_core::config::features::FeatureSet;
use radio_mac_core::result::AppResult;
use radio_mac_core::types::TxError;
use radio_mac_hooks::{
    Channel, Feature, FeatureHooks, FeatureManager, FeatureModule, HookDispatcher,
};

/// Sample data frame: PHR length 10, ACK requested.
pub const FRAME: [u8; 4] = [0x0a, 0x61, 0x88, 0x01];

/// Shared log of `(channel, feature)` invocations.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<(Channel, Feature)>>>,
}

impl CallLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one invocation.
    pub fn record(&self, channel: Channel, feature: Feature) {
        self.calls.lock().unwrap().push((channel, feature));
    }

    /// All recorded invocations.
    pub fn calls(&self) -> Vec<(Channel, Feature)> {
        self.calls.lock().unwrap().clone()
    }

    /// Features invoked on one channel, in call order.
    pub fn on(&self, channel: Channel) -> Vec<Feature> {
        self.calls()
            .into_iter()
            .filter(|(c, _)| *c == channel)
            .map(|(_, f)| f)
            .collect()
    }

    /// Forget all recorded invocations.
    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }
}

/// Feature module that records every call and answers boolean channels from
/// a verdict table (default `true`).
#[derive(Debug)]
pub struct ScriptedModule {
    feature: Feature,
    channels: Vec<Channel>,
    verdicts: HashMap<Channel, bool>,
    log: CallLog,
}

impl ScriptedModule {
    /// Module hooking the channels the driver's implementation uses.
    pub fn reference(feature: Feature, log: &CallLog) -> Self {
        Self::on(feature, feature.channels(), log)
    }

    /// Module hooking an explicit set of channels.
    pub fn on(feature: Feature, channels: &[Channel], log: &CallLog) -> Self {
        Self {
            feature,
            channels: channels.to_vec(),
            verdicts: HashMap::new(),
            log: log.clone(),
        }
    }

    /// Answer `verdict` on `channel`.
    pub fn answering(mut self, channel: Channel, verdict: bool) -> Self {
        self.verdicts.insert(channel, verdict);
        self
    }

    fn verdict(&self, channel: Channel) -> bool {
        self.verdicts.get(&channel).copied().unwrap_or(true)
    }

    fn hit(&self, channel: Channel) -> bool {
        self.log.record(channel, self.feature);
        self.verdict(channel)
    }
}

impl FeatureModule for ScriptedModule {
    fn feature(&self) -> Feature {
        self.feature
    }

    fn register_hooks(self: Arc<Self>, hooks: &mut FeatureHooks<'_>) -> AppResult<()> {
        for channel in self.channels.clone() {
            let this = Arc::clone(&self);
            match channel {
                Channel::Terminate => {
                    hooks.terminate(move |_, _| this.hit(Channel::Terminate));
                }
                Channel::PreTransmission => {
                    hooks.pre_transmission(move |_, _, _| this.hit(Channel::PreTransmission));
                }
                Channel::TransmissionReady => {
                    hooks.transmission_ready(move |_, _| {
                        this.hit(Channel::TransmissionReady);
                    });
                }
                Channel::Transmitted => {
                    hooks.transmitted(move |_| {
                        this.hit(Channel::Transmitted);
                    });
                }
                Channel::TxFailed => {
                    hooks.tx_failed(move |_, _| this.hit(Channel::TxFailed));
                }
                Channel::TxStarted => {
                    hooks.tx_started(move |_| this.hit(Channel::TxStarted));
                }
                Channel::RxStarted => {
                    hooks.rx_started(move |_| {
                        this.hit(Channel::RxStarted);
                    });
                }
                Channel::RxAckStarted => {
                    hooks.rx_ack_started(move || {
                        this.hit(Channel::RxAckStarted);
                    });
                }
                Channel::PrioChanged => {
                    hooks.prio_changed(move |_, _| {
                        this.hit(Channel::PrioChanged);
                    });
                }
            }
        }
        Ok(())
    }
}

/// Engine with reference modules for every feature, gated by `features`.
pub fn reference_engine(features: FeatureSet, log: &CallLog) -> HookDispatcher {
    engine(
        features,
        Feature::ALL
            .into_iter()
            .map(|feature| ScriptedModule::reference(feature, log))
            .collect(),
    )
}

/// Engine built from explicit modules.
pub fn engine(features: FeatureSet, modules: Vec<ScriptedModule>) -> HookDispatcher {
    let mut manager = FeatureManager::new(features);
    for module in modules {
        manager.add(Arc::new(module)).unwrap();
    }
    manager.build().unwrap()
}

/// Continuation handed to `pre_transmission` in tests.
pub fn ignore_failure(_frame: &[u8], _error: TxError) {}
