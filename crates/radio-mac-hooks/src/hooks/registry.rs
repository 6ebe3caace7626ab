//! Hook registry: per-channel candidate lists assembled once from the
//! enabled feature set.
//!
//! Feature modules register hooks through [`HookRegistryBuilder`]. Candidates
//! of disabled features are dropped on registration, never stored as no-op
//! placeholders. [`HookRegistryBuilder::build`] orders every channel by
//! feature priority and returns a [`HookRegistry`] that cannot be changed.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use radio_mac_core::config::features::FeatureSet;
use radio_mac_core::error::AppError;
use radio_mac_core::result::AppResult;
use radio_mac_core::types::{Priority, ReqOriginator, TermLevel, TransmitFailedNotify, TxError};

use super::definitions::{AggregationPolicy, Channel, Feature, VetoMeaning};

/// `terminate` hook: may refuse the abort.
pub type TerminateHook = dyn Fn(TermLevel, ReqOriginator) -> bool + Send + Sync;
/// `pre_transmission` hook: may defer the attempt.
pub type PreTransmissionHook = dyn Fn(&[u8], bool, TransmitFailedNotify) -> bool + Send + Sync;
/// `transmission_ready` hook.
pub type TransmissionReadyHook = dyn Fn(&[u8], bool) + Send + Sync;
/// `transmitted` hook.
pub type TransmittedHook = dyn Fn(&[u8]) + Send + Sync;
/// `tx_failed` hook: may consume the failure.
pub type TxFailedHook = dyn Fn(&[u8], TxError) -> bool + Send + Sync;
/// `tx_started` hook: may veto further processing.
pub type TxStartedHook = dyn Fn(&[u8]) -> bool + Send + Sync;
/// `rx_started` hook.
pub type RxStartedHook = dyn Fn(&[u8]) + Send + Sync;
/// `rx_ack_started` hook.
pub type RxAckStartedHook = dyn Fn() + Send + Sync;
/// `prio_changed` hook.
pub type PrioChangedHook = dyn Fn(Priority, Priority) + Send + Sync;

/// One feature's hook on a channel.
struct Candidate<H: ?Sized> {
    /// Feature that supplied the hook.
    feature: Feature,
    /// The hook.
    hook: Box<H>,
}

/// Ordered candidates of one channel.
pub struct ChannelHooks<H: ?Sized> {
    /// The channel these candidates serve.
    channel: Channel,
    /// Candidates in priority order once frozen.
    candidates: Vec<Candidate<H>>,
}

impl<H: ?Sized> ChannelHooks<H> {
    fn new(channel: Channel) -> Self {
        Self {
            channel,
            candidates: Vec::new(),
        }
    }

    fn push(&mut self, feature: Feature, hook: Box<H>) {
        self.candidates.push(Candidate { feature, hook });
    }

    /// Sorts by feature priority and rejects duplicate features.
    fn freeze(mut self) -> AppResult<Self> {
        self.candidates.sort_by_key(|c| c.feature);

        if let Some(pair) = self
            .candidates
            .windows(2)
            .find(|pair| pair[0].feature == pair[1].feature)
        {
            return Err(AppError::validation(format!(
                "feature '{}' registered more than one hook on channel '{}'",
                pair[0].feature, self.channel
            )));
        }

        Ok(self)
    }

    /// Returns the channel.
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Returns the number of candidates.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Returns whether the channel has no candidates.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Returns the candidate features in invocation order.
    pub fn features(&self) -> Vec<Feature> {
        self.candidates.iter().map(|c| c.feature).collect()
    }

    /// Iterates candidates in invocation order.
    pub fn iter(&self) -> impl Iterator<Item = (Feature, &H)> {
        self.candidates.iter().map(|c| (c.feature, &*c.hook))
    }
}

impl<H: ?Sized> fmt::Debug for ChannelHooks<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelHooks")
            .field("channel", &self.channel)
            .field("features", &self.features())
            .finish()
    }
}

/// Serialisable summary of one channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelLayout {
    /// The channel.
    pub channel: Channel,
    /// Its aggregation policy.
    pub policy: AggregationPolicy,
    /// Meaning of a `false` verdict, for boolean channels.
    pub veto_meaning: Option<VetoMeaning>,
    /// Candidate features in invocation order.
    pub candidates: Vec<Feature>,
}

/// Frozen per-channel hook tables.
#[derive(Debug)]
pub struct HookRegistry {
    /// Feature set the tables were assembled for.
    features: FeatureSet,
    pub(crate) terminate: ChannelHooks<TerminateHook>,
    pub(crate) pre_transmission: ChannelHooks<PreTransmissionHook>,
    pub(crate) transmission_ready: ChannelHooks<TransmissionReadyHook>,
    pub(crate) transmitted: ChannelHooks<TransmittedHook>,
    pub(crate) tx_failed: ChannelHooks<TxFailedHook>,
    pub(crate) tx_started: ChannelHooks<TxStartedHook>,
    pub(crate) rx_started: ChannelHooks<RxStartedHook>,
    pub(crate) rx_ack_started: ChannelHooks<RxAckStartedHook>,
    pub(crate) prio_changed: ChannelHooks<PrioChangedHook>,
}

impl HookRegistry {
    /// Starts assembling a registry for the given feature set.
    pub fn builder(features: FeatureSet) -> HookRegistryBuilder {
        HookRegistryBuilder::new(features)
    }

    fn empty(features: FeatureSet) -> Self {
        Self {
            features,
            terminate: ChannelHooks::new(Channel::Terminate),
            pre_transmission: ChannelHooks::new(Channel::PreTransmission),
            transmission_ready: ChannelHooks::new(Channel::TransmissionReady),
            transmitted: ChannelHooks::new(Channel::Transmitted),
            tx_failed: ChannelHooks::new(Channel::TxFailed),
            tx_started: ChannelHooks::new(Channel::TxStarted),
            rx_started: ChannelHooks::new(Channel::RxStarted),
            rx_ack_started: ChannelHooks::new(Channel::RxAckStarted),
            prio_changed: ChannelHooks::new(Channel::PrioChanged),
        }
    }

    /// Returns the feature set the registry was assembled for.
    pub fn feature_set(&self) -> FeatureSet {
        self.features
    }

    /// Returns the candidate features of a channel in invocation order.
    pub fn features(&self, channel: Channel) -> Vec<Feature> {
        match channel {
            Channel::Terminate => self.terminate.features(),
            Channel::PreTransmission => self.pre_transmission.features(),
            Channel::TransmissionReady => self.transmission_ready.features(),
            Channel::Transmitted => self.transmitted.features(),
            Channel::TxFailed => self.tx_failed.features(),
            Channel::TxStarted => self.tx_started.features(),
            Channel::RxStarted => self.rx_started.features(),
            Channel::RxAckStarted => self.rx_ack_started.features(),
            Channel::PrioChanged => self.prio_changed.features(),
        }
    }

    /// Returns the number of candidates on a channel.
    pub fn len(&self, channel: Channel) -> usize {
        match channel {
            Channel::Terminate => self.terminate.len(),
            Channel::PreTransmission => self.pre_transmission.len(),
            Channel::TransmissionReady => self.transmission_ready.len(),
            Channel::Transmitted => self.transmitted.len(),
            Channel::TxFailed => self.tx_failed.len(),
            Channel::TxStarted => self.tx_started.len(),
            Channel::RxStarted => self.rx_started.len(),
            Channel::RxAckStarted => self.rx_ack_started.len(),
            Channel::PrioChanged => self.prio_changed.len(),
        }
    }

    /// Returns the total number of candidates across all channels.
    pub fn total(&self) -> usize {
        Channel::ALL.into_iter().map(|c| self.len(c)).sum()
    }

    /// Summarises every channel in entry-point order.
    pub fn layout(&self) -> Vec<ChannelLayout> {
        Channel::ALL
            .into_iter()
            .map(|channel| ChannelLayout {
                channel,
                policy: channel.policy(),
                veto_meaning: channel.veto_meaning(),
                candidates: self.features(channel),
            })
            .collect()
    }
}

/// Collects hooks from feature modules before the registry is frozen.
#[derive(Debug)]
pub struct HookRegistryBuilder {
    /// Tables under construction.
    tables: HookRegistry,
}

impl HookRegistryBuilder {
    /// Creates an empty builder for the given feature set.
    pub fn new(features: FeatureSet) -> Self {
        Self {
            tables: HookRegistry::empty(features),
        }
    }

    /// Returns the feature set candidates are filtered against.
    pub fn feature_set(&self) -> FeatureSet {
        self.tables.features
    }

    /// Whether a candidate of `feature` belongs in the tables.
    fn admit(&self, channel: Channel, feature: Feature) -> bool {
        let enabled = feature.is_enabled_in(&self.tables.features);
        if !enabled {
            debug!(
                channel = %channel,
                feature = %feature,
                "Feature disabled, hook not registered"
            );
        }
        enabled
    }

    /// Registers a `terminate` hook.
    pub fn register_terminate<F>(&mut self, feature: Feature, hook: F) -> &mut Self
    where
        F: Fn(TermLevel, ReqOriginator) -> bool + Send + Sync + 'static,
    {
        if self.admit(Channel::Terminate, feature) {
            self.tables.terminate.push(feature, Box::new(hook));
        }
        self
    }

    /// Registers a `pre_transmission` hook.
    pub fn register_pre_transmission<F>(&mut self, feature: Feature, hook: F) -> &mut Self
    where
        F: Fn(&[u8], bool, TransmitFailedNotify) -> bool + Send + Sync + 'static,
    {
        if self.admit(Channel::PreTransmission, feature) {
            self.tables.pre_transmission.push(feature, Box::new(hook));
        }
        self
    }

    /// Registers a `transmission_ready` hook.
    pub fn register_transmission_ready<F>(&mut self, feature: Feature, hook: F) -> &mut Self
    where
        F: Fn(&[u8], bool) + Send + Sync + 'static,
    {
        if self.admit(Channel::TransmissionReady, feature) {
            self.tables.transmission_ready.push(feature, Box::new(hook));
        }
        self
    }

    /// Registers a `transmitted` hook.
    pub fn register_transmitted<F>(&mut self, feature: Feature, hook: F) -> &mut Self
    where
        F: Fn(&[u8]) + Send + Sync + 'static,
    {
        if self.admit(Channel::Transmitted, feature) {
            self.tables.transmitted.push(feature, Box::new(hook));
        }
        self
    }

    /// Registers a `tx_failed` hook.
    pub fn register_tx_failed<F>(&mut self, feature: Feature, hook: F) -> &mut Self
    where
        F: Fn(&[u8], TxError) -> bool + Send + Sync + 'static,
    {
        if self.admit(Channel::TxFailed, feature) {
            self.tables.tx_failed.push(feature, Box::new(hook));
        }
        self
    }

    /// Registers a `tx_started` hook.
    pub fn register_tx_started<F>(&mut self, feature: Feature, hook: F) -> &mut Self
    where
        F: Fn(&[u8]) -> bool + Send + Sync + 'static,
    {
        if self.admit(Channel::TxStarted, feature) {
            self.tables.tx_started.push(feature, Box::new(hook));
        }
        self
    }

    /// Registers an `rx_started` hook.
    pub fn register_rx_started<F>(&mut self, feature: Feature, hook: F) -> &mut Self
    where
        F: Fn(&[u8]) + Send + Sync + 'static,
    {
        if self.admit(Channel::RxStarted, feature) {
            self.tables.rx_started.push(feature, Box::new(hook));
        }
        self
    }

    /// Registers an `rx_ack_started` hook.
    pub fn register_rx_ack_started<F>(&mut self, feature: Feature, hook: F) -> &mut Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        if self.admit(Channel::RxAckStarted, feature) {
            self.tables.rx_ack_started.push(feature, Box::new(hook));
        }
        self
    }

    /// Registers a `prio_changed` hook.
    pub fn register_prio_changed<F>(&mut self, feature: Feature, hook: F) -> &mut Self
    where
        F: Fn(Priority, Priority) + Send + Sync + 'static,
    {
        if self.admit(Channel::PrioChanged, feature) {
            self.tables.prio_changed.push(feature, Box::new(hook));
        }
        self
    }

    /// Orders every channel by feature priority and freezes the tables.
    pub fn build(self) -> AppResult<HookRegistry> {
        let tables = self.tables;
        let registry = HookRegistry {
            features: tables.features,
            terminate: tables.terminate.freeze()?,
            pre_transmission: tables.pre_transmission.freeze()?,
            transmission_ready: tables.transmission_ready.freeze()?,
            transmitted: tables.transmitted.freeze()?,
            tx_failed: tables.tx_failed.freeze()?,
            tx_started: tables.tx_started.freeze()?,
            rx_started: tables.rx_started.freeze()?,
            rx_ack_started: tables.rx_ack_started.freeze()?,
            prio_changed: tables.prio_changed.freeze()?,
        };

        info!(
            candidates = registry.total(),
            optional_features = registry.features.enabled_count(),
            "Hook registry frozen"
        );

        Ok(registry)
    }
}
