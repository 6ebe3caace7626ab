//! Channel and feature definitions.
//!
//! A [`Channel`] is one extension point the core state machine exposes. Each
//! channel carries a fixed [`AggregationPolicy`]; boolean channels also name
//! what a `false` verdict means to the core through [`VetoMeaning`].
//!
//! A [`Feature`] is an optional MAC module (plus the always-present transmit
//! timeout guard). The declaration order of [`Feature`] is the global priority
//! order in which candidates run on every channel.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use radio_mac_core::config::features::FeatureSet;
use radio_mac_core::error::AppError;
use radio_mac_core::types::ReqOriginator;

/// Enumeration of all extension points exposed to the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// The core requests abort of the in-flight operation.
    Terminate,
    /// Gate before a transmit attempt starts.
    PreTransmission,
    /// A transmit attempt is about to start or was abandoned before starting.
    TransmissionReady,
    /// A frame was physically transmitted.
    Transmitted,
    /// A transmit attempt failed.
    TxFailed,
    /// A transmit attempt actually began on air.
    TxStarted,
    /// Frame reception has begun.
    RxStarted,
    /// Reception of an acknowledgement frame has begun.
    RxAckStarted,
    /// The operating priority changed.
    PrioChanged,
}

impl Channel {
    /// Every channel in entry-point order.
    pub const ALL: [Self; 9] = [
        Self::Terminate,
        Self::PreTransmission,
        Self::TransmissionReady,
        Self::Transmitted,
        Self::TxFailed,
        Self::TxStarted,
        Self::RxStarted,
        Self::RxAckStarted,
        Self::PrioChanged,
    ];

    /// Returns the string name of this channel.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Terminate => "terminate",
            Self::PreTransmission => "pre_transmission",
            Self::TransmissionReady => "transmission_ready",
            Self::Transmitted => "transmitted",
            Self::TxFailed => "tx_failed",
            Self::TxStarted => "tx_started",
            Self::RxStarted => "rx_started",
            Self::RxAckStarted => "rx_ack_started",
            Self::PrioChanged => "prio_changed",
        }
    }

    /// Returns how candidate results on this channel are combined.
    pub fn policy(&self) -> AggregationPolicy {
        match self {
            Self::Terminate | Self::PreTransmission | Self::TxFailed | Self::TxStarted => {
                AggregationPolicy::AndShortCircuit
            }
            Self::TransmissionReady
            | Self::Transmitted
            | Self::RxStarted
            | Self::RxAckStarted
            | Self::PrioChanged => AggregationPolicy::FanOut,
        }
    }

    /// Returns what a `false` verdict means to the core, for boolean channels.
    pub fn veto_meaning(&self) -> Option<VetoMeaning> {
        match self {
            Self::Terminate => Some(VetoMeaning::Refusal),
            Self::PreTransmission => Some(VetoMeaning::Deferral),
            Self::TxFailed => Some(VetoMeaning::Consumption),
            Self::TxStarted => Some(VetoMeaning::Veto),
            _ => None,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|channel| channel.as_str() == s)
            .ok_or_else(|| AppError::validation(format!("unknown channel '{s}'")))
    }
}

/// How the results of a channel's candidates are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationPolicy {
    /// Candidates run in order until one returns `false`; that `false` is the
    /// verdict. An empty channel yields `true`.
    AndShortCircuit,
    /// Every candidate runs exactly once; there is no verdict.
    FanOut,
}

impl AggregationPolicy {
    /// Returns the string name of this policy.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AndShortCircuit => "and_short_circuit",
            Self::FanOut => "fan_out",
        }
    }

    /// Returns whether candidates on this policy can stop dispatch.
    pub fn is_veto(&self) -> bool {
        matches!(self, Self::AndShortCircuit)
    }
}

impl fmt::Display for AggregationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interpretation of a `false` verdict on a boolean channel.
///
/// The core reacts differently to each, so they are not collapsed into one
/// generic veto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VetoMeaning {
    /// A feature cannot abort cleanly yet; the termination request is refused.
    Refusal,
    /// A feature postpones the attempt and resumes it later through the
    /// transmit-failed notify continuation.
    Deferral,
    /// A feature took ownership of the failure (e.g. it retries internally);
    /// the core skips its default failure handling.
    Consumption,
    /// A feature stops further processing of a started transmission.
    Veto,
}

impl VetoMeaning {
    /// Returns the string name of this meaning.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Refusal => "refusal",
            Self::Deferral => "deferral",
            Self::Consumption => "consumption",
            Self::Veto => "veto",
        }
    }
}

impl fmt::Display for VetoMeaning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// MAC feature modules, declared in global priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Carrier-sense multiple access with collision avoidance.
    CsmaCa,
    /// Acknowledgement timeout supervision.
    AckTimeout,
    /// Delayed transmit/receive scheduling.
    DelayedTrx,
    /// Inter-frame spacing enforcement.
    Ifs,
    /// Transmit timeout guard. Always present.
    TxTimeout,
}

impl Feature {
    /// Every feature in priority order.
    pub const ALL: [Self; 5] = [
        Self::CsmaCa,
        Self::AckTimeout,
        Self::DelayedTrx,
        Self::Ifs,
        Self::TxTimeout,
    ];

    /// Returns the string name of this feature.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CsmaCa => "csma_ca",
            Self::AckTimeout => "ack_timeout",
            Self::DelayedTrx => "delayed_trx",
            Self::Ifs => "ifs",
            Self::TxTimeout => "tx_timeout",
        }
    }

    /// Returns whether the feature can be switched off.
    pub fn is_optional(&self) -> bool {
        !matches!(self, Self::TxTimeout)
    }

    /// Returns whether the feature is part of the given build.
    pub fn is_enabled_in(&self, features: &FeatureSet) -> bool {
        match self {
            Self::CsmaCa => features.csma_ca,
            Self::AckTimeout => features.ack_timeout,
            Self::DelayedTrx => features.delayed_trx,
            Self::Ifs => features.ifs,
            Self::TxTimeout => true,
        }
    }

    /// Channels the driver's implementation of this feature hooks into.
    pub fn channels(&self) -> &'static [Channel] {
        match self {
            Self::CsmaCa => &[
                Channel::Terminate,
                Channel::PreTransmission,
                Channel::TxFailed,
                Channel::TxStarted,
                Channel::PrioChanged,
            ],
            Self::AckTimeout => &[
                Channel::Terminate,
                Channel::Transmitted,
                Channel::TxFailed,
                Channel::TxStarted,
                Channel::RxAckStarted,
            ],
            Self::DelayedTrx => &[Channel::Terminate, Channel::RxStarted],
            Self::Ifs => &[
                Channel::Terminate,
                Channel::PreTransmission,
                Channel::Transmitted,
            ],
            Self::TxTimeout => &[Channel::Terminate, Channel::TransmissionReady],
        }
    }

    /// Returns whether the driver's implementation hooks into `channel`.
    pub fn participates_in(&self, channel: Channel) -> bool {
        self.channels().contains(&channel)
    }

    /// Originator tag the feature uses for its own requests to the core.
    pub fn originator(&self) -> ReqOriginator {
        match self {
            Self::CsmaCa => ReqOriginator::CsmaCa,
            Self::AckTimeout => ReqOriginator::AckTimeout,
            Self::DelayedTrx => ReqOriginator::DelayedTrx,
            Self::Ifs => ReqOriginator::Ifs,
            Self::TxTimeout => ReqOriginator::TxTimeout,
        }
    }

    /// Features of the given build that hook into `channel`, in priority order.
    pub fn reference_candidates(channel: Channel, features: &FeatureSet) -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|feature| feature.is_enabled_in(features) && feature.participates_in(channel))
            .collect()
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Feature {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|feature| feature.as_str() == s)
            .ok_or_else(|| AppError::validation(format!("unknown feature '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policies() {
        let vetoing: Vec<Channel> = Channel::ALL
            .into_iter()
            .filter(|c| c.policy().is_veto())
            .collect();
        assert_eq!(
            vetoing,
            vec![
                Channel::Terminate,
                Channel::PreTransmission,
                Channel::TxFailed,
                Channel::TxStarted,
            ]
        );
    }

    #[test]
    fn test_veto_meaning_only_on_boolean_channels() {
        for channel in Channel::ALL {
            assert_eq!(
                channel.veto_meaning().is_some(),
                channel.policy() == AggregationPolicy::AndShortCircuit,
                "{channel}"
            );
        }
        assert_eq!(
            Channel::PreTransmission.veto_meaning(),
            Some(VetoMeaning::Deferral)
        );
        assert_eq!(
            Channel::TxFailed.veto_meaning(),
            Some(VetoMeaning::Consumption)
        );
    }

    #[test]
    fn test_priority_order() {
        let mut shuffled = vec![
            Feature::TxTimeout,
            Feature::Ifs,
            Feature::CsmaCa,
            Feature::DelayedTrx,
            Feature::AckTimeout,
        ];
        shuffled.sort();
        assert_eq!(shuffled, Feature::ALL.to_vec());
    }

    #[test]
    fn test_tx_timeout_always_enabled() {
        assert!(Feature::TxTimeout.is_enabled_in(&FeatureSet::NONE));
        assert!(!Feature::TxTimeout.is_optional());
        assert!(!Feature::Ifs.is_enabled_in(&FeatureSet::NONE));
    }

    #[test]
    fn test_reference_candidates() {
        let all = FeatureSet::ALL;
        assert_eq!(
            Feature::reference_candidates(Channel::Terminate, &all),
            Feature::ALL.to_vec()
        );
        assert_eq!(
            Feature::reference_candidates(Channel::TxFailed, &all),
            vec![Feature::CsmaCa, Feature::AckTimeout]
        );
        assert_eq!(
            Feature::reference_candidates(Channel::PreTransmission, &FeatureSet::NONE),
            Vec::<Feature>::new()
        );
    }

    #[test]
    fn test_parse_names() {
        for channel in Channel::ALL {
            assert_eq!(channel.as_str().parse::<Channel>().unwrap(), channel);
        }
        assert_eq!("ifs".parse::<Feature>().unwrap(), Feature::Ifs);
        assert!("aloha".parse::<Feature>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Channel::RxAckStarted).unwrap();
        assert_eq!(json, "\"rx_ack_started\"");
        let json = serde_json::to_string(&AggregationPolicy::AndShortCircuit).unwrap();
        assert_eq!(json, "\"and_short_circuit\"");
    }
}
