//! Aggregation behaviour of every channel.

mod common;

use radio_mac_core::config::features::FeatureSet;
use radio_mac_core::types::{Priority, ReqOriginator, TermLevel, TxError};
use radio_mac_hooks::{AggregationPolicy, Channel, Feature, HookDispatcher};

use common::{CallLog, FRAME, ScriptedModule, engine, ignore_failure};

const THREE: [Feature; 3] = [Feature::CsmaCa, Feature::AckTimeout, Feature::Ifs];

/// Invokes `channel` once; boolean channels return their verdict.
fn fire(dispatcher: &HookDispatcher, channel: Channel) -> Option<bool> {
    match channel {
        Channel::Terminate => {
            Some(dispatcher.terminate(TermLevel::Ieee802154, ReqOriginator::HigherLayer))
        }
        Channel::PreTransmission => {
            Some(dispatcher.pre_transmission(&FRAME, true, ignore_failure))
        }
        Channel::TransmissionReady => {
            dispatcher.transmission_ready(&FRAME, true);
            None
        }
        Channel::Transmitted => {
            dispatcher.transmitted(&FRAME);
            None
        }
        Channel::TxFailed => Some(dispatcher.tx_failed(&FRAME, TxError::NoAck)),
        Channel::TxStarted => Some(dispatcher.tx_started(&FRAME)),
        Channel::RxStarted => {
            dispatcher.rx_started(&FRAME);
            None
        }
        Channel::RxAckStarted => {
            dispatcher.rx_ack_started();
            None
        }
        Channel::PrioChanged => {
            dispatcher.prio_changed(Priority(1), Priority(2));
            None
        }
    }
}

/// Engine with candidates [csma_ca, ack_timeout, ifs] on `channel`, the first
/// answering `first_verdict`.
fn three_candidates(channel: Channel, first_verdict: bool, log: &CallLog) -> HookDispatcher {
    engine(
        FeatureSet::ALL,
        THREE
            .into_iter()
            .enumerate()
            .map(|(i, feature)| {
                let module = ScriptedModule::on(feature, &[channel], log);
                if i == 0 {
                    module.answering(channel, first_verdict)
                } else {
                    module
                }
            })
            .collect(),
    )
}

#[test]
fn test_no_features_boolean_true_and_zero_calls() {
    let log = CallLog::new();
    let dispatcher = engine(
        FeatureSet::NONE,
        Feature::ALL
            .into_iter()
            .filter(Feature::is_optional)
            .map(|feature| ScriptedModule::on(feature, &Channel::ALL, &log))
            .collect(),
    );
    assert_eq!(dispatcher.registry().total(), 0);

    for channel in Channel::ALL {
        let verdict = fire(&dispatcher, channel);
        match channel.policy() {
            AggregationPolicy::AndShortCircuit => assert_eq!(verdict, Some(true), "{channel}"),
            AggregationPolicy::FanOut => assert_eq!(verdict, None, "{channel}"),
        }
    }
    assert!(log.calls().is_empty());
}

#[test]
fn test_first_refusal_stops_chain_on_every_boolean_channel() {
    for channel in Channel::ALL.into_iter().filter(|c| c.policy().is_veto()) {
        let log = CallLog::new();
        let dispatcher = three_candidates(channel, false, &log);

        assert_eq!(fire(&dispatcher, channel), Some(false), "{channel}");
        assert_eq!(log.on(channel), vec![Feature::CsmaCa], "{channel}");
    }
}

#[test]
fn test_unanimous_consent_runs_all_in_order() {
    for channel in Channel::ALL.into_iter().filter(|c| c.policy().is_veto()) {
        let log = CallLog::new();
        let dispatcher = three_candidates(channel, true, &log);

        assert_eq!(fire(&dispatcher, channel), Some(true), "{channel}");
        assert_eq!(log.on(channel), THREE.to_vec(), "{channel}");
    }
}

#[test]
fn test_fan_out_totality() {
    for channel in Channel::ALL.into_iter().filter(|c| !c.policy().is_veto()) {
        let log = CallLog::new();
        // A `false` answer means nothing on a notification channel.
        let dispatcher = three_candidates(channel, false, &log);

        assert_eq!(fire(&dispatcher, channel), None, "{channel}");
        assert_eq!(log.on(channel), THREE.to_vec(), "{channel}");
    }
}

#[test]
fn test_declared_policy_matches_observed_behaviour() {
    for channel in Channel::ALL {
        let log = CallLog::new();
        let dispatcher = three_candidates(channel, false, &log);
        fire(&dispatcher, channel);

        let stopped_early = log.on(channel).len() < THREE.len();
        assert_eq!(stopped_early, channel.policy().is_veto(), "{channel}");
    }
}

#[test]
fn test_order_stable_across_invocations() {
    let log = CallLog::new();
    let dispatcher = three_candidates(Channel::Transmitted, true, &log);

    dispatcher.transmitted(&FRAME);
    let first = log.calls();
    log.clear();
    dispatcher.transmitted(&FRAME);
    let second = log.calls();

    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}

#[test]
fn test_repeated_refusal_is_independent_per_call() {
    let log = CallLog::new();
    let dispatcher = three_candidates(Channel::TxStarted, false, &log);

    for _ in 0..3 {
        assert!(!dispatcher.tx_started(&FRAME));
    }
    assert_eq!(log.on(Channel::TxStarted), vec![Feature::CsmaCa; 3]);
}

#[test]
fn test_later_refusal_runs_earlier_candidates() {
    let log = CallLog::new();
    let dispatcher = engine(
        FeatureSet::ALL,
        vec![
            ScriptedModule::on(Feature::CsmaCa, &[Channel::PreTransmission], &log),
            ScriptedModule::on(Feature::Ifs, &[Channel::PreTransmission], &log)
                .answering(Channel::PreTransmission, false),
            ScriptedModule::on(Feature::TxTimeout, &[Channel::PreTransmission], &log),
        ],
    );

    assert!(!dispatcher.pre_transmission(&FRAME, false, ignore_failure));
    assert_eq!(
        log.on(Channel::PreTransmission),
        vec![Feature::CsmaCa, Feature::Ifs]
    );
}

#[test]
fn test_dispatcher_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HookDispatcher>();
}
