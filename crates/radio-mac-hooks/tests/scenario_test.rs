//! End-to-end scenarios using the driver's reference channel membership.

mod common;

use radio_mac_core::config::features::FeatureSet;
use radio_mac_core::types::{Priority, ReqOriginator, TermLevel, TxError};
use radio_mac_hooks::{Channel, Feature};

use common::{CallLog, FRAME, ScriptedModule, engine, ignore_failure, reference_engine};

#[test]
fn test_csma_refusal_stops_terminate() {
    let log = CallLog::new();
    let features = FeatureSet {
        csma_ca: true,
        ack_timeout: true,
        ..FeatureSet::NONE
    };
    let dispatcher = engine(
        features,
        vec![
            ScriptedModule::reference(Feature::CsmaCa, &log).answering(Channel::Terminate, false),
            ScriptedModule::reference(Feature::AckTimeout, &log),
            ScriptedModule::reference(Feature::Ifs, &log),
            ScriptedModule::reference(Feature::TxTimeout, &log),
        ],
    );

    assert_eq!(
        dispatcher.registry().features(Channel::Terminate),
        vec![Feature::CsmaCa, Feature::AckTimeout, Feature::TxTimeout]
    );
    assert!(!dispatcher.terminate(TermLevel::Ieee802154, ReqOriginator::HigherLayer));
    assert_eq!(log.on(Channel::Terminate), vec![Feature::CsmaCa]);
}

#[test]
fn test_no_optional_features_pre_transmission_vacuous() {
    let log = CallLog::new();
    let dispatcher = reference_engine(FeatureSet::NONE, &log);

    assert!(dispatcher.pre_transmission(&FRAME, true, ignore_failure));
    assert!(log.on(Channel::PreTransmission).is_empty());
    assert_eq!(dispatcher.registry().len(Channel::PreTransmission), 0);

    // The transmit timeout guard stays wired.
    assert_eq!(
        dispatcher.registry().features(Channel::Terminate),
        vec![Feature::TxTimeout]
    );
    dispatcher.transmission_ready(&FRAME, true);
    assert_eq!(log.on(Channel::TransmissionReady), vec![Feature::TxTimeout]);
}

#[test]
fn test_ack_timeout_only_rx_notifications() {
    let log = CallLog::new();
    let features = FeatureSet {
        ack_timeout: true,
        ..FeatureSet::NONE
    };
    let dispatcher = reference_engine(features, &log);

    dispatcher.rx_ack_started();
    assert_eq!(log.on(Channel::RxAckStarted), vec![Feature::AckTimeout]);

    dispatcher.rx_started(&FRAME);
    assert!(log.on(Channel::RxStarted).is_empty());
    assert_eq!(log.calls().len(), 1);
}

#[test]
fn test_all_features_tx_failed_consumed_by_ack_timeout() {
    let log = CallLog::new();
    let dispatcher = engine(
        FeatureSet::ALL,
        vec![
            ScriptedModule::reference(Feature::CsmaCa, &log),
            ScriptedModule::reference(Feature::AckTimeout, &log)
                .answering(Channel::TxFailed, false),
            ScriptedModule::reference(Feature::DelayedTrx, &log),
            ScriptedModule::reference(Feature::Ifs, &log),
            ScriptedModule::reference(Feature::TxTimeout, &log),
        ],
    );

    assert!(!dispatcher.tx_failed(&FRAME, TxError::NoAck));
    assert_eq!(
        log.on(Channel::TxFailed),
        vec![Feature::CsmaCa, Feature::AckTimeout]
    );
}

#[test]
fn test_all_features_reference_layout() {
    let log = CallLog::new();
    let dispatcher = reference_engine(FeatureSet::ALL, &log);
    let registry = dispatcher.registry();

    assert_eq!(registry.features(Channel::Terminate), Feature::ALL.to_vec());
    assert_eq!(
        registry.features(Channel::PreTransmission),
        vec![Feature::CsmaCa, Feature::Ifs]
    );
    assert_eq!(
        registry.features(Channel::TransmissionReady),
        vec![Feature::TxTimeout]
    );
    assert_eq!(
        registry.features(Channel::Transmitted),
        vec![Feature::AckTimeout, Feature::Ifs]
    );
    assert_eq!(
        registry.features(Channel::TxStarted),
        vec![Feature::CsmaCa, Feature::AckTimeout]
    );
    assert_eq!(
        registry.features(Channel::RxStarted),
        vec![Feature::DelayedTrx]
    );
    assert_eq!(
        registry.features(Channel::PrioChanged),
        vec![Feature::CsmaCa]
    );

    for channel in Channel::ALL {
        assert_eq!(
            registry.features(channel),
            Feature::reference_candidates(channel, &FeatureSet::ALL),
            "{channel}"
        );
    }
}

#[test]
fn test_transmit_sequence_with_ifs_only() {
    let log = CallLog::new();
    let features = FeatureSet {
        ifs: true,
        ..FeatureSet::NONE
    };
    let dispatcher = reference_engine(features, &log);

    dispatcher.prio_changed(Priority::IDLE, Priority(1));
    assert!(dispatcher.pre_transmission(&FRAME, true, ignore_failure));
    dispatcher.transmission_ready(&FRAME, true);
    assert!(dispatcher.tx_started(&FRAME));
    dispatcher.transmitted(&FRAME);

    assert_eq!(
        log.calls(),
        vec![
            (Channel::PreTransmission, Feature::Ifs),
            (Channel::TransmissionReady, Feature::TxTimeout),
            (Channel::Transmitted, Feature::Ifs),
        ]
    );
}
