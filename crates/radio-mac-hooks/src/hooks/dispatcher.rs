//! Hook dispatcher: the entry points the core state machine calls.
//!
//! For boolean channels (`terminate`, `pre_transmission`, `tx_failed`,
//! `tx_started`):
//! - Candidates are called in priority order.
//! - The first candidate returning `false` ends dispatch; `false` is the verdict.
//! - An empty channel returns `true`.
//!
//! For notification channels:
//! - Every candidate is called exactly once, in priority order.
//! - An empty channel makes no calls.
//!
//! Every entry point runs synchronously on the caller's context. The
//! dispatcher holds no per-call state and only reads its registry.

use tracing::{debug, trace};

use radio_mac_core::types::{Priority, ReqOriginator, TermLevel, TransmitFailedNotify, TxError};

use super::registry::{ChannelHooks, HookRegistry};

/// Dispatches core transitions to the registered feature hooks.
#[derive(Debug)]
pub struct HookDispatcher {
    /// Frozen hook tables.
    registry: HookRegistry,
}

impl HookDispatcher {
    /// Creates a dispatcher owning the given registry.
    pub fn new(registry: HookRegistry) -> Self {
        Self { registry }
    }

    /// Asks every feature whether the in-flight operation may be aborted.
    ///
    /// Returns `false` if a feature refused; the core must not terminate.
    pub fn terminate(&self, term_lvl: TermLevel, req_orig: ReqOriginator) -> bool {
        all_consent(&self.registry.terminate, |hook| hook(term_lvl, req_orig))
    }

    /// Gates a transmit attempt before it starts.
    ///
    /// Returns `false` if a feature deferred the attempt. That feature is
    /// responsible for resuming it later and reports failure through `notify`.
    pub fn pre_transmission(&self, frame: &[u8], cca: bool, notify: TransmitFailedNotify) -> bool {
        all_consent(&self.registry.pre_transmission, |hook| {
            hook(frame, cca, notify)
        })
    }

    /// Announces that a transmit attempt is about to start (`ready == true`)
    /// or was abandoned before starting.
    pub fn transmission_ready(&self, frame: &[u8], ready: bool) {
        fan_out(&self.registry.transmission_ready, |hook| hook(frame, ready));
    }

    /// Announces that a frame was transmitted.
    pub fn transmitted(&self, frame: &[u8]) {
        fan_out(&self.registry.transmitted, |hook| hook(frame));
    }

    /// Reports a failed transmit attempt.
    ///
    /// Returns `false` if a feature consumed the failure; the core then skips
    /// its default failure handling.
    pub fn tx_failed(&self, frame: &[u8], error: TxError) -> bool {
        all_consent(&self.registry.tx_failed, |hook| hook(frame, error))
    }

    /// Confirms that a transmit attempt began on air.
    ///
    /// Returns `false` if a feature vetoed further processing.
    pub fn tx_started(&self, frame: &[u8]) -> bool {
        all_consent(&self.registry.tx_started, |hook| hook(frame))
    }

    /// Announces that frame reception has begun.
    pub fn rx_started(&self, frame: &[u8]) {
        fan_out(&self.registry.rx_started, |hook| hook(frame));
    }

    /// Announces that reception of an ACK frame has begun.
    pub fn rx_ack_started(&self) {
        fan_out(&self.registry.rx_ack_started, |hook| hook());
    }

    /// Announces an operating-priority change.
    pub fn prio_changed(&self, old_prio: Priority, new_prio: Priority) {
        fan_out(&self.registry.prio_changed, |hook| hook(old_prio, new_prio));
    }

    /// Returns the hook registry.
    pub fn registry(&self) -> &HookRegistry {
        &self.registry
    }
}

/// Runs candidates until one returns `false`.
fn all_consent<H, F>(hooks: &ChannelHooks<H>, call: F) -> bool
where
    H: ?Sized,
    F: Fn(&H) -> bool,
{
    trace!(channel = %hooks.channel(), candidates = hooks.len(), "Dispatching hook");

    for (feature, hook) in hooks.iter() {
        if !call(hook) {
            debug!(
                channel = %hooks.channel(),
                feature = %feature,
                meaning = ?hooks.channel().veto_meaning(),
                "Candidate returned false, dispatch stopped"
            );
            return false;
        }
    }

    true
}

/// Runs every candidate once.
fn fan_out<H, F>(hooks: &ChannelHooks<H>, call: F)
where
    H: ?Sized,
    F: Fn(&H),
{
    trace!(channel = %hooks.channel(), candidates = hooks.len(), "Broadcasting hook");

    for (_, hook) in hooks.iter() {
        call(hook);
    }
}
