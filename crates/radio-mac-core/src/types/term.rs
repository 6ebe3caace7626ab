//! Termination request parameters.

use super::define_named_enum;

define_named_enum! {
    /// How aggressively the core wants to terminate the current operation.
    TermLevel {
        /// Terminate only if no 802.15.4 operation is in progress.
        None => "none",
        /// Abort any 802.15.4 operation in progress.
        Ieee802154 => "ieee802154",
    }
}

define_named_enum! {
    /// Module that issued a request to the core.
    ReqOriginator {
        /// The next higher layer (MAC user).
        HigherLayer => "higher_layer",
        /// The core state machine itself.
        Core => "core",
        /// The radio scheduler.
        Rsch => "rsch",
        /// The CSMA/CA backoff module.
        CsmaCa => "csma_ca",
        /// The delayed transmit/receive module.
        DelayedTrx => "delayed_trx",
        /// The inter-frame spacing module.
        Ifs => "ifs",
        /// The acknowledgement timeout module.
        AckTimeout => "ack_timeout",
        /// The transmit timeout guard.
        TxTimeout => "tx_timeout",
    }
}

impl TermLevel {
    /// Returns whether this level may interrupt an operation already running.
    pub fn aborts_in_progress(&self) -> bool {
        matches!(self, Self::Ieee802154)
    }
}
