//! Transmit outcome types.

use super::define_named_enum;

define_named_enum! {
    /// Reason a transmit attempt failed.
    TxError {
        /// No error.
        None => "none",
        /// CCA reported a busy channel.
        BusyChannel => "busy_channel",
        /// The received ACK did not match the transmitted frame.
        InvalidAck => "invalid_ack",
        /// No receive buffer was available for the ACK.
        NoMem => "no_mem",
        /// The radio timeslot ended during the attempt.
        TimeslotEnded => "timeslot_ended",
        /// No ACK arrived before the timeout.
        NoAck => "no_ack",
        /// The attempt was aborted.
        Aborted => "aborted",
        /// The radio scheduler denied the timeslot.
        TimeslotDenied => "timeslot_denied",
    }
}

/// Continuation a deferring `pre_transmission` hook keeps to report a failed
/// transmit attempt later, from its own execution context.
pub type TransmitFailedNotify = fn(&[u8], TxError);
