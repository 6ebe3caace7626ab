//! Prelude for feature module implementations.

pub use std::sync::Arc;

pub use radio_mac_core::config::features::FeatureSet;
pub use radio_mac_core::error::AppError;
pub use radio_mac_core::result::AppResult;
pub use radio_mac_core::types::{
    FrameRef, Priority, ReqOriginator, TermLevel, TransmitFailedNotify, TxError,
};

pub use crate::hooks::definitions::{Channel, Feature};
pub use crate::hooks::dispatcher::HookDispatcher;
pub use crate::manager::FeatureManager;
pub use crate::traits::{FeatureHooks, FeatureModule};
