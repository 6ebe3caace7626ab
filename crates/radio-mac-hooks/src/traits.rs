//! Contract implemented by MAC feature modules.

use std::fmt;
use std::sync::Arc;

use radio_mac_core::result::AppResult;
use radio_mac_core::types::{Priority, ReqOriginator, TermLevel, TransmitFailedNotify, TxError};

use crate::hooks::definitions::Feature;
use crate::hooks::registry::HookRegistryBuilder;

/// A MAC feature module that plugs into core channels.
///
/// A module registers a hook only for the channels it implements. Its
/// position on each channel follows [`Feature`] priority, not registration
/// order.
pub trait FeatureModule: Send + Sync + fmt::Debug {
    /// Returns the feature this module implements.
    fn feature(&self) -> Feature;

    /// Registers the module's hooks.
    ///
    /// Only called when the feature is enabled. Hooks that need module state
    /// capture a clone of `self`.
    fn register_hooks(self: Arc<Self>, hooks: &mut FeatureHooks<'_>) -> AppResult<()>;
}

/// Registration handle scoped to one feature.
///
/// Every hook added through it is filed under that feature, so a module
/// cannot take another feature's slot.
pub struct FeatureHooks<'a> {
    /// Feature the hooks belong to.
    feature: Feature,
    /// Builder receiving the hooks.
    builder: &'a mut HookRegistryBuilder,
}

impl<'a> FeatureHooks<'a> {
    /// Creates a handle filing hooks under `feature`.
    pub fn new(feature: Feature, builder: &'a mut HookRegistryBuilder) -> Self {
        Self { feature, builder }
    }

    /// Returns the feature hooks are filed under.
    pub fn feature(&self) -> Feature {
        self.feature
    }

    /// Hooks `terminate`.
    pub fn terminate<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(TermLevel, ReqOriginator) -> bool + Send + Sync + 'static,
    {
        self.builder.register_terminate(self.feature, hook);
        self
    }

    /// Hooks `pre_transmission`.
    pub fn pre_transmission<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&[u8], bool, TransmitFailedNotify) -> bool + Send + Sync + 'static,
    {
        self.builder.register_pre_transmission(self.feature, hook);
        self
    }

    /// Hooks `transmission_ready`.
    pub fn transmission_ready<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&[u8], bool) + Send + Sync + 'static,
    {
        self.builder.register_transmission_ready(self.feature, hook);
        self
    }

    /// Hooks `transmitted`.
    pub fn transmitted<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&[u8]) + Send + Sync + 'static,
    {
        self.builder.register_transmitted(self.feature, hook);
        self
    }

    /// Hooks `tx_failed`.
    pub fn tx_failed<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&[u8], TxError) -> bool + Send + Sync + 'static,
    {
        self.builder.register_tx_failed(self.feature, hook);
        self
    }

    /// Hooks `tx_started`.
    pub fn tx_started<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&[u8]) -> bool + Send + Sync + 'static,
    {
        self.builder.register_tx_started(self.feature, hook);
        self
    }

    /// Hooks `rx_started`.
    pub fn rx_started<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&[u8]) + Send + Sync + 'static,
    {
        self.builder.register_rx_started(self.feature, hook);
        self
    }

    /// Hooks `rx_ack_started`.
    pub fn rx_ack_started<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.builder.register_rx_ack_started(self.feature, hook);
        self
    }

    /// Hooks `prio_changed`.
    pub fn prio_changed<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(Priority, Priority) + Send + Sync + 'static,
    {
        self.builder.register_prio_changed(self.feature, hook);
        self
    }
}

impl fmt::Debug for FeatureHooks<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureHooks")
            .field("feature", &self.feature)
            .finish()
    }
}
