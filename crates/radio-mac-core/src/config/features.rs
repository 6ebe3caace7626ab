//! Optional MAC feature selection.
//!
//! Which feature modules exist is decided when the crate is compiled (cargo
//! features `csma-ca`, `ack-timeout`, `delayed-trx`, `ifs`). Configuration can
//! only switch a compiled-in module off; the resolved [`FeatureSet`] is frozen
//! before any hook table is assembled.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Feature switches as read from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureConfig {
    /// CSMA/CA backoff before transmission.
    #[serde(default = "default_csma_ca")]
    pub csma_ca: bool,
    /// Acknowledgement timeout supervision.
    #[serde(default = "default_ack_timeout")]
    pub ack_timeout: bool,
    /// Delayed transmit/receive scheduling.
    #[serde(default = "default_delayed_trx")]
    pub delayed_trx: bool,
    /// Inter-frame spacing enforcement.
    #[serde(default = "default_ifs")]
    pub ifs: bool,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            csma_ca: default_csma_ca(),
            ack_timeout: default_ack_timeout(),
            delayed_trx: default_delayed_trx(),
            ifs: default_ifs(),
        }
    }
}

fn default_csma_ca() -> bool {
    cfg!(feature = "csma-ca")
}

fn default_ack_timeout() -> bool {
    cfg!(feature = "ack-timeout")
}

fn default_delayed_trx() -> bool {
    cfg!(feature = "delayed-trx")
}

fn default_ifs() -> bool {
    cfg!(feature = "ifs")
}

/// Frozen set of enabled optional features.
///
/// The transmit-timeout guard is not listed: it is always present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FeatureSet {
    /// CSMA/CA enabled.
    pub csma_ca: bool,
    /// ACK timeout enabled.
    pub ack_timeout: bool,
    /// Delayed TRX enabled.
    pub delayed_trx: bool,
    /// IFS enabled.
    pub ifs: bool,
}

impl FeatureSet {
    /// No optional feature enabled.
    pub const NONE: Self = Self {
        csma_ca: false,
        ack_timeout: false,
        delayed_trx: false,
        ifs: false,
    };

    /// Every optional feature enabled, regardless of compilation.
    pub const ALL: Self = Self {
        csma_ca: true,
        ack_timeout: true,
        delayed_trx: true,
        ifs: true,
    };

    /// The features compiled into this build.
    pub fn compiled() -> Self {
        Self {
            csma_ca: cfg!(feature = "csma-ca"),
            ack_timeout: cfg!(feature = "ack-timeout"),
            delayed_trx: cfg!(feature = "delayed-trx"),
            ifs: cfg!(feature = "ifs"),
        }
    }

    /// Resolves configured switches against the compiled-in features.
    ///
    /// A feature is enabled only when compiled in and switched on.
    pub fn resolve(config: &FeatureConfig) -> Self {
        Self::resolve_against(config, Self::compiled())
    }

    /// Resolves configured switches against an explicit compiled-in set.
    pub fn resolve_against(config: &FeatureConfig, compiled: Self) -> Self {
        let pick = |name: &str, configured: bool, available: bool| {
            if configured && !available {
                warn!(
                    feature = name,
                    "Feature enabled in configuration but not compiled in, leaving it disabled"
                );
            }
            configured && available
        };

        Self {
            csma_ca: pick("csma_ca", config.csma_ca, compiled.csma_ca),
            ack_timeout: pick("ack_timeout", config.ack_timeout, compiled.ack_timeout),
            delayed_trx: pick("delayed_trx", config.delayed_trx, compiled.delayed_trx),
            ifs: pick("ifs", config.ifs, compiled.ifs),
        }
    }

    /// Number of optional features enabled.
    pub fn enabled_count(&self) -> usize {
        [self.csma_ca, self.ack_timeout, self.delayed_trx, self.ifs]
            .iter()
            .filter(|enabled| **enabled)
            .count()
    }
}
