//! # radio-mac-hooks
//!
//! Hook dispatch engine for the 802.15.4 MAC core. Provides:
//!
//! - Channel and feature definitions with per-channel aggregation policy
//! - Hook registry assembled once from the enabled feature set, ordered by
//!   global feature priority and frozen afterwards
//! - Hook dispatcher exposing the nine core entry points with
//!   AND-short-circuit or fan-out semantics
//! - The feature module contract and a manager wiring modules into an engine

pub mod hooks;
pub mod manager;
pub mod prelude;
pub mod traits;

pub use hooks::definitions::{AggregationPolicy, Channel, Feature, VetoMeaning};
pub use hooks::dispatcher::HookDispatcher;
pub use hooks::registry::{ChannelLayout, HookRegistry, HookRegistryBuilder};
pub use manager::FeatureManager;
pub use traits::{FeatureHooks, FeatureModule};
