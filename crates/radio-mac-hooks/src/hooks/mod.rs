//! Hook system: channel definitions, registry, and dispatcher.

pub mod definitions;
pub mod dispatcher;
pub mod registry;

pub use definitions::{AggregationPolicy, Channel, Feature, VetoMeaning};
pub use dispatcher::HookDispatcher;
pub use registry::{ChannelLayout, HookRegistry, HookRegistryBuilder};
