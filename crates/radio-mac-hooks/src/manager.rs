//! Feature manager: assembles the dispatch engine from enabled modules.

use std::sync::Arc;

use tracing::{debug, info, warn};

use radio_mac_core::config::features::FeatureSet;
use radio_mac_core::error::AppError;
use radio_mac_core::result::AppResult;

use crate::hooks::definitions::Feature;
use crate::hooks::dispatcher::HookDispatcher;
use crate::hooks::registry::HookRegistryBuilder;
use crate::traits::{FeatureHooks, FeatureModule};

/// Collects feature modules and wires the enabled ones into a dispatcher.
#[derive(Debug)]
pub struct FeatureManager {
    /// Resolved feature set.
    features: FeatureSet,
    /// Modules supplied by the driver build.
    modules: Vec<Arc<dyn FeatureModule>>,
}

impl FeatureManager {
    /// Creates a manager for the given feature set.
    pub fn new(features: FeatureSet) -> Self {
        Self {
            features,
            modules: Vec::new(),
        }
    }

    /// Adds a module. At most one module per feature is accepted.
    pub fn add(&mut self, module: Arc<dyn FeatureModule>) -> AppResult<()> {
        let feature = module.feature();
        if self.modules.iter().any(|m| m.feature() == feature) {
            return Err(AppError::validation(format!(
                "a module for feature '{feature}' is already added"
            )));
        }

        debug!(feature = %feature, "Feature module added");
        self.modules.push(module);
        Ok(())
    }

    /// Adds a module, consuming and returning the manager.
    pub fn with_module(mut self, module: Arc<dyn FeatureModule>) -> AppResult<Self> {
        self.add(module)?;
        Ok(self)
    }

    /// Returns the resolved feature set.
    pub fn feature_set(&self) -> FeatureSet {
        self.features
    }

    /// Returns the features of all added modules, in priority order.
    pub fn module_features(&self) -> Vec<Feature> {
        let mut features: Vec<Feature> = self.modules.iter().map(|m| m.feature()).collect();
        features.sort();
        features
    }

    /// Returns the always-present features no module was added for.
    pub fn missing_mandatory(&self) -> Vec<Feature> {
        Feature::ALL
            .into_iter()
            .filter(|feature| !feature.is_optional())
            .filter(|feature| self.modules.iter().all(|m| m.feature() != *feature))
            .collect()
    }

    /// Lets every enabled module register its hooks and freezes the result.
    ///
    /// Modules of disabled features are never asked to register. A missing
    /// transmit-timeout module is logged with `warn!`; the build still
    /// succeeds.
    pub fn build(&self) -> AppResult<HookDispatcher> {
        for feature in self.missing_mandatory() {
            warn!(feature = %feature, "No module added for an always-present feature");
        }

        let mut builder = HookRegistryBuilder::new(self.features);

        for module in &self.modules {
            let feature = module.feature();
            if !feature.is_enabled_in(&self.features) {
                debug!(feature = %feature, "Feature disabled, module skipped");
                continue;
            }

            let mut hooks = FeatureHooks::new(feature, &mut builder);
            Arc::clone(module).register_hooks(&mut hooks).map_err(|e| {
                AppError::validation(format!(
                    "feature '{feature}' failed to register hooks: {}",
                    e.message
                ))
            })?;
        }

        let registry = builder.build()?;

        for entry in registry.layout() {
            info!(
                channel = %entry.channel,
                policy = %entry.policy,
                candidates = ?entry.candidates,
                "Channel assembled"
            );
        }

        Ok(HookDispatcher::new(registry))
    }
}
