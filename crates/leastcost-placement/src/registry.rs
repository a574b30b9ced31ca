//! Name-keyed registry of cost functions.
//!
//! Built once at startup and shared read-only between scheduling passes.
//! Configuration refers to cost functions by the names registered here.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::cost::{
    CostFunction, WeightedCostFunction, even_fill_disk_cost, even_fill_ram_cost,
    even_fill_vcpus_cost, fill_first_cost, noop_cost,
};
use crate::error::{PlacementError, PlacementResult};

pub const NOOP: &str = "noop";
pub const FILL_FIRST: &str = "fill_first";
pub const EVEN_FILL_VCPUS: &str = "even_fill_vcpus";
pub const EVEN_FILL_RAM: &str = "even_fill_ram";
pub const EVEN_FILL_DISK: &str = "even_fill_disk";

/// Cost functions available to configuration, keyed by name.
#[derive(Clone, Default)]
pub struct CostRegistry {
    functions: BTreeMap<String, Arc<dyn CostFunction>>,
}

impl CostRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in cost functions.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(NOOP, noop_cost);
        registry.register(FILL_FIRST, fill_first_cost);
        registry.register(EVEN_FILL_VCPUS, even_fill_vcpus_cost);
        registry.register(EVEN_FILL_RAM, even_fill_ram_cost);
        registry.register(EVEN_FILL_DISK, even_fill_disk_cost);
        registry
    }

    /// Register `function` under `name`, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, function: impl CostFunction + 'static) {
        let name = name.into();
        debug!(function = %name, "registered cost function");
        self.functions.insert(name, Arc::new(function));
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn CostFunction>> {
        self.functions.get(name).cloned()
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    /// Look up `name` and pair it with `weight`.
    pub fn weighted(&self, name: &str, weight: f64) -> PlacementResult<WeightedCostFunction> {
        let function = self
            .get(name)
            .ok_or_else(|| PlacementError::UnknownCostFunction(name.to_string()))?;
        Ok(WeightedCostFunction::from_shared(weight, name, function))
    }
}

impl std::fmt::Debug for CostRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.functions.keys()).finish()
    }
}
