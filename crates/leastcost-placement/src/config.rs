//! leastcost.toml configuration parser.
//!
//! Names the cost functions a scheduler uses and the weight each one
//! carries. The config is a plain value: build it once, resolve it
//! against a [`CostRegistry`], and pass the result into every pass.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cost::WeightedCostFunction;
use crate::error::{PlacementError, PlacementResult};
use crate::registry::{CostRegistry, FILL_FIRST};

/// Weight given to a function that has no explicit entry in `weights`.
pub const DEFAULT_WEIGHT: f64 = 1.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeastCostConfig {
    #[serde(default)]
    pub least_cost: LeastCostSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeastCostSection {
    /// Cost functions to apply, by registry name, in evaluation order.
    #[serde(default = "default_functions")]
    pub functions: Vec<String>,
    /// Per-function weight overrides.
    #[serde(default)]
    pub weights: HashMap<String, f64>,
}

impl Default for LeastCostSection {
    fn default() -> Self {
        Self {
            functions: default_functions(),
            weights: HashMap::new(),
        }
    }
}

fn default_functions() -> Vec<String> {
    vec![FILL_FIRST.to_string()]
}

impl LeastCostConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: LeastCostConfig = toml::from_str(content)?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Weight configured for `function`, or [`DEFAULT_WEIGHT`].
    pub fn weight_for(&self, function: &str) -> f64 {
        self.least_cost
            .weights
            .get(function)
            .copied()
            .unwrap_or(DEFAULT_WEIGHT)
    }

    /// Turn the configured names into weighted cost functions.
    pub fn resolve(&self, registry: &CostRegistry) -> PlacementResult<Vec<WeightedCostFunction>> {
        self.least_cost
            .functions
            .iter()
            .map(|name| {
                let weight = self.weight_for(name);
                if !weight.is_finite() || weight < 0.0 {
                    return Err(PlacementError::InvalidWeight {
                        function: name.clone(),
                        weight,
                    });
                }
                registry.weighted(name, weight)
            })
            .collect()
    }
}
