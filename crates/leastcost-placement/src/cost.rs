//! Cost functions for host placement.
//!
//! A cost function maps a [`HostSnapshot`] to a raw cost. Lower is
//! better. Raw costs are only comparable within one function: the
//! weighted sum normalizes each function's costs before combining them,
//! so a function may use whatever range is natural for it.
//!
//! Built-ins:
//! - **`noop`** — every host costs the same
//! - **`fill_first`** — less free RAM is cheaper (pack before spreading)
//! - **`even_fill_vcpus`**, **`even_fill_ram`**, **`even_fill_disk`** —
//!   more free capacity is cheaper (spread load evenly)

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::snapshot::HostSnapshot;

/// Free-form options forwarded unchanged to every cost function.
pub type CostOptions = HashMap<String, serde_json::Value>;

/// A pluggable scoring rule.
///
/// Implementations must be stateless and return a finite value. A
/// non-finite value aborts the scheduling pass.
pub trait CostFunction: Send + Sync {
    fn compute(&self, snapshot: &HostSnapshot, options: &CostOptions) -> f64;
}

impl<F> CostFunction for F
where
    F: Fn(&HostSnapshot, &CostOptions) -> f64 + Send + Sync,
{
    fn compute(&self, snapshot: &HostSnapshot, options: &CostOptions) -> f64 {
        self(snapshot, options)
    }
}

/// Every host costs 1.
pub fn noop_cost(_snapshot: &HostSnapshot, _options: &CostOptions) -> f64 {
    1.0
}

/// More free RAM costs more, so fuller hosts are filled first.
pub fn fill_first_cost(snapshot: &HostSnapshot, _options: &CostOptions) -> f64 {
    snapshot.free_ram_mb as f64
}

/// Hosts with more free vCPUs cost less.
pub fn even_fill_vcpus_cost(snapshot: &HostSnapshot, _options: &CostOptions) -> f64 {
    -(snapshot.free_vcpus as f64)
}

/// Hosts with more free RAM cost less.
pub fn even_fill_ram_cost(snapshot: &HostSnapshot, _options: &CostOptions) -> f64 {
    -(snapshot.free_ram_mb as f64)
}

/// Hosts with more free disk cost less.
pub fn even_fill_disk_cost(snapshot: &HostSnapshot, _options: &CostOptions) -> f64 {
    -(snapshot.free_disk_gb as f64)
}

/// A cost function paired with the weight its normalized cost carries in
/// the final sum.
#[derive(Clone)]
pub struct WeightedCostFunction {
    pub weight: f64,
    /// Name used in logs and errors.
    pub name: String,
    pub function: Arc<dyn CostFunction>,
}

impl WeightedCostFunction {
    pub fn new(weight: f64, name: impl Into<String>, function: impl CostFunction + 'static) -> Self {
        Self {
            weight,
            name: name.into(),
            function: Arc::new(function),
        }
    }

    pub fn from_shared(weight: f64, name: impl Into<String>, function: Arc<dyn CostFunction>) -> Self {
        Self {
            weight,
            name: name.into(),
            function,
        }
    }

    pub fn compute(&self, snapshot: &HostSnapshot, options: &CostOptions) -> f64 {
        self.function.compute(snapshot, options)
    }
}

impl fmt::Debug for WeightedCostFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeightedCostFunction")
            .field("weight", &self.weight)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
