//! Host selection and the result handed back to the placement caller.
//!
//! A [`Selector`] holds the weighted cost functions resolved from
//! configuration. It is built once and borrowed by every scheduling
//! pass; it holds no per-pass state, so one selector can serve
//! concurrent requests.

use serde::Serialize;
use serde_json::Value;

use crate::config::LeastCostConfig;
use crate::cost::{CostOptions, WeightedCostFunction};
use crate::error::PlacementResult;
use crate::registry::CostRegistry;
use crate::snapshot::{HostId, HostSnapshot};
use crate::weighted_sum::{rank_hosts, weighted_sum};

/// A host together with its aggregate cost.
///
/// Serializes as `{ weight, host?, payload?, zone? }`. The optional fields
/// are omitted when absent or empty; the snapshot never leaves the
/// scheduler.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedHost {
    pub weight: f64,
    #[serde(skip_serializing_if = "is_blank")]
    pub host: Option<HostId>,
    #[serde(skip_serializing_if = "is_empty_payload")]
    pub payload: Option<Value>,
    #[serde(skip_serializing_if = "is_blank")]
    pub zone: Option<String>,
    #[serde(skip)]
    snapshot: Option<HostSnapshot>,
}

impl WeightedHost {
    pub fn new(weight: f64) -> Self {
        Self {
            weight,
            host: None,
            payload: None,
            zone: None,
            snapshot: None,
        }
    }

    pub(crate) fn from_snapshot(weight: f64, host: &HostId, snapshot: &HostSnapshot) -> Self {
        Self {
            weight,
            host: Some(host.clone()),
            payload: None,
            zone: snapshot.zone.clone(),
            snapshot: Some(snapshot.clone()),
        }
    }

    /// Attach an opaque payload returned to the caller alongside the host.
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// The snapshot the host was ranked on.
    pub fn snapshot(&self) -> Option<&HostSnapshot> {
        self.snapshot.as_ref()
    }

    /// The externally visible form of this result.
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

fn is_blank(field: &Option<String>) -> bool {
    field.as_deref().is_none_or(str::is_empty)
}

fn is_empty_payload(payload: &Option<Value>) -> bool {
    match payload {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Object(map)) => map.is_empty(),
        Some(_) => false,
    }
}

/// Picks the least-cost host for each scheduling pass.
#[derive(Debug, Clone)]
pub struct Selector {
    weighted_fns: Vec<WeightedCostFunction>,
}

impl Selector {
    pub fn new(weighted_fns: Vec<WeightedCostFunction>) -> Self {
        Self { weighted_fns }
    }

    /// Resolve `config` against `registry` into a selector.
    pub fn from_config(config: &LeastCostConfig, registry: &CostRegistry) -> PlacementResult<Self> {
        Ok(Self::new(config.resolve(registry)?))
    }

    pub fn cost_functions(&self) -> &[WeightedCostFunction] {
        &self.weighted_fns
    }

    /// The single least-cost host.
    pub fn select(&self, hosts: &[(HostId, HostSnapshot)], options: &CostOptions) -> PlacementResult<WeightedHost> {
        weighted_sum(&self.weighted_fns, hosts, options)
    }

    /// Every host, least cost first.
    pub fn rank(&self, hosts: &[(HostId, HostSnapshot)], options: &CostOptions) -> PlacementResult<Vec<WeightedHost>> {
        rank_hosts(&self.weighted_fns, hosts, options)
    }
}
