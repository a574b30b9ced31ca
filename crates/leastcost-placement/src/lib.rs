//! Least-cost host placement — pluggable cost functions, min-max
//! normalization, and weighted-sum selection.
//!
//! This crate decides which host receives a new workload. It does NOT
//! gather inventory or deliver placement requests; callers hand it a
//! point-in-time list of host snapshots and get back the cheapest host.
//!
//! # Components
//!
//! - **`cost`** — Cost function trait and the built-in cost functions
//! - **`registry`** — Name-keyed lookup of cost functions
//! - **`weighted_sum`** — Cost matrix, normalization, and aggregation
//! - **`selector`** — Selection entry point and the `WeightedHost` result
//! - **`config`** — leastcost.toml parsing and resolution
//!
//! # Example
//!
//! ```
//! use leastcost_placement::{CostOptions, CostRegistry, HostSnapshot, LeastCostConfig, Selector};
//!
//! let config = LeastCostConfig::default();
//! let selector = Selector::from_config(&config, &CostRegistry::with_builtins()).unwrap();
//!
//! let hosts = vec![
//!     HostSnapshot::new("host1", 4096, 4, 100).into_entry(),
//!     HostSnapshot::new("host2", 512, 4, 100).into_entry(),
//! ];
//! let winner = selector.select(&hosts, &CostOptions::new()).unwrap();
//! assert_eq!(winner.host.as_deref(), Some("host2"));
//! ```

pub mod config;
pub mod cost;
pub mod error;
pub mod registry;
pub mod selector;
pub mod snapshot;
pub mod weighted_sum;

pub use config::LeastCostConfig;
pub use cost::{CostFunction, CostOptions, WeightedCostFunction};
pub use error::{PlacementError, PlacementResult};
pub use registry::CostRegistry;
pub use selector::{Selector, WeightedHost};
pub use snapshot::{HostId, HostSnapshot};
pub use weighted_sum::{aggregate_scores, cost_matrix, normalize_row, rank_hosts, weighted_sum};
