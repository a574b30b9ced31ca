//! Weighted-sum ranking of candidate hosts.
//!
//! Each cost function is evaluated over every host, giving a cost matrix
//! with one row per function and one column per host. Every row is
//! min-max normalized into `[0, 1]` so that weights mean the same thing
//! regardless of a function's natural range, then scaled by the row's
//! weight. Summing down the columns gives one aggregate per host; the
//! lowest aggregate wins.
//!
//! A row where every host has the same cost contributes 0 to every host.

use std::cmp::Ordering;
use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::cost::{CostOptions, WeightedCostFunction};
use crate::error::{PlacementError, PlacementResult};
use crate::selector::WeightedHost;
use crate::snapshot::{HostId, HostSnapshot};

/// Evaluate every function over every host.
///
/// Returns one row per function, in `weighted_fns` order, with one column
/// per host, in `hosts` order.
pub fn cost_matrix(
    weighted_fns: &[WeightedCostFunction],
    hosts: &[(HostId, HostSnapshot)],
    options: &CostOptions,
) -> PlacementResult<Vec<Vec<f64>>> {
    let mut rows = Vec::with_capacity(weighted_fns.len());
    for weighted in weighted_fns {
        let mut row = Vec::with_capacity(hosts.len());
        for (host, snapshot) in hosts {
            let value = weighted.compute(snapshot, options);
            if !value.is_finite() {
                warn!(function = %weighted.name, host = %host, value, "cost function returned non-finite value");
                return Err(PlacementError::ComputationError {
                    function: weighted.name.clone(),
                    host: host.clone(),
                    value,
                });
            }
            row.push(value);
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Min-max scale a row of raw costs into `[0, 1]`.
///
/// The cheapest entry maps to 0 and the most expensive to 1. If all
/// entries are equal the whole row maps to 0.
pub fn normalize_row(row: &[f64]) -> Vec<f64> {
    let (min, max) = bounds(row);
    if max == min {
        return vec![0.0; row.len()];
    }

    let range = max - min;
    row.iter().map(|value| (value - min) / range).collect()
}

fn bounds(row: &[f64]) -> (f64, f64) {
    row.iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| (min.min(*v), max.max(*v)))
}

/// Compute the aggregate score of every host, in `hosts` order.
pub fn aggregate_scores(
    weighted_fns: &[WeightedCostFunction],
    hosts: &[(HostId, HostSnapshot)],
    options: &CostOptions,
) -> PlacementResult<Vec<f64>> {
    validate(weighted_fns, hosts)?;

    let matrix = cost_matrix(weighted_fns, hosts, options)?;
    let mut totals = vec![0.0; hosts.len()];

    for (weighted, row) in weighted_fns.iter().zip(&matrix) {
        let (min, max) = bounds(row);
        if max == min {
            debug!(function = %weighted.name, cost = min, "uniform costs, function contributes nothing");
        } else {
            debug!(function = %weighted.name, min, max, "normalized cost row");
        }

        let normalized = normalize_row(row);

        for ((total, value), (host, _)) in totals.iter_mut().zip(&normalized).zip(hosts) {
            // A range wider than f64::MAX overflows to infinity here.
            if !value.is_finite() {
                return Err(PlacementError::ComputationError {
                    function: weighted.name.clone(),
                    host: host.clone(),
                    value: *value,
                });
            }
            *total += weighted.weight * value;
            if !total.is_finite() {
                warn!(function = %weighted.name, host = %host, total = *total, "aggregate cost overflowed");
                return Err(PlacementError::ComputationError {
                    function: weighted.name.clone(),
                    host: host.clone(),
                    value: *total,
                });
            }
        }
    }

    Ok(totals)
}

/// Rank every host, lowest aggregate first.
///
/// Hosts with equal aggregates keep their input order.
pub fn rank_hosts(
    weighted_fns: &[WeightedCostFunction],
    hosts: &[(HostId, HostSnapshot)],
    options: &CostOptions,
) -> PlacementResult<Vec<WeightedHost>> {
    let totals = aggregate_scores(weighted_fns, hosts, options)?;

    let mut ranked: Vec<WeightedHost> = totals
        .into_iter()
        .zip(hosts)
        .map(|(weight, (host, snapshot))| WeightedHost::from_snapshot(weight, host, snapshot))
        .collect();

    // Stable: ties stay in input order. Totals are finite here.
    ranked.sort_by(|a, b| a.weight.partial_cmp(&b.weight).unwrap_or(Ordering::Equal));
    Ok(ranked)
}

/// Pick the least-cost host.
pub fn weighted_sum(
    weighted_fns: &[WeightedCostFunction],
    hosts: &[(HostId, HostSnapshot)],
    options: &CostOptions,
) -> PlacementResult<WeightedHost> {
    let winner = rank_hosts(weighted_fns, hosts, options)?
        .into_iter()
        .next()
        .ok_or_else(|| PlacementError::InvalidInput("no candidate hosts".to_string()))?;

    info!(
        host = winner.host.as_deref().unwrap_or_default(),
        weight = winner.weight,
        candidates = hosts.len(),
        "selected least-cost host"
    );
    Ok(winner)
}

fn validate(weighted_fns: &[WeightedCostFunction], hosts: &[(HostId, HostSnapshot)]) -> PlacementResult<()> {
    if hosts.is_empty() {
        return Err(PlacementError::InvalidInput("no candidate hosts".to_string()));
    }
    if weighted_fns.is_empty() {
        return Err(PlacementError::InvalidInput("no cost functions configured".to_string()));
    }

    let mut seen = HashSet::with_capacity(hosts.len());
    for (host, _) in hosts {
        if !seen.insert(host.as_str()) {
            return Err(PlacementError::InvalidInput(format!("host listed more than once: {host}")));
        }
    }

    if let Some(bad) = weighted_fns.iter().find(|w| !w.weight.is_finite()) {
        return Err(PlacementError::InvalidInput(format!(
            "weight for {} is not finite: {}",
            bad.name, bad.weight
        )));
    }

    Ok(())
}
