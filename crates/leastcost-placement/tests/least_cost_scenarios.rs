//! End-to-end least-cost selection scenarios.
//!
//! Uses a four-host fleet where each host has double the free capacity
//! of the one before it:
//!
//! | host  | free_ram_mb | free_vcpus | free_disk_gb |
//! |-------|-------------|------------|--------------|
//! | host1 | 512         | 1          | 512          |
//! | host2 | 1024        | 2          | 1024         |
//! | host3 | 3072        | 4          | 3072         |
//! | host4 | 8192        | 8          | 8192         |

use leastcost_placement::*;
use leastcost_placement::cost::{
    even_fill_disk_cost, even_fill_ram_cost, even_fill_vcpus_cost, fill_first_cost, noop_cost,
};

fn fleet() -> Vec<(HostId, HostSnapshot)> {
    vec![
        HostSnapshot::new("host1", 512, 1, 512).with_zone("zone1").into_entry(),
        HostSnapshot::new("host2", 1024, 2, 1024).with_zone("zone1").into_entry(),
        HostSnapshot::new("host3", 3072, 4, 3072).with_zone("zone2").into_entry(),
        HostSnapshot::new("host4", 8192, 8, 8192).with_zone("zone2").into_entry(),
    ]
}

fn offset(host: &HostSnapshot, _options: &CostOptions) -> f64 {
    host.free_ram_mb as f64 + 10000.0
}

fn scale(host: &HostSnapshot, _options: &CostOptions) -> f64 {
    host.free_ram_mb as f64 * 2.0
}

#[test]
fn offset_and_scale_pick_smallest_ram() {
    // [offset, scale] normalize to the same row:
    // [0.0, 0.06667, 0.33333, 1.0]
    // so the sums are [0.0, 0.13333, 0.66667, 2.0].
    let fns = vec![
        WeightedCostFunction::new(1.0, "offset", offset),
        WeightedCostFunction::new(1.0, "scale", scale),
    ];

    let winner = weighted_sum(&fns, &fleet(), &CostOptions::new()).unwrap();

    assert_eq!(winner.weight, 0.0);
    assert_eq!(winner.host.as_deref(), Some("host1"));
    assert_eq!(winner.snapshot().map(|s| s.free_ram_mb), Some(512));

    let totals = aggregate_scores(&fns, &fleet(), &CostOptions::new()).unwrap();
    let expected = [0.0, 2.0 / 15.0, 2.0 / 3.0, 2.0];
    for (total, want) in totals.iter().zip(expected) {
        assert!((total - want).abs() < 1e-9, "got {total}, want {want}");
    }
}

#[test]
fn single_function_picks_smallest_ram() {
    let fns = vec![WeightedCostFunction::new(1.0, "offset", offset)];

    let winner = weighted_sum(&fns, &fleet(), &CostOptions::new()).unwrap();

    assert_eq!(winner.weight, 0.0);
    assert_eq!(winner.host.as_deref(), Some("host1"));
}

#[test]
fn even_distribution_picks_most_free_host() {
    let fns = vec![
        WeightedCostFunction::new(1.0, "even_fill_vcpus", even_fill_vcpus_cost),
        WeightedCostFunction::new(1.0, "even_fill_ram", even_fill_ram_cost),
        WeightedCostFunction::new(1.0, "even_fill_disk", even_fill_disk_cost),
    ];

    let winner = weighted_sum(&fns, &fleet(), &CostOptions::new()).unwrap();

    assert_eq!(winner.weight, 0.0);
    assert_eq!(winner.host.as_deref(), Some("host4"));
    assert_eq!(winner.zone.as_deref(), Some("zone2"));
}

#[test]
fn every_row_spans_zero_to_one() {
    let fns = vec![
        WeightedCostFunction::new(1.0, "fill_first", fill_first_cost),
        WeightedCostFunction::new(1.0, "even_fill_vcpus", even_fill_vcpus_cost),
        WeightedCostFunction::new(1.0, "even_fill_disk", even_fill_disk_cost),
    ];

    let matrix = cost_matrix(&fns, &fleet(), &CostOptions::new()).unwrap();
    for row in &matrix {
        let normalized = normalize_row(row);
        assert!(normalized.iter().all(|v| (0.0..=1.0).contains(v)));
        assert!(normalized.contains(&0.0));
        assert!(normalized.contains(&1.0));
    }
}

#[test]
fn uniform_function_does_not_change_the_outcome() {
    let base = vec![WeightedCostFunction::new(1.0, "fill_first", fill_first_cost)];
    let mut with_noop = base.clone();
    with_noop.push(WeightedCostFunction::new(100.0, "noop", noop_cost));

    let options = CostOptions::new();
    assert_eq!(
        aggregate_scores(&base, &fleet(), &options).unwrap(),
        aggregate_scores(&with_noop, &fleet(), &options).unwrap()
    );
}

#[test]
fn scaling_weights_keeps_the_winner() {
    let fns = |factor: f64| {
        vec![
            WeightedCostFunction::new(1.0 * factor, "fill_first", fill_first_cost),
            WeightedCostFunction::new(3.0 * factor, "even_fill_vcpus", even_fill_vcpus_cost),
        ]
    };
    let options = CostOptions::new();

    let baseline = weighted_sum(&fns(1.0), &fleet(), &options).unwrap();
    for factor in [0.01, 2.5, 1000.0] {
        let scaled = weighted_sum(&fns(factor), &fleet(), &options).unwrap();
        assert_eq!(scaled.host, baseline.host, "factor {factor} changed the winner");
    }
}

#[test]
fn identical_inputs_give_identical_results() {
    let registry = CostRegistry::with_builtins();
    let config = LeastCostConfig::from_toml_str(
        r#"
[least_cost]
functions = ["fill_first", "even_fill_vcpus", "even_fill_disk"]

[least_cost.weights]
fill_first = 0.4
"#,
    )
    .unwrap();
    let selector = Selector::from_config(&config, &registry).unwrap();
    let options = CostOptions::new();

    let first = selector.select(&fleet(), &options).unwrap();
    for _ in 0..10 {
        assert_eq!(selector.select(&fleet(), &options).unwrap(), first);
    }
}

#[test]
fn winner_is_always_a_candidate() {
    let registry = CostRegistry::with_builtins();
    let fleet = fleet();

    for name in registry.names() {
        let fns = vec![registry.weighted(name, 1.0).unwrap()];
        let winner = weighted_sum(&fns, &fleet, &CostOptions::new()).unwrap();

        assert!(fleet.iter().any(|(id, _)| Some(id) == winner.host.as_ref()), "{name}");
    }
}

#[test]
fn options_are_forwarded_to_custom_functions() {
    let mut registry = CostRegistry::with_builtins();
    registry.register("avoid_host", |host: &HostSnapshot, options: &CostOptions| {
        let avoid = options.get("avoid").and_then(|v| v.as_str());
        if avoid == Some(host.host.as_str()) { 1.0 } else { 0.0 }
    });
    let fns = vec![
        registry.weighted("even_fill_ram", 1.0).unwrap(),
        registry.weighted("avoid_host", 10.0).unwrap(),
    ];
    let mut options = CostOptions::new();
    options.insert("avoid".to_string(), serde_json::json!("host4"));

    let winner = weighted_sum(&fns, &fleet(), &options).unwrap();

    assert_eq!(winner.host.as_deref(), Some("host3"));
}

#[test]
fn concurrent_passes_share_one_selector() {
    let selector = std::sync::Arc::new(Selector::new(vec![WeightedCostFunction::new(
        1.0,
        "even_fill_ram",
        even_fill_ram_cost,
    )]));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let selector = selector.clone();
            std::thread::spawn(move || selector.select(&fleet(), &CostOptions::new()).unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().host.as_deref(), Some("host4"));
    }
}
