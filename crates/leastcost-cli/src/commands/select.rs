use std::path::Path;

use anyhow::Context;
use leastcost_placement::{CostOptions, CostRegistry, HostSnapshot, LeastCostConfig, Selector};

pub fn select(hosts: &Path, config: Option<&Path>, options: Option<&Path>, rank: bool) -> anyhow::Result<()> {
    let output = render(hosts, config, options, rank)?;
    println!("{output}");
    Ok(())
}

/// Run one selection pass and format the result as pretty JSON.
pub fn render(hosts: &Path, config: Option<&Path>, options: Option<&Path>, rank: bool) -> anyhow::Result<String> {
    let config = match config {
        Some(path) => LeastCostConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => LeastCostConfig::default(),
    };
    let selector = Selector::from_config(&config, &CostRegistry::with_builtins())?;

    let hosts = load_hosts(hosts)?;
    let options = match options {
        Some(path) => load_options(path)?,
        None => CostOptions::new(),
    };

    tracing::debug!(
        hosts = hosts.len(),
        functions = selector.cost_functions().len(),
        "ranking candidate hosts"
    );

    let output = if rank {
        let ranked = selector.rank(&hosts, &options)?;
        serde_json::to_string_pretty(&ranked)?
    } else {
        let winner = selector.select(&hosts, &options)?;
        serde_json::to_string_pretty(&winner)?
    };
    Ok(output)
}

fn load_hosts(path: &Path) -> anyhow::Result<Vec<(String, HostSnapshot)>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read hosts file {}", path.display()))?;
    let snapshots: Vec<HostSnapshot> = serde_json::from_str(&content)
        .with_context(|| format!("invalid hosts file {}", path.display()))?;
    Ok(snapshots.into_iter().map(HostSnapshot::into_entry).collect())
}

fn load_options(path: &Path) -> anyhow::Result<CostOptions> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read options file {}", path.display()))?;
    let options: CostOptions = serde_json::from_str(&content)
        .with_context(|| format!("invalid options file {}", path.display()))?;
    Ok(options)
}
