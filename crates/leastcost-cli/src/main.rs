use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "leastcost",
    about = "Least-cost host placement — pick the cheapest host for a workload",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank candidate hosts and print the least-cost one as JSON.
    ///
    /// The hosts file is a JSON array of snapshots:
    /// [{"host": "host1", "zone": "az-1", "free_ram_mb": 512,
    ///   "free_vcpus": 1, "free_disk_gb": 512}, ...]
    Select {
        /// Path to the host snapshot file
        #[arg(long)]
        hosts: PathBuf,
        /// Path to leastcost.toml (default: fill_first with weight 1.0)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Path to a JSON object forwarded to every cost function
        #[arg(short, long)]
        options: Option<PathBuf>,
        /// Print every host, least cost first, instead of only the winner
        #[arg(long)]
        rank: bool,
    },
    /// List the built-in cost functions
    Functions,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("leastcost=info".parse()?)
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Select { hosts, config, options, rank } => {
            commands::select::select(&hosts, config.as_deref(), options.as_deref(), rank)
        }
        Commands::Functions => commands::functions::list(),
    }
}
