//! Schelling CLI - run segregation experiments from the command line.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::WorldArgs;

#[derive(Parser)]
#[command(name = "schelling")]
#[command(author, version, about = "Schelling - segregation on a toroidal grid", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress the per-iteration report
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default schelling.toml
    Init {
        /// Project directory (default: current directory)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Run one simulation to a terminal state
    Run {
        #[command(flatten)]
        world: WorldArgs,

        /// Write the run report as JSON
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Run the same world over a range of thresholds
    Sweep {
        #[command(flatten)]
        world: WorldArgs,

        /// Number of intervals between threshold 0 and 1
        #[arg(short, long, default_value = "10")]
        steps: usize,

        /// Write the sweep points as JSON
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Init { path } => commands::init::run(path),
        Commands::Run { world, output } => commands::run::run(&world, output, cli.quiet),
        Commands::Sweep { world, steps, output } => {
            commands::sweep::run(&world, steps, output, cli.quiet)
        }
    }
}
