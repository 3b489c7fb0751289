//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod generate;
pub mod search;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Map poster client
#[derive(Parser)]
#[command(name = "map-poster")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Look up places the way the search box does
    Search(search::SearchArgs),

    /// Generate a poster for a place
    Generate(generate::GenerateArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Install the stderr subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();
}

/// Run the CLI
pub async fn run() -> crate::error::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Search(args) => search::run(args).await,
        Commands::Generate(args) => generate::run(args).await,
        Commands::Config(args) => config::run(args),
    }
}
