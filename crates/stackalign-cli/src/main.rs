mod commands;
mod preview;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stackalign", about = "Image stack alignment and normalization tool")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show stack container metadata
    Info(commands::info::InfoArgs),
    /// Normalize a stack to 8-bit display range and export it
    Normalize(commands::normalize::NormalizeArgs),
    /// Run an alignment workflow
    #[command(subcommand)]
    Align(commands::align::AlignCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Normalize(args) => commands::normalize::run(args),
        Commands::Align(cmd) => commands::align::run(cmd),
    }
}
