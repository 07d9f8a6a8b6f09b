//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use super::output::{Output, OutputFormat};
use super::{build, check};

#[derive(Parser)]
#[command(name = "kiln")]
#[command(author, version, about = "JSON-metadata static site pipeline")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Process a site and write the processed model
    Build {
        /// Site root containing kiln.json (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Validate a site without writing anything
    Check {
        /// Site root containing kiln.json (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let output = Output::new(cli.format);

    match cli.command {
        Commands::Build { path } => build::run(&output, &path),
        Commands::Check { path } => check::run(&output, &path),
    }
}

/// Maps repeated `-v` flags onto the tracing filter; `RUST_LOG` wins
/// when set.
fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
