//! QYQ CLI - Command-line interface for Quantum Yi Qing
//!
//! This CLI lets a querent:
//! - Cast a hexagram from a local shot sampler or an executor's counts file
//! - Draw the primary and derivative hexagram of a saved cast
//! - Inspect the counts and classification behind each line
//! - Read how outcomes become lines

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod output;
mod view;

use commands::{cast, explain, record};
use config::CliConfig;
use error::CliResult;

/// QYQ CLI application
#[derive(Parser)]
#[command(name = "qyq")]
#[command(about = "Quantum Yi Qing - cast a Yi Qing oracle from 3-bit measurement counts", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "QYQ_CONFIG", global = true)]
    config: Option<String>,

    /// Output format (table, json, yaml)
    #[arg(short, long, default_value = "table", global = true)]
    output: output::OutputFormat,

    /// Increase verbosity, up to -vvv
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Cast a hexagram
    Cast(cast::CastArgs),

    /// Draw the hexagrams of a saved cast record
    #[command(alias = "from-csv")]
    Draw {
        /// Cast record file
        file: PathBuf,
    },

    /// Show the counts and line values of a saved cast record
    Inspect {
        /// Cast record file
        file: PathBuf,
    },

    /// Explain how measurement counts become a hexagram
    #[command(alias = "usage")]
    Explain,

    /// Show configuration
    Config,
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run(cli: Cli) -> CliResult<()> {
    let config = CliConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Cast(args) => cast::execute(args, &config, cli.output),
        Commands::Draw { file } => record::draw(&file, cli.output),
        Commands::Inspect { file } => record::inspect(&file, cli.output),
        Commands::Explain => {
            explain::execute();
            Ok(())
        }
        Commands::Config => output::print_single(&config, cli.output),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
