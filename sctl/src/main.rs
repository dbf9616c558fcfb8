//! sctl: Selenium configuration management tool
//!
//! # Usage
//!
//! ```bash
//! # Write one <quota>.xml per quota and alias into ./out
//! sctl generate --inputFile input.json --outputDirectory out
//!
//! # Print the XML instead of writing files
//! sctl generate --dryRun
//!
//! # Session slots per browser version and region
//! sctl stat --quotaName team-a
//! ```
//!
//! Set `RUST_LOG=debug` for compilation logs on stderr.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use sctl_core::config::{DEFAULT_INPUT_FILE, DEFAULT_OUTPUT_DIRECTORY};
use sctl_core::{run_generate, run_stat, GenerateConfig, StatConfig};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sctl")]
#[command(version)]
#[command(about = "sctl is a Selenium configuration management tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate XML quota using JSON input file
    Generate(GenerateArgs),

    /// Show quota statistics using JSON input file
    Stat(StatArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Path to input file
    #[arg(long = "inputFile", default_value = DEFAULT_INPUT_FILE)]
    input_file: PathBuf,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output directory
    #[arg(long = "outputDirectory", default_value = DEFAULT_OUTPUT_DIRECTORY)]
    output_directory: PathBuf,

    /// Send output to stdout instead of writing files
    #[arg(long = "dryRun")]
    dry_run: bool,
}

#[derive(Args, Debug)]
struct StatArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Quota name (all quotas when empty)
    #[arg(long = "quotaName", default_value = "")]
    quota_name: String,
}

impl From<GenerateArgs> for GenerateConfig {
    fn from(args: GenerateArgs) -> Self {
        Self {
            input_file: args.input.input_file,
            output_directory: args.output_directory,
            dry_run: args.dry_run,
        }
    }
}

impl From<StatArgs> for StatConfig {
    fn from(args: StatArgs) -> Self {
        StatConfig::new(args.input.input_file, &args.quota_name)
    }
}

// =============================================================================
// MAIN
// =============================================================================

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Generate(args) => {
            let config = GenerateConfig::from(args);
            debug!(?config, "generate");
            run_generate(&config, &mut out)?;
        }
        Commands::Stat(args) => {
            let config = StatConfig::from(args);
            debug!(?config, "stat");
            run_stat(&config, &mut out)?;
        }
    }
    Ok(())
}
