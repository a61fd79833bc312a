//! Callseq CLI
//!
//! Turns a flat transaction trace into a nested call sequence diagram.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use callseq::commands::{
    display_schema, display_version, execute_generate, validate_args, validate_trace_file,
    GenerateArgs,
};
use callseq::utils::config::{DEFAULT_ARTIFACTS_DIR, DEFAULT_PUML_PATH};

/// Callseq - call sequence diagrams for contract transactions
#[derive(Parser, Debug)]
#[command(name = "callseq")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a sequence diagram from a trace document
    Generate {
        /// Trace document (JSON)
        #[arg(short, long, env = "CALLSEQ_INPUT")]
        input: PathBuf,

        /// Output path for PlantUML source (placed in artifacts/ by default)
        #[arg(short, long, default_value = DEFAULT_PUML_PATH)]
        output: PathBuf,

        /// Output path for the JSON instruction stream (placed in artifacts/ by default)
        #[arg(short, long, default_missing_value = "artifacts/sequence.json", num_args = 0..=1)]
        json: Option<PathBuf>,

        /// Show gas used and gas limit on arrows
        #[arg(long)]
        gas: bool,

        /// Show decoded call parameters
        #[arg(long)]
        params: bool,

        /// Style file (TOML) with colours and currency symbol
        #[arg(long, env = "CALLSEQ_STYLE")]
        style: Option<PathBuf>,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Validate a trace document
    Validate {
        /// Path to trace JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Generate {
            input,
            mut output,
            mut json,
            gas,
            params,
            style,
            summary,
        } => {
            // Bare file names go to artifacts/
            let artifacts_dir = PathBuf::from(DEFAULT_ARTIFACTS_DIR);

            if output.parent().map(|p| p.as_os_str().is_empty()).unwrap_or(true) {
                output = artifacts_dir.join(output);
            }

            if let Some(ref mut path) = json {
                if path.parent().map(|p| p.as_os_str().is_empty()).unwrap_or(true) {
                    *path = artifacts_dir.join(&path);
                }
            }

            let args = GenerateArgs {
                input,
                output_puml: output,
                output_json: json,
                show_gas: gas,
                show_params: params,
                style,
                print_summary: summary,
            };

            validate_args(&args)?;
            execute_generate(args)?;
        }

        Commands::Validate { file } => {
            validate_trace_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
