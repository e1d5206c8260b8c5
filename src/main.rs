//! webwx-inject - replay captured web chat responses through the pipeline
//!
//! Runs the same classifier, rewriter and template patcher the injected
//! layer uses, against JSON payloads or template text from files or stdin.
//!
//! CHANGELOG:
//! - 10/17/2026 - Initial CLI

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use webwx_inject::commands::{self, replay};
use webwx_inject::output::{self, OutputControls};

/// Replay responses through the webwx interception pipeline.
#[derive(Parser, Debug)]
#[command(name = "webwx-inject")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Compact JSON output (no whitespace)
    #[arg(long, global = true)]
    compact: bool,

    /// Type constants JSON (defaults to the stock codes)
    #[arg(long, global = true)]
    constants: Option<PathBuf>,

    /// Config file (default: $WEBWX_INJECT_CONFIG or ~/.webwx-inject/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Transform a JSON response payload
    Transform {
        /// Input file ("-" or omitted for stdin)
        input: Option<PathBuf>,
    },

    /// Patch raw template text
    PatchTemplate {
        /// Input file ("-" or omitted for stdin)
        input: Option<PathBuf>,
    },

    /// Show how a JSON payload is classified
    Classify {
        /// Input file ("-" or omitted for stdin)
        input: Option<PathBuf>,
    },
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = commands::load_config(cli.config.as_deref())?;

    let default_level = if config.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .init();

    let output_controls = OutputControls {
        json: cli.json,
        compact: cli.compact,
    };

    match cli.command {
        Command::Transform { input } => {
            let constants = commands::load_constants(cli.constants.as_deref())?;
            let input = commands::read_input(input.as_deref())?;
            replay::transform(&input, &constants, &config, &output_controls)
        }
        Command::PatchTemplate { input } => {
            let input = commands::read_input(input.as_deref())?;
            replay::patch(&input, &output_controls)
        }
        Command::Classify { input } => {
            let input = commands::read_input(input.as_deref())?;
            replay::classify(&input, &output_controls)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let json = cli.json;

    match run(cli) {
        Ok(()) => ExitCode::from(0),
        Err(e) => {
            if json {
                println!("{}", output::format_error(&format!("{:#}", e)));
            } else {
                eprintln!("Error: {:#}", e);
            }
            ExitCode::from(1)
        }
    }
}
