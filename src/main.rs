//! tankbot CLI - play live games over stdin/stdout and replay transcripts.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// tankbot - a turn-based arena tank bot
#[derive(Parser, Debug)]
#[command(name = "tankbot")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Policy configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log format on stderr: text or json
    #[arg(long, global = true, env = "LOG_FORMAT", default_value = "text")]
    log_format: cli::LogFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a live game on stdin/stdout (the default)
    Play {
        /// Copy every inbound message to a transcript file
        #[arg(long)]
        record: Option<PathBuf>,
    },

    /// Replay a recorded transcript offline
    Replay {
        /// Transcript file written by `play --record`
        #[arg(required = true)]
        transcript: PathBuf,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::ReplayFormat,
    },

    /// Validate a configuration and print the effective settings
    CheckConfig,
}

fn main() -> ExitCode {
    let args = Args::parse();
    cli::logging::init_tracing(args.log_format);

    let config = args.config.as_deref();
    let result = match args.command.unwrap_or(Commands::Play { record: None }) {
        Commands::Play { record } => cli::play::execute(config, record.as_deref()),
        Commands::Replay { transcript, format } => {
            cli::replay::execute(&transcript, config, format)
        }
        Commands::CheckConfig => cli::check_config::execute(config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
