//! standard-check CLI tool.
//!
//! Usage:
//! ```bash
//! standard-check check [OPTIONS] [PATH]
//! standard-check list-rules
//! standard-check init
//! ```
//!
//! Exit status: 0 when no findings, 1 when findings were reported, 2 when the
//! run itself failed.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Exit status for a run that could not complete.
const EXIT_FATAL: u8 = 2;

/// Style checker for Python naming, docstrings and annotations
#[derive(Parser)]
#[command(name = "standard-check")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check Python files under a directory
    Check {
        /// Directory to check (default: configured root, else current directory)
        path: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Only run specific rules (comma-separated names or codes)
        #[arg(long)]
        rules: Option<String>,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Ignore file to use instead of `<root>/.standardignore`
        #[arg(long)]
        ignore_file: Option<PathBuf>,

        /// Number of worker threads
        #[arg(short, long)]
        jobs: Option<usize>,
    },

    /// List available rules
    ListRules,

    /// Write a default configuration and ignore file
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },
}

/// Output format for check results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// One `path:line: message` line per finding.
    Compact,
    /// JSON report.
    Json,
    /// Source snippets with highlighted spans.
    Pretty,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_FATAL)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Check {
            path,
            format,
            rules,
            exclude,
            ignore_file,
            jobs,
        } => commands::check::run(&commands::check::CheckOptions {
            path,
            format,
            rules_filter: rules,
            exclude,
            ignore_file,
            jobs,
            config: cli.config,
        }),
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(ExitCode::SUCCESS)
        }
        Commands::Init { force } => {
            commands::init::run(std::path::Path::new("."), force)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
