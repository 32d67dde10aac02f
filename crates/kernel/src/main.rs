//! ABO Study content tool
//!
//! Renders, validates and inspects content studio document exports.
//!
//! Usage:
//!   abo-study render lessons/prentices-rule.json
//!   abo-study anchors lessons/prentices-rule.json --path topics/prentices-rule

use std::path::PathBuf;
use std::process::ExitCode;

use abo_study_kernel::cli;
use abo_study_kernel::{AppError, Config, SchemaRegistry};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a document's rich-text body (or a bare block array) to HTML.
    Render {
        /// Document export (JSON).
        file: PathBuf,
    },
    /// Check a document against its schema.
    Validate {
        /// Document export (JSON).
        file: PathBuf,
    },
    /// Print deep-link URLs for the document's level-3 headings.
    Anchors {
        /// Document export (JSON).
        file: PathBuf,
        /// Site path of the document, e.g. "topics/prentices-rule".
        #[arg(long)]
        path: String,
    },
    /// Print the registered document schema as JSON.
    Schema,
}

fn main() -> Result<ExitCode> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let args = Args::parse();
    let registry = SchemaRegistry::with_standard_types();

    let output = match args.command {
        Command::Render { file } => cli::cmd_render(&file),
        Command::Validate { file } => match cli::cmd_validate(&registry, &file) {
            Err(AppError::Validation(errors)) => {
                for error in &errors {
                    eprintln!("{error}");
                }
                eprintln!("{} validation error(s) in {}", errors.len(), file.display());
                return Ok(ExitCode::FAILURE);
            }
            other => other,
        },
        Command::Anchors { file, path } => {
            let config = Config::from_env().context("failed to load configuration")?;
            info!(base_path = %config.base_path, "Configuration loaded");
            cli::cmd_anchors(&config, &file, &path)
        }
        Command::Schema => cli::cmd_schema(&registry),
    }
    .context("command failed")?;

    println!("{output}");
    Ok(ExitCode::SUCCESS)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
