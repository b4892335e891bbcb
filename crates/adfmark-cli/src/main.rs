//! adfmark - convert issue-tracker rich text and extract sub-tasks.
//!
//! Reads from a file, or stdin when no file (or `-`) is given, and writes
//! the result to stdout. Logs go to stderr; set `RUST_LOG` to change the
//! level.
//!
//! # Examples
//!
//! ```bash
//! # Store JSON to Markdown
//! adfmark render description.json
//!
//! # Markdown to store JSON, ready for a comment body
//! echo "# Plan" | adfmark parse --pretty
//!
//! # Sub-tasks from LLM output, with a single fallback item if none found
//! adfmark subtasks --fallback solution.txt
//! ```

mod config;

use std::io::Read;
use std::path::{Path, PathBuf};

use adfmark::{DocumentService, Options};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use config::ConfigArgs;

#[derive(Parser)]
#[command(name = "adfmark")]
#[command(about = "Convert issue-tracker rich text to and from Markdown")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render store JSON as Markdown
    Render {
        /// Input file (stdin if omitted or `-`)
        file: Option<PathBuf>,
    },

    /// Parse Markdown into store JSON
    Parse {
        /// Input file (stdin if omitted or `-`)
        file: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Extract sub-tasks from solution text as a JSON array
    Subtasks {
        /// Input file (stdin if omitted or `-`)
        file: Option<PathBuf>,

        /// Synthesize one item from the first line when nothing is found
        #[arg(long)]
        fallback: bool,

        /// Give items without a description the solution text (implies --fallback)
        #[arg(long)]
        fill_descriptions: bool,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    json.context("Failed to encode JSON")
}

fn run(cli: Cli) -> Result<String> {
    let options: Options = cli.config.into();
    tracing::debug!(?options, "resolved options");
    let service = DocumentService::with_options(options);

    match cli.command {
        Commands::Render { file } => {
            let input = read_input(file.as_deref())?;
            service
                .json_to_markdown(&input)
                .context("Failed to decode document JSON")
        }

        Commands::Parse { file, pretty } => {
            let input = read_input(file.as_deref())?;
            let doc = service.from_markdown(&input);
            to_json(&doc.to_value_with(service.options()), pretty)
        }

        Commands::Subtasks {
            file,
            fallback,
            fill_descriptions,
            pretty,
        } => {
            let input = read_input(file.as_deref())?;
            let items = if fill_descriptions {
                service.subtasks_for_filing(&input)
            } else if fallback {
                service.subtasks_or_fallback(&input)
            } else {
                service.extract_subtasks(&input)
            };
            tracing::info!(count = items.len(), "extracted sub-tasks");
            to_json(&items, pretty)
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let output = run(cli)?;
    println!("{output}");

    Ok(())
}
