//! Command-line entry point for complaint intake.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] (default when missing, or from `--config`, which
//!    must exist).
//! 3. Build the [`IntakeProcessor`] (category table + language services).
//! 4. Run the requested subcommand and print JSON to stdout.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use civic_intake::config::AppConfig;
use civic_intake::intake::IntakeProcessor;
use civic_intake::language::{known_codes, language_name};

#[derive(Debug, Parser)]
#[command(name = "civic-intake", version, about = "Classify municipal complaints")]
struct Cli {
    /// Settings file (defaults to the platform config directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Classify text and print category, confidence and per-category scores.
    Classify { text: Option<String> },
    /// Print up to three ranked category suggestions.
    Suggest { text: Option<String> },
    /// Print category, confidence and suggestions together.
    Preview { text: Option<String> },
    /// Detect language, translate if needed, then classify.
    Process { text: Option<String> },
    /// List the configured categories in tie-break order.
    Categories,
    /// List language codes with known display names.
    Languages,
}

/// Use the positional argument, or read all of stdin when it is absent.
fn input_text(text: Option<String>) -> Result<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading complaint text from stdin")?;
            Ok(buf.trim_end_matches(['\r', '\n']).to_string())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_required(path)?,
        None => AppConfig::load().unwrap_or_else(|e| {
            log::warn!("Failed to load config ({e}); using defaults");
            AppConfig::default()
        }),
    };

    let processor = IntakeProcessor::from_config(&config)?;
    let classifier = processor.classifier();

    match cli.command {
        Command::Classify { text } => {
            let text = input_text(text)?;
            print_json(&classifier.classify(Some(&text)))
        }
        Command::Suggest { text } => {
            let text = input_text(text)?;
            print_json(&classifier.suggestions(Some(&text)))
        }
        Command::Preview { text } => {
            let text = input_text(text)?;
            print_json(&processor.preview(Some(&text)))
        }
        Command::Process { text } => {
            let text = input_text(text)?;
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .context("creating tokio runtime")?;
            let report = rt.block_on(processor.process(&text));
            print_json(&report)
        }
        Command::Categories => {
            for name in classifier.categories() {
                println!("{name}");
            }
            Ok(())
        }
        Command::Languages => {
            for code in known_codes() {
                println!("{code}\t{}", language_name(code));
            }
            Ok(())
        }
    }
}
