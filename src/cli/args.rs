use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::translation::Discipline;

#[derive(Parser, Debug)]
#[command(name = "qtr")]
#[command(about = "Line-by-line translation CLI with retries and provider fallback")]
#[command(version)]
pub struct Args {
    /// File to translate (reads from stdin if not provided or "-")
    pub file: Option<PathBuf>,

    /// Source language code (e.g., en-IN, en, or auto to detect)
    #[arg(short = 'f', long = "from")]
    pub from: Option<String>,

    /// Target language code (e.g., hi-IN, ta, ja)
    #[arg(short = 't', long = "to")]
    pub to: Option<String>,

    /// Provider to use; repeat to set the fallback order
    #[arg(short = 'p', long = "provider")]
    pub providers: Vec<String>,

    /// Translate lines one by one or all at once
    #[arg(short = 'd', long, value_enum)]
    pub discipline: Option<Discipline>,

    /// Write the translation to this file instead of stdout
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Suppress status output and non-fatal diagnostics
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Log every request attempt
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List supported language codes
    Languages,
    /// Show the provider fallback chain
    Providers {
        /// Show details for a single provider
        provider: Option<String>,
    },
}
