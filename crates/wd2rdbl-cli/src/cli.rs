//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use wd2rdbl_pipeline::PipelineConfig;

/// wd2rdbl - Convert Wikidata entities to readable JSON-LD.
#[derive(Debug, Parser)]
#[command(name = "wd2rdbl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (default: ./wd2rdbl.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Vocabulary mapping document
    #[arg(long, global = true, env = "WD2RDBL_VOCAB")]
    pub vocab: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Log warnings and errors only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Default log filter for the verbosity flags
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert entity documents to a JSON-LD document
    Convert(ConvertArgs),

    /// Convert a line-oriented entity dump, one graph per line
    Dump(DumpArgs),
}

/// Arguments for the convert command.
#[derive(Debug, Parser)]
pub struct ConvertArgs {
    /// Files, `-` for stdin, http(s) URLs or entity ids (e.g. Q42); stdin when empty
    pub sources: Vec<String>,
}

/// Arguments for the dump command.
#[derive(Debug, Parser)]
pub struct DumpArgs {
    /// Lines per batch
    #[arg(short, long)]
    pub batch_size: Option<usize>,

    /// Number of mapping workers
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Dump file to read instead of stdin
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

impl DumpArgs {
    /// Override configured pipeline settings with the flags given
    pub fn apply_to(&self, config: &mut PipelineConfig) {
        if let Some(batch_size) = self.batch_size {
            config.batch_size = batch_size;
        }
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
    }
}
