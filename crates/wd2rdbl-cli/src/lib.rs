//! wd2rdbl CLI library.
//!
//! Command-line front end for the mapper and the batch pipeline:
//! argument parsing, configuration loading, input sources and command
//! execution.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod source;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use source::Source;

use tracing_subscriber::EnvFilter;

/// Install the log subscriber on stderr.
///
/// `RUST_LOG` takes precedence over `default_level`.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

/// Run a parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?.with_vocabulary(cli.vocab);

    match cli.command {
        Command::Convert(args) => commands::execute_convert(args, &config).await,
        Command::Dump(args) => commands::execute_dump(args, &config).await,
    }
}
