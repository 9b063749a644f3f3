//! wd2rdbl - Convert Wikidata entities to readable JSON-LD.

use clap::Parser;
use wd2rdbl_cli::{Cli, CliError};
use wd2rdbl_pipeline::PipelineError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    wd2rdbl_cli::init_tracing(cli.log_level());

    if let Err(e) = wd2rdbl_cli::run(cli).await {
        // The pipeline has already reported the interrupt
        if !matches!(e, CliError::Pipeline(PipelineError::Interrupted)) {
            eprintln!("Error: {}", e);
        }
        std::process::exit(e.exit_code());
    }
}
