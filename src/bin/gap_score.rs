//! gap-score - GAP coreference benchmark CLI
//!
//! ```bash
//! # Score a system against the test split
//! gap-score score --gold gap-test.tsv --system system.tsv
//!
//! # Check the gold files
//! gap-score validate gap-development.tsv gap-test.tsv gap-validation.tsv
//!
//! # Gender and label distribution
//! gap-score stats gap-development.tsv
//! ```

use std::process::ExitCode;

use clap::Parser;

use gap_score::cli::commands::{score, stats, validate};
use gap_score::cli::{color, Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .format_timestamp(None)
        .init();

    let result = match cli.command {
        Commands::Score(args) => score::run(args),
        Commands::Validate(args) => validate::run(args),
        Commands::Stats(args) => stats::run(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", color("31", "error:"), e);
            ExitCode::FAILURE
        }
    }
}
