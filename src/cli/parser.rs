//! CLI argument parsing and structure definitions

use clap::{Parser, Subcommand, ValueEnum};

use super::commands;

/// GAP coreference benchmark scorer
#[derive(Parser, Debug)]
#[command(name = "gap-score")]
#[command(
    author,
    version,
    about = "Validate GAP coreference files and score system output",
    long_about = r#"
gap-score - loader, validator and scorer for the GAP benchmark

GOLD FILES (tab-separated, one header row):
  ID  Text  Pronoun  Pronoun-offset  A  A-offset  A-coref  B  B-offset  B-coref  URL

SYSTEM FILES (tab-separated, header optional):
  ID  A-coref  B-coref  [confidence]
  ID  A|B|NEITHER       [confidence]

METRICS:
  Precision, recall and F1 for Masculine, Feminine and Overall strata.
  Bias (F/M) = F1(Feminine) / F1(Masculine), '-' when undefined.

EXAMPLES:
  gap-score score --gold gap-test.tsv --system system.tsv
  gap-score score --gold gap-test.tsv --system system.tsv --format json --strict
  gap-score validate gap-development.tsv gap-validation.tsv
  gap-score stats gap-test.tsv
"#
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Log level implied by `--verbose` / `--quiet`.
    #[must_use]
    pub fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            return log::LevelFilter::Error;
        }
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        }
    }
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score system output against gold annotations
    #[command(visible_alias = "s")]
    Score(commands::ScoreArgs),

    /// Validate gold TSV files
    #[command(visible_alias = "v")]
    Validate(commands::ValidateArgs),

    /// Summarize a gold TSV file
    Stats(commands::StatsArgs),
}

/// Output format selection for all commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}
