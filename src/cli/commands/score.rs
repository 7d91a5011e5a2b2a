//! Score command - Score system output against GAP gold annotations

use clap::Parser;

use super::super::output::{print_row_errors, write_output};
use super::super::parser::OutputFormat;
use super::load_config;

use crate::eval::{load_gap_file, load_predictions_file, score, Averaging};

/// Score system output against gold annotations
#[derive(Parser, Debug)]
pub struct ScoreArgs {
    /// Gold TSV to score against (first line is the header)
    #[arg(short, long, value_name = "PATH")]
    pub gold: String,

    /// System output TSV to score (all lines are read)
    #[arg(short, long, value_name = "PATH")]
    pub system: String,

    /// TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<String>,

    /// Fail on the first bad row or missing prediction
    #[arg(long)]
    pub strict: bool,

    /// Averaging for the headline Overall F1 (overrides config)
    #[arg(long, value_enum)]
    pub averaging: Option<Averaging>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<String>,

    /// Maximum row errors to print per file
    #[arg(long, default_value_t = 20, value_name = "N")]
    pub max_errors: usize,
}

/// Run the score command.
pub fn run(args: ScoreArgs) -> Result<(), String> {
    let mut config = load_config(args.config.as_deref())?;
    if args.strict {
        config = config.with_strict(true);
    }
    if let Some(averaging) = args.averaging {
        config = config.with_averaging(averaging);
    }
    let options = config.load_options();

    let gold = load_gap_file(&args.gold, options)
        .map_err(|e| format!("Failed to load gold {}: {}", args.gold, e))?;
    print_row_errors(&args.gold, &gold.errors, args.max_errors);
    if gold.examples.is_empty() {
        return Err(format!("No gold annotations read from {}", args.gold));
    }

    let system = load_predictions_file(&args.system, options)
        .map_err(|e| format!("Failed to load system output {}: {}", args.system, e))?;
    print_row_errors(&args.system, &system.errors, args.max_errors);
    if system.is_empty() {
        log::warn!("No system annotations read from {}", args.system);
    }

    let report = score(&gold.examples, &system.predictions, &config).map_err(|e| e.to_string())?;

    let content = match args.format {
        OutputFormat::Text => report.scorecard(),
        OutputFormat::Json => {
            let mut json = report.to_json().map_err(|e| e.to_string())?;
            json.push('\n');
            json
        }
    };
    write_output(&content, args.output.as_deref())
}
