//! Stats command - Summarize a GAP gold file

use clap::Parser;

use super::super::output::{color, print_row_errors, write_output};
use super::super::parser::OutputFormat;
use super::load_config;

use crate::eval::{load_gap_file, GapStats, LoadOptions, Referent};
use crate::gender::Gender;

/// Summarize a gold TSV file
#[derive(Parser, Debug)]
pub struct StatsArgs {
    /// Gold TSV file
    #[arg(value_name = "PATH")]
    pub file: String,

    /// TOML configuration file (for the pronoun table)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<String>,
}

/// Run the stats command.
pub fn run(args: StatsArgs) -> Result<(), String> {
    let config = load_config(args.config.as_deref())?;
    let loaded = load_gap_file(&args.file, LoadOptions::default())
        .map_err(|e| format!("Failed to load {}: {}", args.file, e))?;
    print_row_errors(&args.file, &loaded.errors, 5);

    let stats = GapStats::compute(&loaded.examples, &config.pronouns);

    let content = match args.format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&stats)
                .map_err(|e| format!("Failed to serialize stats: {}", e))?;
            json.push('\n');
            json
        }
        OutputFormat::Text => render_text(&args.file, &stats, loaded.errors.len()),
    };
    write_output(&content, args.output.as_deref())
}

fn render_text(file: &str, stats: &GapStats, rejected: usize) -> String {
    let referents = [Referent::A, Referent::B, Referent::Neither];
    let mut out = String::new();

    out.push_str(&format!("{}: {} examples", color("1", file), stats.examples));
    if rejected > 0 {
        out.push_str(&format!(" ({} rows rejected)", rejected));
    }
    out.push('\n');

    out.push_str(&format!(
        "  {:<10} {:>6} {:>6} {:>8} {:>6}\n",
        "", "A", "B", "NEITHER", "total"
    ));
    for gender in [Gender::Masculine, Gender::Feminine, Gender::Other] {
        let total = stats.gender_count(gender);
        if gender == Gender::Other && total == 0 {
            continue;
        }
        let cells: Vec<usize> = referents.iter().map(|r| stats.cell(gender, *r)).collect();
        out.push_str(&format!(
            "  {:<10} {:>6} {:>6} {:>8} {:>6}\n",
            gender.display_name(),
            cells[0],
            cells[1],
            cells[2],
            total
        ));
    }

    out.push_str("  pronouns:");
    for (form, count) in &stats.pronouns {
        out.push_str(&format!(" {}={}", form, count));
    }
    out.push('\n');
    out
}
