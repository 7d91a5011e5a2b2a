//! Validate command - Validate GAP gold TSV files

use clap::Parser;
use std::collections::HashMap;

use super::super::output::{color, print_row_errors};
use crate::eval::{load_gap_file, LoadOptions};

/// Validate gold TSV files
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Gold TSV files to validate
    #[arg(required = true)]
    pub files: Vec<String>,

    /// Maximum row errors to print per file
    #[arg(long, default_value_t = 20, value_name = "N")]
    pub max_errors: usize,
}

/// Run the validate command.
pub fn run(args: ValidateArgs) -> Result<(), String> {
    let mut total_errors = 0;
    let mut total_warnings = 0;
    let mut total_rows = 0;
    // ID -> first file it appeared in
    let mut owners: HashMap<String, usize> = HashMap::new();

    for (file_idx, file) in args.files.iter().enumerate() {
        let loaded = load_gap_file(file, LoadOptions::default())
            .map_err(|e| format!("Failed to load {}: {}", file, e))?;

        total_rows += loaded.rows();
        total_errors += loaded.errors.len();
        print_row_errors(file, &loaded.errors, args.max_errors);

        if let Some(split) = loaded.split {
            if let Some(msg) = split.check_cardinality(loaded.rows()) {
                eprintln!("{} {}", color("33", "warn"), msg);
                total_warnings += 1;
            }
        }

        for ex in &loaded.examples {
            match owners.get(&ex.id) {
                Some(&owner) if owner != file_idx => {
                    eprintln!(
                        "{} {}: ID {} also appears in {}",
                        color("33", "warn"),
                        file,
                        ex.id,
                        args.files[owner]
                    );
                    total_warnings += 1;
                }
                Some(_) => {}
                None => {
                    owners.insert(ex.id.clone(), file_idx);
                }
            }
        }
    }

    println!();
    println!(
        "Validated {} rows in {} file(s)",
        total_rows,
        args.files.len()
    );
    if total_errors > 0 {
        println!("{} {} errors", color("31", "x"), total_errors);
    }
    if total_warnings > 0 {
        println!("{} {} warnings", color("33", "!"), total_warnings);
    }
    if total_errors == 0 && total_warnings == 0 {
        println!("{} All valid", color("32", "ok:"));
    }

    if total_errors > 0 {
        return Err(format!("{} validation errors", total_errors));
    }

    Ok(())
}
