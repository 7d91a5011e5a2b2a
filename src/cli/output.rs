//! Output formatting utilities for CLI commands

use is_terminal::IsTerminal;
use std::io::{self, Write};

use crate::eval::RowError;

/// Write output to file or stdout
pub fn write_output(content: &str, path: Option<&str>) -> Result<(), String> {
    if let Some(path) = path {
        std::fs::write(path, content).map_err(|e| format!("Failed to write to {}: {}", path, e))?;
    } else {
        print!("{}", content);
        io::stdout()
            .flush()
            .map_err(|e| format!("Failed to flush stdout: {}", e))?;
    }
    Ok(())
}

/// Colorize text with ANSI escape codes (only if stdout is a terminal)
pub fn color(code: &str, text: &str) -> String {
    if io::stdout().is_terminal() {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

/// Print row errors for one file to stderr, at most `limit` of them
pub fn print_row_errors(file: &str, errors: &[RowError], limit: usize) {
    for err in errors.iter().take(limit) {
        eprintln!("{} {}: {}", color("31", "error"), file, err);
    }
    if errors.len() > limit {
        eprintln!(
            "{} {}: {} more row errors not shown",
            color("33", "warn"),
            file,
            errors.len() - limit
        );
    }
}
