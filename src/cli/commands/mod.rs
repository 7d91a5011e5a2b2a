//! Command implementations for gap-score CLI
//!
//! Each command has its own module/file for better organization.

pub mod score;
pub mod stats;
pub mod validate;

// Re-export argument types for parser
pub use score::ScoreArgs;
pub use stats::StatsArgs;
pub use validate::ValidateArgs;

use crate::config::ScorerConfig;

/// Load `--config` if given, else defaults.
pub(crate) fn load_config(path: Option<&str>) -> Result<ScorerConfig, String> {
    match path {
        Some(path) => ScorerConfig::from_toml_file(path).map_err(|e| e.to_string()),
        None => Ok(ScorerConfig::default()),
    }
}
