//! Scorer configuration.
//!
//! Defaults match the reference GAP scorer: lenient handling of missing
//! predictions, micro-averaged Overall F1, six-form pronoun table.
//!
//! A TOML file can override any of these. Its `[pronouns]` table **extends**
//! the default table unless `replace_pronouns = true`:
//!
//! ```toml
//! strict_mode = true
//! averaging = "macro"
//!
//! [pronouns]
//! herself = "feminine"
//! himself = "masculine"
//! ```

use crate::eval::gap::LoadOptions;
use crate::eval::scorer::Averaging;
use crate::gender::{Gender, PronounTable};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Configuration for loading and scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorerConfig {
    /// Fail on missing predictions and bad rows instead of collecting them.
    pub strict_mode: bool,
    /// How the headline Overall F1 is computed.
    pub averaging: Averaging,
    /// Pronoun surface form to gender stratum.
    pub pronouns: PronounTable,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            strict_mode: false,
            averaging: Averaging::Micro,
            pronouns: PronounTable::default(),
        }
    }
}

/// On-disk shape; every key optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    strict_mode: Option<bool>,
    averaging: Option<Averaging>,
    #[serde(default)]
    replace_pronouns: bool,
    #[serde(default)]
    pronouns: BTreeMap<String, Gender>,
}

impl ScorerConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set strict mode.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict_mode = strict;
        self
    }

    /// Set the Overall F1 averaging.
    #[must_use]
    pub fn with_averaging(mut self, averaging: Averaging) -> Self {
        self.averaging = averaging;
        self
    }

    /// Replace the pronoun table.
    #[must_use]
    pub fn with_pronoun_table(mut self, pronouns: PronounTable) -> Self {
        self.pronouns = pronouns;
        self
    }

    /// Load options implied by this configuration.
    #[must_use]
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            strict: self.strict_mode,
        }
    }

    /// Parse a TOML configuration on top of the defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        let mut config = Self::default();

        if let Some(strict) = file.strict_mode {
            config.strict_mode = strict;
        }
        if let Some(averaging) = file.averaging {
            config.averaging = averaging;
        }
        if file.replace_pronouns {
            if file.pronouns.is_empty() {
                return Err(Error::config(
                    "replace_pronouns = true requires a non-empty [pronouns] table",
                ));
            }
            config.pronouns = PronounTable::empty();
        }
        for (form, gender) in &file.pronouns {
            config.pronouns.insert(form, *gender);
        }

        Ok(config)
    }

    /// Read a TOML configuration file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read {:?}: {}", path, e)))?;
        let config = Self::from_toml_str(&content)?;
        log::debug!("Loaded config from {:?}: {:?}", path, config);
        Ok(config)
    }
}
