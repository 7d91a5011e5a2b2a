//! Pronoun gender classification.
//!
//! GAP stratifies every example by the grammatical gender of its target
//! pronoun. The mapping is a plain lookup table ([`PronounTable`]) passed into
//! scoring, so additional surface forms can be covered from configuration
//! without touching the scorer.
//!
//! ```rust
//! use gap_score::gender::{Gender, PronounTable};
//!
//! let table = PronounTable::default();
//! assert_eq!(table.classify("Her"), Gender::Feminine);
//! assert_eq!(table.classify("they"), Gender::Other);
//!
//! let extended = table.with_pronoun("himself", Gender::Masculine);
//! assert_eq!(extended.classify("himself"), Gender::Masculine);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Gender of a pronoun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Masculine pronouns (he/him/his).
    Masculine,
    /// Feminine pronouns (she/her/hers).
    Feminine,
    /// Anything the table does not recognize.
    Other,
}

impl Gender {
    /// Display name used in scorecards.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Gender::Masculine => "Masculine",
            Gender::Feminine => "Feminine",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Lookup table from lower-cased pronoun surface form to [`Gender`].
///
/// Forms absent from the table classify as [`Gender::Other`]. Reflexives are
/// not part of GAP and are not in the default table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PronounTable {
    forms: BTreeMap<String, Gender>,
}

impl Default for PronounTable {
    fn default() -> Self {
        let forms = [
            ("she", Gender::Feminine),
            ("her", Gender::Feminine),
            ("hers", Gender::Feminine),
            ("he", Gender::Masculine),
            ("his", Gender::Masculine),
            ("him", Gender::Masculine),
        ]
        .into_iter()
        .map(|(form, gender)| (form.to_string(), gender))
        .collect();
        Self { forms }
    }
}

impl PronounTable {
    /// An empty table: every pronoun classifies as [`Gender::Other`].
    #[must_use]
    pub fn empty() -> Self {
        Self {
            forms: BTreeMap::new(),
        }
    }

    /// Add or replace a surface form.
    #[must_use]
    pub fn with_pronoun(mut self, form: &str, gender: Gender) -> Self {
        self.insert(form, gender);
        self
    }

    /// Add or replace a surface form in place.
    pub fn insert(&mut self, form: &str, gender: Gender) {
        self.forms.insert(form.to_lowercase(), gender);
    }

    /// Merge another table into this one; entries in `other` win.
    pub fn extend(&mut self, other: &PronounTable) {
        for (form, gender) in &other.forms {
            self.forms.insert(form.to_lowercase(), *gender);
        }
    }

    /// Classify a pronoun, case-insensitively.
    #[must_use]
    pub fn classify(&self, pronoun: &str) -> Gender {
        self.forms
            .get(&pronoun.to_lowercase())
            .copied()
            .unwrap_or(Gender::Other)
    }

    /// Number of known surface forms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.forms.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}
