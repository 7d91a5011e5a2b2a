//! # gap-score
//!
//! Loader, validator and scorer for the GAP (Gendered Ambiguous Pronouns)
//! coreference benchmark.
//!
//! - **Parsing**: eleven-column gold TSV with exact character-offset checks
//! - **Predictions**: system output as `A` / `B` / `NEITHER` per example ID
//! - **Scoring**: Masculine / Feminine / Overall precision, recall and F1, plus
//!   the bias factor F1(Feminine) / F1(Masculine)
//!
//! ```rust,no_run
//! use gap_score::eval::{load_gap_file, load_predictions_file, score};
//! use gap_score::ScorerConfig;
//!
//! let config = ScorerConfig::default();
//! let gold = load_gap_file("gap-test.tsv", config.load_options())?;
//! let system = load_predictions_file("system.tsv", config.load_options())?;
//!
//! let report = score(&gold.examples, &system.predictions, &config)?;
//! print!("{}", report.scorecard());
//! # Ok::<(), gap_score::Error>(())
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod eval;
pub mod gender;
pub mod offset;

#[cfg(feature = "cli")]
pub mod cli;

pub use config::ScorerConfig;
pub use error::{Error, Result};
pub use eval::{GapExample, Prediction, Referent, ScoreReport};
pub use gender::{Gender, PronounTable};
