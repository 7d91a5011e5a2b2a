//! GAP loading and evaluation.
//!
//! # Overview
//!
//! - [`gap`]: gold TSV parsing with offset and label validation
//! - [`prediction`]: system output values and reader
//! - [`scorer`]: per-gender tallies and metrics
//! - [`report`]: [`ScoreReport`] and the text scorecard
//!
//! # Scoring
//!
//! ```rust
//! use gap_score::eval::{load_gap_str, oracle_predictions, score, LoadOptions};
//! use gap_score::ScorerConfig;
//!
//! let tsv = "ID\tText\tPronoun\tPronoun-offset\tA\tA-offset\tA-coref\tB\tB-offset\tB-coref\tURL\n\
//!            test-1\tAnn met Bob. She left.\tShe\t13\tAnn\t0\tTRUE\tBob\t8\tFALSE\t\n\
//!            test-2\tAnn met Bob. He left.\tHe\t13\tAnn\t0\tFALSE\tBob\t8\tTRUE\t";
//!
//! let gold = load_gap_str(tsv, LoadOptions::default())?.examples;
//! let report = score(&gold, &oracle_predictions(&gold), &ScorerConfig::default())?;
//!
//! assert_eq!(report.f1_overall, 1.0);
//! assert_eq!(report.bias, Some(1.0));
//! # Ok::<(), gap_score::Error>(())
//! ```

pub mod gap;
pub mod prediction;
pub mod report;
pub mod scorer;

pub use gap::{
    load_gap_file, load_gap_str, parse_line, parse_row, GapExample, GapStats, LoadOptions,
    LoadedGap, RowError, Split, GOLD_COLUMNS,
};
pub use prediction::{
    load_predictions_file, load_predictions_str, parse_prediction_row, LoadedPredictions,
    Prediction, Referent,
};
pub use report::{ScoreReport, StratumScores};
pub use scorer::{oracle_predictions, score, tally, Averaging, Counts, Tally};
