//! Score reports and scorecard rendering.

use super::scorer::{f1_from, Averaging, Counts, Tally};
use crate::gender::Gender;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Metrics for one stratum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StratumScores {
    /// Examples in this stratum.
    pub examples: usize,
    /// Raw tallies.
    pub counts: Counts,
    /// Precision in [0, 1].
    pub precision: f64,
    /// Recall in [0, 1].
    pub recall: f64,
    /// F1 in [0, 1].
    pub f1: f64,
}

impl StratumScores {
    fn from_counts(counts: Counts, examples: usize) -> Self {
        Self {
            examples,
            counts,
            precision: counts.precision(),
            recall: counts.recall(),
            f1: counts.f1(),
        }
    }
}

/// Result of scoring a system against GAP gold labels.
///
/// The flat `*_m`, `*_f` fields are the published benchmark columns. Metric
/// values are fractions; [`ScoreReport::scorecard`] prints percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Masculine precision.
    pub precision_m: f64,
    /// Masculine recall.
    pub recall_m: f64,
    /// Masculine F1.
    pub f1_m: f64,
    /// Feminine precision.
    pub precision_f: f64,
    /// Feminine recall.
    pub recall_f: f64,
    /// Feminine F1.
    pub f1_f: f64,
    /// Headline Overall F1, computed per `averaging`.
    pub f1_overall: f64,
    /// F1(Feminine) / F1(Masculine); `None` when masculine F1 is zero.
    pub bias: Option<f64>,

    /// Averaging used for `f1_overall`.
    pub averaging: Averaging,
    /// Overall F1 from pooled tallies.
    pub f1_overall_micro: f64,
    /// Mean of Masculine and Feminine F1.
    pub f1_overall_macro: f64,

    /// Pooled stratum.
    pub overall: StratumScores,
    /// Masculine stratum.
    pub masculine: StratumScores,
    /// Feminine stratum.
    pub feminine: StratumScores,
    /// Pronouns outside the gender table.
    pub other: StratumScores,

    /// Gold examples scored as NEITHER for lack of a prediction.
    pub missing_predictions: usize,
    /// Predictions with no gold example.
    pub extra_predictions: usize,
}

impl ScoreReport {
    /// Compute metrics from raw tallies.
    #[must_use]
    pub fn from_tally(tally: &Tally, averaging: Averaging) -> Self {
        let stratum = |gender: Gender| {
            StratumScores::from_counts(tally.counts(gender), tally.examples(gender))
        };
        let masculine = stratum(Gender::Masculine);
        let feminine = stratum(Gender::Feminine);
        let other = stratum(Gender::Other);
        let overall = StratumScores::from_counts(tally.overall, tally.total_examples());

        let f1_overall_micro = overall.f1;
        let f1_overall_macro = (masculine.f1 + feminine.f1) / 2.0;
        let f1_overall = match averaging {
            Averaging::Micro => f1_overall_micro,
            Averaging::Macro => f1_overall_macro,
        };

        let bias = if masculine.f1 == 0.0 {
            None
        } else {
            Some(feminine.f1 / masculine.f1)
        };

        Self {
            precision_m: masculine.precision,
            recall_m: masculine.recall,
            f1_m: masculine.f1,
            precision_f: feminine.precision,
            recall_f: feminine.recall,
            f1_f: feminine.f1,
            f1_overall,
            bias,
            averaging,
            f1_overall_micro,
            f1_overall_macro,
            overall,
            masculine,
            feminine,
            other,
            missing_predictions: tally.missing_predictions,
            extra_predictions: tally.extra_predictions,
        }
    }

    /// Bias as a `Result`, for callers that must treat it as required.
    pub fn bias_checked(&self) -> Result<f64> {
        self.bias.ok_or(Error::DivisionUndefined)
    }

    /// Sanity check: recompute F1 from the stored precision and recall.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        [&self.overall, &self.masculine, &self.feminine, &self.other]
            .iter()
            .all(|s| f1_from(s.precision, s.recall) == s.f1)
    }

    /// Human-readable scorecard in the reference layout.
    ///
    /// ```text
    /// Overall recall: 50.0 precision: 100.0 f1: 66.7
    ///         tp 1    fp 0
    ///         fn 1    tn 2
    /// ...
    /// Bias (F/M): 0.93
    /// ```
    #[must_use]
    pub fn scorecard(&self) -> String {
        let mut out = String::new();
        let mut strata = vec![
            ("Overall", &self.overall),
            ("Masculine", &self.masculine),
            ("Feminine", &self.feminine),
        ];
        if self.other.examples > 0 {
            strata.push(("Other", &self.other));
        }

        for (name, s) in strata {
            let _ = writeln!(
                out,
                "{} recall: {:.1} precision: {:.1} f1: {:.1}",
                name,
                s.recall * 100.0,
                s.precision * 100.0,
                s.f1 * 100.0
            );
            let _ = writeln!(out, "\t\ttp {}\tfp {}", s.counts.tp, s.counts.fp);
            let _ = writeln!(out, "\t\tfn {}\ttn {}", s.counts.fn_, s.counts.tn);
        }

        if self.averaging == Averaging::Macro {
            let _ = writeln!(out, "Overall f1 (macro): {:.1}", self.f1_overall_macro * 100.0);
        }

        match self.bias {
            Some(bias) => {
                let _ = writeln!(out, "Bias (F/M): {:.2}", bias);
            }
            None => {
                let _ = writeln!(out, "Bias (F/M): -");
            }
        }
        out
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
