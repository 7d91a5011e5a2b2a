//! GAP scoring: per-gender precision, recall, F1 and the bias factor.
//!
//! Each example contributes two binary decisions, "is A the antecedent" and
//! "is B the antecedent". Both are tallied into the example's gender stratum
//! and into Overall:
//!
//! | gold | system | tally |
//! |------|--------|-------|
//! | true | true   | tp    |
//! | false| true   | fp    |
//! | true | false  | fn    |
//! | false| false  | tn    |
//!
//! Tallies are integers; metrics are computed once at the end, so identical
//! inputs always produce identical reports.

use super::gap::GapExample;
use super::prediction::{Prediction, Referent};
use super::report::ScoreReport;
use crate::config::ScorerConfig;
use crate::gender::Gender;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::ops::AddAssign;

// =============================================================================
// Counts
// =============================================================================

/// Confusion tallies for one stratum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    /// True positives.
    pub tp: u64,
    /// False positives.
    pub fp: u64,
    /// False negatives.
    #[serde(rename = "fn")]
    pub fn_: u64,
    /// True negatives.
    pub tn: u64,
}

impl Counts {
    /// Tally one binary decision.
    pub fn record(&mut self, gold: bool, system: bool) {
        match (gold, system) {
            (true, true) => self.tp += 1,
            (false, true) => self.fp += 1,
            (true, false) => self.fn_ += 1,
            (false, false) => self.tn += 1,
        }
    }

    /// Tally both decisions of one example.
    pub fn record_example(&mut self, gold: Referent, system: Referent) {
        let (gold_a, gold_b) = gold.flags();
        let (sys_a, sys_b) = system.flags();
        self.record(gold_a, sys_a);
        self.record(gold_b, sys_b);
    }

    /// Total decisions tallied.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.tp + self.fp + self.fn_ + self.tn
    }

    /// tp / (tp + fp), or 0.0 with no positive predictions.
    #[must_use]
    pub fn precision(&self) -> f64 {
        ratio(self.tp, self.tp + self.fp)
    }

    /// tp / (tp + fn), or 0.0 with no positive gold labels.
    #[must_use]
    pub fn recall(&self) -> f64 {
        ratio(self.tp, self.tp + self.fn_)
    }

    /// Harmonic mean of precision and recall, or 0.0 when both are zero.
    #[must_use]
    pub fn f1(&self) -> f64 {
        f1_from(self.precision(), self.recall())
    }
}

impl AddAssign for Counts {
    fn add_assign(&mut self, other: Self) {
        self.tp += other.tp;
        self.fp += other.fp;
        self.fn_ += other.fn_;
        self.tn += other.tn;
    }
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

pub(crate) fn f1_from(precision: f64, recall: f64) -> f64 {
    let denominator = precision + recall;
    if denominator == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / denominator
    }
}

// =============================================================================
// Averaging
// =============================================================================

/// How the headline Overall F1 is computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Averaging {
    /// Pool all tallies, then compute one F1 (reference scorer).
    #[default]
    Micro,
    /// Mean of the Masculine and Feminine F1.
    Macro,
}

// =============================================================================
// Tally
// =============================================================================

/// Raw tallies from one scoring pass, before any division.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    /// Tallies over every example.
    pub overall: Counts,
    /// Tallies per gender stratum.
    pub by_gender: BTreeMap<Gender, Counts>,
    /// Example count per gender stratum.
    pub examples_by_gender: BTreeMap<Gender, usize>,
    /// Gold examples scored as NEITHER because no prediction was given.
    pub missing_predictions: usize,
    /// Predictions whose ID is not in gold.
    pub extra_predictions: usize,
}

impl Tally {
    /// Tallies for one stratum (zero if it never appeared).
    #[must_use]
    pub fn counts(&self, gender: Gender) -> Counts {
        self.by_gender.get(&gender).copied().unwrap_or_default()
    }

    /// Example count for one stratum.
    #[must_use]
    pub fn examples(&self, gender: Gender) -> usize {
        self.examples_by_gender.get(&gender).copied().unwrap_or(0)
    }

    /// Total examples scored.
    #[must_use]
    pub fn total_examples(&self) -> usize {
        self.examples_by_gender.values().sum()
    }
}

/// Tally `predictions` against `gold` without computing metrics.
///
/// # Errors
///
/// [`Error::MissingPrediction`] for the first gold ID without a prediction
/// when `config.strict_mode` is set.
pub fn tally(
    gold: &[GapExample],
    predictions: &BTreeMap<String, Prediction>,
    config: &ScorerConfig,
) -> Result<Tally> {
    let mut tally = Tally::default();
    let mut gold_ids: HashSet<&str> = HashSet::with_capacity(gold.len());

    for example in gold {
        gold_ids.insert(example.id.as_str());

        let system = match predictions.get(&example.id) {
            Some(prediction) => prediction.referent,
            None if config.strict_mode => {
                return Err(Error::missing_prediction(&example.id));
            }
            None => {
                log::debug!("Missing output for {}", example.id);
                tally.missing_predictions += 1;
                Referent::Neither
            }
        };

        let gender = example.gender(&config.pronouns);
        let gold_referent = example.referent();

        tally.overall.record_example(gold_referent, system);
        tally
            .by_gender
            .entry(gender)
            .or_default()
            .record_example(gold_referent, system);
        *tally.examples_by_gender.entry(gender).or_default() += 1;
    }

    if tally.missing_predictions > 0 {
        log::warn!(
            "{} gold examples had no prediction; scored as NEITHER",
            tally.missing_predictions
        );
    }

    tally.extra_predictions = predictions
        .keys()
        .filter(|id| !gold_ids.contains(id.as_str()))
        .count();
    if tally.extra_predictions > 0 {
        log::debug!(
            "Ignoring {} predictions with no gold example",
            tally.extra_predictions
        );
    }

    Ok(tally)
}

/// Score `predictions` against `gold`.
///
/// Missing predictions count as NEITHER unless `config.strict_mode` is set.
/// Bias is `None` when the masculine F1 is zero.
pub fn score(
    gold: &[GapExample],
    predictions: &BTreeMap<String, Prediction>,
    config: &ScorerConfig,
) -> Result<ScoreReport> {
    let tally = tally(gold, predictions, config)?;
    Ok(ScoreReport::from_tally(&tally, config.averaging))
}

/// Predictions that exactly reproduce the gold labels.
#[must_use]
pub fn oracle_predictions(gold: &[GapExample]) -> BTreeMap<String, Prediction> {
    gold.iter()
        .map(|ex| (ex.id.clone(), Prediction::new(&ex.id, ex.referent())))
        .collect()
}
