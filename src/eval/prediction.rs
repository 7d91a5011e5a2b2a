//! System predictions and the system-output TSV reader.
//!
//! A system answers one question per GAP example: which candidate, if any, does
//! the pronoun refer to. Two on-disk layouts are accepted, one row per example,
//! no header required:
//!
//! ```text
//! ID            A-coref  B-coref  [confidence]
//! test-1        TRUE     FALSE    0.87
//!
//! ID            referent [confidence]
//! test-2        NEITHER
//! ```
//!
//! Boolean spellings are case-insensitive here, unlike gold files.

use super::gap::{LoadOptions, RowError};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Which candidate a pronoun refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Referent {
    /// Candidate A is the antecedent.
    A,
    /// Candidate B is the antecedent.
    B,
    /// Neither candidate is the antecedent.
    Neither,
}

impl Referent {
    /// Build from an `(A-coref, B-coref)` pair. Both true is an invariant violation.
    pub fn from_flags(a: bool, b: bool) -> Result<Self> {
        match (a, b) {
            (true, true) => Err(Error::invariant_violation(
                "A-coref and B-coref are both TRUE",
            )),
            (true, false) => Ok(Referent::A),
            (false, true) => Ok(Referent::B),
            (false, false) => Ok(Referent::Neither),
        }
    }

    /// The `(A-coref, B-coref)` pair for this referent.
    #[must_use]
    pub const fn flags(&self) -> (bool, bool) {
        match self {
            Referent::A => (true, false),
            Referent::B => (false, true),
            Referent::Neither => (false, false),
        }
    }

    /// Canonical label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Referent::A => "A",
            Referent::B => "B",
            Referent::Neither => "NEITHER",
        }
    }
}

impl fmt::Display for Referent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Referent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Referent::A),
            "B" => Ok(Referent::B),
            "NEITHER" | "NONE" => Ok(Referent::Neither),
            other => Err(Error::malformed_row(format!(
                "unknown referent '{}' (expected A, B or NEITHER)",
                other
            ))),
        }
    }
}

/// A system's decision for one example.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Example ID this prediction answers.
    pub id: String,
    /// Chosen referent.
    pub referent: Referent,
    /// Optional system confidence. Carried through, not used in scoring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl Prediction {
    /// Create a prediction without confidence.
    pub fn new(id: impl Into<String>, referent: Referent) -> Self {
        Self {
            id: id.into(),
            referent,
            confidence: None,
        }
    }

    /// Attach a confidence value.
    #[must_use]
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Build from an `(A-coref, B-coref)` pair.
    pub fn from_flags(id: impl Into<String>, a: bool, b: bool) -> Result<Self> {
        Ok(Self::new(id, Referent::from_flags(a, b)?))
    }
}

/// Predictions read from a system file, plus the rows that failed.
#[derive(Debug, Default)]
pub struct LoadedPredictions {
    /// Predictions keyed by example ID.
    pub predictions: BTreeMap<String, Prediction>,
    /// Rows that could not be parsed.
    pub errors: Vec<RowError>,
}

impl LoadedPredictions {
    /// Number of predictions loaded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.predictions.len()
    }

    /// Whether no predictions were loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }
}

fn parse_system_bool(field: &str, column: &str) -> Result<bool> {
    let value = field.trim();
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(Error::malformed_row(format!(
            "{}: unexpected label '{}'",
            column, value
        )))
    }
}

fn parse_confidence(field: &str) -> Result<f64> {
    let value: f64 = field
        .trim()
        .parse()
        .map_err(|_| Error::malformed_row(format!("confidence: not a number '{}'", field)))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::malformed_row(format!(
            "confidence: not finite '{}'",
            field
        )))
    }
}

/// Parse one system-output row.
///
/// Accepts `ID, A-coref, B-coref[, confidence]` or `ID, referent[, confidence]`.
pub fn parse_prediction_row(fields: &[&str]) -> Result<Prediction> {
    let id = fields.first().map(|s| s.trim()).unwrap_or("");
    if id.is_empty() {
        return Err(Error::malformed_row("empty ID"));
    }

    let second = fields.get(1).map(|s| s.trim()).unwrap_or("");
    let is_flag_layout =
        second.eq_ignore_ascii_case("true") || second.eq_ignore_ascii_case("false");

    let (prediction, rest) = if is_flag_layout {
        if fields.len() < 3 {
            return Err(Error::malformed_row(format!(
                "expected ID, A-coref, B-coref; got {} fields",
                fields.len()
            )));
        }
        let a = parse_system_bool(fields[1], "A-coref")?;
        let b = parse_system_bool(fields[2], "B-coref")?;
        (Prediction::from_flags(id, a, b)?, &fields[3..])
    } else {
        if fields.len() < 2 {
            return Err(Error::malformed_row("missing prediction column"));
        }
        (Prediction::new(id, second.parse()?), &fields[2..])
    };

    match rest {
        [] => Ok(prediction),
        [confidence] => Ok(prediction.with_confidence(parse_confidence(confidence)?)),
        _ => Err(Error::malformed_row(format!(
            "too many fields ({})",
            fields.len()
        ))),
    }
}

/// Parse system output from a string.
pub fn load_predictions_str(content: &str, options: LoadOptions) -> Result<LoadedPredictions> {
    let mut loaded = LoadedPredictions::default();

    for (idx, raw) in content.lines().enumerate() {
        let line_num = idx + 1;
        let line = raw.trim_end_matches('\r');
        let line = if idx == 0 {
            line.trim_start_matches('\u{feff}')
        } else {
            line
        };
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if idx == 0 && fields[0].trim() == "ID" {
            log::debug!("Skipping system output header");
            continue;
        }

        let result = parse_prediction_row(&fields).and_then(|prediction| {
            if loaded.predictions.contains_key(&prediction.id) {
                Err(Error::malformed_row(format!(
                    "duplicate ID '{}'",
                    prediction.id
                )))
            } else {
                Ok(prediction)
            }
        });

        match result {
            Ok(prediction) => {
                loaded.predictions.insert(prediction.id.clone(), prediction);
            }
            Err(error) => {
                let row_error = RowError::new(line_num, fields.first().copied(), error);
                if options.strict {
                    return Err(row_error.into_error());
                }
                log::debug!("Rejected {}", row_error);
                loaded.errors.push(row_error);
            }
        }
    }

    log::info!(
        "Loaded {} predictions ({} rejected rows)",
        loaded.predictions.len(),
        loaded.errors.len()
    );
    Ok(loaded)
}

/// Read system output from a file.
pub fn load_predictions_file(
    path: impl AsRef<Path>,
    options: LoadOptions,
) -> Result<LoadedPredictions> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    log::debug!("Read system output {:?} ({} bytes)", path, content.len());
    load_predictions_str(&content, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_referent_flags() {
        assert_eq!(Referent::from_flags(true, false).unwrap(), Referent::A);
        assert_eq!(Referent::from_flags(false, true).unwrap(), Referent::B);
        assert_eq!(Referent::from_flags(false, false).unwrap(), Referent::Neither);
        assert!(matches!(
            Referent::from_flags(true, true),
            Err(Error::InvariantViolation(_))
        ));
        for r in [Referent::A, Referent::B, Referent::Neither] {
            let (a, b) = r.flags();
            assert_eq!(Referent::from_flags(a, b).unwrap(), r);
        }
    }

    #[test]
    fn test_referent_from_str() {
        assert_eq!("a".parse::<Referent>().unwrap(), Referent::A);
        assert_eq!(" B ".parse::<Referent>().unwrap(), Referent::B);
        assert_eq!("Neither".parse::<Referent>().unwrap(), Referent::Neither);
        assert_eq!("NONE".parse::<Referent>().unwrap(), Referent::Neither);
        assert!("C".parse::<Referent>().is_err());
    }

    #[test]
    fn test_parse_flag_layout() {
        let p = parse_prediction_row(&["test-1", "true", "FALSE"]).unwrap();
        assert_eq!(p.referent, Referent::A);
        assert_eq!(p.confidence, None);

        let p = parse_prediction_row(&["test-2", "False", "True", "0.75"]).unwrap();
        assert_eq!(p.referent, Referent::B);
        assert_eq!(p.confidence, Some(0.75));
    }

    #[test]
    fn test_parse_label_layout() {
        let p = parse_prediction_row(&["test-3", "NEITHER"]).unwrap();
        assert_eq!(p.referent, Referent::Neither);
        let p = parse_prediction_row(&["test-4", "A", "0.5"]).unwrap();
        assert_eq!(p.referent, Referent::A);
        assert_eq!(p.confidence, Some(0.5));
    }

    #[test]
    fn test_parse_rejects() {
        assert!(matches!(
            parse_prediction_row(&["x", "TRUE", "TRUE"]),
            Err(Error::InvariantViolation(_))
        ));
        assert!(parse_prediction_row(&["x", "TRUE", "maybe"]).is_err());
        assert!(parse_prediction_row(&["x", "TRUE"]).is_err());
        assert!(parse_prediction_row(&["", "A"]).is_err());
        assert!(parse_prediction_row(&["x"]).is_err());
        assert!(parse_prediction_row(&["x", "A", "high"]).is_err());
        assert!(parse_prediction_row(&["x", "A", "NaN"]).is_err());
        assert!(parse_prediction_row(&["x", "TRUE", "FALSE", "0.1", "extra"]).is_err());
    }

    #[test]
    fn test_load_skips_header_and_collects_errors() {
        let content = "ID\tA-coref\tB-coref\n\
                       test-1\tTRUE\tFALSE\n\
                       test-2\tTRUE\tTRUE\n\
                       \n\
                       test-1\tFALSE\tTRUE\n\
                       test-3\tFALSE\tFALSE\r\n";
        let loaded = load_predictions_str(content, LoadOptions::default()).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.predictions["test-1"].referent, Referent::A);
        assert_eq!(loaded.predictions["test-3"].referent, Referent::Neither);
        assert_eq!(loaded.errors.len(), 2);
        assert_eq!(loaded.errors[0].line, 3);
        assert_eq!(loaded.errors[1].line, 5);
    }

    #[test]
    fn test_load_strict_aborts() {
        let content = "test-1\tTRUE\tFALSE\ntest-2\tyes\tno\n";
        let err = load_predictions_str(content, LoadOptions { strict: true }).unwrap_err();
        assert!(matches!(err, Error::MalformedRow(_)));
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_load_empty() {
        let loaded = load_predictions_str("", LoadOptions::default()).unwrap();
        assert!(loaded.is_empty());
        assert!(loaded.errors.is_empty());
    }
}
