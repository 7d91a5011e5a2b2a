//! GAP gold file parsing.
//!
//! GAP (Gendered Ambiguous Pronouns) pairs a pronoun with two candidate names
//! from a Wikipedia snippet. Each gold file is UTF-8 TSV with one header row:
//!
//! ```text
//! ID  Text  Pronoun  Pronoun-offset  A  A-offset  A-coref  B  B-offset  B-coref  URL
//! ```
//!
//! Offsets count characters into `Text`. A row is accepted only if every span
//! sits exactly at its offset and at most one candidate is marked coreferent.
//!
//! # Supported Files
//!
//! | Split | File | Rows |
//! |-------|------|------|
//! | Test | `gap-test.tsv` | 4,000 |
//! | Development | `gap-development.tsv` | 4,000 |
//! | Validation | `gap-validation.tsv` | 908 |
//!
//! # Example
//!
//! ```rust
//! use gap_score::eval::gap::{load_gap_str, LoadOptions};
//!
//! let tsv = "ID\tText\tPronoun\tPronoun-offset\tA\tA-offset\tA-coref\tB\tB-offset\tB-coref\tURL\n\
//!            test-1\tJohn saw Mary. He waved.\tHe\t15\tJohn\t0\tTRUE\tMary\t9\tFALSE\thttps://example.com";
//!
//! let loaded = load_gap_str(tsv, LoadOptions::default()).unwrap();
//! assert_eq!(loaded.examples.len(), 1);
//! assert!(loaded.errors.is_empty());
//! ```

use super::prediction::Referent;
use crate::gender::{Gender, PronounTable};
use crate::offset::SpanConverter;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;

/// Column names of a gold file, in order.
pub const GOLD_COLUMNS: [&str; 11] = [
    "ID",
    "Text",
    "Pronoun",
    "Pronoun-offset",
    "A",
    "A-offset",
    "A-coref",
    "B",
    "B-offset",
    "B-coref",
    "URL",
];

// =============================================================================
// GAP Example
// =============================================================================

/// A single GAP example (pronoun and two candidate names).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapExample {
    /// Unique identifier
    pub id: String,
    /// Full text context
    pub text: String,
    /// The pronoun to resolve
    pub pronoun: String,
    /// Character offset of pronoun
    pub pronoun_offset: usize,
    /// First candidate name (A)
    pub name_a: String,
    /// Character offset of name A
    pub offset_a: usize,
    /// Whether pronoun refers to A
    pub coref_a: bool,
    /// Second candidate name (B)
    pub name_b: String,
    /// Character offset of name B
    pub offset_b: usize,
    /// Whether pronoun refers to B
    pub coref_b: bool,
    /// Source URL (Wikipedia)
    pub url: String,
}

impl GapExample {
    /// The gold referent for this example.
    ///
    /// Examples built through [`parse_row`] never have both flags set; for a
    /// hand-built example with both set, A wins.
    #[must_use]
    pub fn referent(&self) -> Referent {
        match (self.coref_a, self.coref_b) {
            (true, _) => Referent::A,
            (false, true) => Referent::B,
            (false, false) => Referent::Neither,
        }
    }

    /// Gender stratum of the pronoun under `table`.
    #[must_use]
    pub fn gender(&self, table: &PronounTable) -> Gender {
        table.classify(&self.pronoun)
    }

    /// Check the label and offset invariants.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::malformed_row("empty ID"));
        }
        if self.coref_a && self.coref_b {
            return Err(Error::invariant_violation(format!(
                "{}: A-coref and B-coref are both TRUE",
                self.id
            )));
        }

        let conv = SpanConverter::new(&self.text);
        check_span(&conv, &self.text, "Pronoun", &self.pronoun, self.pronoun_offset)?;
        check_span(&conv, &self.text, "A", &self.name_a, self.offset_a)?;
        check_span(&conv, &self.text, "B", &self.name_b, self.offset_b)?;
        Ok(())
    }

    /// The canonical eleven fields, in [`GOLD_COLUMNS`] order.
    #[must_use]
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.text.clone(),
            self.pronoun.clone(),
            self.pronoun_offset.to_string(),
            self.name_a.clone(),
            self.offset_a.to_string(),
            format_gold_bool(self.coref_a).to_string(),
            self.name_b.clone(),
            self.offset_b.to_string(),
            format_gold_bool(self.coref_b).to_string(),
            self.url.clone(),
        ]
    }

    /// The canonical row joined with tabs (no trailing newline).
    #[must_use]
    pub fn to_tsv_line(&self) -> String {
        self.to_row().join("\t")
    }
}

fn check_span(
    conv: &SpanConverter,
    text: &str,
    column: &str,
    span: &str,
    offset: usize,
) -> Result<()> {
    if span.is_empty() {
        return Err(Error::malformed_row(format!("{}: empty span", column)));
    }

    let end = offset
        .checked_add(span.chars().count())
        .ok_or_else(|| Error::malformed_row(format!("{}: offset overflow", column)))?;

    let found = conv.from_chars(offset, end).ok_or_else(|| {
        Error::malformed_row(format!(
            "{}: span '{}' at char {} runs past end of text ({} chars)",
            column,
            span,
            offset,
            conv.char_count()
        ))
    })?;

    let actual = found.extract(text);
    if actual != span {
        return Err(Error::malformed_row(format!(
            "{}: expected '{}' at char {}, found '{}'",
            column, span, offset, actual
        )));
    }
    Ok(())
}

// =============================================================================
// Field Parsers
// =============================================================================

const fn format_gold_bool(value: bool) -> &'static str {
    if value {
        "TRUE"
    } else {
        "FALSE"
    }
}

fn parse_gold_bool(field: &str, column: &str) -> Result<bool> {
    match field {
        "TRUE" => Ok(true),
        "FALSE" => Ok(false),
        other => Err(Error::malformed_row(format!(
            "{}: expected TRUE or FALSE, got '{}'",
            column, other
        ))),
    }
}

fn parse_offset(field: &str, column: &str) -> Result<usize> {
    let value: i64 = field.parse().map_err(|_| {
        Error::malformed_row(format!("{}: not an integer '{}'", column, field))
    })?;
    usize::try_from(value)
        .map_err(|_| Error::malformed_row(format!("{}: negative offset {}", column, value)))
}

/// Parse one gold row into a validated [`GapExample`].
///
/// # Errors
///
/// - [`Error::MalformedRow`] for a wrong field count, a bad boolean or offset,
///   or a span that does not sit at its offset.
/// - [`Error::InvariantViolation`] when both candidates are marked coreferent.
pub fn parse_row(fields: &[&str]) -> Result<GapExample> {
    if fields.len() != GOLD_COLUMNS.len() {
        return Err(Error::malformed_row(format!(
            "expected {} fields, got {}",
            GOLD_COLUMNS.len(),
            fields.len()
        )));
    }

    let example = GapExample {
        id: fields[0].to_string(),
        text: fields[1].to_string(),
        pronoun: fields[2].to_string(),
        pronoun_offset: parse_offset(fields[3], "Pronoun-offset")?,
        name_a: fields[4].to_string(),
        offset_a: parse_offset(fields[5], "A-offset")?,
        coref_a: parse_gold_bool(fields[6], "A-coref")?,
        name_b: fields[7].to_string(),
        offset_b: parse_offset(fields[8], "B-offset")?,
        coref_b: parse_gold_bool(fields[9], "B-coref")?,
        url: fields[10].to_string(),
    };

    example.validate()?;
    Ok(example)
}

/// Parse one tab-separated gold line.
pub fn parse_line(line: &str) -> Result<GapExample> {
    let fields: Vec<&str> = line.split('\t').collect();
    parse_row(&fields)
}

// =============================================================================
// Row Errors
// =============================================================================

/// A row that failed to parse, with its 1-based line number.
#[derive(Debug)]
pub struct RowError {
    /// 1-based line number in the source file.
    pub line: usize,
    /// ID column of the row, if it had one.
    pub id: Option<String>,
    /// What went wrong.
    pub error: Error,
}

impl RowError {
    /// Create a row error.
    pub fn new(line: usize, id: Option<&str>, error: Error) -> Self {
        let id = id.map(str::trim).filter(|s| !s.is_empty()).map(String::from);
        Self { line, id, error }
    }

    /// Fold the line number into the error message, keeping the variant.
    #[must_use]
    pub fn into_error(self) -> Error {
        let prefix = match &self.id {
            Some(id) => format!("line {} ({})", self.line, id),
            None => format!("line {}", self.line),
        };
        match self.error {
            Error::MalformedRow(msg) => Error::MalformedRow(format!("{}: {}", prefix, msg)),
            Error::InvariantViolation(msg) => {
                Error::InvariantViolation(format!("{}: {}", prefix, msg))
            }
            other => other,
        }
    }
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "line {} ({}): {}", self.line, id, self.error),
            None => write!(f, "line {}: {}", self.line, self.error),
        }
    }
}

// =============================================================================
// Splits
// =============================================================================

/// The three official GAP partitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    /// `gap-test.tsv`
    Test,
    /// `gap-development.tsv`
    Development,
    /// `gap-validation.tsv`
    Validation,
}

impl Split {
    /// All splits.
    pub const ALL: [Split; 3] = [Split::Test, Split::Development, Split::Validation];

    /// Official row count.
    #[must_use]
    pub const fn expected_len(&self) -> usize {
        match self {
            Split::Test => 4000,
            Split::Development => 4000,
            Split::Validation => 908,
        }
    }

    /// Official file name.
    #[must_use]
    pub const fn file_name(&self) -> &'static str {
        match self {
            Split::Test => "gap-test.tsv",
            Split::Development => "gap-development.tsv",
            Split::Validation => "gap-validation.tsv",
        }
    }

    /// Recognize a split from a path's file name.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        Self::ALL.into_iter().find(|split| split.file_name() == name)
    }

    /// Describe a cardinality mismatch, if any.
    #[must_use]
    pub fn check_cardinality(&self, rows: usize) -> Option<String> {
        let expected = self.expected_len();
        (rows != expected).then(|| {
            format!(
                "{} has {} rows, expected {}",
                self.file_name(),
                rows,
                expected
            )
        })
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Options for loading gold and system files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Abort on the first bad row instead of collecting it.
    pub strict: bool,
}

impl LoadOptions {
    /// Strict loading.
    #[must_use]
    pub const fn strict() -> Self {
        Self { strict: true }
    }
}

/// Examples read from a gold file, plus the rows that failed.
#[derive(Debug, Default)]
pub struct LoadedGap {
    /// Accepted examples in file order.
    pub examples: Vec<GapExample>,
    /// Rejected rows.
    pub errors: Vec<RowError>,
    /// Split recognized from the file name, if loaded from a file.
    pub split: Option<Split>,
}

impl LoadedGap {
    /// Total data rows seen (accepted and rejected).
    #[must_use]
    pub fn rows(&self) -> usize {
        self.examples.len() + self.errors.len()
    }

    /// Whether every row parsed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parse a gold file from a string.
///
/// The first line is the header. Row errors are collected unless
/// `options.strict` is set, in which case the first one is returned.
pub fn load_gap_str(content: &str, options: LoadOptions) -> Result<LoadedGap> {
    let mut lines = content.lines().enumerate();

    let header = lines
        .next()
        .map(|(_, line)| line.trim_start_matches('\u{feff}').trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .ok_or_else(|| Error::dataset("empty file: no header row"))?;
    let header_fields: Vec<&str> = header.split('\t').map(str::trim).collect();
    if header_fields != GOLD_COLUMNS {
        log::warn!(
            "Unexpected header {:?}; treating first line as header anyway",
            header_fields
        );
    }

    let mut loaded = LoadedGap::default();
    let mut seen: HashSet<String> = HashSet::new();

    for (idx, raw) in lines {
        let line_num = idx + 1;
        let line = raw.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        let result = parse_row(&fields).and_then(|example| {
            if seen.contains(&example.id) {
                Err(Error::malformed_row(format!("duplicate ID '{}'", example.id)))
            } else {
                Ok(example)
            }
        });

        match result {
            Ok(example) => {
                seen.insert(example.id.clone());
                loaded.examples.push(example);
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

    if !loaded.errors.is_empty() {
        log::warn!(
            "{} of {} rows rejected",
            loaded.errors.len(),
            loaded.rows()
        );
    }
    log::info!("Loaded {} GAP examples", loaded.examples.len());
    Ok(loaded)
}

/// Read a gold file.
///
/// Recognizes the official split from the file name and logs a warning when
/// its row count differs from the published one. The count is not enforced.
pub fn load_gap_file(path: impl AsRef<Path>, options: LoadOptions) -> Result<LoadedGap> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    log::debug!("Read gold file {:?} ({} bytes)", path, content.len());

    let mut loaded = load_gap_str(&content, options)?;
    loaded.split = Split::from_path(path);
    if let Some(split) = loaded.split {
        if let Some(msg) = split.check_cardinality(loaded.rows()) {
            log::warn!("{}", msg);
        }
    }
    Ok(loaded)
}

// =============================================================================
// Summary Statistics
// =============================================================================

/// Example counts for a set of gold examples.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapStats {
    /// Number of examples.
    pub examples: usize,
    /// Examples per gender stratum.
    pub by_gender: BTreeMap<Gender, usize>,
    /// Examples per gold referent.
    pub by_referent: BTreeMap<Referent, usize>,
    /// Examples per (gender, referent) cell.
    pub by_gender_referent: BTreeMap<Gender, BTreeMap<Referent, usize>>,
    /// Distinct pronoun surface forms (lower-cased) and their counts.
    pub pronouns: BTreeMap<String, usize>,
}

impl GapStats {
    /// Count `examples`, stratifying with `table`.
    #[must_use]
    pub fn compute(examples: &[GapExample], table: &PronounTable) -> Self {
        let mut stats = Self {
            examples: examples.len(),
            ..Self::default()
        };
        for ex in examples {
            let gender = ex.gender(table);
            let referent = ex.referent();
            *stats.by_gender.entry(gender).or_default() += 1;
            *stats.by_referent.entry(referent).or_default() += 1;
            *stats
                .by_gender_referent
                .entry(gender)
                .or_default()
                .entry(referent)
                .or_default() += 1;
            *stats.pronouns.entry(ex.pronoun.to_lowercase()).or_default() += 1;
        }
        stats
    }

    /// Count for one gender stratum.
    #[must_use]
    pub fn gender_count(&self, gender: Gender) -> usize {
        self.by_gender.get(&gender).copied().unwrap_or(0)
    }

    /// Count for one (gender, referent) cell.
    #[must_use]
    pub fn cell(&self, gender: Gender, referent: Referent) -> usize {
        self.by_gender_referent
            .get(&gender)
            .and_then(|row| row.get(&referent))
            .copied()
            .unwrap_or(0)
    }
}

// =============================================================================
// Tests
// =============================================================================
