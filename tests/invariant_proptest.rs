//! Property tests for parsing and scoring invariants.

use gap_score::eval::{parse_line, score, Counts, Prediction, Referent};
use gap_score::{Error, GapExample, ScorerConfig};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn referent() -> impl Strategy<Value = Referent> {
    prop_oneof![
        Just(Referent::A),
        Just(Referent::B),
        Just(Referent::Neither)
    ]
}

/// A valid example with arbitrary (possibly multi-byte) names.
fn example() -> impl Strategy<Value = GapExample> {
    (
        "[A-Z][a-zéëøü]{1,8}",
        "[A-Z][a-zéëøü]{1,8}",
        prop_oneof![Just("she"), Just("He"), Just("her"), Just("his")],
        referent(),
        0u32..10_000,
    )
        .prop_map(|(a, b, pronoun, gold, n)| {
            let text = format!("{} met {}. Then {} left.", a, b, pronoun);
            let offset_b = a.chars().count() + 5;
            let pronoun_offset = offset_b + b.chars().count() + 7;
            let (coref_a, coref_b) = gold.flags();
            GapExample {
                id: format!("prop-{}", n),
                text,
                pronoun: pronoun.to_string(),
                pronoun_offset,
                name_a: a,
                offset_a: 0,
                coref_a,
                name_b: b,
                offset_b,
                coref_b,
                url: String::new(),
            }
        })
}

fn examples_with_system() -> impl Strategy<Value = Vec<(GapExample, Referent)>> {
    prop::collection::vec((example(), referent()), 1..40).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (mut ex, sys))| {
                ex.id = format!("prop-{}", i);
                (ex, sys)
            })
            .collect()
    })
}

fn split(rows: &[(GapExample, Referent)]) -> (Vec<GapExample>, BTreeMap<String, Prediction>) {
    let gold = rows.iter().map(|(ex, _)| ex.clone()).collect();
    let system = rows
        .iter()
        .map(|(ex, sys)| (ex.id.clone(), Prediction::new(&ex.id, *sys)))
        .collect();
    (gold, system)
}

proptest! {
    #[test]
    fn test_canonical_line_reparses(ex in example()) {
        let parsed = parse_line(&ex.to_tsv_line()).unwrap();
        prop_assert_eq!(&parsed, &ex);
        prop_assert_eq!(parsed.to_tsv_line(), ex.to_tsv_line());
    }

    #[test]
    fn test_both_coref_never_parses(mut ex in example()) {
        ex.coref_a = true;
        ex.coref_b = true;
        prop_assert!(matches!(
            parse_line(&ex.to_tsv_line()),
            Err(Error::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_shifted_offset_is_rejected(ex in example(), shift in 1usize..3) {
        let mut bad = ex.clone();
        bad.offset_b += shift;
        prop_assert!(matches!(
            parse_line(&bad.to_tsv_line()),
            Err(Error::MalformedRow(_))
        ));
    }

    #[test]
    fn test_metrics_bounded_and_consistent(rows in examples_with_system()) {
        let (gold, system) = split(&rows);
        let report = score(&gold, &system, &ScorerConfig::default()).unwrap();

        for value in [
            report.precision_m, report.recall_m, report.f1_m,
            report.precision_f, report.recall_f, report.f1_f,
            report.f1_overall,
        ] {
            prop_assert!((0.0..=1.0).contains(&value), "metric out of range: {}", value);
        }
        prop_assert!(report.is_consistent());
        prop_assert_eq!(report.overall.counts.total(), 2 * gold.len() as u64);
        if let Some(bias) = report.bias {
            prop_assert!(bias >= 0.0);
        }
    }

    #[test]
    fn test_scoring_is_deterministic(rows in examples_with_system()) {
        let (gold, system) = split(&rows);
        let config = ScorerConfig::default();
        let first = score(&gold, &system, &config).unwrap();
        let second = score(&gold, &system, &config).unwrap();
        prop_assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
    }

    #[test]
    fn test_strata_sum_to_overall(rows in examples_with_system()) {
        let (gold, system) = split(&rows);
        let report = score(&gold, &system, &ScorerConfig::default()).unwrap();

        let mut summed = Counts::default();
        summed += report.masculine.counts;
        summed += report.feminine.counts;
        summed += report.other.counts;
        prop_assert_eq!(summed, report.overall.counts);
    }

    #[test]
    fn test_f1_bounded(tp in 0u64..1000, fp in 0u64..1000, fn_ in 0u64..1000, tn in 0u64..1000) {
        let counts = Counts { tp, fp, fn_, tn };
        let f1 = counts.f1();
        prop_assert!((0.0..=1.0).contains(&f1));
        prop_assert!(f1 <= counts.precision().max(counts.recall()) + 1e-12);
    }
}
