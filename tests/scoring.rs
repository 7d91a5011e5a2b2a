//! End-to-end scoring: load gold and system text, score, check the report.

use gap_score::eval::{
    load_gap_str, load_predictions_str, oracle_predictions, score, Averaging, LoadOptions,
    Prediction, Referent,
};
use gap_score::{Error, GapExample, Gender, PronounTable, ScorerConfig};
use std::collections::BTreeMap;

const GOLD: &str = "ID\tText\tPronoun\tPronoun-offset\tA\tA-offset\tA-coref\tB\tB-offset\tB-coref\tURL\n\
t-1\tAnn met Bob. She left.\tShe\t13\tAnn\t0\tTRUE\tBob\t8\tFALSE\t\n\
t-2\tAnn met Bob. He left.\tHe\t13\tAnn\t0\tFALSE\tBob\t8\tTRUE\t\n\
t-3\tAnn met Bob. She left.\tShe\t13\tAnn\t0\tFALSE\tBob\t8\tFALSE\t\n\
t-4\tAnn met Bob. He left.\tHe\t13\tAnn\t0\tTRUE\tBob\t8\tFALSE\t\n";

fn gold() -> Vec<GapExample> {
    load_gap_str(GOLD, LoadOptions::strict()).unwrap().examples
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_one_wrong_masculine_example() {
    // t-4 gold A, system B: one fn (A) and one fp (B) in Masculine
    let system = "t-1\tA\nt-2\tB\nt-3\tNEITHER\nt-4\tB\n";
    let predictions = load_predictions_str(system, LoadOptions::strict())
        .unwrap()
        .predictions;

    let report = score(&gold(), &predictions, &ScorerConfig::default()).unwrap();

    assert_eq!(report.masculine.counts.tp, 1);
    assert_eq!(report.masculine.counts.fp, 1);
    assert_eq!(report.masculine.counts.fn_, 1);
    assert_eq!(report.masculine.counts.tn, 1);
    assert!(approx(report.f1_m, 0.5));

    assert_eq!(report.feminine.counts.tp, 1);
    assert_eq!(report.feminine.counts.tn, 3);
    assert!(approx(report.f1_f, 1.0));

    assert_eq!(report.overall.counts.total(), 8);
    assert!(approx(report.f1_overall, 2.0 / 3.0));
    assert!(approx(report.bias.unwrap(), 2.0));
    assert!(report.is_consistent());

    let card = report.scorecard();
    assert!(card.starts_with("Overall recall: 66.7 precision: 66.7 f1: 66.7\n"));
    assert!(card.contains("Masculine recall: 50.0 precision: 50.0 f1: 50.0"));
    assert!(card.ends_with("Bias (F/M): 2.00\n"));
}

#[test]
fn test_macro_averaging() {
    let system: BTreeMap<String, Prediction> = [
        Prediction::new("t-1", Referent::A),
        Prediction::new("t-2", Referent::B),
        Prediction::new("t-3", Referent::Neither),
        Prediction::new("t-4", Referent::B),
    ]
    .into_iter()
    .map(|p| (p.id.clone(), p))
    .collect();

    let config = ScorerConfig::default().with_averaging(Averaging::Macro);
    let report = score(&gold(), &system, &config).unwrap();
    assert!(approx(report.f1_overall, 0.75));
    assert!(approx(report.f1_overall_micro, 2.0 / 3.0));
    assert!(report.scorecard().contains("Overall f1 (macro): 75.0"));
}

#[test]
fn test_missing_predictions_lenient_and_strict() {
    let mut system = oracle_predictions(&gold());
    system.remove("t-1");
    system.insert("stray".to_string(), Prediction::new("stray", Referent::A));

    let report = score(&gold(), &system, &ScorerConfig::default()).unwrap();
    assert_eq!(report.missing_predictions, 1);
    assert_eq!(report.extra_predictions, 1);
    // t-1 scored as NEITHER: A is a false negative
    assert_eq!(report.feminine.counts.fn_, 1);
    assert_eq!(report.feminine.counts.fp, 0);

    let err = score(&gold(), &system, &ScorerConfig::default().with_strict(true)).unwrap_err();
    match err {
        Error::MissingPrediction { id } => assert_eq!(id, "t-1"),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_bias_undefined_without_masculine_signal() {
    let system: BTreeMap<String, Prediction> = gold()
        .iter()
        .map(|ex| (ex.id.clone(), Prediction::new(&ex.id, Referent::Neither)))
        .collect();

    let report = score(&gold(), &system, &ScorerConfig::default()).unwrap();
    assert_eq!(report.f1_m, 0.0);
    assert_eq!(report.bias, None);
    assert!(matches!(report.bias_checked(), Err(Error::DivisionUndefined)));
    assert!(report.scorecard().ends_with("Bias (F/M): -\n"));
}

#[test]
fn test_other_pronouns_only_count_overall() {
    let table = PronounTable::empty().with_pronoun("she", Gender::Feminine);
    let config = ScorerConfig::default().with_pronoun_table(table);
    let report = score(&gold(), &oracle_predictions(&gold()), &config).unwrap();

    assert_eq!(report.other.examples, 2);
    assert_eq!(report.masculine.examples, 0);
    assert_eq!(report.overall.examples, 4);
    assert!(report.scorecard().contains("Other recall: 100.0"));
}

#[test]
fn test_json_report_fields() {
    let report = score(&gold(), &oracle_predictions(&gold()), &ScorerConfig::default()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

    assert_eq!(value["f1_overall"], 1.0);
    assert_eq!(value["bias"], 1.0);
    assert_eq!(value["averaging"], "micro");
    assert_eq!(value["masculine"]["counts"]["fn"], 0);
    assert_eq!(value["feminine"]["counts"]["tp"], 1);
}
