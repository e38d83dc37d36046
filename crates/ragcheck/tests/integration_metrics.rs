// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! End-to-end metric scenarios through the public API.

use ragcheck::evaluators::{self, dispatch};
use ragcheck::io::{read_records, write_records};
use ragcheck::{
    Engine, EngineConfig, Error, EvalRecord, Judgment, JudgmentField, Metric, MetricGroup,
    Registry,
};

const E: &str = "Entailment";
const N: &str = "Neutral";
const C: &str = "Contradiction";

fn labels(items: &[&str]) -> Judgment {
    Judgment::seq(items.iter().copied())
}

fn label_matrix(rows: &[&[&str]]) -> Judgment {
    Judgment::seq(rows.iter().map(|row| labels(row)))
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// A record with every field set, written in checker labels.
fn full_record() -> EvalRecord {
    EvalRecord::new()
        .with_id("q-001")
        // 3 response claims
        .with_judgment(JudgmentField::Answer2Response, labels(&[E, N, C]))
        // 2 answer claims
        .with_judgment(JudgmentField::Response2Answer, labels(&[E, N]))
        // 3 chunks x 2 answer claims
        .with_judgment(
            JudgmentField::Retrieved2Answer,
            label_matrix(&[&[E, N], &[N, N], &[N, E]]),
        )
        // 3 chunks x 3 response claims
        .with_judgment(
            JudgmentField::Retrieved2Response,
            label_matrix(&[&[E, E, N], &[N, N, E], &[N, N, N]]),
        )
}

#[test]
fn test_overall_scenario() {
    let engine = Engine::default();
    let mut record = EvalRecord::new()
        .with_judgment(JudgmentField::Answer2Response, vec![true, true, false])
        .with_judgment(JudgmentField::Response2Answer, vec![true, false]);

    engine
        .evaluate(&mut record, MetricGroup::Overall.metrics())
        .unwrap();

    assert!(approx(record.score(Metric::Precision).unwrap(), 2.0 / 3.0));
    assert!(approx(record.score(Metric::Recall).unwrap(), 0.5));
    assert!(approx(record.score(Metric::F1).unwrap(), 0.571_428_571_4));
}

#[test]
fn test_retriever_scenario() {
    let engine = Engine::default();
    let mut record = EvalRecord::new().with_judgment(
        JudgmentField::Retrieved2Answer,
        vec![vec![true, false], vec![false, true]],
    );
    engine
        .evaluate(&mut record, MetricGroup::Retriever.metrics())
        .unwrap();
    assert_eq!(record.score(Metric::ClaimRecall), Some(1.0));
    assert_eq!(record.score(Metric::ContextPrecision), Some(1.0));
}

#[test]
fn test_faithfulness_and_unfaithfulness_scenario() {
    let engine = Engine::default();
    let mut record = EvalRecord::new()
        .with_judgment(
            JudgmentField::Retrieved2Response,
            vec![vec![false, false], vec![true, false]],
        )
        .with_judgment(JudgmentField::Answer2Response, vec![true, false]);

    engine
        .evaluate(
            &mut record,
            &[Metric::Faithfulness, Metric::Hallucination, Metric::SelfKnowledge],
        )
        .unwrap();

    assert_eq!(record.score(Metric::Faithfulness), Some(0.5));
    assert_eq!(record.score(Metric::Hallucination), Some(0.5));
    assert_eq!(record.score(Metric::SelfKnowledge), Some(0.0));
}

#[test]
fn test_full_suite_on_labels() {
    let engine = Engine::default();
    let mut record = full_record();
    engine.evaluate(&mut record, &Metric::ALL).unwrap();

    assert_eq!(record.metrics.len(), Metric::COUNT);
    assert!(approx(record.score(Metric::Precision).unwrap(), 1.0 / 3.0));
    assert_eq!(record.score(Metric::Recall), Some(0.5));
    // both answer claims are recalled, chunk 1 supports none
    assert_eq!(record.score(Metric::ClaimRecall), Some(1.0));
    assert!(approx(record.score(Metric::ContextPrecision).unwrap(), 2.0 / 3.0));
    // recalled claims: both; used: claim 0
    assert_eq!(record.score(Metric::ContextUtilization), Some(0.5));
    // chunks 0 and 2 relevant: response claims 0 and 1 relevant-faithful,
    // claim 2 supported only by chunk 1 (irrelevant)
    assert!(approx(
        record.score(Metric::NoiseSensitivityInRelevant).unwrap(),
        1.0 / 3.0
    ));
    assert!(approx(
        record.score(Metric::NoiseSensitivityInIrrelevant).unwrap(),
        1.0 / 3.0
    ));
    // every response claim is supported by some chunk
    assert_eq!(record.score(Metric::Hallucination), Some(0.0));
    assert_eq!(record.score(Metric::SelfKnowledge), Some(0.0));
    assert_eq!(record.score(Metric::Faithfulness), Some(1.0));
}

#[test]
fn test_scores_follow_plan_order() {
    let engine = Engine::default();
    let mut record = full_record();
    engine.evaluate(&mut record, &Metric::ALL).unwrap();
    let order: Vec<Metric> = record.metrics.iter().map(|(m, _)| m).collect();
    assert_eq!(order, Metric::ALL.to_vec());
}

#[test]
fn test_second_pass_is_a_no_op() {
    let engine = Engine::default();
    let mut record = full_record();
    engine.evaluate(&mut record, &Metric::ALL).unwrap();
    let first = record.metrics.clone();

    for (_, evaluate) in dispatch() {
        evaluate(&engine, &mut record).unwrap();
    }
    assert_eq!(record.metrics, first);
}

#[test]
fn test_zero_response_claims() {
    let engine = Engine::default();
    let mut record = EvalRecord::new()
        .with_judgment(JudgmentField::Answer2Response, Vec::<bool>::new())
        .with_judgment(
            JudgmentField::Retrieved2Response,
            vec![Vec::<bool>::new(), Vec::new()],
        );
    engine
        .evaluate(
            &mut record,
            &[
                Metric::Precision,
                Metric::Hallucination,
                Metric::SelfKnowledge,
                Metric::Faithfulness,
            ],
        )
        .unwrap();
    for (metric, value) in record.metrics.iter() {
        assert_eq!(value, 0.0, "{metric}");
    }
    assert_eq!(record.metrics.len(), 4);
}

#[test]
fn test_missing_dependency_names_metric_and_field() {
    let engine = Engine::default();
    let mut record =
        EvalRecord::new().with_judgment(JudgmentField::Retrieved2Answer, vec![vec![true]]);
    let err = engine
        .evaluate_metric(&mut record, Metric::ContextUtilization)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::MissingDependency {
            metric: Metric::ContextUtilization,
            field: JudgmentField::Response2Answer
        }
    ));

    // the registry predicts the same gap
    let missing = Registry::standard()
        .missing_fields(&record.judgments, &[Metric::ContextUtilization]);
    assert_eq!(missing, vec![JudgmentField::Response2Answer]);
}

#[test]
fn test_wrong_nesting_is_shape_mismatch() {
    let engine = Engine::default();
    let mut record = EvalRecord::new().with_judgment(JudgmentField::Retrieved2Answer, labels(&[E]));
    let err = engine
        .evaluate_metric(&mut record, Metric::ClaimRecall)
        .unwrap_err();
    assert!(err.is_shape_mismatch());
}

#[test]
fn test_dispatch_by_name() {
    let engine = Engine::default();
    let mut record = full_record();
    for name in ["faithfulness", "claim_recall"] {
        evaluators::evaluator_by_name(name).unwrap()(&engine, &mut record).unwrap();
    }
    assert_eq!(record.metrics.len(), 3);
    assert!(evaluators::evaluator_by_name("groundedness").is_err());
}

#[test]
fn test_strict_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("engine.json");
    std::fs::write(&path, r#"{"strict_shapes": true}"#).unwrap();

    let engine = Engine::new(&EngineConfig::load(&path).unwrap());
    let mut record = full_record().with_judgment(JudgmentField::Response2Answer, labels(&[E]));
    let err = engine.evaluate(&mut record, &Metric::ALL).unwrap_err();
    assert!(err.is_shape_mismatch());
    assert!(record.metrics.is_empty());
}

#[test]
fn test_records_round_trip_through_files() {
    let engine = Engine::default();
    let mut records = vec![full_record(), full_record().with_id("q-002")];
    for record in &mut records {
        engine.evaluate(record, &Metric::ALL).unwrap();
    }

    let dir = tempfile::tempdir().unwrap();
    for name in ["out.jsonl", "out.json"] {
        let path = dir.path().join(name);
        write_records(&path, &records).unwrap();
        let back = read_records(&path).unwrap();
        assert_eq!(back, records, "{name}");
    }
}

#[test]
fn test_group_selection_by_name() {
    let engine = Engine::default();
    let mut record = full_record();
    engine
        .evaluate_by_name(&mut record, &["generator"])
        .unwrap();
    let written: Vec<Metric> = record.metrics.iter().map(|(m, _)| m).collect();
    assert_eq!(written, MetricGroup::Generator.metrics().to_vec());
}
