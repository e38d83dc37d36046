// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Per-metric evaluators and the dispatch map
//!
//! One function per metric, all with the [`EvaluatorFn`] signature. Each
//! resolves through the engine, so the memoization guard and prerequisite
//! handling live in one place.
//!
//! ```
//! use ragcheck::{evaluators, Engine, EvalRecord, JudgmentField, MetricGroup};
//!
//! let engine = Engine::default();
//! let mut record = EvalRecord::new()
//!     .with_judgment(JudgmentField::Answer2Response, vec!["Entailment", "Neutral"])
//!     .with_judgment(JudgmentField::Response2Answer, vec!["Entailment"]);
//!
//! for &metric in MetricGroup::Overall.metrics() {
//!     evaluators::evaluator(metric)(&engine, &mut record).unwrap();
//! }
//! assert_eq!(record.metrics.len(), 3);
//! ```

use crate::engine::Engine;
use crate::error::Result;
use crate::metric::Metric;
use crate::record::EvalRecord;

/// Signature shared by every per-metric evaluator.
pub type EvaluatorFn = fn(&Engine<'_>, &mut EvalRecord) -> Result<()>;

/// Score `precision`.
pub fn evaluate_precision(engine: &Engine<'_>, record: &mut EvalRecord) -> Result<()> {
    engine.evaluate_metric(record, Metric::Precision)
}

/// Score `recall`.
pub fn evaluate_recall(engine: &Engine<'_>, record: &mut EvalRecord) -> Result<()> {
    engine.evaluate_metric(record, Metric::Recall)
}

/// Score `f1`, populating `precision` and `recall` first.
pub fn evaluate_f1(engine: &Engine<'_>, record: &mut EvalRecord) -> Result<()> {
    engine.evaluate_metric(record, Metric::F1)
}

/// Score `claim_recall` (also fills `context_precision`).
pub fn evaluate_claim_recall(engine: &Engine<'_>, record: &mut EvalRecord) -> Result<()> {
    engine.evaluate_metric(record, Metric::ClaimRecall)
}

/// Score `context_precision` (also fills `claim_recall`).
pub fn evaluate_context_precision(engine: &Engine<'_>, record: &mut EvalRecord) -> Result<()> {
    engine.evaluate_metric(record, Metric::ContextPrecision)
}

/// Score `context_utilization`.
pub fn evaluate_context_utilization(engine: &Engine<'_>, record: &mut EvalRecord) -> Result<()> {
    engine.evaluate_metric(record, Metric::ContextUtilization)
}

/// Score `noise_sensitivity_in_relevant` (also fills the irrelevant side).
pub fn evaluate_noise_sensitivity_in_relevant(
    engine: &Engine<'_>,
    record: &mut EvalRecord,
) -> Result<()> {
    engine.evaluate_metric(record, Metric::NoiseSensitivityInRelevant)
}

/// Score `noise_sensitivity_in_irrelevant` (also fills the relevant side).
pub fn evaluate_noise_sensitivity_in_irrelevant(
    engine: &Engine<'_>,
    record: &mut EvalRecord,
) -> Result<()> {
    engine.evaluate_metric(record, Metric::NoiseSensitivityInIrrelevant)
}

/// Score `hallucination` (also fills `self_knowledge`).
pub fn evaluate_hallucination(engine: &Engine<'_>, record: &mut EvalRecord) -> Result<()> {
    engine.evaluate_metric(record, Metric::Hallucination)
}

/// Score `self_knowledge` (also fills `hallucination`).
pub fn evaluate_self_knowledge(engine: &Engine<'_>, record: &mut EvalRecord) -> Result<()> {
    engine.evaluate_metric(record, Metric::SelfKnowledge)
}

/// Score `faithfulness`.
pub fn evaluate_faithfulness(engine: &Engine<'_>, record: &mut EvalRecord) -> Result<()> {
    engine.evaluate_metric(record, Metric::Faithfulness)
}

/// Evaluators indexed by [`Metric::index`].
static DISPATCH: [(Metric, EvaluatorFn); Metric::COUNT] = [
    (Metric::Precision, evaluate_precision),
    (Metric::Recall, evaluate_recall),
    (Metric::F1, evaluate_f1),
    (Metric::ClaimRecall, evaluate_claim_recall),
    (Metric::ContextPrecision, evaluate_context_precision),
    (Metric::ContextUtilization, evaluate_context_utilization),
    (
        Metric::NoiseSensitivityInRelevant,
        evaluate_noise_sensitivity_in_relevant,
    ),
    (
        Metric::NoiseSensitivityInIrrelevant,
        evaluate_noise_sensitivity_in_irrelevant,
    ),
    (Metric::Hallucination, evaluate_hallucination),
    (Metric::SelfKnowledge, evaluate_self_knowledge),
    (Metric::Faithfulness, evaluate_faithfulness),
];

/// The full dispatch map, in [`Metric::ALL`] order.
pub fn dispatch() -> &'static [(Metric, EvaluatorFn)] {
    &DISPATCH
}

/// Evaluator for `metric`.
#[inline]
pub fn evaluator(metric: Metric) -> EvaluatorFn {
    DISPATCH[metric.index()].1
}

/// Evaluator for a metric name. Fails with `UnknownMetric`.
pub fn evaluator_by_name(name: &str) -> Result<EvaluatorFn> {
    Ok(evaluator(name.parse()?))
}
