// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Memoized metric resolution
//!
//! The [`Engine`] walks the dependency [`Graph`](crate::graph::Graph):
//! a metric already present in the record's scores short-circuits,
//! otherwise its prerequisites are resolved and its kernel runs once,
//! writing every output the kernel produces.

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::graph::Kernel;
use crate::kernels;
use crate::label::{MatrixLayout, Vocabulary};
use crate::matrix::BoolMatrix;
use crate::metric::Metric;
use crate::record::{EvalRecord, JudgmentField, Judgments};
use crate::registry::Registry;
use crate::shape::validate_shapes;

/// Scores records against a borrowed [`Registry`].
///
/// The engine holds no per-record state and can be shared across threads.
#[derive(Debug, Clone)]
pub struct Engine<'r> {
    registry: &'r Registry,
    vocabulary: Vocabulary,
    layout: MatrixLayout,
    strict_shapes: bool,
}

impl Default for Engine<'static> {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl Engine<'static> {
    /// Create an engine over the standard registry.
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_registry(Registry::standard(), config)
    }
}

impl<'r> Engine<'r> {
    /// Create an engine over a caller-owned registry.
    pub fn with_registry(registry: &'r Registry, config: &EngineConfig) -> Self {
        Self {
            registry,
            vocabulary: config.vocabulary(),
            layout: config.matrix_layout,
            strict_shapes: config.strict_shapes,
        }
    }

    /// The registry this engine resolves through.
    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// The label vocabulary.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Evaluation order for `metrics`, prerequisites first.
    pub fn plan(&self, metrics: &[Metric]) -> Vec<Metric> {
        self.registry.plan(metrics)
    }

    /// Score a single metric (and its prerequisites) on `record`.
    ///
    /// A metric already present in the record's scores is left untouched.
    pub fn evaluate_metric(&self, record: &mut EvalRecord, metric: Metric) -> Result<()> {
        self.validate(record)?;
        self.resolve(record, metric)
    }

    /// Score `metrics` on `record` in dependency order.
    pub fn evaluate(&self, record: &mut EvalRecord, metrics: &[Metric]) -> Result<()> {
        self.validate(record)?;
        for metric in self.plan(metrics) {
            self.resolve(record, metric)?;
        }
        Ok(())
    }

    /// Score metrics given by metric or group name.
    pub fn evaluate_by_name<S: AsRef<str>>(
        &self,
        record: &mut EvalRecord,
        names: &[S],
    ) -> Result<()> {
        let metrics = self.registry.parse_selection(names)?;
        self.evaluate(record, &metrics)
    }

    fn validate(&self, record: &EvalRecord) -> Result<()> {
        if !self.strict_shapes {
            return Ok(());
        }
        let checked = validate_shapes(&record.judgments, &self.vocabulary, self.layout);
        #[cfg(feature = "tracing")]
        if let Err(err) = &checked {
            tracing::warn!(id = ?record.id, error = %err, "record rejected by shape validation");
        }
        checked
    }

    fn resolve(&self, record: &mut EvalRecord, metric: Metric) -> Result<()> {
        if record.metrics.contains(metric) {
            #[cfg(feature = "tracing")]
            tracing::debug!(metric = %metric, "already scored");
            return Ok(());
        }
        let node = self.registry.graph().node(metric);
        for &prerequisite in node.prerequisites {
            self.resolve(record, prerequisite)?;
        }
        self.run(record, node.kernel, metric)
    }

    fn run(&self, record: &mut EvalRecord, kernel: Kernel, metric: Metric) -> Result<()> {
        #[cfg(feature = "tracing")]
        let _span =
            tracing::debug_span!("kernel", kernel = kernel.name(), metric = %metric).entered();

        use JudgmentField::*;
        let judgments = &record.judgments;
        let scores: Vec<(Metric, f64)> = match kernel {
            Kernel::Precision => {
                let a2r = self.vector(judgments, metric, Answer2Response)?;
                vec![(Metric::Precision, kernels::precision(&a2r))]
            }
            Kernel::Recall => {
                let resp2a = self.vector(judgments, metric, Response2Answer)?;
                vec![(Metric::Recall, kernels::recall(&resp2a))]
            }
            Kernel::F1 => {
                let precision = record.score(Metric::Precision).unwrap_or_default();
                let recall = record.score(Metric::Recall).unwrap_or_default();
                vec![(Metric::F1, kernels::f1(precision, recall))]
            }
            Kernel::Retrieval => {
                let r2a = self.matrix(judgments, metric, Retrieved2Answer)?;
                let scores = kernels::retrieval(&r2a);
                vec![
                    (Metric::ClaimRecall, scores.claim_recall),
                    (Metric::ContextPrecision, scores.context_precision),
                ]
            }
            Kernel::ContextUtilization => {
                let r2a = self.matrix(judgments, metric, Retrieved2Answer)?;
                let resp2a = self.vector(judgments, metric, Response2Answer)?;
                vec![(
                    Metric::ContextUtilization,
                    kernels::context_utilization(&r2a, &resp2a),
                )]
            }
            Kernel::NoiseSensitivity => {
                let r2resp = self.matrix(judgments, metric, Retrieved2Response)?;
                let a2r = self.vector(judgments, metric, Answer2Response)?;
                let r2a = self.matrix(judgments, metric, Retrieved2Answer)?;
                let scores = kernels::noise_sensitivity(&r2resp, &a2r, &r2a);
                vec![
                    (Metric::NoiseSensitivityInRelevant, scores.in_relevant),
                    (Metric::NoiseSensitivityInIrrelevant, scores.in_irrelevant),
                ]
            }
            Kernel::Unfaithfulness => {
                let r2resp = self.matrix(judgments, metric, Retrieved2Response)?;
                let a2r = self.vector(judgments, metric, Answer2Response)?;
                let scores = kernels::unfaithfulness(&r2resp, &a2r);
                vec![
                    (Metric::Hallucination, scores.hallucination),
                    (Metric::SelfKnowledge, scores.self_knowledge),
                ]
            }
            Kernel::Faithfulness => {
                let r2resp = self.matrix(judgments, metric, Retrieved2Response)?;
                vec![(Metric::Faithfulness, kernels::faithfulness(&r2resp))]
            }
        };

        for (output, value) in scores {
            if record.metrics.insert_if_absent(output, value) {
                #[cfg(feature = "tracing")]
                tracing::debug!(metric = %output, value, "score written");
            }
        }
        Ok(())
    }

    fn vector(
        &self,
        judgments: &Judgments,
        metric: Metric,
        field: JudgmentField,
    ) -> Result<Vec<bool>> {
        let judgment = judgments
            .get(field)
            .ok_or_else(|| Error::missing(metric, field))?;
        self.vocabulary.vector(field, judgment)
    }

    fn matrix(
        &self,
        judgments: &Judgments,
        metric: Metric,
        field: JudgmentField,
    ) -> Result<BoolMatrix> {
        let judgment = judgments
            .get(field)
            .ok_or_else(|| Error::missing(metric, field))?;
        self.vocabulary.matrix(field, judgment, self.layout)
    }
}
