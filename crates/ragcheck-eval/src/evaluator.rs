// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Evaluator for running metrics on batches of records

use crate::error::{EvalError, Result};
use crate::summary::Summary;
use ragcheck::{Engine, EvalRecord, Metric};
use serde::Serialize;

/// Evaluation results
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationResult {
    /// Total records
    pub total: usize,

    /// Mean of each requested metric
    pub summary: Summary,
}

impl EvaluationResult {
    pub(crate) fn new(records: &[EvalRecord], metrics: &[Metric]) -> Self {
        Self {
            total: records.len(),
            summary: Summary::from_records(records, metrics),
        }
    }

    /// Mean score of `metric`, if it was requested.
    pub fn score(&self, metric: Metric) -> Option<f64> {
        self.summary.get(metric)
    }
}

/// Sequential evaluator
pub struct Evaluator<'r> {
    engine: Engine<'r>,
    metrics: Vec<Metric>,
}

impl<'r> Evaluator<'r> {
    /// Create a new evaluator
    pub fn new(engine: Engine<'r>, metrics: &[Metric]) -> Self {
        Self {
            engine,
            metrics: metrics.to_vec(),
        }
    }

    /// Metrics this evaluator scores
    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    /// Score every record in place, stopping at the first failure.
    pub fn evaluate(&self, records: &mut [EvalRecord]) -> Result<EvaluationResult> {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!(
            "evaluate",
            records = records.len(),
            metrics = self.metrics.len()
        )
        .entered();

        for (index, record) in records.iter_mut().enumerate() {
            self.engine
                .evaluate(record, &self.metrics)
                .map_err(|source| EvalError::record(index, source))?;
        }

        #[cfg(feature = "tracing")]
        tracing::info!(records = records.len(), "evaluation complete");
        Ok(EvaluationResult::new(records, &self.metrics))
    }
}
