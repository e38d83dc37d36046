// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Parallel evaluation using Rayon

use crate::error::{EvalError, Result};
use crate::evaluator::EvaluationResult;
use ragcheck::{Engine, EvalRecord, Metric};
use rayon::prelude::*;

/// Parallel evaluator using Rayon for CPU-bound tasks
pub struct ParallelEvaluator<'r> {
    engine: Engine<'r>,
    metrics: Vec<Metric>,
    num_threads: Option<usize>,
}

impl<'r> ParallelEvaluator<'r> {
    /// Create a new parallel evaluator
    pub fn new(engine: Engine<'r>, metrics: &[Metric]) -> Self {
        Self {
            engine,
            metrics: metrics.to_vec(),
            num_threads: None,
        }
    }

    /// Set number of threads
    pub fn with_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = Some(num_threads);
        self
    }

    /// Score every record in place.
    ///
    /// Records are independent, so every record is attempted. On failure
    /// the error of the lowest-indexed failing record is returned, the same
    /// one the sequential evaluator would report.
    pub fn evaluate(&self, records: &mut [EvalRecord]) -> Result<EvaluationResult> {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!(
            "evaluate_parallel",
            records = records.len(),
            metrics = self.metrics.len(),
            threads = self.num_threads
        )
        .entered();

        let pool = if let Some(threads) = self.num_threads {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()?
        } else {
            rayon::ThreadPoolBuilder::new().build()?
        };

        let first_failure = pool.install(|| {
            records
                .par_iter_mut()
                .enumerate()
                .filter_map(|(index, record)| {
                    self.engine
                        .evaluate(record, &self.metrics)
                        .err()
                        .map(|source| (index, source))
                })
                .reduce_with(|a, b| if a.0 <= b.0 { a } else { b })
        });

        if let Some((index, source)) = first_failure {
            return Err(EvalError::record(index, source));
        }

        #[cfg(feature = "tracing")]
        tracing::info!(records = records.len(), "parallel evaluation complete");
        Ok(EvaluationResult::new(records, &self.metrics))
    }
}
