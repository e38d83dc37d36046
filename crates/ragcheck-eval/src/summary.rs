// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Per-metric means over a batch

use ragcheck::{EvalRecord, Metric, MetricGroup};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Mean score of each requested metric, in request order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    means: Vec<(Metric, f64)>,
}

impl Summary {
    /// Average `metrics` over `records`.
    ///
    /// Records lacking a score are skipped; a metric no record carries
    /// averages to 0.
    pub fn from_records(records: &[EvalRecord], metrics: &[Metric]) -> Self {
        let means = metrics
            .iter()
            .map(|&metric| {
                let (sum, n) = records
                    .iter()
                    .filter_map(|record| record.score(metric))
                    .fold((0.0, 0usize), |(sum, n), value| (sum + value, n + 1));
                let mean = if n == 0 { 0.0 } else { sum / n as f64 };
                (metric, mean)
            })
            .collect();
        Self { means }
    }

    /// Mean of `metric`, if it was requested.
    pub fn get(&self, metric: Metric) -> Option<f64> {
        self.means
            .iter()
            .find(|(m, _)| *m == metric)
            .map(|(_, v)| *v)
    }

    /// Means in request order.
    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        self.means.iter().copied()
    }

    /// Means of the requested metrics belonging to `group`, in group order.
    pub fn group(&self, group: MetricGroup) -> Vec<(Metric, f64)> {
        group
            .metrics()
            .iter()
            .filter_map(|&metric| self.get(metric).map(|mean| (metric, mean)))
            .collect()
    }

    /// Number of metrics summarized.
    pub fn len(&self) -> usize {
        self.means.len()
    }

    /// True if no metric was requested.
    pub fn is_empty(&self) -> bool {
        self.means.is_empty()
    }
}

impl Serialize for Summary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.means.len()))?;
        for (metric, mean) in &self.means {
            map.serialize_entry(metric.as_str(), mean)?;
        }
        map.end()
    }
}
