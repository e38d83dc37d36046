// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Requirement registry and taxonomy lookups
//!
//! [`Registry`] is immutable once built. The standard instance is built on
//! first use and shared for the life of the process; engines borrow it.

use crate::error::Result;
use crate::graph::Graph;
use crate::metric::{Metric, MetricGroup};
use crate::record::{JudgmentField, Judgments};
use smallvec::SmallVec;
use std::sync::OnceLock;

type Fields = SmallVec<[JudgmentField; 4]>;

static STANDARD: OnceLock<Registry> = OnceLock::new();

/// Static metric metadata: dependency graph, required fields, groups.
#[derive(Debug, Clone)]
pub struct Registry {
    graph: Graph,
    requirements: [Fields; Metric::COUNT],
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Build a registry from the standard graph.
    pub fn new() -> Self {
        Self::from_graph(Graph::standard())
    }

    /// Build a registry, deriving requirements from `graph`.
    pub fn from_graph(graph: Graph) -> Self {
        let requirements =
            Metric::ALL.map(|metric| graph.requirements(metric).into_iter().collect::<Fields>());
        Self {
            graph,
            requirements,
        }
    }

    /// The process-wide standard registry.
    pub fn standard() -> &'static Registry {
        STANDARD.get_or_init(Registry::new)
    }

    /// The dependency graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Ordered metrics of a group.
    pub fn group(&self, group: MetricGroup) -> &'static [Metric] {
        group.metrics()
    }

    /// Ordered metrics of a group, by name.
    pub fn group_by_name(&self, name: &str) -> Result<&'static [Metric]> {
        Ok(self.group(name.parse()?))
    }

    /// Judgment fields required to score `metric`.
    pub fn requirements(&self, metric: Metric) -> &[JudgmentField] {
        &self.requirements[metric.index()]
    }

    /// Union of the required fields of `metrics`, in first-seen order.
    pub fn required_fields(&self, metrics: &[Metric]) -> Vec<JudgmentField> {
        let mut fields = Vec::new();
        for &metric in metrics {
            for &field in self.requirements(metric) {
                if !fields.contains(&field) {
                    fields.push(field);
                }
            }
        }
        fields
    }

    /// Required fields of `metrics` that `judgments` lacks.
    pub fn missing_fields(&self, judgments: &Judgments, metrics: &[Metric]) -> Vec<JudgmentField> {
        self.required_fields(metrics)
            .into_iter()
            .filter(|field| !judgments.has(*field))
            .collect()
    }

    /// Expand a mix of group and metric names into a de-duplicated metric
    /// list, keeping first-mention order.
    pub fn parse_selection<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<Metric>> {
        let mut metrics = Vec::new();
        for name in names {
            let name = name.as_ref().trim();
            match name.parse::<MetricGroup>() {
                Ok(group) => {
                    for &metric in self.group(group) {
                        push_unique(&mut metrics, metric);
                    }
                }
                Err(_) => push_unique(&mut metrics, name.parse()?),
            }
        }
        Ok(metrics)
    }

    /// Topological evaluation order for `metrics`.
    pub fn plan(&self, metrics: &[Metric]) -> Vec<Metric> {
        self.graph.plan(metrics)
    }
}

fn push_unique(metrics: &mut Vec<Metric>, metric: Metric) {
    if !metrics.contains(&metric) {
        metrics.push(metric);
    }
}
