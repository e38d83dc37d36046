// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Metric dependency graph
//!
//! Each metric is a [`Node`] with:
//! - a [`Kernel`] that computes it (possibly together with sibling metrics)
//! - a list of prerequisite metrics that must be scored first
//!
//! The graph is a DAG. [`Graph::plan`] orders any subset of metrics so
//! that prerequisites come first; the engine resolves nodes lazily and
//! memoizes through the record's scores.

use crate::metric::Metric;
use crate::record::JudgmentField;

/// A unit of computation producing one or more metrics.
///
/// Metrics sharing a kernel share its intermediate reductions: running the
/// kernel once scores all of its outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kernel {
    /// Mean of `answer2response`
    Precision,
    /// Mean of `response2answer`
    Recall,
    /// Harmonic mean of the precision and recall scores
    F1,
    /// Claim recall and context precision from `retrieved2answer`
    Retrieval,
    /// Recalled answer claims covered by the response
    ContextUtilization,
    /// Noise sensitivity split by chunk relevance
    NoiseSensitivity,
    /// Hallucination and self-knowledge
    Unfaithfulness,
    /// Response claims supported by any chunk
    Faithfulness,
}

impl Kernel {
    /// Metrics this kernel writes.
    pub const fn outputs(self) -> &'static [Metric] {
        match self {
            Kernel::Precision => &[Metric::Precision],
            Kernel::Recall => &[Metric::Recall],
            Kernel::F1 => &[Metric::F1],
            Kernel::Retrieval => &[Metric::ClaimRecall, Metric::ContextPrecision],
            Kernel::ContextUtilization => &[Metric::ContextUtilization],
            Kernel::NoiseSensitivity => &[
                Metric::NoiseSensitivityInRelevant,
                Metric::NoiseSensitivityInIrrelevant,
            ],
            Kernel::Unfaithfulness => &[Metric::Hallucination, Metric::SelfKnowledge],
            Kernel::Faithfulness => &[Metric::Faithfulness],
        }
    }

    /// Judgment fields this kernel reads directly, in read order.
    pub const fn inputs(self) -> &'static [JudgmentField] {
        use JudgmentField::*;
        match self {
            Kernel::Precision => &[Answer2Response],
            Kernel::Recall => &[Response2Answer],
            Kernel::F1 => &[],
            Kernel::Retrieval => &[Retrieved2Answer],
            Kernel::ContextUtilization => &[Retrieved2Answer, Response2Answer],
            Kernel::NoiseSensitivity => &[Retrieved2Response, Answer2Response, Retrieved2Answer],
            Kernel::Unfaithfulness => &[Retrieved2Response, Answer2Response],
            Kernel::Faithfulness => &[Retrieved2Response],
        }
    }

    /// Name used in tracing spans.
    pub const fn name(self) -> &'static str {
        match self {
            Kernel::Precision => "precision",
            Kernel::Recall => "recall",
            Kernel::F1 => "f1",
            Kernel::Retrieval => "retrieval",
            Kernel::ContextUtilization => "context_utilization",
            Kernel::NoiseSensitivity => "noise_sensitivity",
            Kernel::Unfaithfulness => "unfaithfulness",
            Kernel::Faithfulness => "faithfulness",
        }
    }
}

/// A metric node of the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    /// The metric this node scores
    pub metric: Metric,
    /// Kernel computing it
    pub kernel: Kernel,
    /// Metrics scored before the kernel runs
    pub prerequisites: &'static [Metric],
}

impl Node {
    const fn new(metric: Metric, kernel: Kernel) -> Self {
        Self {
            metric,
            kernel,
            prerequisites: &[],
        }
    }

    const fn after(mut self, prerequisites: &'static [Metric]) -> Self {
        self.prerequisites = prerequisites;
        self
    }
}

/// Nodes indexed by [`Metric::index`].
const NODES: [Node; Metric::COUNT] = [
    Node::new(Metric::Precision, Kernel::Precision),
    Node::new(Metric::Recall, Kernel::Recall),
    Node::new(Metric::F1, Kernel::F1).after(&[Metric::Precision, Metric::Recall]),
    Node::new(Metric::ClaimRecall, Kernel::Retrieval),
    Node::new(Metric::ContextPrecision, Kernel::Retrieval),
    Node::new(Metric::ContextUtilization, Kernel::ContextUtilization),
    Node::new(Metric::NoiseSensitivityInRelevant, Kernel::NoiseSensitivity),
    Node::new(Metric::NoiseSensitivityInIrrelevant, Kernel::NoiseSensitivity),
    Node::new(Metric::Hallucination, Kernel::Unfaithfulness),
    Node::new(Metric::SelfKnowledge, Kernel::Unfaithfulness),
    Node::new(Metric::Faithfulness, Kernel::Faithfulness),
];

/// The metric dependency graph.
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: [Node; Metric::COUNT],
}

impl Default for Graph {
    fn default() -> Self {
        Self::standard()
    }
}

impl Graph {
    /// The graph of the standard metric suite.
    pub fn standard() -> Self {
        Self { nodes: NODES }
    }

    /// Node for `metric`.
    #[inline]
    pub fn node(&self, metric: Metric) -> &Node {
        &self.nodes[metric.index()]
    }

    /// All nodes, in [`Metric::ALL`] order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Order `metrics` and their transitive prerequisites so every node
    /// follows its prerequisites. Each metric appears once; requested
    /// order is kept wherever dependencies allow.
    pub fn plan(&self, metrics: &[Metric]) -> Vec<Metric> {
        let mut seen = [false; Metric::COUNT];
        let mut order = Vec::with_capacity(Metric::COUNT);
        for &metric in metrics {
            self.visit(metric, &mut seen, &mut order);
        }
        order
    }

    fn visit(&self, metric: Metric, seen: &mut [bool; Metric::COUNT], order: &mut Vec<Metric>) {
        if seen[metric.index()] {
            return;
        }
        seen[metric.index()] = true;
        for &prerequisite in self.node(metric).prerequisites {
            self.visit(prerequisite, seen, order);
        }
        order.push(metric);
    }

    /// Fields needed to score `metric`: the union of the inputs of its own
    /// kernel and of every prerequisite's kernel, in first-read order.
    pub fn requirements(&self, metric: Metric) -> Vec<JudgmentField> {
        let mut fields = Vec::new();
        for step in self.plan(&[metric]) {
            for &field in self.node(step).kernel.inputs() {
                if !fields.contains(&field) {
                    fields.push(field);
                }
            }
        }
        fields
    }
}
