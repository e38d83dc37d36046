// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Metric identifiers and the reporting taxonomy
//!
//! The suite is closed: eleven metrics, grouped into `overall`,
//! `retriever` and `generator`, with `all` as their ordered concatenation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A metric in the suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Fraction of response claims entailed by the reference answer
    Precision,
    /// Fraction of answer claims entailed by the response
    Recall,
    /// Harmonic mean of precision and recall
    F1,
    /// Fraction of answer claims entailed by at least one retrieved chunk
    ClaimRecall,
    /// Fraction of retrieved chunks entailing at least one answer claim
    ContextPrecision,
    /// Share of retrieved answer claims that the response also covers
    ContextUtilization,
    /// Incorrect response claims supported by relevant chunks
    NoiseSensitivityInRelevant,
    /// Incorrect response claims supported only by irrelevant chunks
    NoiseSensitivityInIrrelevant,
    /// Incorrect response claims unsupported by any chunk
    Hallucination,
    /// Correct response claims unsupported by any chunk
    SelfKnowledge,
    /// Response claims supported by at least one chunk
    Faithfulness,
}

impl Metric {
    /// Number of metrics in the suite.
    pub const COUNT: usize = 11;

    /// Every metric, in `all` group order.
    pub const ALL: [Metric; Metric::COUNT] = [
        Metric::Precision,
        Metric::Recall,
        Metric::F1,
        Metric::ClaimRecall,
        Metric::ContextPrecision,
        Metric::ContextUtilization,
        Metric::NoiseSensitivityInRelevant,
        Metric::NoiseSensitivityInIrrelevant,
        Metric::Hallucination,
        Metric::SelfKnowledge,
        Metric::Faithfulness,
    ];

    /// Stable snake_case name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Metric::Precision => "precision",
            Metric::Recall => "recall",
            Metric::F1 => "f1",
            Metric::ClaimRecall => "claim_recall",
            Metric::ContextPrecision => "context_precision",
            Metric::ContextUtilization => "context_utilization",
            Metric::NoiseSensitivityInRelevant => "noise_sensitivity_in_relevant",
            Metric::NoiseSensitivityInIrrelevant => "noise_sensitivity_in_irrelevant",
            Metric::Hallucination => "hallucination",
            Metric::SelfKnowledge => "self_knowledge",
            Metric::Faithfulness => "faithfulness",
        }
    }

    /// Dense index into per-metric tables.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The reporting group this metric belongs to (never `All`).
    pub const fn group(self) -> MetricGroup {
        match self {
            Metric::Precision | Metric::Recall | Metric::F1 => MetricGroup::Overall,
            Metric::ClaimRecall | Metric::ContextPrecision => MetricGroup::Retriever,
            _ => MetricGroup::Generator,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Metric::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| Error::UnknownMetric(s.to_string()))
    }
}

/// A reporting group of metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricGroup {
    /// End-to-end answer quality
    Overall,
    /// Quality of the retrieved context
    Retriever,
    /// How the generator used the retrieved context
    Generator,
    /// The whole suite
    All,
}

const OVERALL: &[Metric] = &[Metric::Precision, Metric::Recall, Metric::F1];
const RETRIEVER: &[Metric] = &[Metric::ClaimRecall, Metric::ContextPrecision];
const GENERATOR: &[Metric] = &[
    Metric::ContextUtilization,
    Metric::NoiseSensitivityInRelevant,
    Metric::NoiseSensitivityInIrrelevant,
    Metric::Hallucination,
    Metric::SelfKnowledge,
    Metric::Faithfulness,
];

impl MetricGroup {
    /// Every group, in display order.
    pub const ALL: [MetricGroup; 4] = [
        MetricGroup::Overall,
        MetricGroup::Retriever,
        MetricGroup::Generator,
        MetricGroup::All,
    ];

    /// Stable snake_case name.
    pub const fn as_str(self) -> &'static str {
        match self {
            MetricGroup::Overall => "overall",
            MetricGroup::Retriever => "retriever",
            MetricGroup::Generator => "generator",
            MetricGroup::All => "all",
        }
    }

    /// Ordered metrics in this group.
    pub fn metrics(self) -> &'static [Metric] {
        match self {
            MetricGroup::Overall => OVERALL,
            MetricGroup::Retriever => RETRIEVER,
            MetricGroup::Generator => GENERATOR,
            MetricGroup::All => &Metric::ALL,
        }
    }

    /// Whether `metric` belongs to this group.
    pub fn contains(self, metric: Metric) -> bool {
        self == MetricGroup::All || metric.group() == self
    }
}

impl fmt::Display for MetricGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricGroup {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        MetricGroup::ALL
            .iter()
            .copied()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| Error::UnknownGroup(s.to_string()))
    }
}
