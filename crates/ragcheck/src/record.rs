// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Per-example evaluation records
//!
//! An [`EvalRecord`] holds the four optional judgment fields produced by
//! the entailment checker and the [`Scores`] the engine appends to.

use crate::error::{Error, Result};
use crate::label::Judgment;
use crate::metric::Metric;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// One of the four judgment fields of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum JudgmentField {
    /// Reference answer → each response claim
    #[serde(rename = "answer2response")]
    Answer2Response,
    /// Response → each answer claim
    #[serde(rename = "response2answer")]
    Response2Answer,
    /// Each retrieved chunk → each answer claim
    #[serde(rename = "retrieved2answer")]
    Retrieved2Answer,
    /// Each retrieved chunk → each response claim
    #[serde(rename = "retrieved2response")]
    Retrieved2Response,
}

impl JudgmentField {
    /// Every field.
    pub const ALL: [JudgmentField; 4] = [
        JudgmentField::Answer2Response,
        JudgmentField::Response2Answer,
        JudgmentField::Retrieved2Answer,
        JudgmentField::Retrieved2Response,
    ];

    /// Stable field name.
    pub const fn as_str(self) -> &'static str {
        match self {
            JudgmentField::Answer2Response => "answer2response",
            JudgmentField::Response2Answer => "response2answer",
            JudgmentField::Retrieved2Answer => "retrieved2answer",
            JudgmentField::Retrieved2Response => "retrieved2response",
        }
    }

    /// Whether the field is a chunk-by-claim matrix.
    pub const fn is_matrix(self) -> bool {
        matches!(
            self,
            JudgmentField::Retrieved2Answer | JudgmentField::Retrieved2Response
        )
    }
}

impl fmt::Display for JudgmentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JudgmentField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        JudgmentField::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| Error::UnknownField(s.to_string()))
    }
}

/// The raw judgment fields of a record. Each is present only if the
/// checker produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Judgments {
    /// Reference answer → each response claim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer2response: Option<Judgment>,
    /// Response → each answer claim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response2answer: Option<Judgment>,
    /// Each retrieved chunk → each answer claim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retrieved2answer: Option<Judgment>,
    /// Each retrieved chunk → each response claim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retrieved2response: Option<Judgment>,
}

impl Judgments {
    /// Get a field.
    pub fn get(&self, field: JudgmentField) -> Option<&Judgment> {
        match field {
            JudgmentField::Answer2Response => self.answer2response.as_ref(),
            JudgmentField::Response2Answer => self.response2answer.as_ref(),
            JudgmentField::Retrieved2Answer => self.retrieved2answer.as_ref(),
            JudgmentField::Retrieved2Response => self.retrieved2response.as_ref(),
        }
    }

    /// Set a field.
    pub fn set(&mut self, field: JudgmentField, judgment: Judgment) {
        let slot = match field {
            JudgmentField::Answer2Response => &mut self.answer2response,
            JudgmentField::Response2Answer => &mut self.response2answer,
            JudgmentField::Retrieved2Answer => &mut self.retrieved2answer,
            JudgmentField::Retrieved2Response => &mut self.retrieved2response,
        };
        *slot = Some(judgment);
    }

    /// Whether a field is present.
    pub fn has(&self, field: JudgmentField) -> bool {
        self.get(field).is_some()
    }

    /// Fields that are present, in [`JudgmentField::ALL`] order.
    pub fn present(&self) -> impl Iterator<Item = JudgmentField> + '_ {
        JudgmentField::ALL.into_iter().filter(|f| self.has(*f))
    }
}

/// Metric scores of one record.
///
/// Keys keep insertion order and are write-once: a score that is already
/// present is never replaced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scores {
    entries: SmallVec<[(Metric, f64); Metric::COUNT]>,
}

impl Scores {
    /// Create an empty score mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Score for `metric`, if computed.
    pub fn get(&self, metric: Metric) -> Option<f64> {
        self.entries
            .iter()
            .find(|(m, _)| *m == metric)
            .map(|(_, v)| *v)
    }

    /// Whether `metric` has been computed.
    pub fn contains(&self, metric: Metric) -> bool {
        self.entries.iter().any(|(m, _)| *m == metric)
    }

    /// Insert a score unless one is already present.
    ///
    /// Returns `true` if the score was inserted.
    pub fn insert_if_absent(&mut self, metric: Metric, value: f64) -> bool {
        if self.contains(metric) {
            return false;
        }
        self.entries.push((metric, value));
        true
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of computed metrics.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been computed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Scores {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (metric, value) in &self.entries {
            map.serialize_entry(metric.as_str(), value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Scores {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        struct ScoresVisitor;

        impl<'de> Visitor<'de> for ScoresVisitor {
            type Value = Scores;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of metric names to scores")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> core::result::Result<Scores, A::Error> {
                let mut scores = Scores::new();
                while let Some((metric, value)) = access.next_entry::<Metric, f64>()? {
                    scores.insert_if_absent(metric, value);
                }
                Ok(scores)
            }
        }

        deserializer.deserialize_map(ScoresVisitor)
    }
}

/// Judgments and scores for one example.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvalRecord {
    /// Caller-assigned identifier
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "query_id")]
    pub id: Option<String>,

    /// Judgment fields
    #[serde(flatten)]
    pub judgments: Judgments,

    /// Computed scores
    #[serde(default)]
    pub metrics: Scores,
}

impl EvalRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set a judgment field.
    pub fn with_judgment(mut self, field: JudgmentField, judgment: impl Into<Judgment>) -> Self {
        self.judgments.set(field, judgment.into());
        self
    }

    /// Score for `metric`, if computed.
    pub fn score(&self, metric: Metric) -> Option<f64> {
        self.metrics.get(metric)
    }
}
