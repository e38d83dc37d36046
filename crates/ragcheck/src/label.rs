// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Entailment labels and their coercion to booleans
//!
//! The entailment checker speaks in labels (`"Entailment"`, `"Neutral"`,
//! `"Contradiction"`, ...). [`Vocabulary`] is the only place that knows
//! which label means "entailed"; everything downstream of it works on
//! plain booleans and [`BoolMatrix`].

use crate::error::{Error, Result};
use crate::matrix::BoolMatrix;
use crate::record::JudgmentField;
use serde::{Deserialize, Serialize};

/// Label the checker emits for an entailed pair.
pub const DEFAULT_ENTAILMENT_LABEL: &str = "Entailment";

/// A raw judgment as produced by the entailment checker.
///
/// Either a single label, a pre-resolved boolean, or an arbitrarily
/// nested sequence of those.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Judgment {
    /// Already-resolved boolean
    Flag(bool),
    /// Checker label
    Label(String),
    /// Nested sequence
    Nested(Vec<Judgment>),
}

impl Judgment {
    /// Create a label judgment.
    pub fn label(label: impl Into<String>) -> Self {
        Self::Label(label.into())
    }

    /// Build a sequence from anything convertible to judgments.
    pub fn seq<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Judgment>,
    {
        Self::Nested(items.into_iter().map(Into::into).collect())
    }

    /// Number of elements at the top level (1 for a scalar).
    pub fn len(&self) -> usize {
        match self {
            Self::Nested(items) => items.len(),
            _ => 1,
        }
    }

    /// True for an empty sequence.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Nested(items) if items.is_empty())
    }
}

impl From<bool> for Judgment {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<&str> for Judgment {
    fn from(value: &str) -> Self {
        Self::Label(value.to_string())
    }
}

impl From<String> for Judgment {
    fn from(value: String) -> Self {
        Self::Label(value)
    }
}

impl<T: Into<Judgment>> From<Vec<T>> for Judgment {
    fn from(items: Vec<T>) -> Self {
        Self::seq(items)
    }
}

/// A coerced judgment, same nesting as the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Truth {
    /// A single entailment outcome
    Scalar(bool),
    /// Nested outcomes
    Seq(Vec<Truth>),
}

/// How a checker lays out chunk-by-claim matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatrixLayout {
    /// One row per retrieved chunk, one column per claim
    #[default]
    ChunkMajor,
    /// One row per claim, one column per retrieved chunk
    ClaimMajor,
}

/// Maps checker labels onto booleans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    entailment: String,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_ENTAILMENT_LABEL)
    }
}

impl Vocabulary {
    /// Create a vocabulary whose entailment token is `entailment`.
    pub fn new(entailment: impl Into<String>) -> Self {
        Self {
            entailment: entailment.into(),
        }
    }

    /// The entailment token.
    pub fn entailment(&self) -> &str {
        &self.entailment
    }

    /// Whether `label` is the entailment token. Matching is exact.
    #[inline]
    pub fn is_entailment(&self, label: &str) -> bool {
        label == self.entailment
    }

    /// Coerce a judgment, preserving its nesting and order.
    pub fn coerce(&self, judgment: &Judgment) -> Truth {
        match judgment {
            Judgment::Flag(b) => Truth::Scalar(*b),
            Judgment::Label(label) => Truth::Scalar(self.is_entailment(label)),
            Judgment::Nested(items) => Truth::Seq(items.iter().map(|j| self.coerce(j)).collect()),
        }
    }

    fn scalar(&self, judgment: &Judgment) -> Option<bool> {
        match judgment {
            Judgment::Flag(b) => Some(*b),
            Judgment::Label(label) => Some(self.is_entailment(label)),
            Judgment::Nested(_) => None,
        }
    }

    /// Coerce a one-dimensional judgment field.
    pub fn vector(&self, field: JudgmentField, judgment: &Judgment) -> Result<Vec<bool>> {
        let Judgment::Nested(items) = judgment else {
            return Err(Error::shape(format!("{field} must be a sequence of labels")));
        };
        items
            .iter()
            .map(|item| {
                self.scalar(item).ok_or_else(|| {
                    Error::shape(format!("{field} must be one-dimensional, found nested entries"))
                })
            })
            .collect()
    }

    /// Coerce a two-dimensional judgment field into a chunk-major matrix.
    pub fn matrix(
        &self,
        field: JudgmentField,
        judgment: &Judgment,
        layout: MatrixLayout,
    ) -> Result<BoolMatrix> {
        let Judgment::Nested(rows) = judgment else {
            return Err(Error::shape(format!("{field} must be a matrix of labels")));
        };
        let rows = rows
            .iter()
            .map(|row| self.vector(field, row))
            .collect::<Result<Vec<_>>>()?;
        let matrix = BoolMatrix::from_rows(rows.as_slice())
            .ok_or_else(|| Error::shape(format!("{field} has rows of differing length")))?;
        Ok(match layout {
            MatrixLayout::ChunkMajor => matrix,
            MatrixLayout::ClaimMajor => matrix.transpose(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_preserves_structure() {
        let vocab = Vocabulary::default();
        let judgment = Judgment::seq(vec![
            Judgment::seq(vec!["Entailment", "Neutral"]),
            Judgment::seq(vec!["Contradiction", "Entailment"]),
        ]);
        assert_eq!(
            vocab.coerce(&judgment),
            Truth::Seq(vec![
                Truth::Seq(vec![Truth::Scalar(true), Truth::Scalar(false)]),
                Truth::Seq(vec![Truth::Scalar(false), Truth::Scalar(true)]),
            ])
        );
        assert_eq!(vocab.coerce(&"Entailment".into()), Truth::Scalar(true));
        assert_eq!(vocab.coerce(&"entailment".into()), Truth::Scalar(false));
    }

    #[test]
    fn test_custom_token() {
        let vocab = Vocabulary::new("supported");
        let v = vocab
            .vector(
                JudgmentField::Answer2Response,
                &Judgment::seq(vec!["supported", "Entailment"]),
            )
            .unwrap();
        assert_eq!(v, vec![true, false]);
    }

    #[test]
    fn test_vector_accepts_flags() {
        let vocab = Vocabulary::default();
        let judgment = Judgment::seq(vec![Judgment::Flag(true), "Neutral".into()]);
        let v = vocab
            .vector(JudgmentField::Response2Answer, &judgment)
            .unwrap();
        assert_eq!(v, vec![true, false]);
    }

    #[test]
    fn test_vector_rejects_wrong_depth() {
        let vocab = Vocabulary::default();
        let scalar = Judgment::label("Entailment");
        assert!(vocab
            .vector(JudgmentField::Answer2Response, &scalar)
            .unwrap_err()
            .is_shape_mismatch());

        let nested = Judgment::seq(vec![Judgment::seq(vec!["Entailment"])]);
        assert!(vocab
            .vector(JudgmentField::Answer2Response, &nested)
            .unwrap_err()
            .is_shape_mismatch());
    }

    #[test]
    fn test_matrix_layouts() {
        let vocab = Vocabulary::default();
        // 2 rows x 3 columns as written
        let judgment = Judgment::seq(vec![
            Judgment::seq(vec!["Entailment", "Neutral", "Neutral"]),
            Judgment::seq(vec!["Neutral", "Neutral", "Entailment"]),
        ]);

        let chunk_major = vocab
            .matrix(
                JudgmentField::Retrieved2Answer,
                &judgment,
                MatrixLayout::ChunkMajor,
            )
            .unwrap();
        assert_eq!((chunk_major.rows(), chunk_major.cols()), (2, 3));

        let claim_major = vocab
            .matrix(
                JudgmentField::Retrieved2Answer,
                &judgment,
                MatrixLayout::ClaimMajor,
            )
            .unwrap();
        assert_eq!((claim_major.rows(), claim_major.cols()), (3, 2));
        assert!(claim_major.get(2, 1));
    }

    #[test]
    fn test_matrix_rejects_ragged() {
        let vocab = Vocabulary::default();
        let judgment = Judgment::seq(vec![
            Judgment::seq(vec!["Entailment", "Neutral"]),
            Judgment::seq(vec!["Neutral"]),
        ]);
        let err = vocab
            .matrix(
                JudgmentField::Retrieved2Response,
                &judgment,
                MatrixLayout::ChunkMajor,
            )
            .unwrap_err();
        assert!(err.is_shape_mismatch());
        assert!(err.to_string().contains("retrieved2response"));
    }

    #[test]
    fn test_empty_matrix() {
        let vocab = Vocabulary::default();
        let matrix = vocab
            .matrix(
                JudgmentField::Retrieved2Answer,
                &Judgment::Nested(vec![]),
                MatrixLayout::ChunkMajor,
            )
            .unwrap();
        assert!(matrix.is_empty());
    }

    #[test]
    fn test_judgment_serde_untagged() {
        let judgment: Judgment =
            serde_json::from_str(r#"[["Entailment", "Neutral"], [true, false]]"#).unwrap();
        assert_eq!(judgment.len(), 2);
        let vocab = Vocabulary::default();
        let matrix = vocab
            .matrix(
                JudgmentField::Retrieved2Answer,
                &judgment,
                MatrixLayout::ChunkMajor,
            )
            .unwrap();
        assert!(matrix.get(0, 0) && matrix.get(1, 0));
        assert!(!matrix.get(0, 1) && !matrix.get(1, 1));

        let json = serde_json::to_string(&Judgment::seq(vec!["Entailment"])).unwrap();
        assert_eq!(json, r#"["Entailment"]"#);
    }
}
