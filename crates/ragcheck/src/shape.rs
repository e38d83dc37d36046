// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Cross-field dimension checks
//!
//! The kernels tolerate inconsistent dimensions (element-wise operations
//! truncate to the shorter operand). [`validate_shapes`] is the opt-in
//! check that rejects such records instead.

use crate::error::{Error, Result};
use crate::label::{MatrixLayout, Vocabulary};
use crate::matrix::BoolMatrix;
use crate::record::{JudgmentField, Judgments};

/// Dimensions a matrix field actually expresses.
///
/// A matrix with no outer entries cannot say how long its inner entries
/// would have been, so that dimension is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Dims {
    chunks: Option<usize>,
    claims: Option<usize>,
}

impl Dims {
    fn of(matrix: &BoolMatrix, layout: MatrixLayout) -> Self {
        let (chunks, claims) = (matrix.rows(), matrix.cols());
        match layout {
            MatrixLayout::ChunkMajor => Self {
                chunks: Some(chunks),
                claims: (chunks > 0).then_some(claims),
            },
            MatrixLayout::ClaimMajor => Self {
                chunks: (claims > 0).then_some(chunks),
                claims: Some(claims),
            },
        }
    }
}

/// Check that the present judgment fields agree on chunk and claim counts.
///
/// - `retrieved2answer` and `retrieved2response` have the same chunk count
/// - `retrieved2answer` has one column per `response2answer` entry
/// - `retrieved2response` has one column per `answer2response` entry
///
/// Absent fields are skipped. Fields that cannot be coerced at all fail
/// with the coercion error.
pub fn validate_shapes(
    judgments: &Judgments,
    vocabulary: &Vocabulary,
    layout: MatrixLayout,
) -> Result<()> {
    use JudgmentField::*;

    let dims = |field: JudgmentField| -> Result<Option<Dims>> {
        judgments
            .get(field)
            .map(|j| vocabulary.matrix(field, j, layout).map(|m| Dims::of(&m, layout)))
            .transpose()
    };
    let len = |field: JudgmentField| -> Result<Option<usize>> {
        judgments
            .get(field)
            .map(|j| vocabulary.vector(field, j).map(|v| v.len()))
            .transpose()
    };

    let r2a = dims(Retrieved2Answer)?;
    let r2resp = dims(Retrieved2Response)?;
    let a2r = len(Answer2Response)?;
    let resp2a = len(Response2Answer)?;

    check(
        (Retrieved2Answer, "chunks", r2a.and_then(|d| d.chunks)),
        (Retrieved2Response, "chunks", r2resp.and_then(|d| d.chunks)),
    )?;
    check(
        (Retrieved2Answer, "claims", r2a.and_then(|d| d.claims)),
        (Response2Answer, "entries", resp2a),
    )?;
    check(
        (Retrieved2Response, "claims", r2resp.and_then(|d| d.claims)),
        (Answer2Response, "entries", a2r),
    )
}

fn check(
    (left, left_dim, left_len): (JudgmentField, &str, Option<usize>),
    (right, right_dim, right_len): (JudgmentField, &str, Option<usize>),
) -> Result<()> {
    match (left_len, right_len) {
        (Some(l), Some(r)) if l != r => Err(Error::shape(format!(
            "{left} has {l} {left_dim} but {right} has {r} {right_dim}"
        ))),
        _ => Ok(()),
    }
}
