// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Metric kernels over coerced judgments
//!
//! Pure functions: booleans in, scores in [0, 1] out. Matrices are
//! chunk-major (rows = retrieved chunks, columns = claims). Every kernel
//! maps empty claim or chunk sets to 0 rather than NaN.

use crate::matrix::{self, BoolMatrix};

/// Mean of `answer2response`.
pub fn precision(answer2response: &[bool]) -> f64 {
    matrix::mean(answer2response)
}

/// Mean of `response2answer`.
pub fn recall(response2answer: &[bool]) -> f64 {
    matrix::mean(response2answer)
}

/// Harmonic mean; 0 unless both inputs are strictly positive.
pub fn f1(precision: f64, recall: f64) -> f64 {
    if precision > 0.0 && recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    }
}

/// Scores of the retrieval kernel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RetrievalScores {
    /// Fraction of answer claims entailed by some chunk
    pub claim_recall: f64,
    /// Fraction of chunks entailing some answer claim
    pub context_precision: f64,
}

/// Claim recall and context precision from `retrieved2answer`.
pub fn retrieval(retrieved2answer: &BoolMatrix) -> RetrievalScores {
    if retrieved2answer.is_empty() {
        return RetrievalScores::default();
    }
    RetrievalScores {
        claim_recall: matrix::mean(&retrieved2answer.any_per_col()),
        context_precision: matrix::mean(&retrieved2answer.any_per_row()),
    }
}

/// Among answer claims recalled by retrieval, the share the response
/// also entails.
pub fn context_utilization(retrieved2answer: &BoolMatrix, response2answer: &[bool]) -> f64 {
    if retrieved2answer.is_empty() {
        return 0.0;
    }
    let claim_recalled = retrieved2answer.any_per_col();
    let recalled = matrix::count(&claim_recalled);
    if recalled == 0 {
        return 0.0;
    }
    let claim_used = matrix::and(&claim_recalled, response2answer);
    matrix::count(&claim_used) as f64 / recalled as f64
}

/// Which response claims are supported by relevant and by irrelevant
/// chunks. The two sets are disjoint: a claim supported by both kinds is
/// attributed to the relevant side only.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NoiseAttribution {
    /// Per response claim: entailed by at least one relevant chunk
    pub relevant_faithful: Vec<bool>,
    /// Per response claim: entailed by an irrelevant chunk and by no
    /// relevant one
    pub irrelevant_faithful: Vec<bool>,
}

/// Attribute response claims to relevant or irrelevant chunks.
///
/// A chunk is relevant when it entails at least one answer claim.
pub fn noise_attribution(
    retrieved2response: &BoolMatrix,
    retrieved2answer: &BoolMatrix,
) -> NoiseAttribution {
    let relevant_retrieved = retrieved2answer.any_per_row();
    let irrelevant_retrieved = matrix::not(&relevant_retrieved);

    let relevant_faithful = retrieved2response.any_per_col_where(&relevant_retrieved);
    let irrelevant_faithful = matrix::and_not(
        &retrieved2response.any_per_col_where(&irrelevant_retrieved),
        &relevant_faithful,
    );

    NoiseAttribution {
        relevant_faithful,
        irrelevant_faithful,
    }
}

/// Scores of the noise-sensitivity kernel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NoiseSensitivity {
    /// Incorrect response claims supported by relevant chunks
    pub in_relevant: f64,
    /// Incorrect response claims supported only by irrelevant chunks
    pub in_irrelevant: f64,
}

/// Noise sensitivity split by chunk relevance.
pub fn noise_sensitivity(
    retrieved2response: &BoolMatrix,
    answer2response: &[bool],
    retrieved2answer: &BoolMatrix,
) -> NoiseSensitivity {
    if answer2response.is_empty() || retrieved2response.is_empty() || retrieved2answer.is_empty()
    {
        return NoiseSensitivity::default();
    }
    let attribution = noise_attribution(retrieved2response, retrieved2answer);
    let incorrect = matrix::not(answer2response);
    NoiseSensitivity {
        in_relevant: matrix::mean(&matrix::and(&attribution.relevant_faithful, &incorrect)),
        in_irrelevant: matrix::mean(&matrix::and(&attribution.irrelevant_faithful, &incorrect)),
    }
}

/// Scores of the unfaithfulness kernel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Unfaithfulness {
    /// Unsupported and incorrect response claims
    pub hallucination: f64,
    /// Unsupported but correct response claims
    pub self_knowledge: f64,
}

/// Split unsupported response claims by correctness.
pub fn unfaithfulness(retrieved2response: &BoolMatrix, answer2response: &[bool]) -> Unfaithfulness {
    if answer2response.is_empty() || retrieved2response.is_empty() {
        return Unfaithfulness::default();
    }
    let unfaithful = matrix::not(&retrieved2response.any_per_col());
    Unfaithfulness {
        hallucination: matrix::mean(&matrix::and_not(&unfaithful, answer2response)),
        self_knowledge: matrix::mean(&matrix::and(&unfaithful, answer2response)),
    }
}

/// Fraction of response claims entailed by at least one chunk.
pub fn faithfulness(retrieved2response: &BoolMatrix) -> f64 {
    if retrieved2response.is_empty() {
        return 0.0;
    }
    matrix::mean(&retrieved2response.any_per_col())
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: bool = true;
    const F: bool = false;

    fn m(rows: &[&[bool]]) -> BoolMatrix {
        BoolMatrix::from_rows(rows).unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-10
    }

    #[test]
    fn test_precision_recall_f1() {
        let p = precision(&[T, T, F]);
        let r = recall(&[T, F]);
        assert!(approx(p, 2.0 / 3.0));
        assert!(approx(r, 0.5));
        assert!(approx(f1(p, r), 4.0 / 7.0));
        assert_eq!(precision(&[]), 0.0);
        assert_eq!(f1(0.0, 1.0), 0.0);
        assert_eq!(f1(1.0, 0.0), 0.0);
    }

    #[test]
    fn test_retrieval_diagonal() {
        let scores = retrieval(&m(&[&[T, F], &[F, T]]));
        assert_eq!(scores.claim_recall, 1.0);
        assert_eq!(scores.context_precision, 1.0);
    }

    #[test]
    fn test_retrieval_partial() {
        // chunk 0 supports claim 0; chunk 1 supports nothing; claim 1 and 2 unsupported
        let scores = retrieval(&m(&[&[T, F, F], &[F, F, F]]));
        assert!(approx(scores.claim_recall, 1.0 / 3.0));
        assert!(approx(scores.context_precision, 0.5));
    }

    #[test]
    fn test_retrieval_empty() {
        let none: &[&[bool]] = &[];
        assert_eq!(retrieval(&m(none)), RetrievalScores::default());
        assert_eq!(retrieval(&m(&[&[], &[]])), RetrievalScores::default());
    }

    #[test]
    fn test_context_utilization() {
        // claims 0 and 2 recalled; response covers claims 0 and 1
        let r2a = m(&[&[T, F, F], &[F, F, T]]);
        assert!(approx(context_utilization(&r2a, &[T, T, F]), 0.5));
        // nothing recalled
        let none_recalled = m(&[&[F, F]]);
        assert_eq!(context_utilization(&none_recalled, &[T, T]), 0.0);
    }

    #[test]
    fn test_noise_attribution_is_exclusive() {
        // chunk 0 relevant, chunk 1 irrelevant
        let r2a = m(&[&[T], &[F]]);
        // claim 0: both chunks; claim 1: irrelevant only; claim 2: relevant only; claim 3: none
        let r2resp = m(&[&[T, F, T, F], &[T, T, F, F]]);
        let attribution = noise_attribution(&r2resp, &r2a);
        assert_eq!(attribution.relevant_faithful, vec![T, F, T, F]);
        assert_eq!(attribution.irrelevant_faithful, vec![F, T, F, F]);
    }

    #[test]
    fn test_noise_sensitivity() {
        let r2a = m(&[&[T], &[F]]);
        let r2resp = m(&[&[T, F, T, F], &[T, T, F, F]]);
        // claims 0 and 1 are incorrect
        let scores = noise_sensitivity(&r2resp, &[F, F, T, T], &r2a);
        assert!(approx(scores.in_relevant, 0.25));
        assert!(approx(scores.in_irrelevant, 0.25));
    }

    #[test]
    fn test_noise_sensitivity_degenerate() {
        let r2a = m(&[&[T]]);
        let r2resp = m(&[&[T]]);
        assert_eq!(
            noise_sensitivity(&r2resp, &[], &r2a),
            NoiseSensitivity::default()
        );
        assert_eq!(
            noise_sensitivity(&BoolMatrix::new(0, 1), &[F], &r2a),
            NoiseSensitivity::default()
        );
        assert_eq!(
            noise_sensitivity(&r2resp, &[F], &BoolMatrix::new(1, 0)),
            NoiseSensitivity::default()
        );
    }

    #[test]
    fn test_unfaithfulness_split() {
        let r2resp = m(&[&[F, F], &[T, F]]);
        let scores = unfaithfulness(&r2resp, &[T, F]);
        assert_eq!(scores.hallucination, 0.5);
        assert_eq!(scores.self_knowledge, 0.0);

        let scores = unfaithfulness(&r2resp, &[T, T]);
        assert_eq!(scores.hallucination, 0.0);
        assert_eq!(scores.self_knowledge, 0.5);
    }

    #[test]
    fn test_faithfulness() {
        assert_eq!(faithfulness(&m(&[&[F, F], &[T, F]])), 0.5);
        assert_eq!(faithfulness(&BoolMatrix::new(3, 0)), 0.0);
        assert_eq!(faithfulness(&BoolMatrix::new(0, 3)), 0.0);
    }
}
