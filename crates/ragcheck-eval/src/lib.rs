// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Batch evaluation for ragcheck

#![allow(clippy::needless_lifetimes)]
//!
//! Scores many records with one engine, sequentially or with Rayon
//! parallelism, and averages each metric over the batch.

pub mod error;
pub mod evaluator;
pub mod parallel;
pub mod summary;

pub use error::{EvalError, Result};
pub use evaluator::{EvaluationResult, Evaluator};
pub use parallel::ParallelEvaluator;
pub use summary::Summary;
