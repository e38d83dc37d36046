// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! # ragcheck
//!
//! Claim-level evaluation metrics for retrieval-augmented generation.
//!
//! Given entailment judgments between a response, a reference answer and
//! the retrieved chunks, the engine computes a fixed suite of eleven
//! metrics grouped as `overall`, `retriever` and `generator`.
//!
//! ## Core Concepts
//!
//! - **Judgments**: four optional fields per record, labels or booleans,
//!   one- or two-dimensional
//! - **Vocabulary**: the only place that knows which label means entailed
//! - **Registry**: which fields each metric needs, and the metric groups
//! - **Graph**: metric prerequisites and the kernels shared between metrics
//! - **Engine**: memoized resolution; a score once written is never replaced
//!
//! ## Example
//!
//! ```
//! use ragcheck::{Engine, EvalRecord, JudgmentField, Metric};
//!
//! let engine = Engine::default();
//! let mut record = EvalRecord::new()
//!     .with_judgment(JudgmentField::Answer2Response, vec!["Entailment", "Entailment", "Neutral"])
//!     .with_judgment(JudgmentField::Response2Answer, vec!["Entailment", "Contradiction"]);
//!
//! engine.evaluate(&mut record, &[Metric::F1]).unwrap();
//! let f1 = record.score(Metric::F1).unwrap();
//! assert!((f1 - 4.0 / 7.0).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod engine;
pub mod error;
pub mod evaluators;
pub mod graph;
pub mod io;
pub mod kernels;
pub mod label;
pub mod matrix;
pub mod metric;
pub mod record;
pub mod registry;
pub mod shape;

pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{Error, Result};
pub use evaluators::{evaluator, evaluator_by_name, EvaluatorFn};
pub use graph::{Graph, Kernel, Node};
pub use label::{Judgment, MatrixLayout, Truth, Vocabulary, DEFAULT_ENTAILMENT_LABEL};
pub use matrix::BoolMatrix;
pub use metric::{Metric, MetricGroup};
pub use record::{EvalRecord, JudgmentField, Judgments, Scores};
pub use registry::Registry;
pub use shape::validate_shapes;
