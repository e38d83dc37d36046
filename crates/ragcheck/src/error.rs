// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Error types for ragcheck

use crate::metric::Metric;
use crate::record::JudgmentField;
use thiserror::Error;

/// Result type alias for ragcheck operations
pub type Result<T> = core::result::Result<T, Error>;

/// Main error type for the metric engine
#[derive(Error, Debug)]
pub enum Error {
    /// A judgment field needed by a metric is absent from the record.
    ///
    /// The caller is expected to consult the requirement registry and run
    /// the entailment checker for every required field before evaluating.
    #[error("Missing dependency: {metric} requires {field}")]
    MissingDependency {
        /// The metric being evaluated
        metric: Metric,
        /// The absent judgment field
        field: JudgmentField,
    },

    /// A judgment cannot be read as the vector or matrix its field demands,
    /// or strict validation found inconsistent dimensions across fields.
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Metric name not in the suite
    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    /// Group name not in the taxonomy
    #[error("Unknown metric group: {0}")]
    UnknownGroup(String),

    /// Judgment field name not recognised
    #[error("Unknown judgment field: {0}")]
    UnknownField(String),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// A single line of a JSONL record file failed to parse
    #[error("Record error on line {line}: {source}")]
    Record {
        /// 1-based line number
        line: usize,
        /// Underlying parse failure
        #[source]
        source: serde_json::Error,
    },

    /// JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a missing dependency error
    pub fn missing(metric: Metric, field: JudgmentField) -> Self {
        Self::MissingDependency { metric, field }
    }

    /// Create a shape mismatch error
    pub fn shape(msg: impl Into<String>) -> Self {
        Self::ShapeMismatch(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Check if this is a missing dependency error
    pub fn is_missing_dependency(&self) -> bool {
        matches!(self, Self::MissingDependency { .. })
    }

    /// Check if this is a shape mismatch error
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(self, Self::ShapeMismatch(_))
    }

    /// Get the absent field, if this is a missing dependency error.
    pub fn missing_field(&self) -> Option<JudgmentField> {
        match self {
            Self::MissingDependency { field, .. } => Some(*field),
            _ => None,
        }
    }
}
