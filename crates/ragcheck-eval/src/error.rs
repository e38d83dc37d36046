// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Error types for batch evaluation

use thiserror::Error;

/// Result type alias for batch evaluation
pub type Result<T> = core::result::Result<T, EvalError>;

/// Batch evaluation errors
#[derive(Error, Debug)]
pub enum EvalError {
    /// A record failed to evaluate
    #[error("Record {index} failed: {source}")]
    Record {
        /// Position of the record in the batch
        index: usize,
        /// Engine error
        #[source]
        source: ragcheck::Error,
    },

    /// The thread pool could not be built
    #[error("Thread pool error: {0}")]
    Pool(String),
}

impl EvalError {
    /// Create a record error
    pub fn record(index: usize, source: ragcheck::Error) -> Self {
        Self::Record { index, source }
    }

    /// Index of the failing record, if any.
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Record { index, .. } => Some(*index),
            Self::Pool(_) => None,
        }
    }
}

impl From<rayon::ThreadPoolBuildError> for EvalError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        Self::Pool(err.to_string())
    }
}
