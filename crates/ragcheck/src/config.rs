// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Engine configuration

use crate::error::{Error, Result};
use crate::label::{MatrixLayout, Vocabulary, DEFAULT_ENTAILMENT_LABEL};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for an [`Engine`](crate::Engine).
///
/// Every field has a default, so a config file only names what it changes:
///
/// ```yaml
/// entailment_label: supported
/// matrix_layout: claim_major
/// strict_shapes: true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Checker label that counts as entailed
    pub entailment_label: String,

    /// Orientation of the checker's chunk/claim matrices
    pub matrix_layout: MatrixLayout,

    /// Reject records whose fields disagree on chunk or claim counts
    pub strict_shapes: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            entailment_label: DEFAULT_ENTAILMENT_LABEL.to_string(),
            matrix_layout: MatrixLayout::default(),
            strict_shapes: false,
        }
    }
}

impl EngineConfig {
    /// Load a config file. `.yaml`/`.yml` files are read as YAML, anything
    /// else as JSON.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read {}: {}", path.display(), e)))?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml(&content),
            _ => Self::from_json(&content),
        }
    }

    /// Parse from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::config(e.to_string()))
    }

    /// Parse from YAML.
    #[cfg(feature = "yaml")]
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| Error::config(e.to_string()))
    }

    /// Parse from YAML.
    #[cfg(not(feature = "yaml"))]
    pub fn from_yaml(_yaml: &str) -> Result<Self> {
        Err(Error::config("YAML support not enabled (feature \"yaml\")"))
    }

    /// Set the entailment label.
    pub fn with_entailment_label(mut self, label: impl Into<String>) -> Self {
        self.entailment_label = label.into();
        self
    }

    /// Set the matrix layout.
    pub fn with_matrix_layout(mut self, layout: MatrixLayout) -> Self {
        self.matrix_layout = layout;
        self
    }

    /// Enable or disable strict shape validation.
    pub fn with_strict_shapes(mut self, strict: bool) -> Self {
        self.strict_shapes = strict;
        self
    }

    /// The label vocabulary described by this config.
    pub fn vocabulary(&self) -> Vocabulary {
        Vocabulary::new(self.entailment_label.clone())
    }
}
