//! Persisted Model Bundle
//!
//! The JSON artifact produced by offline training: classifier parameters,
//! per-feature category encoders, the ordered crop label list, and a
//! model-type tag. Loaded once per process and shared read-only across
//! all inference calls; reloading per request is never needed because the
//! bundle is immutable at runtime.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classifier::TrainedClassifier;
use crate::encoding::EncoderSet;
use crate::error::{RecommendError, Result};
use crate::features::{Feature, FEATURE_COUNT};

/// Everything the offline training step persists for inference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Human-readable tag recorded at training time
    /// (e.g., "Neural Network", "Logistic Regression").
    pub model_type: String,

    /// Crop labels in classifier class order.
    pub labels: Vec<String>,

    /// Per-feature category encoders keyed by training column name.
    pub encoders: EncoderSet,

    /// The trained decision function.
    pub classifier: TrainedClassifier,
}

impl ModelArtifact {
    /// Load and validate a bundle from disk.
    ///
    /// Any failure here — missing file, malformed JSON, incomplete
    /// encoders, inconsistent classifier shape — is `ArtifactUnavailable`:
    /// a fatal configuration error for every recommendation, logged loudly.
    pub fn load(path: &Path) -> Result<Self> {
        match Self::load_inner(path) {
            Ok(artifact) => {
                tracing::info!(
                    "Loaded model artifact '{}' ({} crop labels) from {}",
                    artifact.model_type,
                    artifact.labels.len(),
                    path.display()
                );
                Ok(artifact)
            }
            Err(err) => {
                tracing::error!("Failed to load model artifact from {}: {}", path.display(), err);
                Err(err)
            }
        }
    }

    fn load_inner(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            RecommendError::artifact_unavailable(format!("failed to read {}: {}", path.display(), e))
        })?;

        let artifact: ModelArtifact = serde_json::from_str(&contents).map_err(|e| {
            RecommendError::artifact_unavailable(format!("malformed bundle {}: {}", path.display(), e))
        })?;

        artifact
            .validate()
            .map_err(RecommendError::artifact_unavailable)?;

        Ok(artifact)
    }

    /// Write the bundle as pretty JSON. Used by tests and the demo binary
    /// to produce fixture bundles; training pipelines write the same shape.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            RecommendError::artifact_unavailable(format!("failed to serialize bundle: {e}"))
        })?;
        fs::write(path, json).map_err(|e| {
            RecommendError::artifact_unavailable(format!("failed to write {}: {}", path.display(), e))
        })?;
        Ok(())
    }

    /// Consistency checks run before the bundle is ever used.
    fn validate(&self) -> std::result::Result<(), String> {
        if self.labels.is_empty() {
            return Err("bundle carries no crop labels".to_string());
        }

        for feature in Feature::ALL {
            match self.encoders.get(feature) {
                None => {
                    return Err(format!(
                        "bundle is missing the encoder for column '{}'",
                        feature.column_name()
                    ));
                }
                Some(encoder) if encoder.is_empty() => {
                    return Err(format!(
                        "encoder for column '{}' has an empty alphabet",
                        feature.column_name()
                    ));
                }
                Some(_) => {}
            }
        }

        self.classifier.validate()?;

        if self.classifier.n_classes() != self.labels.len() {
            return Err(format!(
                "classifier scores {} classes but bundle lists {} labels",
                self.classifier.n_classes(),
                self.labels.len()
            ));
        }
        if self.classifier.input_width() != FEATURE_COUNT {
            return Err(format!(
                "classifier expects {}-wide input, pipeline produces {}",
                self.classifier.input_width(),
                FEATURE_COUNT
            ));
        }

        Ok(())
    }

    /// Crop label for a class index.
    pub fn crop_label(&self, class_index: usize) -> Option<&str> {
        self.labels.get(class_index).map(String::as_str)
    }
}
