//! Recommendation Predictor
//!
//! Turns seven category labels into a crop recommendation: encode each
//! category with the persisted encoders in training column order, run the
//! classifier, report the top label and its confidence. The predictor
//! owns the loaded artifact explicitly; construct it once and share it
//! read-only across concurrent calls.

use std::path::Path;

use rayon::prelude::*;
use serde::Serialize;
use smallvec::SmallVec;

use crate::artifact::ModelArtifact;
use crate::error::{RecommendError, Result};
use crate::features::{CategoryInput, Feature, Measurements, FEATURE_COUNT};

/// A single crop recommendation.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    /// The top-scoring crop label.
    pub crop: String,

    /// Maximum class probability for this input, in [0, 1]. Absent when
    /// the classifier exposes no probability distribution.
    pub confidence: Option<f64>,

    /// The conditions the recommendation was computed from, echoed back
    /// for display.
    pub input: CategoryInput,
}

impl Recommendation {
    /// Confidence as a two-decimal percentage, for display only.
    pub fn confidence_percentage(&self) -> Option<f64> {
        self.confidence.map(|c| (c * 100.0 * 100.0).round() / 100.0)
    }
}

/// One entry of a ranked prediction list.
#[derive(Debug, Clone, Serialize)]
pub struct RankedCrop {
    pub crop: String,
    pub confidence: Option<f64>,
}

/// The recommendation engine: a loaded artifact plus the encode-and-predict
/// pipeline. Stateless between calls; safe to share across threads.
#[derive(Debug)]
pub struct CropRecommender {
    artifact: ModelArtifact,
}

impl CropRecommender {
    /// Wrap an already-loaded artifact.
    pub fn new(artifact: ModelArtifact) -> Self {
        Self { artifact }
    }

    /// Load the artifact from disk and build the recommender. The bundle
    /// is read exactly once; every later call reuses it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let artifact = ModelArtifact::load(path.as_ref())?;
        Ok(Self::new(artifact))
    }

    /// The loaded bundle.
    pub fn artifact(&self) -> &ModelArtifact {
        &self.artifact
    }

    /// Recommend a crop for seven pre-binned category labels.
    pub fn recommend(&self, input: &CategoryInput) -> Result<Recommendation> {
        let encoded = self.encode_input(input)?;

        let class_index = self.artifact.classifier.predict(&encoded)?;
        let crop = self
            .artifact
            .crop_label(class_index)
            .ok_or_else(|| {
                RecommendError::inference_failure(format!(
                    "predicted class index {class_index} is outside the label set"
                ))
            })?
            .to_string();

        let confidence = self
            .artifact
            .classifier
            .predict_probabilities(&encoded)?
            .and_then(|probs| probs.into_iter().reduce(f64::max));

        tracing::debug!("Recommended '{}' (confidence: {:?})", crop, confidence);

        Ok(Recommendation {
            crop,
            confidence,
            input: input.clone(),
        })
    }

    /// Recommend a crop for raw measurements: bin them first, then predict.
    pub fn recommend_measurements(&self, measurements: &Measurements) -> Result<Recommendation> {
        self.recommend(&measurements.categorize())
    }

    /// The `k` highest-probability crops in descending order. For a
    /// classifier without probabilities this is just the single predicted
    /// crop with no confidence attached.
    pub fn top_k(&self, input: &CategoryInput, k: usize) -> Result<Vec<RankedCrop>> {
        let encoded = self.encode_input(input)?;

        match self.artifact.classifier.predict_probabilities(&encoded)? {
            Some(probs) => {
                let mut ranked: Vec<(usize, f64)> = probs.into_iter().enumerate().collect();
                ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
                ranked.truncate(k);

                ranked
                    .into_iter()
                    .map(|(class_index, p)| {
                        let crop = self
                            .artifact
                            .crop_label(class_index)
                            .ok_or_else(|| {
                                RecommendError::inference_failure(format!(
                                    "class index {class_index} is outside the label set"
                                ))
                            })?
                            .to_string();
                        Ok(RankedCrop {
                            crop,
                            confidence: Some(p),
                        })
                    })
                    .collect()
            }
            None => {
                let recommendation = self.recommend(input)?;
                Ok(vec![RankedCrop {
                    crop: recommendation.crop,
                    confidence: None,
                }])
            }
        }
    }

    /// Recommend for many inputs in parallel. Each call only reads the
    /// shared artifact, so no coordination is needed.
    pub fn recommend_batch(&self, inputs: &[CategoryInput]) -> Vec<Result<Recommendation>> {
        inputs.par_iter().map(|input| self.recommend(input)).collect()
    }

    /// Encode the seven categories in training column order.
    fn encode_input(&self, input: &CategoryInput) -> Result<SmallVec<[f64; FEATURE_COUNT]>> {
        let mut encoded = SmallVec::new();
        for feature in Feature::ALL {
            let code = self.artifact.encoders.encode(feature, input.get(feature))?;
            encoded.push(code as f64);
        }
        Ok(encoded)
    }
}
