//! Trained Classifier Variants
//!
//! The decision function persisted in the model artifact. All variants
//! map an encoded feature vector to a class index; probabilistic variants
//! additionally expose a distribution over the fixed class set. Training
//! happens offline; this module only evaluates persisted parameters.

use serde::{Deserialize, Serialize};

use crate::error::{RecommendError, Result};

/// One fully-connected layer of the neural-network variant.
/// `weights` holds one row per output unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenseLayer {
    pub weights: Vec<Vec<f64>>,
    pub biases: Vec<f64>,
}

impl DenseLayer {
    fn output_width(&self) -> usize {
        self.weights.len()
    }

    fn input_width(&self) -> usize {
        self.weights.first().map_or(0, |row| row.len())
    }

    /// Affine transform; `relu` applies the hidden-layer activation.
    fn forward(&self, x: &[f64], relu: bool) -> Result<Vec<f64>> {
        let mut out = Vec::with_capacity(self.output_width());
        for (row, bias) in self.weights.iter().zip(&self.biases) {
            if row.len() != x.len() {
                return Err(RecommendError::inference_failure(format!(
                    "layer expects {} inputs, got {}",
                    row.len(),
                    x.len()
                )));
            }
            let mut z = *bias;
            for (w, v) in row.iter().zip(x) {
                z += w * v;
            }
            out.push(if relu { z.max(0.0) } else { z });
        }
        Ok(out)
    }
}

/// A trained classifier restored from the persisted artifact.
///
/// Variants:
/// - `LogisticRegression`: one-vs-rest linear model, one weight row per
///   class; probabilities are per-class sigmoids normalized to sum 1.
/// - `NeuralNetwork`: multilayer perceptron with ReLU hidden layers and a
///   softmax output.
/// - `NearestCentroid`: per-class centroids, nearest wins; exposes no
///   probability distribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum TrainedClassifier {
    LogisticRegression {
        coefficients: Vec<Vec<f64>>,
        intercepts: Vec<f64>,
    },
    NeuralNetwork {
        layers: Vec<DenseLayer>,
    },
    NearestCentroid {
        centroids: Vec<Vec<f64>>,
    },
}

impl TrainedClassifier {
    /// Number of classes this classifier scores.
    pub fn n_classes(&self) -> usize {
        match self {
            TrainedClassifier::LogisticRegression { coefficients, .. } => coefficients.len(),
            TrainedClassifier::NeuralNetwork { layers } => {
                layers.last().map_or(0, |layer| layer.output_width())
            }
            TrainedClassifier::NearestCentroid { centroids } => centroids.len(),
        }
    }

    /// Width of the feature vector this classifier was trained on.
    pub fn input_width(&self) -> usize {
        match self {
            TrainedClassifier::LogisticRegression { coefficients, .. } => {
                coefficients.first().map_or(0, |row| row.len())
            }
            TrainedClassifier::NeuralNetwork { layers } => {
                layers.first().map_or(0, |layer| layer.input_width())
            }
            TrainedClassifier::NearestCentroid { centroids } => {
                centroids.first().map_or(0, |c| c.len())
            }
        }
    }

    /// Whether `predict_probabilities` returns a distribution.
    pub fn is_probabilistic(&self) -> bool {
        !matches!(self, TrainedClassifier::NearestCentroid { .. })
    }

    /// Structural consistency check, run when the artifact is loaded.
    pub fn validate(&self) -> std::result::Result<(), String> {
        match self {
            TrainedClassifier::LogisticRegression {
                coefficients,
                intercepts,
            } => {
                if coefficients.is_empty() {
                    return Err("logistic regression has no weight rows".to_string());
                }
                if intercepts.len() != coefficients.len() {
                    return Err(format!(
                        "logistic regression has {} weight rows but {} intercepts",
                        coefficients.len(),
                        intercepts.len()
                    ));
                }
                let width = coefficients[0].len();
                if width == 0 {
                    return Err("logistic regression weight rows are empty".to_string());
                }
                if coefficients.iter().any(|row| row.len() != width) {
                    return Err("logistic regression weight rows have unequal widths".to_string());
                }
                Ok(())
            }
            TrainedClassifier::NeuralNetwork { layers } => {
                if layers.is_empty() {
                    return Err("neural network has no layers".to_string());
                }
                let mut width = layers[0].input_width();
                if width == 0 {
                    return Err("neural network first layer has no inputs".to_string());
                }
                for (i, layer) in layers.iter().enumerate() {
                    if layer.weights.is_empty() {
                        return Err(format!("neural network layer {i} has no units"));
                    }
                    if layer.biases.len() != layer.output_width() {
                        return Err(format!(
                            "neural network layer {i} has {} units but {} biases",
                            layer.output_width(),
                            layer.biases.len()
                        ));
                    }
                    if layer.weights.iter().any(|row| row.len() != width) {
                        return Err(format!(
                            "neural network layer {i} expects {width}-wide input"
                        ));
                    }
                    width = layer.output_width();
                }
                Ok(())
            }
            TrainedClassifier::NearestCentroid { centroids } => {
                if centroids.is_empty() {
                    return Err("nearest centroid has no centroids".to_string());
                }
                let width = centroids[0].len();
                if width == 0 {
                    return Err("nearest centroid centroids are empty".to_string());
                }
                if centroids.iter().any(|c| c.len() != width) {
                    return Err("nearest centroid centroids have unequal widths".to_string());
                }
                Ok(())
            }
        }
    }

    /// Predict the class index for an encoded feature vector.
    pub fn predict(&self, x: &[f64]) -> Result<usize> {
        self.check_input(x)?;
        match self {
            TrainedClassifier::LogisticRegression { .. } | TrainedClassifier::NeuralNetwork { .. } => {
                Ok(argmax_first(&self.decision_scores(x)?))
            }
            TrainedClassifier::NearestCentroid { centroids } => {
                let mut best = 0;
                let mut best_d2 = f64::INFINITY;
                for (i, centroid) in centroids.iter().enumerate() {
                    let d2: f64 = centroid
                        .iter()
                        .zip(x)
                        .map(|(c, v)| (c - v) * (c - v))
                        .sum();
                    if d2 < best_d2 {
                        best_d2 = d2;
                        best = i;
                    }
                }
                Ok(best)
            }
        }
    }

    /// Probability distribution over the class set, when this classifier
    /// exposes one. `Ok(None)` means the capability is absent, not an
    /// error and not a zero confidence.
    pub fn predict_probabilities(&self, x: &[f64]) -> Result<Option<Vec<f64>>> {
        self.check_input(x)?;
        match self {
            TrainedClassifier::LogisticRegression { .. } => {
                // One-vs-rest: independent sigmoids normalized to sum 1.
                let scores: Vec<f64> = self
                    .decision_scores(x)?
                    .into_iter()
                    .map(sigmoid)
                    .collect();
                let total: f64 = scores.iter().sum();
                Ok(Some(scores.into_iter().map(|s| s / total).collect()))
            }
            TrainedClassifier::NeuralNetwork { .. } => {
                Ok(Some(softmax(&self.decision_scores(x)?)))
            }
            TrainedClassifier::NearestCentroid { .. } => Ok(None),
        }
    }

    /// Raw per-class scores before any probability transform.
    fn decision_scores(&self, x: &[f64]) -> Result<Vec<f64>> {
        match self {
            TrainedClassifier::LogisticRegression {
                coefficients,
                intercepts,
            } => {
                let mut scores = Vec::with_capacity(coefficients.len());
                for (row, bias) in coefficients.iter().zip(intercepts) {
                    let mut z = *bias;
                    for (w, v) in row.iter().zip(x) {
                        z += w * v;
                    }
                    scores.push(z);
                }
                Ok(scores)
            }
            TrainedClassifier::NeuralNetwork { layers } => {
                let last = layers.len() - 1;
                let mut activations = layers[0].forward(x, last != 0)?;
                for (i, layer) in layers.iter().enumerate().skip(1) {
                    activations = layer.forward(&activations, i != last)?;
                }
                Ok(activations)
            }
            TrainedClassifier::NearestCentroid { .. } => Err(RecommendError::inference_failure(
                "nearest centroid exposes no decision scores".to_string(),
            )),
        }
    }

    fn check_input(&self, x: &[f64]) -> Result<()> {
        let expected = self.input_width();
        if x.len() != expected {
            return Err(RecommendError::inference_failure(format!(
                "classifier expects {expected} features, got {}",
                x.len()
            )));
        }
        Ok(())
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + libm::exp(-z))
}

/// Numerically stable softmax.
fn softmax(logits: &[f64]) -> Vec<f64> {
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|&z| libm::exp(z - max)).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

/// Index of the highest score; the first wins on ties.
fn argmax_first(scores: &[f64]) -> usize {
    let mut best = 0;
    for (i, &s) in scores.iter().enumerate().skip(1) {
        if s > scores[best] {
            best = i;
        }
    }
    best
}
