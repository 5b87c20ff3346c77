//! Error types for the recommendation pipeline.
//!
//! Every recommendation either succeeds completely or fails with one of
//! these variants; no partial results are returned.

use thiserror::Error;

/// Failure taxonomy for crop recommendation.
#[derive(Debug, Error)]
pub enum RecommendError {
    /// The persisted model bundle is missing, unreadable, or internally
    /// inconsistent. Fatal for every recommendation that depends on it.
    #[error("model artifact unavailable: {reason}")]
    ArtifactUnavailable {
        /// What went wrong while locating or decoding the bundle
        reason: String,
    },

    /// A supplied category string has no entry in the persisted encoder
    /// for its feature. Caller-facing validation error.
    #[error("unknown category '{value}' for {feature} (expected one of: {expected})")]
    UnknownCategory {
        /// Feature the category was supplied for (e.g., "phosphorous")
        feature: String,
        /// The offending category string
        value: String,
        /// Comma-separated accepted alphabet for this feature
        expected: String,
    },

    /// The classifier failed during prediction. Callers should surface
    /// this to end users as a generic internal error; the reason is for
    /// logs only.
    #[error("internal inference error")]
    InferenceFailure {
        /// Diagnostic detail, not intended for end users
        reason: String,
    },
}

impl RecommendError {
    /// Create an `ArtifactUnavailable` with descriptive context.
    pub fn artifact_unavailable(reason: impl Into<String>) -> Self {
        Self::ArtifactUnavailable {
            reason: reason.into(),
        }
    }

    /// Create an `InferenceFailure` with diagnostic detail.
    pub fn inference_failure(reason: impl Into<String>) -> Self {
        Self::InferenceFailure {
            reason: reason.into(),
        }
    }
}

/// Convenience type alias for pipeline results.
pub type Result<T> = std::result::Result<T, RecommendError>;
