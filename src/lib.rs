//! Crop Recommendation Core
//!
//! Categorical crop recommendation for an agricultural marketplace:
//! threshold binning of agronomic measurements, label encoding fixed at
//! training time, classifier inference, and seller lookup for the
//! recommended crop.
//!
//! - `categorize`: threshold binning of raw measurements
//! - `features`: feature identities and input records
//! - `encoding`: persisted category/code bijections
//! - `classifier`: trained classifier variants
//! - `artifact`: the persisted model bundle
//! - `predictor`: the encode-and-predict pipeline
//! - `catalog`: seller listings for recommended crops
//! - `error`: the failure taxonomy

pub mod artifact;
pub mod catalog;
pub mod categorize;
pub mod classifier;
pub mod encoding;
pub mod error;
pub mod features;
pub mod predictor;

// Re-export commonly used types
pub use artifact::ModelArtifact;
pub use catalog::{MarketRecommendation, SellerCatalog, SellerListing};
pub use classifier::{DenseLayer, TrainedClassifier};
pub use encoding::{CategoryEncoder, EncoderSet};
pub use error::{RecommendError, Result};
pub use features::{CategoryInput, Feature, Measurements, FEATURE_COUNT};
pub use predictor::{CropRecommender, RankedCrop, Recommendation};
