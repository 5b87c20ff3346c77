//! Category Encoding
//!
//! Fixed bijections between category names and integer codes, derived
//! once at training time and persisted inside the model artifact. The
//! runtime only consumes them; it never derives an encoding itself.
//!
//! Encoder semantics match the label encoding the model was trained with:
//! classes are stored in sorted order and a class's code is its index, so
//! the codes carry no ordinal meaning.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{RecommendError, Result};
use crate::features::Feature;

/// Bijection between one feature's category names and integer codes.
///
/// Serialized as the plain class list; code = position in the list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct CategoryEncoder {
    classes: Vec<String>,
    index: FxHashMap<String, i64>,
}

impl CategoryEncoder {
    /// Build an encoder from an ordered class list. The order is the one
    /// fixed at training time and must not be changed afterwards.
    pub fn new(classes: Vec<String>) -> Self {
        let index = classes
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i as i64))
            .collect();
        Self { classes, index }
    }

    /// Integer code for a category name, if the name is in the alphabet.
    pub fn code_of(&self, category: &str) -> Option<i64> {
        self.index.get(category).copied()
    }

    /// Category name for an integer code, if the code is valid.
    pub fn class_of(&self, code: i64) -> Option<&str> {
        if code < 0 {
            return None;
        }
        self.classes.get(code as usize).map(String::as_str)
    }

    /// The fixed category alphabet, in code order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl From<Vec<String>> for CategoryEncoder {
    fn from(classes: Vec<String>) -> Self {
        Self::new(classes)
    }
}

impl From<CategoryEncoder> for Vec<String> {
    fn from(encoder: CategoryEncoder) -> Self {
        encoder.classes
    }
}

/// The per-feature encoders of one trained model, keyed by training
/// column name (`N_cat`, `P_cat`, ...).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncoderSet {
    by_column: FxHashMap<String, CategoryEncoder>,
}

impl EncoderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an encoder under a training column name.
    pub fn insert(&mut self, column: impl Into<String>, encoder: CategoryEncoder) {
        self.by_column.insert(column.into(), encoder);
    }

    /// Encoder for a feature, if the bundle carries one.
    pub fn get(&self, feature: Feature) -> Option<&CategoryEncoder> {
        self.by_column.get(feature.column_name())
    }

    /// Encode one feature's category string to its persisted integer code.
    ///
    /// A category with no entry in the encoder is an `UnknownCategory`
    /// error naming the feature, the offending value, and the accepted
    /// alphabet. A missing encoder means the bundle is incomplete; that is
    /// normally caught at artifact load time.
    pub fn encode(&self, feature: Feature, category: &str) -> Result<i64> {
        let encoder = self.get(feature).ok_or_else(|| {
            RecommendError::artifact_unavailable(format!(
                "no encoder for column '{}'",
                feature.column_name()
            ))
        })?;

        encoder
            .code_of(category)
            .ok_or_else(|| RecommendError::UnknownCategory {
                feature: feature.display_name().to_string(),
                value: category.to_string(),
                expected: encoder.classes().join(", "),
            })
    }
}
