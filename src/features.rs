//! Feature definitions and input records.
//!
//! The classifier was trained on seven categorical columns in a fixed
//! order; `Feature::ALL` preserves that order and `column_name` gives the
//! training column each feature maps to.

use serde::{Deserialize, Serialize};

use crate::categorize::{
    categorize_humidity, categorize_nitrogen, categorize_ph, categorize_phosphorous,
    categorize_potassium, categorize_rainfall, categorize_temperature,
};

/// Number of input features the classifier consumes.
pub const FEATURE_COUNT: usize = 7;

/// The seven agronomic features, in training column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Nitrogen,
    Phosphorous,
    Potassium,
    Temperature,
    Humidity,
    Ph,
    Rainfall,
}

impl Feature {
    /// All features in the column order the classifier was trained on.
    /// The encoded vector fed to the classifier must preserve this order.
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::Nitrogen,
        Feature::Phosphorous,
        Feature::Potassium,
        Feature::Temperature,
        Feature::Humidity,
        Feature::Ph,
        Feature::Rainfall,
    ];

    /// Training column name, the key used in the persisted encoder bundle.
    pub fn column_name(&self) -> &'static str {
        match self {
            Feature::Nitrogen => "N_cat",
            Feature::Phosphorous => "P_cat",
            Feature::Potassium => "K_cat",
            Feature::Temperature => "temperature_cat",
            Feature::Humidity => "humidity_cat",
            Feature::Ph => "ph_cat",
            Feature::Rainfall => "rainfall_cat",
        }
    }

    /// Friendly name for display and error messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            Feature::Nitrogen => "nitrogen",
            Feature::Phosphorous => "phosphorous",
            Feature::Potassium => "potassium",
            Feature::Temperature => "temperature",
            Feature::Humidity => "humidity",
            Feature::Ph => "pH",
            Feature::Rainfall => "rainfall",
        }
    }
}

/// Raw agronomic measurements for one field or plot.
///
/// All values are annual/typical conditions; units follow the training
/// dataset (nutrients in kg/ha, temperature in degrees C, humidity in %,
/// rainfall in mm).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measurements {
    pub nitrogen: f64,
    pub phosphorous: f64,
    pub potassium: f64,
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub soil_ph: f64,
    pub rainfall_mm: f64,
}

impl Measurements {
    /// Bin every measurement into its ordinal category.
    pub fn categorize(&self) -> CategoryInput {
        CategoryInput {
            nitrogen: categorize_nitrogen(self.nitrogen).as_str().to_string(),
            phosphorous: categorize_phosphorous(self.phosphorous).as_str().to_string(),
            potassium: categorize_potassium(self.potassium).as_str().to_string(),
            temperature: categorize_temperature(self.temperature_c).as_str().to_string(),
            humidity: categorize_humidity(self.humidity_pct).as_str().to_string(),
            ph: categorize_ph(self.soil_ph).as_str().to_string(),
            rainfall: categorize_rainfall(self.rainfall_mm).as_str().to_string(),
        }
    }
}

/// One category label per feature, as supplied by a caller or produced by
/// the categorizer. Validation against the persisted encoders happens at
/// prediction time, so callers with pre-binned data can pass labels
/// directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInput {
    pub nitrogen: String,
    pub phosphorous: String,
    pub potassium: String,
    pub temperature: String,
    pub humidity: String,
    pub ph: String,
    pub rainfall: String,
}

impl CategoryInput {
    /// The category label supplied for a feature.
    pub fn get(&self, feature: Feature) -> &str {
        match feature {
            Feature::Nitrogen => &self.nitrogen,
            Feature::Phosphorous => &self.phosphorous,
            Feature::Potassium => &self.potassium,
            Feature::Temperature => &self.temperature,
            Feature::Humidity => &self.humidity,
            Feature::Ph => &self.ph,
            Feature::Rainfall => &self.rainfall,
        }
    }
}
